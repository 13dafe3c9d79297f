use chrono::Utc;

use super::domain::{Complaint, ComplaintDraft, ComplaintId, ComplaintStatus, User};

/// Result of a status change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    Applied,
    NotFound,
    /// Status only moves forward; the complaint was left untouched.
    Regression { current: ComplaintStatus },
}

impl StatusUpdate {
    pub fn applied(self) -> bool {
        matches!(self, StatusUpdate::Applied)
    }
}

/// Every complaint filed during the process lifetime, in filing order.
#[derive(Debug, Clone, Default)]
pub struct ComplaintBook {
    complaints: Vec<Complaint>,
    sequence: u64,
}

impl ComplaintBook {
    /// File a complaint on behalf of `resident`; status always starts at `Pending`.
    pub fn file(&mut self, draft: ComplaintDraft, resident: Option<&User>) -> ComplaintId {
        self.sequence += 1;
        let id = ComplaintId(format!("CMP-{:04}", self.sequence));
        let (resident_name, resident_phone, block, floor, flat) = match resident {
            Some(user) => (
                user.name.clone(),
                user.phone.clone(),
                user.block.clone(),
                user.floor.clone(),
                user.flat_number.clone(),
            ),
            None => Default::default(),
        };

        self.complaints.push(Complaint {
            id: id.clone(),
            kind: draft.kind,
            description: draft.description,
            photo_names: draft.photo_names,
            resident_name,
            resident_phone,
            block,
            floor,
            flat,
            status: ComplaintStatus::Pending,
            created_at: Utc::now(),
        });
        id
    }

    pub fn update_status(&mut self, id: &ComplaintId, status: ComplaintStatus) -> StatusUpdate {
        let Some(complaint) = self.complaints.iter_mut().find(|c| &c.id == id) else {
            return StatusUpdate::NotFound;
        };
        if status < complaint.status {
            return StatusUpdate::Regression {
                current: complaint.status,
            };
        }
        complaint.status = status;
        StatusUpdate::Applied
    }

    pub fn get(&self, id: &ComplaintId) -> Option<&Complaint> {
        self.complaints.iter().find(|c| &c.id == id)
    }

    pub fn all(&self) -> &[Complaint] {
        &self.complaints
    }

    pub fn len(&self) -> usize {
        self.complaints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.complaints.is_empty()
    }

    /// Complaints filed by `user`, matched on name or on a non-empty phone number.
    pub fn filed_by<'a>(&'a self, user: &'a User) -> impl Iterator<Item = &'a Complaint> + 'a {
        self.complaints.iter().filter(move |c| {
            c.resident_name == user.name
                || (!user.phone.is_empty() && c.resident_phone == user.phone)
        })
    }

    pub fn pending(&self) -> impl Iterator<Item = &Complaint> {
        self.with_status(|status| status == ComplaintStatus::Pending)
    }

    /// Work queue for technicians: anything not yet resolved.
    pub fn to_resolve(&self) -> impl Iterator<Item = &Complaint> {
        self.with_status(ComplaintStatus::is_open)
    }

    fn with_status(
        &self,
        keep: impl Fn(ComplaintStatus) -> bool,
    ) -> impl Iterator<Item = &Complaint> {
        self.complaints.iter().filter(move |c| keep(c.status))
    }
}
