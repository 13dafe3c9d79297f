use std::collections::BTreeMap;
use std::mem;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::codes::{RandomCodeGenerator, ResidentCodeGenerator};
use super::complaints::{ComplaintBook, StatusUpdate};
use super::credentials::{
    CredentialVerifier, DemoDirectory, DEMO_RESIDENT_CODE, DEMO_RESIDENT_CODE_CAPACITY,
};
use super::domain::{
    ApprovedRegistration, AwaitingOnboarding, Complaint, ComplaintDraft, ComplaintId,
    ComplaintStatus, FormErrors, LastApproved, PendingRegistration, RegistrationForm,
    RegistrationId, ResidentCode, Session, User,
};
use super::ledger::{CodeValidationError, ResidentCodeEntry, ResidentCodeLedger};
use super::profile::Profile;
use crate::config::CommunityConfig;

/// Issued codes are regenerated when they collide with an existing ledger entry.
const MAX_CODE_ATTEMPTS: usize = 8;

/// Where a successful registration leaves the registrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistrationOutcome {
    /// Resident code accepted; continue to profile setup.
    NeedsProfileSetup,
    /// No resident code; wait for an admin to approve.
    AwaitingApproval,
}

impl RegistrationOutcome {
    pub fn needs_approval(self) -> bool {
        matches!(self, RegistrationOutcome::AwaitingApproval)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("registration form is incomplete: {0}")]
    InvalidForm(FormErrors),
    #[error(transparent)]
    Code(#[from] CodeValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileSetupError {
    #[error("no registration is waiting for profile setup")]
    NoPendingUser,
    #[error("profile is incomplete: {0}")]
    Invalid(FormErrors),
}

/// Point-in-time copy of everything the manager owns, for views and comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunitySnapshot {
    pub session: Session,
    pub onboarding: AwaitingOnboarding,
    pub profile: Option<Profile>,
    pub pending_registrations: Vec<PendingRegistration>,
    pub approved_registrations: BTreeMap<String, ApprovedRegistration>,
    pub last_approved: Option<LastApproved>,
    pub resident_codes: Vec<ResidentCodeEntry>,
    pub complaints: Vec<Complaint>,
}

/// Owns the session, onboarding, registration approval, resident code, and complaint state.
///
/// Constructed once at start-up and passed to consumers by reference; every mutation goes
/// through the methods below and either applies fully or leaves state untouched.
pub struct CommunityManager<V = DemoDirectory, G = RandomCodeGenerator> {
    verifier: V,
    codes: G,
    session: Session,
    onboarding: AwaitingOnboarding,
    profile: Option<Profile>,
    pending_registrations: Vec<PendingRegistration>,
    approved_registrations: BTreeMap<String, ApprovedRegistration>,
    ledger: ResidentCodeLedger,
    last_approved: Option<LastApproved>,
    complaints: ComplaintBook,
    registration_sequence: u64,
}

impl CommunityManager {
    /// Demo accounts, random code issuance, and the demo household code.
    pub fn demo(config: &CommunityConfig) -> Self {
        CommunityManager::new(
            DemoDirectory::new(config.name.clone()),
            RandomCodeGenerator::from_config(config),
        )
        .with_demo_codes()
    }
}

impl<V, G> CommunityManager<V, G>
where
    V: CredentialVerifier,
    G: ResidentCodeGenerator,
{
    pub fn new(verifier: V, codes: G) -> Self {
        Self {
            verifier,
            codes,
            session: Session::Anonymous,
            onboarding: AwaitingOnboarding::None,
            profile: None,
            pending_registrations: Vec::new(),
            approved_registrations: BTreeMap::new(),
            ledger: ResidentCodeLedger::default(),
            last_approved: None,
            complaints: ComplaintBook::default(),
            registration_sequence: 0,
        }
    }

    /// Seed the household code already held by the demo resident account.
    pub fn with_demo_codes(mut self) -> Self {
        if let Some(code) = ResidentCode::normalize(DEMO_RESIDENT_CODE) {
            self.ledger.seed(code, DEMO_RESIDENT_CODE_CAPACITY, 1);
        }
        self
    }

    pub fn login(&mut self, email: &str, password: &str) -> bool {
        let Some(account) = self.verifier.verify(email, password) else {
            info!(%email, "login rejected");
            return false;
        };

        info!(%email, role = account.user.role.label(), "login accepted");
        self.session = Session::Authenticated(account.user);
        self.profile = account.profile;
        true
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.session.user() {
            info!(email = %user.email, "logout");
        }
        self.session = Session::Anonymous;
        self.onboarding = AwaitingOnboarding::None;
        self.profile = None;
    }

    /// Register a resident. A resident code admits them straight to profile setup;
    /// without one the registration queues for admin approval.
    pub fn register_resident(
        &mut self,
        form: RegistrationForm,
    ) -> Result<RegistrationOutcome, RegistrationError> {
        form.validate().map_err(RegistrationError::InvalidForm)?;

        if ResidentCode::normalize(&form.resident_code).is_some() {
            let code = self.ledger.consume(&form.resident_code).map_err(|err| {
                info!(email = %form.email, error = %err, "resident code refused");
                err
            })?;
            info!(
                email = %form.email,
                resident_code = %code,
                usage = self.ledger.usage(&code),
                "registered against resident code"
            );
            let draft = form.resident_draft(Some(code));
            self.onboarding = AwaitingOnboarding::NeedsProfileSetup(draft);
            return Ok(RegistrationOutcome::NeedsProfileSetup);
        }

        self.registration_sequence += 1;
        let draft = form.resident_draft(None);
        let registration = PendingRegistration {
            id: RegistrationId(format!("REG-{:04}", self.registration_sequence)),
            email: draft.email.clone(),
            full_name: draft.name.clone(),
            phone: draft.phone.clone(),
            block: draft.block.clone(),
            floor: draft.floor.clone(),
            flat_number: draft.flat_number.clone(),
            family_members: draft.family_members.clone(),
            vehicles: draft.vehicles.clone(),
            submitted_at: Utc::now(),
        };
        info!(
            email = %registration.email,
            registration_id = %registration.id.0,
            "registration queued for approval"
        );
        self.pending_registrations.push(registration);
        self.onboarding = AwaitingOnboarding::AwaitingApproval(draft);
        Ok(RegistrationOutcome::AwaitingApproval)
    }

    /// Read-only resident code check.
    pub fn validate_resident_code(&self, code: &str) -> Result<ResidentCode, CodeValidationError> {
        self.ledger.validate(code)
    }

    /// Approve a queued registration and issue its household code. `None` when the id is
    /// not queued or no unused code could be generated; the registration then stays queued.
    pub fn approve_resident(&mut self, registration_id: &RegistrationId) -> Option<LastApproved> {
        let Some(position) = self
            .pending_registrations
            .iter()
            .position(|registration| &registration.id == registration_id)
        else {
            debug!(registration_id = %registration_id.0, "approval skipped: not pending");
            return None;
        };

        let family_members_count = self.pending_registrations[position].household_capacity();
        let Some(resident_code) = self.issue_code(family_members_count) else {
            warn!(
                registration_id = %registration_id.0,
                attempts = MAX_CODE_ATTEMPTS,
                "approval skipped: no unused resident code could be generated"
            );
            return None;
        };
        let registration = self.pending_registrations.remove(position);
        self.approved_registrations
            .entry(registration.email.clone())
            .or_insert_with(|| ApprovedRegistration {
                resident_code: resident_code.clone(),
                family_members_count,
            });

        info!(
            email = %registration.email,
            registration_id = %registration.id.0,
            resident_code = %resident_code,
            family_members_count,
            "registration approved"
        );

        let approved = LastApproved {
            registration,
            resident_code,
            family_members_count,
            approved_at: Utc::now(),
        };
        self.last_approved = Some(approved.clone());
        Some(approved)
    }

    /// Drop a queued registration. Returns whether anything was removed.
    pub fn reject_resident(&mut self, registration_id: &RegistrationId) -> bool {
        let before = self.pending_registrations.len();
        self.pending_registrations
            .retain(|registration| &registration.id != registration_id);
        let removed = self.pending_registrations.len() != before;
        if removed {
            info!(registration_id = %registration_id.0, "registration rejected");
        } else {
            debug!(registration_id = %registration_id.0, "rejection skipped: not pending");
        }
        removed
    }

    /// Move the registrant awaiting approval on to profile setup once their email has been
    /// approved. Returns `true` only when that transition happens.
    pub fn check_approval_status(&mut self, email: &str) -> bool {
        let Some(approved) = self.approved_registrations.get(email) else {
            debug!(%email, "approval still pending");
            return false;
        };
        let resident_code = approved.resident_code.clone();

        match mem::take(&mut self.onboarding) {
            AwaitingOnboarding::AwaitingApproval(mut draft) if draft.email == email => {
                info!(%email, resident_code = %resident_code, "approval confirmed");
                draft.resident_code = Some(resident_code);
                self.onboarding = AwaitingOnboarding::NeedsProfileSetup(draft);
                true
            }
            other => {
                debug!(%email, "approved but no matching registrant is waiting");
                self.onboarding = other;
                false
            }
        }
    }

    /// Promote the pending user to an authenticated session and store their profile.
    pub fn complete_profile_setup(&mut self, profile: Profile) -> Result<(), ProfileSetupError> {
        profile.validate().map_err(ProfileSetupError::Invalid)?;

        let user = match mem::take(&mut self.onboarding) {
            AwaitingOnboarding::NeedsProfileSetup(user) => user,
            other => {
                warn!("profile setup attempted without a pending user");
                self.onboarding = other;
                return Err(ProfileSetupError::NoPendingUser);
            }
        };

        info!(email = %user.email, "profile setup complete");
        self.session = Session::Authenticated(user);
        self.profile = Some(profile);
        Ok(())
    }

    /// File a complaint as the signed-in user. Status always starts at `Pending`.
    pub fn add_complaint(&mut self, draft: ComplaintDraft) -> ComplaintId {
        let id = self.complaints.file(draft, self.session.user());
        info!(complaint_id = %id.0, "complaint filed");
        id
    }

    pub fn update_complaint_status(
        &mut self,
        complaint_id: &ComplaintId,
        status: ComplaintStatus,
    ) -> StatusUpdate {
        let outcome = self.complaints.update_status(complaint_id, status);
        match outcome {
            StatusUpdate::Applied => {
                info!(complaint_id = %complaint_id.0, status = status.label(), "complaint updated")
            }
            StatusUpdate::NotFound => {
                debug!(complaint_id = %complaint_id.0, "status update skipped: unknown complaint")
            }
            StatusUpdate::Regression { current } => warn!(
                complaint_id = %complaint_id.0,
                current = current.label(),
                requested = status.label(),
                "status update refused: complaints never move backwards"
            ),
        }
        outcome
    }

    fn issue_code(&mut self, family_members_count: u32) -> Option<ResidentCode> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = self.codes.generate();
            if self.ledger.issue(code.clone(), family_members_count) {
                return Some(code);
            }
            debug!(resident_code = %code, "generated resident code already issued");
        }
        None
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn onboarding(&self) -> &AwaitingOnboarding {
        &self.onboarding
    }

    pub fn pending_user(&self) -> Option<&User> {
        self.onboarding.pending_user()
    }

    pub fn pending_approval_user(&self) -> Option<&User> {
        self.onboarding.pending_approval_user()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn pending_registrations(&self) -> &[PendingRegistration] {
        &self.pending_registrations
    }

    pub fn approved_registrations(&self) -> &BTreeMap<String, ApprovedRegistration> {
        &self.approved_registrations
    }

    pub fn last_approved(&self) -> Option<&LastApproved> {
        self.last_approved.as_ref()
    }

    pub fn resident_codes(&self) -> &ResidentCodeLedger {
        &self.ledger
    }

    pub fn complaints(&self) -> &ComplaintBook {
        &self.complaints
    }

    /// Complaints filed by the signed-in user; empty when signed out.
    pub fn my_complaints(&self) -> Vec<&Complaint> {
        match self.session.user() {
            Some(user) => self.complaints.filed_by(user).collect(),
            None => Vec::new(),
        }
    }

    pub fn pending_complaints(&self) -> Vec<&Complaint> {
        self.complaints.pending().collect()
    }

    pub fn complaints_to_resolve(&self) -> Vec<&Complaint> {
        self.complaints.to_resolve().collect()
    }

    pub fn snapshot(&self) -> CommunitySnapshot {
        CommunitySnapshot {
            session: self.session.clone(),
            onboarding: self.onboarding.clone(),
            profile: self.profile.clone(),
            pending_registrations: self.pending_registrations.clone(),
            approved_registrations: self.approved_registrations.clone(),
            last_approved: self.last_approved.clone(),
            resident_codes: self.ledger.entries(),
            complaints: self.complaints.all().to_vec(),
        }
    }
}
