use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MIN_PASSWORD_LENGTH: usize = 6;

/// Dashboard role attached to every authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Resident,
    Technician,
    Admin,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Resident => "Resident",
            Role::Technician => "Technician",
            Role::Admin => "Admin",
        }
    }

    /// Technicians and admins may move complaints through their lifecycle.
    pub const fn can_manage_complaints(self) -> bool {
        matches!(self, Role::Technician | Role::Admin)
    }

    pub const fn can_review_registrations(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Household access token shared by family members registering against the same flat.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResidentCode(String);

impl ResidentCode {
    /// Trim and upper-case user input. Blank input yields `None`.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_ascii_uppercase()))
        }
    }

    /// Build an issued code from a prefix and generated suffix.
    pub(crate) fn issued(prefix: &str, suffix: &str) -> Self {
        Self(format!("{prefix}{suffix}").trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResidentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account record shown on dashboards once onboarding completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub community_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_code: Option<ResidentCode>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub block: String,
    #[serde(default)]
    pub floor: String,
    #[serde(default)]
    pub flat_number: String,
    #[serde(default)]
    pub family_members: String,
    #[serde(default)]
    pub vehicles: Vec<String>,
}

impl User {
    /// Staff accounts carry no household details.
    pub fn staff(name: &str, email: &str, role: Role, community_name: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            role,
            community_name: community_name.to_string(),
            resident_code: None,
            phone: String::new(),
            block: String::new(),
            floor: String::new(),
            flat_number: String::new(),
            family_members: String::new(),
            vehicles: Vec::new(),
        }
    }
}

/// Authentication state for the single active session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "user", rename_all = "camelCase")]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated(user) => Some(user),
            Session::Anonymous => None,
        }
    }
}

/// The single "awaiting onboarding" slot of the active registrant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "draft", rename_all = "camelCase")]
pub enum AwaitingOnboarding {
    #[default]
    None,
    /// Registration accepted; the skill profile is still outstanding.
    NeedsProfileSetup(User),
    /// Registered without a resident code; an admin has to approve first.
    AwaitingApproval(User),
}

impl AwaitingOnboarding {
    pub fn pending_user(&self) -> Option<&User> {
        match self {
            AwaitingOnboarding::NeedsProfileSetup(user) => Some(user),
            _ => None,
        }
    }

    pub fn pending_approval_user(&self) -> Option<&User> {
        match self {
            AwaitingOnboarding::AwaitingApproval(user) => Some(user),
            _ => None,
        }
    }
}

/// Vehicles arrive either as free text ("KA01 1234, KA02 9876") or as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VehicleInput {
    List(Vec<String>),
    Text(String),
}

impl Default for VehicleInput {
    fn default() -> Self {
        VehicleInput::Text(String::new())
    }
}

impl VehicleInput {
    pub fn normalize(&self) -> Vec<String> {
        match self {
            VehicleInput::Text(text) => split_list(text),
            VehicleInput::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Split comma separated input into trimmed, non-empty entries.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Field level validation messages keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Loose `local@domain.tld` shape check; no whitespace, exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(idx, ch)| ch == '.' && idx > 0 && idx + 1 < domain.len())
}

fn check_credentials(errors: &mut FormErrors, email: &str, password: &str) {
    if !is_valid_email(email) {
        errors.insert("email", "Please enter a valid email.");
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.insert(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters."),
        );
    }
}

/// Resident self-registration payload as submitted by the registration form.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub org_code: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub block: String,
    pub floor: String,
    pub flat_number: String,
    pub resident_code: String,
    pub family_members: String,
    pub vehicles: VehicleInput,
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("org_code", &self.org_code)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("resident_code", &self.resident_code)
            .field("family_members", &self.family_members)
            .finish_non_exhaustive()
    }
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if self.org_code.trim().is_empty() {
            errors.insert("orgCode", "Organization code is required.");
        }
        if self.full_name.trim().is_empty() {
            errors.insert("fullName", "Full name is required.");
        }
        check_credentials(&mut errors, &self.email, &self.password);
        if !matches!(self.declared_family_size(), Some(count) if count >= 1) {
            errors.insert(
                "familyMembers",
                "Number of family members must be at least 1.",
            );
        }
        errors.into_result()
    }

    /// Leading-integer parse of the family size field, mirroring lenient form input.
    pub fn declared_family_size(&self) -> Option<i64> {
        parse_leading_int(&self.family_members)
    }

    pub(crate) fn resident_draft(&self, resident_code: Option<ResidentCode>) -> User {
        User {
            name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: Role::Resident,
            community_name: self.community_name(),
            resident_code,
            phone: self.phone.trim().to_string(),
            block: self.block.trim().to_string(),
            floor: self.floor.trim().to_string(),
            flat_number: self.flat_number.trim().to_string(),
            family_members: self.family_members.trim().to_string(),
            vehicles: self.vehicles.normalize(),
        }
    }

    fn community_name(&self) -> String {
        let org = self.org_code.trim();
        if org.is_empty() {
            "Community".to_string()
        } else {
            org.to_string()
        }
    }
}

pub(crate) fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(digits.len(), |(idx, _)| idx);
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

/// Community onboarding form used by an administrator to register an organization.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganizationForm {
    pub community_name: String,
    pub admin_name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for OrganizationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrganizationForm")
            .field("community_name", &self.community_name)
            .field("admin_name", &self.admin_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl OrganizationForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if self.community_name.trim().is_empty() {
            errors.insert("communityName", "Community name is required.");
        }
        if self.admin_name.trim().is_empty() {
            errors.insert("adminName", "Admin name is required.");
        }
        check_credentials(&mut errors, &self.email, &self.password);
        errors.into_result()
    }
}

/// Identifier wrapper for registrations awaiting admin review.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(pub String);

/// Registration submitted without a resident code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRegistration {
    pub id: RegistrationId,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub block: String,
    pub floor: String,
    pub flat_number: String,
    pub family_members: String,
    pub vehicles: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

impl PendingRegistration {
    /// Household capacity granted on approval; never below one.
    pub fn household_capacity(&self) -> u32 {
        parse_leading_int(&self.family_members)
            .map(|count| count.clamp(1, i64::from(u32::MAX)))
            .and_then(|count| u32::try_from(count).ok())
            .unwrap_or(1)
    }
}

/// Outcome recorded against an email once an admin approves the registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedRegistration {
    pub resident_code: ResidentCode,
    pub family_members_count: u32,
}

/// Most recent approval, surfaced to the admin so the code can be handed over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastApproved {
    pub registration: PendingRegistration,
    pub resident_code: ResidentCode,
    pub family_members_count: u32,
    pub approved_at: DateTime<Utc>,
}

/// Identifier wrapper for complaints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplaintId(pub String);

/// Complaint lifecycle. Moves forward only; `InProgress` may be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComplaintStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Resolved => "Resolved",
        }
    }

    pub const fn is_open(self) -> bool {
        !matches!(self, ComplaintStatus::Resolved)
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resident supplied part of a complaint. Identity fields come from the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplaintDraft {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub photo_names: Vec<String>,
}

impl ComplaintDraft {
    pub fn new(kind: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            photo_names: Vec::new(),
        }
    }

    /// Vehicle complaint: `Vehicle: <number> · <notes>`, skipping blank parts.
    pub fn vehicle(number: &str, notes: &str, photo_names: Vec<String>) -> Self {
        let number = number.trim();
        let parts: Vec<String> = [
            (!number.is_empty()).then(|| format!("Vehicle: {number}")),
            Some(notes.trim().to_string()).filter(|notes| !notes.is_empty()),
        ]
        .into_iter()
        .flatten()
        .collect();
        let description = if parts.is_empty() {
            "Vehicle complaint".to_string()
        } else {
            parts.join(" · ")
        };
        Self {
            kind: "Vehicle".to_string(),
            description,
            photo_names,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: ComplaintId,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub photo_names: Vec<String>,
    pub resident_name: String,
    pub resident_phone: String,
    pub block: String,
    pub floor: String,
    pub flat: String,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
}
