//! Session, onboarding, registration approval, resident code, and complaint state for the
//! community dashboards.
//!
//! [`CommunityManager`] is the single owner of mutable state. Views read through its
//! accessors or a [`CommunitySnapshot`] and mutate only through its operations.

pub mod codes;
pub mod complaints;
pub mod credentials;
pub mod domain;
pub mod ledger;
pub mod manager;
pub mod matching;
pub mod profile;

#[cfg(test)]
mod tests;

pub use codes::{RandomCodeGenerator, ResidentCodeGenerator, SequentialCodeGenerator};
pub use complaints::{ComplaintBook, StatusUpdate};
pub use credentials::{CredentialVerifier, DemoDirectory, VerifiedAccount};
pub use domain::{
    ApprovedRegistration, AwaitingOnboarding, Complaint, ComplaintDraft, ComplaintId,
    ComplaintStatus, FormErrors, LastApproved, OrganizationForm, PendingRegistration,
    RegistrationForm, RegistrationId, ResidentCode, Role, Session, User, VehicleInput,
};
pub use ledger::{CodeAllowance, CodeValidationError, ResidentCodeEntry, ResidentCodeLedger};
pub use manager::{
    CommunityManager, CommunitySnapshot, ProfileSetupError, RegistrationError,
    RegistrationOutcome,
};
pub use matching::{CommunityDirectory, MatchRole, MemberCard, INTEREST_DOMAINS};
pub use profile::{BasicInfo, DomainSkills, LearnerProfile, MentorSkillOption, Profile};
