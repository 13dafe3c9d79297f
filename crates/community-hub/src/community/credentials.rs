use super::domain::{ResidentCode, Role, User};
use super::profile::{BasicInfo, DomainSkills, LearnerProfile, Profile};

pub const DEMO_ADMIN_EMAIL: &str = "admin@sunriseheights.com";
pub const DEMO_TECHNICIAN_EMAIL: &str = "tech@sunriseheights.com";
pub const DEMO_RESIDENT_EMAIL: &str = "resident@sunriseheights.com";
/// Household code held by the demo resident; seeded into every ledger.
pub const DEMO_RESIDENT_CODE: &str = "RC-SUN001";
pub const DEMO_RESIDENT_CODE_CAPACITY: u32 = 4;

/// Account details handed back by a verifier on successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAccount {
    pub user: User,
    pub profile: Option<Profile>,
}

/// Pluggable sign-in check so a real credential store can replace the demo table.
pub trait CredentialVerifier {
    fn verify(&self, email: &str, password: &str) -> Option<VerifiedAccount>;
}

/// Fixed demo role table. Matches on exact email; the password is not checked.
#[derive(Debug, Clone)]
pub struct DemoDirectory {
    community_name: String,
}

impl DemoDirectory {
    pub fn new(community_name: impl Into<String>) -> Self {
        Self {
            community_name: community_name.into(),
        }
    }

    fn resident_account(&self) -> VerifiedAccount {
        let user = User {
            name: "Ananya Rao".to_string(),
            email: DEMO_RESIDENT_EMAIL.to_string(),
            role: Role::Resident,
            community_name: self.community_name.clone(),
            resident_code: ResidentCode::normalize(DEMO_RESIDENT_CODE),
            phone: "9876543210".to_string(),
            block: "A".to_string(),
            floor: "3".to_string(),
            flat_number: "304".to_string(),
            family_members: "4".to_string(),
            vehicles: vec!["KA01 AB 1234".to_string()],
        };
        let profile = Profile {
            basic_info: BasicInfo {
                username: "ananya_r".to_string(),
                occupation: "Product Designer".to_string(),
                about: "Loves weekend baking and helping neighbours with design.".to_string(),
            },
            domains_with_skills: vec![
                DomainSkills::new("Creative & Arts", "Sketching L-4, UI Design L-5"),
                DomainSkills::new("Cooking & Food", "Baking L-3"),
            ],
            open_to_mentor: true,
            mentor_skills: vec!["Creative & Arts::UI Design L-5".to_string()],
            open_to_learn: true,
            learner_profile: Some(LearnerProfile {
                domains: vec!["Music & Performing Arts".to_string()],
                skills_text: "Guitar".to_string(),
                proficiency_expectation: "Beginner".to_string(),
            }),
        };

        VerifiedAccount {
            user,
            profile: Some(profile),
        }
    }
}

impl Default for DemoDirectory {
    fn default() -> Self {
        Self::new("Sunrise Heights")
    }
}

impl CredentialVerifier for DemoDirectory {
    fn verify(&self, email: &str, _password: &str) -> Option<VerifiedAccount> {
        let staff = |name: &str, role: Role| VerifiedAccount {
            user: User::staff(name, email, role, &self.community_name),
            profile: None,
        };

        match email {
            DEMO_ADMIN_EMAIL => Some(staff("Admin", Role::Admin)),
            DEMO_TECHNICIAN_EMAIL => Some(staff("Technician", Role::Technician)),
            DEMO_RESIDENT_EMAIL => Some(self.resident_account()),
            _ => None,
        }
    }
}
