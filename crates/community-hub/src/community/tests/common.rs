use crate::community::codes::{ResidentCodeGenerator, SequentialCodeGenerator};
use crate::community::credentials::DemoDirectory;
use crate::community::domain::{RegistrationForm, ResidentCode, VehicleInput};
use crate::community::manager::CommunityManager;
use crate::community::profile::{BasicInfo, DomainSkills, Profile};

pub(super) type TestManager = CommunityManager<DemoDirectory, SequentialCodeGenerator>;

pub(super) fn manager() -> TestManager {
    CommunityManager::new(DemoDirectory::default(), SequentialCodeGenerator::new("RC-T"))
        .with_demo_codes()
}

/// Always hands out the same code, so every issue after the first collides.
pub(super) struct FixedCodeGenerator(pub(super) &'static str);

impl ResidentCodeGenerator for FixedCodeGenerator {
    fn generate(&mut self) -> ResidentCode {
        ResidentCode::normalize(self.0).expect("non-blank code")
    }
}

pub(super) fn registration(email: &str, family_members: &str) -> RegistrationForm {
    RegistrationForm {
        org_code: "SUNRISE".to_string(),
        full_name: "Kavya Menon".to_string(),
        email: email.to_string(),
        password: "hunter22".to_string(),
        phone: "9123456780".to_string(),
        block: "C".to_string(),
        floor: "5".to_string(),
        flat_number: "502".to_string(),
        resident_code: String::new(),
        family_members: family_members.to_string(),
        vehicles: VehicleInput::Text("KA05 MN 4455, KA05 ZZ 1".to_string()),
    }
}

pub(super) fn registration_with_code(email: &str, code: &str) -> RegistrationForm {
    RegistrationForm {
        resident_code: code.to_string(),
        ..registration(email, "1")
    }
}

pub(super) fn profile() -> Profile {
    Profile {
        basic_info: BasicInfo {
            username: "kavya_m".to_string(),
            occupation: "Teacher".to_string(),
            about: "Happy to help with homework clubs.".to_string(),
        },
        domains_with_skills: vec![DomainSkills::new("Education & Academics", "Maths L-4")],
        open_to_mentor: true,
        mentor_skills: vec!["Education & Academics::Maths L-4".to_string()],
        open_to_learn: false,
        learner_profile: None,
    }
}
