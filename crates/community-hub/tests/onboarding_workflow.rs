//! End-to-end onboarding scenarios driven through the public `CommunityManager` facade:
//! registration with and without a resident code, admin approval, approval polling, profile
//! setup, and sign-out.

use community_hub::community::{
    BasicInfo, CodeValidationError, CommunityManager, DemoDirectory, DomainSkills, Profile,
    RegistrationError, RegistrationForm, RegistrationOutcome, ResidentCode,
    SequentialCodeGenerator, VehicleInput,
};

fn manager() -> CommunityManager<DemoDirectory, SequentialCodeGenerator> {
    CommunityManager::new(DemoDirectory::default(), SequentialCodeGenerator::new("RC-"))
}

fn form(email: &str, family_members: &str, resident_code: &str) -> RegistrationForm {
    RegistrationForm {
        org_code: "SUNRISE".to_string(),
        full_name: format!("Resident {email}"),
        email: email.to_string(),
        password: "secret-pass".to_string(),
        phone: String::new(),
        block: "D".to_string(),
        floor: "1".to_string(),
        flat_number: "101".to_string(),
        resident_code: resident_code.to_string(),
        family_members: family_members.to_string(),
        vehicles: VehicleInput::List(vec!["KA03 1111".to_string()]),
    }
}

fn profile(username: &str) -> Profile {
    Profile {
        basic_info: BasicInfo {
            username: username.to_string(),
            ..BasicInfo::default()
        },
        domains_with_skills: vec![DomainSkills::new("Sports & Games", "Chess L-3")],
        ..Profile::default()
    }
}

#[test]
fn household_code_admits_family_up_to_its_capacity() {
    let mut manager = manager();

    let outcome = manager
        .register_resident(form("head@example.com", "2", ""))
        .expect("registration queued");
    assert_eq!(outcome, RegistrationOutcome::AwaitingApproval);
    assert_eq!(manager.pending_registrations().len(), 1);

    let id = manager.pending_registrations()[0].id.clone();
    let approved = manager.approve_resident(&id).expect("pending registration");
    let code = approved.resident_code.clone();
    assert_eq!(manager.resident_codes().len(), 1);
    let entry = &manager.resident_codes().entries()[0];
    assert_eq!((entry.family_members_count, entry.usage), (2, 1));

    let outcome = manager
        .register_resident(form("spouse@example.com", "2", code.as_str()))
        .expect("second member fits");
    assert_eq!(outcome, RegistrationOutcome::NeedsProfileSetup);
    assert_eq!(manager.resident_codes().usage(&code), 2);

    match manager.register_resident(form("cousin@example.com", "2", code.as_str())) {
        Err(RegistrationError::Code(CodeValidationError::Exhausted { .. })) => {}
        other => panic!("expected capacity error, got {other:?}"),
    }
    assert_eq!(manager.resident_codes().usage(&code), 2);
}

#[test]
fn approved_registrant_completes_onboarding_and_signs_out() {
    let mut manager = manager();
    manager
        .register_resident(form("head@example.com", "3", ""))
        .expect("registration queued");

    assert!(!manager.check_approval_status("head@example.com"));

    let id = manager.pending_registrations()[0].id.clone();
    manager.approve_resident(&id).expect("approved");
    assert!(manager.check_approval_status("head@example.com"));

    manager
        .complete_profile_setup(profile("head"))
        .expect("pending user promoted");
    let user = manager.user().expect("signed in");
    assert_eq!(user.email, "head@example.com");
    assert_eq!(user.resident_code, ResidentCode::normalize("RC-0001"));
    assert_eq!(user.vehicles, vec!["KA03 1111"]);

    let ledger_before = manager.resident_codes().entries();
    manager.logout();
    assert!(!manager.is_logged_in());
    assert!(manager.profile().is_none());
    assert_eq!(manager.resident_codes().entries(), ledger_before);
    assert!(manager
        .approved_registrations()
        .contains_key("head@example.com"));
}

#[test]
fn snapshot_serializes_for_views() {
    let mut manager = manager().with_demo_codes();
    manager
        .register_resident(form("head@example.com", "2", ""))
        .expect("registration queued");

    let json = serde_json::to_value(manager.snapshot()).expect("snapshot serializes");

    assert_eq!(json["session"]["state"], "anonymous");
    assert_eq!(json["onboarding"]["state"], "awaitingApproval");
    assert_eq!(json["onboarding"]["draft"]["email"], "head@example.com");
    assert_eq!(
        json["pendingRegistrations"][0]["fullName"],
        "Resident head@example.com"
    );
    assert_eq!(json["residentCodes"][0]["code"], "RC-SUN001");
    assert_eq!(json["residentCodes"][0]["familyMembersCount"], 4);
}

#[test]
fn registration_form_accepts_comma_separated_vehicles_from_json() {
    let payload = r#"{
        "orgCode": "SUNRISE",
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "password": "secret1",
        "familyMembers": "2",
        "vehicles": "KA01 1, , KA01 2 "
    }"#;
    let form: RegistrationForm = serde_json::from_str(payload).expect("form parses");
    let mut manager = manager();

    manager.register_resident(form).expect("queued");

    assert_eq!(
        manager.pending_registrations()[0].vehicles,
        vec!["KA01 1", "KA01 2"]
    );
}
