use super::common::*;
use crate::community::domain::{AwaitingOnboarding, ResidentCode, Role};
use crate::community::ledger::CodeValidationError;
use crate::community::manager::{RegistrationError, RegistrationOutcome};

#[test]
fn registering_with_a_valid_code_skips_approval() {
    let mut manager = manager();
    let outcome = manager
        .register_resident(registration_with_code("kavya@example.com", " rc-sun001 "))
        .expect("demo code has room");

    assert_eq!(outcome, RegistrationOutcome::NeedsProfileSetup);
    assert!(!outcome.needs_approval());
    let pending = manager.pending_user().expect("pending user set");
    assert_eq!(pending.role, Role::Resident);
    assert_eq!(pending.resident_code, ResidentCode::normalize("RC-SUN001"));
    assert_eq!(pending.vehicles, vec!["KA05 MN 4455", "KA05 ZZ 1"]);
    assert!(manager.pending_registrations().is_empty());

    let code = ResidentCode::normalize("RC-SUN001").expect("code");
    assert_eq!(manager.resident_codes().usage(&code), 2);
}

#[test]
fn registering_without_a_code_queues_for_approval() {
    let mut manager = manager();
    let outcome = manager
        .register_resident(registration("kavya@example.com", "3"))
        .expect("registration accepted");

    assert!(outcome.needs_approval());
    assert!(manager.pending_user().is_none());
    let waiting = manager
        .pending_approval_user()
        .expect("pending approval user set");
    assert_eq!(waiting.email, "kavya@example.com");
    assert!(waiting.resident_code.is_none());

    let queued = manager.pending_registrations();
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].full_name, "Kavya Menon");
    assert_eq!(queued[0].family_members, "3");
    assert_eq!(queued[0].vehicles.len(), 2);
}

#[test]
fn invalid_codes_leave_state_untouched() {
    let mut manager = manager();
    let before = manager.snapshot();

    match manager.register_resident(registration_with_code("kavya@example.com", "RC-BOGUS")) {
        Err(RegistrationError::Code(CodeValidationError::Unknown)) => {}
        other => panic!("expected unknown code error, got {other:?}"),
    }
    assert_eq!(manager.snapshot(), before);
}

#[test]
fn incomplete_forms_are_refused_before_code_checks() {
    let mut manager = manager();
    let mut form = registration_with_code("not-an-email", "RC-SUN001");
    form.full_name = "  ".to_string();
    let before = manager.snapshot();

    match manager.register_resident(form) {
        Err(RegistrationError::InvalidForm(errors)) => {
            assert_eq!(errors.get("email"), Some("Please enter a valid email."));
            assert_eq!(errors.get("fullName"), Some("Full name is required."));
        }
        other => panic!("expected form errors, got {other:?}"),
    }
    assert_eq!(manager.snapshot(), before);
}

#[test]
fn validate_resident_code_is_read_only() {
    let manager = manager();
    assert_eq!(
        manager.validate_resident_code("   "),
        Err(CodeValidationError::Missing)
    );
    assert_eq!(
        manager.validate_resident_code("nope"),
        Err(CodeValidationError::Unknown)
    );
    let code = manager
        .validate_resident_code("rc-sun001")
        .expect("demo code valid");
    assert_eq!(manager.resident_codes().usage(&code), 1);
}

#[test]
fn a_new_registration_replaces_the_onboarding_slot() {
    let mut manager = manager();
    manager
        .register_resident(registration("first@example.com", "2"))
        .expect("queued");
    manager
        .register_resident(registration_with_code("second@example.com", "RC-SUN001"))
        .expect("code accepted");

    match manager.onboarding() {
        AwaitingOnboarding::NeedsProfileSetup(user) => {
            assert_eq!(user.email, "second@example.com")
        }
        other => panic!("expected profile setup slot, got {other:?}"),
    }
    assert!(manager.pending_approval_user().is_none());
    assert_eq!(manager.pending_registrations().len(), 1);
}
