use community_hub::community::credentials::{DEMO_RESIDENT_EMAIL, DEMO_TECHNICIAN_EMAIL};
use community_hub::community::{
    CommunityDirectory, CommunityManager, ComplaintDraft, ComplaintStatus, DemoDirectory,
    MatchRole, RandomCodeGenerator, StatusUpdate,
};

fn manager() -> CommunityManager {
    CommunityManager::new(DemoDirectory::default(), RandomCodeGenerator::default())
}

#[test]
fn technician_works_a_resident_complaint_to_resolution() {
    let mut manager = manager();
    assert!(manager.login(DEMO_RESIDENT_EMAIL, "pw"));
    let id = manager.add_complaint(ComplaintDraft::new("Vehicle", "X"));
    manager.logout();

    assert!(manager.login(DEMO_TECHNICIAN_EMAIL, "pw"));
    let role = manager.user().map(|user| user.role).expect("signed in");
    assert!(role.can_manage_complaints());
    assert_eq!(manager.pending_complaints().len(), 1);
    assert_eq!(
        manager.update_complaint_status(&id, ComplaintStatus::InProgress),
        StatusUpdate::Applied
    );
    assert!(manager.pending_complaints().is_empty());
    assert_eq!(
        manager.update_complaint_status(&id, ComplaintStatus::Resolved),
        StatusUpdate::Applied
    );
    assert!(manager.complaints_to_resolve().is_empty());
    manager.logout();

    assert!(manager.login(DEMO_RESIDENT_EMAIL, "pw"));
    let mine = manager.my_complaints();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, id);
    assert_eq!(mine[0].status, ComplaintStatus::Resolved);
}

#[test]
fn skill_connection_filters_the_directory() {
    let directory = CommunityDirectory::demo();

    let cooks = directory.mentor_learner_matches(MatchRole::Mentor, Some("Cooking & Food"));
    assert_eq!(cooks.len(), 1);
    assert_eq!(cooks[0].note, "Weekends");
    assert_eq!(directory.mentor_learner_matches(MatchRole::Learner, None).len(), 3);
    assert!(directory.peer_matches(Some("Beauty & Personal Care")).is_empty());
}
