use clap::Args;
use community_hub::community::credentials::{
    DEMO_ADMIN_EMAIL, DEMO_RESIDENT_EMAIL, DEMO_TECHNICIAN_EMAIL,
};
use community_hub::community::{
    BasicInfo, CommunityManager, ComplaintDraft, ComplaintStatus, DomainSkills,
    OrganizationForm, Profile, RegistrationForm, RegistrationOutcome, VehicleInput,
};
use community_hub::config::CommunityConfig;
use community_hub::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Household size declared by the first registrant (capacity of the issued code)
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub(crate) family_members: u32,
    /// Print the final manager snapshot as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Skip the complaint portion of the walkthrough
    #[arg(long)]
    pub(crate) skip_complaints: bool,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            family_members: 2,
            json: false,
            skip_complaints: false,
        }
    }
}

pub(crate) fn run_demo(config: &CommunityConfig, args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        family_members,
        json,
        skip_complaints,
    } = args;

    let mut manager = CommunityManager::demo(config);
    println!("{} community walkthrough", config.name);

    println!("\nRegistration without a resident code");
    let head = demo_form("Meera Iyer", "meera@example.com", family_members, "");
    match manager.register_resident(head) {
        Ok(outcome) => println!("- meera@example.com -> {}", describe(outcome)),
        Err(err) => {
            println!("  Registration refused: {err}");
            return Ok(());
        }
    }
    println!(
        "- Approval check before review: {}",
        approval_label(manager.check_approval_status("meera@example.com"))
    );

    println!("\nAdmin review");
    manager.login(DEMO_ADMIN_EMAIL, "");
    for registration in manager.pending_registrations() {
        println!(
            "- {} {} | Block {} / Floor {} / Flat {} | family {} | vehicles {}",
            registration.id.0,
            registration.full_name,
            registration.block,
            registration.floor,
            registration.flat_number,
            registration.family_members,
            registration.vehicles.join(", ")
        );
    }
    let Some(registration_id) = manager
        .pending_registrations()
        .first()
        .map(|registration| registration.id.clone())
    else {
        println!("  Nothing to review");
        return Ok(());
    };
    let Some(approved) = manager.approve_resident(&registration_id) else {
        println!("  Registration {} was no longer pending", registration_id.0);
        return Ok(());
    };
    let code = approved.resident_code.clone();
    println!(
        "- Approved {} -> resident code {} (capacity {})",
        approved.registration.email, code, approved.family_members_count
    );
    println!(
        "- Approval check after review: {}",
        approval_label(manager.check_approval_status("meera@example.com"))
    );

    match manager.complete_profile_setup(demo_profile("meera_i")) {
        Ok(()) => println!("- Profile saved; signed in as meera@example.com"),
        Err(err) => println!("  Profile setup failed: {err}"),
    }
    manager.logout();

    println!("\nFamily members joining with {code}");
    for member in 2..=family_members + 1 {
        let email = format!("member{member}@example.com");
        let form = demo_form(&format!("Family Member {member}"), &email, 1, code.as_str());
        match manager.register_resident(form) {
            Ok(outcome) => {
                println!(
                    "- {email} -> {} (usage {}/{})",
                    describe(outcome),
                    manager.resident_codes().usage(&code),
                    approved.family_members_count
                );
                if let Err(err) = manager.complete_profile_setup(demo_profile(&email)) {
                    println!("  Profile setup failed: {err}");
                }
                manager.logout();
            }
            Err(err) => println!("- {email} refused: {err}"),
        }
    }

    if !skip_complaints {
        run_complaint_walkthrough(&mut manager);
    }

    if json {
        let snapshot = serde_json::to_string_pretty(&manager.snapshot())?;
        println!("\nSnapshot\n{snapshot}");
    }

    Ok(())
}

fn run_complaint_walkthrough(manager: &mut CommunityManager) {
    println!("\nComplaints");
    manager.login(DEMO_RESIDENT_EMAIL, "");
    let draft = ComplaintDraft::vehicle(
        "KA01 AB 1234",
        "Blocked in bay 12",
        vec!["bay-12.jpg".to_string()],
    );
    let complaint_id = manager.add_complaint(draft);
    println!("- Resident filed {}", complaint_id.0);
    manager.logout();

    manager.login(DEMO_TECHNICIAN_EMAIL, "");
    println!("- Pending queue: {}", manager.pending_complaints().len());
    for status in [ComplaintStatus::InProgress, ComplaintStatus::Resolved] {
        let update = manager.update_complaint_status(&complaint_id, status);
        println!("- Technician marks {status}: {update:?}");
    }
    println!("- Still to resolve: {}", manager.complaints_to_resolve().len());
    manager.logout();

    manager.login(DEMO_RESIDENT_EMAIL, "");
    for complaint in manager.my_complaints() {
        println!(
            "- My complaint {} [{}] {} -> {}",
            complaint.id.0, complaint.kind, complaint.description, complaint.status
        );
    }
    manager.logout();
}

pub(crate) fn run_login(
    config: &CommunityConfig,
    email: &str,
    password: &str,
) -> Result<(), AppError> {
    let mut manager = CommunityManager::demo(config);
    if !manager.login(email, password) {
        println!("No account found for {email}");
        return Ok(());
    }

    let session = serde_json::to_string_pretty(manager.session())?;
    println!("{session}");
    if let Some(profile) = manager.profile() {
        println!("{}", serde_json::to_string_pretty(profile)?);
    }
    Ok(())
}

#[derive(Args, Debug)]
pub(crate) struct OrgArgs {
    #[arg(long)]
    pub(crate) community_name: String,
    #[arg(long)]
    pub(crate) admin_name: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) password: String,
}

/// Organization sign-up is validated only; nothing is stored.
pub(crate) fn run_register_org(args: OrgArgs) {
    let form = OrganizationForm {
        community_name: args.community_name,
        admin_name: args.admin_name,
        email: args.email,
        password: args.password,
    };
    match form.validate() {
        Ok(()) => println!(
            "{} is ready to onboard; sign in as an admin to continue.",
            form.community_name.trim()
        ),
        Err(errors) => println!("Organization registration incomplete: {errors}"),
    }
}

pub(crate) fn run_validate_code(config: &CommunityConfig, code: &str) {
    let manager = CommunityManager::demo(config);
    match manager.validate_resident_code(code) {
        Ok(code) => println!(
            "{code} is valid ({} of {} places used)",
            manager.resident_codes().usage(&code),
            manager
                .resident_codes()
                .allowance(&code)
                .map_or(0, |allowance| allowance.family_members_count)
        ),
        Err(err) => println!("{err}"),
    }
}

fn describe(outcome: RegistrationOutcome) -> &'static str {
    match outcome {
        RegistrationOutcome::NeedsProfileSetup => "continue to profile setup",
        RegistrationOutcome::AwaitingApproval => "waiting for admin approval",
    }
}

fn approval_label(approved: bool) -> &'static str {
    if approved {
        "approved"
    } else {
        "not yet approved"
    }
}

fn demo_form(name: &str, email: &str, family_members: u32, code: &str) -> RegistrationForm {
    RegistrationForm {
        org_code: "SUNRISE".to_string(),
        full_name: name.to_string(),
        email: email.to_string(),
        password: "demo-pass".to_string(),
        phone: String::new(),
        block: "B".to_string(),
        floor: "4".to_string(),
        flat_number: "402".to_string(),
        resident_code: code.to_string(),
        family_members: family_members.to_string(),
        vehicles: VehicleInput::Text("KA02 CD 5678".to_string()),
    }
}

fn demo_profile(username: &str) -> Profile {
    Profile {
        basic_info: BasicInfo {
            username: username.to_string(),
            occupation: "Architect".to_string(),
            about: String::new(),
        },
        domains_with_skills: vec![DomainSkills::new(
            "Home, Gardening & Sustainability",
            "Composting L-3",
        )],
        ..Profile::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_form_passes_validation() {
        assert!(demo_form("A", "a@example.com", 2, "").validate().is_ok());
        assert!(demo_profile("a").validate().is_ok());
    }

    #[test]
    fn demo_runs_to_completion() {
        let args = DemoArgs {
            family_members: 3,
            json: true,
            skip_complaints: false,
        };
        run_demo(&CommunityConfig::default(), args).expect("demo completes");
    }
}
