use crate::demo::{run_demo, run_login, run_register_org, run_validate_code, DemoArgs, OrgArgs};
use crate::directory::{run_domains, run_matches, MatchArgs, MentorArgs};
use clap::{Parser, Subcommand};
use community_hub::config::AppConfig;
use community_hub::error::AppError;
use community_hub::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "Community Hub",
    about = "Walk through resident onboarding, approvals, and complaints from the command line",
    version
)]
struct Cli {
    /// Override the configured community name
    #[arg(long, global = true)]
    community: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the registration, approval, profile, and complaint walkthrough (default command)
    Demo(DemoArgs),
    /// Sign in with one of the demo accounts and print the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Validate a community (organization) registration
    RegisterOrg(OrgArgs),
    /// Check a resident code against the demo ledger
    ValidateCode {
        #[arg(long)]
        code: String,
    },
    /// List the interest domains used for skill matching
    Domains,
    /// Find neighbours who share an interest domain
    Peers(MatchArgs),
    /// Browse mentors or learners, optionally by interest domain
    Mentors(MentorArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(name) = cli.community {
        config.community.name = name;
    }

    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, community = %config.community.name, "configuration loaded");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(&config.community, args),
        Command::Login { email, password } => run_login(&config.community, &email, &password),
        Command::RegisterOrg(args) => {
            run_register_org(args);
            Ok(())
        }
        Command::ValidateCode { code } => {
            run_validate_code(&config.community, &code);
            Ok(())
        }
        Command::Domains => {
            run_domains();
            Ok(())
        }
        Command::Peers(args) => {
            run_matches(None, args);
            Ok(())
        }
        Command::Mentors(args) => {
            run_matches(Some(args.role.into()), args.filter);
            Ok(())
        }
    }
}
