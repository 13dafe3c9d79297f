use clap::{Args, ValueEnum};
use community_hub::community::matching::is_interest_domain;
use community_hub::community::{CommunityDirectory, MatchRole, MemberCard, INTEREST_DOMAINS};

#[derive(Args, Debug, Default)]
pub(crate) struct MatchArgs {
    /// Interest domain to filter by, e.g. "Cooking & Food" (defaults to all)
    #[arg(long)]
    pub(crate) domain: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct MentorArgs {
    /// Which side of the pairing to browse
    #[arg(long, value_enum, default_value_t = RoleArg::Mentor)]
    pub(crate) role: RoleArg,
    #[command(flatten)]
    pub(crate) filter: MatchArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RoleArg {
    Mentor,
    Learner,
}

impl From<RoleArg> for MatchRole {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Mentor => MatchRole::Mentor,
            RoleArg::Learner => MatchRole::Learner,
        }
    }
}

pub(crate) fn run_domains() {
    println!("Interest domains");
    for domain in INTEREST_DOMAINS {
        println!("- {domain}");
    }
}

/// `role` of `None` lists peers; otherwise the mentor or learner roster.
pub(crate) fn run_matches(role: Option<MatchRole>, args: MatchArgs) {
    let directory = CommunityDirectory::demo();
    let domain = args.domain.as_deref().map(str::trim);

    if let Some(domain) = domain {
        if !is_interest_domain(domain) {
            println!("'{domain}' is not a listed interest domain; run `domains` for the list.");
            return;
        }
    }

    let (title, cards) = match role {
        None => ("Peer matches", directory.peer_matches(domain)),
        Some(role) => {
            let title = match role {
                MatchRole::Mentor => "Mentors",
                MatchRole::Learner => "Learners",
            };
            (title, directory.mentor_learner_matches(role, domain))
        }
    };

    println!("{title} ({})", domain.unwrap_or("all domains"));
    if cards.is_empty() {
        println!("  No neighbours found.");
    }
    for card in cards {
        print_card(card);
    }
}

fn print_card(card: &MemberCard) {
    println!(
        "  - {} | Block {} | {} | {}",
        card.name, card.block, card.domain, card.note
    );
}
