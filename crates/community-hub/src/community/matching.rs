use std::str::FromStr;

use serde::Serialize;

/// Interest domains offered on the skill profile and skill-connection filters.
pub const INTEREST_DOMAINS: [&str; 14] = [
    "Technology & Digital",
    "Creative & Arts",
    "Music & Performing Arts",
    "Education & Academics",
    "Languages & Communication",
    "Fitness, Sports & Wellness",
    "Sports & Games",
    "Cooking & Food",
    "Lifestyle & Personal Development",
    "Finance & Business",
    "Home, Gardening & Sustainability",
    "Filming & Videography",
    "Content Creation & Media",
    "Beauty & Personal Care",
];

pub fn is_interest_domain(candidate: &str) -> bool {
    INTEREST_DOMAINS.contains(&candidate)
}

/// Side of a mentor/learner pairing the caller is browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchRole {
    Mentor,
    Learner,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown match role '{0}', expected mentor or learner")]
pub struct UnknownMatchRole(String);

impl FromStr for MatchRole {
    type Err = UnknownMatchRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mentor" => Ok(MatchRole::Mentor),
            "learner" => Ok(MatchRole::Learner),
            _ => Err(UnknownMatchRole(value.to_string())),
        }
    }
}

/// Neighbour card shown in skill-connection results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberCard {
    pub id: u32,
    pub name: String,
    pub domain: String,
    pub block: String,
    /// Interest, session availability, or learning goal depending on the list.
    pub note: String,
}

impl MemberCard {
    fn new(id: u32, name: &str, domain: &str, block: &str, note: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            domain: domain.to_string(),
            block: block.to_string(),
            note: note.to_string(),
        }
    }
}

/// Static roster of neighbours open to peer, mentor, or learner matches.
#[derive(Debug, Clone, Default)]
pub struct CommunityDirectory {
    peers: Vec<MemberCard>,
    mentors: Vec<MemberCard>,
    learners: Vec<MemberCard>,
}

impl CommunityDirectory {
    pub fn new(
        peers: Vec<MemberCard>,
        mentors: Vec<MemberCard>,
        learners: Vec<MemberCard>,
    ) -> Self {
        Self {
            peers,
            mentors,
            learners,
        }
    }

    pub fn demo() -> Self {
        Self::new(
            vec![
                MemberCard::new(
                    1,
                    "Priya S.",
                    "Home, Gardening & Sustainability",
                    "A",
                    "Organic veggies",
                ),
                MemberCard::new(2, "Raj K.", "Cooking & Food", "B", "Indian cuisine"),
                MemberCard::new(
                    3,
                    "Meera L.",
                    "Fitness, Sports & Wellness",
                    "A",
                    "Morning sessions",
                ),
                MemberCard::new(4, "Vikram P.", "Filming & Videography", "C", "Nature & events"),
                MemberCard::new(5, "Sana A.", "Technology & Digital", "B", "Web & apps"),
                MemberCard::new(6, "Rahul M.", "Music & Performing Arts", "A", "Guitar & vocals"),
            ],
            vec![
                MemberCard::new(1, "Anita M.", "Cooking & Food", "B", "Weekends"),
                MemberCard::new(2, "Suresh T.", "Technology & Digital", "A", "Evenings"),
                MemberCard::new(3, "Lina K.", "Languages & Communication", "C", "Mornings"),
            ],
            vec![
                MemberCard::new(1, "Neha R.", "Cooking & Food", "C", "Basics"),
                MemberCard::new(2, "Arjun V.", "Technology & Digital", "B", "Web dev"),
                MemberCard::new(3, "Omar P.", "Creative & Arts", "A", "Design"),
            ],
        )
    }

    /// Peers sharing `domain`; `None` lists everyone.
    pub fn peer_matches(&self, domain: Option<&str>) -> Vec<&MemberCard> {
        filter_domain(&self.peers, domain)
    }

    pub fn mentor_learner_matches(
        &self,
        role: MatchRole,
        domain: Option<&str>,
    ) -> Vec<&MemberCard> {
        let roster = match role {
            MatchRole::Mentor => &self.mentors,
            MatchRole::Learner => &self.learners,
        };
        filter_domain(roster, domain)
    }
}

fn filter_domain<'a>(cards: &'a [MemberCard], domain: Option<&str>) -> Vec<&'a MemberCard> {
    cards
        .iter()
        .filter(|card| domain.map_or(true, |wanted| card.domain == wanted))
        .collect()
}
