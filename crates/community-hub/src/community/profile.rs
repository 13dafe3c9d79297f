use serde::{Deserialize, Serialize};

use super::domain::{split_list, FormErrors};

/// Skill profile collected once after registration, before dashboard access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub basic_info: BasicInfo,
    pub domains_with_skills: Vec<DomainSkills>,
    pub open_to_mentor: bool,
    /// Keys produced by [`Profile::mentor_skill_options`].
    pub mentor_skills: Vec<String>,
    pub open_to_learn: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learner_profile: Option<LearnerProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicInfo {
    pub username: String,
    pub occupation: String,
    pub about: String,
}

/// Interest domain plus free-text skills, e.g. `"React L-4, Python L-5"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainSkills {
    pub domain: String,
    pub skills_text: String,
}

impl DomainSkills {
    pub fn new(domain: impl Into<String>, skills_text: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            skills_text: skills_text.into(),
        }
    }

    pub fn skills(&self) -> Vec<String> {
        parse_skills_text(&self.skills_text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearnerProfile {
    pub domains: Vec<String>,
    pub skills_text: String,
    pub proficiency_expectation: String,
}

/// A skill a resident can offer to mentor, derived from their domain skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentorSkillOption {
    pub key: String,
    pub domain: String,
    pub skill: String,
}

pub fn parse_skills_text(text: &str) -> Vec<String> {
    split_list(text)
}

impl Profile {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if self.basic_info.username.trim().is_empty() {
            errors.insert("username", "Username is required.");
        }
        if self.domains_with_skills.is_empty() {
            errors.insert("domains", "Select at least one interest domain.");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn mentor_skill_options(&self) -> Vec<MentorSkillOption> {
        self.domains_with_skills
            .iter()
            .flat_map(|entry| {
                entry.skills().into_iter().map(|skill| MentorSkillOption {
                    key: format!("{}::{}", entry.domain, skill),
                    domain: entry.domain.clone(),
                    skill,
                })
            })
            .collect()
    }
}
