use rand::Rng;

use super::domain::ResidentCode;
use crate::config::CommunityConfig;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of fresh resident codes issued on approval.
pub trait ResidentCodeGenerator {
    fn generate(&mut self) -> ResidentCode;
}

/// Prefix plus a random upper-case alphanumeric suffix, e.g. `RC-7QX2LM`.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    prefix: String,
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(prefix: impl Into<String>, length: usize) -> Self {
        Self {
            prefix: prefix.into(),
            length: length.max(1),
        }
    }

    pub fn from_config(config: &CommunityConfig) -> Self {
        Self::new(
            config.resident_code_prefix.clone(),
            config.resident_code_length,
        )
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::from_config(&CommunityConfig::default())
    }
}

impl ResidentCodeGenerator for RandomCodeGenerator {
    fn generate(&mut self) -> ResidentCode {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..self.length)
            .map(|_| char::from(CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())]))
            .collect();
        ResidentCode::issued(&self.prefix, &suffix)
    }
}

/// Deterministic `PREFIX0001`, `PREFIX0002`, ... codes for demos and tests.
#[derive(Debug, Clone)]
pub struct SequentialCodeGenerator {
    prefix: String,
    next: u32,
}

impl SequentialCodeGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl ResidentCodeGenerator for SequentialCodeGenerator {
    fn generate(&mut self) -> ResidentCode {
        let code = ResidentCode::issued(&self.prefix, &format!("{:04}", self.next));
        self.next += 1;
        code
    }
}
