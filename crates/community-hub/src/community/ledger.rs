use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::ResidentCode;

/// Reasons a resident code cannot admit another registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeValidationError {
    #[error("Code is required when provided")]
    Missing,
    #[error("Invalid or expired Resident Code")]
    Unknown,
    #[error("Resident Code limit: maximum family members reached ({capacity})")]
    Exhausted { capacity: u32 },
}

/// Capacity granted to a household code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAllowance {
    pub family_members_count: u32,
}

/// Read-only view of one ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentCodeEntry {
    pub code: ResidentCode,
    pub family_members_count: u32,
    pub usage: u32,
}

/// Issued resident codes and how many registrations each has admitted.
///
/// Usage never exceeds the code's `family_members_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidentCodeLedger {
    allowances: BTreeMap<ResidentCode, CodeAllowance>,
    usage: BTreeMap<ResidentCode, u32>,
}

impl ResidentCodeLedger {
    /// Check a raw, user-entered code without consuming it.
    pub fn validate(&self, raw: &str) -> Result<ResidentCode, CodeValidationError> {
        let code = ResidentCode::normalize(raw).ok_or(CodeValidationError::Missing)?;
        let allowance = self
            .allowances
            .get(&code)
            .ok_or(CodeValidationError::Unknown)?;
        if self.usage(&code) >= allowance.family_members_count {
            return Err(CodeValidationError::Exhausted {
                capacity: allowance.family_members_count,
            });
        }
        Ok(code)
    }

    /// Validate and count one more registration against the code.
    pub fn consume(&mut self, raw: &str) -> Result<ResidentCode, CodeValidationError> {
        let code = self.validate(raw)?;
        *self.usage.entry(code.clone()).or_insert(0) += 1;
        Ok(code)
    }

    /// Record a code for a newly approved household; the approved registrant is the first occupant.
    /// Returns `false` and leaves the ledger untouched when the code is already taken.
    pub fn issue(&mut self, code: ResidentCode, family_members_count: u32) -> bool {
        if self.contains(&code) {
            return false;
        }
        let family_members_count = family_members_count.max(1);
        self.allowances.insert(
            code.clone(),
            CodeAllowance {
                family_members_count,
            },
        );
        self.usage.insert(code, 1);
        true
    }

    /// Register a pre-existing code with an explicit usage count.
    pub fn seed(&mut self, code: ResidentCode, family_members_count: u32, usage: u32) {
        let family_members_count = family_members_count.max(1);
        self.allowances.insert(
            code.clone(),
            CodeAllowance {
                family_members_count,
            },
        );
        self.usage.insert(code, usage.min(family_members_count));
    }

    pub fn contains(&self, code: &ResidentCode) -> bool {
        self.allowances.contains_key(code)
    }

    pub fn allowance(&self, code: &ResidentCode) -> Option<CodeAllowance> {
        self.allowances.get(code).copied()
    }

    pub fn usage(&self, code: &ResidentCode) -> u32 {
        self.usage.get(code).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.allowances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowances.is_empty()
    }

    pub fn entries(&self) -> Vec<ResidentCodeEntry> {
        self.allowances
            .iter()
            .map(|(code, allowance)| ResidentCodeEntry {
                code: code.clone(),
                family_members_count: allowance.family_members_count,
                usage: self.usage(code),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> ResidentCode {
        ResidentCode::normalize(raw).expect("non-blank code")
    }

    #[test]
    fn validate_reports_missing_unknown_and_exhausted() {
        let mut ledger = ResidentCodeLedger::default();
        ledger.seed(code("RC-FULL01"), 2, 2);

        assert_eq!(ledger.validate("  "), Err(CodeValidationError::Missing));
        assert_eq!(ledger.validate("RC-NOPE"), Err(CodeValidationError::Unknown));
        match ledger.validate("rc-full01") {
            Err(CodeValidationError::Exhausted { capacity }) => assert_eq!(capacity, 2),
            other => panic!("expected exhausted code, got {other:?}"),
        }
    }

    #[test]
    fn exhausted_message_mentions_family_limit() {
        let message = CodeValidationError::Exhausted { capacity: 3 }.to_string();
        assert!(message.contains("maximum family members reached"));
    }

    #[test]
    fn validate_does_not_mutate_usage() {
        let mut ledger = ResidentCodeLedger::default();
        ledger.issue(code("RC-ABC123"), 3);

        for _ in 0..5 {
            ledger.validate("rc-abc123").expect("code has room");
        }
        assert_eq!(ledger.usage(&code("RC-ABC123")), 1);
    }

    #[test]
    fn consume_stops_at_capacity() {
        let mut ledger = ResidentCodeLedger::default();
        ledger.issue(code("RC-ABC123"), 2);

        assert_eq!(ledger.consume(" rc-abc123 "), Ok(code("RC-ABC123")));
        assert_eq!(ledger.usage(&code("RC-ABC123")), 2);
        assert!(matches!(
            ledger.consume("RC-ABC123"),
            Err(CodeValidationError::Exhausted { capacity: 2 })
        ));
        assert_eq!(ledger.usage(&code("RC-ABC123")), 2);
    }

    #[test]
    fn issue_never_overwrites_an_existing_household() {
        let mut ledger = ResidentCodeLedger::default();
        ledger.seed(code("RC-FULL01"), 4, 4);

        assert!(!ledger.issue(code("RC-FULL01"), 3));
        let allowance = ledger.allowance(&code("RC-FULL01")).expect("seeded code");
        assert_eq!(allowance.family_members_count, 4);
        assert_eq!(ledger.usage(&code("RC-FULL01")), 4);
    }

    #[test]
    fn issue_clamps_capacity_to_one() {
        let mut ledger = ResidentCodeLedger::default();
        ledger.issue(code("RC-SOLO"), 0);

        assert_eq!(
            ledger.entries(),
            vec![ResidentCodeEntry {
                code: code("RC-SOLO"),
                family_members_count: 1,
                usage: 1,
            }]
        );
        assert!(ledger.validate("RC-SOLO").is_err());
    }
}
