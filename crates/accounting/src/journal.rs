//! Journal entry data model.
//!
//! Two layers: *drafts* carry amounts as the raw strings a form submits,
//! *typed* lines and entries carry parsed [`Amount`]s. Keeping the raw layer
//! separate lets validation report per-line parse failures instead of
//! failing (or silently coercing) at deserialization time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ledgerkit_core::{Amount, DomainError, DomainResult, Entity, EntryId};

fn zero_field() -> String {
    "0".to_string()
}

/// One journal line exactly as entered (amounts still raw strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLineDraft {
    pub account_id: String,
    #[serde(default = "zero_field")]
    pub debit: String,
    #[serde(default = "zero_field")]
    pub credit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl JournalLineDraft {
    pub fn new(
        account_id: impl Into<String>,
        debit: impl Into<String>,
        credit: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            debit: debit.into(),
            credit: credit.into(),
            memo: None,
        }
    }

    /// Parse into a typed line, failing on the first malformed field.
    pub fn parse(&self) -> DomainResult<JournalLine> {
        let account_id = self.account_id.trim();
        if account_id.is_empty() {
            return Err(DomainError::validation("line has no account"));
        }
        Ok(JournalLine {
            account_id: account_id.to_string(),
            debit: parse_amount_field(&self.debit)?,
            credit: parse_amount_field(&self.credit)?,
            memo: self.memo.clone(),
        })
    }
}

/// A blank amount field means zero (an empty credit cell is not an error);
/// anything else must parse as a non-negative amount.
pub(crate) fn parse_amount_field(raw: &str) -> DomainResult<Amount> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(Amount::ZERO)
    } else {
        trimmed.parse()
    }
}

/// One side of a journal entry, typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    pub account_id: String,
    pub debit: Amount,
    pub credit: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// A proposed journal entry as submitted for validation (the creation
/// payload shape of the posting endpoint).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub lines: Vec<JournalLineDraft>,
}

/// An admitted journal entry, ready to hand to the external posting API.
///
/// Lifecycle is transient: constructed, validated, then submitted or
/// discarded. Nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    pub fn total_debit(&self) -> Amount {
        self.lines.iter().map(|l| l.debit).sum()
    }

    pub fn total_credit(&self) -> Amount {
        self.lines.iter().map(|l| l.credit).sum()
    }
}

impl Entity for JournalEntry {
    type Id = EntryId;

    fn id(&self) -> &EntryId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_amount_fields_default_to_zero_strings() {
        let draft: JournalLineDraft =
            serde_json::from_value(serde_json::json!({"account_id": "1000"})).unwrap();
        assert_eq!(draft.debit, "0");
        assert_eq!(draft.credit, "0");
        assert_eq!(draft.memo, None);
    }

    #[test]
    fn draft_parses_into_typed_line() {
        let draft = JournalLineDraft::new(" 1000 ", "2500.0000", "");
        let line = draft.parse().unwrap();
        assert_eq!(line.account_id, "1000");
        assert_eq!(line.debit, Amount::from_major(2_500));
        assert_eq!(line.credit, Amount::ZERO);
    }

    #[test]
    fn parse_rejects_blank_account_and_bad_amounts() {
        let no_account = JournalLineDraft::new("  ", "1", "0");
        assert!(matches!(
            no_account.parse().unwrap_err(),
            DomainError::Validation(_)
        ));

        let bad_amount = JournalLineDraft::new("1000", "abc", "0");
        assert!(matches!(
            bad_amount.parse().unwrap_err(),
            DomainError::InvalidAmount(_)
        ));
    }

    #[test]
    fn entry_totals_sum_all_lines() {
        let entry = JournalEntry {
            id: EntryId::new(),
            number: None,
            date: Utc::now(),
            description: None,
            lines: vec![
                JournalLine {
                    account_id: "1000".into(),
                    debit: Amount::from_major(70),
                    credit: Amount::ZERO,
                    memo: None,
                },
                JournalLine {
                    account_id: "1100".into(),
                    debit: Amount::from_major(30),
                    credit: Amount::ZERO,
                    memo: None,
                },
                JournalLine {
                    account_id: "3000".into(),
                    debit: Amount::ZERO,
                    credit: Amount::from_major(100),
                    memo: None,
                },
            ],
        };
        assert_eq!(entry.total_debit(), Amount::from_major(100));
        assert_eq!(entry.total_credit(), Amount::from_major(100));
    }

    #[test]
    fn entry_draft_defaults_date_when_payload_omits_it() {
        let draft: JournalEntryDraft = serde_json::from_value(serde_json::json!({
            "lines": [{"account_id": "1000", "debit": "5"}]
        }))
        .unwrap();
        assert!(draft.number.is_none());
        assert_eq!(draft.lines.len(), 1);
    }
}
