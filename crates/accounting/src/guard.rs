//! Submission-side enforcement of the balance rule.
//!
//! The validator computes facts; the guard turns them into an accept/reject
//! decision the way the posting endpoint does. The same policy object can
//! back both the form check and the server-side re-validation (the server
//! stays authoritative either way).

use tracing::{debug, warn};

use ledgerkit_core::{Amount, DomainError, DomainResult, EntryId};

use crate::journal::{
    parse_amount_field, JournalEntry, JournalEntryDraft, JournalLine, JournalLineDraft,
};
use crate::validate::{JournalBalanceValidator, LineIssueKind, ValidationPolicy, ValidationResult};

/// Accept/reject gate in front of the (external) ledger-posting endpoint.
#[derive(Debug, Clone, Default)]
pub struct PostingGuard {
    validator: JournalBalanceValidator,
}

impl PostingGuard {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            validator: JournalBalanceValidator::new(policy),
        }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        self.validator.policy()
    }

    /// Run validation and apply policy.
    ///
    /// `Ok` carries the full result so callers can still display totals.
    pub fn check(&self, lines: &[JournalLineDraft]) -> DomainResult<ValidationResult> {
        let policy = self.validator.policy();
        let result = self.validator.validate(lines);

        if policy.min_lines > 0 && lines.len() < policy.min_lines {
            warn!(
                lines = lines.len(),
                min_lines = policy.min_lines,
                "journal entry rejected: too few lines"
            );
            return Err(DomainError::validation(format!(
                "journal entry must have at least {} lines",
                policy.min_lines
            )));
        }

        if policy.strict_parsing {
            for issue in &result.line_issues {
                let error = match &issue.kind {
                    LineIssueKind::MissingAccount => Some(DomainError::validation(format!(
                        "line {}: account is required",
                        issue.line_no
                    ))),
                    LineIssueKind::UnparsableDebit(raw) => Some(DomainError::invalid_amount(
                        format!("line {}: debit {raw:?}", issue.line_no),
                    )),
                    LineIssueKind::UnparsableCredit(raw) => Some(DomainError::invalid_amount(
                        format!("line {}: credit {raw:?}", issue.line_no),
                    )),
                    LineIssueKind::DebitAndCredit => None,
                };
                if let Some(error) = error {
                    warn!(line_no = issue.line_no, %error, "journal entry rejected: malformed line");
                    return Err(error);
                }
            }
        }

        if let Some(issue) = result
            .line_issues
            .iter()
            .find(|i| matches!(i.kind, LineIssueKind::DebitAndCredit))
        {
            warn!(
                line_no = issue.line_no,
                "journal entry rejected: debit and credit on the same line"
            );
            return Err(DomainError::validation(format!(
                "line {}: debit and credit on the same line",
                issue.line_no
            )));
        }

        if !result.is_balanced {
            warn!(
                total_debit = %result.total_debit,
                total_credit = %result.total_credit,
                difference = %result.difference,
                "journal entry rejected: does not balance"
            );
            return Err(DomainError::invariant(format!(
                "journal does not balance: D:{} C:{}",
                result.total_debit, result.total_credit
            )));
        }

        debug!(
            total_debit = %result.total_debit,
            lines = lines.len(),
            "journal entry balanced"
        );
        Ok(result)
    }

    /// Validate a full draft and, when admissible, parse it into a typed
    /// entry ready to hand to the posting endpoint.
    ///
    /// Under the default (lenient) policy malformed amounts were already
    /// coerced to zero by the check, and the typed entry carries the same
    /// coercion.
    pub fn admit(&self, draft: &JournalEntryDraft) -> DomainResult<JournalEntry> {
        self.check(&draft.lines)?;

        let strict = self.validator.policy().strict_parsing;
        let mut lines = Vec::with_capacity(draft.lines.len());
        for line in &draft.lines {
            let line = if strict {
                line.parse()?
            } else {
                JournalLine {
                    account_id: line.account_id.trim().to_string(),
                    debit: parse_amount_field(&line.debit).unwrap_or(Amount::ZERO),
                    credit: parse_amount_field(&line.credit).unwrap_or(Amount::ZERO),
                    memo: line.memo.clone(),
                }
            };
            lines.push(line);
        }

        Ok(JournalEntry {
            id: EntryId::new(),
            number: draft.number.clone(),
            date: draft.date,
            description: draft.description.clone(),
            lines,
        })
    }
}
