//! Double-entry balance validation.
//!
//! [`JournalBalanceValidator::validate`] computes facts only: per-side
//! totals, their absolute difference, and per-line diagnostics. It never
//! fails. Whether an unbalanced or malformed entry blocks anything is the
//! caller's policy (see [`crate::guard::PostingGuard`]).

use serde::{Deserialize, Serialize};

use ledgerkit_core::Amount;

use crate::journal::{parse_amount_field, JournalLineDraft};

/// Default balance tolerance: 0.0001.
///
/// Absorbs entry rounding, not a business allowance. Totals are compared
/// with a strict bound, so at four decimal places the default means
/// "difference is exactly zero".
pub const DEFAULT_TOLERANCE: Amount = Amount::from_scaled(1);

/// Configurable validation rules.
///
/// Defaults preserve the permissive legacy behavior: no minimum line count,
/// mixed debit+credit lines allowed, malformed amounts coerced to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// An entry is balanced when `|debits - credits| < tolerance`.
    pub tolerance: Amount,
    /// Minimum number of lines an entry must carry (0 disables the rule).
    pub min_lines: usize,
    /// Reject lines carrying both a debit and a credit.
    pub exclusive_debit_credit: bool,
    /// Reject entries with malformed amounts or missing accounts instead of
    /// coercing/ignoring them.
    pub strict_parsing: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            min_lines: 0,
            exclusive_debit_credit: false,
            strict_parsing: false,
        }
    }
}

/// Why a single line was flagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum LineIssueKind {
    /// `account_id` was empty.
    MissingAccount,
    /// The debit field did not parse as a non-negative amount (raw value
    /// attached; it contributed zero to the totals).
    UnparsableDebit(String),
    /// Same, for the credit field.
    UnparsableCredit(String),
    /// Both sides carry a positive amount. Only collected when
    /// [`ValidationPolicy::exclusive_debit_credit`] is enabled.
    DebitAndCredit,
}

/// A flagged line, 1-based position within the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineIssue {
    pub line_no: u32,
    pub kind: LineIssueKind,
}

/// Outcome of balance validation. Facts, not policy: nothing here blocks
/// submission by itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub total_debit: Amount,
    pub total_credit: Amount,
    /// `|total_debit - total_credit|`, exact.
    pub difference: Amount,
    pub is_balanced: bool,
    /// Per-line diagnostics, in line order.
    pub line_issues: Vec<LineIssue>,
}

impl ValidationResult {
    /// Balanced and free of line diagnostics.
    pub fn is_clean(&self) -> bool {
        self.is_balanced && self.line_issues.is_empty()
    }
}

/// Stateless balance validator.
///
/// Cheap to construct and safe to call concurrently or on every keystroke;
/// it owns no state between calls.
#[derive(Debug, Clone, Default)]
pub struct JournalBalanceValidator {
    policy: ValidationPolicy,
}

impl JournalBalanceValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Compute totals, difference and balance status for a set of proposed
    /// lines.
    ///
    /// Malformed amounts contribute zero to the totals and are reported in
    /// `line_issues`. An empty line set is trivially balanced (0 == 0);
    /// callers wanting a minimum line count enforce it through
    /// [`ValidationPolicy::min_lines`] and the guard.
    pub fn validate(&self, lines: &[JournalLineDraft]) -> ValidationResult {
        let mut total_debit = Amount::ZERO;
        let mut total_credit = Amount::ZERO;
        let mut line_issues = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let line_no = idx as u32 + 1;

            if line.account_id.trim().is_empty() {
                line_issues.push(LineIssue {
                    line_no,
                    kind: LineIssueKind::MissingAccount,
                });
            }

            let debit = match parse_amount_field(&line.debit) {
                Ok(amount) => amount,
                Err(_) => {
                    line_issues.push(LineIssue {
                        line_no,
                        kind: LineIssueKind::UnparsableDebit(line.debit.clone()),
                    });
                    Amount::ZERO
                }
            };
            let credit = match parse_amount_field(&line.credit) {
                Ok(amount) => amount,
                Err(_) => {
                    line_issues.push(LineIssue {
                        line_no,
                        kind: LineIssueKind::UnparsableCredit(line.credit.clone()),
                    });
                    Amount::ZERO
                }
            };

            if self.policy.exclusive_debit_credit && debit.is_positive() && credit.is_positive() {
                line_issues.push(LineIssue {
                    line_no,
                    kind: LineIssueKind::DebitAndCredit,
                });
            }

            total_debit += debit;
            total_credit += credit;
        }

        let difference = (total_debit - total_credit).abs();
        ValidationResult {
            total_debit,
            total_credit,
            difference,
            is_balanced: difference < self.policy.tolerance,
            line_issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line(account: &str, debit: &str, credit: &str) -> JournalLineDraft {
        JournalLineDraft::new(account, debit, credit)
    }

    #[test]
    fn balanced_entry_reports_zero_difference() {
        let lines = vec![line("1000", "100000", "0"), line("2000", "0", "100000")];
        let result = JournalBalanceValidator::default().validate(&lines);
        assert_eq!(result.total_debit, Amount::from_major(100_000));
        assert_eq!(result.total_credit, Amount::from_major(100_000));
        assert_eq!(result.difference, Amount::ZERO);
        assert!(result.is_balanced);
        assert!(result.is_clean());
    }

    #[test]
    fn unbalanced_entry_reports_exact_difference() {
        let lines = vec![line("1000", "50000", "0"), line("2000", "0", "49999")];
        let result = JournalBalanceValidator::default().validate(&lines);
        assert_eq!(result.difference, Amount::from_major(1));
        assert!(!result.is_balanced);
    }

    #[test]
    fn one_ten_thousandth_off_is_unbalanced() {
        // The bound is strict: a difference of exactly 0.0001 does not pass.
        let lines = vec![line("1000", "1.0001", "0"), line("2000", "0", "1")];
        let result = JournalBalanceValidator::default().validate(&lines);
        assert_eq!(result.difference, Amount::from_scaled(1));
        assert!(!result.is_balanced);
    }

    #[test]
    fn empty_line_set_is_trivially_balanced() {
        let result = JournalBalanceValidator::default().validate(&[]);
        assert_eq!(result.total_debit, Amount::ZERO);
        assert_eq!(result.total_credit, Amount::ZERO);
        assert!(result.is_balanced);
    }

    #[test]
    fn malformed_amount_coerces_to_zero_and_is_flagged() {
        let lines = vec![line("1000", "abc", "0")];
        let result = JournalBalanceValidator::default().validate(&lines);
        assert_eq!(result.total_debit, Amount::ZERO);
        assert!(result.is_balanced);
        assert_eq!(
            result.line_issues,
            vec![LineIssue {
                line_no: 1,
                kind: LineIssueKind::UnparsableDebit("abc".to_string()),
            }]
        );
    }

    #[test]
    fn blank_amount_field_means_zero_without_a_diagnostic() {
        let lines = vec![line("1000", "10", ""), line("2000", "", "10")];
        let result = JournalBalanceValidator::default().validate(&lines);
        assert!(result.is_balanced);
        assert!(result.line_issues.is_empty());
    }

    #[test]
    fn missing_account_is_flagged_but_does_not_affect_totals() {
        let lines = vec![line("", "10", "0"), line("2000", "0", "10")];
        let result = JournalBalanceValidator::default().validate(&lines);
        assert!(result.is_balanced);
        assert_eq!(
            result.line_issues,
            vec![LineIssue {
                line_no: 1,
                kind: LineIssueKind::MissingAccount,
            }]
        );
    }

    #[test]
    fn mixed_line_is_flagged_only_under_the_exclusive_rule() {
        let lines = vec![line("1000", "10", "10")];

        let permissive = JournalBalanceValidator::default().validate(&lines);
        assert!(permissive.line_issues.is_empty());

        let strict = JournalBalanceValidator::new(ValidationPolicy {
            exclusive_debit_credit: true,
            ..ValidationPolicy::default()
        })
        .validate(&lines);
        assert_eq!(
            strict.line_issues,
            vec![LineIssue {
                line_no: 1,
                kind: LineIssueKind::DebitAndCredit,
            }]
        );
    }

    #[test]
    fn wider_tolerance_absorbs_small_differences() {
        let lines = vec![line("1000", "100.0050", "0"), line("2000", "0", "100")];
        let policy = ValidationPolicy {
            tolerance: "0.01".parse().unwrap(),
            ..ValidationPolicy::default()
        };
        let result = JournalBalanceValidator::new(policy).validate(&lines);
        assert_eq!(result.difference, Amount::from_scaled(50));
        assert!(result.is_balanced);
    }

    #[test]
    fn validation_is_idempotent() {
        let lines = vec![line("1000", "12.5", "0"), line("", "xyz", "12.5")];
        let validator = JournalBalanceValidator::default();
        assert_eq!(validator.validate(&lines), validator.validate(&lines));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: totals, difference and balance status are invariant
        /// under reordering of the lines.
        #[test]
        fn validation_is_permutation_invariant(
            amounts in prop::collection::vec((0u32..1_000_000, 0u32..1_000_000), 0..12),
            rotation in 0usize..12,
        ) {
            let lines: Vec<JournalLineDraft> = amounts
                .iter()
                .map(|(d, c)| JournalLineDraft::new("1000", d.to_string(), c.to_string()))
                .collect();
            let validator = JournalBalanceValidator::default();
            let base = validator.validate(&lines);

            let mut rotated = lines.clone();
            if !rotated.is_empty() {
                let k = rotation % rotated.len();
                rotated.rotate_left(k);
            }
            let other = validator.validate(&rotated);

            prop_assert_eq!(base.total_debit, other.total_debit);
            prop_assert_eq!(base.total_credit, other.total_credit);
            prop_assert_eq!(base.difference, other.difference);
            prop_assert_eq!(base.is_balanced, other.is_balanced);
        }

        /// Property: entries built as matched debit/credit pairs always
        /// balance, whatever the amounts.
        #[test]
        fn matched_pairs_always_balance(
            amounts in prop::collection::vec(1u32..1_000_000, 1..10)
        ) {
            let mut lines = Vec::new();
            for amount in &amounts {
                lines.push(JournalLineDraft::new("1000", amount.to_string(), "0"));
                lines.push(JournalLineDraft::new("2000", "0", amount.to_string()));
            }
            let result = JournalBalanceValidator::default().validate(&lines);
            prop_assert!(result.is_balanced);
            prop_assert_eq!(result.difference, Amount::ZERO);
        }
    }
}
