//! Account running balances derived from posted entries.
//!
//! The external ledger API owns persisted balances; this fold reproduces its
//! arithmetic (`balance = total_debit - total_credit`) so callers can preview
//! the effect of a batch of entries or reconcile against server-reported
//! figures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ledgerkit_core::{Amount, ValueObject};

use crate::journal::JournalEntry;

/// Accumulated per-account totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountBalance {
    pub total_debit: Amount,
    pub total_credit: Amount,
    /// Debit minus credit; negative for credit-heavy accounts.
    pub balance: Amount,
}

impl ValueObject for AccountBalance {}

impl AccountBalance {
    fn apply(&mut self, debit: Amount, credit: Amount) {
        self.total_debit += debit;
        self.total_credit += credit;
        self.balance = self.total_debit - self.total_credit;
    }
}

/// Fold entries into per-account balances, keyed by account id.
///
/// Pure reduction, O(total lines); multiple lines touching the same account
/// accumulate.
pub fn account_balances<'a, I>(entries: I) -> BTreeMap<String, AccountBalance>
where
    I: IntoIterator<Item = &'a JournalEntry>,
{
    let mut balances: BTreeMap<String, AccountBalance> = BTreeMap::new();
    for entry in entries {
        for line in &entry.lines {
            balances
                .entry(line.account_id.clone())
                .or_default()
                .apply(line.debit, line.credit);
        }
    }
    balances
}
