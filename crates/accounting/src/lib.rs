//! Accounting module (double-entry journal balance validation).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. The
//! external ledger-posting API stays authoritative for persisted state; this
//! crate computes the facts a form or an endpoint needs in order to accept or
//! reject a proposed journal entry, and the policy layer that turns those
//! facts into a decision.

pub mod balances;
pub mod guard;
pub mod journal;
pub mod numbering;
pub mod validate;

pub use balances::{account_balances, AccountBalance};
pub use guard::PostingGuard;
pub use journal::{JournalEntry, JournalEntryDraft, JournalLine, JournalLineDraft};
pub use numbering::{DocumentKind, DocumentNumber, NumberSequence};
pub use validate::{
    JournalBalanceValidator, LineIssue, LineIssueKind, ValidationPolicy, ValidationResult,
    DEFAULT_TOLERANCE,
};
