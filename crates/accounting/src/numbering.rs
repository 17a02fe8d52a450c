//! Document number format (`JE-2026-000001`).
//!
//! The backend allocates numbers with a transactional sequence; that
//! persistence stays external. This module owns the format itself, parsing,
//! and an in-memory counter for previews and tests.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use ledgerkit_core::DomainError;

/// Document families that receive sequential numbers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    JournalEntry,
    GoodsReceipt,
    DeliveryNote,
    Invoice,
    Payment,
    Receipt,
}

impl DocumentKind {
    pub fn prefix(self) -> &'static str {
        match self {
            DocumentKind::JournalEntry => "JE",
            DocumentKind::GoodsReceipt => "GRN",
            DocumentKind::DeliveryNote => "DO",
            DocumentKind::Invoice => "INV",
            DocumentKind::Payment => "PAY",
            DocumentKind::Receipt => "RCV",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "JE" => Some(DocumentKind::JournalEntry),
            "GRN" => Some(DocumentKind::GoodsReceipt),
            "DO" => Some(DocumentKind::DeliveryNote),
            "INV" => Some(DocumentKind::Invoice),
            "PAY" => Some(DocumentKind::Payment),
            "RCV" => Some(DocumentKind::Receipt),
            _ => None,
        }
    }
}

/// A fully-qualified document number: `<prefix>-<year>-<sequence>`, the
/// sequence zero-padded to six digits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DocumentNumber {
    pub kind: DocumentKind,
    pub year: i32,
    pub sequence: u32,
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{:06}", self.kind.prefix(), self.year, self.sequence)
    }
}

impl FromStr for DocumentNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '-');
        let (prefix, year, sequence) = match (parts.next(), parts.next(), parts.next()) {
            (Some(p), Some(y), Some(q)) => (p, y, q),
            _ => {
                return Err(DomainError::invalid_id(format!("document number: {s:?}")));
            }
        };

        let kind = DocumentKind::from_prefix(prefix)
            .ok_or_else(|| DomainError::invalid_id(format!("unknown document prefix: {prefix:?}")))?;
        let year: i32 = year
            .parse()
            .map_err(|_| DomainError::invalid_id(format!("document number year: {s:?}")))?;
        let sequence: u32 = sequence
            .parse()
            .map_err(|_| DomainError::invalid_id(format!("document number sequence: {s:?}")))?;

        Ok(Self { kind, year, sequence })
    }
}

/// In-memory counter for one document family and year.
///
/// Numbers restart at 1 each fiscal year, matching the backend sequence keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSequence {
    kind: DocumentKind,
    year: i32,
    current: u32,
}

impl NumberSequence {
    pub fn new(kind: DocumentKind, year: i32) -> Self {
        Self {
            kind,
            year,
            current: 0,
        }
    }

    pub fn next(&mut self) -> DocumentNumber {
        self.current += 1;
        DocumentNumber {
            kind: self.kind,
            year: self.year,
            sequence: self.current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_zero_padded_sequence() {
        let number = DocumentNumber {
            kind: DocumentKind::JournalEntry,
            year: 2026,
            sequence: 1,
        };
        assert_eq!(number.to_string(), "JE-2026-000001");
    }

    #[test]
    fn parses_its_own_output() {
        for kind in [
            DocumentKind::JournalEntry,
            DocumentKind::GoodsReceipt,
            DocumentKind::DeliveryNote,
            DocumentKind::Invoice,
            DocumentKind::Payment,
            DocumentKind::Receipt,
        ] {
            let number = DocumentNumber {
                kind,
                year: 2026,
                sequence: 42,
            };
            let parsed: DocumentNumber = number.to_string().parse().unwrap();
            assert_eq!(parsed, number);
        }
    }

    #[test]
    fn rejects_malformed_numbers() {
        for raw in ["", "JE", "JE-2026", "XX-2026-000001", "JE-year-000001", "JE-2026-seq"] {
            assert!(
                raw.parse::<DocumentNumber>().is_err(),
                "expected parse failure for {raw:?}"
            );
        }
    }

    #[test]
    fn sequence_counts_from_one() {
        let mut seq = NumberSequence::new(DocumentKind::JournalEntry, 2026);
        assert_eq!(seq.next().to_string(), "JE-2026-000001");
        assert_eq!(seq.next().to_string(), "JE-2026-000002");
        assert_eq!(seq.next().sequence, 3);
    }
}
