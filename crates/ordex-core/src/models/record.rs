//! Typed records produced by the work-order extraction engine.

use serde::{Deserialize, Serialize};

/// Placeholder reported downstream when no port number pattern matched.
pub const PORT_NOT_FOUND: &str = "not found";

/// Equipment family classifier derived from a unit/port code's leading
/// literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixKind {
    /// U-series access equipment, managed in the 10.0.x.x range.
    U,
    /// MTT-series equipment, managed in the 10.90.x.x range.
    Mtt,
    /// GE-series equipment, shares the 10.0.x.x range with U.
    Ge,
    /// Leading literal not recognized; no address can be derived.
    Unknown,
}

impl PrefixKind {
    /// Classify a code by the literal prefix of its value before the
    /// separator.
    ///
    /// Dispatch is ordered most-specific literal first so that a longer
    /// family name is never shadowed by a shorter one.
    pub fn classify(value_before_separator: &str) -> Self {
        const ORDERED: [(&str, PrefixKind); 3] = [
            ("MTT", PrefixKind::Mtt),
            ("GE", PrefixKind::Ge),
            ("U", PrefixKind::U),
        ];

        for (literal, kind) in ORDERED {
            if starts_with_ignore_ascii_case(value_before_separator, literal) {
                return kind;
            }
        }
        PrefixKind::Unknown
    }

    /// Fixed network base for this equipment family.
    pub fn address_base(&self) -> Option<&'static str> {
        match self {
            PrefixKind::U | PrefixKind::Ge => Some("10.0"),
            PrefixKind::Mtt => Some("10.90"),
            PrefixKind::Unknown => None,
        }
    }

    /// Length in bytes of the family literal (0 for `Unknown`).
    pub fn literal_len(&self) -> usize {
        match self {
            PrefixKind::U => 1,
            PrefixKind::Mtt => 3,
            PrefixKind::Ge => 2,
            PrefixKind::Unknown => 0,
        }
    }
}

fn starts_with_ignore_ascii_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// One extracted unit/port identifier with its derived values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPortRecord {
    /// Raw matched substring exactly as found in the page text.
    pub original: String,

    /// Whitespace-collapsed form of `original`.
    pub normalized: String,

    /// Substring preceding the first hyphen (surrounding spaces tolerated).
    pub value_before_separator: String,

    /// Equipment family classifier.
    pub prefix: PrefixKind,

    /// Substring following the family literal, up to the separator; may
    /// contain a decimal point.
    pub numeric_id: String,

    /// `<base>.<numeric_id>`; absent for unknown prefixes and for ids
    /// carrying no digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_address: Option<String>,

    /// Port number extracted from the tail of the code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_number: Option<String>,

    /// Which derivation rule produced the values.
    pub note: String,
}

impl UnitPortRecord {
    /// Port number for display, with the fixed placeholder when absent.
    pub fn port_display(&self) -> &str {
        self.port_number.as_deref().unwrap_or(PORT_NOT_FOUND)
    }
}

/// Category of an auxiliary administrative field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    /// Apartment number (`кв.`).
    Apartment,
    /// Room number (`ком.`).
    Room,
    /// Disconnection keyword, present or not.
    Disconnection,
    /// Request-reason phrase (`по заявлению`).
    RequestReason,
    /// Execution date (`Дата выполнения`).
    ExecutionDate,
}

/// One auxiliary field occurrence found in the page text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxiliaryFieldRecord {
    /// Field family this occurrence belongs to.
    pub category: FieldCategory,

    /// Captured text for the family's pattern.
    pub value: String,

    /// Which pattern matched.
    pub note: String,
}
