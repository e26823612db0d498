//! Unit/port code extraction, classification and address derivation.

use regex::Regex;
use tracing::debug;

use crate::models::record::{PrefixKind, UnitPortRecord};

use super::patterns::{
    first_capture, PORT_ANY_IFACE, PORT_ETH, PORT_FA, PORT_GE, PORT_GI, PORT_TE,
    PORT_TRAILING, PORT_TRAILING_SEP, SEPARATOR, UNIT_PORT_BARE, UNIT_PORT_LOOSE,
    UNIT_PORT_PHRASED, UNIT_PORT_SPACED, UNIT_PORT_SUFFIXED,
};
use super::{collapse_whitespace, dedup_by_key, FieldExtractor};

/// Unit/port code extractor.
pub struct UnitPortExtractor {
    loose_fallback: bool,
}

impl UnitPortExtractor {
    /// Create a new extractor with the loose fallback enabled.
    pub fn new() -> Self {
        Self { loose_fallback: true }
    }

    /// Set whether the phrase-anchored loose pattern runs when the
    /// primary set finds nothing.
    pub fn with_loose_fallback(mut self, enabled: bool) -> Self {
        self.loose_fallback = enabled;
        self
    }

    /// Union of raw matches across the primary pattern set, first-seen
    /// order preserved. This family accumulates across patterns rather
    /// than stopping at the first one that matches.
    fn collect_raw(&self, text: &str) -> Vec<String> {
        let primary: [&Regex; 4] = [
            &UNIT_PORT_PHRASED,
            &UNIT_PORT_SPACED,
            &UNIT_PORT_BARE,
            &UNIT_PORT_SUFFIXED,
        ];

        let mut raw: Vec<String> = Vec::new();
        for pattern in primary {
            for caps in pattern.captures_iter(text) {
                let m = caps[1].to_string();
                if !raw.contains(&m) {
                    raw.push(m);
                }
            }
        }

        if raw.is_empty() && self.loose_fallback {
            debug!("primary unit/port patterns found nothing, trying loose fallback");
            for caps in UNIT_PORT_LOOSE.captures_iter(text) {
                let m = caps[1].to_string();
                if !raw.contains(&m) {
                    raw.push(m);
                }
            }
        }

        raw
    }

    /// Build a record from one raw match. Malformed numeric parts keep
    /// the record and drop only the derived address.
    fn build_record(&self, raw: &str) -> UnitPortRecord {
        let normalized = collapse_whitespace(raw);

        let value_before_separator = SEPARATOR
            .split(&normalized)
            .next()
            .unwrap_or(normalized.as_str())
            .to_string();

        let prefix = PrefixKind::classify(&value_before_separator);
        let numeric_id = value_before_separator[prefix.literal_len()..].to_string();
        let port_number = extract_port_number(&normalized);

        debug!(?prefix, %normalized, "classified unit/port code");

        let (derived_address, note) = match prefix.address_base() {
            Some(base) if numeric_id.bytes().any(|b| b.is_ascii_digit()) => {
                let address = format!("{base}.{numeric_id}");
                let note = if numeric_id.contains('.') {
                    format!("dotted id appended to base {base}")
                } else {
                    format!("plain id appended to base {base}")
                };
                (Some(address), note)
            }
            Some(_) => (
                None,
                "numeric id carries no digits, address skipped".to_string(),
            ),
            None => (
                None,
                format!("unrecognized equipment prefix in {value_before_separator}"),
            ),
        };

        UnitPortRecord {
            original: raw.to_string(),
            normalized,
            value_before_separator,
            prefix,
            numeric_id,
            derived_address,
            port_number,
            note,
        }
    }
}

impl Default for UnitPortExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for UnitPortExtractor {
    type Output = UnitPortRecord;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let records: Vec<UnitPortRecord> = self
            .collect_raw(text)
            .iter()
            .map(|raw| self.build_record(raw))
            .collect();

        dedup_by_key(records, |r| r.normalized.clone())
    }
}

/// Extract the port number from a normalized code via the ordered
/// fallback chain; the first pattern to match wins.
pub fn extract_port_number(normalized: &str) -> Option<String> {
    let chain: [&Regex; 8] = [
        &PORT_ETH,
        &PORT_GI,
        &PORT_FA,
        &PORT_TE,
        &PORT_GE,
        &PORT_ANY_IFACE,
        &PORT_TRAILING_SEP,
        &PORT_TRAILING,
    ];
    first_capture(normalized, &chain)
}
