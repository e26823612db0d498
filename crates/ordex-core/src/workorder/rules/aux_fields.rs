//! Auxiliary administrative field extraction.
//!
//! Five unrelated families share one scan: apartment number, room
//! number, execution date, disconnection keyword and request-reason
//! phrase. Each family has a single narrow pattern; there is no
//! fallback chain here.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::record::{AuxiliaryFieldRecord, FieldCategory};

use super::dedup_by_key;
use super::patterns::{
    captures_first_group, APARTMENT, DISCONNECTION, EXECUTION_DATE, REQUEST_REASON, ROOM,
};

/// Auxiliary fields found on a work-order page.
///
/// Carries the full deduplicated occurrence list plus one representative
/// value per category for downstream singleton use (first match wins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxiliaryFields {
    /// Apartment number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,

    /// Room number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,

    /// Execution date as captured (D.D.D).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_date: Option<String>,

    /// Disconnection keyword when present on the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disconnection: Option<String>,

    /// Request-reason phrase when present on the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_reason: Option<String>,

    /// All field occurrences in family scan order, unique by
    /// (category, value).
    pub records: Vec<AuxiliaryFieldRecord>,
}

impl AuxiliaryFields {
    /// Execution date parsed as a calendar date, when present and well
    /// formed.
    pub fn execution_date_parsed(&self) -> Option<NaiveDate> {
        let raw = self.execution_date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%d.%m.%Y").ok()
    }
}

/// Scan page text for all five auxiliary field families.
///
/// Families run in a fixed order (apartment, room, execution date,
/// disconnection, request reason) and the combined record sequence keeps
/// that order; downstream reporting iterates categories the same way.
pub fn extract_aux_fields(text: &str) -> AuxiliaryFields {
    let families: [(&Regex, FieldCategory, &str); 5] = [
        (&APARTMENT, FieldCategory::Apartment, "apartment number pattern"),
        (&ROOM, FieldCategory::Room, "room number pattern"),
        (&EXECUTION_DATE, FieldCategory::ExecutionDate, "execution date pattern"),
        (&DISCONNECTION, FieldCategory::Disconnection, "disconnection keyword"),
        (&REQUEST_REASON, FieldCategory::RequestReason, "request reason phrase"),
    ];

    let mut records = Vec::new();
    for (pattern, category, note) in families {
        for value in captures_first_group(pattern, text) {
            records.push(AuxiliaryFieldRecord {
                category,
                value,
                note: note.to_string(),
            });
        }
    }

    let records = dedup_by_key(records, |r| (r.category, r.value.clone()));
    debug!(count = records.len(), "auxiliary field scan finished");

    let mut result = AuxiliaryFields {
        records,
        ..AuxiliaryFields::default()
    };
    for record in &result.records {
        let slot = match record.category {
            FieldCategory::Apartment => &mut result.apartment,
            FieldCategory::Room => &mut result.room,
            FieldCategory::ExecutionDate => &mut result.execution_date,
            FieldCategory::Disconnection => &mut result.disconnection,
            FieldCategory::RequestReason => &mut result.request_reason,
        };
        if slot.is_none() {
            *slot = Some(record.value.clone());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_apartment_room_and_date_in_order() {
        let text = "Адрес: кв. 42, этаж 3, ком. 7. Дата выполнения 12.05.2024";
        let fields = extract_aux_fields(text);

        let summary: Vec<(FieldCategory, &str)> = fields
            .records
            .iter()
            .map(|r| (r.category, r.value.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (FieldCategory::Apartment, "42"),
                (FieldCategory::Room, "7"),
                (FieldCategory::ExecutionDate, "12.05.2024"),
            ]
        );

        assert_eq!(fields.apartment.as_deref(), Some("42"));
        assert_eq!(fields.room.as_deref(), Some("7"));
        assert_eq!(fields.execution_date.as_deref(), Some("12.05.2024"));
    }

    #[test]
    fn test_execution_date_parses() {
        let fields = extract_aux_fields("Дата выполнения 12.05.2024");
        assert_eq!(
            fields.execution_date_parsed(),
            NaiveDate::from_ymd_opt(2024, 5, 12)
        );
    }

    #[test]
    fn test_malformed_date_stays_raw() {
        let fields = extract_aux_fields("Дата выполнения 45.13.2024");
        assert_eq!(fields.execution_date.as_deref(), Some("45.13.2024"));
        assert_eq!(fields.execution_date_parsed(), None);
    }

    #[test]
    fn test_flags_capture_the_literal_text() {
        let text = "Отключение по заявлению абонента";
        let fields = extract_aux_fields(text);

        assert_eq!(fields.disconnection.as_deref(), Some("Отключение"));
        assert_eq!(fields.request_reason.as_deref(), Some("по заявлению"));
        assert_eq!(fields.records.len(), 2);
        assert_eq!(fields.records[0].category, FieldCategory::Disconnection);
        assert_eq!(fields.records[1].category, FieldCategory::RequestReason);
    }

    #[test]
    fn test_dedup_by_category_and_value() {
        let fields = extract_aux_fields("кв. 5, потом снова кв. 5, затем кв. 6");
        let values: Vec<&str> = fields.records.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["5", "6"]);
        assert_eq!(fields.apartment.as_deref(), Some("5"));
    }

    #[test]
    fn test_apartment_without_dot() {
        let fields = extract_aux_fields("квартира 15");
        assert_eq!(fields.apartment.as_deref(), Some("15"));
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        let fields = extract_aux_fields("Совершенно посторонний текст");
        assert!(fields.records.is_empty());
        assert_eq!(fields.apartment, None);
        assert_eq!(fields.disconnection, None);
    }
}
