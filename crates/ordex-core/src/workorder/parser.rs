//! Rule-based work-order parser combining the field extractors.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::record::{PrefixKind, UnitPortRecord};

use super::rules::{extract_aux_fields, AuxiliaryFields, FieldExtractor, UnitPortExtractor};
use super::Result;

/// Result of work-order extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted unit/port records, unique by normalized value.
    pub unit_ports: Vec<UnitPortRecord>,

    /// Auxiliary administrative fields.
    pub fields: AuxiliaryFields,

    /// Extraction warnings.
    pub warnings: Vec<String>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for work-order parsing.
pub trait WorkOrderParser {
    /// Parse work-order page text into typed records.
    fn parse(&self, text: &str) -> Result<ExtractionResult>;
}

/// Rule-based parser over the regex extractors.
///
/// Stateless between calls; both extractors run independently over the
/// same text and their outputs are only packaged, never merged.
pub struct RuleBasedParser {
    /// Whether the loose unit/port fallback pattern is tried.
    loose_fallback: bool,
}

impl RuleBasedParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self { loose_fallback: true }
    }

    /// Set whether the loose unit/port fallback pattern is tried when
    /// the primary set finds nothing.
    pub fn with_loose_fallback(mut self, enabled: bool) -> Self {
        self.loose_fallback = enabled;
        self
    }
}

impl Default for RuleBasedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkOrderParser for RuleBasedParser {
    fn parse(&self, text: &str) -> Result<ExtractionResult> {
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }

        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("parsing work-order page from {} characters of text", text.len());

        let extractor = UnitPortExtractor::new().with_loose_fallback(self.loose_fallback);
        let unit_ports = extractor.extract_all(text);
        if unit_ports.is_empty() {
            warnings.push("no unit/port values found".to_string());
        }
        for record in &unit_ports {
            if record.prefix == PrefixKind::Unknown {
                warnings.push(format!(
                    "unknown equipment prefix: {}",
                    record.value_before_separator
                ));
            } else if record.derived_address.is_none() {
                warnings.push(format!("no address derived for {}", record.normalized));
            }
            if record.port_number.is_none() {
                warnings.push(format!("no port number found in {}", record.normalized));
            }
        }

        let fields = extract_aux_fields(text);
        if fields.records.is_empty() {
            warnings.push("no auxiliary fields found".to_string());
        }

        debug!(
            unit_ports = unit_ports.len(),
            fields = fields.records.len(),
            "extraction finished"
        );

        Ok(ExtractionResult {
            unit_ports,
            fields,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::FieldCategory;
    use crate::workorder::rules::dedup_by_key;

    const PAGE: &str = "\
        Наряд №4512\n\
        Адрес: ул. Ленина, д. 3, кв. 42\n\
        Unit/Порт U83.119-eth-5\n\
        Отключение по заявлению\n\
        Дата выполнения 12.05.2024\n";

    #[test]
    fn test_parse_full_page() {
        let parser = RuleBasedParser::new();
        let result = parser.parse(PAGE).unwrap();

        assert_eq!(result.unit_ports.len(), 1);
        let record = &result.unit_ports[0];
        assert_eq!(record.prefix, PrefixKind::U);
        assert_eq!(record.numeric_id, "83.119");
        assert_eq!(record.derived_address.as_deref(), Some("10.0.83.119"));
        assert_eq!(record.port_number.as_deref(), Some("5"));

        assert_eq!(result.fields.apartment.as_deref(), Some("42"));
        assert_eq!(result.fields.execution_date.as_deref(), Some("12.05.2024"));
        assert_eq!(result.fields.disconnection.as_deref(), Some("Отключение"));
        assert_eq!(result.fields.request_reason.as_deref(), Some("по заявлению"));
        assert_eq!(result.fields.room, None);

        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_category_order_is_stable() {
        let result = RuleBasedParser::new().parse(PAGE).unwrap();
        let categories: Vec<FieldCategory> =
            result.fields.records.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                FieldCategory::Apartment,
                FieldCategory::ExecutionDate,
                FieldCategory::Disconnection,
                FieldCategory::RequestReason,
            ]
        );
    }

    #[test]
    fn test_unit_ports_unique_by_normalized() {
        let result = RuleBasedParser::new().parse(PAGE).unwrap();
        let deduped = dedup_by_key(result.unit_ports.clone(), |r| r.normalized.clone());
        assert_eq!(result.unit_ports.len(), deduped.len());
    }

    #[test]
    fn test_parse_is_reentrant() {
        let parser = RuleBasedParser::new();
        let first = parser.parse(PAGE).unwrap();
        let second = parser.parse(PAGE).unwrap();
        assert_eq!(first.unit_ports, second.unit_ports);
        assert_eq!(first.fields, second.fields);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let parser = RuleBasedParser::new();
        assert_eq!(parser.parse("   \n\t ").unwrap_err(), ExtractionError::EmptyInput);
    }

    #[test]
    fn test_no_matches_yields_empty_sequences() {
        let result = RuleBasedParser::new()
            .parse("Совершенно посторонний текст")
            .unwrap();

        assert!(result.unit_ports.is_empty());
        assert!(result.fields.records.is_empty());
        assert!(result.warnings.contains(&"no unit/port values found".to_string()));
        assert!(result.warnings.contains(&"no auxiliary fields found".to_string()));
    }

    #[test]
    fn test_result_serializes_to_json() {
        let result = RuleBasedParser::new().parse(PAGE).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["unit_ports"][0]["derived_address"], "10.0.83.119");
        assert_eq!(json["unit_ports"][0]["prefix"], "u");
        assert_eq!(json["unit_ports"][0]["port_number"], "5");
        assert_eq!(json["fields"]["apartment"], "42");
        assert_eq!(json["fields"]["records"][0]["category"], "apartment");
    }
}
