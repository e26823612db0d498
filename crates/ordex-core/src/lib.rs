//! Core library for CRM work-order page parsing.
//!
//! This crate provides:
//! - Unit/port equipment code extraction with layered fallback patterns
//! - Equipment prefix classification and network address derivation
//! - Auxiliary field extraction (apartment, room, execution date, flags)
//!
//! The page text itself comes from an external provider (the CRM session
//! layer); this crate holds no network or file surface and no state
//! between calls.

pub mod error;
pub mod models;
pub mod workorder;

pub use error::{ExtractionError, OrdexError, Result};
pub use models::record::{
    AuxiliaryFieldRecord, FieldCategory, PrefixKind, UnitPortRecord, PORT_NOT_FOUND,
};
pub use workorder::rules::{
    extract_aux_fields, AuxiliaryFields, FieldExtractor, UnitPortExtractor,
};
pub use workorder::{ExtractionResult, RuleBasedParser, WorkOrderParser};
