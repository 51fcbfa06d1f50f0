//! Import/export document handling.
//!
//! # Responsibility
//! - Serialize the collection as a pretty-printed downloadable document.
//! - Parse and validate uploaded documents before any state change.
//!
//! # Invariants
//! - A document failing validation leaves the collection untouched.
//! - The export filename carries the current date as `YYYY-MM-DD`.

use crate::model::poi::Poi;
use crate::repo::poi_repo::{InvalidImportRecord, PoiRepository};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Import document failure.
#[derive(Debug)]
pub enum ImportError {
    /// The document is not valid JSON or a record has the wrong shape.
    Parse(serde_json::Error),
    /// The document parses but is not an array of records.
    NotAnArray,
    /// A record is missing required content; nothing was applied.
    InvalidRecord(InvalidImportRecord),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid import document: {err}"),
            Self::NotAnArray => write!(f, "import document is not an array of poi records"),
            Self::InvalidRecord(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::NotAnArray => None,
            Self::InvalidRecord(err) => Some(err),
        }
    }
}

/// How an imported document is applied to the existing collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportDisposition {
    /// Append records with unseen ids; duplicates are silently skipped.
    Merge,
    /// Discard the existing collection wholesale.
    Replace,
}

/// Counts reported after a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Records in the uploaded document.
    pub input_count: usize,
    /// Records actually applied after merge dedup.
    pub applied_count: usize,
}

impl ImportOutcome {
    /// User-facing success message, reporting the applied count.
    pub fn success_message(&self) -> String {
        format!(
            "Importados {} puntos de interés correctamente",
            self.applied_count
        )
    }
}

/// Downloadable export document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    /// `soria-pois-<YYYY-MM-DD>.json`
    pub filename: String,
    /// Pretty-printed JSON array of POI records.
    pub json: String,
}

/// Builds the dated export filename.
pub fn export_filename(date: NaiveDate) -> String {
    format!("soria-pois-{}.json", date.format("%Y-%m-%d"))
}

/// Parses and validates an uploaded document.
///
/// # Errors
/// - [`ImportError::Parse`] for malformed JSON or wrongly shaped records.
/// - [`ImportError::NotAnArray`] when the top-level value is no array.
/// - [`ImportError::InvalidRecord`] for the first record with missing
///   content; the whole import must be abandoned.
pub fn parse_import_document(text: &str) -> Result<Vec<Poi>, ImportError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(ImportError::Parse)?;
    if !value.is_array() {
        return Err(ImportError::NotAnArray);
    }

    let records: Vec<Poi> = serde_json::from_value(value).map_err(ImportError::Parse)?;
    PoiRepository::validate_import(&records).map_err(ImportError::InvalidRecord)?;
    Ok(records)
}
