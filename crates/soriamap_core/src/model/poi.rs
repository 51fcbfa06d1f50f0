//! POI domain model.
//!
//! # Responsibility
//! - Define the canonical point-of-interest record and its category set.
//! - Provide constructors for the creation and import paths.
//! - Validate records before they enter the collection.
//!
//! # Invariants
//! - `id` is an opaque string assigned at creation from the epoch-millisecond
//!   domain; uniqueness across rapid-fire creation is not actively enforced.
//! - `date` is an ISO 8601 (RFC 3339) string in UTC.
//! - Unknown category tokens decode to [`Category::Other`], so a decoded POI
//!   always carries a category from the enumerated set.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed category set for POIs.
///
/// Wire tokens are the Spanish names the stored documents use; the display
/// glyph and colour mirror the map icon configuration. Unknown tokens decode
/// to [`Category::Other`], so membership in this set holds for every decoded
/// record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Signal,
    Pothole,
    Roadwork,
    Accident,
    Other,
}

impl Category {
    /// All categories in stable display order.
    pub const ALL: [Category; 5] = [
        Category::Signal,
        Category::Pothole,
        Category::Roadwork,
        Category::Accident,
        Category::Other,
    ];

    /// Wire/display token for this category.
    pub fn token(self) -> &'static str {
        match self {
            Self::Signal => "señal",
            Self::Pothole => "bache",
            Self::Roadwork => "obra",
            Self::Accident => "accidente",
            Self::Other => "otro",
        }
    }

    /// Marker glyph shown inside the category icon.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Signal => "🚦",
            Self::Pothole => "🕳️",
            Self::Roadwork => "🚧",
            Self::Accident => "⚠️",
            Self::Other => "📍",
        }
    }

    /// Icon background colour for this category.
    pub fn color(self) -> &'static str {
        match self {
            Self::Signal => "#3498db",
            Self::Pothole => "#ff6b6b",
            Self::Roadwork => "#ffa502",
            Self::Accident => "#ff4757",
            Self::Other => "#747d8c",
        }
    }

    /// Parses a wire token. Returns `None` for unknown tokens.
    pub fn from_token(value: &str) -> Option<Category> {
        match value {
            "señal" => Some(Self::Signal),
            "bache" => Some(Self::Pothole),
            "obra" => Some(Self::Roadwork),
            "accidente" => Some(Self::Accident),
            "otro" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Category::from_token(&token).unwrap_or(Category::Other))
    }
}

/// Category restriction for list/filter queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Matches every category.
    #[default]
    All,
    /// Matches exactly one category.
    Only(Category),
}

impl CategoryFilter {
    /// Whether `category` passes this filter.
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

/// Validation error for POI records entering the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoiValidationError {
    /// `name` is empty after trimming.
    EmptyName,
    /// `id` is empty after trimming (import path).
    EmptyId,
    /// A coordinate is NaN or infinite; the field name is carried.
    NonFiniteCoordinate(&'static str),
}

impl Display for PoiValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "poi name cannot be empty"),
            Self::EmptyId => write!(f, "poi id cannot be empty"),
            Self::NonFiniteCoordinate(field) => {
                write!(f, "poi coordinate `{field}` must be a finite number")
            }
        }
    }
}

impl Error for PoiValidationError {}

/// Canonical POI record.
///
/// This is also the wire shape for persistence and import/export documents:
/// `{ id, name, description, category, lat, lng, date }`. `description` and
/// `date` tolerate absence on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    /// Opaque unique id, epoch milliseconds at creation time.
    pub id: String,
    /// Non-empty display name.
    pub name: String,
    /// Optional free text, may be empty.
    #[serde(default)]
    pub description: String,
    /// Category from the fixed set.
    pub category: Category,
    pub lat: f64,
    pub lng: f64,
    /// Creation timestamp, ISO 8601 string.
    #[serde(default)]
    pub date: String,
}

impl Poi {
    /// Creates a POI with a freshly generated id and creation date.
    ///
    /// # Contract
    /// - `id` is the current epoch-millisecond count as a string.
    /// - `date` is the current UTC instant in RFC 3339 millisecond form.
    /// - No validation happens here; callers validate before insertion.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        lat: f64,
        lng: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            name: name.into(),
            description: description.into(),
            category,
            lat,
            lng,
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Creates a POI with caller-provided identity, for import/test paths
    /// where the id and date already exist externally.
    pub fn with_id(
        id: impl Into<String>,
        date: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            category,
            lat,
            lng,
            date: date.into(),
        }
    }

    /// Validates the fields every stored record must carry.
    ///
    /// # Errors
    /// - [`PoiValidationError::EmptyId`] when `id` trims to empty.
    /// - [`PoiValidationError::EmptyName`] when `name` trims to empty.
    /// - [`PoiValidationError::NonFiniteCoordinate`] for NaN/infinite
    ///   coordinates.
    pub fn validate(&self) -> Result<(), PoiValidationError> {
        if self.id.trim().is_empty() {
            return Err(PoiValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(PoiValidationError::EmptyName);
        }
        if !self.lat.is_finite() {
            return Err(PoiValidationError::NonFiniteCoordinate("lat"));
        }
        if !self.lng.is_finite() {
            return Err(PoiValidationError::NonFiniteCoordinate("lng"));
        }
        Ok(())
    }

    /// Creation instant in epoch milliseconds, for newest-first ordering.
    ///
    /// Unparseable dates sort as the epoch, keeping ordering total.
    pub fn created_at_millis(&self) -> i64 {
        DateTime::parse_from_rfc3339(&self.date)
            .map(|instant| instant.timestamp_millis())
            .unwrap_or(0)
    }

    /// Localized `DD/MM/YYYY` date for list rows and popups.
    ///
    /// Falls back to the raw stored string when the date does not parse.
    pub fn display_date(&self) -> String {
        DateTime::parse_from_rfc3339(&self.date)
            .map(|instant| instant.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|_| self.date.clone())
    }
}
