use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CountryError, Result};

/// Sort key for ordering a collection of countries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Population,
    Area,
}

impl SortField {
    /// Resolve a user-supplied key. Unrecognized values fall back to `Name`.
    ///
    /// Accepts English and Spanish spellings, with or without accents.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "population" | "poblacion" | "población" => Self::Population,
            "area" | "superficie" => Self::Area,
            _ => Self::Name,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Population => "population",
            Self::Area => "area",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selection over the collection. Range bounds are inclusive; `None` means
/// unbounded on that side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Filter {
    Continent { name: String },
    Population { min: Option<u64>, max: Option<u64> },
    Area { min: Option<u64>, max: Option<u64> },
}

impl Filter {
    /// Reject ranges whose lower bound exceeds the upper bound.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Continent { .. } => Ok(()),
            Self::Population { min, max } | Self::Area { min, max } => match (min, max) {
                (Some(min), Some(max)) if min > max => Err(CountryError::InvertedRange {
                    min: *min,
                    max: *max,
                }),
                _ => Ok(()),
            },
        }
    }
}

/// Inclusive bound check shared by the range filters.
pub fn within_bounds(value: u64, min: Option<u64>, max: Option<u64>) -> bool {
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}
