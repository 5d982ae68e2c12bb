use std::fmt;

use serde::{Deserialize, Serialize};

/// A single country record.
///
/// `name` and `continent` are stored in canonical form (collapsed whitespace,
/// each word capitalized). `area` is always greater than zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub population: u64,
    /// Square kilometers.
    pub area: u64,
    pub continent: String,
}

impl Country {
    /// Case-insensitive key used for name uniqueness and lookups.
    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn continent_key(&self) -> String {
        self.continent.to_lowercase()
    }
}

/// The fields of a country record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Population,
    Area,
    Continent,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::Population,
        Field::Area,
        Field::Continent,
    ];

    /// Column name used in the persisted file header.
    pub const fn column(self) -> &'static str {
        match self {
            Field::Name => "nombre",
            Field::Population => "poblacion",
            Field::Area => "superficie",
            Field::Continent => "continente",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Field::Name => "nombre",
            Field::Population => "población",
            Field::Area => "superficie",
            Field::Continent => "continente",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
