//! Admissibility rules for labels, numbers and whole records.
//!
//! The validator only reports. Callers decide whether a failure is shown to
//! the user (manual entry) or skipped silently (bulk load).

use std::sync::LazyLock;

use atlas_model::{Country, CountryError, Field, Result};
use regex::Regex;

use crate::normalize::{collapse_whitespace, normalize_name, strip_group_separators};

/// Shortest accepted label, in characters.
pub const LABEL_MIN_CHARS: usize = 2;
/// Longest accepted label, in characters.
pub const LABEL_MAX_CHARS: usize = 60;

/// Letter runs from the supported alphabet joined by single spaces, hyphens or
/// apostrophes.
static LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-zÁÉÍÓÚÜÑáéíóúüñ]+(?:[ '\-][A-Za-zÁÉÍÓÚÜÑáéíóúüñ]+)*$")
        .expect("Invalid label regex")
});

/// True when the text, once separators are stripped and it is trimmed, is a
/// non-empty run of ASCII digits.
pub fn is_nonnegative_integer(text: &str) -> bool {
    let stripped = strip_group_separators(text);
    let trimmed = stripped.trim();
    !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a non-negative integer, accepting `.` and `,` as group separators.
///
/// Returns `None` when the text is not a digit run or does not fit in `u64`.
pub fn parse_nonnegative_integer(text: &str) -> Option<u64> {
    if !is_nonnegative_integer(text) {
        return None;
    }
    strip_group_separators(text).trim().parse().ok()
}

/// [`parse_nonnegative_integer`] with a structured error naming the field.
pub fn parse_number(field: Field, text: &str) -> Result<u64> {
    parse_nonnegative_integer(text).ok_or_else(|| CountryError::InvalidNumber {
        field,
        value: text.trim().to_string(),
    })
}

/// Shape and length rule shared by names and continents.
///
/// Whitespace is collapsed (case is not touched) before checking. Any
/// character outside the alphabet, or a leading, trailing or doubled
/// separator, rejects the whole string.
pub fn is_valid_label(text: &str) -> bool {
    let collapsed = collapse_whitespace(text);
    let len = collapsed.chars().count();
    if !(LABEL_MIN_CHARS..=LABEL_MAX_CHARS).contains(&len) {
        return false;
    }
    LABEL_REGEX.is_match(&collapsed)
}

/// Raw textual input for one record, as typed by a user or read from a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCountry<'a> {
    pub name: &'a str,
    pub population: &'a str,
    pub area: &'a str,
    pub continent: &'a str,
}

impl<'a> RawCountry<'a> {
    pub fn new(name: &'a str, population: &'a str, area: &'a str, continent: &'a str) -> Self {
        Self {
            name,
            population,
            area,
            continent,
        }
    }

    fn get(&self, field: Field) -> &'a str {
        match field {
            Field::Name => self.name,
            Field::Population => self.population,
            Field::Area => self.area,
            Field::Continent => self.continent,
        }
    }
}

/// Turn raw text into a canonical record, or report the first failing rule.
///
/// Rules are checked in order: required fields, label shape, numeric syntax,
/// then `area > 0`.
pub fn validate_country(raw: &RawCountry<'_>) -> Result<Country> {
    for field in Field::ALL {
        if raw.get(field).trim().is_empty() {
            return Err(CountryError::EmptyField { field });
        }
    }
    for field in [Field::Name, Field::Continent] {
        let value = raw.get(field);
        if !is_valid_label(value) {
            return Err(CountryError::InvalidLabel {
                field,
                value: value.trim().to_string(),
            });
        }
    }
    let population = parse_number(Field::Population, raw.population)?;
    let area = parse_number(Field::Area, raw.area)?;
    if area == 0 {
        return Err(CountryError::InvalidRange {
            field: Field::Area,
            value: 0,
            rule: "debe ser > 0",
        });
    }
    Ok(Country {
        name: normalize_name(raw.name),
        population,
        area,
        continent: normalize_name(raw.continent),
    })
}
