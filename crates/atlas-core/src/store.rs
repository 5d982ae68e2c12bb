//! The in-memory collection of country records.

use atlas_model::{Country, CountryError, Field, Filter, Result, SortField, Statistics};
use tracing::debug;

use crate::normalize::{collapse_whitespace, normalize_name};
use crate::validate::{RawCountry, is_valid_label, parse_number, validate_country};
use crate::{aggregate, query};

const POPULATION_RULE: &str = "debe ser ≥ 0";
const AREA_RULE: &str = "debe ser > 0";

/// Ordered collection of validated records.
///
/// Names are unique under case-insensitive comparison and records keep their
/// insertion order. Records are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryStore {
    countries: Vec<Country>,
}

impl CountryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Country> {
        self.countries.iter()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// True if a record's name matches `name` once both are normalized,
    /// ignoring case.
    pub fn exists(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Country> {
        self.position(name).map(|index| &self.countries[index])
    }

    fn position(&self, name: &str) -> Option<usize> {
        let key = normalize_name(name).to_lowercase();
        self.countries
            .iter()
            .position(|country| country.name_key() == key)
    }

    /// Append an already validated record, enforcing name uniqueness.
    pub fn insert(&mut self, country: Country) -> Result<()> {
        if self.exists(&country.name) {
            return Err(CountryError::DuplicateName(country.name));
        }
        self.countries.push(country);
        Ok(())
    }

    /// Create a record from typed values.
    ///
    /// Checks run in order: empty labels, label shape, numeric ranges, then
    /// name uniqueness. Labels are checked as typed, before normalization.
    pub fn add(&mut self, name: &str, population: i64, area: i64, continent: &str) -> Result<()> {
        let raw_name = collapse_whitespace(name);
        let raw_continent = collapse_whitespace(continent);
        if raw_name.is_empty() {
            return Err(CountryError::EmptyField { field: Field::Name });
        }
        if raw_continent.is_empty() {
            return Err(CountryError::EmptyField {
                field: Field::Continent,
            });
        }
        if !is_valid_label(&raw_name) {
            return Err(CountryError::InvalidLabel {
                field: Field::Name,
                value: raw_name,
            });
        }
        if !is_valid_label(&raw_continent) {
            return Err(CountryError::InvalidLabel {
                field: Field::Continent,
                value: raw_continent,
            });
        }
        let name = normalize_name(&raw_name);
        let continent = normalize_name(&raw_continent);
        let population = check_population(population)?;
        let area = check_area(area)?;
        debug!(name = %name, population, area, continent = %continent, "add country");
        self.insert(Country {
            name,
            population,
            area,
            continent,
        })
    }

    /// Create a record from raw text, as entered in the shell.
    ///
    /// Numeric text that is not a non-negative integer fails with
    /// `InvalidNumber`.
    pub fn add_from_text(&mut self, raw: &RawCountry<'_>) -> Result<()> {
        let country = validate_country(raw)?;
        debug!(name = %country.name, "add country from text");
        self.insert(country)
    }

    /// Change population and/or area of an existing record.
    ///
    /// Every supplied value is checked before anything is written, so a
    /// failure leaves the record untouched. Omitted values are kept.
    pub fn update(&mut self, name: &str, population: Option<i64>, area: Option<i64>) -> Result<()> {
        let index = self
            .position(name)
            .ok_or_else(|| CountryError::NotFound(name.trim().to_string()))?;
        let population = population.map(check_population).transpose()?;
        let area = area.map(check_area).transpose()?;
        self.apply_update(index, population, area);
        Ok(())
    }

    /// [`update`](Self::update) from raw text. Blank text means "not supplied".
    pub fn update_from_text(
        &mut self,
        name: &str,
        population: Option<&str>,
        area: Option<&str>,
    ) -> Result<()> {
        let index = self
            .position(name)
            .ok_or_else(|| CountryError::NotFound(name.trim().to_string()))?;
        let population = supplied(population)
            .map(|text| parse_number(Field::Population, text))
            .transpose()?;
        let area = supplied(area)
            .map(|text| parse_number(Field::Area, text).and_then(require_positive_area))
            .transpose()?;
        self.apply_update(index, population, area);
        Ok(())
    }

    fn apply_update(&mut self, index: usize, population: Option<u64>, area: Option<u64>) {
        let country = &mut self.countries[index];
        if let Some(population) = population {
            country.population = population;
        }
        if let Some(area) = area {
            country.area = area;
        }
        debug!(
            name = %country.name,
            population = country.population,
            area = country.area,
            "update country"
        );
    }

    pub fn search(&self, pattern: &str) -> Vec<&Country> {
        query::search_by_name(&self.countries, pattern)
    }

    pub fn filter(&self, filter: &Filter) -> Result<Vec<&Country>> {
        query::apply_filter(&self.countries, filter)
    }

    pub fn sorted(&self, field: SortField, descending: bool) -> Vec<&Country> {
        query::sort(&self.countries, field, descending)
    }

    pub fn statistics(&self) -> Statistics {
        aggregate::compute_statistics(&self.countries)
    }
}

impl<'a> IntoIterator for &'a CountryStore {
    type Item = &'a Country;
    type IntoIter = std::slice::Iter<'a, Country>;

    fn into_iter(self) -> Self::IntoIter {
        self.countries.iter()
    }
}

fn supplied(text: Option<&str>) -> Option<&str> {
    text.filter(|value| !value.trim().is_empty())
}

fn check_population(value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| CountryError::InvalidRange {
        field: Field::Population,
        value,
        rule: POPULATION_RULE,
    })
}

fn check_area(value: i64) -> Result<u64> {
    u64::try_from(value)
        .ok()
        .filter(|area| *area > 0)
        .ok_or(CountryError::InvalidRange {
            field: Field::Area,
            value,
            rule: AREA_RULE,
        })
}

fn require_positive_area(area: u64) -> Result<u64> {
    if area == 0 {
        return Err(CountryError::InvalidRange {
            field: Field::Area,
            value: 0,
            rule: AREA_RULE,
        });
    }
    Ok(area)
}
