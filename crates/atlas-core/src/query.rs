//! Search, filter and sort over a slice of records.
//!
//! Every function returns references in collection order (or sort order) and
//! never mutates its input.

use atlas_model::query::within_bounds;
use atlas_model::{Country, Filter, Result, SortField};

/// Case-insensitive substring match on the name. An empty pattern matches
/// everything.
pub fn search_by_name<'a>(countries: &'a [Country], pattern: &str) -> Vec<&'a Country> {
    let pattern = pattern.trim().to_lowercase();
    countries
        .iter()
        .filter(|country| country.name_key().contains(&pattern))
        .collect()
}

/// Case-insensitive exact match on the continent.
pub fn filter_by_continent<'a>(countries: &'a [Country], continent: &str) -> Vec<&'a Country> {
    let key = continent.trim().to_lowercase();
    countries
        .iter()
        .filter(|country| country.continent_key() == key)
        .collect()
}

pub fn filter_by_population_range(
    countries: &[Country],
    min: Option<u64>,
    max: Option<u64>,
) -> Vec<&Country> {
    countries
        .iter()
        .filter(|country| within_bounds(country.population, min, max))
        .collect()
}

pub fn filter_by_area_range(
    countries: &[Country],
    min: Option<u64>,
    max: Option<u64>,
) -> Vec<&Country> {
    countries
        .iter()
        .filter(|country| within_bounds(country.area, min, max))
        .collect()
}

/// Run a [`Filter`], rejecting inverted ranges first.
pub fn apply_filter<'a>(countries: &'a [Country], filter: &Filter) -> Result<Vec<&'a Country>> {
    filter.validate()?;
    let selected = match filter {
        Filter::Continent { name } => filter_by_continent(countries, name),
        Filter::Population { min, max } => filter_by_population_range(countries, *min, *max),
        Filter::Area { min, max } => filter_by_area_range(countries, *min, *max),
    };
    Ok(selected)
}

/// Stable sort by `field`. Equal keys keep their original relative order in
/// both directions.
pub fn sort(countries: &[Country], field: SortField, descending: bool) -> Vec<&Country> {
    let mut sorted: Vec<&Country> = countries.iter().collect();
    sorted.sort_by(|left, right| {
        let ordering = match field {
            SortField::Name => left.name.cmp(&right.name),
            SortField::Population => left.population.cmp(&right.population),
            SortField::Area => left.area.cmp(&right.area),
        };
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(name: &str, population: u64, area: u64, continent: &str) -> Country {
        Country {
            name: name.to_string(),
            population,
            area,
            continent: continent.to_string(),
        }
    }

    fn sample() -> Vec<Country> {
        vec![
            country("Uruguay", 500, 176_215, "America"),
            country("Portugal", 2_000, 92_212, "Europa"),
            country("Argentina", 9_000, 2_780_400, "America"),
        ]
    }

    fn names(countries: &[&Country]) -> Vec<String> {
        countries.iter().map(|country| country.name.clone()).collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let countries = sample();
        assert_eq!(names(&search_by_name(&countries, "  GUA ")), vec!["Uruguay"]);
        assert_eq!(
            names(&search_by_name(&countries, "a")),
            vec!["Uruguay", "Portugal", "Argentina"]
        );
        assert_eq!(search_by_name(&countries, "").len(), 3);
        assert!(search_by_name(&countries, "xyz").is_empty());
    }

    #[test]
    fn continent_filter_is_exact() {
        let countries = sample();
        assert_eq!(
            names(&filter_by_continent(&countries, " AMERICA ")),
            vec!["Uruguay", "Argentina"]
        );
        assert!(filter_by_continent(&countries, "Amer").is_empty());
    }

    #[test]
    fn population_range_is_inclusive() {
        let countries = sample();
        assert_eq!(
            names(&filter_by_population_range(&countries, Some(1_000), Some(5_000))),
            vec!["Portugal"]
        );
        assert_eq!(
            names(&filter_by_population_range(&countries, Some(2_000), Some(9_000))),
            vec!["Portugal", "Argentina"]
        );
        assert_eq!(filter_by_population_range(&countries, None, None).len(), 3);
        assert_eq!(
            names(&filter_by_population_range(&countries, None, Some(500))),
            vec!["Uruguay"]
        );
    }

    #[test]
    fn area_range_with_one_bound() {
        let countries = sample();
        assert_eq!(
            names(&filter_by_area_range(&countries, Some(100_000), None)),
            vec!["Uruguay", "Argentina"]
        );
    }

    #[test]
    fn apply_filter_rejects_inverted_range() {
        let countries = sample();
        let filter = Filter::Area {
            min: Some(10),
            max: Some(1),
        };
        assert!(apply_filter(&countries, &filter).is_err());
        let filter = Filter::Continent {
            name: "europa".to_string(),
        };
        assert_eq!(
            names(&apply_filter(&countries, &filter).expect("filter")),
            vec!["Portugal"]
        );
    }

    #[test]
    fn sort_descending_by_population() {
        let countries = vec![
            country("A", 10, 1, "X"),
            country("B", 30, 1, "X"),
            country("C", 20, 1, "X"),
        ];
        assert_eq!(
            names(&sort(&countries, SortField::Population, true)),
            vec!["B", "C", "A"]
        );
        assert_eq!(
            names(&sort(&countries, SortField::Population, false)),
            vec!["A", "C", "B"]
        );
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let countries = vec![
            country("First", 10, 5, "X"),
            country("Second", 20, 5, "X"),
            country("Third", 10, 5, "X"),
        ];
        assert_eq!(
            names(&sort(&countries, SortField::Area, false)),
            vec!["First", "Second", "Third"]
        );
        assert_eq!(
            names(&sort(&countries, SortField::Area, true)),
            vec!["First", "Second", "Third"]
        );
        assert_eq!(
            names(&sort(&countries, SortField::Population, true)),
            vec!["Second", "First", "Third"]
        );
    }

    #[test]
    fn sort_by_name_does_not_touch_input() {
        let countries = sample();
        assert_eq!(
            names(&sort(&countries, SortField::Name, false)),
            vec!["Argentina", "Portugal", "Uruguay"]
        );
        assert_eq!(countries[0].name, "Uruguay");
    }
}
