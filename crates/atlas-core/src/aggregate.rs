//! Extrema, averages and grouped counts.

use atlas_model::{ContinentCounts, Country, Statistics};

/// Records with the largest and smallest population.
///
/// Ties go to the first record encountered. Returns `None` for an empty
/// collection.
pub fn extrema_by_population(countries: &[Country]) -> Option<(&Country, &Country)> {
    let (first, rest) = countries.split_first()?;
    let mut largest = first;
    let mut smallest = first;
    for country in rest {
        if country.population > largest.population {
            largest = country;
        }
        if country.population < smallest.population {
            smallest = country;
        }
    }
    Some((largest, smallest))
}

/// Arithmetic mean of population; `0.0` when empty.
pub fn average_population(countries: &[Country]) -> f64 {
    mean(countries.iter().map(|country| country.population))
}

/// Arithmetic mean of area; `0.0` when empty.
pub fn average_area(countries: &[Country]) -> f64 {
    mean(countries.iter().map(|country| country.area))
}

fn mean(values: impl ExactSizeIterator<Item = u64>) -> f64 {
    let count = values.len();
    if count == 0 {
        return 0.0;
    }
    let total: u128 = values.map(u128::from).sum();
    total as f64 / count as f64
}

/// Occurrences of each continent, in order of first appearance.
pub fn count_by_continent(countries: &[Country]) -> ContinentCounts {
    let mut counts = ContinentCounts::new();
    for country in countries {
        counts.increment(&country.continent);
    }
    counts
}

pub fn compute_statistics(countries: &[Country]) -> Statistics {
    let extrema = extrema_by_population(countries);
    Statistics {
        count: countries.len(),
        largest: extrema.map(|(largest, _)| largest.clone()),
        smallest: extrema.map(|(_, smallest)| smallest.clone()),
        average_population: average_population(countries),
        average_area: average_area(countries),
        by_continent: count_by_continent(countries),
    }
}
