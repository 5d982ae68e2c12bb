//! Property tests for the normalizer, validator and query engine.

use atlas_core::{
    CountryStore, filter_by_population_range, is_valid_label, normalize_name,
    parse_nonnegative_integer, sort,
};
use atlas_model::{Country, SortField};
use proptest::prelude::*;

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

fn countries_with_populations(populations: &[u64]) -> Vec<Country> {
    populations
        .iter()
        .enumerate()
        .map(|(idx, population)| Country {
            name: format!("C{idx}"),
            population: *population,
            area: 1,
            continent: "X".to_string(),
        })
        .collect()
}

fn index_of(country: &Country) -> usize {
    country.name[1..].parse().expect("generated name")
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in "[A-Za-zÁÉÍÓÚÜÑáéíóúüñ '\\-\t]{0,40}") {
        let once = normalize_name(&text);
        prop_assert_eq!(normalize_name(&once), once.clone());
        prop_assert!(!once.starts_with(' '));
        prop_assert!(!once.ends_with(' '));
        prop_assert!(!once.contains("  "));
    }

    #[test]
    fn normalized_labels_stay_valid(label in "[a-zñáéü]{2,10}( [a-zñáéü]{2,10}){0,3}") {
        prop_assert!(is_valid_label(&label));
        prop_assert!(is_valid_label(&normalize_name(&label)));
    }

    #[test]
    fn labels_with_digits_are_rejected(prefix in "[a-z]{1,10}", digit in 0u8..10, suffix in "[a-z]{0,10}") {
        let label = format!("{prefix}{digit}{suffix}");
        prop_assert!(!is_valid_label(&label));
    }

    #[test]
    fn grouped_integers_parse(value in any::<u64>()) {
        prop_assert_eq!(parse_nonnegative_integer(&group_digits(value, '.')), Some(value));
        prop_assert_eq!(parse_nonnegative_integer(&group_digits(value, ',')), Some(value));
        prop_assert_eq!(parse_nonnegative_integer(&value.to_string()), Some(value));
    }

    #[test]
    fn negative_integers_are_rejected(value in 1u64..u64::MAX) {
        let negative = format!("-{value}");
        prop_assert_eq!(parse_nonnegative_integer(&negative), None);
    }

    #[test]
    fn sort_is_ordered_and_stable(populations in prop::collection::vec(0u64..5, 0..30), descending in any::<bool>()) {
        let countries = countries_with_populations(&populations);
        let sorted = sort(&countries, SortField::Population, descending);
        prop_assert_eq!(sorted.len(), countries.len());
        for pair in sorted.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            if left.population == right.population {
                prop_assert!(index_of(left) < index_of(right));
            } else if descending {
                prop_assert!(left.population > right.population);
            } else {
                prop_assert!(left.population < right.population);
            }
        }
    }

    #[test]
    fn range_filter_selects_exactly_the_matches(
        populations in prop::collection::vec(0u64..1_000, 0..30),
        min in prop::option::of(0u64..1_000),
        max in prop::option::of(0u64..1_000),
    ) {
        let countries = countries_with_populations(&populations);
        let selected = filter_by_population_range(&countries, min, max);
        let expected = populations
            .iter()
            .filter(|p| min.is_none_or(|m| **p >= m) && max.is_none_or(|m| **p <= m))
            .count();
        prop_assert_eq!(selected.len(), expected);
        for pair in selected.windows(2) {
            prop_assert!(index_of(pair[0]) < index_of(pair[1]));
        }
    }

    #[test]
    fn added_names_exist_under_any_case(name in "[a-z]{2,12}", upper in any::<bool>()) {
        let mut store = CountryStore::new();
        store.add(&name, 1, 1, "Europa").expect("valid add");
        let probe = if upper { name.to_uppercase() } else { format!("  {name} ") };
        prop_assert!(store.exists(&probe));
        prop_assert!(store.add(&probe, 2, 2, "Asia").is_err());
        prop_assert_eq!(store.len(), 1);
    }
}
