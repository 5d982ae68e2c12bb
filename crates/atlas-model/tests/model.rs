//! Tests for atlas-model types.

use atlas_model::{ContinentCounts, Country, CountryError, Field, Filter, Statistics};

fn chile() -> Country {
    Country {
        name: "Chile".to_string(),
        population: 19_000_000,
        area: 756_102,
        continent: "America".to_string(),
    }
}

#[test]
fn error_messages_name_the_field() {
    let empty = CountryError::EmptyField {
        field: Field::Continent,
    };
    assert_eq!(empty.to_string(), "el campo continente no puede estar vacío");

    let range = CountryError::InvalidRange {
        field: Field::Area,
        value: 0,
        rule: "debe ser > 0",
    };
    assert!(range.to_string().contains("superficie"));
    assert_eq!(range.field(), Some(Field::Area));

    let missing = CountryError::NotFound("Narnia".to_string());
    assert_eq!(missing.to_string(), "país no encontrado: Narnia");
    assert_eq!(CountryError::InvertedRange { min: 2, max: 1 }.field(), None);
}

#[test]
fn country_serializes() {
    let json = serde_json::to_string(&chile()).expect("serialize country");
    let round: Country = serde_json::from_str(&json).expect("deserialize country");
    assert_eq!(round, chile());
}

#[test]
fn statistics_serialize_with_ordered_counts() {
    let mut by_continent = ContinentCounts::new();
    by_continent.increment("America");
    let stats = Statistics {
        count: 1,
        largest: Some(chile()),
        smallest: Some(chile()),
        average_population: 19_000_000.0,
        average_area: 756_102.0,
        by_continent,
    };
    let value = serde_json::to_value(&stats).expect("serialize statistics");
    assert_eq!(value["count"], 1);
    assert_eq!(value["largest"]["name"], "Chile");
    assert_eq!(value["by_continent"][0][0], "America");
    assert_eq!(value["by_continent"][0][1], 1);
    assert_eq!(
        serde_json::to_string(&stats.by_continent).expect("serialize counts"),
        r#"[["America",1]]"#
    );
}

#[test]
fn filter_serializes_with_kind_tag() {
    let filter = Filter::Population {
        min: Some(1_000),
        max: None,
    };
    let value = serde_json::to_value(&filter).expect("serialize filter");
    assert_eq!(value["kind"], "population");
    assert_eq!(value["min"], 1_000);
}
