use std::fs;

use atlas_core::CountryStore;
use atlas_ingest::{HEADER, SkipReason, load_countries, save_countries};
use atlas_model::{Country, CountryError, Field};
use tempfile::tempdir;

const SAMPLE: &str = "nombre,poblacion,superficie,continente
Argentina,45.376.763,2780400,América
Chile2,1,1,América
Uruguay,,176215,América
Perú,abc,1285216,América
Atlantida,1,0,Oceano
argentina,1,1,América
  costa   rica ,5000000,51100, américa
";

fn country(name: &str, population: u64, area: u64, continent: &str) -> Country {
    Country {
        name: name.to_string(),
        population,
        area,
        continent: continent.to_string(),
    }
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempdir().unwrap();
    let report = load_countries(&dir.path().join("nope.csv")).unwrap();
    assert!(report.store.is_empty());
    assert!(report.skipped.is_empty());
}

#[test]
fn invalid_rows_are_skipped_with_reasons() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paises.csv");
    fs::write(&path, SAMPLE).unwrap();

    let report = load_countries(&path).unwrap();
    let names: Vec<&str> = report
        .store
        .iter()
        .map(|country| country.name.as_str())
        .collect();
    assert_eq!(names, vec!["Argentina", "Costa Rica"]);

    let argentina = report.store.get("argentina").unwrap();
    assert_eq!(argentina.population, 45_376_763);
    assert_eq!(report.store.get("Costa Rica").unwrap().continent, "América");

    let lines: Vec<u64> = report.skipped.iter().map(|row| row.line).collect();
    assert_eq!(lines, vec![3, 4, 5, 6, 7]);
    assert!(matches!(
        report.skipped[0].reason,
        SkipReason::Record(CountryError::InvalidLabel { .. })
    ));
    assert_eq!(
        report.skipped[1].reason,
        SkipReason::Record(CountryError::EmptyField {
            field: Field::Population
        })
    );
    assert!(matches!(
        report.skipped[2].reason,
        SkipReason::Record(CountryError::InvalidNumber { .. })
    ));
    assert!(matches!(
        report.skipped[3].reason,
        SkipReason::Record(CountryError::InvalidRange {
            field: Field::Area,
            ..
        })
    ));
    assert!(matches!(
        report.skipped[4].reason,
        SkipReason::Record(CountryError::DuplicateName(_))
    ));
}

#[test]
fn row_with_invalid_utf8_is_skipped_and_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paises.csv");
    let mut bytes = b"nombre,poblacion,superficie,continente\n".to_vec();
    bytes.extend_from_slice(b"Peru,33000000,1285216,America\n");
    bytes.extend_from_slice(b"Caf\xe9,1,1,Europa\n");
    bytes.extend_from_slice(b"Bolivia,12000000,1098581,America\n");
    fs::write(&path, bytes).unwrap();

    let report = load_countries(&path).unwrap();
    let names: Vec<&str> = report
        .store
        .iter()
        .map(|country| country.name.as_str())
        .collect();
    assert_eq!(names, vec!["Peru", "Bolivia"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 3);
    assert_eq!(report.skipped[0].reason, SkipReason::InvalidUtf8);
}

#[test]
fn columns_are_found_by_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paises.csv");
    fs::write(
        &path,
        "continente,Superficie,NOMBRE,poblacion\nEuropa,505990,España,47000000\n",
    )
    .unwrap();
    let report = load_countries(&path).unwrap();
    assert_eq!(
        report.store.countries(),
        &[country("España", 47_000_000, 505_990, "Europa")]
    );
}

#[test]
fn missing_column_skips_every_row() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paises.csv");
    fs::write(&path, "nombre,poblacion,superficie\nChile,1,1\n").unwrap();
    let report = load_countries(&path).unwrap();
    assert!(report.store.is_empty());
    assert_eq!(report.skipped.len(), 1);
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("datos").join("paises.csv");
    let countries = vec![
        country("Chile", 19_000_000, 756_102, "América"),
        country("Japón", 125_000_000, 377_975, "Asia"),
        country("Guinea-bissau", 2_000_000, 36_125, "África"),
    ];

    let written = save_countries(&path, &countries).unwrap();
    assert_eq!(written, 3);
    assert!(!path.with_extension("csv.tmp").exists());

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().next().unwrap(), HEADER.join(","));

    let report = load_countries(&path).unwrap();
    assert_eq!(report.store.countries(), countries.as_slice());
    assert!(report.skipped.is_empty());
}

#[test]
fn records_added_through_the_store_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paises.csv");
    let mut store = CountryStore::new();
    assert!(store.add("ßolivia", 1, 1, "América").is_err());
    store.add("  SAN   marino ", 33_600, 61, "europa").unwrap();
    store.add("guinea-BISSAU", 2_000_000, 36_125, "ÁFRICA").unwrap();
    store.add("ñandutí", 1, 1, "américa").unwrap();

    assert_eq!(save_countries(&path, store.countries()).unwrap(), 3);
    let report = load_countries(&path).unwrap();
    assert_eq!(report.store, store);
    assert!(report.skipped.is_empty());
}

#[test]
fn save_omits_records_that_fail_validation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paises.csv");
    let countries = vec![
        country("Chile", 1, 1, "América"),
        country("Nowhere", 1, 0, "Mar"),
        country("R2d2", 1, 1, "Espacio"),
    ];
    assert_eq!(save_countries(&path, &countries).unwrap(), 1);
    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "nombre,poblacion,superficie,continente\nChile,1,1,América\n"
    );
}

#[test]
fn save_replaces_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("paises.csv");
    fs::write(&path, "garbage\n").unwrap();
    save_countries(&path, &[country("Chile", 1, 1, "América")]).unwrap();
    let report = load_countries(&path).unwrap();
    assert_eq!(report.store.len(), 1);
}
