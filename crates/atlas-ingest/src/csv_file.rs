use std::fs::{self, File};
use std::path::Path;
use std::time::Instant;

use atlas_core::{CountryStore, RawCountry, validate_country};
use atlas_model::{Country, Field};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result, SkipReason};

/// Header row of the data file, in column order.
pub const HEADER: [&str; 4] = [
    Field::Name.column(),
    Field::Population.column(),
    Field::Area.column(),
    Field::Continent.column(),
];

/// A row that did not make it into the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line in the file (the header is line 1).
    pub line: u64,
    pub reason: SkipReason,
}

/// Result of loading a data file.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub store: CountryStore,
    pub skipped: Vec<SkippedRow>,
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_lowercase()
}

/// Column index of each field, matched by header name.
fn column_indexes(headers: &StringRecord) -> [Option<usize>; 4] {
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
    Field::ALL.map(|field| {
        normalized
            .iter()
            .position(|header| header == field.column())
    })
}

fn cell<'r>(record: &'r StringRecord, index: Option<usize>) -> &'r str {
    index.and_then(|idx| record.get(idx)).unwrap_or("")
}

/// Load every valid row of the file at `path`.
///
/// A missing file yields an empty collection. Rows with an empty field, an
/// invalid label, a non-numeric value, a zero area, a name already seen or
/// bytes that are not UTF-8 are skipped and listed in [`LoadReport::skipped`].
pub fn load_countries(path: &Path) -> Result<LoadReport> {
    if !path.exists() {
        info!(path = %path.display(), "data file not found, starting empty");
        return Ok(LoadReport::default());
    }
    let start = Instant::now();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            operation: "open",
            path: path.to_path_buf(),
            source,
        })?;
    let headers = reader
        .headers()
        .map_err(|source| IngestError::Csv {
            operation: "read header of",
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let columns = column_indexes(&headers);
    for (field, index) in Field::ALL.iter().zip(columns) {
        if index.is_none() {
            warn!(path = %path.display(), column = field.column(), "missing column");
        }
    }

    let mut report = LoadReport::default();
    for (idx, record) in reader.records().enumerate() {
        let fallback_line = idx as u64 + 2;
        let record = match record {
            Ok(record) => record,
            Err(error) if matches!(error.kind(), csv::ErrorKind::Utf8 { .. }) => {
                let line = error
                    .position()
                    .map_or(fallback_line, csv::Position::line);
                warn!(path = %path.display(), line, "skipping row with invalid UTF-8");
                report.skipped.push(SkippedRow {
                    line,
                    reason: SkipReason::InvalidUtf8,
                });
                continue;
            }
            Err(source) => {
                return Err(IngestError::Csv {
                    operation: "read",
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let line = record
            .position()
            .map_or(fallback_line, csv::Position::line);
        let raw = RawCountry::new(
            cell(&record, columns[0]),
            cell(&record, columns[1]),
            cell(&record, columns[2]),
            cell(&record, columns[3]),
        );
        let outcome = validate_country(&raw).and_then(|country| report.store.insert(country));
        if let Err(reason) = outcome {
            debug!(line, reason = %reason, "skipping row");
            report.skipped.push(SkippedRow {
                line,
                reason: reason.into(),
            });
        }
    }

    info!(
        path = %path.display(),
        loaded = report.store.len(),
        skipped = report.skipped.len(),
        duration_ms = start.elapsed().as_millis(),
        "load complete"
    );
    Ok(report)
}

/// Write `countries` to `path`, replacing any existing file.
///
/// Each record is validated again; one that no longer passes is left out.
/// Returns the number of rows written.
pub fn save_countries(path: &Path, countries: &[Country]) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| IngestError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("csv.tmp");
    let file = File::create(&temp_path).map_err(|source| IngestError::Io {
        operation: "create",
        path: temp_path.clone(),
        source,
    })?;
    let mut writer = WriterBuilder::new().from_writer(file);
    let csv_error = |source: csv::Error| IngestError::Csv {
        operation: "write",
        path: temp_path.clone(),
        source,
    };

    writer.write_record(HEADER).map_err(csv_error)?;
    let mut written = 0usize;
    for country in countries {
        let population = country.population.to_string();
        let area = country.area.to_string();
        let raw = RawCountry::new(&country.name, &population, &area, &country.continent);
        match validate_country(&raw) {
            Ok(checked) => {
                writer
                    .write_record([
                        checked.name.as_str(),
                        population.as_str(),
                        area.as_str(),
                        checked.continent.as_str(),
                    ])
                    .map_err(csv_error)?;
                written += 1;
            }
            Err(reason) => {
                debug!(name = %country.name, reason = %reason, "omitting record from save");
            }
        }
    }

    let file = writer.into_inner().map_err(|error| IngestError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: error.into_error(),
    })?;
    file.sync_all().map_err(|source| IngestError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source,
    })?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|source| IngestError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), rows = written, "save complete");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_matches_field_columns() {
        assert_eq!(HEADER, ["nombre", "poblacion", "superficie", "continente"]);
    }

    #[test]
    fn header_lookup_ignores_case_and_bom() {
        let headers = StringRecord::from(vec!["\u{feff}Nombre", " CONTINENTE ", "superficie"]);
        assert_eq!(column_indexes(&headers), [Some(0), None, Some(2), Some(1)]);
    }

    #[test]
    fn missing_cells_read_as_empty() {
        let record = StringRecord::from(vec!["Chile"]);
        assert_eq!(cell(&record, Some(0)), "Chile");
        assert_eq!(cell(&record, Some(3)), "");
        assert_eq!(cell(&record, None), "");
    }
}
