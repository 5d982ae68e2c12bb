//! Persistence error types.

use std::path::PathBuf;

use atlas_model::CountryError;
use thiserror::Error;

/// Failure to read or write the data file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File I/O error.
    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader or writer failed.
    #[error("failed to {operation} csv: {path}")]
    Csv {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Temp file could not be renamed over the target.
    #[error("failed to replace {target_path} with {temp_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("No se pudo {} el archivo {}", verb(operation), path.display()),
            Self::Csv { path, .. } => {
                format!("El archivo {} no es un CSV legible", path.display())
            }
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "No se pudo guardar {}. Revisá el espacio en disco y los permisos.",
                target_path.display()
            ),
        }
    }
}

fn verb(operation: &str) -> &str {
    match operation {
        "read" | "open" => "leer",
        "create directory" => "crear la carpeta de",
        _ => "escribir",
    }
}

/// Failure of a mutation that must be persisted.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The record change itself was rejected; nothing was written.
    #[error(transparent)]
    Record(#[from] CountryError),
    /// The change was applied in memory but could not be saved.
    #[error(transparent)]
    Persist(#[from] IngestError),
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Record(error) => format!("Error: {error}"),
            Self::Persist(error) => error.user_message(),
        }
    }
}

/// Why a row of the data file was left out on load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The row was read but is not a valid record.
    #[error(transparent)]
    Record(#[from] CountryError),
    /// The row contains bytes that are not UTF-8.
    #[error("la fila no es texto UTF-8 válido")]
    InvalidUtf8,
}

pub type Result<T> = std::result::Result<T, IngestError>;
