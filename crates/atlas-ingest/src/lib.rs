//! Persistence for the country collection.
//!
//! The data file is a UTF-8 CSV with the header
//! `nombre,poblacion,superficie,continente` and one row per record.
//!
//! - Loading validates every row and skips the ones that fail, reporting
//!   them in a [`LoadReport`] instead of failing the whole load.
//! - Saving re-validates every record, writes a temp file and renames it
//!   over the target, so a crash never leaves a half-written file.
//! - [`Session`] ties a loaded collection to its path and saves after each
//!   successful mutation.

mod csv_file;
mod error;
mod session;

pub use csv_file::{HEADER, LoadReport, SkippedRow, load_countries, save_countries};
pub use error::{IngestError, Result, SessionError, SkipReason};
pub use session::Session;
