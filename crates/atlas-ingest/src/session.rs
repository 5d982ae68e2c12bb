//! Lifecycle of one working session over a data file.

use std::path::{Path, PathBuf};

use atlas_core::{CountryStore, RawCountry};
use tracing::{info, warn};

use crate::csv_file::{SkippedRow, load_countries, save_countries};
use crate::error::{Result, SessionError};

/// A collection loaded from a data file.
///
/// Every successful mutation is followed by a full save. If that save fails
/// the change stays in memory, the session is marked dirty, and the next
/// mutation or [`close`](Self::close) tries again.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    store: CountryStore,
    skipped: Vec<SkippedRow>,
    dirty: bool,
}

impl Session {
    /// Load the collection at `path`. A missing file opens an empty session.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let report = load_countries(&path)?;
        if !report.skipped.is_empty() {
            info!(
                path = %path.display(),
                skipped = report.skipped.len(),
                "rows skipped during load"
            );
        }
        Ok(Self {
            path,
            store: report.store,
            skipped: report.skipped,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> &CountryStore {
        &self.store
    }

    /// Rows of the data file that were left out at load time.
    pub fn skipped_rows(&self) -> &[SkippedRow] {
        &self.skipped
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rewrite the whole data file. Returns the number of rows written.
    pub fn save(&mut self) -> Result<usize> {
        let written = save_countries(&self.path, self.store.countries())?;
        self.dirty = false;
        Ok(written)
    }

    /// Add a record from raw text and save.
    pub fn add_from_text(
        &mut self,
        raw: &RawCountry<'_>,
    ) -> std::result::Result<(), SessionError> {
        self.store.add_from_text(raw)?;
        self.commit()
    }

    /// Update population and/or area from raw text and save.
    ///
    /// `None` or blank text leaves that field unchanged.
    pub fn update_from_text(
        &mut self,
        name: &str,
        population: Option<&str>,
        area: Option<&str>,
    ) -> std::result::Result<(), SessionError> {
        self.store.update_from_text(name, population, area)?;
        self.commit()
    }

    fn commit(&mut self) -> std::result::Result<(), SessionError> {
        self.dirty = true;
        self.save()?;
        Ok(())
    }

    /// End the session, saving first if an earlier save failed.
    pub fn close(mut self) -> Result<()> {
        if self.dirty {
            warn!(path = %self.path.display(), "saving pending changes on close");
            self.save()?;
        }
        Ok(())
    }
}
