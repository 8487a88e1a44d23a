// src/infrastructure/kindle.rs
use crate::application::LookupHistory;
use crate::constants::KINDLE_VOCAB_DB;
use crate::domain::{Language, StoreError};
use chrono::{Local, NaiveDate, TimeZone};
use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Lookup history of a mounted Kindle, stored in `system/vocabulary/vocab.db`.
#[derive(Debug, Clone)]
pub struct KindleLookups {
    db_path: PathBuf,
}

impl KindleLookups {
    /// History of the Kindle mounted at `kindle_dir`
    pub fn new(kindle_dir: impl AsRef<Path>) -> Self {
        Self::from_db(kindle_dir.as_ref().join(KINDLE_VOCAB_DB))
    }

    /// History read straight from a `vocab.db` file
    pub fn from_db(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    fn open(&self) -> Result<Connection, StoreError> {
        if !self.db_path.exists() {
            return Err(StoreError::NotFound(self.db_path.clone()));
        }
        Connection::open_with_flags(&self.db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| self.sqlite_error(source))
    }

    fn sqlite_error(&self, source: rusqlite::Error) -> StoreError {
        StoreError::Sqlite {
            path: self.db_path.clone(),
            source,
        }
    }
}

/// Milliseconds since the epoch of local midnight at the start of `date`,
/// the unit Kindle uses for lookup timestamps.
pub fn start_of_day_millis(date: NaiveDate) -> i64 {
    let midnight = date.and_time(chrono::NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
}

impl LookupHistory for KindleLookups {
    #[instrument(level = "debug", skip(self), fields(db = ?self.db_path))]
    fn lookups(&self, lang: Language, since: NaiveDate) -> Result<Vec<String>, StoreError> {
        let timestamp = start_of_day_millis(since);
        let conn = self.open()?;

        let mut stmt = conn
            .prepare(
                "SELECT stem FROM words \
                 WHERE lang = ?1 AND timestamp >= ?2 \
                 GROUP BY stem \
                 ORDER BY MAX(timestamp) DESC",
            )
            .map_err(|e| self.sqlite_error(e))?;

        let words = stmt
            .query_map(params![lang.code(), timestamp], |row| row.get::<_, String>(0))
            .map_err(|e| self.sqlite_error(e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.sqlite_error(e))?;

        debug!(timestamp, "Queried lookup history");
        info!(count = words.len(), %lang, "Read Kindle lookups");
        Ok(words)
    }
}
