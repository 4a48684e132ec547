//! Factgraph Storage Layer
//!
//! Implements the [`ClaimSource`] trait on top of SQLite.
//!
//! # Architecture
//!
//! - One `claims` table: id, owner, text, creation time
//! - Analysis results kept as JSON text, filled in once analysis completes
//! - Reads never fail on a bad analysis payload; the record comes back unanalysed
//!
//! # Examples
//!
//! ```
//! use factgraph_domain::{ClaimRecord, ClaimSource};
//! use factgraph_store::SqliteClaimStore;
//!
//! let mut store = SqliteClaimStore::new(":memory:").unwrap();
//! store.insert_claim(&ClaimRecord::new("c1", "The sky is green").with_user("ada")).unwrap();
//!
//! let records = store.list_claims_for_user("ada", 100).unwrap();
//! assert_eq!(records.len(), 1);
//! ```

#![warn(missing_docs)]

use factgraph_domain::{AnalysisResult, ClaimRecord, ClaimSource};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Claim not found
    #[error("Claim not found: {0}")]
    NotFound(String),

    /// Analysis result could not be encoded
    #[error("Invalid data: {0}")]
    InvalidData(#[from] serde_json::Error),

    /// A claim with this id already exists
    #[error("Duplicate claim: {0}")]
    Duplicate(String),
}

/// Outcome of a bulk import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records written
    pub inserted: usize,

    /// Records skipped because their id already existed
    pub duplicates: usize,
}

/// SQLite-backed claim record store
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own store instance.
pub struct SqliteClaimStore {
    conn: Connection,
}

const SELECT_COLUMNS: &str = "SELECT id, user_id, text, created_at, analysis_json FROM claims";

impl SqliteClaimStore {
    /// Open (or create) a store at `path`
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    /// Store a new claim record
    ///
    /// # Errors
    ///
    /// [`StoreError::Duplicate`] if a record with the same id exists.
    pub fn insert_claim(&mut self, record: &ClaimRecord) -> Result<(), StoreError> {
        let exists: bool = self
            .conn
            .query_row("SELECT 1 FROM claims WHERE id = ?1", params![&record.id], |_| Ok(true))
            .optional()?
            .unwrap_or(false);

        if exists {
            return Err(StoreError::Duplicate(record.id.clone()));
        }

        insert(&self.conn, record)?;
        Ok(())
    }

    /// Store many records in one transaction, skipping ids that already exist
    pub fn import_claims(&mut self, records: &[ClaimRecord]) -> Result<ImportSummary, StoreError> {
        let tx = self.conn.transaction()?;
        let mut summary = ImportSummary::default();

        for record in records {
            if insert(&tx, record)? == 0 {
                tracing::warn!(id = %record.id, "Skipping duplicate claim during import");
                summary.duplicates += 1;
            } else {
                summary.inserted += 1;
            }
        }

        tx.commit()?;
        tracing::debug!(
            inserted = summary.inserted,
            duplicates = summary.duplicates,
            "Imported claims"
        );
        Ok(summary)
    }

    /// Attach (or replace) the analysis result of a claim
    pub fn set_analysis(&mut self, id: &str, analysis: &AnalysisResult) -> Result<(), StoreError> {
        let json = serde_json::to_string(analysis)?;
        let updated = self.conn.execute(
            "UPDATE claims SET analysis_json = ?1 WHERE id = ?2",
            params![json, id],
        )?;

        if updated == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Fetch one claim record
    pub fn get_claim(&self, id: &str) -> Result<Option<ClaimRecord>, StoreError> {
        let row = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                StoredRow::from_row,
            )
            .optional()?;

        Ok(row.map(StoredRow::into_record))
    }

    /// Delete a claim record; returns whether it existed
    pub fn delete_claim(&mut self, id: &str) -> Result<bool, StoreError> {
        let deleted = self.conn.execute("DELETE FROM claims WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    /// Number of stored claims across all users
    pub fn count_claims(&self) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM claims", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl ClaimSource for SqliteClaimStore {
    type Error = StoreError;

    /// Most recent claims first
    fn list_claims_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<ClaimRecord>, Self::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC LIMIT ?2"
        ))?;

        let rows = stmt
            .query_map(params![user_id, limit as i64], StoredRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows.into_iter().map(StoredRow::into_record).collect())
    }
}

/// Returns the number of rows written (0 when the id already exists)
fn insert(conn: &Connection, record: &ClaimRecord) -> Result<usize, StoreError> {
    let analysis = record
        .analysis_result
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    let written = conn.execute(
        "INSERT OR IGNORE INTO claims (id, user_id, text, created_at, analysis_json)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            &record.id,
            &record.user_id,
            &record.text,
            i64::try_from(record.created_at).unwrap_or(i64::MAX),
            analysis,
        ],
    )?;
    Ok(written)
}

/// A claims row before its analysis JSON is decoded
struct StoredRow {
    id: String,
    user_id: Option<String>,
    text: String,
    created_at: i64,
    analysis_json: Option<String>,
}

impl StoredRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            text: row.get(2)?,
            created_at: row.get(3)?,
            analysis_json: row.get(4)?,
        })
    }

    fn into_record(self) -> ClaimRecord {
        let analysis_result = self.analysis_json.and_then(|json| {
            serde_json::from_str::<AnalysisResult>(&json)
                .map_err(|e| tracing::warn!(id = %self.id, error = %e, "Ignoring malformed analysis result"))
                .ok()
        });

        ClaimRecord {
            id: self.id,
            user_id: self.user_id,
            text: self.text,
            created_at: self.created_at.max(0) as u64,
            analysis_result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_analysis_is_dropped() {
        let mut store = SqliteClaimStore::new(":memory:").unwrap();
        store.insert_claim(&ClaimRecord::new("c1", "claim").with_user("u")).unwrap();
        store
            .conn
            .execute("UPDATE claims SET analysis_json = '{not json' WHERE id = 'c1'", [])
            .unwrap();

        let record = store.get_claim("c1").unwrap().unwrap();
        assert_eq!(record.text, "claim");
        assert!(record.analysis_result.is_none());
    }

    #[test]
    fn test_oversized_timestamp_saturates() {
        let mut store = SqliteClaimStore::new(":memory:").unwrap();
        let mut newest = ClaimRecord::new("far", "far future").with_user("u");
        newest.created_at = u64::MAX;
        let mut older = ClaimRecord::new("now", "present").with_user("u");
        older.created_at = 5;
        store.insert_claim(&newest).unwrap();
        store.insert_claim(&older).unwrap();

        let records = store.list_claims_for_user("u", 10).unwrap();
        assert_eq!(records[0].id, "far");
        assert_eq!(records[0].created_at, i64::MAX as u64);
        assert_eq!(records[1].id, "now");
    }

    #[test]
    fn test_negative_timestamp_clamped() {
        let store = SqliteClaimStore::new(":memory:").unwrap();
        store
            .conn
            .execute(
                "INSERT INTO claims (id, user_id, text, created_at) VALUES ('c1', 'u', 'old', -5)",
                [],
            )
            .unwrap();

        assert_eq!(store.get_claim("c1").unwrap().unwrap().created_at, 0);
    }
}
