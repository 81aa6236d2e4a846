//! SQLite-backed handoff store, read side.
//!
//! The analysis step writes its output into a SQLite database; the viewer
//! opens it read-only, copies the two handoff slots into a [`MemoryStore`] and
//! never touches it again. A database that does not exist yet, or has no
//! `handoff` table, reads as an empty store.

use std::path::Path;
use std::time::Duration;

use rusqlite::OpenFlags;
use tokio_rusqlite::Connection;

use crate::error::HandoffError;
use crate::store::{MemoryStore, ORIGINAL_CODE_KEY, REVIEW_RESULT_KEY};

/// Opens the handoff database at `path` read-only.
///
/// The file must exist; nothing is created.
///
/// # Errors
///
/// [`HandoffError::Open`] if SQLite cannot open the file,
/// [`HandoffError::Storage`] if configuring the connection fails.
pub async fn open_handoff(path: &Path) -> Result<Connection, HandoffError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags).await?;

    conn.call(|db| -> rusqlite::Result<()> {
        // The producer may be mid-write when the viewer starts.
        db.busy_timeout(Duration::from_secs(5))
    })
    .await?;

    tracing::debug!(path = %path.display(), "handoff database opened read-only");
    Ok(conn)
}

/// Copies the review-result and original-code slots into a [`MemoryStore`].
///
/// Slots that are absent or hold SQL `NULL` are left out of the snapshot; a
/// database without a `handoff` table gives an empty snapshot.
///
/// # Errors
///
/// Returns [`HandoffError::Storage`] if a query fails.
pub async fn snapshot(conn: &Connection) -> Result<MemoryStore, HandoffError> {
    let store = conn
        .call(|db| -> rusqlite::Result<MemoryStore> {
            let mut store = MemoryStore::new();
            let has_table: bool = db.query_row(
                "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'handoff')",
                [],
                |r| r.get(0),
            )?;
            if !has_table {
                return Ok(store);
            }

            let mut stmt = db.prepare(
                "SELECT key, value FROM handoff WHERE key IN (?1, ?2) AND value IS NOT NULL",
            )?;
            let rows = stmt.query_map(
                rusqlite::params![REVIEW_RESULT_KEY, ORIGINAL_CODE_KEY],
                |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)),
            )?;
            for row in rows {
                let (key, value) = row?;
                store.insert(key, value);
            }
            Ok(store)
        })
        .await?;
    Ok(store)
}

/// Reads the handoff slots at `path` in one step.
///
/// A missing file is an empty store, not an error, and is not created.
///
/// # Errors
///
/// Same as [`open_handoff`] and [`snapshot`].
pub async fn read_handoff(path: &Path) -> Result<MemoryStore, HandoffError> {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no handoff database");
        return Ok(MemoryStore::new());
    }
    let conn = open_handoff(path).await?;
    snapshot(&conn).await
}
