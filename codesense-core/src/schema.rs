/// DDL to create the schema_version tracking table.
///
/// Applied by every `migrate` call before the version is read; `IF NOT EXISTS` keeps it
/// safe to repeat.
pub const SCHEMA_VERSION_DDL: &str = "
    CREATE TABLE IF NOT EXISTS schema_version (
        version INTEGER NOT NULL
    ) STRICT;
";

/// DDL for the v1 handoff schema.
///
/// A single `handoff` table of string slots. The producer upserts
/// `codeReviewResult` and `originalCode`; the viewer only selects.
pub const SCHEMA_V1_SQL: &str = "
    CREATE TABLE IF NOT EXISTS handoff (
        key         TEXT    PRIMARY KEY,
        value       TEXT,
        written_at  INTEGER NOT NULL DEFAULT (unixepoch())
    ) STRICT;
";

/// Ordered migrations; entry `i` takes the database to version `i + 1`.
const MIGRATIONS: &[&str] = &[SCHEMA_V1_SQL];

/// Schema version a fully migrated handoff database reports.
pub const SCHEMA_VERSION: i64 = MIGRATIONS.len() as i64;

/// Creates or upgrades the handoff tables. Used by producers that write the
/// slots; the viewer opens the database read-only and never calls this.
///
/// The version check and every pending migration run in one `IMMEDIATE`
/// transaction, so two producers opening the same file cannot both apply a
/// step.
///
/// # Errors
///
/// Returns `rusqlite::Error` if the DDL fails or the version row cannot be read.
pub fn migrate(db: &mut rusqlite::Connection) -> rusqlite::Result<()> {
    db.execute_batch(SCHEMA_VERSION_DDL)?;

    let tx = db.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
    let applied: i64 =
        tx.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    for (version, sql) in (1..).zip(MIGRATIONS) {
        if version <= applied {
            continue;
        }
        tx.execute_batch(sql)?;
        tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    }
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrate_is_idempotent() {
        let mut db = rusqlite::Connection::open_in_memory().unwrap();
        migrate(&mut db).unwrap();
        migrate(&mut db).unwrap();
        let rows: i64 = db
            .query_row("SELECT COUNT(*) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
        let version: i64 = db
            .query_row("SELECT MAX(version) FROM schema_version", [], |r| r.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn handoff_slots_are_keyed() {
        let mut db = rusqlite::Connection::open_in_memory().unwrap();
        migrate(&mut db).unwrap();
        db.execute("INSERT INTO handoff (key, value) VALUES ('k', 'a')", []).unwrap();
        let dup = db.execute("INSERT INTO handoff (key, value) VALUES ('k', 'b')", []);
        assert!(dup.is_err(), "key must be unique");
    }
}
