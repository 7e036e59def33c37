use std::path::Path;

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::chunker::ChunkRecord;
use crate::error::Result;
use crate::parser::ChangeRecord;

pub fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS changes (
            id           INTEGER PRIMARY KEY,
            patch        TEXT,
            build        TEXT,
            date         TEXT,
            released_on  TEXT,
            section      TEXT,
            change_type  TEXT NOT NULL CHECK(change_type IN ('single','comparison')),
            previous     TEXT,
            now          TEXT,
            full_text    TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_changes_patch ON changes(patch);

        CREATE TABLE IF NOT EXISTS chunks (
            chunk_id     INTEGER PRIMARY KEY,
            version      TEXT,
            build        TEXT,
            date         TEXT,
            chunk_text   TEXT NOT NULL,
            word_count   INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_chunks_version ON chunks(version);
        ",
    )?;
    Ok(())
}

/// Date labels look like "January 28, 2026"; anything else is left unparsed.
pub fn released_on(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%B %d, %Y").ok()
}

// ── Changes ──

pub fn save_changes(conn: &Connection, rows: &[ChangeRecord]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        tx.execute("DELETE FROM changes", [])?;
        let mut stmt = tx.prepare(
            "INSERT INTO changes
             (id, patch, build, date, released_on, section, change_type, previous, now, full_text)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;
        for (i, r) in rows.iter().enumerate() {
            let released = r.date.as_deref().and_then(released_on).map(|d| d.to_string());
            count += stmt.execute(rusqlite::params![
                i as i64,
                r.patch_id,
                r.build_id,
                r.date,
                released,
                r.section.map(|s| s.label()),
                r.change_type.as_str(),
                r.previous,
                r.now,
                r.full_text,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

// ── Chunks ──

pub fn save_chunks(conn: &Connection, rows: &[ChunkRecord]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        tx.execute("DELETE FROM chunks", [])?;
        let mut stmt = tx.prepare(
            "INSERT INTO chunks (chunk_id, version, build, date, chunk_text, word_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for r in rows {
            count += stmt.execute(rusqlite::params![
                r.chunk_id as i64,
                r.version,
                r.build,
                r.date,
                r.chunk_text,
                r.word_count as i64,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}
