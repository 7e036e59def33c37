use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::chunker::ChunkRecord;
use crate::db;
use crate::error::{Error, Result};
use crate::parser::ChangeRecord;

const CHANGE_COLUMNS: &[&str] = &[
    "patch",
    "build",
    "date",
    "section",
    "change_type",
    "previous",
    "now",
    "full_text",
];

const CHUNK_COLUMNS: &[&str] = &["chunk_id", "version", "build", "date", "chunk_text", "word_count"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
    Sqlite,
}

impl Format {
    /// Picked from the extension; unknown or missing extensions are CSV.
    pub fn from_path(path: &Path) -> Format {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Format::Json,
            Some("sqlite") | Some("sqlite3") | Some("db") => Format::Sqlite,
            _ => Format::Csv,
        }
    }
}

pub fn write_changes(path: &Path, records: &[ChangeRecord]) -> Result<()> {
    match Format::from_path(path) {
        Format::Sqlite => {
            let conn = open_db(path)?;
            db::save_changes(&conn, records)?;
            Ok(())
        }
        format => write_rows(path, format, CHANGE_COLUMNS, records),
    }
}

pub fn write_chunks(path: &Path, chunks: &[ChunkRecord]) -> Result<()> {
    match Format::from_path(path) {
        Format::Sqlite => {
            let conn = open_db(path)?;
            db::save_chunks(&conn, chunks)?;
            Ok(())
        }
        format => write_rows(path, format, CHUNK_COLUMNS, chunks),
    }
}

fn open_db(path: &Path) -> Result<rusqlite::Connection> {
    ensure_parent(path)?;
    let conn = db::connect(path)?;
    db::init_schema(&conn)?;
    Ok(conn)
}

// `columns` must match the serialized field names of `T`; it is only used
// for the header of an empty CSV, where serde never sees a row.
fn write_rows<T: Serialize>(
    path: &Path,
    format: Format,
    columns: &[&str],
    rows: &[T],
) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|source| Error::Output {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        Format::Json => {
            let mut out = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut out, rows)?;
            out.write_all(b"\n")
                .and_then(|_| out.flush())
                .map_err(|source| Error::Output {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
        _ => {
            let mut wtr = csv::Writer::from_writer(file);
            if rows.is_empty() {
                wtr.write_record(columns)?;
            }
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush().map_err(|source| Error::Output {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|source| Error::Output {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
