use std::path::Path;

use crate::chunker::PatchDocument;
use crate::error::{Error, Result};

/// Read a patch-notes file (HTML or plain text, tags are not stripped) as
/// trimmed, non-empty lines.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize_lines(&text))
}

// Everything a Python `str.splitlines()` treats as a line end. A `\r\n`
// pair leaves an empty piece, which the blank filter drops.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

pub fn normalize_lines(text: &str) -> Vec<String> {
    text.split(LINE_BREAKS)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load a JSON array of patch documents.
pub fn read_documents(path: &Path) -> Result<Vec<PatchDocument>> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| Error::InvalidDocuments {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_dropped_and_trimmed() {
        let lines = normalize_lines("  Bug Fixes \r\n\r\n\t\nFixed a crash.  \n");
        assert_eq!(lines, vec!["Bug Fixes", "Fixed a crash."]);
    }

    #[test]
    fn carriage_return_only_line_ends() {
        let lines = normalize_lines("Bug Fixes\rPrevious: 1\rNow: 2\r");
        assert_eq!(lines, vec!["Bug Fixes", "Previous: 1", "Now: 2"]);

        let records = crate::parser::parse(&lines);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].change_type, crate::parser::notes::ChangeType::Comparison);
        assert_eq!(records[0].section, Some(crate::parser::sections::Section::BugFixes));
    }

    #[test]
    fn unicode_and_control_line_ends() {
        let lines = normalize_lines("Skills\u{2028}Passives\u{2029}a\u{85}b\u{0c}c\u{0b}d\u{1c}e\u{1d}f\u{1e}g");
        assert_eq!(lines, vec!["Skills", "Passives", "a", "b", "c", "d", "e", "f", "g"]);
    }

    #[test]
    fn empty_text() {
        assert!(normalize_lines("").is_empty());
        assert!(normalize_lines("\n \n\t").is_empty());
    }

    #[test]
    fn missing_file_is_input_unavailable() {
        let err = read_lines(Path::new("tests/fixtures/does-not-exist.html")).unwrap_err();
        assert!(matches!(err, Error::InputUnavailable { .. }));
        assert!(err.to_string().contains("does-not-exist.html"));
    }

    #[test]
    fn documents_tolerate_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patches.json");
        std::fs::write(
            &path,
            r#"[
                {"version": "2.5.3", "build": "70356", "date": "January 28, 2026", "content": "A. B."},
                {"version": "2.5.2", "extra": 1},
                {"content": "Only text."}
            ]"#,
        )
        .unwrap();

        let docs = read_documents(&path).unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].version.as_deref(), Some("2.5.3"));
        assert_eq!(docs[1].content, "");
        assert_eq!(docs[2].version, None);
        assert_eq!(docs[2].date, None);
    }

    #[test]
    fn documents_not_an_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patches.json");
        std::fs::write(&path, r#"{"content": "x"}"#).unwrap();
        let err = read_documents(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidDocuments { .. }));
    }
}
