use serde::Serialize;
use tracing::{debug, info};

use super::header::{parse_header, PatchHeader};
use super::sections::Section;

/// Sticky metadata applied to every record emitted after it is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchContext {
    pub patch_id: Option<String>,
    pub build_id: Option<String>,
    pub date: Option<String>,
    pub section: Option<Section>,
}

impl PatchContext {
    fn enter_patch(&mut self, header: PatchHeader) {
        self.patch_id = Some(header.version);
        self.build_id = Some(header.build);
        self.date = Some(header.date);
        self.section = None;
    }

    fn single(&self, line: &str) -> ChangeRecord {
        ChangeRecord {
            patch_id: self.patch_id.clone(),
            build_id: self.build_id.clone(),
            date: self.date.clone(),
            section: self.section,
            change_type: ChangeType::Single,
            previous: None,
            now: None,
            full_text: line.to_string(),
        }
    }

    fn comparison(&self, previous: String, now: String) -> ChangeRecord {
        ChangeRecord {
            patch_id: self.patch_id.clone(),
            build_id: self.build_id.clone(),
            date: self.date.clone(),
            section: self.section,
            change_type: ChangeType::Comparison,
            full_text: format!("Changed from {} to {}", previous, now),
            previous: Some(previous),
            now: Some(now),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Single,
    Comparison,
}

impl ChangeType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeType::Single => "single",
            ChangeType::Comparison => "comparison",
        }
    }
}

/// One row of parsed patch notes. Field order is the tabular column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    #[serde(rename = "patch")]
    pub patch_id: Option<String>,
    #[serde(rename = "build")]
    pub build_id: Option<String>,
    pub date: Option<String>,
    pub section: Option<Section>,
    pub change_type: ChangeType,
    pub previous: Option<String>,
    pub now: Option<String>,
    pub full_text: String,
}

/// Single pass over trimmed lines: headers and section labels update the
/// context, a "Previous" line directly followed by a "Now" line merges into
/// one comparison record, everything else is a single record.
pub fn parse<S: AsRef<str>>(lines: &[S]) -> Vec<ChangeRecord> {
    let mut ctx = PatchContext::default();
    let mut records = Vec::with_capacity(lines.len());
    let mut patches = 0usize;
    let mut comparisons = 0usize;

    let mut lines = lines
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty())
        .peekable();

    while let Some(line) = lines.next() {
        if let Some(header) = parse_header(line) {
            debug!(version = %header.version, build = %header.build, date = %header.date, "patch header");
            ctx.enter_patch(header);
            patches += 1;
            continue;
        }

        if let Some(section) = Section::from_label(line) {
            ctx.section = Some(section);
            continue;
        }

        if line.starts_with("Previous") {
            // A lone "Previous" line falls through and the next line is
            // left for the following iteration.
            if let Some(next) = lines.next_if(|next| next.starts_with("Now")) {
                let previous = strip_label(line, "Previous:");
                let now = strip_label(next, "Now:");
                records.push(ctx.comparison(previous, now));
                comparisons += 1;
                continue;
            }
        }

        records.push(ctx.single(line));
    }

    info!(
        records = records.len(),
        comparisons,
        patches,
        "parsed patch notes"
    );
    records
}

// Removes every occurrence of the exact label, then trims. Detection only
// checks the bare word, so "Previously 10%" keeps its prefix here.
fn strip_label(line: &str, label: &str) -> String {
    line.replace(label, "").trim().to_string()
}
