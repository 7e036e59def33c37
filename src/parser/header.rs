use std::sync::LazyLock;

use regex::Regex;

// e.g. "2.5.3 Build #70356 (All Platforms)—January 28, 2026"
// `â€”` is the em-dash as it shows up in HTML saved with the wrong codepage.
static PATCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+\.\d+\.\d+)\s+Build\s+#(\d+).*(?:—|â€”)(.+)").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchHeader {
    pub version: String,
    pub build: String,
    pub date: String,
}

/// Match a patch header line. The date is everything after the last dash
/// separator, kept verbatim.
pub fn parse_header(line: &str) -> Option<PatchHeader> {
    let caps = PATCH_RE.captures(line)?;
    Some(PatchHeader {
        version: caps[1].to_string(),
        build: caps[2].to_string(),
        date: caps[3].to_string(),
    })
}
