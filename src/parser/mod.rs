pub mod header;
pub mod notes;
pub mod sections;

use std::path::Path;

use crate::error::Result;
use crate::input;
pub use notes::{parse, ChangeRecord};

/// Two-step pipeline: file → trimmed lines → change records.
pub fn parse_file(path: &Path) -> Result<Vec<ChangeRecord>> {
    let lines = input::read_lines(path)?;
    Ok(parse(&lines))
}
