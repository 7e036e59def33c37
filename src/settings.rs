use std::path::PathBuf;

use config::{Config, Environment};
use serde::Deserialize;

use crate::chunker::DEFAULT_MAX_WORDS;

/// Defaults for anything the command line leaves out. Overridable with
/// `PATCH_NOTES_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub max_words: usize,
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_words: DEFAULT_MAX_WORDS,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl Settings {
    pub fn load() -> anyhow::Result<Settings> {
        Self::from_source(Environment::with_prefix("PATCH_NOTES"))
    }

    fn from_source(env: Environment) -> anyhow::Result<Settings> {
        let defaults = Settings::default();
        let settings = Config::builder()
            .set_default("max_words", defaults.max_words as u64)?
            .set_default("data_dir", defaults.data_dir.to_string_lossy().into_owned())?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn raw_notes(&self) -> PathBuf {
        self.data_dir.join("raw/patch_notes/patch_notes.html")
    }

    pub fn changes_csv(&self) -> PathBuf {
        self.data_dir.join("interim/patch_notes/patch_changes.csv")
    }

    pub fn documents_json(&self) -> PathBuf {
        self.data_dir.join("interim/patch_notes/patches_structured.json")
    }

    pub fn chunks_csv(&self) -> PathBuf {
        self.data_dir.join("interim/patch_notes/patch_chunks.csv")
    }
}
