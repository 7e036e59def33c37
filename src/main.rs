mod chunker;
mod db;
mod documents;
mod error;
mod input;
mod output;
mod parser;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::info;

use chunker::{ChunkRecord, PatchDocument};
use settings::Settings;

#[derive(Parser)]
#[command(name = "patch_notes", about = "Patch notes → change records → retrieval chunks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse raw patch notes (HTML or text) into change records
    Parse {
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// .csv, .json or .sqlite
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Chunk a JSON array of patch documents into word-bounded passages
    Chunk {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Word budget per chunk (default: PATCH_NOTES_MAX_WORDS or 400)
        #[arg(short = 'w', long)]
        max_words: Option<usize>,
    },
    /// Parse, group per patch and chunk in one pipeline
    Run {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(long)]
        changes: Option<PathBuf>,
        #[arg(long)]
        chunks: Option<PathBuf>,
        #[arg(short = 'w', long)]
        max_words: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { input, output } => {
            let settings = settings_for(input.is_none() || output.is_none())?;
            let input = input.unwrap_or_else(|| settings.raw_notes());
            let output = output.unwrap_or_else(|| settings.changes_csv());

            let records = parser::parse_file(&input)?;
            output::write_changes(&output, &records)?;
            println!("Wrote: {}", output.display());
            println!("Rows: {}", records.len());
        }
        Commands::Chunk {
            input,
            output,
            max_words,
        } => {
            let settings =
                settings_for(input.is_none() || output.is_none() || max_words.is_none())?;
            let input = input.unwrap_or_else(|| settings.documents_json());
            let output = output.unwrap_or_else(|| settings.chunks_csv());
            let max_words = max_words.unwrap_or(settings.max_words);

            let docs = input::read_documents(&input)?;
            let chunks = chunk_with_progress(&docs, max_words);
            output::write_chunks(&output, &chunks)?;
            println!("Wrote: {}", output.display());
            println!("Chunks: {}", chunks.len());
        }
        Commands::Run {
            input,
            changes,
            chunks,
            max_words,
        } => {
            let settings = settings_for(
                input.is_none() || changes.is_none() || chunks.is_none() || max_words.is_none(),
            )?;
            let input = input.unwrap_or_else(|| settings.raw_notes());
            let changes = changes.unwrap_or_else(|| settings.changes_csv());
            let chunks_out = chunks.unwrap_or_else(|| settings.chunks_csv());
            let max_words = max_words.unwrap_or(settings.max_words);

            let records = parser::parse_file(&input)?;
            output::write_changes(&changes, &records)?;
            println!("Wrote: {}", changes.display());
            println!("Rows: {}", records.len());

            let docs = documents::aggregate(&records);
            info!(documents = docs.len(), "grouped change records per patch");
            let chunks = chunk_with_progress(&docs, max_words);
            output::write_chunks(&chunks_out, &chunks)?;
            println!("Wrote: {}", chunks_out.display());
            println!("Chunks: {}", chunks.len());
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}

/// Environment settings are only read when a flag was left out, so a bad
/// `PATCH_NOTES_*` value cannot break a fully specified command.
fn settings_for(needed: bool) -> anyhow::Result<Settings> {
    if !needed {
        return Ok(Settings::default());
    }
    let settings = Settings::load()?;
    info!(?settings, "settings loaded");
    Ok(settings)
}

fn chunk_with_progress(docs: &[PatchDocument], max_words: usize) -> Vec<ChunkRecord> {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("chunking {} documents", docs.len()));
    pb.enable_steady_tick(std::time::Duration::from_millis(120));

    let chunks = chunker::chunk(docs, max_words);
    pb.finish_and_clear();
    chunks
}
