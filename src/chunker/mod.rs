pub mod sentences;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use sentences::{split_sentences, word_count};

pub const DEFAULT_MAX_WORDS: usize = 400;

/// Free-text content of one patch plus the metadata copied onto its chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchDocument {
    #[serde(default, deserialize_with = "loose_string")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub build: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "loose_content")]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkRecord {
    pub chunk_id: usize,
    pub version: Option<String>,
    pub build: Option<String>,
    pub date: Option<String>,
    pub chunk_text: String,
    pub word_count: usize,
}

struct Passage {
    text: String,
    word_count: usize,
}

pub fn chunk(documents: &[PatchDocument], max_words: usize) -> Vec<ChunkRecord> {
    let chunks = chunk_batch(documents, max_words, 0);
    info!(
        documents = documents.len(),
        chunks = chunks.len(),
        max_words,
        "chunked documents"
    );
    chunks
}

/// Chunk a slice of documents, numbering from `first_id`. Callers feeding
/// consecutive batches pass the running output length to keep ids unique.
pub fn chunk_batch(
    documents: &[PatchDocument],
    max_words: usize,
    first_id: usize,
) -> Vec<ChunkRecord> {
    let grouped = group_documents(documents, max_words);

    // ids are assigned here, after any parallel grouping, in document order
    let mut chunks = Vec::new();
    for (doc, passages) in documents.iter().zip(grouped) {
        for passage in passages {
            chunks.push(ChunkRecord {
                chunk_id: first_id + chunks.len(),
                version: doc.version.clone(),
                build: doc.build.clone(),
                date: doc.date.clone(),
                chunk_text: passage.text,
                word_count: passage.word_count,
            });
        }
    }
    chunks
}

#[cfg(feature = "rayon")]
fn group_documents(documents: &[PatchDocument], max_words: usize) -> Vec<Vec<Passage>> {
    documents
        .par_iter()
        .map(|doc| group_sentences(&doc.content, max_words))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn group_documents(documents: &[PatchDocument], max_words: usize) -> Vec<Vec<Passage>> {
    documents
        .iter()
        .map(|doc| group_sentences(&doc.content, max_words))
        .collect()
}

/// Greedy sentence packing. A sentence is never split, so one longer than
/// `max_words` ends up alone in its own passage.
fn group_sentences(content: &str, max_words: usize) -> Vec<Passage> {
    let mut passages = Vec::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut pending_words = 0;

    for sentence in split_sentences(content) {
        let words = word_count(sentence);
        if pending_words + words > max_words && !pending.is_empty() {
            passages.push(Passage {
                text: pending.join(" "),
                word_count: pending_words,
            });
            pending.clear();
            pending_words = 0;
        }
        if words > max_words {
            debug!(words, max_words, "sentence exceeds word budget");
        }
        pending.push(sentence);
        pending_words += words;
    }

    if !pending.is_empty() {
        passages.push(Passage {
            text: pending.join(" "),
            word_count: pending_words,
        });
    }
    passages
}

// Document stores are not strict about types: builds often come through as
// numbers and absent values as null.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn loose_content<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_string(deserializer)?.unwrap_or_default())
}
