use crate::chunker::PatchDocument;
use crate::parser::ChangeRecord;

/// Fold consecutive change records of the same patch into one document,
/// `full_text`s joined by a space in source order. Records seen before any
/// patch header form a document with no metadata.
pub fn aggregate(records: &[ChangeRecord]) -> Vec<PatchDocument> {
    let mut documents: Vec<PatchDocument> = Vec::new();
    let mut parts: Vec<&str> = Vec::new();

    for record in records {
        let same_patch = documents.last().is_some_and(|doc| {
            doc.version == record.patch_id && doc.build == record.build_id && doc.date == record.date
        });
        if !same_patch {
            if let Some(doc) = documents.last_mut() {
                doc.content = parts.join(" ");
            }
            parts.clear();
            documents.push(PatchDocument {
                version: record.patch_id.clone(),
                build: record.build_id.clone(),
                date: record.date.clone(),
                content: String::new(),
            });
        }
        parts.push(&record.full_text);
    }

    if let Some(doc) = documents.last_mut() {
        doc.content = parts.join(" ");
    }
    documents
}
