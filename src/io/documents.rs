//! # Document and sign files
//!
//! A document file consists of blocks. A block starts with a line holding only the document
//! identifier, followed by `concept weight` lines. A document may appear in several blocks, its
//! weights are then added together.
//!
//! A sign file consists of blocks as well. A block starts with `sign:`, followed by lines that
//! each hold one atomic concept.
use tracing::trace;

use crate::data::retrieval::{ConceptId, Document, DocumentId, DocumentTable, Sign, SignId, SignTable, WeightVector};
use crate::data::sorted::SortedList;
use crate::io::error::{InconsistencyError, ParseError};
use crate::io::{numbered_lines, parse_field};

/// Parse a document file.
///
/// # Arguments
///
/// * `contents`: Text of the file.
/// * `filter`: If given, only documents with an identifier in this list are stored.
///
/// # Errors
///
/// If a line has more than two fields, an entry appears before any document header, or a field
/// is not a number.
pub fn parse(
    contents: &str,
    filter: Option<&SortedList<DocumentId>>,
) -> Result<DocumentTable, ParseError> {
    let mut documents = DocumentTable::new();
    // Document that entries are added to, `None` while skipping a filtered document.
    let mut current = None;
    let mut seen_header = false;

    for file_location in numbered_lines(contents) {
        let (_, line) = file_location;
        match line.split_whitespace().collect::<Vec<_>>()[..] {
            [id] => {
                let id: DocumentId = parse_field(id, "document", file_location)?;
                seen_header = true;
                current = if filter.is_none_or(|filter| filter.contains(id)) {
                    documents.insert_or_fetch(id, || Document::new(id));
                    Some(id)
                } else {
                    trace!(document = id, "skipped by filter");
                    None
                };
            }
            [concept, weight] => {
                if !seen_header {
                    return Err(ParseError::new("entry before the first document", file_location));
                }
                let concept: ConceptId = parse_field(concept, "concept", file_location)?;
                let weight: f64 = parse_field(weight, "weight", file_location)?;

                if let Some(document) = current.and_then(|id| documents.lookup_mut(id)) {
                    document.concepts.accumulate(concept, weight);
                }
            }
            _ => return Err(ParseError::new("expected one or two fields", file_location)),
        }
    }

    Ok(documents)
}

/// Parse a sign file.
///
/// # Errors
///
/// If an atomic concept appears before any sign header, or a field is not an integer.
pub fn parse_signs(contents: &str) -> Result<SignTable, ParseError> {
    let mut signs = SignTable::new();
    let mut current: Option<SignId> = None;

    for file_location in numbered_lines(contents) {
        let (_, line) = file_location;
        match line.split_once(':') {
            Some((id, _)) => {
                let id = parse_field(id.trim(), "sign", file_location)?;
                signs.insert_or_fetch(id, || Sign { id, concepts: SortedList::new() });
                current = Some(id);
            }
            None => {
                let concept: ConceptId = parse_field(line.trim(), "concept", file_location)?;
                let sign = current
                    .and_then(|id| signs.lookup_mut(id))
                    .ok_or_else(|| ParseError::new("concept before the first sign", file_location))?;
                sign.concepts.insert_or_fetch(concept, || concept);
            }
        }
    }

    Ok(signs)
}

/// Replace sign identifiers in document vectors by the concepts they stand for.
///
/// Each concept of a sign receives the full weight of the sign entry.
///
/// # Errors
///
/// If a document refers to a sign that is not defined.
pub fn expand_signs(
    documents: DocumentTable,
    signs: &SignTable,
) -> Result<DocumentTable, InconsistencyError> {
    documents.into_iter()
        .map(|document| {
            let mut concepts = WeightVector::new();
            for entry in document.concepts.iter() {
                let sign = signs.lookup(entry.concept).ok_or_else(|| InconsistencyError::new(
                    format!("document {} refers to undefined sign {}", document.id, entry.concept),
                ))?;
                for &concept in sign.concepts.iter() {
                    concepts.accumulate(concept, entry.weight);
                }
            }

            Ok(Document { id: document.id, concepts })
        })
        .collect()
}
