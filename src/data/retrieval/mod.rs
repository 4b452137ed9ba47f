//! # Retrieval data model
//!
//! Documents and queries share one representation: a sparse vector over atomic concepts. Query
//! identifiers are negative.
use crate::data::sorted::{Keyed, SortedList};

pub mod preference;
pub mod ranking;
pub mod relevance;

/// Identifies an atomic concept.
pub type ConceptId = i64;
/// Identifies a document, or a query when negative.
pub type DocumentId = i64;
/// Identifies a sign, a named group of atomic concepts.
pub type SignId = i64;

/// A concept with a weight attached to it.
///
/// Used both for the entries of document vectors and for the concept weights themselves.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConceptWeight {
    /// The concept.
    pub concept: ConceptId,
    /// Its weight.
    pub weight: f64,
}

impl ConceptWeight {
    /// Create a new instance.
    #[must_use]
    pub fn new(concept: ConceptId, weight: f64) -> Self {
        Self { concept, weight }
    }
}

impl Keyed for ConceptWeight {
    type Key = ConceptId;

    fn key(&self) -> Self::Key {
        self.concept
    }
}

/// Sparse vector over concepts.
pub type WeightVector = SortedList<ConceptWeight>;

impl SortedList<ConceptWeight> {
    /// Add a weight to a concept, starting from zero if the concept is not yet present.
    pub fn accumulate(&mut self, concept: ConceptId, weight: f64) {
        self.insert_or_fetch(concept, || ConceptWeight::new(concept, 0.0)).weight += weight;
    }

    /// Weight of a concept, if it has an entry.
    pub fn weight(&self, concept: ConceptId) -> Option<f64> {
        self.lookup(concept).map(|entry| entry.weight)
    }
}

/// Identifier of a query, from its number written with or without sign.
///
/// `None` if the number has no positive counterpart.
#[must_use]
pub fn query_identifier(number: DocumentId) -> Option<DocumentId> {
    number.checked_abs().map(|number| -number)
}

/// A document or query and its concept vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    /// Negative for queries.
    pub id: DocumentId,
    /// Concept weights within this document.
    pub concepts: WeightVector,
}

impl Document {
    /// Document without any concepts.
    #[must_use]
    pub fn new(id: DocumentId) -> Self {
        Self { id, concepts: WeightVector::new() }
    }

    /// Whether this is a query rather than a document.
    #[must_use]
    pub fn is_query(&self) -> bool {
        self.id < 0
    }
}

impl Keyed for Document {
    type Key = DocumentId;

    fn key(&self) -> Self::Key {
        self.id
    }
}

/// All documents and queries, by identifier.
pub type DocumentTable = SortedList<Document>;

/// A named group of atomic concepts.
///
/// Document files may refer to a sign instead of listing the concepts one by one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sign {
    /// Identifier of the sign.
    pub id: SignId,
    /// The concepts it stands for.
    pub concepts: SortedList<ConceptId>,
}

impl Keyed for Sign {
    type Key = SignId;

    fn key(&self) -> Self::Key {
        self.id
    }
}

/// All signs, by identifier.
pub type SignTable = SortedList<Sign>;

/// A retrieval status value of a document for a query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RsvValue {
    /// Negative identifier of the query.
    pub query: DocumentId,
    /// Document that was ranked.
    pub document: DocumentId,
    /// The score.
    pub rsv: f64,
}

#[cfg(test)]
mod test {
    use crate::data::retrieval::{Document, WeightVector, query_identifier};

    #[test]
    fn accumulate() {
        let mut vector = WeightVector::new();
        vector.accumulate(7, 1.0);
        vector.accumulate(3, 0.5);
        vector.accumulate(7, 2.0);

        assert_eq!(vector.len(), 2);
        assert_eq!(vector.weight(7), Some(3.0));
        assert_eq!(vector.weight(3), Some(0.5));
        assert_eq!(vector.weight(4), None);
    }

    #[test]
    fn queries_are_negative() {
        assert!(Document::new(-1).is_query());
        assert!(!Document::new(0).is_query());
    }

    #[test]
    fn query_numbers() {
        assert_eq!(query_identifier(3), Some(-3));
        assert_eq!(query_identifier(-3), Some(-3));
        assert_eq!(query_identifier(i64::MIN), None);
    }
}
