//! # Relevance judgments
use crate::data::retrieval::DocumentId;
use crate::data::sorted::{Keyed, SortedList};

/// A document judged relevant for a query.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RelevantDocument {
    /// The document.
    pub document: DocumentId,
    /// Graded relevance, higher is more relevant. Zero is not relevant.
    pub level: u32,
}

impl Keyed for RelevantDocument {
    type Key = DocumentId;

    fn key(&self) -> Self::Key {
        self.document
    }
}

/// All relevant documents of one query.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct RelevanceJudgment {
    /// Negative identifier of the query.
    pub query: DocumentId,
    /// Relevant documents with their level.
    pub relevant: SortedList<RelevantDocument>,
}

impl RelevanceJudgment {
    /// Judgment without relevant documents.
    #[must_use]
    pub fn new(query: DocumentId) -> Self {
        Self { query, relevant: SortedList::new() }
    }

    /// Relevance level of a document, zero if it was not judged relevant.
    #[must_use]
    pub fn level(&self, document: DocumentId) -> u32 {
        self.relevant.lookup(document).map_or(0, |entry| entry.level)
    }
}

impl Keyed for RelevanceJudgment {
    type Key = DocumentId;

    fn key(&self) -> Self::Key {
        self.query
    }
}

/// Judgments of all queries.
pub type RelevanceTable = SortedList<RelevanceJudgment>;
