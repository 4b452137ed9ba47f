//! # Rankings
//!
//! Retrieval status values grouped per query.
use std::cmp::Ordering;

use itertools::Itertools;

use crate::data::retrieval::{DocumentId, RsvValue};
use crate::data::sorted::{Direction, Keyed, SortedList};
use crate::io::error::InconsistencyError;

/// A document with its score for a query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RankedDocument {
    /// The document.
    pub document: DocumentId,
    /// Its score.
    pub rsv: f64,
}

impl Keyed for RankedDocument {
    type Key = DocumentId;

    fn key(&self) -> Self::Key {
        self.document
    }
}

/// All scored documents of one query.
#[derive(Clone, Debug, PartialEq)]
pub struct Ranking {
    /// Negative identifier of the query.
    pub query: DocumentId,
    /// Scores by document identifier.
    pub documents: SortedList<RankedDocument>,
}

impl Ranking {
    /// Documents by decreasing score.
    ///
    /// # Arguments
    ///
    /// * `ties`: Order of documents with the same score, by identifier.
    #[must_use]
    pub fn ordered(&self, ties: Direction) -> Vec<RankedDocument> {
        let mut ordered = self.documents.iter_in(ties).copied().collect::<Vec<_>>();
        // Stable, so ties stay in identifier order
        ordered.sort_by(|left, right| right.rsv.partial_cmp(&left.rsv).unwrap_or(Ordering::Equal));

        ordered
    }
}

impl Keyed for Ranking {
    type Key = DocumentId;

    fn key(&self) -> Self::Key {
        self.query
    }
}

/// Group consecutive values of the same query.
///
/// A document appearing twice for a query keeps its first score.
///
/// # Return value
///
/// One ranking per query, in the order of the values.
///
/// # Errors
///
/// If the values of a query are not consecutive.
pub fn group(values: &[RsvValue]) -> Result<Vec<Ranking>, InconsistencyError> {
    let mut seen = SortedList::<DocumentId>::new();
    let mut rankings = Vec::new();

    for (query, chunk) in &values.iter().chunk_by(|value| value.query) {
        if seen.contains(query) {
            return Err(InconsistencyError::new(format!("values of query {query} are not consecutive")));
        }
        seen.insert_or_fetch(query, || query);

        let documents = chunk
            .map(|value| RankedDocument { document: value.document, rsv: value.rsv })
            .collect();
        rankings.push(Ranking { query, documents });
    }

    Ok(rankings)
}

#[cfg(test)]
mod test {
    use crate::data::retrieval::RsvValue;
    use crate::data::retrieval::ranking::group;
    use crate::data::sorted::Direction;

    fn value(query: i64, document: i64, rsv: f64) -> RsvValue {
        RsvValue { query, document, rsv }
    }

    #[test]
    fn grouped() {
        let rankings = group(&[
            value(-2, 5, 1.0),
            value(-2, 3, 2.0),
            value(-2, 5, 9.0),
            value(-1, 4, 1.0),
        ]).unwrap();

        assert_eq!(rankings.iter().map(|ranking| ranking.query).collect::<Vec<_>>(), vec![-2, -1]);
        let first = &rankings[0];
        assert_eq!(first.documents.len(), 2);
        assert_eq!(first.documents.lookup(5).map(|entry| entry.rsv), Some(1.0));
    }

    #[test]
    fn interleaved() {
        assert!(group(&[value(-1, 1, 1.0), value(-2, 1, 1.0), value(-1, 2, 1.0)]).is_err());
    }

    #[test]
    fn order() {
        let rankings = group(&[
            value(-1, 7, 1.0),
            value(-1, 2, 1.0),
            value(-1, 4, 3.0),
            value(-1, 9, 0.5),
        ]).unwrap();
        let ranking = &rankings[0];

        let ids = |ties| ranking.ordered(ties).iter().map(|entry| entry.document).collect::<Vec<_>>();
        assert_eq!(ids(Direction::Forward), vec![4, 2, 7, 9]);
        assert_eq!(ids(Direction::Backward), vec![4, 7, 2, 9]);
    }
}
