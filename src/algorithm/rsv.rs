//! # Retrieval status values
//!
//! Ranking documents against queries with a table of concept weights.
use tracing::info;

use crate::data::retrieval::{Document, DocumentTable, RsvValue, WeightVector};
use crate::data::sorted::union;
use crate::io::error::InconsistencyError;

/// Score of a document for a query.
///
/// Sums the product of the query weight, document weight and concept weight over the concepts
/// the two have in common.
///
/// # Errors
///
/// If a shared concept has no weight.
pub fn rsv(query: &Document, document: &Document, weights: &WeightVector) -> Result<f64, InconsistencyError> {
    union(&query.concepts, &document.concepts)
        .map(|(in_query, in_document)| {
            weights.weight(in_query.concept)
                .map(|weight| in_query.weight * in_document.weight * weight)
                .ok_or_else(|| InconsistencyError::new(format!("concept {} has no weight", in_query.concept)))
        })
        .sum()
}

/// Rank every document against every query.
///
/// # Return value
///
/// The positive scores, by ascending query and then ascending document identifier.
///
/// # Errors
///
/// If a concept shared between a query and a document has no weight.
pub fn rank(documents: &DocumentTable, weights: &WeightVector) -> Result<Vec<RsvValue>, InconsistencyError> {
    let (queries, documents): (Vec<_>, Vec<_>) = documents.iter().partition(|document| document.is_query());
    info!(queries = queries.len(), documents = documents.len(), "ranking");

    let mut values = Vec::new();
    for query in &queries {
        for document in &documents {
            let rsv = rsv(query, document, weights)?;
            if rsv > 0.0 {
                values.push(RsvValue { query: query.id, document: document.id, rsv });
            }
        }
    }

    Ok(values)
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use crate::algorithm::rsv::{rank, rsv};
    use crate::data::retrieval::{ConceptWeight, Document, DocumentTable, RsvValue, WeightVector};

    fn document(id: i64, concepts: &[(i64, f64)]) -> Document {
        let mut document = Document::new(id);
        for &(concept, weight) in concepts {
            document.concepts.accumulate(concept, weight);
        }
        document
    }

    fn weights() -> WeightVector {
        [ConceptWeight::new(1, 2.0), ConceptWeight::new(2, 0.5), ConceptWeight::new(3, 1.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn single() {
        let query = document(-1, &[(1, 1.0), (2, 2.0)]);
        let ranked = document(4, &[(2, 3.0), (3, 1.0), (1, 0.5)]);

        assert_relative_eq!(rsv(&query, &ranked, &weights()).unwrap(), 1.0 * 0.5 * 2.0 + 2.0 * 3.0 * 0.5);
    }

    #[test]
    fn missing_weight() {
        let query = document(-1, &[(7, 1.0)]);
        let shared = document(4, &[(7, 1.0)]);
        let disjoint = document(5, &[(1, 1.0)]);

        assert!(rsv(&query, &shared, &weights()).is_err());
        // Concepts that are not shared don't need a weight
        assert_eq!(rsv(&query, &disjoint, &weights()).ok(), Some(0.0));
    }

    #[test]
    fn only_positive_in_order() {
        let documents = [
            document(-2, &[(1, 1.0)]),
            document(-1, &[(3, 1.0)]),
            document(5, &[(1, 1.0), (3, 2.0)]),
            document(3, &[(1, 1.0)]),
            document(4, &[(2, 1.0)]),
        ].into_iter().collect::<DocumentTable>();

        assert_eq!(rank(&documents, &weights()).unwrap(), vec![
            RsvValue { query: -2, document: 3, rsv: 2.0 },
            RsvValue { query: -2, document: 5, rsv: 2.0 },
            RsvValue { query: -1, document: 5, rsv: 2.0 },
        ]);
    }
}
