//! # Precision and recall
//!
//! Interpolated precision at fixed recall levels, per query and averaged over all queries.
use tracing::{debug, info};

use crate::data::retrieval::{DocumentId, RsvValue};
use crate::data::retrieval::ranking::{Ranking, group};
use crate::data::retrieval::relevance::{RelevanceJudgment, RelevanceTable};
use crate::data::sorted::{Direction, SortedList, difference};
use crate::io::error::InconsistencyError;

/// Number of recall levels, spaced evenly from zero.
pub const RECALL_LEVELS: usize = 20;

/// How many documents are listed in the per query diagnostics.
const LISTED: usize = 5;

/// Recall of a level.
#[must_use]
pub fn recall_level(level: usize) -> f64 {
    level as f64 / RECALL_LEVELS as f64
}

/// Position of a document in a ranking.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// One for the best document.
    pub rank: usize,
    /// The document.
    pub document: DocumentId,
    /// Its score.
    pub rsv: f64,
}

/// Results of a single query.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryEvaluation {
    /// Negative identifier of the query.
    pub query: DocumentId,
    /// Number of ranked documents.
    pub ranked: usize,
    /// Number of relevant documents.
    pub relevant: usize,
    /// Interpolated precision at each recall level.
    pub precision: [f64; RECALL_LEVELS],
    /// Best ranked document that is not relevant.
    pub first_non_relevant: Option<Placement>,
    /// The worst ranked relevant documents, worst first.
    pub worst_relevant: Vec<Placement>,
    /// The best ranked documents that are not relevant, best first.
    pub best_non_relevant: Vec<Placement>,
    /// Relevant documents missing from the ranking.
    pub unranked_relevant: Vec<DocumentId>,
}

/// Results of all queries.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Each ranked query with at least one relevant document, in the order of the ranking.
    pub queries: Vec<QueryEvaluation>,
    /// Precision at each recall level, averaged over the queries.
    pub average_precision: [f64; RECALL_LEVELS],
}

impl Evaluation {
    /// Sum of the averaged precision over all recall levels.
    #[must_use]
    pub fn curve_sum(&self) -> f64 {
        self.average_precision.iter().sum()
    }
}

/// Evaluate a ranking against relevance judgments.
///
/// Documents that share a score are ranked by ascending identifier. Only queries that appear in
/// the ranking are evaluated, so judged queries without any scored document don't lower the
/// average.
///
/// # Errors
///
/// If the scores of a query are not consecutive.
pub fn evaluate(relevance: &RelevanceTable, values: &[RsvValue]) -> Result<Evaluation, InconsistencyError> {
    let mut queries = Vec::new();
    for ranking in group(values)? {
        let Some(judgment) = relevance.lookup(ranking.query) else {
            debug!(query = ranking.query, "ranked query has no relevance judgment");
            continue;
        };
        if judgment.relevant.iter().any(|relevant| relevant.level > 0) {
            queries.push(evaluate_query(judgment, &ranking));
        }
    }

    let mut average_precision = [0.0; RECALL_LEVELS];
    if !queries.is_empty() {
        for query in &queries {
            for (total, precision) in average_precision.iter_mut().zip(query.precision) {
                *total += precision;
            }
        }
        for total in &mut average_precision {
            *total /= queries.len() as f64;
        }
    }

    let evaluation = Evaluation { queries, average_precision };
    info!(queries = evaluation.queries.len(), curve_sum = evaluation.curve_sum(), "evaluated");

    Ok(evaluation)
}

/// Evaluate a single query.
///
/// # Arguments
///
/// * `judgment`: Relevant documents, at least one of them with a positive level.
/// * `ranking`: Scores for this query.
fn evaluate_query(judgment: &RelevanceJudgment, ranking: &Ranking) -> QueryEvaluation {
    let relevant = judgment.relevant.iter()
        .filter(|relevant| relevant.level > 0)
        .map(|relevant| relevant.document)
        .collect::<SortedList<DocumentId>>();
    let ordered = ranking.ordered(Direction::Forward);
    let placements = ordered.iter()
        .enumerate()
        .map(|(index, entry)| Placement { rank: index + 1, document: entry.document, rsv: entry.rsv })
        .collect::<Vec<_>>();

    let mut precision = [0.0; RECALL_LEVELS];
    let mut found = 0;
    for placement in placements.iter().filter(|placement| relevant.contains(placement.document)) {
        found += 1;
        let at_this_rank = found as f64 / placement.rank as f64;
        // Level i is reached when i / RECALL_LEVELS <= found / relevant
        for (level, best) in precision.iter_mut().enumerate() {
            if level * relevant.len() <= RECALL_LEVELS * found && *best < at_this_rank {
                *best = at_this_rank;
            }
        }
        if found == relevant.len() {
            break;
        }
    }

    let is_relevant = |placement: &&Placement| relevant.contains(placement.document);
    let unranked_relevant = difference(&relevant, &ranking.documents).copied().collect();

    QueryEvaluation {
        query: judgment.query,
        ranked: placements.len(),
        relevant: relevant.len(),
        precision,
        first_non_relevant: placements.iter().find(|placement| !is_relevant(placement)).copied(),
        worst_relevant: placements.iter().rev().filter(is_relevant).take(LISTED).copied().collect(),
        best_non_relevant: placements.iter().filter(|placement| !is_relevant(placement)).take(LISTED).copied().collect(),
        unranked_relevant,
    }
}
