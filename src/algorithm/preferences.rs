//! # Preference evaluation
//!
//! Comparing a ranking with the relevance judgments, pair by pair. Each pair of a relevant
//! document and a document that is less relevant becomes a preference, classified by whether the
//! ranking already agrees with it and whether the weight bounds leave room to change that.
use tracing::{debug, info};

use crate::config::Config;
use crate::data::numerical_precision::round_to_zero;
use crate::data::retrieval::{DocumentId, RsvValue};
use crate::data::retrieval::preference::{Preference, PreferenceKind};
use crate::data::retrieval::ranking::{RankedDocument, Ranking, group};
use crate::data::retrieval::relevance::{RelevanceJudgment, RelevanceTable};
use crate::data::sorted::{Direction, SortedList, merge};
use crate::io::error::InconsistencyError;

/// A preference with the score difference it was derived from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RankedPreference {
    /// The preference.
    pub preference: Preference,
    /// Score of the less relevant document minus that of the more relevant one.
    pub delta: f64,
}

/// Number of pairs per outcome.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct PreferenceStatistics {
    /// Ranked correctly, and could be ranked wrong within the bounds.
    pub satisfied: usize,
    /// Ranked wrong, and could be ranked correctly within the bounds.
    pub unsatisfied: usize,
    /// Ranked wrong, and can't be fixed within the bounds.
    pub cost_only: usize,
    /// Ranked correctly, and can't be ranked wrong within the bounds. Not emitted.
    pub skipped: usize,
}

/// Preferences derived from a ranking.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedPreferences {
    /// By query in the order of the ranking, then by more relevant document, then by less
    /// relevant document, both in ranking order.
    pub preferences: Vec<RankedPreference>,
    /// Outcome counts over all pairs of all queries, also those excluded by a query filter.
    pub statistics: PreferenceStatistics,
}

/// Derive preferences from a ranking.
///
/// # Arguments
///
/// * `relevance`: Judgments of every query in the ranking.
/// * `values`: Scores, grouped by query.
/// * `query_filter`: If given, unsatisfied and cost only preferences are generated for this
/// query only. Satisfied preferences are generated for every query.
/// * `config`: Bound multipliers and tolerance.
///
/// # Errors
///
/// If a query in the ranking has no judgment, or the scores of a query are not consecutive.
pub fn generate(
    relevance: &RelevanceTable,
    values: &[RsvValue],
    query_filter: Option<DocumentId>,
    config: &Config,
) -> Result<GeneratedPreferences, InconsistencyError> {
    let mut preferences = Vec::new();
    let mut statistics = PreferenceStatistics::default();

    for mut ranking in group(values)? {
        let judgment = relevance.lookup(ranking.query).ok_or_else(|| {
            InconsistencyError::new(format!("query {} has no relevance judgment", ranking.query))
        })?;
        let selected = query_filter.is_none_or(|query| query == ranking.query);

        add_unranked(&mut ranking, judgment);
        let ordered = ranking.ordered(Direction::Backward);
        let before = preferences.len();
        for more_relevant in &ordered {
            let level = judgment.level(more_relevant.document);
            if level == 0 {
                continue;
            }

            for less_relevant in &ordered {
                let other = judgment.level(less_relevant.document);
                if other != 0 && other + 1 != level {
                    continue;
                }

                let preference = compare(ranking.query, less_relevant, more_relevant, config);
                match preference.map(|entry| entry.preference.kind) {
                    Some(PreferenceKind::Satisfied) => statistics.satisfied += 1,
                    Some(PreferenceKind::Unsatisfied) => statistics.unsatisfied += 1,
                    Some(PreferenceKind::CostOnly) => statistics.cost_only += 1,
                    None => statistics.skipped += 1,
                }
                // Satisfied preferences of every query keep constraining the weights
                preferences.extend(preference.filter(|entry| {
                    selected || entry.preference.kind == PreferenceKind::Satisfied
                }));
            }
        }
        debug!(query = ranking.query, preferences = preferences.len() - before, "query done");
    }

    info!(
        satisfied = statistics.satisfied,
        unsatisfied = statistics.unsatisfied,
        cost_only = statistics.cost_only,
        skipped = statistics.skipped,
        "generated preferences",
    );

    Ok(GeneratedPreferences { preferences, statistics })
}

/// Judged documents that were not ranked get a zero score.
fn add_unranked(ranking: &mut Ranking, judgment: &RelevanceJudgment) {
    let unranked = judgment.relevant.iter()
        .map(|relevant| RankedDocument { document: relevant.document, rsv: 0.0 })
        .collect::<SortedList<_>>();

    ranking.documents = merge(&ranking.documents, &unranked).copied().collect();
}

/// Classify a single pair.
///
/// # Return value
///
/// `None` if the pair is ranked correctly and the bounds on the weights can't change that.
fn compare(
    query: DocumentId,
    less_relevant: &RankedDocument,
    more_relevant: &RankedDocument,
    config: &Config,
) -> Option<RankedPreference> {
    let epsilon = config.epsilon;
    let delta = round_to_zero(less_relevant.rsv - more_relevant.rsv, epsilon);

    let kind = if delta >= -epsilon {
        // Fixable if shrinking the one and growing the other would swap them
        if config.c1 * less_relevant.rsv - config.c2 * more_relevant.rsv < -epsilon {
            PreferenceKind::Unsatisfied
        } else {
            PreferenceKind::CostOnly
        }
    } else if config.c2 * less_relevant.rsv - config.c1 * more_relevant.rsv >= -epsilon {
        PreferenceKind::Satisfied
    } else {
        return None;
    };

    Some(RankedPreference {
        preference: Preference {
            kind,
            query,
            less_relevant: less_relevant.document,
            more_relevant: more_relevant.document,
        },
        delta,
    })
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use crate::algorithm::preferences::{PreferenceStatistics, RankedPreference, generate};
    use crate::config::Config;
    use crate::data::retrieval::RsvValue;
    use crate::data::retrieval::preference::PreferenceKind;
    use crate::data::retrieval::relevance::{RelevanceJudgment, RelevanceTable, RelevantDocument};

    fn judgment(query: i64, relevant: &[(i64, u32)]) -> RelevanceJudgment {
        RelevanceJudgment {
            query,
            relevant: relevant.iter().map(|&(document, level)| RelevantDocument { document, level }).collect(),
        }
    }

    fn value(query: i64, document: i64, rsv: f64) -> RsvValue {
        RsvValue { query, document, rsv }
    }

    fn summary(generated: &[RankedPreference]) -> Vec<(char, i64, i64)> {
        generated.iter()
            .map(|entry| (entry.preference.kind.symbol(), entry.preference.less_relevant, entry.preference.more_relevant))
            .collect()
    }

    #[test]
    fn classification() {
        let relevance = [judgment(-1, &[(1, 1), (2, 1)])].into_iter().collect::<RelevanceTable>();
        let values = [
            value(-1, 3, 2.0),
            value(-1, 1, 1.0),
            value(-1, 4, 0.5),
            value(-1, 5, 0.1),
        ];

        let generated = generate(&relevance, &values, None, &Config::default()).unwrap();
        assert_eq!(summary(&generated.preferences), vec![
            ('-', 3, 1),
            ('+', 4, 1),
            ('C', 3, 2),
            ('C', 4, 2),
            ('C', 5, 2),
        ]);
        assert_abs_diff_eq!(generated.preferences[0].delta, 1.0);
        assert_abs_diff_eq!(generated.preferences[1].delta, -0.5);
        assert_eq!(generated.statistics, PreferenceStatistics {
            satisfied: 1,
            unsatisfied: 1,
            cost_only: 3,
            skipped: 1,
        });
    }

    #[test]
    fn graded() {
        let relevance = [judgment(-1, &[(1, 2), (2, 1)])].into_iter().collect::<RelevanceTable>();
        let values = [value(-1, 2, 1.5), value(-1, 1, 1.0), value(-1, 3, 1.0)];

        let generated = generate(&relevance, &values, None, &Config::default()).unwrap();
        // Ties are ranked by descending document identifier, and the level 2 document is compared
        // with the level 1 and the irrelevant document
        assert_eq!(summary(&generated.preferences), vec![
            ('+', 3, 2),
            ('-', 2, 1),
            ('-', 3, 1),
        ]);
        assert_abs_diff_eq!(generated.preferences[2].delta, 0.0);
    }

    #[test]
    fn nearly_equal_scores_are_unsatisfied() {
        let relevance = [judgment(-1, &[(1, 1)])].into_iter().collect::<RelevanceTable>();
        let values = [value(-1, 1, 1.0), value(-1, 2, 1.0 - 1e-7)];

        let generated = generate(&relevance, &values, None, &Config::default()).unwrap();
        assert_eq!(generated.preferences.len(), 1);
        assert_eq!(generated.preferences[0].preference.kind, PreferenceKind::Unsatisfied);
        assert_eq!(generated.preferences[0].delta, 0.0);
    }

    #[test]
    fn filter_keeps_satisfied_preferences_of_other_queries() {
        let relevance = [judgment(-1, &[(1, 1)]), judgment(-2, &[(1, 1)])].into_iter().collect::<RelevanceTable>();
        // Ranked correctly for -1, wrong for -2
        let values = [
            value(-1, 1, 1.0),
            value(-1, 2, 0.9),
            value(-2, 2, 1.0),
            value(-2, 1, 0.9),
        ];

        let generated = generate(&relevance, &values, Some(-2), &Config::default()).unwrap();
        let emitted = generated.preferences.iter()
            .map(|entry| (entry.preference.kind.symbol(), entry.preference.query))
            .collect::<Vec<_>>();
        assert_eq!(emitted, vec![('+', -1), ('-', -2)]);
        assert_abs_diff_eq!(generated.preferences[0].delta, -0.1);

        // A filter on the correctly ranked query drops the unsatisfied preference of the other
        let generated = generate(&relevance, &values, Some(-1), &Config::default()).unwrap();
        assert_eq!(summary(&generated.preferences), vec![('+', 2, 1)]);
        assert_eq!(generated.statistics.unsatisfied, 1);
    }

    #[test]
    fn judged_irrelevant_documents_are_added_unranked() {
        let relevance = [judgment(-1, &[(1, 1), (2, 0)])].into_iter().collect::<RelevanceTable>();
        let values = [value(-1, 3, 1.0)];

        let generated = generate(&relevance, &values, None, &Config::default()).unwrap();
        // Both judged documents score zero, and ties rank the higher identifier first
        assert_eq!(summary(&generated.preferences), vec![('C', 3, 1), ('C', 2, 1)]);
        assert_eq!(generated.preferences[1].delta, 0.0);
    }

    #[test]
    fn inconsistent() {
        let relevance = [judgment(-1, &[(1, 1)])].into_iter().collect::<RelevanceTable>();

        assert!(generate(&relevance, &[value(-3, 1, 1.0)], None, &Config::default()).is_err());
        let interleaved = [value(-1, 1, 1.0), value(-3, 1, 1.0), value(-1, 2, 1.0)];
        assert!(generate(&relevance, &interleaved, None, &Config::default()).is_err());
    }
}
