//! A single query, three documents and two relevant ones.
//!
//! With the initial weights the irrelevant document is ranked first. Ranking the more relevant
//! document above it is possible within the bounds, for the other relevant document it isn't.
use approx::assert_abs_diff_eq;

use crate::algorithm::equations::columns::{ColumnAssignment, InitialWeights};
use crate::algorithm::equations::{EquationBuilder, Equations};
use crate::algorithm::preferences::generate;
use crate::algorithm::rsv::rank;
use crate::algorithm::simplex::elimination::{FeasibilityResult, eliminate};
use crate::algorithm::simplex::matrix::RowType;
use crate::algorithm::simplex::solution::back_substitute;
use crate::algorithm::simplex::tableau::Tableau;
use crate::config::Config;
use crate::data::retrieval::{ConceptWeight, DocumentTable, WeightVector};
use crate::data::retrieval::preference::{Preference, PreferenceKind};
use crate::io::{documents, relevance, weights};

const DOCUMENT_FILE: &str = "
-1
1 1.0
2 1.0
3 1.0
1
1 1.0
2
2 1.0
3
3 1.0
";

const WEIGHT_FILE: &str = "1 2.0\n2 1.0\n3 0.5\n";

const RELEVANCE_FILE: &str = "1:\n2\n3\n";

const EPSILON: f64 = 1e-5;

fn documents() -> DocumentTable {
    documents::parse(DOCUMENT_FILE, None).unwrap()
}

fn initial_weights() -> Vec<ConceptWeight> {
    weights::parse(WEIGHT_FILE).unwrap()
}

fn preferences() -> Vec<Preference> {
    let relevance = relevance::parse(RELEVANCE_FILE).unwrap();
    let weights = initial_weights().into_iter().collect::<WeightVector>();
    let values = rank(&documents(), &weights).unwrap();

    generate(&relevance, &values, None, &Config::default()).unwrap()
        .preferences
        .into_iter()
        .map(|entry| entry.preference)
        .collect()
}

fn equations() -> (ColumnAssignment, InitialWeights, Equations) {
    let documents = documents();
    let preferences = preferences();
    let columns = ColumnAssignment::assign(&preferences, &documents).unwrap();
    let initial = InitialWeights::split(&initial_weights(), &columns).unwrap();
    let equations = EquationBuilder::new(&documents, &columns, &initial, &Config::default())
        .build(&preferences)
        .unwrap();

    (columns, initial, equations)
}

fn tableau() -> Tableau {
    let (_, initial, equations) = equations();

    Tableau::new(equations, initial.solution().to_vec(), EPSILON)
}

#[test]
fn generated_preferences() {
    assert_eq!(preferences(), vec![
        Preference { kind: PreferenceKind::Unsatisfied, query: -1, less_relevant: 1, more_relevant: 2 },
        Preference { kind: PreferenceKind::CostOnly, query: -1, less_relevant: 1, more_relevant: 3 },
    ]);
}

#[test]
fn columns_and_rows() {
    let (columns, initial, equations) = equations();

    // First the concepts of the unsatisfied preference, then the new one of the other
    assert_eq!(columns.iter().map(|entry| (entry.concept, entry.column)).collect::<Vec<_>>(), vec![
        (1, 0),
        (2, 1),
        (3, 2),
    ]);
    assert_eq!(initial.solution(), &[2.0, 1.0, 0.5]);
    assert!(initial.fixed().is_empty());

    assert_eq!(equations.rsv.len(), 1);
    assert_eq!(equations.rsv[0].coefficients(), &[1.0, -1.0, 0.0]);
    assert_abs_diff_eq!(equations.rsv[0].constant(), EPSILON);
    assert_eq!(equations.cost.coefficients(), &[-2.0, 1.0, 1.0]);
    assert_abs_diff_eq!(equations.cost.constant(), -2.0 * EPSILON);
    assert_eq!(equations.statistics.unsatisfied, 1);
    assert_eq!(equations.statistics.cost_only, 1);
}

#[test]
fn translated() {
    let tableau = tableau();

    assert_abs_diff_eq!(tableau.matrix().block(RowType::Rsv)[0].constant(), 1.0 + EPSILON);
    assert_abs_diff_eq!(tableau.objective_value(), -2.5 - 2.0 * EPSILON);
    let lower = tableau.matrix().block(RowType::LowerBound).iter().map(|row| row.constant()).collect::<Vec<_>>();
    assert_eq!(lower, vec![1.0, 0.5, 0.25]);
}

#[test]
fn elimination_reaches_the_optimum() {
    let mut tableau = tableau();

    assert_eq!(eliminate(&mut tableau), FeasibilityResult::Feasible);
    for column in 0..tableau.nr_variables() {
        assert!(tableau.cost_coefficient(column) < 0.0);
    }

    // Concept 1 drops to its lower bound, concept 2 rises just above it and concept 3 doubles
    let weights = back_substitute(&tableau);
    assert_abs_diff_eq!(weights[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(weights[1], 1.0 + EPSILON, epsilon = 1e-12);
    assert_abs_diff_eq!(weights[2], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(tableau.objective_value(), -EPSILON, epsilon = 1e-12);
}

#[test]
fn optimum_is_within_bounds() {
    let mut tableau = tableau();
    assert_eq!(eliminate(&mut tableau), FeasibilityResult::Feasible);

    let (c1, c2) = (Config::default().c1, Config::default().c2);
    for (weight, initial) in back_substitute(&tableau).into_iter().zip([2.0, 1.0, 0.5]) {
        assert!(weight >= c1 * initial - EPSILON);
        assert!(weight <= c2 * initial + EPSILON);
    }
}
