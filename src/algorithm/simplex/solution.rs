//! # Solutions
//!
//! Reading the weights from a tableau and pairing them with their concepts.
use crate::algorithm::equations::columns::ColumnAssignment;
use crate::algorithm::simplex::tableau::{Tableau, Variable};
use crate::data::retrieval::ConceptWeight;

/// Optimized weights with some statistics of how they were found.
#[derive(PartialEq, Clone, Debug)]
pub struct Solution {
    /// Weight of each column, in original coordinates.
    pub weights: Vec<f64>,
    /// Value of the objective.
    pub objective_value: f64,
    /// Number of pivots after elimination.
    pub iterations: usize,
}

impl Solution {
    /// Read the current basic solution of a tableau.
    #[must_use]
    pub fn from_tableau(tableau: &Tableau, iterations: usize) -> Self {
        Self {
            weights: back_substitute(tableau),
            objective_value: tableau.objective_value(),
            iterations,
        }
    }
}

/// Weights of the current basic solution.
///
/// A weight that is basic in a row takes the value of that row's constant, added to its initial
/// value. A weight that is not basic is still at its initial value.
#[must_use]
pub fn back_substitute(tableau: &Tableau) -> Vec<f64> {
    let mut weights = tableau.origin().to_vec();
    for (row, variable) in tableau.basic_variables() {
        if let Variable::Weight(column) = variable {
            weights[column] += tableau.matrix().row(row).constant();
        }
    }

    weights
}

/// Pair the weight of each column with its concept.
///
/// # Return value
///
/// Concept weights by ascending concept identifier.
#[must_use]
pub fn emit(columns: &ColumnAssignment, weights: &[f64]) -> Vec<ConceptWeight> {
    debug_assert_eq!(columns.nr_columns(), weights.len());

    columns.iter()
        .map(|entry| ConceptWeight::new(entry.concept, weights[entry.column]))
        .collect()
}
