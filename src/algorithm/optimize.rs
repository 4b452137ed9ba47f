//! # Weight optimization
//!
//! The complete path from preferences to optimized concept weights.
use tracing::{info, warn};

use crate::algorithm::OptimizationResult;
use crate::algorithm::equations::EquationBuilder;
use crate::algorithm::equations::columns::{ColumnAssignment, InitialWeights};
use crate::algorithm::simplex::solution::emit;
use crate::algorithm::simplex::solve;
use crate::algorithm::simplex::tableau::Tableau;
use crate::config::Config;
use crate::data::retrieval::{ConceptWeight, DocumentTable};
use crate::data::retrieval::preference::Preference;
use crate::io::error::InconsistencyError;

/// All concept weights after optimization.
#[derive(PartialEq, Clone, Debug)]
pub struct OptimizedWeights {
    /// Concepts that were not optimized, unchanged and in input order.
    pub fixed: Vec<ConceptWeight>,
    /// Optimized concepts by ascending concept identifier.
    pub optimized: Vec<ConceptWeight>,
    /// Value of the objective at the optimum.
    pub objective_value: f64,
    /// Number of pivots after elimination.
    pub iterations: usize,
}

impl OptimizedWeights {
    /// Every concept exactly once, fixed concepts first.
    pub fn iter(&self) -> impl Iterator<Item = &ConceptWeight> {
        self.fixed.iter().chain(&self.optimized)
    }
}

/// Optimize concept weights such that the preferences are satisfied as well as possible.
///
/// # Arguments
///
/// * `preferences`: Pairs of documents of which the second should be ranked above the first.
/// * `documents`: All documents and queries referred to by the preferences.
/// * `weights`: Initial weight of each concept.
/// * `config`: Bounds and tolerances.
///
/// # Return value
///
/// The weights at the optimum, or why the simplex method stopped without one.
///
/// # Errors
///
/// If a preference refers to an unknown document, or a concept lacks an initial weight.
pub fn optimize(
    preferences: &[Preference],
    documents: &DocumentTable,
    weights: &[ConceptWeight],
    config: &Config,
) -> Result<OptimizationResult<OptimizedWeights>, InconsistencyError> {
    let columns = ColumnAssignment::assign(preferences, documents)?;
    let initial = InitialWeights::split(weights, &columns)?;
    info!(optimized = columns.nr_columns(), fixed = initial.fixed().len(), "assigned columns");

    let equations = EquationBuilder::new(documents, &columns, &initial, config).build(preferences)?;
    let statistics = equations.statistics;
    info!(
        satisfied = statistics.satisfied,
        unsatisfied = statistics.unsatisfied,
        cost_only = statistics.cost_only,
        dropped = statistics.dropped,
        "built equations",
    );

    let mut tableau = Tableau::new(equations, initial.solution().to_vec(), config.epsilon);
    let result = solve(&mut tableau, config).map(|solution| {
        info!(iterations = solution.iterations, cost = solution.objective_value, "emitting");
        OptimizedWeights {
            fixed: initial.fixed().to_vec(),
            optimized: emit(&columns, &solution.weights),
            objective_value: solution.objective_value,
            iterations: solution.iterations,
        }
    });

    match &result {
        OptimizationResult::FiniteOptimum(_) => {}
        OptimizationResult::Infeasible { column } | OptimizationResult::Unbounded { column } => {
            warn!(column, "no solution");
        }
        OptimizationResult::IterationLimit { iterations } => warn!(iterations, "iteration limit reached"),
    }

    Ok(result)
}
