//! # Primal simplex loop
//!
//! Improving the objective from a basic feasible solution, one exchange at a time.
use tracing::{debug, trace};

use crate::algorithm::OptimizationResult;
use crate::algorithm::simplex::strategy::pivot_rule::PivotRule;
use crate::algorithm::simplex::tableau::{Movement, Tableau};
use crate::algorithm::simplex::matrix::RowIndex;

/// Outcome of a single iteration.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub(crate) enum Step {
    /// The variable of the column was exchanged with the one basic in the row.
    Pivoted {
        /// Entering column.
        column: usize,
        /// Leaving row.
        row: RowIndex,
    },
    /// No column improves the objective.
    Optimal,
    /// Nothing limits the improving direction of this column.
    Unbounded {
        /// The improving column.
        column: usize,
    },
}

/// Do a single pivot.
pub(crate) fn step<PR: PivotRule>(tableau: &mut Tableau, rule: &mut PR) -> Step {
    match rule.select_primal_pivot_column(tableau) {
        Some((column, _)) => match tableau.select_pivot_row(column, Movement::Increase) {
            Some(row) => {
                tableau.bring_into_basis(column, row);
                Step::Pivoted { column, row }
            }
            None => Step::Unbounded { column },
        },
        None => Step::Optimal,
    }
}

/// Increases the objective of the basic feasible solution to the maximum.
///
/// While calling this method, a number of requirements should be satisfied:
/// - Elimination should have succeeded.
/// - All constants of rows that can be pivoted on need to be non-negative.
///
/// # Arguments
///
/// * `tableau`: Tableau after elimination.
/// * `max_iterations`: Number of pivots after which to give up.
///
/// # Return value
///
/// The number of pivots on a finite optimum.
pub(crate) fn primal<PR: PivotRule>(
    tableau: &mut Tableau,
    max_iterations: usize,
) -> OptimizationResult<usize> {
    debug_assert!(tableau.is_eliminated());

    let mut rule = PR::new();
    let mut iterations = 0;
    loop {
        debug_assert!(tableau.is_in_basic_feasible_solution_state());

        if iterations == max_iterations {
            if rule.select_primal_pivot_column(tableau).is_some() {
                break OptimizationResult::IterationLimit { iterations };
            }
            break OptimizationResult::FiniteOptimum(iterations);
        }

        let before = tableau.objective_value();
        match step(tableau, &mut rule) {
            Step::Pivoted { column, row } => {
                iterations += 1;
                let after = tableau.objective_value();
                debug_assert!(after >= before - tableau.epsilon());
                trace!(iteration = iterations, column, ?row, cost = after, "pivoted");
            }
            Step::Optimal => {
                debug!(iterations, cost = before, "optimal");
                break OptimizationResult::FiniteOptimum(iterations);
            }
            Step::Unbounded { column } => break OptimizationResult::Unbounded { column },
        }
    }
}
