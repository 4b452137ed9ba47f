//! # Elimination
//!
//! Computing a basic feasible solution: the weights are free variables, and each of them is
//! exchanged with the slack of a constraint row. After that, the rows that were used express the
//! weights and are never pivoted on again.
use tracing::{debug, trace};

use crate::algorithm::simplex::tableau::{Movement, Tableau, Variable};

/// Whether a basic feasible solution was found.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub(crate) enum FeasibilityResult {
    /// Every weight was exchanged.
    Feasible,
    /// No constraint row limits the movement of this column.
    Infeasible {
        /// The column that could not be eliminated.
        column: usize,
    },
}

/// Exchange every weight with the slack of a constraint row.
///
/// Columns are handled in order. Each weight moves in the direction that improves the objective,
/// until the first constraint row reaches zero; that row is used for the exchange.
pub(crate) fn eliminate(tableau: &mut Tableau) -> FeasibilityResult {
    debug_assert!(!tableau.is_eliminated());

    for column in 0..tableau.nr_variables() {
        debug_assert_eq!(tableau.column_variable(column), Variable::Weight(column));

        let movement = if tableau.cost_coefficient(column) > 0.0 {
            Movement::Increase
        } else {
            Movement::Decrease
        };
        match tableau.select_pivot_row(column, movement) {
            Some(row) => {
                tableau.bring_into_basis(column, row);
                tableau.mark_transformed(row);
                trace!(column, ?row, cost = tableau.objective_value(), "eliminated");
            }
            None => return FeasibilityResult::Infeasible { column },
        }
    }

    tableau.clamp_constraint_constants();
    tableau.set_eliminated();
    debug!(columns = tableau.nr_variables(), cost = tableau.objective_value(), "elimination done");

    FeasibilityResult::Feasible
}
