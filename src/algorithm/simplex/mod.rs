//! # Simplex method
//!
//! An exchange-step simplex method for maximizing the objective row subject to all constraint
//! rows staying non-negative. The weights start out as free variables at the origin; elimination
//! exchanges each of them for the slack of a constraint row, giving a basic feasible solution.
//! The primal loop then improves it.
use tracing::{info, warn};

use crate::algorithm::OptimizationResult;
use crate::algorithm::simplex::elimination::FeasibilityResult;
use crate::algorithm::simplex::primal::primal;
use crate::algorithm::simplex::solution::Solution;
use crate::algorithm::simplex::strategy::pivot_rule::{FirstProfitable, LargestCoefficient};
use crate::algorithm::simplex::tableau::Tableau;
use crate::config::{Config, PivotRuleKind};

pub mod elimination;
pub mod matrix;
pub mod primal;
pub mod solution;
pub mod strategy;
pub mod tableau;

/// Maximize the objective of a tableau.
///
/// Elimination is only done once: solving an already optimal tableau again gives the same
/// solution without any pivots.
///
/// # Return value
///
/// The weights at the optimum, or why none was found.
pub fn solve(tableau: &mut Tableau, config: &Config) -> OptimizationResult<Solution> {
    if !tableau.is_eliminated() {
        info!(columns = tableau.nr_variables(), "eliminating");
        if let FeasibilityResult::Infeasible { column } = elimination::eliminate(tableau) {
            warn!(column, "no row to eliminate column with");
            return OptimizationResult::Infeasible { column };
        }
    }

    info!(cost = tableau.objective_value(), "pivoting");
    let result = match config.pivot_rule {
        PivotRuleKind::LargestCoefficient => primal::<LargestCoefficient>(tableau, config.max_iterations),
        PivotRuleKind::FirstProfitable => primal::<FirstProfitable>(tableau, config.max_iterations),
    };

    result.map(|iterations| Solution::from_tableau(tableau, iterations))
}
