//! # Pivot rules
//!
//! Strategies for choosing the column that enters the basis in the primal simplex loop.
use crate::algorithm::simplex::tableau::Tableau;

/// Deciding how to pivot.
///
/// During the simplex method, one needs to decide how to move from basic solution to basic
/// solution. The pivot rule describes that behavior.
///
/// Once the column has been selected, a row needs to be found. This decision is made by the ratio
/// test, independent of the strategy.
pub trait PivotRule {
    /// Create a new instance.
    fn new() -> Self;

    /// Column selection rule for the primal simplex method.
    ///
    /// # Return value
    ///
    /// A column with a positive cost coefficient and that coefficient, or `None` if the objective
    /// can't be improved by any column.
    fn select_primal_pivot_column(&mut self, tableau: &Tableau) -> Option<(usize, f64)>;
}

/// Pivot on the column with the largest cost coefficient, the first one on ties.
pub struct LargestCoefficient;
impl PivotRule for LargestCoefficient {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column(&mut self, tableau: &Tableau) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for column in 0..tableau.nr_variables() {
            let cost = tableau.cost_coefficient(column);
            if cost > 0.0 && best.is_none_or(|(_, largest)| cost > largest) {
                best = Some((column, cost));
            }
        }

        best
    }
}

/// Simply pivot on the first column, which has a positive cost coefficient.
pub struct FirstProfitable;
impl PivotRule for FirstProfitable {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column(&mut self, tableau: &Tableau) -> Option<(usize, f64)> {
        (0..tableau.nr_variables())
            .map(|column| (column, tableau.cost_coefficient(column)))
            .find(|&(_, cost)| cost > 0.0)
    }
}
