//! # Tableau
//!
//! The optimization matrix together with the bookkeeping of the exchange method: which variable
//! belongs to each column, which variable is basic in each row, and which rows were used to
//! eliminate a weight.
use std::mem;

use enum_map::EnumMap;
use tracing::{debug, warn};

use crate::algorithm::equations::Equations;
use crate::algorithm::simplex::matrix::{CONSTRAINT_ROW_TYPES, OptimizationMatrix, RowIndex, RowType};
use crate::data::numerical_precision::{Clamped, clamp_non_negative};

/// A variable of the exchange method.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Variable {
    /// The (translated) weight of an optimized column.
    Weight(usize),
    /// The value of a row.
    Slack(RowIndex),
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
struct RowState {
    basic: Variable,
    /// Whether this row was used to eliminate a weight; it may not be pivoted on again.
    transformed: bool,
}

/// Direction in which the variable of a column is moved away from zero.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Movement {
    /// Rows with a negative coefficient limit the step.
    Increase,
    /// Rows with a positive coefficient limit the step.
    Decrease,
}

/// State of the exchange method.
///
/// Initially, each column holds a weight variable and each row its own slack. Exchanges swap
/// these labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Tableau {
    matrix: OptimizationMatrix,
    column_variables: Vec<Variable>,
    row_states: EnumMap<RowType, Vec<RowState>>,
    /// Initial weights, the origin of the translated variables.
    origin: Vec<f64>,
    epsilon: f64,
    eliminated: bool,
}

impl Tableau {
    /// Create a tableau with the origin at the initial weights.
    ///
    /// # Arguments
    ///
    /// * `equations`: Rows in original coordinates.
    /// * `origin`: Initial weight of each column.
    /// * `epsilon`: Tolerance for round-off in the row constants.
    #[must_use]
    pub fn new(equations: Equations, origin: Vec<f64>, epsilon: f64) -> Self {
        let mut matrix = OptimizationMatrix::new(equations);
        debug_assert_eq!(origin.len(), matrix.nr_variables());
        matrix.translate(&origin);

        let column_variables = (0..matrix.nr_variables()).map(Variable::Weight).collect();
        let mut row_states = EnumMap::<RowType, Vec<RowState>>::default();
        for (row_type, states) in row_states.iter_mut() {
            *states = (0..matrix.block(row_type).len())
                .map(|index| RowState {
                    basic: Variable::Slack(RowIndex { row_type, index }),
                    transformed: false,
                })
                .collect();
        }

        let mut tableau = Self {
            matrix,
            column_variables,
            row_states,
            origin,
            epsilon,
            eliminated: false,
        };
        tableau.clamp_constraint_constants();

        tableau
    }

    /// The rows.
    #[must_use]
    pub fn matrix(&self) -> &OptimizationMatrix {
        &self.matrix
    }

    /// Number of optimized columns.
    #[must_use]
    pub fn nr_variables(&self) -> usize {
        self.matrix.nr_variables()
    }

    /// Starting point of the optimization.
    #[must_use]
    pub fn origin(&self) -> &[f64] {
        &self.origin
    }

    /// Tolerance for round-off.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Coefficient of a column in the objective row.
    #[must_use]
    pub fn cost_coefficient(&self, column: usize) -> f64 {
        self.matrix.cost()[column]
    }

    /// Current value of the objective.
    #[must_use]
    pub fn objective_value(&self) -> f64 {
        self.matrix.cost().constant()
    }

    /// Variable currently associated with a column.
    #[must_use]
    pub fn column_variable(&self, column: usize) -> Variable {
        self.column_variables[column]
    }

    /// Variable currently basic in a row.
    #[must_use]
    pub fn basic_variable(&self, row: RowIndex) -> Variable {
        self.row_states[row.row_type][row.index].basic
    }

    /// Whether a row was used to eliminate a weight.
    #[must_use]
    pub fn is_transformed(&self, row: RowIndex) -> bool {
        self.row_states[row.row_type][row.index].transformed
    }

    /// All rows except the cost row, with the variable that is basic in them.
    pub fn basic_variables(&self) -> impl Iterator<Item = (RowIndex, Variable)> + '_ {
        self.row_states.iter()
            .filter(|&(row_type, _)| row_type != RowType::Cost)
            .flat_map(|(row_type, states)| states.iter()
                .enumerate()
                .map(move |(index, state)| (RowIndex { row_type, index }, state.basic)))
    }

    pub(crate) fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    pub(crate) fn set_eliminated(&mut self) {
        self.eliminated = true;
    }

    pub(crate) fn mark_transformed(&mut self, row: RowIndex) {
        debug_assert!(!self.is_transformed(row));

        self.row_states[row.row_type][row.index].transformed = true;
    }

    /// Whether a row may still be pivoted on.
    fn is_pivot_candidate(&self, row: RowIndex) -> bool {
        row.row_type.is_constraint() && !self.is_transformed(row)
    }

    /// Set a negative constant of a row to zero, logging the round-off.
    ///
    /// # Return value
    ///
    /// The constant after clamping.
    fn guard_constant(&mut self, row: RowIndex) -> f64 {
        let epsilon = self.epsilon;
        let constant = self.matrix.row_mut(row).constant_mut();
        let before = *constant;

        match clamp_non_negative(constant, epsilon) {
            Clamped::No => {},
            Clamped::WithinTolerance => debug!(?row, value = before, "round-off clamped to zero"),
            Clamped::BeyondTolerance => warn!(?row, value = before, "negative constant clamped to zero"),
        }

        *constant
    }

    /// Clamp the constant of every row that may still be pivoted on.
    pub(crate) fn clamp_constraint_constants(&mut self) {
        for row_type in CONSTRAINT_ROW_TYPES {
            for index in 0..self.row_states[row_type].len() {
                let row = RowIndex { row_type, index };
                if self.is_pivot_candidate(row) {
                    self.guard_constant(row);
                }
            }
        }
    }

    /// Ratio test: the row that first reaches zero when the variable of a column moves.
    ///
    /// Only rows that may still be pivoted on are considered. Constants that drifted below zero
    /// are clamped before use.
    ///
    /// # Return value
    ///
    /// The row with the smallest ratio `constant / |coefficient|`, the first one on ties. `None`
    /// if no row limits the movement.
    pub(crate) fn select_pivot_row(&mut self, column: usize, movement: Movement) -> Option<RowIndex> {
        let mut best: Option<(RowIndex, f64)> = None;

        for row_type in CONSTRAINT_ROW_TYPES {
            for index in 0..self.row_states[row_type].len() {
                let row = RowIndex { row_type, index };
                if !self.is_pivot_candidate(row) {
                    continue;
                }

                let coefficient = self.matrix.row(row)[column];
                let limiting = match movement {
                    Movement::Increase => coefficient < 0.0,
                    Movement::Decrease => coefficient > 0.0,
                };
                if !limiting {
                    continue;
                }

                let ratio = self.guard_constant(row) / coefficient.abs();
                let improves = match best {
                    None => true,
                    Some((_, best_ratio)) => ratio < best_ratio,
                };
                if improves {
                    best = Some((row, ratio));
                }
            }
        }

        best.map(|(row, _)| row)
    }

    /// Exchange the variable of a column with the one basic in a row.
    pub(crate) fn bring_into_basis(&mut self, column: usize, row: RowIndex) {
        debug_assert!(self.is_pivot_candidate(row));

        self.matrix.exchange(row, column);
        let state = &mut self.row_states[row.row_type][row.index];
        mem::swap(&mut state.basic, &mut self.column_variables[column]);
    }

    /// Whether the basic solution satisfies all rows that may still be pivoted on.
    #[must_use]
    pub fn is_in_basic_feasible_solution_state(&self) -> bool {
        CONSTRAINT_ROW_TYPES.into_iter()
            .flat_map(|row_type| (0..self.row_states[row_type].len())
                .map(move |index| RowIndex { row_type, index }))
            .filter(|&row| self.is_pivot_candidate(row))
            .all(|row| self.matrix.row(row).constant() >= -self.epsilon)
    }
}
