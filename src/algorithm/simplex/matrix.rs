//! # Optimization matrix
//!
//! All rows of the optimization in a single structure, grouped by their role.
use cumsum::cumsum_array_owned;
use enum_map::{Enum, EnumMap, enum_map};

use crate::algorithm::equations::{Equation, Equations};

/// Role of a group of rows, in matrix order.
#[derive(Enum, Eq, PartialEq, Copy, Clone, Debug)]
pub enum RowType {
    /// Weight of each column in original coordinates.
    Translation,
    /// Preference constraints.
    Rsv,
    /// Lower bound of each column.
    LowerBound,
    /// Upper bound of each column.
    UpperBound,
    /// The objective.
    Cost,
}

/// Row groups that constrain the solution, in the order they are searched for pivots.
pub const CONSTRAINT_ROW_TYPES: [RowType; 3] = [RowType::Rsv, RowType::LowerBound, RowType::UpperBound];

impl RowType {
    /// Whether the rows of this group must stay non-negative.
    #[must_use]
    pub fn is_constraint(self) -> bool {
        CONSTRAINT_ROW_TYPES.contains(&self)
    }
}

/// A row, addressed by its group and its index within that group.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowIndex {
    /// Group of the row.
    pub row_type: RowType,
    /// Index within the group.
    pub index: usize,
}

/// The rows of the optimization over the translated variables `x' = x − x0`.
///
/// The indexing for the rows is as follows:
///
/// /                  ||       x'_0 ... x'_{n-1}       | constant |
/// ===================||===============================||==========|
/// Translation    (n) ||               I               |    x0    |
/// -------------------||-------------------------------||----------|
/// Rsv            (r) ||    preference coefficients    |   ...    |
/// -------------------||-------------------------------||----------|
/// Lower bound    (n) ||               I               | (1-C1)x0 |
/// -------------------||-------------------------------||----------|
/// Upper bound    (n) ||              -I               | (C2-1)x0 |
/// -------------------||-------------------------------||----------|
/// Cost           (1) ||           objective           |  value   |
///
/// The constants are shown after translation, before any exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct OptimizationMatrix {
    blocks: EnumMap<RowType, Vec<Equation>>,
    /// Indices that separate the different groups, when all rows are numbered consecutively.
    row_group_end: EnumMap<RowType, usize>,
    nr_variables: usize,
}

impl OptimizationMatrix {
    /// Take ownership of built rows.
    ///
    /// The rows are in original coordinates, see `translate`.
    #[must_use]
    pub fn new(equations: Equations) -> Self {
        let Equations { translation, rsv, lower_bound, upper_bound, cost, .. } = equations;
        let nr_variables = cost.nr_variables();

        let cumulative = cumsum_array_owned([
            translation.len(),
            rsv.len(),
            lower_bound.len(),
            upper_bound.len(),
            1,
        ]);
        let row_group_end = enum_map!{
            RowType::Translation => cumulative[0],
            RowType::Rsv         => cumulative[1],
            RowType::LowerBound  => cumulative[2],
            RowType::UpperBound  => cumulative[3],
            RowType::Cost        => cumulative[4],
        };

        let mut blocks = EnumMap::<RowType, Vec<Equation>>::default();
        blocks[RowType::Translation] = translation;
        blocks[RowType::Rsv] = rsv;
        blocks[RowType::LowerBound] = lower_bound;
        blocks[RowType::UpperBound] = upper_bound;
        blocks[RowType::Cost] = vec![cost];
        debug_assert!(blocks.values().flatten().all(|row| row.nr_variables() == nr_variables));

        Self { blocks, row_group_end, nr_variables }
    }

    /// Number of variables, excluding the constant.
    #[must_use]
    pub fn nr_variables(&self) -> usize {
        self.nr_variables
    }

    /// Total number of rows, including the translation rows and the cost row.
    #[must_use]
    pub fn nr_rows(&self) -> usize {
        self.row_group_end[RowType::Cost]
    }

    fn group_start(&self, row_type: RowType) -> usize {
        match row_type {
            RowType::Translation => 0,
            RowType::Rsv => self.row_group_end[RowType::Translation],
            RowType::LowerBound => self.row_group_end[RowType::Rsv],
            RowType::UpperBound => self.row_group_end[RowType::LowerBound],
            RowType::Cost => self.row_group_end[RowType::UpperBound],
        }
    }

    /// Group of a row when all rows are numbered consecutively.
    #[must_use]
    pub fn row_type(&self, i: usize) -> RowIndex {
        debug_assert!(i < self.nr_rows());

        let row_type = self.row_group_end.iter()
            .find(|&(_, &end)| i < end)
            .map_or(RowType::Cost, |(row_type, _)| row_type);
        RowIndex { row_type, index: i - self.group_start(row_type) }
    }

    /// Consecutive number of a row.
    #[must_use]
    pub fn flat_index(&self, row: RowIndex) -> usize {
        debug_assert!(row.index < self.blocks[row.row_type].len());

        self.group_start(row.row_type) + row.index
    }

    /// All rows of a group.
    #[must_use]
    pub fn block(&self, row_type: RowType) -> &[Equation] {
        &self.blocks[row_type]
    }

    /// A single row.
    #[must_use]
    pub fn row(&self, row: RowIndex) -> &Equation {
        &self.blocks[row.row_type][row.index]
    }

    pub(crate) fn row_mut(&mut self, row: RowIndex) -> &mut Equation {
        &mut self.blocks[row.row_type][row.index]
    }

    /// The objective row.
    #[must_use]
    pub fn cost(&self) -> &Equation {
        &self.blocks[RowType::Cost][0]
    }

    /// Move the origin to `origin`, by evaluating every row except the translation rows there.
    pub fn translate(&mut self, origin: &[f64]) {
        debug_assert_eq!(origin.len(), self.nr_variables);

        for (row_type, block) in self.blocks.iter_mut() {
            if row_type == RowType::Translation {
                continue;
            }
            for row in block {
                *row.constant_mut() = row.evaluate(origin);
            }
        }
    }

    /// Exchange the variable of a column with the variable that is basic in a row.
    ///
    /// This is a Gauss-Jordan step on every row, the translation and cost rows included.
    ///
    /// # Arguments
    ///
    /// * `pivot`: Row of the pivot. Its value in `column` should be nonzero.
    /// * `column`: Column of the pivot.
    pub fn exchange(&mut self, pivot: RowIndex, column: usize) {
        let n = self.nr_variables;
        let pivot_value = self.row(pivot)[column];
        debug_assert!(pivot_value != 0.0);

        let pivot_row = {
            let row = self.row_mut(pivot);
            for k in (0..=n).filter(|&k| k != column) {
                row[k] = -row[k] / pivot_value;
            }
            row[column] = 1.0 / pivot_value;
            row.clone()
        };

        for (row_type, block) in self.blocks.iter_mut() {
            for (index, row) in block.iter_mut().enumerate() {
                if (RowIndex { row_type, index }) == pivot {
                    continue;
                }

                let factor = row[column];
                if factor == 0.0 {
                    continue;
                }
                for k in (0..=n).filter(|&k| k != column) {
                    row[k] += factor * pivot_row[k];
                }
                row[column] = factor / pivot_value;
            }
        }
    }
}
