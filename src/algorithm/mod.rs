//! # Algorithms
pub mod equations;
pub mod evaluation;
pub mod optimize;
pub mod preferences;
pub mod rsv;
pub mod simplex;

/// The optimization either finds a finite optimum, or stops without one.
///
/// This is determined as the result of an algorithm. Not finding an optimum is not an error: the
/// caller decides what to do with the input.
#[derive(PartialEq, Debug)]
pub enum OptimizationResult<S> {
    /// The pivot loop found no further improving column.
    FiniteOptimum(S),
    /// Elimination found no row to bring this column into the basis with.
    Infeasible {
        /// Column that could not be eliminated.
        column: usize,
    },
    /// No row bounds the improving direction of this column.
    Unbounded {
        /// Column that could not be pivoted on.
        column: usize,
    },
    /// The pivot loop was stopped after this many iterations.
    IterationLimit {
        /// Number of pivots that were done.
        iterations: usize,
    },
}

impl<S> OptimizationResult<S> {
    /// Transform the solution of a finite optimum, leaving the other outcomes as they are.
    pub fn map<T>(self, f: impl FnOnce(S) -> T) -> OptimizationResult<T> {
        match self {
            Self::FiniteOptimum(solution) => OptimizationResult::FiniteOptimum(f(solution)),
            Self::Infeasible { column } => OptimizationResult::Infeasible { column },
            Self::Unbounded { column } => OptimizationResult::Unbounded { column },
            Self::IterationLimit { iterations } => OptimizationResult::IterationLimit { iterations },
        }
    }
}
