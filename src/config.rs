//! # Configuration
//!
//! Parameters of the optimization and of the preference generator.
use thiserror::Error;

/// Default tolerance for comparing RSVs and for round-off in the simplex tableau.
pub const EPSILON: f64 = 1e-5;

/// Default ceiling on the number of pivots of the primal simplex loop.
pub const MAX_ITERATIONS: usize = 100_000;

/// How far optimized weights may move away from their initial value.
///
/// Each weight `x` of a concept with initial weight `idf` is bounded by `C1·idf ≤ x ≤ C2·idf`.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub enum Band {
    /// Weights may halve or double.
    #[default]
    Wide,
    /// Weights may move 20 percent.
    P20,
    /// Weights may move 10 percent.
    P10,
}

impl Band {
    /// Lower and upper bound multipliers `(C1, C2)`.
    #[must_use]
    pub fn multipliers(self) -> (f64, f64) {
        match self {
            Self::Wide => (0.5, 2.0),
            Self::P20 => (0.8, 1.2),
            Self::P10 => (0.9, 1.1),
        }
    }
}

/// Which column enters the basis in the primal simplex loop.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub enum PivotRuleKind {
    /// The column with the largest positive cost coefficient.
    #[default]
    LargestCoefficient,
    /// The first column with a positive cost coefficient.
    FirstProfitable,
}

/// All tunable parameters.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Config {
    /// Lower bound multiplier, in `(0, 1)`.
    pub c1: f64,
    /// Upper bound multiplier, above 1.
    pub c2: f64,
    /// Tolerance, positive.
    pub epsilon: f64,
    /// Ceiling on pivots after elimination.
    pub max_iterations: usize,
    /// Entering column selection.
    pub pivot_rule: PivotRuleKind,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_band(Band::default())
    }
}

impl Config {
    /// Default configuration with the bound multipliers of a band.
    #[must_use]
    pub fn with_band(band: Band) -> Self {
        let (c1, c2) = band.multipliers();

        Self {
            c1,
            c2,
            epsilon: EPSILON,
            max_iterations: MAX_ITERATIONS,
            pivot_rule: PivotRuleKind::default(),
        }
    }

    /// Check that the values can be used.
    ///
    /// # Errors
    ///
    /// When the multipliers don't satisfy `0 < C1 < 1 < C2`, epsilon is not positive or the
    /// iteration ceiling is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.c1 > 0.0 && self.c1 < 1.0) {
            return Err(ConfigError::LowerMultiplier(self.c1));
        }
        if !(self.c2 > 1.0) || !self.c2.is_finite() {
            return Err(ConfigError::UpperMultiplier(self.c2));
        }
        if !(self.epsilon > 0.0) {
            return Err(ConfigError::Epsilon(self.epsilon));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::IterationLimit);
        }

        Ok(())
    }
}

/// A configuration value is out of range.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// C1 is not in `(0, 1)`.
    #[error("lower bound multiplier C1 = {0} should lie strictly between 0 and 1")]
    LowerMultiplier(f64),
    /// C2 is not above 1.
    #[error("upper bound multiplier C2 = {0} should be larger than 1")]
    UpperMultiplier(f64),
    /// Epsilon is not positive.
    #[error("epsilon = {0} should be positive")]
    Epsilon(f64),
    /// The iteration ceiling is zero.
    #[error("the iteration ceiling should be positive")]
    IterationLimit,
}
