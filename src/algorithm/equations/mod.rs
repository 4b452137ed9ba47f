//! # Equation building
//!
//! Translating preferences, documents and initial weights into the rows of the optimization
//! matrix. Every row reads `Σ_k a_k x_k + c ≥ 0` over the optimized weights `x`.
use std::ops::{Index, IndexMut};

use tracing::{debug, info};

use crate::algorithm::equations::columns::{ColumnAssignment, InitialWeights};
use crate::config::Config;
use crate::data::retrieval::{Document, DocumentId, DocumentTable, WeightVector};
use crate::data::retrieval::preference::{Preference, PreferenceKind};
use crate::data::sorted::union;
use crate::io::error::InconsistencyError;

pub mod columns;

/// A dense row of coefficients followed by a constant.
///
/// Indexing with the number of variables gives the constant.
#[derive(Clone, Debug, PartialEq)]
pub struct Equation {
    values: Vec<f64>,
}

impl Equation {
    /// Row with all coefficients and the constant zero.
    #[must_use]
    pub fn zero(nr_variables: usize) -> Self {
        Self { values: vec![0.0; nr_variables + 1] }
    }

    /// Create a row from its parts.
    #[must_use]
    pub fn new(mut coefficients: Vec<f64>, constant: f64) -> Self {
        coefficients.push(constant);
        Self { values: coefficients }
    }

    /// Row with a single nonzero coefficient.
    #[must_use]
    pub fn unit(nr_variables: usize, column: usize, coefficient: f64, constant: f64) -> Self {
        debug_assert!(column < nr_variables);

        let mut row = Self::zero(nr_variables);
        row[column] = coefficient;
        row[nr_variables] = constant;
        row
    }

    /// Number of coefficients, excluding the constant.
    #[must_use]
    pub fn nr_variables(&self) -> usize {
        self.values.len() - 1
    }

    /// Coefficients, excluding the constant.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.values[..self.nr_variables()]
    }

    /// The constant.
    #[must_use]
    pub fn constant(&self) -> f64 {
        self.values[self.nr_variables()]
    }

    /// Mutable access to the constant.
    pub fn constant_mut(&mut self) -> &mut f64 {
        let index = self.nr_variables();
        &mut self.values[index]
    }

    /// Value of the row at a point.
    #[must_use]
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        debug_assert_eq!(x.len(), self.nr_variables());

        self.coefficients().iter().zip(x).map(|(a, x)| a * x).sum::<f64>() + self.constant()
    }

    /// Subtract another row, constant included.
    pub fn subtract(&mut self, other: &Self) {
        debug_assert_eq!(self.values.len(), other.values.len());

        for (value, other) in self.values.iter_mut().zip(&other.values) {
            *value -= other;
        }
    }
}

impl Index<usize> for Equation {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl IndexMut<usize> for Equation {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.values[index]
    }
}

/// Look up a document or query that a preference refers to.
pub(crate) fn find_document(
    documents: &DocumentTable,
    id: DocumentId,
) -> Result<&Document, InconsistencyError> {
    documents.lookup(id).ok_or_else(|| {
        let kind = if id < 0 { "query" } else { "document" };
        InconsistencyError::new(format!("{kind} {id} is referred to but was not read"))
    })
}

/// RSV of a document for a query, split into the optimized and the fixed part.
#[derive(Clone, Debug, PartialEq)]
pub struct DotProduct {
    /// Whether any of the coefficients is nonzero.
    pub has_optimized_overlap: bool,
    /// Product of query and document weight for each optimized column.
    pub coefficients: Vec<f64>,
    /// RSV contribution of the shared concepts that are not optimized.
    pub constant: f64,
}

/// Counts of how the preferences were used.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct BuildStatistics {
    /// Satisfied preferences that became a constraint.
    pub satisfied: usize,
    /// Unsatisfied preferences that became a constraint and part of the objective.
    pub unsatisfied: usize,
    /// Preferences that became part of the objective only.
    pub cost_only: usize,
    /// Preferences without any optimized concept in common with their query.
    pub dropped: usize,
}

/// All rows of the optimization, grouped by their role.
#[derive(Clone, Debug, PartialEq)]
pub struct Equations {
    /// Per column, the identity `x'_i + x0_i` giving the weight in original coordinates.
    pub translation: Vec<Equation>,
    /// Per constrained preference, the RSV difference that should stay non-negative.
    pub rsv: Vec<Equation>,
    /// Per column, `x_i − C1·x0_i ≥ 0`.
    pub lower_bound: Vec<Equation>,
    /// Per column, `−x_i + C2·x0_i ≥ 0`.
    pub upper_bound: Vec<Equation>,
    /// The objective, to be maximized.
    pub cost: Equation,
    /// What happened to the preferences.
    pub statistics: BuildStatistics,
}

/// Builds the rows for a fixed set of documents, columns and initial weights.
pub struct EquationBuilder<'a> {
    documents: &'a DocumentTable,
    columns: &'a ColumnAssignment,
    weights: &'a InitialWeights,
    config: &'a Config,
}

impl<'a> EquationBuilder<'a> {
    /// Create a new instance.
    pub fn new(
        documents: &'a DocumentTable,
        columns: &'a ColumnAssignment,
        weights: &'a InitialWeights,
        config: &'a Config,
    ) -> Self {
        debug_assert_eq!(columns.nr_columns(), weights.solution().len());

        Self { documents, columns, weights, config }
    }

    fn nr_variables(&self) -> usize {
        self.columns.nr_columns()
    }

    /// Split the RSV of a document for a query over the optimized columns and a constant.
    ///
    /// # Errors
    ///
    /// If a shared concept is neither optimized nor has an initial weight.
    pub fn dot_product(
        &self,
        query: &WeightVector,
        document: &WeightVector,
    ) -> Result<DotProduct, InconsistencyError> {
        let mut coefficients = vec![0.0; self.nr_variables()];
        let mut constant = 0.0;

        for (in_query, in_document) in union(query, document) {
            let product = in_query.weight * in_document.weight;
            match self.columns.column(in_query.concept) {
                Some(column) => coefficients[column] = product,
                None => {
                    let weight = self.weights.fixed_weight(in_query.concept).ok_or_else(|| {
                        InconsistencyError::new(format!("concept {} has no weight", in_query.concept))
                    })?;
                    constant += product * weight;
                }
            }
        }

        let has_optimized_overlap = coefficients.iter().any(|&coefficient| coefficient != 0.0);
        Ok(DotProduct { has_optimized_overlap, coefficients, constant })
    }

    fn dot_products(&self, preference: &Preference) -> Result<(DotProduct, DotProduct), InconsistencyError> {
        let query = &find_document(self.documents, preference.query)?.concepts;
        let less_relevant = &find_document(self.documents, preference.less_relevant)?.concepts;
        let more_relevant = &find_document(self.documents, preference.more_relevant)?.concepts;

        Ok((self.dot_product(query, less_relevant)?, self.dot_product(query, more_relevant)?))
    }

    /// Row of a single preference.
    ///
    /// The row is the RSV of the less relevant document minus that of the more relevant one,
    /// plus epsilon, negated for satisfied preferences.
    ///
    /// # Return value
    ///
    /// `None` if neither document shares an optimized concept with the query. Such a preference
    /// can't be influenced and is dropped.
    ///
    /// # Errors
    ///
    /// If the preference refers to an unknown document, or a concept lacks a weight.
    pub fn build_row(&self, preference: &Preference) -> Result<Option<Equation>, InconsistencyError> {
        let (less_relevant, more_relevant) = self.dot_products(preference)?;
        if !less_relevant.has_optimized_overlap && !more_relevant.has_optimized_overlap {
            return Ok(None);
        }

        let sign = preference.kind.sign();
        let coefficients = less_relevant.coefficients.iter()
            .zip(&more_relevant.coefficients)
            .map(|(less, more)| sign * (less - more))
            .collect();
        let constant = sign * (self.config.epsilon + less_relevant.constant - more_relevant.constant);

        Ok(Some(Equation::new(coefficients, constant)))
    }

    /// Number of preference rows that `build` would store.
    ///
    /// # Errors
    ///
    /// If a preference refers to an unknown document.
    pub fn count_rows(&self, preferences: &[Preference]) -> Result<usize, InconsistencyError> {
        let mut count = 0;
        for preference in preferences.iter().filter(|preference| preference.kind.is_constraint()) {
            let query = &find_document(self.documents, preference.query)?.concepts;
            let mut overlap = false;
            for document in [preference.less_relevant, preference.more_relevant] {
                let document = &find_document(self.documents, document)?.concepts;
                overlap |= union(query, document).any(|(in_query, in_document)| {
                    self.columns.column(in_query.concept).is_some()
                        && in_query.weight * in_document.weight != 0.0
                });
            }
            if overlap {
                count += 1;
            }
        }

        Ok(count)
    }

    /// Per column, a lower and an upper bound row around the initial weight.
    #[must_use]
    pub fn bound_rows(&self) -> (Vec<Equation>, Vec<Equation>) {
        let n = self.nr_variables();
        let lower = self.weights.solution().iter()
            .enumerate()
            .map(|(column, &weight)| Equation::unit(n, column, 1.0, -self.config.c1 * weight))
            .collect();
        let upper = self.weights.solution().iter()
            .enumerate()
            .map(|(column, &weight)| Equation::unit(n, column, -1.0, self.config.c2 * weight))
            .collect();

        (lower, upper)
    }

    /// Per column, the identity row `x'_i + x0_i`.
    #[must_use]
    pub fn translation_rows(&self) -> Vec<Equation> {
        let n = self.nr_variables();
        self.weights.solution().iter()
            .enumerate()
            .map(|(column, &weight)| Equation::unit(n, column, 1.0, weight))
            .collect()
    }

    /// Build all rows.
    ///
    /// # Errors
    ///
    /// If a preference refers to an unknown document, or a concept lacks a weight.
    pub fn build(&self, preferences: &[Preference]) -> Result<Equations, InconsistencyError> {
        info!(preferences = preferences.len(), columns = self.nr_variables(), "building equations");

        let rows = preferences.iter()
            .map(|preference| self.build_row(preference).map(|row| (preference.kind, row)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut statistics = BuildStatistics::default();
        for (kind, row) in &rows {
            match (kind, row) {
                (_, None) => statistics.dropped += 1,
                (PreferenceKind::Satisfied, Some(_)) => statistics.satisfied += 1,
                (PreferenceKind::Unsatisfied, Some(_)) => statistics.unsatisfied += 1,
                (PreferenceKind::CostOnly, Some(_)) => statistics.cost_only += 1,
            }
        }
        debug!(?statistics, "preferences converted");

        let cost = build_cost_row(
            self.nr_variables(),
            rows.iter().filter_map(|(kind, row)| row.as_ref().map(|row| (*kind, row))),
        );
        let rsv = rows.into_iter()
            .filter(|(kind, _)| kind.is_constraint())
            .filter_map(|(_, row)| row)
            .collect::<Vec<_>>();
        debug_assert_eq!(self.count_rows(preferences).ok(), Some(rsv.len()));

        let (lower_bound, upper_bound) = self.bound_rows();

        Ok(Equations {
            translation: self.translation_rows(),
            rsv,
            lower_bound,
            upper_bound,
            cost,
            statistics,
        })
    }
}

/// The objective: minus the sum of all rows that contribute to it.
///
/// Maximizing it pushes the violation of each unsatisfied preference down.
pub fn build_cost_row<'r>(
    nr_variables: usize,
    rows: impl IntoIterator<Item = (PreferenceKind, &'r Equation)>,
) -> Equation {
    let mut cost = Equation::zero(nr_variables);
    for (_, row) in rows.into_iter().filter(|(kind, _)| kind.is_cost()) {
        cost.subtract(row);
    }

    cost
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use crate::algorithm::equations::{Equation, EquationBuilder, build_cost_row};
    use crate::algorithm::equations::columns::{ColumnAssignment, InitialWeights};
    use crate::config::Config;
    use crate::data::retrieval::{ConceptWeight, Document, DocumentTable};
    use crate::data::retrieval::preference::{Preference, PreferenceKind};

    fn document(id: i64, concepts: &[(i64, f64)]) -> Document {
        let mut document = Document::new(id);
        for &(concept, weight) in concepts {
            document.concepts.accumulate(concept, weight);
        }
        document
    }

    fn documents() -> DocumentTable {
        vec![
            document(-1, &[(1, 1.0), (2, 2.0), (9, 1.0)]),
            document(10, &[(1, 1.0)]),
            document(11, &[(2, 1.0)]),
            document(12, &[(9, 3.0)]),
            document(13, &[(5, 3.0)]),
        ].into_iter().collect()
    }

    fn weights() -> Vec<ConceptWeight> {
        vec![
            ConceptWeight::new(1, 1.0),
            ConceptWeight::new(2, 2.0),
            ConceptWeight::new(5, 1.0),
            ConceptWeight::new(9, 0.5),
        ]
    }

    fn preferences() -> Vec<Preference> {
        vec![
            Preference { kind: PreferenceKind::Unsatisfied, query: -1, less_relevant: 10, more_relevant: 11 },
            Preference { kind: PreferenceKind::Satisfied, query: -1, less_relevant: 12, more_relevant: 10 },
            Preference { kind: PreferenceKind::Satisfied, query: -1, less_relevant: 12, more_relevant: 13 },
            Preference { kind: PreferenceKind::CostOnly, query: -1, less_relevant: 10, more_relevant: 11 },
        ]
    }

    #[test]
    fn equation_access() {
        let mut row = Equation::new(vec![1.0, -2.0], 0.5);
        assert_eq!(row.nr_variables(), 2);
        assert_eq!(row.coefficients(), &[1.0, -2.0]);
        assert_eq!(row.constant(), 0.5);
        assert_eq!(row[2], 0.5);
        assert_abs_diff_eq!(row.evaluate(&[3.0, 1.0]), 1.5);

        *row.constant_mut() = 1.0;
        row.subtract(&Equation::unit(2, 1, 1.0, 0.25));
        assert_eq!(row, Equation::new(vec![1.0, -3.0], 0.75));
    }

    #[test]
    fn dot_product_with_itself() {
        let documents = documents();
        let columns = ColumnAssignment::assign(&preferences(), &documents).unwrap();
        let initial = InitialWeights::split(&weights(), &columns).unwrap();
        let config = Config::default();
        let builder = EquationBuilder::new(&documents, &columns, &initial, &config);

        // Concepts 1 and 2 are optimized, 9 is not
        assert_eq!(columns.nr_columns(), 2);
        let query = &documents.lookup(-1).unwrap().concepts;
        let product = builder.dot_product(query, query).unwrap();
        assert!(product.has_optimized_overlap);
        assert_eq!(product.coefficients, vec![1.0, 4.0]);
        assert_abs_diff_eq!(product.constant, 0.5);

        let unrelated = &documents.lookup(13).unwrap().concepts;
        let product = builder.dot_product(query, unrelated).unwrap();
        assert!(!product.has_optimized_overlap);
        assert_eq!(product.constant, 0.0);
    }

    #[test]
    fn rows_and_cost() {
        let documents = documents();
        let preferences = preferences();
        let columns = ColumnAssignment::assign(&preferences, &documents).unwrap();
        let initial = InitialWeights::split(&weights(), &columns).unwrap();
        let config = Config::default();
        let builder = EquationBuilder::new(&documents, &columns, &initial, &config);

        let equations = builder.build(&preferences).unwrap();

        // The last satisfied preference has no optimized concept
        assert_eq!(equations.statistics.dropped, 1);
        assert_eq!(equations.statistics.satisfied, 1);
        assert_eq!(equations.statistics.unsatisfied, 1);
        assert_eq!(equations.statistics.cost_only, 1);
        assert_eq!(equations.rsv.len(), 2);
        assert_eq!(builder.count_rows(&preferences).unwrap(), 2);

        // v(10) = x1, v(11) = 2 x2
        let unsatisfied = &equations.rsv[0];
        assert_eq!(unsatisfied.coefficients(), &[1.0, -2.0]);
        assert_abs_diff_eq!(unsatisfied.constant(), config.epsilon);
        // v(12) = 3 * 0.5 through the fixed concept, negated
        let satisfied = &equations.rsv[1];
        assert_eq!(satisfied.coefficients(), &[1.0, 0.0]);
        assert_abs_diff_eq!(satisfied.constant(), -(config.epsilon + 1.5));

        // Unsatisfied and cost only rows are identical here
        assert_eq!(equations.cost.coefficients(), &[-2.0, 4.0]);
        assert_abs_diff_eq!(equations.cost.constant(), -2.0 * config.epsilon);
    }

    #[test]
    fn bounds_and_translation() {
        let documents = documents();
        let preferences = preferences();
        let columns = ColumnAssignment::assign(&preferences, &documents).unwrap();
        let initial = InitialWeights::split(&weights(), &columns).unwrap();
        let config = Config::default();
        let builder = EquationBuilder::new(&documents, &columns, &initial, &config);

        let (lower, upper) = builder.bound_rows();
        assert_eq!(lower[1], Equation::new(vec![0.0, 1.0], -1.0));
        assert_eq!(upper[1], Equation::new(vec![0.0, -1.0], 4.0));
        assert_eq!(builder.translation_rows()[0], Equation::new(vec![1.0, 0.0], 1.0));
    }

    #[test]
    fn satisfied_rows_do_not_cost() {
        let satisfied = Equation::new(vec![1.0], 1.0);
        let unsatisfied = Equation::new(vec![2.0], 0.5);

        let cost = build_cost_row(1, [
            (PreferenceKind::Satisfied, &satisfied),
            (PreferenceKind::Unsatisfied, &unsatisfied),
            (PreferenceKind::CostOnly, &unsatisfied),
        ]);
        assert_eq!(cost, Equation::new(vec![-4.0], -1.0));
    }
}
