//! # Column assignment
//!
//! Only concepts shared between a query and a document of a preference that should be improved
//! are optimized. Each of them gets a column in the optimization matrix; all other concepts keep
//! their initial weight.
use crate::algorithm::equations::find_document;
use crate::data::retrieval::{ConceptId, ConceptWeight, DocumentTable, WeightVector};
use crate::data::retrieval::preference::Preference;
use crate::data::sorted::{Keyed, SortedList, union};
use crate::io::error::InconsistencyError;

/// An optimized concept and its column.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ConceptColumn {
    /// Concept being optimized.
    pub concept: ConceptId,
    /// Column index, counting from zero in the order the concepts were first seen.
    pub column: usize,
}

impl Keyed for ConceptColumn {
    type Key = ConceptId;

    fn key(&self) -> Self::Key {
        self.concept
    }
}

/// Bijection between optimized concepts and matrix columns.
#[derive(Eq, PartialEq, Clone, Debug, Default)]
pub struct ColumnAssignment {
    by_concept: SortedList<ConceptColumn>,
    by_column: Vec<ConceptId>,
}

impl ColumnAssignment {
    /// Assign columns to the concepts of preferences that contribute to the objective.
    ///
    /// For each such preference, the concepts shared by the query and the less relevant document
    /// are visited, then those shared by the query and the more relevant document. New concepts
    /// get the next column.
    ///
    /// # Errors
    ///
    /// If a preference refers to a query or document that is not in the table.
    pub fn assign(
        preferences: &[Preference],
        documents: &DocumentTable,
    ) -> Result<Self, InconsistencyError> {
        let mut assignment = Self::default();

        for preference in preferences.iter().filter(|preference| preference.kind.assigns_columns()) {
            let query = &find_document(documents, preference.query)?.concepts;
            for document in [preference.less_relevant, preference.more_relevant] {
                let document = &find_document(documents, document)?.concepts;
                for (shared, _) in union(query, document) {
                    assignment.add(shared.concept);
                }
            }
        }

        Ok(assignment)
    }

    fn add(&mut self, concept: ConceptId) {
        let next = self.by_column.len();
        let entry = self.by_concept.insert_or_fetch(concept, || ConceptColumn { concept, column: next });
        if entry.column == next {
            self.by_column.push(concept);
        }
    }

    /// Column of a concept, `None` if it is not optimized.
    #[must_use]
    pub fn column(&self, concept: ConceptId) -> Option<usize> {
        self.by_concept.lookup(concept).map(|entry| entry.column)
    }

    /// Concept belonging to a column.
    #[must_use]
    pub fn concept(&self, column: usize) -> ConceptId {
        debug_assert!(column < self.nr_columns());

        self.by_column[column]
    }

    /// Number of optimized concepts.
    #[must_use]
    pub fn nr_columns(&self) -> usize {
        self.by_column.len()
    }

    /// Optimized concepts by ascending concept identifier.
    pub fn iter(&self) -> impl Iterator<Item = &ConceptColumn> {
        self.by_concept.iter()
    }
}

/// The initial weights, split into those that are optimized and those that are kept.
#[derive(PartialEq, Clone, Debug)]
pub struct InitialWeights {
    /// Starting point of the optimization, by column.
    solution: Vec<f64>,
    /// Weights that are not optimized, in the order they were given.
    fixed: Vec<ConceptWeight>,
    /// Same as `fixed`, for lookups.
    fixed_by_concept: WeightVector,
}

impl InitialWeights {
    /// Split weights over the optimized columns and the fixed concepts.
    ///
    /// # Errors
    ///
    /// If an optimized concept has no initial weight.
    pub fn split(
        weights: &[ConceptWeight],
        columns: &ColumnAssignment,
    ) -> Result<Self, InconsistencyError> {
        let mut solution = vec![None; columns.nr_columns()];
        let mut fixed = Vec::new();
        for &entry in weights {
            match columns.column(entry.concept) {
                Some(column) => solution[column] = Some(entry.weight),
                None => fixed.push(entry),
            }
        }

        let solution = solution.into_iter()
            .enumerate()
            .map(|(column, weight)| weight.ok_or_else(|| InconsistencyError::new(format!(
                "optimized concept {} has no initial weight", columns.concept(column),
            ))))
            .collect::<Result<Vec<_>, _>>()?;
        let fixed_by_concept = fixed.iter().copied().collect();

        Ok(Self { solution, fixed, fixed_by_concept })
    }

    /// Initial value of each optimized column.
    #[must_use]
    pub fn solution(&self) -> &[f64] {
        &self.solution
    }

    /// Weight of a concept that is not optimized.
    #[must_use]
    pub fn fixed_weight(&self, concept: ConceptId) -> Option<f64> {
        self.fixed_by_concept.weight(concept)
    }

    /// Weights that are not optimized, in input order.
    #[must_use]
    pub fn fixed(&self) -> &[ConceptWeight] {
        &self.fixed
    }
}
