//! # Preferences
//!
//! A preference states that, for a query, one document is less relevant than another.
use crate::data::retrieval::DocumentId;

/// How a preference takes part in the optimization.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum PreferenceKind {
    /// Already satisfied by the current weights. Kept satisfied by a constraint, written `+`.
    Satisfied,
    /// Not satisfied by the current weights. Constrained, and its violation is added to the
    /// objective. Written `-`.
    Unsatisfied,
    /// Only added to the objective, written `C`.
    CostOnly,
}

impl PreferenceKind {
    /// Kind belonging to the first field of a preference line.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Satisfied),
            '-' => Some(Self::Unsatisfied),
            'C' => Some(Self::CostOnly),
            _ => None,
        }
    }

    /// Symbol used in preference files.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Satisfied => '+',
            Self::Unsatisfied => '-',
            Self::CostOnly => 'C',
        }
    }

    /// Whether the concepts of the documents involved are optimized.
    #[must_use]
    pub fn assigns_columns(self) -> bool {
        matches!(self, Self::Unsatisfied | Self::CostOnly)
    }

    /// Whether a row of the matrix is stored for this preference.
    #[must_use]
    pub fn is_constraint(self) -> bool {
        matches!(self, Self::Satisfied | Self::Unsatisfied)
    }

    /// Whether the row of this preference is subtracted from the objective.
    #[must_use]
    pub fn is_cost(self) -> bool {
        matches!(self, Self::Unsatisfied | Self::CostOnly)
    }

    /// Orientation of the row of this preference.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Satisfied => -1.0,
            Self::Unsatisfied | Self::CostOnly => 1.0,
        }
    }
}

/// The less relevant document should be ranked below the more relevant one for this query.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Preference {
    /// Role in the optimization.
    pub kind: PreferenceKind,
    /// Negative identifier of the query.
    pub query: DocumentId,
    /// The document that should have the lower RSV.
    pub less_relevant: DocumentId,
    /// The document that should have the higher RSV.
    pub more_relevant: DocumentId,
}

#[cfg(test)]
mod test {
    use crate::data::retrieval::preference::PreferenceKind;

    #[test]
    fn symbols() {
        for kind in [PreferenceKind::Satisfied, PreferenceKind::Unsatisfied, PreferenceKind::CostOnly] {
            assert_eq!(PreferenceKind::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(PreferenceKind::from_symbol('x'), None);
    }

    #[test]
    fn roles() {
        assert!(PreferenceKind::Satisfied.is_constraint());
        assert!(!PreferenceKind::Satisfied.is_cost());
        assert!(!PreferenceKind::Satisfied.assigns_columns());

        assert!(PreferenceKind::Unsatisfied.is_constraint());
        assert!(PreferenceKind::Unsatisfied.is_cost());

        assert!(!PreferenceKind::CostOnly.is_constraint());
        assert!(PreferenceKind::CostOnly.is_cost());
        assert!(PreferenceKind::CostOnly.assigns_columns());
    }
}
