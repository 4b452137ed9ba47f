//! # Integration tests
//!
//! Tests completely external from the crate, going through the files the command line tool
//! reads. All code written in this module could be written by an external user of the crate.
use std::fs;
use std::path::PathBuf;

use approx::assert_abs_diff_eq;

use concept_weights::algorithm::OptimizationResult;
use concept_weights::algorithm::evaluation::evaluate;
use concept_weights::algorithm::optimize::optimize;
use concept_weights::algorithm::preferences::{PreferenceStatistics, generate};
use concept_weights::algorithm::rsv::rank;
use concept_weights::config::Config;
use concept_weights::data::retrieval::WeightVector;
use concept_weights::io::error::ImportError;
use concept_weights::io::export::{write_preferences, write_weights};
use concept_weights::io::{
    import_documents, import_preferences, import_relevance, import_signs, import_weights, weights,
};

/// Two queries over five documents, described by signs.
const SIGNS: &str = "\
10:
1
2
20:
3
30:
4
5
";

const DOCUMENTS: &str = "\
-1
10 1.0
20 1.0
-2
30 1.0
20 0.5
1
10 1.0
2
20 1.0
3
20 0.5
30 0.5
4
30 1.0
5
10 0.5
30 0.5
";

const WEIGHTS: &str = "\
1 1.0
2 1.0
3 0.5
4 2.0
5 0.25
";

const RELEVANCE: &str = "\
1:
2
3
2:
3 2
5
";

/// A file in the temporary directory, removed when dropped.
struct Fixture(PathBuf);

impl Fixture {
    fn new(name: &str, contents: &str) -> Self {
        let path = std::env::temp_dir().join(format!("concept-weights-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        Self(path)
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

fn wrong(statistics: PreferenceStatistics) -> usize {
    statistics.unsatisfied + statistics.cost_only
}

#[test]
fn reranking_does_not_add_wrong_pairs() {
    let signs = Fixture::new("signs", SIGNS);
    let documents = Fixture::new("documents", DOCUMENTS);
    let weights = Fixture::new("weights", WEIGHTS);
    let relevance = Fixture::new("relevance", RELEVANCE);
    let config = Config::default();

    let signs = import_signs(&signs.0).unwrap();
    let documents = import_documents(&documents.0, None, Some(&signs)).unwrap();
    let initial = import_weights(&weights.0).unwrap();
    let relevance = import_relevance(&relevance.0).unwrap();

    let before = rank(&documents, &initial.iter().copied().collect::<WeightVector>()).unwrap();
    let generated = generate(&relevance, &before, None, &config).unwrap();
    assert!(wrong(generated.statistics) > 0);

    // Through a file, as the command line tool does
    let mut written = Vec::new();
    write_preferences(&mut written, &generated.preferences).unwrap();
    let preferences = Fixture::new("preferences", &String::from_utf8(written).unwrap());
    let preferences = import_preferences(&preferences.0).unwrap();
    assert_eq!(preferences.len(), generated.preferences.len());

    let OptimizationResult::FiniteOptimum(optimized) = optimize(&preferences, &documents, &initial, &config).unwrap() else {
        panic!("expected an optimum");
    };

    // Every concept exactly once, within the bounds of its initial weight
    assert_eq!(optimized.iter().count(), initial.len());
    for entry in optimized.iter() {
        let start = initial.iter().find(|initial| initial.concept == entry.concept).unwrap().weight;
        assert!(entry.weight >= config.c1 * start - config.epsilon);
        assert!(entry.weight <= config.c2 * start + config.epsilon);
    }

    let after = rank(&documents, &optimized.iter().copied().collect::<WeightVector>()).unwrap();
    let regenerated = generate(&relevance, &after, None, &config).unwrap();
    assert!(wrong(regenerated.statistics) <= wrong(generated.statistics));

    let precision_before = evaluate(&relevance, &before).unwrap().curve_sum();
    let precision_after = evaluate(&relevance, &after).unwrap().curve_sum();
    assert!(precision_before > 0.0 && precision_after > 0.0);
}

#[test]
fn written_weights_read_back() {
    let initial = weights::parse(WEIGHTS).unwrap();

    let mut written = Vec::new();
    write_weights(&mut written, &initial).unwrap();
    let read = weights::parse(&String::from_utf8(written).unwrap()).unwrap();

    for (left, right) in initial.iter().zip(&read) {
        assert_eq!(left.concept, right.concept);
        assert_abs_diff_eq!(left.weight, right.weight, epsilon = 1e-6);
    }
}

#[test]
fn parse_error_has_line_number() {
    let preferences = Fixture::new("broken-preferences", "+ -1 2 3\n\n- -1 x 3\n");

    match import_preferences(&preferences.0) {
        Err(ImportError::Parse { source, .. }) => assert_eq!(source.line_number(), 3),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn missing_file() {
    let path = std::env::temp_dir().join("concept-weights-does-not-exist");

    assert!(matches!(import_weights(&path), Err(ImportError::IO { .. })));
}

#[test]
fn undefined_sign() {
    let signs = Fixture::new("few-signs", "10:\n1\n");
    let documents = Fixture::new("sign-documents", "1\n99 1.0\n");

    let signs = import_signs(&signs.0).unwrap();
    assert!(matches!(
        import_documents(&documents.0, None, Some(&signs)),
        Err(ImportError::Inconsistency(_)),
    ));
}
