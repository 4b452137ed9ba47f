//! # Concept weight files
//!
//! One `concept weight` pair per line. The same format is used for the initial (IDF) weights and
//! for the optimized weights that are written back.
use crate::data::retrieval::{ConceptId, ConceptWeight};
use crate::data::sorted::SortedList;
use crate::io::error::ParseError;
use crate::io::{numbered_lines, parse_field};

/// Parse concept weights, keeping the order of the file.
///
/// # Errors
///
/// If a line doesn't hold exactly two numbers, or a concept is given more than once.
pub fn parse(contents: &str) -> Result<Vec<ConceptWeight>, ParseError> {
    let mut seen = SortedList::<ConceptId>::new();

    numbered_lines(contents)
        .map(|file_location| {
            let (_, line) = file_location;
            let [concept, weight] = line.split_whitespace().collect::<Vec<_>>()[..] else {
                return Err(ParseError::new("expected a concept and a weight", file_location));
            };
            let concept: ConceptId = parse_field(concept, "concept", file_location)?;
            let weight = parse_field(weight, "weight", file_location)?;

            if seen.contains(concept) {
                return Err(ParseError::new(format!("concept {concept} appears twice"), file_location));
            }
            seen.insert_or_fetch(concept, || concept);

            Ok(ConceptWeight::new(concept, weight))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use crate::data::retrieval::ConceptWeight;
    use crate::io::weights::parse;

    #[test]
    fn file_order() {
        let weights = parse("9 0.5\n2 1.25\n\n4 3\n").unwrap();
        assert_eq!(weights, vec![
            ConceptWeight::new(9, 0.5),
            ConceptWeight::new(2, 1.25),
            ConceptWeight::new(4, 3.0),
        ]);
    }

    #[test]
    fn duplicate() {
        let error = parse("9 0.5\n9 1.0\n").unwrap_err();
        assert_eq!(error.line_number(), 2);
    }

    #[test]
    fn malformed() {
        assert!(parse("9\n").is_err());
        assert!(parse("9 abc\n").is_err());
    }
}
