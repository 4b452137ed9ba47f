//! # Relevance files
//!
//! Blocks starting with a `query:` header, followed by one `document [level]` line per relevant
//! document. The level defaults to one. Query numbers may be written with or without their sign;
//! they are stored as negative identifiers.
use crate::data::retrieval::{DocumentId, query_identifier};
use crate::data::retrieval::relevance::{RelevanceJudgment, RelevanceTable, RelevantDocument};
use crate::io::error::ParseError;
use crate::io::{numbered_lines, parse_field};

/// Parse relevance judgments.
///
/// # Errors
///
/// If a document appears before any query header, or a field is not a number.
pub fn parse(contents: &str) -> Result<RelevanceTable, ParseError> {
    let mut judgments = RelevanceTable::new();
    let mut current: Option<DocumentId> = None;

    for file_location in numbered_lines(contents) {
        let (_, line) = file_location;
        if let Some((query, _)) = line.split_once(':') {
            let query: DocumentId = parse_field(query.trim(), "query", file_location)?;
            let query = query_identifier(query)
                .ok_or_else(|| ParseError::new("query number out of range", file_location))?;
            judgments.insert_or_fetch(query, || RelevanceJudgment::new(query));
            current = Some(query);
            continue;
        }

        let (document, level) = match line.split_whitespace().collect::<Vec<_>>()[..] {
            [document] => (document, None),
            [document, level] => (document, Some(level)),
            _ => return Err(ParseError::new("expected a document and an optional level", file_location)),
        };
        let document = parse_field(document, "document", file_location)?;
        let level = match level {
            Some(level) => parse_field(level, "relevance level", file_location)?,
            None => 1,
        };

        let judgment = current
            .and_then(|query| judgments.lookup_mut(query))
            .ok_or_else(|| ParseError::new("document before the first query", file_location))?;
        judgment.relevant.insert_or_fetch(document, || RelevantDocument { document, level }).level = level;
    }

    Ok(judgments)
}

#[cfg(test)]
mod test {
    use crate::io::relevance::parse;

    #[test]
    fn levels() {
        let judgments = parse("1:\n10\n11 2\n-2:\n20 3\n").unwrap();

        assert_eq!(judgments.keys().collect::<Vec<_>>(), vec![-2, -1]);
        let first = judgments.lookup(-1).unwrap();
        assert_eq!(first.level(10), 1);
        assert_eq!(first.level(11), 2);
        assert_eq!(first.level(12), 0);
        assert_eq!(judgments.lookup(-2).unwrap().level(20), 3);
    }

    #[test]
    fn document_before_query() {
        assert!(parse("10\n1:\n").is_err());
    }

    #[test]
    fn query_out_of_range() {
        let error = parse("1:\n10\n-9223372036854775808:\n20\n").unwrap_err();
        assert_eq!(error.line_number(), 3);
    }
}
