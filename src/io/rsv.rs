//! # RSV files
//!
//! One `query document rsv` triple per line, grouped by query.
use crate::data::retrieval::RsvValue;
use crate::io::error::ParseError;
use crate::io::{numbered_lines, parse_field};

/// Parse retrieval status values, keeping the order of the file.
///
/// # Errors
///
/// If a line doesn't hold exactly three numbers.
pub fn parse(contents: &str) -> Result<Vec<RsvValue>, ParseError> {
    numbered_lines(contents)
        .map(|file_location| {
            let (_, line) = file_location;
            let [query, document, rsv] = line.split_whitespace().collect::<Vec<_>>()[..] else {
                return Err(ParseError::new("expected a query, a document and a value", file_location));
            };

            Ok(RsvValue {
                query: parse_field(query, "query", file_location)?,
                document: parse_field(document, "document", file_location)?,
                rsv: parse_field(rsv, "rsv", file_location)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use crate::data::retrieval::RsvValue;
    use crate::io::rsv::parse;

    #[test]
    fn triples() {
        let values = parse("-1\t10\t0.500000\n-1 11 2\n").unwrap();
        assert_eq!(values, vec![
            RsvValue { query: -1, document: 10, rsv: 0.5 },
            RsvValue { query: -1, document: 11, rsv: 2.0 },
        ]);

        assert!(parse("-1 10\n").is_err());
    }
}
