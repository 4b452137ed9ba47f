//! # Reading and writing of retrieval data
//!
//! All inputs are line oriented text files with whitespace separated fields. Each file is read
//! into memory completely and then parsed; blank lines are skipped.
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::data::retrieval::{ConceptWeight, DocumentId, DocumentTable, RsvValue, SignTable};
use crate::data::retrieval::preference::Preference;
use crate::data::retrieval::relevance::RelevanceTable;
use crate::data::sorted::SortedList;
use crate::io::error::{FileLocation, ImportError, ParseError};

pub mod documents;
pub mod error;
pub mod export;
pub mod preferences;
pub mod relevance;
pub mod rsv;
pub mod weights;

/// Read a file and parse its contents.
///
/// # Arguments
///
/// * `file_path`: File to read.
/// * `parse`: Parser for the contents.
///
/// # Errors
///
/// When the file cannot be read, or the parser rejects its contents.
fn import<T>(
    file_path: &Path,
    parse: impl FnOnce(&str) -> Result<T, ParseError>,
) -> Result<T, ImportError> {
    debug!(path = %file_path.display(), "reading");
    let contents = fs::read_to_string(file_path)
        .map_err(|source| ImportError::IO { path: file_path.to_path_buf(), source })?;

    parse(&contents)
        .map_err(|source| ImportError::Parse { path: file_path.to_path_buf(), source })
}

/// Import preferences, see `preferences::parse`.
pub fn import_preferences(file_path: &Path) -> Result<Vec<Preference>, ImportError> {
    import(file_path, preferences::parse)
}

/// Import sign definitions, see `documents::parse_signs`.
pub fn import_signs(file_path: &Path) -> Result<SignTable, ImportError> {
    import(file_path, documents::parse_signs)
}

/// Import documents and queries.
///
/// # Arguments
///
/// * `file_path`: Document file, see `documents::parse`.
/// * `filter`: If given, documents with an identifier not in this list are skipped.
/// * `signs`: If given, the second column of the entries holds sign identifiers, which are
/// expanded to their atomic concepts.
///
/// # Errors
///
/// When the file can't be read or parsed, or refers to an unknown sign.
pub fn import_documents(
    file_path: &Path,
    filter: Option<&SortedList<DocumentId>>,
    signs: Option<&SignTable>,
) -> Result<DocumentTable, ImportError> {
    let documents = import(file_path, |contents| documents::parse(contents, filter))?;

    match signs {
        Some(signs) => Ok(documents::expand_signs(documents, signs)?),
        None => Ok(documents),
    }
}

/// Import concept weights, see `weights::parse`.
pub fn import_weights(file_path: &Path) -> Result<Vec<ConceptWeight>, ImportError> {
    import(file_path, weights::parse)
}

/// Import relevance judgments, see `relevance::parse`.
pub fn import_relevance(file_path: &Path) -> Result<RelevanceTable, ImportError> {
    import(file_path, relevance::parse)
}

/// Import retrieval status values, see `rsv::parse`.
pub fn import_rsv(file_path: &Path) -> Result<Vec<RsvValue>, ImportError> {
    import(file_path, rsv::parse)
}

/// Non-blank lines with their line number, counting from one.
fn numbered_lines(contents: &str) -> impl Iterator<Item = FileLocation<'_>> {
    contents.lines()
        .enumerate()
        .map(|(index, line)| (index as u64 + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

/// Parse a single whitespace separated field.
///
/// # Arguments
///
/// * `field`: Text of the field.
/// * `name`: Name of the field, used in the error message.
/// * `file_location`: Line the field was read from.
fn parse_field<T: FromStr>(
    field: &str,
    name: &str,
    file_location: FileLocation,
) -> Result<T, ParseError> {
    field.parse()
        .map_err(|_| ParseError::new(format!("invalid {name} \"{field}\""), file_location))
}

#[cfg(test)]
mod test {
    use crate::io::{numbered_lines, parse_field};

    #[test]
    fn skip_blank_lines() {
        let lines = numbered_lines("a\n\n  \nb\n").collect::<Vec<_>>();
        assert_eq!(lines, vec![(1, "a"), (4, "b")]);
    }

    #[test]
    fn field() {
        assert_eq!(parse_field::<i64>("-12", "query", (1, "-12")).ok(), Some(-12));

        let error = parse_field::<i64>("x", "query", (7, "x 1")).unwrap_err();
        assert_eq!(error.line_number(), 7);
    }
}
