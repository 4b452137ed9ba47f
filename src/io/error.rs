//! # Error reporting for reading of input files
//!
//! A collection of enums and structures describing any problems encountered during reading,
//! parsing and cross-referencing of the input files.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// An `ImportError` is created when an error was encountered during IO or parsing.
///
/// It is the highest error in the io error hierarchy.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file to read isn't found, or the reading of file couldn't start or was interrupted.
    #[error("could not read {path:?}: {source}")]
    IO {
        /// File that was being read.
        path: PathBuf,
        /// What went wrong.
        source: io::Error,
    },
    /// Contents of the file could not be parsed.
    ///
    /// # Note
    ///
    /// If the contents refer to things that don't exist, that will not be represented with this
    /// error. This variant should only be created for syntactically incorrect files.
    #[error("{path:?}: {source}")]
    Parse {
        /// File that was being parsed.
        path: PathBuf,
        /// What went wrong, and where.
        source: ParseError,
    },
    /// There is a logical inconsistency between the input files.
    ///
    /// For example, a preference might refer to a document which is not known.
    #[error(transparent)]
    Inconsistency(#[from] InconsistencyError),
}

/// A `ParseError` represents a syntax error on a single line.
#[derive(Debug, Error)]
#[error("{description}, at line {line_number}: \"{line}\"")]
pub struct ParseError {
    description: String,
    line_number: u64,
    line: String,
}

impl ParseError {
    /// Create a new `ParseError`.
    ///
    /// # Arguments
    ///
    /// * `description`: What's wrong at the moment of creation.
    /// * `file_location`: The line number and line that caused the error.
    pub fn new(description: impl Into<String>, file_location: FileLocation) -> Self {
        let (line_number, line) = file_location;
        Self {
            description: description.into(),
            line_number,
            line: line.to_string(),
        }
    }

    /// Number of the offending line, counting from one.
    #[must_use]
    pub fn line_number(&self) -> u64 {
        self.line_number
    }
}

/// A `FileLocation` references a line in the file by the line number of the file as originally
/// read from the disk. It contains a reference to the line itself.
pub type FileLocation<'a> = (u64, &'a str);

/// An `InconsistencyError` is returned when input files contradict each other, or a file refers to
/// something that was never defined.
///
/// This `Error` is not returned when the optimization has no solution.
#[derive(Debug, Error)]
#[error("inconsistent input: {description}")]
pub struct InconsistencyError {
    description: String,
}

impl InconsistencyError {
    /// Wrap a text in an `InconsistencyError`.
    ///
    /// # Arguments
    ///
    /// * `description`: A human-readable text meant for the end user.
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into() }
    }
}
