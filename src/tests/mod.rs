//! # Scenario tests that require a look inside the crate.
//!
//! Each scenario starts from the text of the input files and follows the data through the
//! intermediate forms:
//!
//! * `const *_FILE` literal file contents
//! * `fn equations()` the rows built from them
//! * `fn tableau()` the rows after translation to the initial weights
pub mod one_query;
