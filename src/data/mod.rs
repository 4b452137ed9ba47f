//! # Data structures
//!
//! Sorted containers, the retrieval data model and numerical helpers.
pub mod numerical_precision;
pub mod retrieval;
pub mod sorted;
