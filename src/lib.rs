//! # Preference-driven concept weight optimization
//!
//! Documents and queries are sparse vectors over atomic concepts. Ranking a document against a
//! query gives a retrieval status value (RSV): the sum over shared concepts of the product of
//! both vector weights and the concept's own weight. Pairwise relevance preferences state which
//! of two documents should be ranked higher. This crate turns those preferences into a linear
//! program over the concept weights and solves it with a simplex method, starting from the IDF
//! weights, to find weights that satisfy as many preferences as possible.
//!
//! The simplex implementation follows the exchange-step formulation of Schwarz, "Numerische
//! Mathematik" (Teubner, 1986).
#![warn(missing_docs)]

pub mod algorithm;
pub mod config;
pub mod data;
pub mod io;

#[cfg(test)]
mod tests;
