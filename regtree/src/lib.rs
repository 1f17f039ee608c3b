#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use thiserror::Error;

pub use regtree_expressions::*;

mod exhaustive;
mod greedy;
mod matcher;

pub use greedy::MatchResult;
pub use matcher::{Matcher, Strategy, DEFAULT_RECURSION_LIMIT};

/// Resource limits that stopped a match before it reached an answer.
///
/// Not matching is never an error: that is `Ok(false)`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// Matching nested deeper than [`Matcher::recursion_limit`].
    #[error("recursion limit of {limit} nested match calls exceeded")]
    RecursionLimitExceeded {
        /// the configured limit
        limit: usize,
    },
    /// The input had more symbols than [`Matcher::max_input_len`].
    #[error("input of {len} symbols exceeds the limit of {limit}")]
    InputTooLong {
        /// number of symbols in the input
        len: usize,
        /// the configured limit
        limit: usize,
    },
}

/// Splits a string into the symbols the matcher consumes: one per `char`.
pub fn symbols(input: &str) -> Vec<char> {
    input.chars().collect()
}

/// Returns true if `expr` matches all of `input`, using [`Matcher::default`].
///
/// ```rust
/// use regtree::{is_match, Expression};
///
/// let ab = Expression::concat('a', Expression::repetition('b'));
/// assert!(is_match("abbb", &ab).unwrap());
/// assert!(!is_match("abba", &ab).unwrap());
/// ```
pub fn is_match(input: &str, expr: &Expression) -> Result<bool, MatchError> {
    Matcher::default().is_match(input, expr)
}
