use thiserror::Error;

mod expression;

#[cfg(feature = "dot")]
mod dot;

pub use expression::Expression;

/// Reasons an [`Expression`] could not be built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The literal (or the text of a derived builder) held no symbols.
    #[error("literal is empty, expected exactly one symbol")]
    EmptyLiteral,
    /// A single-symbol literal held `count` symbols.
    #[error("literal {literal:?} has {count} symbols, expected exactly one")]
    MultiSymbolLiteral { literal: String, count: usize },
}
