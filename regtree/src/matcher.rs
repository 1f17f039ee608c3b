use crate::exhaustive::Exhaustive;
use crate::greedy::{Greedy, MatchResult};
use crate::{symbols, Expression, MatchError};

/// Default for [`Matcher::recursion_limit`].
///
/// Either strategy matches a tree this deep on a 2 MiB thread stack, the size of a
/// spawned thread (and of every test thread) by default.
pub const DEFAULT_RECURSION_LIMIT: usize = 256;

/// How a [`Matcher`] explores the expression tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Every node commits to a single remainder.
    ///
    /// Alternations take the branch that consumed the most input (the left one on a tie),
    /// repetitions consume as much as they can, and a concatenation never revisits the
    /// split point its left side chose. So `a*a` does not match `"aa"`: the repetition
    /// takes both symbols and leaves nothing for the final `a`.
    Greedy,
    /// Every node yields all the remainders it can leave behind, and the input matches if
    /// any of them is empty. Accepts exactly the language of the expression.
    ///
    /// Nothing is memoized, so the running time is not bounded by the recursion or input
    /// limits: each concatenation re-matches its right side once per end of its left side.
    /// A chain of `k` repetitions such as `a*a*...a*` therefore costs on the order of
    /// `n^k` steps on an input of `n` symbols it does not match. Use
    /// [`Greedy`](Strategy::Greedy) when trees like that meet untrusted input.
    #[default]
    Exhaustive,
}

/// Settings used to match input against an [`Expression`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    /// How to explore the tree.
    pub strategy: Strategy,
    /// Maximum nesting of match calls. Matching an expression never nests deeper than its
    /// [`depth`](Expression::depth).
    pub recursion_limit: usize,
    /// Maximum number of input symbols, if any.
    pub max_input_len: Option<usize>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            max_input_len: None,
        }
    }
}

impl Matcher {
    /// Sets the [`Strategy`]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the maximum nesting of match calls
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Rejects inputs with more than `limit` symbols with [`MatchError::InputTooLong`]
    pub fn with_max_input_len(mut self, limit: usize) -> Self {
        self.max_input_len = Some(limit);
        self
    }

    /// Returns true if `expr` matches all of `input`. A match of only a prefix is not a match.
    pub fn is_match(&self, input: &str, expr: &Expression) -> Result<bool, MatchError> {
        let symbols = symbols(input);
        self.check_input(&symbols)?;

        let accepted = match self.strategy {
            Strategy::Greedy => Greedy::new(self.recursion_limit)
                .step(expr, &symbols, 1)?
                .is_full_match(),
            Strategy::Exhaustive => Exhaustive::new(self.recursion_limit)
                .ends(expr, &symbols, 0, 1)?
                .contains(&symbols.len()),
        };

        log::debug!(
            "{:?} match of {} symbols against {} nodes: {accepted}",
            self.strategy,
            symbols.len(),
            expr.size()
        );
        Ok(accepted)
    }

    /// Matches `expr` against a prefix of `symbols` the [`Greedy`](Strategy::Greedy) way,
    /// whatever strategy is configured.
    pub fn match_prefix<'s>(
        &self,
        expr: &Expression,
        symbols: &'s [char],
    ) -> Result<MatchResult<'s>, MatchError> {
        self.check_input(symbols)?;
        Greedy::new(self.recursion_limit).step(expr, symbols, 1)
    }

    /// All the suffixes of `symbols` that `expr` can leave unconsumed, starting with the
    /// shortest. Empty when `expr` matches no prefix at all.
    pub fn remainders<'s>(
        &self,
        expr: &Expression,
        symbols: &'s [char],
    ) -> Result<Vec<&'s [char]>, MatchError> {
        self.check_input(symbols)?;
        let ends = Exhaustive::new(self.recursion_limit).ends(expr, symbols, 0, 1)?;
        Ok(ends.into_iter().rev().map(|end| &symbols[end..]).collect())
    }

    fn check_input(&self, symbols: &[char]) -> Result<(), MatchError> {
        match self.max_input_len {
            Some(limit) if symbols.len() > limit => {
                log::warn!("refusing to match {} symbols (limit {limit})", symbols.len());
                Err(MatchError::InputTooLong {
                    len: symbols.len(),
                    limit,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Fails once `depth` nested match calls exceed `limit`.
pub(crate) fn enter(depth: usize, limit: usize) -> Result<(), MatchError> {
    if depth > limit {
        log::warn!("recursion limit of {limit} exceeded");
        Err(MatchError::RecursionLimitExceeded { limit })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Expression, MatchError, Matcher, Strategy};

    #[test]
    fn settings() {
        let m = Matcher::default();
        assert_eq!(m.strategy, Strategy::Exhaustive);
        assert_eq!(m.recursion_limit, crate::DEFAULT_RECURSION_LIMIT);
        assert_eq!(m.max_input_len, None);

        let m = m
            .with_strategy(Strategy::Greedy)
            .with_recursion_limit(3)
            .with_max_input_len(10);
        assert_eq!(m.strategy, Strategy::Greedy);
        assert_eq!(m.recursion_limit, 3);
        assert_eq!(m.max_input_len, Some(10));
    }

    #[test]
    fn input_limit_counts_symbols() {
        let any = Expression::repetition(Expression::one_of("aé").unwrap());
        let m = Matcher::default().with_max_input_len(2);

        // two symbols, three bytes
        assert_eq!(m.is_match("aé", &any), Ok(true));
        assert_eq!(
            m.is_match("aéa", &any),
            Err(MatchError::InputTooLong { len: 3, limit: 2 })
        );
        assert_eq!(
            m.remainders(&any, &['a', 'a', 'a']),
            Err(MatchError::InputTooLong { len: 3, limit: 2 })
        );
    }

    #[test]
    fn remainders_shortest_first() {
        let symbols = ['a', 'a', 'b'];
        let e = Expression::repetition('a');
        let remainders = Matcher::default().remainders(&e, &symbols).unwrap();
        assert_eq!(
            remainders,
            vec![&symbols[2..], &symbols[1..], &symbols[..]]
        );

        let none = Matcher::default()
            .remainders(&Expression::literal('b'), &symbols)
            .unwrap();
        assert!(none.is_empty());
    }
}
