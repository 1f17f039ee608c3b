use crate::matcher::enter;
use crate::{Expression, MatchError};

/// The outcome of matching an expression against a prefix of some symbols.
///
/// When `accepted`, `remainder` is the suffix the expression left unconsumed.
/// Otherwise it is the whole input, so the caller can try something else from the same
/// starting point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult<'s> {
    /// whether a prefix was matched
    pub accepted: bool,
    /// what is left of the input
    pub remainder: &'s [char],
}

impl<'s> MatchResult<'s> {
    fn accept(remainder: &'s [char]) -> Self {
        Self {
            accepted: true,
            remainder,
        }
    }

    fn reject(symbols: &'s [char]) -> Self {
        Self {
            accepted: false,
            remainder: symbols,
        }
    }

    /// Accepted, with nothing left over.
    pub fn is_full_match(&self) -> bool {
        self.accepted && self.remainder.is_empty()
    }
}

pub(crate) struct Greedy {
    recursion_limit: usize,
}

impl Greedy {
    pub(crate) fn new(recursion_limit: usize) -> Self {
        Self { recursion_limit }
    }

    pub(crate) fn step<'s>(
        &self,
        expr: &Expression,
        symbols: &'s [char],
        depth: usize,
    ) -> Result<MatchResult<'s>, MatchError> {
        enter(depth, self.recursion_limit)?;

        let result = match expr {
            Expression::CharMatch(c) => match symbols.split_first() {
                Some((first, rest)) if first == c => MatchResult::accept(rest),
                _ => MatchResult::reject(symbols),
            },
            Expression::Concat(l, r) => {
                let left = self.step(l, symbols, depth + 1)?;
                if !left.accepted {
                    return Ok(MatchResult::reject(symbols));
                }

                let right = self.step(r, left.remainder, depth + 1)?;
                if right.accepted {
                    right
                } else {
                    MatchResult::reject(symbols)
                }
            }
            Expression::Alternation(l, r) => {
                let left = self.step(l, symbols, depth + 1)?;
                let right = self.step(r, symbols, depth + 1)?;

                match (left.accepted, right.accepted) {
                    (true, true) if right.remainder.len() < left.remainder.len() => right,
                    (true, _) => left,
                    (false, true) => right,
                    (false, false) => MatchResult::reject(symbols),
                }
            }
            Expression::Repetition(inner) => {
                let mut current = symbols;
                loop {
                    let next = self.step(inner, current, depth + 1)?;
                    // an accepted match that consumed nothing would repeat forever
                    if !next.accepted || next.remainder.len() == current.len() {
                        break;
                    }
                    current = next.remainder;
                }
                MatchResult::accept(current)
            }
        };

        log::trace!(
            "greedy step at depth {depth}: accepted={} remainder={}",
            result.accepted,
            result.remainder.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::{Greedy, MatchResult};
    use crate::{symbols, Expression, MatchError, DEFAULT_RECURSION_LIMIT};

    #[ctor::ctor]
    fn init() {
        env_logger::init();
    }

    fn run<'s>(e: &Expression, symbols: &'s [char]) -> MatchResult<'s> {
        Greedy::new(DEFAULT_RECURSION_LIMIT)
            .step(e, symbols, 1)
            .unwrap()
    }

    #[test]
    fn char_match() {
        let h = Expression::literal('h');
        let input = symbols("he");

        assert_eq!(run(&h, &input), MatchResult::accept(&input[1..]));
        assert_eq!(run(&h, &input[1..]), MatchResult::reject(&input[1..]));
        assert_eq!(run(&h, &[]), MatchResult::reject(&[]));
    }

    #[test]
    fn rejection_returns_original_input() {
        let input = symbols("hex");
        let cases = [
            // left side fails
            Expression::concat('x', 'e'),
            // right side fails after the left side consumed something
            Expression::concat('h', 'x'),
            Expression::concat(Expression::word("he").unwrap(), 'y'),
            Expression::alternation('a', Expression::word("hey").unwrap()),
        ];

        for e in &cases {
            let result = run(e, &input);
            assert!(!result.accepted, "{e} should not match");
            assert_eq!(result.remainder.len(), input.len(), "{e} consumed input");
            assert_eq!(result.remainder, &input[..]);
        }
    }

    #[test]
    fn accepted_remainder_is_suffix() {
        let input = symbols("hello");
        let e = Expression::concat('h', Expression::repetition(Expression::one_of("el").unwrap()));
        let result = run(&e, &input);

        assert!(result.accepted);
        assert_eq!(result.remainder, &input[4..]);
        assert!(!result.is_full_match());
    }

    #[test]
    fn alternation_prefers_longest() {
        let input = symbols("he");
        let he = Expression::word("he").unwrap();

        let e = Expression::alternation('h', he.clone());
        assert!(run(&e, &input).is_full_match());

        let e = Expression::alternation(he.clone(), 'h');
        assert!(run(&e, &input).is_full_match());

        // the longest branch wins even when the shorter one would have let the rest match
        let e = Expression::concat(Expression::alternation('h', he), 'e');
        assert!(!run(&e, &input).accepted);
    }

    #[test]
    fn repetition_is_greedy() {
        let input = symbols("aab");
        let a_star = Expression::repetition('a');

        assert_eq!(run(&a_star, &input), MatchResult::accept(&input[2..]));
        assert_eq!(run(&a_star, &input[2..]), MatchResult::accept(&input[2..]));
        assert_eq!(run(&a_star, &[]), MatchResult::accept(&[]));

        // no backtracking into the repetition
        let e = Expression::concat(a_star, 'a');
        assert!(!run(&e, &input[..2]).accepted);
    }

    #[test]
    fn repetition_stops_without_progress() {
        let input = symbols("hheehx");
        let e = Expression::repetition(Expression::alternation(
            'h',
            Expression::repetition('e'),
        ));
        assert_eq!(run(&e, &input), MatchResult::accept(&input[5..]));

        let e = Expression::repetition(Expression::repetition(Expression::repetition('e')));
        assert_eq!(run(&e, &input), MatchResult::accept(&input[..]));
    }

    #[test]
    fn recursion_limit() {
        let e = Expression::repetition(Expression::concat('a', Expression::repetition('b')));
        let input = symbols("abb");

        assert!(Greedy::new(4).step(&e, &input, 1).unwrap().is_full_match());
        assert_eq!(
            Greedy::new(3).step(&e, &input, 1),
            Err(MatchError::RecursionLimitExceeded { limit: 3 })
        );
    }
}
