use crate::matcher::enter;
use crate::{Expression, MatchError};
use std::collections::BTreeSet;

/// Computes every position an expression can stop at. The set stands in for the set of
/// remainders: positions are offsets into the input the top-level match started from.
pub(crate) struct Exhaustive {
    recursion_limit: usize,
}

impl Exhaustive {
    pub(crate) fn new(recursion_limit: usize) -> Self {
        Self { recursion_limit }
    }

    /// All end positions of `expr` matched from `start`.
    pub(crate) fn ends(
        &self,
        expr: &Expression,
        input: &[char],
        start: usize,
        depth: usize,
    ) -> Result<BTreeSet<usize>, MatchError> {
        let mut ends = BTreeSet::new();
        self.collect(expr, input, start, depth, &mut ends)?;
        Ok(ends)
    }

    /// Adds the end positions of `expr` matched from `start` to `ends`.
    ///
    /// Results accumulate in the caller's set, which keeps each level of recursion small.
    fn collect(
        &self,
        expr: &Expression,
        input: &[char],
        start: usize,
        depth: usize,
        ends: &mut BTreeSet<usize>,
    ) -> Result<(), MatchError> {
        enter(depth, self.recursion_limit)?;

        match expr {
            Expression::CharMatch(c) => {
                if input.get(start) == Some(c) {
                    ends.insert(start + 1);
                }
            }
            Expression::Concat(l, r) => {
                for middle in self.ends(l, input, start, depth + 1)? {
                    self.collect(r, input, middle, depth + 1, ends)?;
                }
            }
            Expression::Alternation(l, r) => {
                self.collect(l, input, start, depth + 1, ends)?;
                self.collect(r, input, start, depth + 1, ends)?;
            }
            Expression::Repetition(inner) => {
                let mut reached = BTreeSet::from([start]);
                let mut work_list = vec![start];
                let mut next = BTreeSet::new();

                // positions already reached are not expanded again, so inner matches
                // that consume nothing end the search
                while let Some(position) = work_list.pop() {
                    self.collect(inner, input, position, depth + 1, &mut next)?;
                    for end in std::mem::take(&mut next) {
                        if reached.insert(end) {
                            work_list.push(end);
                        }
                    }
                }
                ends.extend(reached);
            }
        }

        log::trace!("exhaustive step from {start} at depth {depth}");
        Ok(())
    }
}
