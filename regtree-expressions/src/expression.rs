use crate::ConstructionError;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, OnceLock};

/// A node of a regular expression tree.
///
/// Trees are immutable once built. Children are reference counted, so cloning a tree
/// or reusing a subtree in several parents is cheap, and a tree can be matched from
/// many threads at once.
#[derive(Hash, Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// Matches exactly one literal symbol.
    CharMatch(char),
    /// Matches the left expression immediately followed by the right one.
    Concat(Arc<Expression>, Arc<Expression>),
    /// Matches either the left or the right expression.
    Alternation(Arc<Expression>, Arc<Expression>),
    /// Matches the inner expression zero or more times.
    Repetition(Arc<Expression>),
}

impl Expression {
    /// Builds a [`CharMatch`](Expression::CharMatch) from a literal that must hold exactly
    /// one symbol (one `char`, not one byte).
    pub fn char_match(literal: &str) -> Result<Self, ConstructionError> {
        let mut chars = literal.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Err(ConstructionError::EmptyLiteral),
            (Some(symbol), None) => Ok(Expression::CharMatch(symbol)),
            (Some(_), Some(_)) => Err(ConstructionError::MultiSymbolLiteral {
                literal: literal.to_string(),
                count: literal.chars().count(),
            }),
        }
    }

    /// Matches exactly `symbol`.
    pub fn literal(symbol: char) -> Self {
        Expression::CharMatch(symbol)
    }

    /// Matches `left` immediately followed by `right`.
    pub fn concat(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Expression::Concat(Arc::new(left.into()), Arc::new(right.into()))
    }

    /// Matches `left` or `right`.
    pub fn alternation(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Expression::Alternation(Arc::new(left.into()), Arc::new(right.into()))
    }

    /// Matches `inner` zero or more times.
    pub fn repetition(inner: impl Into<Expression>) -> Self {
        Expression::Repetition(Arc::new(inner.into()))
    }

    /// One or more repetitions: `a+` is `a a*`. Both occurrences share one subtree.
    pub fn plus(inner: impl Into<Expression>) -> Self {
        let inner = Arc::new(inner.into());
        Expression::Concat(inner.clone(), Expression::Repetition(inner).into())
    }

    /// Left-folds the expressions into nested concatenations.
    ///
    /// Returns `None` when there is nothing to concatenate.
    pub fn concat_all(parts: impl IntoIterator<Item = Expression>) -> Option<Self> {
        parts.into_iter().reduce(Expression::concat)
    }

    /// Left-folds the expressions into nested alternations: `a | b | c` becomes
    /// `(a | b) | c`.
    ///
    /// Returns `None` when there are no branches.
    pub fn alternation_all(branches: impl IntoIterator<Item = Expression>) -> Option<Self> {
        branches.into_iter().reduce(Expression::alternation)
    }

    /// Matches exactly the given text, one [`CharMatch`](Expression::CharMatch) per symbol.
    pub fn word(text: &str) -> Result<Self, ConstructionError> {
        Self::concat_all(text.chars().map(Expression::literal))
            .ok_or(ConstructionError::EmptyLiteral)
    }

    /// A character class: matches any one of the given symbols.
    pub fn one_of(symbols: &str) -> Result<Self, ConstructionError> {
        Self::alternation_all(symbols.chars().map(Expression::literal))
            .ok_or(ConstructionError::EmptyLiteral)
    }

    /// The direct subexpressions, left to right.
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::CharMatch(_) => vec![],
            Expression::Concat(l, r) | Expression::Alternation(l, r) => vec![&**l, &**r],
            Expression::Repetition(i) => vec![&**i],
        }
    }

    /// Returns true if the expression accepts the empty string.
    pub fn is_nullable(&self) -> bool {
        match self {
            Expression::CharMatch(_) => false,
            Expression::Concat(l, r) => l.is_nullable() && r.is_nullable(),
            Expression::Alternation(l, r) => l.is_nullable() || r.is_nullable(),
            Expression::Repetition(_) => true,
        }
    }

    /// Every symbol that occurs in a [`CharMatch`](Expression::CharMatch) of the tree.
    pub fn alphabet(&self) -> BTreeSet<char> {
        let mut alphabet = BTreeSet::new();
        let mut work_list = vec![self];
        while let Some(node) = work_list.pop() {
            if let Expression::CharMatch(c) = node {
                alphabet.insert(*c);
            }
            work_list.extend(node.children());
        }
        alphabet
    }

    /// Number of nodes on the longest path from this node to a leaf, this node included.
    ///
    /// Matching never nests deeper than this.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut work_list = vec![(self, 1)];
        while let Some((node, depth)) = work_list.pop() {
            deepest = deepest.max(depth);
            work_list.extend(node.children().into_iter().map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// Total number of nodes. Shared subtrees are counted once per parent.
    pub fn size(&self) -> usize {
        let mut size = 0;
        let mut work_list = vec![self];
        while let Some(node) = work_list.pop() {
            size += 1;
            work_list.extend(node.children());
        }
        size
    }

    /// Moves the children out of this node onto `work_list`, leaving shared placeholder
    /// leaves behind.
    fn take_children(&mut self, work_list: &mut Vec<Arc<Expression>>) {
        static PLACEHOLDER: OnceLock<Arc<Expression>> = OnceLock::new();
        let placeholder = || {
            PLACEHOLDER
                .get_or_init(|| Arc::new(Expression::CharMatch('\0')))
                .clone()
        };

        match self {
            Expression::CharMatch(_) => {}
            Expression::Concat(l, r) | Expression::Alternation(l, r) => {
                work_list.push(std::mem::replace(l, placeholder()));
                work_list.push(std::mem::replace(r, placeholder()));
            }
            Expression::Repetition(i) => work_list.push(std::mem::replace(i, placeholder())),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expression::Alternation(_, _) => 0,
            Expression::Concat(_, _) => 1,
            Expression::Repetition(_) => 2,
            Expression::CharMatch(_) => 3,
        }
    }

    fn fmt_operand(&self, f: &mut Formatter<'_>, min_precedence: u8) -> std::fmt::Result {
        if self.precedence() < min_precedence {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl Drop for Expression {
    // the derived drop glue recurses once per level, so deep trees are taken apart here
    fn drop(&mut self) {
        if let Expression::CharMatch(_) = self {
            return;
        }

        let mut work_list = Vec::new();
        self.take_children(&mut work_list);
        while let Some(child) = work_list.pop() {
            // subtrees still referenced elsewhere stay alive and are not descended into
            if let Ok(mut node) = Arc::try_unwrap(child) {
                node.take_children(&mut work_list);
            }
        }
    }
}

impl From<char> for Expression {
    fn from(symbol: char) -> Self {
        Expression::CharMatch(symbol)
    }
}

impl TryFrom<&str> for Expression {
    type Error = ConstructionError;

    fn try_from(literal: &str) -> Result<Self, Self::Error> {
        Expression::char_match(literal)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::CharMatch(c) if matches!(*c, '(' | ')' | '|' | '*' | '\\') => {
                write!(f, "\\{c}")
            }
            Expression::CharMatch(c) => write!(f, "{c}"),
            Expression::Concat(l, r) => {
                l.fmt_operand(f, 1)?;
                r.fmt_operand(f, 1)
            }
            Expression::Alternation(l, r) => {
                l.fmt_operand(f, 0)?;
                write!(f, "|")?;
                r.fmt_operand(f, 0)
            }
            Expression::Repetition(i) => {
                i.fmt_operand(f, 2)?;
                write!(f, "*")
            }
        }
    }
}
