use crate::Value;
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Like,
    NotLike,
    Between,
    NotBetween,
    In,
    NotIn,
    IsNull,
    IsNotNull,
}

impl Operator {
    /// Number of values the operator needs, `None` for lists.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Operator::IsNull | Operator::IsNotNull => Some(0),
            Operator::Between | Operator::NotBetween => Some(2),
            Operator::In | Operator::NotIn => None,
            _ => Some(1),
        }
    }
}

/// Leaf of a condition tree: `column operator value(s)`.
///
/// The column is a name or alias resolved against the table when the statement is compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: Cow<'static, str>,
    pub operator: Operator,
    pub values: Vec<Value>,
}

/// Boolean combinator linking a child to the children before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    And,
    Or,
}

/// Composable boolean filter used by queries, updates and deletes.
///
/// Every child of a group carries its own link to what precedes it (ignored on the first
/// child). Groups are evaluated left to right: `a AND b OR c` compiles to `(a AND b) OR c`.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Leaf(Predicate),
    Group(Vec<(Link, Condition)>),
}

fn leaf(column: impl Into<Cow<'static, str>>, operator: Operator, values: Vec<Value>) -> Condition {
    Condition::Leaf(Predicate {
        column: column.into(),
        operator,
        values,
    })
}

impl Condition {
    pub fn eq(column: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        leaf(column, Operator::Equal, vec![value.into()])
    }
    pub fn ne(column: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        leaf(column, Operator::NotEqual, vec![value.into()])
    }
    pub fn lt(column: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        leaf(column, Operator::Less, vec![value.into()])
    }
    pub fn le(column: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        leaf(column, Operator::LessEqual, vec![value.into()])
    }
    pub fn gt(column: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        leaf(column, Operator::Greater, vec![value.into()])
    }
    pub fn ge(column: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
        leaf(column, Operator::GreaterEqual, vec![value.into()])
    }
    pub fn like(column: impl Into<Cow<'static, str>>, pattern: impl Into<Value>) -> Self {
        leaf(column, Operator::Like, vec![pattern.into()])
    }
    pub fn not_like(column: impl Into<Cow<'static, str>>, pattern: impl Into<Value>) -> Self {
        leaf(column, Operator::NotLike, vec![pattern.into()])
    }
    pub fn between(
        column: impl Into<Cow<'static, str>>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        leaf(column, Operator::Between, vec![low.into(), high.into()])
    }
    pub fn not_between(
        column: impl Into<Cow<'static, str>>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        leaf(column, Operator::NotBetween, vec![low.into(), high.into()])
    }
    pub fn in_list<V: Into<Value>>(
        column: impl Into<Cow<'static, str>>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        leaf(
            column,
            Operator::In,
            values.into_iter().map(Into::into).collect(),
        )
    }
    pub fn not_in<V: Into<Value>>(
        column: impl Into<Cow<'static, str>>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        leaf(
            column,
            Operator::NotIn,
            values.into_iter().map(Into::into).collect(),
        )
    }
    pub fn is_null(column: impl Into<Cow<'static, str>>) -> Self {
        leaf(column, Operator::IsNull, Vec::new())
    }
    pub fn is_not_null(column: impl Into<Cow<'static, str>>) -> Self {
        leaf(column, Operator::IsNotNull, Vec::new())
    }

    /// Group of conditions all linked by AND.
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Group(conditions.into_iter().map(|v| (Link::And, v)).collect())
    }
    /// Group of conditions all linked by OR.
    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Group(conditions.into_iter().map(|v| (Link::Or, v)).collect())
    }

    pub fn and(self, other: Condition) -> Self {
        self.link(Link::And, other)
    }
    pub fn or(self, other: Condition) -> Self {
        self.link(Link::Or, other)
    }
    fn link(self, link: Link, other: Condition) -> Self {
        match self {
            Condition::Group(mut children) if !children.is_empty() => {
                children.push((link, other));
                Condition::Group(children)
            }
            Condition::Group(..) => other,
            leaf => Condition::Group(vec![(link, leaf), (link, other)]),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Condition::Group(v) if v.is_empty())
    }
}
