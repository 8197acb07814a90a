//! Syntax tree of an annotation body.
//!
//! An annotation body such as
//! `coordinateSystem(extent = {{-100, -100}, {100, 100}}), graphics = {Line(...)}`
//! is a list of [`Modifier`]s. The tree owns its names and refers to
//! expressions by their span in the annotation text.

use crate::span::{Span, Spanned};

/// `name = value` or `name(modifiers)`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Modifier {
    /// Possibly dotted name, e.g. `extent` or `Placement.transformation`.
    pub name: Spanned<String>,
    pub value: ModifierValue,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ModifierValue {
    /// `name = value`
    Value(Value),
    /// `name(a = 1, b = 2)`
    Nested(Vec<Modifier>),
}

/// A call-like constructor with named arguments, such as `Rectangle(...)`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub name: Spanned<String>,
    pub arguments: Vec<Modifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    /// `{a, b, c}`
    Array(Spanned<Vec<Value>>),
    Call(Call),
    /// A lone numeric literal, optionally signed.
    Number(Spanned<f64>),
    /// A quoted string that is the whole value.
    String(Spanned<String>),
    /// Any other token run, kept as source text for the evaluator.
    Expression(Span),
}

impl Value {
    pub fn is_call(&self) -> bool {
        matches!(self, Value::Call(_))
    }
}
