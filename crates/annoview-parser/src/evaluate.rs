//! Evaluation of expression scalars.
//!
//! Expressions are restricted to numeric literals, `+ - * /`, unary signs,
//! parentheses and identifiers bound in [`Parameters`]. Anything else is not
//! an arithmetic expression: [`evaluate_document`] keeps such scalars as
//! literal strings, which is how enumeration values like `FillPattern.Solid`
//! reach the shape decoder.

use log::trace;
use thiserror::Error;
use winnow::{
    Parser as _,
    ascii::{digit0, digit1, multispace0},
    combinator::{alt, delimited, opt, repeat},
    error::{ContextError, ErrMode, ModalResult, StrContext},
    token::{one_of, take_while},
};

use annoview_core::document::{Document, Node, Scalar};

use crate::params::Parameters;

/// Why an expression did not evaluate to a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("`{0}` is not an arithmetic expression")]
    Syntax(String),

    #[error("unknown identifier `{0}`")]
    UnknownIdentifier(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,
}

#[derive(Debug, Clone, PartialEq)]
enum Expr<'a> {
    Number(f64),
    Identifier(&'a str),
    Negate(Box<Expr<'a>>),
    Binary(Box<Expr<'a>>, Operator, Box<Expr<'a>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    fn from_char(c: char) -> Self {
        match c {
            '+' => Self::Add,
            '-' => Self::Subtract,
            '*' => Self::Multiply,
            _ => Self::Divide,
        }
    }
}

type IResult<O> = ModalResult<O, ContextError>;

fn ws<'a, O>(
    inner: impl winnow::Parser<&'a str, O, ErrMode<ContextError>>,
) -> impl winnow::Parser<&'a str, O, ErrMode<ContextError>> {
    delimited(multispace0, inner, multispace0)
}

/// Unsigned decimal literal with optional fraction and exponent.
fn number(input: &mut &str) -> IResult<f64> {
    (
        alt(((digit1, opt(('.', digit0))).void(), ('.', digit1).void())),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .try_map(str::parse::<f64>)
        .context(StrContext::Label("number"))
        .parse_next(input)
}

fn segment<'a>(input: &mut &'a str) -> IResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

/// Possibly dotted identifier, e.g. `length` or `Modelica.Constants.pi`.
fn identifier<'a>(input: &mut &'a str) -> IResult<&'a str> {
    (segment, repeat::<_, _, (), _, _>(0.., ('.', segment)))
        .take()
        .context(StrContext::Label("identifier"))
        .parse_next(input)
}

fn primary<'a>(input: &mut &'a str) -> IResult<Expr<'a>> {
    ws(alt((
        number.map(Expr::Number),
        identifier.map(Expr::Identifier),
        delimited('(', expression, ')'),
    )))
    .parse_next(input)
}

fn unary<'a>(input: &mut &'a str) -> IResult<Expr<'a>> {
    let signs: Vec<char> = repeat(0.., ws(one_of(['+', '-']))).parse_next(input)?;
    let operand = primary(input)?;

    Ok(signs.into_iter().rev().fold(operand, |expr, sign| match sign {
        '-' => Expr::Negate(Box::new(expr)),
        _ => expr,
    }))
}

/// Folds `first (op operand)*` left-associatively.
fn fold_binary<'a>(first: Expr<'a>, rest: Vec<(char, Expr<'a>)>) -> Expr<'a> {
    rest.into_iter().fold(first, |lhs, (op, rhs)| {
        Expr::Binary(Box::new(lhs), Operator::from_char(op), Box::new(rhs))
    })
}

fn term<'a>(input: &mut &'a str) -> IResult<Expr<'a>> {
    let first = unary(input)?;
    let rest: Vec<(char, Expr<'a>)> =
        repeat(0.., (ws(one_of(['*', '/'])), unary)).parse_next(input)?;
    Ok(fold_binary(first, rest))
}

fn expression<'a>(input: &mut &'a str) -> IResult<Expr<'a>> {
    let first = term(input)?;
    let rest: Vec<(char, Expr<'a>)> =
        repeat(0.., (ws(one_of(['+', '-'])), term)).parse_next(input)?;
    Ok(fold_binary(first, rest))
}

impl Expr<'_> {
    fn evaluate(&self, parameters: &Parameters) -> Result<f64, EvalError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Identifier(name) => parameters
                .get(name)
                .ok_or_else(|| EvalError::UnknownIdentifier((*name).to_string())),
            Self::Negate(inner) => Ok(-inner.evaluate(parameters)?),
            Self::Binary(lhs, op, rhs) => {
                let lhs = lhs.evaluate(parameters)?;
                let rhs = rhs.evaluate(parameters)?;
                match op {
                    Operator::Add => Ok(lhs + rhs),
                    Operator::Subtract => Ok(lhs - rhs),
                    Operator::Multiply => Ok(lhs * rhs),
                    Operator::Divide if rhs == 0.0 => Err(EvalError::DivisionByZero),
                    Operator::Divide => Ok(lhs / rhs),
                }
            }
        }
    }
}

/// Evaluates one arithmetic expression.
///
/// ```
/// use annoview_parser::{Parameters, evaluate_expression};
///
/// let parameters: Parameters = [("diameter", 2.0)].into_iter().collect();
/// assert_eq!(evaluate_expression("-diameter * 5", &parameters), Ok(-10.0));
/// ```
///
/// # Errors
///
/// Returns an [`EvalError`] when the text is not an arithmetic expression,
/// refers to an unbound identifier, divides by zero or overflows.
pub fn evaluate_expression(text: &str, parameters: &Parameters) -> Result<f64, EvalError> {
    let expr = expression
        .parse(text)
        .map_err(|_| EvalError::Syntax(text.to_string()))?;

    let value = expr.evaluate(parameters)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite)
    }
}

/// Replaces every expression scalar in the document with its value.
///
/// Expressions that do not evaluate become literal strings. Numbers and
/// quoted strings are left untouched.
pub fn evaluate_document(document: &mut Document, parameters: &Parameters) {
    for entry in document.root_mut().entries_mut() {
        for node in entry.nodes_mut() {
            evaluate_node(node, parameters);
        }
    }
}

fn evaluate_node(node: &mut Node, parameters: &Parameters) {
    match node {
        Node::Mapping(mapping) => {
            for entry in mapping.entries_mut() {
                for child in entry.nodes_mut() {
                    evaluate_node(child, parameters);
                }
            }
        }
        Node::Sequence(items) => {
            for item in items {
                evaluate_node(item, parameters);
            }
        }
        Node::Scalar(scalar) => {
            if let Scalar::Expression(text) = scalar {
                let evaluated = match evaluate_expression(text, parameters) {
                    Ok(value) => Scalar::Number(value),
                    Err(err) => {
                        trace!(expression = text.as_str(), err:%; "Keeping expression as string");
                        Scalar::String(std::mem::take(text))
                    }
                };
                *scalar = evaluated;
            }
        }
    }
}
