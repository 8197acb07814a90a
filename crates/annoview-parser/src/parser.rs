//! Parser for annotation bodies.
//!
//! This module transforms a token stream from the [`lexer`](super::lexer)
//! into the syntax tree defined in [`parser_types`](super::parser_types).
//! The public entry point is [`build_annotation`].
//!
//! Grammar, with whitespace and comments already removed:
//!
//! ```text
//! annotation := modifiers EOF
//! modifiers  := [modifier ("," modifier)* [","]]
//! modifier   := name ("=" value | "(" modifiers ")")
//! name       := IDENT ("." IDENT)*
//! value      := array | call | string | expression
//! array      := "{" [value ("," value)* [","]] "}"
//! call       := IDENT "(" modifiers ")"            -- named arguments only
//! expression := token run up to "," ")" "}" "]" at nesting depth 0
//! ```

use winnow::{
    Parser as _,
    combinator::{alt, eof, opt, peek, separated},
    error::{AddContext, ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use crate::{
    error::{Diagnostic, ErrorCode},
    parser_types as types,
    span::{Span, Spanned},
    tokens::{PositionedToken, Token},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what is currently being parsed
    Label(&'static str),
    /// Remaining token count (`eof_offset()`) at error start position
    ///
    /// Used to calculate start_offset as: `tokens.len() - start_offset_value`
    StartOffset(usize),
}

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;

/// Runs `f` and turns any failure into a committed error that remembers
/// where the construct started.
fn cut_err<'src, O, F>(input: &mut Input<'src>, f: F) -> IResult<O>
where
    F: FnOnce(&mut Input<'src>) -> IResult<O>,
{
    let start_remaining = input.eof_offset();
    let start = input.checkpoint();

    match f(input) {
        Ok(o) => Ok(o),
        Err(ErrMode::Backtrack(e)) | Err(ErrMode::Cut(e)) => Err(ErrMode::Cut(e.add_context(
            input,
            &start,
            Context::StartOffset(start_remaining),
        ))),
        Err(e) => Err(e),
    }
}

/// Matches one token of the kind accepted by `accept`.
fn expect<'src>(
    input: &mut Input<'src>,
    accept: fn(&Token<'_>) -> bool,
    label: &'static str,
) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'src>| accept(&token.token).then_some(token.span))
        .context(Context::Label(label))
        .parse_next(input)
}

fn comma<'src>(input: &mut Input<'src>) -> IResult<Span> {
    expect(input, |token| matches!(token, Token::Comma), "`,`")
}

fn equals<'src>(input: &mut Input<'src>) -> IResult<Span> {
    expect(input, |token| matches!(token, Token::Equals), "`=`")
}

fn dot<'src>(input: &mut Input<'src>) -> IResult<Span> {
    expect(input, |token| matches!(token, Token::Dot), "`.`")
}

fn left_paren<'src>(input: &mut Input<'src>) -> IResult<Span> {
    expect(input, |token| matches!(token, Token::LeftParen), "`(`")
}

fn right_paren<'src>(input: &mut Input<'src>) -> IResult<Span> {
    expect(input, |token| matches!(token, Token::RightParen), "`)`")
}

fn left_brace<'src>(input: &mut Input<'src>) -> IResult<Span> {
    expect(input, |token| matches!(token, Token::LeftBrace), "`{`")
}

fn right_brace<'src>(input: &mut Input<'src>) -> IResult<Span> {
    expect(input, |token| matches!(token, Token::RightBrace), "`}`")
}

/// Parse a raw identifier with span preservation
fn identifier<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    any.verify_map(|token: &PositionedToken<'src>| match token.token {
        Token::Identifier(name) => Some(Spanned::new(name, token.span)),
        _ => None,
    })
    .context(Context::Label("identifier"))
    .parse_next(input)
}

/// Parse a possibly dotted name such as `FillPattern.Solid`
fn dotted_name<'src>(input: &mut Input<'src>) -> IResult<Spanned<String>> {
    let first = identifier(input)?;
    let mut name = first.inner().to_string();
    let mut span = first.span();

    while let Some(part) = opt((dot, identifier)).parse_next(input)? {
        let (_, segment) = part;
        name.push('.');
        name.push_str(segment.inner());
        span = span.union(segment.span());
    }

    Ok(Spanned::new(name, span))
}

/// Matches the tokens that may follow a complete value without consuming them.
fn value_end<'src>(input: &mut Input<'src>) -> IResult<()> {
    peek(alt((
        comma.void(),
        right_paren.void(),
        right_brace.void(),
        eof.void(),
    )))
    .parse_next(input)
}

/// Parse a single modifier: `name = value` or `name(modifiers)`
fn modifier<'src>(input: &mut Input<'src>) -> IResult<types::Modifier> {
    let name = dotted_name(input)?;

    let value = cut_err(input, |input| {
        alt((
            (equals, value).map(|(_, value)| types::ModifierValue::Value(value)),
            nested_modifiers.map(types::ModifierValue::Nested),
        ))
        .context(Context::Label("`=` or `(` after modifier name"))
        .parse_next(input)
    })?;

    Ok(types::Modifier { name, value })
}

/// Parse comma-separated modifiers; a trailing comma is accepted
fn modifiers<'src>(input: &mut Input<'src>) -> IResult<Vec<types::Modifier>> {
    let modifiers: Vec<types::Modifier> =
        separated(0.., modifier, comma).parse_next(input)?;
    opt(comma).parse_next(input)?;
    Ok(modifiers)
}

/// Parse modifiers wrapped in parentheses
fn nested_modifiers<'src>(input: &mut Input<'src>) -> IResult<Vec<types::Modifier>> {
    left_paren(input)?;

    cut_err(input, |input| {
        let modifiers = modifiers(input)?;
        right_paren(input)?;
        Ok(modifiers)
    })
}

/// Parse a brace array literal
fn array<'src>(input: &mut Input<'src>) -> IResult<Spanned<Vec<types::Value>>> {
    let open = left_brace(input)?;

    cut_err(input, |input| {
        let items: Vec<types::Value> = separated(0.., value, comma).parse_next(input)?;
        opt(comma).parse_next(input)?;
        let close = right_brace(input)?;
        Ok(Spanned::new(items, open.union(close)))
    })
}

/// Parse a constructor call with named arguments
///
/// A call whose first argument is positional, such as `max(a, b)`, is left
/// to [`expression`].
fn call<'src>(input: &mut Input<'src>) -> IResult<types::Call> {
    let name = identifier(input)?;
    left_paren(input)?;

    peek(alt((right_paren.void(), (identifier, equals).void()))).parse_next(input)?;

    cut_err(input, |input| {
        let arguments = modifiers(input)?;
        right_paren
            .context(Context::Label("`)` closing the constructor"))
            .parse_next(input)?;
        Ok(types::Call {
            name: name.map(str::to_string),
            arguments,
        })
    })
}

/// Parse a string literal that makes up a whole value
fn string_value<'src>(input: &mut Input<'src>) -> IResult<Spanned<String>> {
    let literal = any
        .verify_map(|token: &PositionedToken<'src>| match &token.token {
            Token::StringLiteral(value) => Some(Spanned::new(value.clone(), token.span)),
            _ => None,
        })
        .parse_next(input)?;

    value_end(input)?;
    Ok(literal)
}

/// Parse a run of tokens forming an arithmetic or symbolic expression
///
/// The run ends before a `,`, `)`, `}` or `]` that is not nested inside
/// brackets opened within the run. A lone (signed) number is returned as
/// [`types::Value::Number`].
fn expression<'src>(input: &mut Input<'src>) -> IResult<types::Value> {
    let mut depth = 0usize;
    let mut run: Vec<&PositionedToken<'src>> = Vec::new();

    while let Some(token) = input.peek_token() {
        match token.token {
            Token::Comma | Token::RightParen | Token::RightBrace | Token::RightBracket
                if depth == 0 =>
            {
                break;
            }
            Token::Semicolon => break,
            Token::LeftParen | Token::LeftBrace | Token::LeftBracket => depth += 1,
            Token::RightParen | Token::RightBrace | Token::RightBracket => depth -= 1,
            _ => {}
        }
        run.push(token);
        input.next_token();
    }

    let (Some(first), Some(last)) = (run.first(), run.last()) else {
        let start = input.checkpoint();
        return Err(ErrMode::Backtrack(ContextError::new().add_context(
            input,
            &start,
            Context::Label("value"),
        )));
    };
    let span = first.span.union(last.span);

    let value = match run.as_slice() {
        [number] => number_value(&number.token, 1.0),
        [sign, number] => match sign.token {
            Token::Minus => number_value(&number.token, -1.0),
            Token::Plus => number_value(&number.token, 1.0),
            _ => None,
        },
        _ => None,
    };

    Ok(match value {
        Some(value) => types::Value::Number(Spanned::new(value, span)),
        None => types::Value::Expression(span),
    })
}

fn number_value(token: &Token<'_>, sign: f64) -> Option<f64> {
    match token {
        Token::Number(value) => Some(sign * value),
        _ => None,
    }
}

/// Parse any value
fn value<'src>(input: &mut Input<'src>) -> IResult<types::Value> {
    alt((
        array.map(types::Value::Array),
        call.map(types::Value::Call),
        string_value.map(types::Value::String),
        expression,
    ))
    .context(Context::Label("value"))
    .parse_next(input)
}

fn convert_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[PositionedToken],
    current_remaining: usize,
) -> Diagnostic {
    let start_remaining = match &error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e.context().find_map(|ctx| match ctx {
            Context::StartOffset(n) => Some(*n),
            _ => None,
        }),
        _ => None,
    };

    // Token indices from remaining token counts
    let end_offset = tokens.len() - current_remaining;
    let start_offset = start_remaining.map(|r| tokens.len() - r);

    match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => {
            let expected = e
                .context()
                .find_map(|ctx| match ctx {
                    Context::Label(label) => Some(*label),
                    _ => None,
                })
                .unwrap_or("value");

            let (found, error_span) = match tokens.get(end_offset) {
                Some(token) => (token.token.to_string(), token.span),
                None => (
                    "end of annotation".to_string(),
                    tokens
                        .last()
                        .map(|token| Span::new(token.span.end()..token.span.end()))
                        .unwrap_or_default(),
                ),
            };

            let mut diagnostic = Diagnostic::error(format!(
                "unexpected token: expected {expected}, found {found}"
            ))
            .with_code(ErrorCode::E100)
            .with_label(error_span, "unexpected token")
            .with_help("check that every `(` and `{` is closed and values are separated by commas");

            if let Some(start) = start_offset.and_then(|index| tokens.get(index))
                && start.span != error_span
            {
                diagnostic = diagnostic.with_secondary_label(start.span, "while parsing this");
            }

            diagnostic
        }
        ErrMode::Incomplete(_) => {
            // Not reachable with complete token slices.
            let error_span = tokens.last().map(|token| token.span).unwrap_or_default();

            Diagnostic::error("incomplete input, more tokens expected")
                .with_code(ErrorCode::E101)
                .with_label(error_span, "incomplete")
        }
    }
}

/// Build the modifier list of an annotation body from its tokens.
///
/// Whitespace and comment tokens are skipped.
///
/// # Errors
///
/// Returns a [`Diagnostic`] spanning the offending token when the body does
/// not follow the annotation grammar.
pub(crate) fn build_annotation(
    tokens: &[PositionedToken<'_>],
) -> Result<Vec<types::Modifier>, Diagnostic> {
    let meaningful: Vec<PositionedToken<'_>> = tokens
        .iter()
        .filter(|token| !token.is_trivia())
        .cloned()
        .collect();

    let mut token_slice = TokenSlice::new(&meaningful);

    match modifiers(&mut token_slice) {
        Ok(modifiers) => match token_slice.peek_token() {
            None => Ok(modifiers),
            Some(token) => Err(Diagnostic::error(format!(
                "unexpected {} after the last modifier",
                token.token
            ))
            .with_code(ErrorCode::E102)
            .with_label(token.span, "expected `,` or end of annotation")
            .with_help("check for an unbalanced `)` or `}`")),
        },
        Err(e) => {
            let current_remaining = token_slice.eof_offset();
            Err(convert_error(e, &meaningful, current_remaining))
        }
    }
}
