//! Lexical analyzer for model and annotation text.
//!
//! The lexer converts source text into a stream of [`Token`]s. It is lenient:
//! any character that does not start a known token becomes a
//! [`Token::Symbol`], so arbitrary model text (equations, `der(x)`,
//! inequalities) tokenizes without error. Only an unterminated string
//! literal or block comment is reported.
//!
//! Lexing never stops at an error. The opening character of a bad literal
//! becomes a [`Token::Error`] and lexing resumes right after it, so the rest
//! of the text still yields tokens. [`tokenize`] fails on any diagnostic;
//! [`tokenize_recovering`] returns the tokens together with the diagnostics.

use winnow::{
    Parser as _,
    ascii::{digit0, digit1},
    combinator::{alt, cut_err, not, opt, peek, preceded, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{any, none_of, one_of, take_until, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Diagnostic information for lexer errors.
///
/// Attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<LexerDiagnostic>>;

/// Parse a double-quoted string literal.
///
/// A backslash escapes the following character; `\n` and `\t` are
/// translated. Strings may span lines.
fn string_literal<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let string_char = alt((
        preceded('\\', any).map(|c: char| match c {
            'n' => '\n',
            't' => '\t',
            other => other,
        }),
        none_of(['"', '\\']),
    ));

    let string_content = repeat(0.., string_char).fold(String::new, |mut acc, ch| {
        acc.push(ch);
        acc
    });

    let start = input.current_token_start();

    // Commit after the opening quote so the span covers the whole literal.
    preceded(
        '"',
        cut_err(terminated(string_content, '"')).context(LexerDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated string literal",
            help: Some("add closing `\"`"),
            start,
        }),
    )
    .map(Token::StringLiteral)
    .parse_next(input)
}

/// Parse line comment starting with '//'
fn line_comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    preceded("//", take_while(0.., |c| c != '\n'))
        .map(Token::LineComment)
        .parse_next(input)
}

/// Parse block comment delimited by `/*` and `*/`
fn block_comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let start = input.current_token_start();

    preceded(
        "/*",
        cut_err(terminated(take_until(0.., "*/"), "*/")).context(LexerDiagnostic {
            code: ErrorCode::E002,
            message: "unterminated block comment",
            help: Some("add closing `*/`"),
            start,
        }),
    )
    .map(Token::BlockComment)
    .parse_next(input)
}

/// Parse an unsigned numeric literal: `10`, `2.5`, `.5`, `1.`, `1e5`, `2.5E-3`.
///
/// Signs are separate tokens so that `10-2` lexes as three tokens.
fn number<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    (
        alt(((digit1, opt(('.', digit0))).void(), ('.', digit1).void())),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
        // "2abc" is not a number followed by an identifier
        peek(not(one_of(|c: char| c.is_alphanumeric() || c == '_'))),
    )
        .take()
        .verify_map(|literal: &str| literal.parse::<f64>().ok())
        .map(Token::Number)
        .parse_next(input)
}

/// Parse identifiers
fn identifier<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .map(Token::Identifier)
        .parse_next(input)
}

/// Parse single character tokens
fn single_char_token<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        '='.value(Token::Equals),
        '+'.value(Token::Plus),
        '-'.value(Token::Minus),
        '*'.value(Token::Star),
        '/'.value(Token::Slash),
        '.'.value(Token::Dot),
        '('.value(Token::LeftParen),
        ')'.value(Token::RightParen),
        '{'.value(Token::LeftBrace),
        '}'.value(Token::RightBrace),
        '['.value(Token::LeftBracket),
        ']'.value(Token::RightBracket),
        ','.value(Token::Comma),
        ';'.value(Token::Semicolon),
        ':'.value(Token::Colon),
    ))
    .parse_next(input)
}

/// Parse whitespace, including newlines
fn whitespace<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., char::is_whitespace)
        .value(Token::Whitespace)
        .parse_next(input)
}

/// Any other character
fn symbol<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    any.map(Token::Symbol).parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        line_comment,      // Must come before single char '/'
        block_comment,     // Must come before single char '/'
        string_literal,    // Must come before any single char
        number,            // Must come before single char '.'
        identifier,        // Must come before single chars
        single_char_token, // Single character tokens
        whitespace,        // General whitespace
        symbol,            // Anything else
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    let span = Span::new(start_pos..end_pos);

    Ok(PositionedToken::new(token, span))
}

/// Lexer that accumulates tokens and diagnostics during tokenization.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Tokenize the input, collecting tokens and errors.
    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            let checkpoint = input.checkpoint();
            match positioned_token(&mut input) {
                Ok(token) => {
                    self.tokens.push(token);
                }
                Err(e) => {
                    let error_pos = input.current_token_start();

                    let diagnostic = Self::convert_err_mode(e, error_pos);
                    self.diagnostics.emit(diagnostic);

                    // Resume after the character that opened the bad token.
                    input.reset(&checkpoint);
                    self.push_error_token(&mut input);
                }
            }
        }
    }

    fn push_error_token(&mut self, input: &mut Input<'a>) {
        let Some(c) = input.peek_token() else {
            return;
        };
        let start = input.current_token_start();
        let opener = input.next_slice(c.len_utf8());
        self.tokens.push(PositionedToken::new(
            Token::Error(opener),
            Span::new(start..start + opener.len()),
        ));
    }

    /// Finish lexing and return tokens or collected errors.
    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }

    /// Convert an ErrMode and error position to a Diagnostic.
    fn convert_err_mode(
        err: ErrMode<ContextError<LexerDiagnostic>>,
        error_pos: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let span = Span::new(*start..error_pos);

            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        // The symbol fallback accepts any character, so this is only reached
        // if a token parser fails without context.
        let span = Span::new(error_pos..error_pos.saturating_add(1));
        Diagnostic::error("unexpected input")
            .with_code(ErrorCode::E100)
            .with_label(span, ErrorCode::E100.description())
    }
}

/// Tokenize source text, collecting every lexer error.
///
/// # Errors
///
/// Returns a [`ParseError`] holding one diagnostic per unterminated string
/// literal or block comment.
pub fn tokenize(input: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let located_input = LocatingSlice::new(input);
    let mut lexer = Lexer::new();
    lexer.tokenize(located_input);
    lexer.finish()
}

/// Tokenize source text, keeping the tokens even when there are errors.
///
/// Each unterminated string literal or block comment yields a diagnostic and
/// a [`Token::Error`] for its opening character.
pub fn tokenize_recovering(input: &str) -> (Vec<PositionedToken<'_>>, Vec<Diagnostic>) {
    let mut lexer = Lexer::new();
    lexer.tokenize(LocatingSlice::new(input));
    (lexer.tokens, lexer.diagnostics.into_diagnostics())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meaningful(input: &str) -> Vec<Token<'_>> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|positioned| positioned.token)
            .filter(|token| !token.is_trivia())
            .collect()
    }

    fn test_single_token(input: &str, expected: Token<'_>) {
        let mut located_input = LocatingSlice::new(input);
        let result = positioned_token(&mut located_input);
        assert!(result.is_ok(), "Failed to parse: {}", input);
        assert_eq!(result.unwrap().token, expected);
    }

    #[test]
    fn test_numbers() {
        test_single_token("10", Token::Number(10.0));
        test_single_token("2.5", Token::Number(2.5));
        test_single_token(".5", Token::Number(0.5));
        test_single_token("1.", Token::Number(1.0));
        test_single_token("101325", Token::Number(101325.0));
        test_single_token("1e5", Token::Number(100000.0));
        test_single_token("2.5E-3", Token::Number(0.0025));
    }

    #[test]
    fn test_identifiers() {
        test_single_token("diameter", Token::Identifier("diameter"));
        test_single_token("_private", Token::Identifier("_private"));
        test_single_token("pressure_in2", Token::Identifier("pressure_in2"));
    }

    #[test]
    fn test_minus_is_separate_token() {
        assert_eq!(
            meaningful("10-2"),
            [Token::Number(10.0), Token::Minus, Token::Number(2.0)]
        );
    }

    #[test]
    fn test_dotted_name() {
        assert_eq!(
            meaningful("FillPattern.Solid"),
            [
                Token::Identifier("FillPattern"),
                Token::Dot,
                Token::Identifier("Solid")
            ]
        );
    }

    #[test]
    fn test_string_with_parentheses_and_escape() {
        assert_eq!(
            meaningful(r#"textString = "f(x) \"q\"""#),
            [
                Token::Identifier("textString"),
                Token::Equals,
                Token::StringLiteral("f(x) \"q\"".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments_are_trivia() {
        let tokens = tokenize("a // line\n/* block\n comment */ b").unwrap();
        assert!(matches!(tokens[2].token, Token::LineComment(" line")));
        assert!(matches!(tokens[4].token, Token::BlockComment(" block\n comment ")));
        assert_eq!(
            meaningful("a // line\n/* block */ b"),
            [Token::Identifier("a"), Token::Identifier("b")]
        );
    }

    #[test]
    fn test_unknown_characters_become_symbols() {
        assert_eq!(
            meaningful("x < 2 ^ y"),
            [
                Token::Identifier("x"),
                Token::Symbol('<'),
                Token::Number(2.0),
                Token::Symbol('^'),
                Token::Identifier("y"),
            ]
        );
    }

    #[test]
    fn test_token_spans_cover_source() {
        let input = "Line(points = {{0, 0}})";
        let tokens = tokenize(input).unwrap();

        let rebuilt: String = tokens
            .iter()
            .map(|token| &input[token.span.range()])
            .collect();
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize(r#"textString = "Inlet"#).unwrap_err();

        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E001));
        assert_eq!(diag.labels()[0].span().start(), 13);
    }

    #[test]
    fn test_lexing_resumes_after_unterminated_string() {
        let input = "a = \"open, b = 2);";
        let (tokens, diagnostics) = tokenize_recovering(input);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(ErrorCode::E001));

        let error = tokens
            .iter()
            .find(|token| matches!(token.token, Token::Error("\"")))
            .unwrap();
        assert_eq!(error.span, Span::new(4..5));

        let meaningful: Vec<&Token<'_>> = tokens
            .iter()
            .map(|token| &token.token)
            .filter(|token| !token.is_trivia())
            .collect();
        assert_eq!(meaningful.len(), 10);
        assert_eq!(meaningful[3], &Token::Identifier("open"));
        assert_eq!(meaningful[9], &Token::Semicolon);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = tokenize("a /* never closed").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E002));
    }
}
