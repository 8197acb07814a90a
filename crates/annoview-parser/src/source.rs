//! Model text and the annotation blocks located inside it.

use log::{debug, warn};

use annoview_core::view::ViewKind;

use crate::{
    error::{Diagnostic, ParseError},
    lexer::tokenize_recovering,
    params::{Parameters, substitute_tokens},
    span::Span,
    tokens::{PositionedToken, Token},
};

/// A tokenized model.
///
/// The text is tokenized once; parameters and annotation blocks are read
/// from the same token stream. Lexer errors do not prevent tokenization:
/// each one is charged to the annotation block it occurs in, and only that
/// block reports it.
#[derive(Debug, Clone)]
pub struct ModelSource<'a> {
    text: &'a str,
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> ModelSource<'a> {
    /// Tokenizes model text.
    pub fn new(text: &'a str) -> Self {
        let (tokens, diagnostics) = tokenize_recovering(text);
        debug!(tokens = tokens.len(); "Tokenized model text");
        if !diagnostics.is_empty() {
            warn!(errors = diagnostics.len(); "Model text has lexical errors");
        }
        Self {
            text,
            tokens,
            diagnostics,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Lexer diagnostics for the whole text, with spans into it.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The numeric parameters declared in the model.
    pub fn parameters(&self) -> Parameters {
        Parameters::extract(&self.tokens)
    }

    /// The name following the first `model` keyword.
    pub fn model_name(&self) -> Option<&'a str> {
        let mut meaningful = self.tokens.iter().filter(|token| !token.is_trivia());
        while let Some(token) = meaningful.next() {
            if token.is_identifier("model") {
                return match meaningful.next().map(|token| &token.token) {
                    Some(Token::Identifier(name)) => Some(*name),
                    _ => None,
                };
            }
        }
        None
    }

    /// Locates the first `annotation(<View>( ... ));` block of a view.
    ///
    /// The block ends at the first `) ) ;` after its opening, so nested
    /// parentheses followed by a semicolon inside the block are not
    /// supported. Returns `None` if there is no such block or it is not
    /// closed.
    pub fn annotation(&self, view: ViewKind) -> Option<AnnotationBlock<'_>> {
        let meaningful: Vec<usize> = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| !token.is_trivia())
            .map(|(index, _)| index)
            .collect();
        let token = |position: usize| meaningful.get(position).map(|&index| &self.tokens[index]);

        let opening = (0..meaningful.len()).find(|&position| {
            matches!(
                (token(position), token(position + 1), token(position + 2), token(position + 3)),
                (Some(a), Some(b), Some(c), Some(d))
                    if a.is_identifier("annotation")
                        && matches!(b.token, Token::LeftParen)
                        && c.is_identifier(view.name())
                        && matches!(d.token, Token::LeftParen)
            )
        });
        let Some(opening) = opening else {
            debug!(view:?; "No annotation block found");
            return None;
        };
        let body_start = meaningful[opening + 3] + 1;

        let closing = (opening + 4..meaningful.len()).find(|&position| {
            matches!(
                (token(position), token(position + 1), token(position + 2)),
                (Some(a), Some(b), Some(c))
                    if matches!(a.token, Token::RightParen)
                        && matches!(b.token, Token::RightParen)
                        && matches!(c.token, Token::Semicolon)
            )
        });
        let Some(closing) = closing else {
            warn!(view:?; "Annotation block is not closed");
            return None;
        };
        let body_end = meaningful[closing];

        let tokens = &self.tokens[body_start..body_end];
        let span = match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => first.span.union(last.span),
            _ => {
                let offset = self.tokens[body_end].span.start();
                Span::new(offset..offset)
            }
        };

        let diagnostics: Vec<Diagnostic> = self
            .diagnostics
            .iter()
            .filter(|diagnostic| {
                diagnostic
                    .labels()
                    .iter()
                    .find(|label| label.is_primary())
                    .is_some_and(|label| span.contains(label.span().start()))
            })
            .cloned()
            .collect();

        debug!(view:?, offset = span.start(); "Located annotation block");
        Some(AnnotationBlock {
            view,
            source: self.text,
            span,
            tokens,
            diagnostics,
        })
    }
}

/// The body of an `annotation(<View>(...));` block.
#[derive(Debug, Clone)]
pub struct AnnotationBlock<'a> {
    view: ViewKind,
    source: &'a str,
    span: Span,
    tokens: &'a [PositionedToken<'a>],
    diagnostics: Vec<Diagnostic>,
}

impl<'a> AnnotationBlock<'a> {
    pub fn view(&self) -> ViewKind {
        self.view
    }

    /// Position of the untrimmed body within the model text.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The trimmed body text, without the enclosing `View(` and `)`.
    pub fn text(&self) -> &'a str {
        self.source.get(self.span.range()).unwrap_or_default().trim()
    }

    /// Fails with the lexer diagnostics that fall inside the body.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] whose spans index the model text when the
    /// body holds an unterminated string literal or block comment.
    pub fn check(&self) -> Result<(), ParseError> {
        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(ParseError::new(self.diagnostics.clone()))
        }
    }

    /// The body text with every parameter reference replaced by its value.
    pub fn substitute(&self, parameters: &Parameters) -> String {
        substitute_tokens(self.source, self.tokens, parameters)
            .trim()
            .to_string()
    }
}
