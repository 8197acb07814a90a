//! Parameter extraction and substitution.
//!
//! Model text declares numeric parameters such as
//! `parameter Real diameter = 2 "pipe diameter";`.
//! [`ModelSource::parameters`](crate::ModelSource::parameters) collects them
//! and [`substitute`] rewrites references to them inside an annotation. Both work on tokens, so a parameter named `diameter` never
//! touches `diameter2` and nothing inside a string literal is rewritten.

use indexmap::IndexMap;
use log::{debug, trace};

use crate::{
    error::ParseError,
    lexer::tokenize,
    tokens::{PositionedToken, Token},
};

/// Numeric model parameters in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameters {
    values: IndexMap<String, f64>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects every `parameter Real <name> = <number>;` declaration.
    ///
    /// The number may carry a sign and the declaration may end with a
    /// description string. Declarations with modifiers, another type or a
    /// computed default are skipped. A later declaration of a name replaces
    /// an earlier one.
    pub(crate) fn extract(tokens: &[PositionedToken<'_>]) -> Self {
        let meaningful: Vec<&Token<'_>> = tokens
            .iter()
            .filter(|token| !token.is_trivia())
            .map(|token| &token.token)
            .collect();

        let mut parameters = Self::new();
        for (index, token) in meaningful.iter().enumerate() {
            if !token.is_identifier("parameter") {
                continue;
            }
            if let Some((name, value)) = declaration(&meaningful[index + 1..]) {
                trace!(name, value; "Found parameter declaration");
                parameters.insert(name, value);
            }
        }

        debug!(count = parameters.len(); "Extracted parameters");
        parameters
    }

    /// Inserts a value, replacing any previous value of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        let mut parameters = Self::new();
        for (name, value) in iter {
            parameters.insert(name, value);
        }
        parameters
    }
}

/// Matches `Real <name> = [-|+]<number> ["description"] ;`.
fn declaration<'src>(tokens: &[&Token<'src>]) -> Option<(&'src str, f64)> {
    let (name, rest) = match tokens {
        [Token::Identifier("Real"), Token::Identifier(name), Token::Equals, rest @ ..] => {
            (*name, rest)
        }
        _ => return None,
    };

    let (sign, rest) = match rest {
        [Token::Minus, rest @ ..] => (-1.0, rest),
        [Token::Plus, rest @ ..] => (1.0, rest),
        _ => (1.0, rest),
    };

    let (value, rest) = match rest {
        [Token::Number(value), rest @ ..] => (sign * value, rest),
        _ => return None,
    };

    match rest {
        [Token::Semicolon, ..] | [Token::StringLiteral(_), Token::Semicolon, ..] => {
            Some((name, value))
        }
        _ => None,
    }
}

/// Formats a parameter value the way it is spliced into annotation text.
fn format_value(value: f64) -> String {
    if value < 0.0 {
        format!("({value})")
    } else {
        value.to_string()
    }
}

/// Whether the meaningful token at `index` is a reference that may be replaced.
///
/// Modifier names (`name =`), constructor names (`Name(`) and segments of a
/// dotted name (`FillPattern.Solid`) are not references.
fn is_reference(meaningful: &[&Token<'_>], index: usize) -> bool {
    let previous = index.checked_sub(1).and_then(|i| meaningful.get(i));
    let next = meaningful.get(index + 1);

    !matches!(previous, Some(Token::Dot))
        && !matches!(next, Some(Token::Dot | Token::Equals | Token::LeftParen))
}

/// Rewrites parameter references in already tokenized text.
///
/// `source` is the text the token spans index into; the result is the
/// concatenation of the tokens' source text with references replaced.
pub(crate) fn substitute_tokens(
    source: &str,
    tokens: &[PositionedToken<'_>],
    parameters: &Parameters,
) -> String {
    let meaningful: Vec<&Token<'_>> = tokens
        .iter()
        .filter(|token| !token.is_trivia())
        .map(|token| &token.token)
        .collect();

    let mut output = String::with_capacity(source.len());
    let mut meaningful_index = 0;

    for token in tokens {
        let text = source.get(token.span.range()).unwrap_or_default();
        if token.is_trivia() {
            output.push_str(text);
            continue;
        }

        let replacement = match token.token {
            Token::Identifier(name) if is_reference(&meaningful, meaningful_index) => {
                parameters.get(name).map(|value| (name, value))
            }
            _ => None,
        };
        meaningful_index += 1;

        match replacement {
            Some((name, value)) => {
                trace!(name, value; "Substituting parameter");
                output.push_str(&format_value(value));
            }
            None => output.push_str(text),
        }
    }

    output
}

/// Replaces every reference to a parameter in `text` with its value.
///
/// Negative values are parenthesised so `-length` stays well formed.
///
/// # Errors
///
/// Returns a [`ParseError`] if `text` contains an unterminated string
/// literal or block comment.
pub fn substitute(text: &str, parameters: &Parameters) -> Result<String, ParseError> {
    let tokens = tokenize(text)?;
    Ok(substitute_tokens(text, &tokens, parameters))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn extract(source: &str) -> Parameters {
        Parameters::extract(&tokenize(source).unwrap())
    }

    #[test]
    fn test_extract_simple_declarations() {
        let parameters = extract(
            "model Tube\n  parameter Real length = 10;\n  parameter Real diameter = 2;\nend Tube;",
        );

        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters.get("length"), Some(10.0));
        assert_eq!(parameters.get("diameter"), Some(2.0));
    }

    #[test]
    fn test_extract_sign_and_description() {
        let parameters =
            extract("parameter Real offset = -1.5 \"shift\";\nparameter Real gain = +2;");

        assert_eq!(parameters.get("offset"), Some(-1.5));
        assert_eq!(parameters.get("gain"), Some(2.0));
    }

    #[test]
    fn test_extract_skips_non_matching_declarations() {
        let parameters = extract(
            "parameter Integer n = 3;\n\
             parameter Real area = length * 2;\n\
             parameter Real mass(unit = \"kg\") = 1;\n\
             Real flow_rate;",
        );

        assert!(parameters.is_empty());
    }

    #[test]
    fn test_later_declaration_overwrites() {
        let parameters = extract("parameter Real a = 1; parameter Real b = 2; parameter Real a = 3;");

        let entries: Vec<(&str, f64)> = parameters.iter().collect();
        assert_eq!(entries, [("a", 3.0), ("b", 2.0)]);
    }

    #[test]
    fn test_substitute_whole_tokens_only() {
        let parameters: Parameters = [("diameter", 2.0), ("diameter2", 5.0)].into_iter().collect();

        let result = substitute("{{-diameter, 0}, {diameter2, 1}}", &parameters).unwrap();
        assert_eq!(result, "{{-2, 0}, {5, 1}}");
    }

    #[test]
    fn test_substitute_parenthesises_negative_values() {
        let parameters: Parameters = [("offset", -4.0)].into_iter().collect();

        let result = substitute("x = -offset", &parameters).unwrap();
        assert_eq!(result, "x = -(-4)");
    }

    #[test]
    fn test_substitute_skips_names_strings_and_members() {
        let parameters: Parameters = [("length", 10.0), ("Solid", 1.0), ("Line", 2.0)]
            .into_iter()
            .collect();

        let source = "length = 1, textString = \"length\", fillPattern = FillPattern.Solid, Line(points = {{0, length}})";
        let result = substitute(source, &parameters).unwrap();
        assert_eq!(
            result,
            "length = 1, textString = \"length\", fillPattern = FillPattern.Solid, Line(points = {{0, 10}})"
        );
    }

    #[test]
    fn test_substitute_keeps_comments_and_whitespace() {
        let parameters: Parameters = [("w", 3.0)].into_iter().collect();

        let result = substitute("a = w /* w */ // w\n", &parameters).unwrap();
        assert_eq!(result, "a = 3 /* w */ // w\n");
    }

    #[test]
    fn test_substitute_unterminated_string() {
        assert!(substitute("a = \"open", &Parameters::new()).is_err());
    }

    proptest! {
        #[test]
        fn prop_prefix_names_do_not_collide(
            short in 0u32..10_000,
            long in 0u32..10_000,
            swap in any::<bool>(),
        ) {
            let pairs = [("diameter", f64::from(short)), ("diameter2", f64::from(long))];
            let parameters: Parameters = if swap {
                pairs.into_iter().rev().collect()
            } else {
                pairs.into_iter().collect()
            };

            let result = substitute("x = diameter2 * diameter + diameter2", &parameters).unwrap();
            prop_assert_eq!(result, format!("x = {long} * {short} + {long}"));
        }
    }
}
