//! # Annoview Parser
//!
//! Reads Modelica-style model text: tokenizes it, extracts numeric
//! parameters, locates the `Icon` and `Diagram` annotation blocks,
//! substitutes parameter references and parses an annotation body into an
//! [`annoview_core::document::Document`] whose expressions are then
//! evaluated.
//!
//! ## Usage
//!
//! ```
//! # use annoview_parser::{ModelSource, error::ParseError, evaluate_document, parse_annotation};
//! # use annoview_core::view::ViewKind;
//!
//! fn main() -> Result<(), ParseError> {
//!     let model = r#"
//!         model Tube
//!           parameter Real length = 10;
//!           annotation(Icon(graphics = {Line(points = {{-length, 0}, {length, 0}})}));
//!         end Tube;
//!     "#;
//!
//!     let source = ModelSource::new(model);
//!     let parameters = source.parameters();
//!     let block = source.annotation(ViewKind::Icon).expect("Icon block");
//!     block.check()?;
//!
//!     let mut document = parse_annotation(&block.substitute(&parameters))?;
//!     evaluate_document(&mut document, &parameters);
//!     assert!(document.graphics().is_some());
//!     Ok(())
//! }
//! ```

mod elaborate;
pub mod error;
mod evaluate;
mod lexer;
mod params;
mod parser;
mod parser_types;
mod source;
mod span;
mod tokens;

pub use evaluate::{EvalError, evaluate_document, evaluate_expression};
pub use params::{Parameters, substitute};
pub use source::{AnnotationBlock, ModelSource};
pub use span::{Span, Spanned};

use annoview_core::document::Document;

use elaborate::Builder;
use error::ParseError;

/// Parse an annotation body into a document.
///
/// The body is the text between `Icon(` and the matching `)`, after
/// parameter substitution. Expressions are kept unevaluated; run
/// [`evaluate_document`] on the result to resolve them.
///
/// 1. **Tokenize** - Convert the body to tokens
/// 2. **Parse** - Build the modifier tree, skipping comments
/// 3. **Elaborate** - Fold the tree into mappings and sequences
///
/// # Errors
///
/// Returns a [`ParseError`] whose diagnostics point into `source` when the
/// body contains an unterminated string or comment, or does not follow the
/// annotation grammar.
///
/// # Example
///
/// ```
/// # use annoview_parser::{parse_annotation, error::ParseError};
///
/// fn main() -> Result<(), ParseError> {
///     let document = parse_annotation("graphics = {Text(textString = \"Inlet\", fontSize = 12)}")?;
///     assert_eq!(document.to_string(), r#"{"graphics": {"Text": {"textString": "Inlet", "fontSize": 12}}}"#);
///     Ok(())
/// }
/// ```
pub fn parse_annotation(source: &str) -> Result<Document, ParseError> {
    // Step 1: Tokenize
    let tokens = lexer::tokenize(source)?;

    // Step 2: Parse
    let modifiers = parser::build_annotation(&tokens)?;

    // Step 3: Elaborate
    Ok(Builder::new(source).build(modifiers))
}
