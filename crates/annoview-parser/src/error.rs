//! Error and diagnostic system for the Annoview parser.
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, labeled source
//! locations, and help text. Multiple diagnostics are wrapped in
//! [`ParseError`] for returning from lexing or annotation parsing.
//!
//! Spans always refer to the text that was handed to the failing phase: the
//! whole model for lexer errors, the substituted annotation text for
//! annotation parse errors.
//!
//! # Example
//!
//! ```
//! # use annoview_parser::error::{Diagnostic, ErrorCode};
//! # use annoview_parser::Span;
//!
//! let diag = Diagnostic::error("unexpected token: expected `)`")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(12..13), "unexpected token")
//!     .with_help("check that every `(` and `{` is closed");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
