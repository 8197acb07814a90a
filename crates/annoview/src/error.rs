//! Error types for Annoview operations.
//!
//! This module provides the main error type [`AnnoviewError`] which wraps
//! the failures of each rendering stage. Every error belongs to a single
//! view; a failed Icon never prevents the Diagram from rendering.

use std::io;

use thiserror::Error;

use annoview_core::{shape::ShapeError, shape::ShapeKind, view::ViewKind};
use annoview_parser::error::ParseError;

/// The main error type for Annoview operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant contains structured error information with source code
/// spans. `src` is the text those spans index into: the model text for
/// lexer errors, the substituted annotation body for annotation errors.
#[derive(Debug, Error)]
pub enum AnnoviewError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("no `annotation({0}(...));` block found")]
    MissingBlock(ViewKind),

    #[error("{0} annotation has no `graphics` list")]
    MissingGraphics(ViewKind),

    #[error("invalid {kind} in {view} annotation: {source}")]
    InvalidShape {
        view: ViewKind,
        kind: ShapeKind,
        #[source]
        source: ShapeError,
    },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for AnnoviewError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl AnnoviewError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
