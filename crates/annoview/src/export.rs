//! Export functionality for rendered views.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! writing a [`RenderedView`] to an output format. It is the final stage in
//! the Annoview pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Model Text
//!     ↓ locate + substitute
//! Annotation Body
//!     ↓ parse + evaluate
//! Annotation Document
//!     ↓ render
//! RenderedView
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`AnnoviewError::Export`] at the crate
//! boundary.
//!
//! [`AnnoviewError::Export`]: crate::AnnoviewError::Export

/// SVG export backend.
pub mod svg;

use std::path::Path;

use annoview_core::view::RenderedView;

/// Abstraction for view export backends.
///
/// See the [`svg`] module for the built-in SVG implementation.
pub trait Exporter {
    /// Exports one rendered view to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the view cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_view(&self, view: &RenderedView, path: &Path) -> Result<(), Error>;
}

/// Errors that can occur during view export.
///
/// This type is converted into [`AnnoviewError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`AnnoviewError::Export`]: crate::AnnoviewError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
