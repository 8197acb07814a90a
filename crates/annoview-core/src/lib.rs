//! Annoview Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Annoview parser
//! and renderer. It includes:
//!
//! - **Document**: The annotation document tree ([`document::Document`])
//! - **Shapes**: Typed graphical primitives read from a document ([`shape::Shape`])
//! - **Colors**: 0-255 color triples and CSS colors ([`color::Color`])
//! - **Geometry**: Points and extents in annotation coordinates ([`geometry`] module)
//! - **Draw**: Drawn primitives and their SVG rendering ([`draw`] module)
//! - **View**: Rendered views and the fixed canvas viewport ([`view`] module)

pub mod color;
pub mod document;
pub mod draw;
pub mod geometry;
pub mod shape;
pub mod view;
