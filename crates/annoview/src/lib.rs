//! Annoview - renders the graphical annotations of Modelica-style models.
//!
//! A model carries an `Icon` and a `Diagram` annotation block describing how
//! it is drawn. This crate locates both blocks, substitutes the model's
//! numeric parameters, parses and evaluates the annotation, and draws the
//! shapes into a [`RenderedView`] that can be exported to SVG. The two views
//! are processed independently: one failing never affects the other.

pub mod config;

mod error;
mod export;
mod render;
mod session;

pub use annoview_core::{color, document, draw, geometry, shape, view};

pub use error::AnnoviewError;
pub use session::{DEFAULT_MODEL, ModelSession, UpdateReport};

use std::{fmt, path::Path};

use log::{debug, info, trace};

use annoview_core::{
    document::Document,
    view::{RenderedView, ViewKind},
};
use annoview_parser::{ModelSource, Parameters};

use config::AppConfig;
use export::{Exporter, svg::SvgBuilder};

/// Builder for rendering the annotation views of a model.
///
/// # Examples
///
/// ```
/// use annoview::{ViewBuilder, config::AppConfig};
///
/// let model = r#"
///     model Pipe
///       parameter Real length = 10;
///       annotation(Icon(graphics = {Line(points = {{-length, 0}, {length, 0}}, color = {0, 0, 255}, thickness = 2)}));
///       annotation(Diagram(graphics = {}));
///     end Pipe;
/// "#;
///
/// let builder = ViewBuilder::new(AppConfig::default());
/// let (icon, diagram) = builder.render(model).into_pair().expect("Failed to render");
///
/// assert_eq!(icon.primitives().len(), 1);
/// assert!(diagram.primitives().is_empty());
///
/// let svg = builder.render_svg(&icon).expect("Failed to export");
/// assert!(svg.starts_with("<svg"));
/// ```
#[derive(Default)]
pub struct ViewBuilder {
    config: AppConfig,
}

impl ViewBuilder {
    /// Create a new view builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse and evaluate the annotation document of one view.
    ///
    /// # Errors
    ///
    /// Returns [`AnnoviewError::Parse`] if the annotation block holds a
    /// lexical error or its body cannot be parsed, and
    /// [`AnnoviewError::MissingBlock`] if the model has no annotation block
    /// for `view`.
    pub fn parse_view(&self, model_text: &str, view: ViewKind) -> Result<Document, AnnoviewError> {
        let source = ModelSource::new(model_text);
        view_document(&source, &source.parameters(), view)
    }

    /// Render both annotation views of a model.
    ///
    /// Each view succeeds or fails on its own; see [`RenderedViews`]. A
    /// lexical error fails only the view whose block contains it.
    pub fn render(&self, model_text: &str) -> RenderedViews {
        info!("Rendering annotation views");

        let source = ModelSource::new(model_text);

        let parameters = source.parameters();
        debug!(parameters = parameters.len(); "Extracted model parameters");

        let render_view = |view: ViewKind| {
            let result = view_document(&source, &parameters, view)
                .and_then(|document| render::render_document(view, &document));
            match &result {
                Ok(_) => info!(view:?; "View rendered"),
                Err(err) => info!(view:?, err:%; "View failed to render"),
            }
            result
        };

        RenderedViews {
            icon: render_view(ViewKind::Icon),
            diagram: render_view(ViewKind::Diagram),
        }
    }

    /// Render a view to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`AnnoviewError::Export`] if the configured style or canvas is
    /// invalid.
    pub fn render_svg(&self, view: &RenderedView) -> Result<String, AnnoviewError> {
        let svg = SvgBuilder::new()
            .with_style(self.config.style())
            .with_canvas(self.config.canvas())
            .build()?;

        Ok(svg.render_view(view).to_string())
    }

    /// Render a view to an SVG file.
    ///
    /// # Errors
    ///
    /// Returns [`AnnoviewError::Export`] if the configuration is invalid or
    /// the file cannot be written.
    pub fn export_svg(&self, view: &RenderedView, path: &Path) -> Result<(), AnnoviewError> {
        let svg = SvgBuilder::new()
            .with_style(self.config.style())
            .with_canvas(self.config.canvas())
            .build()?;

        svg.export_view(view, path)?;
        info!(view:? = view.kind(), path = path.display().to_string(); "SVG exported");
        Ok(())
    }
}

/// Locate, substitute, parse and evaluate the annotation of one view.
fn view_document(
    source: &ModelSource<'_>,
    parameters: &Parameters,
    view: ViewKind,
) -> Result<Document, AnnoviewError> {
    let block = source
        .annotation(view)
        .ok_or(AnnoviewError::MissingBlock(view))?;
    block
        .check()
        .map_err(|err| AnnoviewError::new_parse_error(err, source.text()))?;

    let body = block.substitute(parameters);
    trace!(view:?, body = body.as_str(); "Substituted annotation body");

    let mut document = annoview_parser::parse_annotation(&body)
        .map_err(|err| AnnoviewError::new_parse_error(err, body.as_str()))?;
    annoview_parser::evaluate_document(&mut document, parameters);
    trace!(view:?, document:%; "Evaluated annotation document");

    Ok(document)
}

/// The outcome of rendering both views of a model.
#[derive(Debug)]
pub struct RenderedViews {
    pub icon: Result<RenderedView, AnnoviewError>,
    pub diagram: Result<RenderedView, AnnoviewError>,
}

impl RenderedViews {
    pub fn get(&self, view: ViewKind) -> &Result<RenderedView, AnnoviewError> {
        match view {
            ViewKind::Icon => &self.icon,
            ViewKind::Diagram => &self.diagram,
        }
    }

    pub fn status(&self, view: ViewKind) -> RenderStatus {
        match self.get(view) {
            Ok(_) => RenderStatus::Succeeded,
            Err(err) => RenderStatus::Failed(err.to_string()),
        }
    }

    /// Both views, or the first failure.
    ///
    /// # Errors
    ///
    /// Returns the Icon error if the Icon failed, otherwise the Diagram error.
    pub fn into_pair(self) -> Result<(RenderedView, RenderedView), AnnoviewError> {
        Ok((self.icon?, self.diagram?))
    }
}

/// Whether a view rendered, and why not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderStatus {
    Succeeded,
    Failed(String),
}

impl RenderStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl fmt::Display for RenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => f.write_str("succeeded"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}
