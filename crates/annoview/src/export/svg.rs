//! SVG export backend.
//!
//! [`SvgBuilder`] resolves the style and canvas configuration into an
//! [`Svg`] exporter, which renders a [`RenderedView`] into an
//! [`svg::Document`] and writes it to disk.

mod view;

use std::{fs::File, io::Write, path::Path};

use log::{debug, error, info};

use annoview_core::{
    color::Color,
    view::{RenderedView, Viewport},
};

use super::{Error, Exporter};
use crate::config::{CanvasConfig, StyleConfig};

/// Most grid lines drawn along one axis.
const MAX_GRID_LINES: f64 = 10_000.0;

/// Builder for [`Svg`] exporters.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
    canvas: Option<&'a CanvasConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_canvas(mut self, canvas: &'a CanvasConfig) -> Self {
        self.canvas = Some(canvas);
        self
    }

    /// Builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color is invalid, the
    /// canvas size is not positive, or the grid spacing is so small that the
    /// grid would need more than 10 000 lines along an axis.
    pub fn build(self) -> Result<Svg, Error> {
        let canvas = self.canvas.cloned().unwrap_or_default();
        if !canvas.width().is_finite() || canvas.width() <= 0.0 {
            return Err(Error::Render(format!(
                "canvas width must be positive, found {}",
                canvas.width()
            )));
        }
        if !canvas.grid_spacing().is_finite() || canvas.grid_spacing() <= 0.0 {
            return Err(Error::Render(format!(
                "grid spacing must be positive, found {}",
                canvas.grid_spacing()
            )));
        }
        let viewport = Viewport::default();
        if viewport.width().max(viewport.height()) / canvas.grid_spacing() > MAX_GRID_LINES {
            return Err(Error::Render(format!(
                "grid spacing {} is too small for the {}x{} viewport",
                canvas.grid_spacing(),
                viewport.width(),
                viewport.height()
            )));
        }

        let style = self.style.cloned().unwrap_or_default();
        let background = style
            .background_color()
            .map_err(Error::Render)?
            .unwrap_or_else(|| Color::from_rgb8(255, 255, 255));
        let grid_color = style
            .grid_color()
            .map_err(Error::Render)?
            .unwrap_or_else(|| Color::from_rgb8(221, 221, 221));

        Ok(Svg {
            canvas,
            background,
            grid: style.show_grid().then_some(grid_color),
        })
    }
}

/// SVG exporter for rendered views.
#[derive(Debug, Clone)]
pub struct Svg {
    canvas: CanvasConfig,
    background: Color,
    /// Grid line color; `None` disables the grid.
    grid: Option<Color>,
}

impl Svg {
    /// Writes an SVG document to the specified file
    pub fn write_document(&self, doc: &svg::Document, path: &Path) -> Result<(), Error> {
        let file_name = path.display().to_string();
        info!(file_name; "Creating SVG file");

        let mut f = match File::create(path) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name, err:err; "Failed to create SVG file");
                return Err(Error::Io(err));
            }
        };

        if let Err(err) = write!(f, "{doc}") {
            error!(file_name, err:err; "Failed to write SVG content");
            return Err(Error::Io(err));
        }

        Ok(())
    }
}

impl Exporter for Svg {
    fn export_view(&self, view: &RenderedView, path: &Path) -> Result<(), Error> {
        let doc = self.render_view(view);
        debug!(view:? = view.kind(); "SVG document rendered");

        self.write_document(&doc, path)
    }
}
