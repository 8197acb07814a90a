//! Configuration types for Annoview rendering.
//!
//! This module provides configuration structures that control how rendered
//! views are exported. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining canvas and style settings.
//! - [`CanvasConfig`] - Output size and grid spacing of exported views.
//! - [`StyleConfig`] - Controls visual styling options such as background color.
//!
//! # Example
//!
//! ```
//! # use annoview::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.canvas().grid_spacing(), 25.0);
//! ```

use serde::Deserialize;

use annoview_core::{
    color::Color,
    view::{Canvas, Viewport},
};

/// Top-level application configuration combining canvas and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified canvas and style configurations.
    pub fn new(canvas: CanvasConfig, style: StyleConfig) -> Self {
        Self { canvas, style }
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Output surface of exported views.
///
/// The viewport itself is fixed; only the pixel size and the grid are
/// configurable.
#[derive(Debug, Clone, Deserialize)]
pub struct CanvasConfig {
    /// Width of the exported SVG in pixels; the height follows the viewport's
    /// aspect ratio.
    #[serde(default = "default_width")]
    width: f64,

    /// Distance between grid lines in annotation units.
    #[serde(default = "default_grid_spacing")]
    grid_spacing: f64,
}

fn default_width() -> f64 {
    600.0
}

fn default_grid_spacing() -> f64 {
    25.0
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            grid_spacing: default_grid_spacing(),
        }
    }
}

impl CanvasConfig {
    pub fn new(width: f64, grid_spacing: f64) -> Self {
        Self {
            width,
            grid_spacing,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn grid_spacing(&self) -> f64 {
        self.grid_spacing
    }

    /// The canvas for a viewport at the configured width.
    pub fn canvas(&self, viewport: Viewport) -> Canvas {
        Canvas::new(viewport, self.width)
    }
}

/// Visual styling configuration for exported views.
///
/// Fields that are not set fall back to exporter defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Grid line [`Color`] as a color string.
    #[serde(default)]
    grid_color: Option<String>,

    /// Whether grid lines are drawn.
    #[serde(default = "default_show_grid")]
    show_grid: bool,
}

fn default_show_grid() -> bool {
    true
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            grid_color: None,
            show_grid: default_show_grid(),
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.background_color.as_deref(), "background")
    }

    /// Returns the parsed grid [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid color.
    pub fn grid_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.grid_color.as_deref(), "grid")
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }
}

fn parse_color(value: Option<&str>, name: &str) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {name} color in config: {err}"))
}
