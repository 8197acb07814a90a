//! Rendered views and the canvas they are drawn on.

use std::fmt;

use crate::{draw::Primitive, geometry::Point};

/// The two annotation views a model carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Icon,
    Diagram,
}

impl ViewKind {
    pub const ALL: [ViewKind; 2] = [ViewKind::Icon, ViewKind::Diagram];

    /// The annotation keyword introducing the view.
    pub fn name(self) -> &'static str {
        match self {
            Self::Icon => "Icon",
            Self::Diagram => "Diagram",
        }
    }

    /// Lower-case name used in file names and status messages.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Icon => "icon",
            Self::Diagram => "diagram",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The visible region of a view in annotation coordinates.
///
/// Every view uses the same fixed region, x in [-150, 150] and
/// y in [-100, 100], regardless of the annotation's own `coordinateSystem`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    min: Point,
    max: Point,
}

impl Viewport {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn width(&self) -> f64 {
        self.max.x() - self.min.x()
    }

    pub fn height(&self) -> f64 {
        self.max.y() - self.min.y()
    }

    /// The SVG `viewBox` as `(min_x, min_y, width, height)` in y-down space.
    pub fn view_box(&self) -> (f64, f64, f64, f64) {
        (self.min.x(), -self.max.y(), self.width(), self.height())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Point::new(-150.0, -100.0), Point::new(150.0, 100.0))
    }
}

/// A viewport mapped onto an output surface of a given pixel width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    viewport: Viewport,
    pixel_width: f64,
}

impl Canvas {
    pub fn new(viewport: Viewport, pixel_width: f64) -> Self {
        Self {
            viewport,
            pixel_width,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn pixel_width(&self) -> f64 {
        self.pixel_width
    }

    /// Height in pixels, keeping the viewport's aspect ratio.
    pub fn pixel_height(&self) -> f64 {
        self.pixel_width * self.viewport.height() / self.viewport.width()
    }

    /// Screen pixels per annotation unit.
    pub fn pixels_per_unit(&self) -> f64 {
        self.pixel_width / self.viewport.width()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Viewport::default(), 600.0)
    }
}

/// The drawing produced for one view.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView {
    kind: ViewKind,
    viewport: Viewport,
    primitives: Vec<Primitive>,
    warnings: Vec<String>,
}

impl RenderedView {
    pub fn new(kind: ViewKind) -> Self {
        Self {
            kind,
            viewport: Viewport::default(),
            primitives: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Drawn primitives in paint order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Graphics entries that were skipped, such as unsupported shape kinds.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}
