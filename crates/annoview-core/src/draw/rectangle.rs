use svg::node::element as svg_element;

use crate::{
    apply_paint,
    color::Color,
    draw::{Drawable, StrokeDefinition, SvgNode},
    geometry::Extent,
    view::Canvas,
};

/// An axis-aligned rectangle, optionally rotated about the coordinate origin.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnRectangle {
    extent: Extent,
    fill: Option<Color>,
    stroke: Option<StrokeDefinition>,
    rotation: Option<f64>,
}

impl DrawnRectangle {
    pub fn new(extent: Extent, fill: Option<Color>, stroke: Option<StrokeDefinition>) -> Self {
        Self {
            extent,
            fill,
            stroke,
            rotation: None,
        }
    }

    /// Rotates the rectangle counter-clockwise by `degrees` about (0, 0).
    ///
    /// The pivot is the coordinate origin, not the rectangle's center.
    pub fn with_rotation(mut self, degrees: Option<f64>) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    pub fn rotation(&self) -> Option<f64> {
        self.rotation
    }
}

impl Drawable for DrawnRectangle {
    fn render_to_svg(&self, _canvas: &Canvas) -> SvgNode {
        let min = self.extent.min();
        let max = self.extent.max();

        let mut rect = svg_element::Rectangle::new()
            .set("x", min.x())
            .set("y", -max.y())
            .set("width", max.x() - min.x())
            .set("height", max.y() - min.y());

        // SVG rotates clockwise in its y-down space.
        if let Some(angle) = self.rotation.filter(|angle| *angle != 0.0) {
            rect = rect.set("transform", format!("rotate({})", -angle));
        }

        Box::new(apply_paint!(rect, self.fill.as_ref(), self.stroke.as_ref()))
    }
}
