use svg::node::element as svg_element;

use crate::{
    apply_paint,
    color::Color,
    draw::{Drawable, StrokeDefinition, SvgNode},
    geometry::Extent,
    view::Canvas,
};

/// An ellipse inscribed in its extent.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnEllipse {
    extent: Extent,
    fill: Option<Color>,
    stroke: Option<StrokeDefinition>,
}

impl DrawnEllipse {
    pub fn new(extent: Extent, fill: Option<Color>, stroke: Option<StrokeDefinition>) -> Self {
        Self {
            extent,
            fill,
            stroke,
        }
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
}

impl Drawable for DrawnEllipse {
    fn render_to_svg(&self, _canvas: &Canvas) -> SvgNode {
        let (cx, cy) = self.extent.center().to_svg();

        let ellipse = svg_element::Ellipse::new()
            .set("cx", cx)
            .set("cy", cy)
            .set("rx", self.extent.width().abs() / 2.0)
            .set("ry", self.extent.height().abs() / 2.0);

        Box::new(apply_paint!(ellipse, self.fill.as_ref(), self.stroke.as_ref()))
    }
}
