use svg::node::element as svg_element;

use crate::{
    apply_paint,
    color::Color,
    draw::{Drawable, StrokeDefinition, SvgNode, svg_points},
    geometry::Point,
    view::Canvas,
};

/// An open line through its points.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Point>,
    stroke: Option<StrokeDefinition>,
}

impl Polyline {
    pub fn new(points: Vec<Point>, stroke: Option<StrokeDefinition>) -> Self {
        Self { points, stroke }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }
}

impl Drawable for Polyline {
    fn render_to_svg(&self, _canvas: &Canvas) -> SvgNode {
        let polyline = svg_element::Polyline::new()
            .set("points", svg_points(&self.points))
            .set("stroke-linejoin", "round");

        Box::new(apply_paint!(polyline, None::<&Color>, self.stroke.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::StrokeStyle;

    #[test]
    fn test_polyline_is_never_filled() {
        let stroke = StrokeDefinition::new(Color::from_rgb8(0, 0, 255), 2.0)
            .with_style(StrokeStyle::Dashed);
        let line = Polyline::new(
            vec![Point::new(-50.0, 0.0), Point::new(50.0, 0.0)],
            Some(stroke),
        );

        let svg = line.render_to_svg(&Canvas::default()).to_string();
        assert!(svg.contains(r#"fill="none""#));
        assert!(svg.contains(r##"stroke="#0000ff""##));
        assert!(svg.contains(r#"stroke-dasharray="5,5""#));
        assert!(svg.contains(r#"vector-effect="non-scaling-stroke""#));
    }
}
