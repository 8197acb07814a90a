use svg::node::element as svg_element;

use crate::{
    apply_paint,
    color::Color,
    draw::{Drawable, StrokeDefinition, SvgNode, svg_points},
    geometry::Point,
    view::Canvas,
};

/// A closed, optionally filled polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnPolygon {
    points: Vec<Point>,
    fill: Option<Color>,
    stroke: Option<StrokeDefinition>,
}

impl DrawnPolygon {
    pub fn new(points: Vec<Point>, fill: Option<Color>, stroke: Option<StrokeDefinition>) -> Self {
        Self {
            points,
            fill,
            stroke,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }
}

impl Drawable for DrawnPolygon {
    fn render_to_svg(&self, _canvas: &Canvas) -> SvgNode {
        let polygon = svg_element::Polygon::new().set("points", svg_points(&self.points));

        Box::new(apply_paint!(polygon, self.fill.as_ref(), self.stroke.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_points_attribute() {
        let polygon = DrawnPolygon::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(5.0, 8.0),
            ],
            Some(Color::from_rgb8(0, 128, 0)),
            Some(StrokeDefinition::default()),
        );

        let svg = polygon.render_to_svg(&Canvas::default()).to_string();
        assert!(svg.contains(r#"points="0,0 10,0 5,-8""#));
        assert!(svg.contains(r##"fill="#008000""##));
    }
}
