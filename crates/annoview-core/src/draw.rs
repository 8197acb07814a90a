//! Drawn primitives and their SVG rendering.
//!
//! A rendered view is a flat list of [`Primitive`]s in annotation
//! coordinates. Each primitive implements [`Drawable`], which turns it into an
//! SVG node for a given [`Canvas`]. Conversion to the y-down SVG space happens
//! here and nowhere else.
mod ellipse;
mod label;
mod polygon;
mod polyline;
mod rectangle;
mod stroke;

pub use ellipse::DrawnEllipse;
pub use label::{FontSize, Label};
pub use polygon::DrawnPolygon;
pub use polyline::Polyline;
pub use rectangle::DrawnRectangle;
pub use stroke::{StrokeDefinition, StrokeStyle};

use crate::{geometry::Point, view::Canvas};

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Trait for primitives that can be rendered to SVG.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable onto the given canvas.
    fn render_to_svg(&self, canvas: &Canvas) -> SvgNode;
}

/// A single drawn element of a view.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rectangle(DrawnRectangle),
    Ellipse(DrawnEllipse),
    Polygon(DrawnPolygon),
    Polyline(Polyline),
    Label(Label),
}

impl Drawable for Primitive {
    fn render_to_svg(&self, canvas: &Canvas) -> SvgNode {
        match self {
            Self::Rectangle(rect) => rect.render_to_svg(canvas),
            Self::Ellipse(ellipse) => ellipse.render_to_svg(canvas),
            Self::Polygon(polygon) => polygon.render_to_svg(canvas),
            Self::Polyline(polyline) => polyline.render_to_svg(canvas),
            Self::Label(label) => label.render_to_svg(canvas),
        }
    }
}

/// Formats points as an SVG `points` attribute, flipping the y axis.
fn svg_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|point| {
            let (x, y) = point.to_svg();
            format!("{x},{y}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_points_flip_y() {
        let points = [Point::new(-50.0, 0.0), Point::new(50.0, 2.5)];
        assert_eq!(svg_points(&points), "-50,0 50,-2.5");
    }
}
