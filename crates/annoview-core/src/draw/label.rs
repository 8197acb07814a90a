use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, SvgNode},
    geometry::Point,
    view::Canvas,
};

/// Size of a label's text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontSize {
    /// Screen pixels, converted to user units when rendered so the label
    /// keeps its size whatever the viewport.
    Pixels(f64),
    /// User units, scaling with the drawing.
    Units(f64),
}

/// Text centered on a point.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    text: String,
    center: Point,
    font_size: FontSize,
    color: Color,
}

impl Label {
    /// A label with a font size in screen pixels.
    pub fn new(text: impl Into<String>, center: Point, font_size: f64) -> Self {
        Self {
            text: text.into(),
            center,
            font_size: FontSize::Pixels(font_size),
            color: Color::default(),
        }
    }

    /// A label whose text is as tall as `height` user units, at least one.
    pub fn fitted(text: impl Into<String>, center: Point, height: f64) -> Self {
        Self {
            font_size: FontSize::Units(height.abs().max(1.0)),
            ..Self::new(text, center, 0.0)
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Drawable for Label {
    fn render_to_svg(&self, canvas: &Canvas) -> SvgNode {
        let (x, y) = self.center.to_svg();
        let font_size = match self.font_size {
            FontSize::Pixels(pixels) => pixels / canvas.pixels_per_unit(),
            FontSize::Units(units) => units,
        };

        let text = svg_element::Text::new(self.text.clone())
            .set("x", x)
            .set("y", y)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", "sans-serif")
            .set("font-size", font_size)
            .set("fill", self.color.to_string());

        Box::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Viewport;

    #[test]
    fn test_label_font_size_scales_with_canvas() {
        let label = Label::new("Inlet", Point::new(-50.0, 20.0), 12.0);
        let canvas = Canvas::new(Viewport::default(), 600.0);

        let svg = label.render_to_svg(&canvas).to_string();
        assert!(svg.contains("Inlet"));
        assert!(svg.contains(r#"x="-50""#));
        assert!(svg.contains(r#"y="-20""#));
        assert!(svg.contains(r#"font-size="6""#));
        assert!(svg.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn test_fitted_label_uses_user_units() {
        let label = Label::fitted("Pump", Point::new(0.0, 0.0), -20.0);
        assert_eq!(label.font_size(), FontSize::Units(20.0));

        let canvas = Canvas::new(Viewport::default(), 600.0);
        let svg = label.render_to_svg(&canvas).to_string();
        assert!(svg.contains(r#"font-size="20""#));

        let flat = Label::fitted("Pump", Point::new(0.0, 0.0), 0.0);
        assert_eq!(flat.font_size(), FontSize::Units(1.0));
    }
}
