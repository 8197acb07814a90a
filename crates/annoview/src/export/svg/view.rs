//! SVG rendering for a single view.

use svg::node::element as svg_element;

use annoview_core::{
    draw::Drawable,
    view::{RenderedView, Viewport},
};

use super::Svg;

impl Svg {
    /// Renders a view to an SVG document.
    ///
    /// The `viewBox` is the view's viewport with the y axis flipped, so
    /// annotation coordinates are used unchanged apart from negating y.
    pub fn render_view(&self, view: &RenderedView) -> svg::Document {
        let viewport = view.viewport();
        let canvas = self.canvas.canvas(*viewport);
        let (min_x, min_y, width, height) = viewport.view_box();

        let mut doc = svg::Document::new()
            .set("viewBox", format!("{min_x} {min_y} {width} {height}"))
            .set("width", canvas.pixel_width())
            .set("height", canvas.pixel_height())
            .add(self.render_background(viewport));

        if self.grid.is_some() {
            doc = doc.add(self.render_grid(viewport));
        }

        let shapes = view
            .primitives()
            .iter()
            .fold(svg_element::Group::new().set("class", "shapes"), |group, primitive| {
                group.add(primitive.render_to_svg(&canvas))
            });

        doc.add(shapes).add(Self::render_frame(viewport))
    }

    fn render_background(&self, viewport: &Viewport) -> svg_element::Rectangle {
        let (x, y, width, height) = viewport.view_box();
        svg_element::Rectangle::new()
            .set("x", x)
            .set("y", y)
            .set("width", width)
            .set("height", height)
            .set("fill", &self.background)
    }

    /// Grid lines at every multiple of the grid spacing inside the viewport.
    fn render_grid(&self, viewport: &Viewport) -> svg_element::Group {
        let mut group = svg_element::Group::new()
            .set("class", "grid")
            .set("stroke-width", 1)
            .set("vector-effect", "non-scaling-stroke");
        if let Some(color) = &self.grid {
            group = group.set("stroke", color);
        }

        let spacing = self.canvas.grid_spacing();
        let (min, max) = (viewport.min(), viewport.max());

        for x in grid_positions(min.x(), max.x(), spacing) {
            group = group.add(
                svg_element::Line::new()
                    .set("x1", x)
                    .set("y1", -max.y())
                    .set("x2", x)
                    .set("y2", -min.y())
                    .set("vector-effect", "non-scaling-stroke"),
            );
        }
        for y in grid_positions(min.y(), max.y(), spacing) {
            group = group.add(
                svg_element::Line::new()
                    .set("x1", min.x())
                    .set("y1", -y)
                    .set("x2", max.x())
                    .set("y2", -y)
                    .set("vector-effect", "non-scaling-stroke"),
            );
        }

        group
    }

    fn render_frame(viewport: &Viewport) -> svg_element::Rectangle {
        let (x, y, width, height) = viewport.view_box();
        svg_element::Rectangle::new()
            .set("x", x)
            .set("y", y)
            .set("width", width)
            .set("height", height)
            .set("fill", "none")
            .set("stroke", "#000000")
            .set("stroke-width", 1)
            .set("vector-effect", "non-scaling-stroke")
    }
}

/// Multiples of `spacing` within `[min, max]`.
fn grid_positions(min: f64, max: f64, spacing: f64) -> impl Iterator<Item = f64> {
    let first = (min / spacing).ceil() as i64;
    let last = (max / spacing).floor() as i64;
    (first..=last).map(move |step| step as f64 * spacing)
}

#[cfg(test)]
mod tests {
    use annoview_core::{
        draw::{Label, Primitive},
        geometry::Point,
        view::ViewKind,
    };

    use super::*;
    use crate::{
        config::{CanvasConfig, StyleConfig},
        export::svg::SvgBuilder,
    };

    #[test]
    fn test_grid_positions() {
        let positions: Vec<f64> = grid_positions(-150.0, 150.0, 25.0).collect();
        assert_eq!(positions.len(), 13);
        assert_eq!(positions.first(), Some(&-150.0));
        assert_eq!(positions.last(), Some(&150.0));

        let positions: Vec<f64> = grid_positions(-100.0, 100.0, 30.0).collect();
        assert_eq!(positions, [-90.0, -60.0, -30.0, 0.0, 30.0, 60.0, 90.0]);
    }

    #[test]
    fn test_tiny_grid_spacing_is_rejected() {
        let canvas = CanvasConfig::new(600.0, 1e-300);
        let err = SvgBuilder::new().with_canvas(&canvas).build().unwrap_err();
        assert!(err.to_string().contains("too small"), "{err}");

        let canvas = CanvasConfig::new(600.0, 0.05);
        assert!(SvgBuilder::new().with_canvas(&canvas).build().is_ok());
    }

    #[test]
    fn test_render_view_document() {
        let mut view = RenderedView::new(ViewKind::Icon);
        view.push(Primitive::Label(Label::new(
            "Inlet",
            Point::new(-50.0, 20.0),
            12.0,
        )));

        let canvas = CanvasConfig::new(900.0, 50.0);
        let svg = SvgBuilder::new().with_canvas(&canvas).build().unwrap();
        let output = svg.render_view(&view).to_string();

        assert!(output.contains(r#"viewBox="-150 -100 300 200""#));
        assert!(output.contains(r#"width="900""#));
        assert!(output.contains(r#"height="600""#));
        assert!(output.contains(r#"class="grid""#));
        assert!(output.contains("Inlet"));
    }

    #[test]
    fn test_grid_can_be_disabled() {
        let style: StyleConfig = toml::from_str("show_grid = false").unwrap();
        let svg = SvgBuilder::new().with_style(&style).build().unwrap();

        let output = svg.render_view(&RenderedView::new(ViewKind::Diagram)).to_string();
        assert!(!output.contains(r#"class="grid""#));
    }

    #[test]
    fn test_invalid_canvas_is_rejected() {
        let canvas = CanvasConfig::new(0.0, 25.0);
        assert!(SvgBuilder::new().with_canvas(&canvas).build().is_err());
    }
}
