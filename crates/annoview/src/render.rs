//! Shape rendering.
//!
//! Walks the `graphics` list of an evaluated annotation document and turns
//! every supported constructor into a draw [`Primitive`], in document order.

use log::{debug, trace, warn};

use annoview_core::{
    color::Color,
    document::{Document, Node},
    draw::{
        DrawnEllipse, DrawnPolygon, DrawnRectangle, Label, Polyline, Primitive, StrokeDefinition,
    },
    shape::{FillPattern, Shape, ShapeKind},
    view::{RenderedView, ViewKind},
};

use crate::error::AnnoviewError;

/// Draws every shape of a document's `graphics` list into a new view.
///
/// The shape list is normally a mapping from constructor name to one or
/// more constructor calls. A list of single-constructor mappings is accepted
/// too, and an empty brace literal yields an empty view.
///
/// # Errors
///
/// Returns [`AnnoviewError::MissingGraphics`] when there is no shape list and
/// [`AnnoviewError::InvalidShape`] when a supported shape lacks a required
/// field or has a malformed one.
pub(crate) fn render_document(
    view: ViewKind,
    document: &Document,
) -> Result<RenderedView, AnnoviewError> {
    let graphics = document
        .graphics()
        .ok_or(AnnoviewError::MissingGraphics(view))?;

    let mut rendered = RenderedView::new(view);
    for node in graphics.nodes() {
        match node {
            Node::Mapping(shapes) => {
                for (key, entry) in shapes.iter() {
                    for shape in entry.nodes() {
                        render_entry(&mut rendered, key, shape)?;
                    }
                }
            }
            Node::Sequence(items) => {
                for item in items {
                    let Some(shapes) = item.as_mapping() else {
                        return Err(AnnoviewError::MissingGraphics(view));
                    };
                    for (key, shape) in shapes.keyed_entries() {
                        render_entry(&mut rendered, &key, shape)?;
                    }
                }
            }
            Node::Scalar(_) => return Err(AnnoviewError::MissingGraphics(view)),
        }
    }

    debug!(
        view:? = view,
        primitives = rendered.primitives().len(),
        warnings = rendered.warnings().len();
        "Rendered view"
    );
    Ok(rendered)
}

fn render_entry(rendered: &mut RenderedView, key: &str, node: &Node) -> Result<(), AnnoviewError> {
    let view = rendered.kind();

    let Some(kind) = ShapeKind::from_key(key) else {
        warn!(view:? = view, key; "Skipping unsupported graphics entry");
        rendered.warn(format!("unsupported shape `{key}` skipped"));
        return Ok(());
    };

    let shape = Shape::from_node(kind, node).map_err(|source| AnnoviewError::InvalidShape {
        view,
        kind,
        source,
    })?;
    trace!(shape:?; "Drawing shape");

    rendered.push(primitive(shape));
    Ok(())
}

fn fill(pattern: FillPattern, color: Color) -> Option<Color> {
    match pattern {
        FillPattern::None => None,
        FillPattern::Solid => Some(color),
    }
}

/// Converts a shape into its draw primitive.
fn primitive(shape: Shape) -> Primitive {
    match shape {
        Shape::Rectangle(rect) => Primitive::Rectangle(
            DrawnRectangle::new(
                rect.extent,
                fill(rect.fill_pattern, rect.fill_color),
                StrokeDefinition::from_pattern(rect.line_color, rect.line_thickness, rect.pattern),
            )
            .with_rotation(rect.rotation),
        ),
        Shape::Line(line) => Primitive::Polyline(Polyline::new(
            line.points,
            StrokeDefinition::from_pattern(line.color, line.thickness, line.pattern),
        )),
        Shape::Text(text) => {
            let center = text.extent.center();
            Primitive::Label(match text.font_size {
                Some(size) => Label::new(text.text, center, size),
                None => Label::fitted(text.text, center, text.extent.height()),
            })
        }
        Shape::Ellipse(ellipse) => Primitive::Ellipse(DrawnEllipse::new(
            ellipse.extent,
            fill(ellipse.fill_pattern, ellipse.fill_color),
            StrokeDefinition::from_pattern(
                ellipse.line_color,
                ellipse.line_thickness,
                ellipse.pattern,
            ),
        )),
        Shape::Polygon(polygon) => Primitive::Polygon(DrawnPolygon::new(
            polygon.points,
            fill(polygon.fill_pattern, polygon.fill_color),
            StrokeDefinition::from_pattern(
                polygon.line_color,
                polygon.line_thickness,
                polygon.pattern,
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use annoview_core::draw::FontSize;
    use annoview_parser::{Parameters, evaluate_document, parse_annotation};

    use super::*;

    fn render(body: &str) -> Result<RenderedView, AnnoviewError> {
        let mut document = parse_annotation(body).unwrap();
        evaluate_document(&mut document, &Parameters::new());
        render_document(ViewKind::Icon, &document)
    }

    #[test]
    fn test_text_is_centered_on_extent() {
        let view = render(
            r#"graphics = {Text(extent = {{-70, 10}, {-30, 30}}, textString = "Inlet", fontSize = 12)}"#,
        )
        .unwrap();

        let [Primitive::Label(label)] = view.primitives() else {
            panic!("Expected one label, got {:?}", view.primitives());
        };
        assert_eq!(label.text(), "Inlet");
        assert_approx_eq!(f64, label.center().x(), -50.0);
        assert_approx_eq!(f64, label.center().y(), 20.0);
        assert_eq!(label.font_size(), FontSize::Pixels(12.0));
    }

    #[test]
    fn test_zero_font_size_fills_extent_height() {
        let view = render(
            r#"graphics = {Text(extent = {{-100, -20}, {100, 20}}, textString = "%name", fontSize = 0)}"#,
        )
        .unwrap();

        let [Primitive::Label(label)] = view.primitives() else {
            panic!("Expected one label, got {:?}", view.primitives());
        };
        assert_eq!(label.font_size(), FontSize::Units(40.0));
    }

    #[test]
    fn test_document_order_is_paint_order() {
        let view = render(
            "graphics = {\
               Line(points = {{0, 0}, {1, 1}}, color = {0, 0, 255}, thickness = 2),\
               Ellipse(extent = {{-5, -5}, {5, 5}}, lineColor = {255, 0, 0}, fillColor = {255, 0, 0}, lineThickness = 1),\
               Line(points = {{1, 1}, {2, 2}}, color = {0, 0, 255}, thickness = 2)\
             }",
        )
        .unwrap();

        let kinds: Vec<&str> = view
            .primitives()
            .iter()
            .map(|primitive| match primitive {
                Primitive::Polyline(_) => "polyline",
                Primitive::Ellipse(_) => "ellipse",
                _ => "other",
            })
            .collect();
        // Repeated constructors are grouped where the first one appeared.
        assert_eq!(kinds, ["polyline", "polyline", "ellipse"]);
    }

    #[test]
    fn test_fill_pattern_none_has_no_fill() {
        let view = render(
            "graphics = {Polygon(points = {{0, 0}, {1, 0}, {0, 1}}, lineColor = {0, 0, 0}, \
             fillColor = {255, 255, 255}, lineThickness = 1, fillPattern = FillPattern.None)}",
        )
        .unwrap();

        let [Primitive::Polygon(polygon)] = view.primitives() else {
            panic!("Expected one polygon");
        };
        assert_eq!(polygon.fill(), None);
        assert!(polygon.stroke().is_some());
    }

    #[test]
    fn test_unknown_shape_is_skipped_with_warning() {
        let view = render(
            "graphics = {Bitmap(fileName = \"pump.png\"), Line(points = {{0, 0}, {1, 1}}, color = {0, 0, 0}, thickness = 1)}",
        )
        .unwrap();

        assert_eq!(view.primitives().len(), 1);
        assert_eq!(view.warnings(), ["unsupported shape `Bitmap` skipped"]);
    }

    #[test]
    fn test_empty_graphics() {
        let view = render("graphics = {}").unwrap();
        assert!(view.primitives().is_empty());
    }

    #[test]
    fn test_missing_graphics() {
        let err = render("coordinateSystem(extent = {{-100, -100}, {100, 100}})").unwrap_err();
        assert!(matches!(err, AnnoviewError::MissingGraphics(ViewKind::Icon)));
    }

    #[test]
    fn test_missing_field_fails_view() {
        let err = render("graphics = {Line(points = {{0, 0}, {1, 1}}, thickness = 1)}").unwrap_err();
        assert!(matches!(
            err,
            AnnoviewError::InvalidShape {
                kind: ShapeKind::Line,
                ..
            }
        ));
    }

    #[test]
    fn test_rotation_is_kept() {
        let view = render(
            "graphics = {Rectangle(extent = {{-50, 0}, {30, 10}}, rotation = 30, lineColor = {0, 0, 255}, \
             fillColor = {0, 0, 255}, fillPattern = FillPattern.Solid, lineThickness = 1.0)}",
        )
        .unwrap();

        let [Primitive::Rectangle(rect)] = view.primitives() else {
            panic!("Expected one rectangle");
        };
        assert_eq!(rect.rotation(), Some(30.0));
    }
}
