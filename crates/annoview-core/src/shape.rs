//! Typed graphical primitives read from an annotation document.
//!
//! Annotation shape lists hold constructor calls such as
//! `Rectangle(extent = {{-50, -10}, {50, 10}}, lineColor = {0, 0, 0}, ...)`.
//! Once the document has been evaluated, [`Shape::from_node`] reads the call's
//! mapping into one of the five supported [`Shape`] variants and checks that
//! every required field is present and well-formed.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{
    color::Color,
    document::{Entry, Mapping, Node, Scalar},
    geometry::{Extent, Point},
};

/// The five supported shape constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangle,
    Line,
    Text,
    Ellipse,
    Polygon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Rectangle,
        ShapeKind::Line,
        ShapeKind::Text,
        ShapeKind::Ellipse,
        ShapeKind::Polygon,
    ];

    /// The constructor name as written in annotations.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle",
            Self::Line => "Line",
            Self::Text => "Text",
            Self::Ellipse => "Ellipse",
            Self::Polygon => "Polygon",
        }
    }

    /// Resolves a graphics key to a shape kind by prefix, so both `Line`
    /// and legacy suffixed keys such as `Line_2` are recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use annoview_core::shape::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_key("Line_2"), Some(ShapeKind::Line));
    /// assert_eq!(ShapeKind::from_key("Bitmap"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| key.starts_with(kind.name()))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised while reading a shape from its document node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape is not a constructor call with named arguments")]
    NotAConstructor,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: String,
    },
}

/// Interior fill of closed shapes, from `fillPattern = FillPattern.*`.
///
/// Hatched and gradient patterns are drawn as solid fills.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FillPattern {
    None,
    #[default]
    Solid,
}

impl FromStr for FillPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("FillPattern.").unwrap_or(s) {
            "None" => Ok(Self::None),
            "Solid" | "Horizontal" | "Vertical" | "Cross" | "Forward" | "Backward"
            | "CrossDiag" | "HorizontalCylinder" | "VerticalCylinder" | "Sphere" => {
                Ok(Self::Solid)
            }
            _ => Err(format!("a FillPattern value, found `{s}`")),
        }
    }
}

/// Outline pattern, from `pattern = LinePattern.*`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LinePattern {
    None,
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
}

impl FromStr for LinePattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("LinePattern.").unwrap_or(s) {
            "None" => Ok(Self::None),
            "Solid" => Ok(Self::Solid),
            "Dash" => Ok(Self::Dash),
            "Dot" => Ok(Self::Dot),
            "DashDot" => Ok(Self::DashDot),
            "DashDotDot" => Ok(Self::DashDotDot),
            _ => Err(format!("a LinePattern value, found `{s}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub extent: Extent,
    pub line_color: Color,
    pub fill_color: Color,
    pub line_thickness: f64,
    /// Rotation in degrees about the coordinate origin.
    pub rotation: Option<f64>,
    pub fill_pattern: FillPattern,
    pub pattern: LinePattern,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub points: Vec<Point>,
    pub color: Color,
    pub thickness: f64,
    pub pattern: LinePattern,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub extent: Extent,
    pub text: String,
    /// `None` for `fontSize = 0`: the text fills the extent height.
    pub font_size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub extent: Extent,
    pub line_color: Color,
    pub fill_color: Color,
    pub line_thickness: f64,
    pub fill_pattern: FillPattern,
    pub pattern: LinePattern,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub line_color: Color,
    pub fill_color: Color,
    pub line_thickness: f64,
    pub fill_pattern: FillPattern,
    pub pattern: LinePattern,
}

/// A drawable shape read from an evaluated annotation document.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle(Rectangle),
    Line(Line),
    Text(Text),
    Ellipse(Ellipse),
    Polygon(Polygon),
}

impl Shape {
    /// Reads a shape of the given kind from its constructor node.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] when the node is not a constructor mapping, a
    /// required field is missing, or a field has the wrong form.
    pub fn from_node(kind: ShapeKind, node: &Node) -> Result<Self, ShapeError> {
        let fields = Fields::new(node.as_mapping().ok_or(ShapeError::NotAConstructor)?);

        let shape = match kind {
            ShapeKind::Rectangle => Self::Rectangle(Rectangle {
                extent: fields.extent("extent")?,
                line_color: fields.color("lineColor")?,
                fill_color: fields.color("fillColor")?,
                line_thickness: fields.thickness("lineThickness")?,
                rotation: fields.optional_number("rotation")?,
                fill_pattern: fields.optional_parsed("fillPattern")?.unwrap_or_default(),
                pattern: fields.optional_parsed("pattern")?.unwrap_or_default(),
            }),
            ShapeKind::Line => Self::Line(Line {
                points: fields.points("points", 2)?,
                color: fields.color("color")?,
                thickness: fields.thickness("thickness")?,
                pattern: fields.optional_parsed("pattern")?.unwrap_or_default(),
            }),
            ShapeKind::Text => Self::Text(Text {
                extent: fields.extent("extent")?,
                text: fields.text("textString")?,
                font_size: fields.font_size("fontSize")?,
            }),
            ShapeKind::Ellipse => Self::Ellipse(Ellipse {
                extent: fields.extent("extent")?,
                line_color: fields.color("lineColor")?,
                fill_color: fields.color("fillColor")?,
                line_thickness: fields.thickness("lineThickness")?,
                fill_pattern: fields.optional_parsed("fillPattern")?.unwrap_or_default(),
                pattern: fields.optional_parsed("pattern")?.unwrap_or_default(),
            }),
            ShapeKind::Polygon => Self::Polygon(Polygon {
                points: fields.points("points", 2)?,
                line_color: fields.color("lineColor")?,
                fill_color: fields.color("fillColor")?,
                line_thickness: fields.thickness("lineThickness")?,
                fill_pattern: fields.optional_parsed("fillPattern")?.unwrap_or_default(),
                pattern: fields.optional_parsed("pattern")?.unwrap_or_default(),
            }),
        };

        Ok(shape)
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rectangle(_) => ShapeKind::Rectangle,
            Self::Line(_) => ShapeKind::Line,
            Self::Text(_) => ShapeKind::Text,
            Self::Ellipse(_) => ShapeKind::Ellipse,
            Self::Polygon(_) => ShapeKind::Polygon,
        }
    }
}

/// Field accessors over a constructor's arguments.
///
/// When an argument is repeated, the first occurrence wins.
struct Fields<'a> {
    mapping: &'a Mapping,
}

impl<'a> Fields<'a> {
    fn new(mapping: &'a Mapping) -> Self {
        Self { mapping }
    }

    fn get(&self, field: &'static str) -> Option<&'a Node> {
        self.mapping.get(field).map(Entry::first)
    }

    fn required(&self, field: &'static str) -> Result<&'a Node, ShapeError> {
        self.get(field).ok_or(ShapeError::MissingField(field))
    }

    fn invalid(field: &'static str, expected: impl Into<String>) -> ShapeError {
        ShapeError::InvalidField {
            field,
            expected: expected.into(),
        }
    }

    fn number(&self, field: &'static str) -> Result<f64, ShapeError> {
        self.required(field)?
            .as_number()
            .ok_or_else(|| Self::invalid(field, "a number"))
    }

    fn optional_number(&self, field: &'static str) -> Result<Option<f64>, ShapeError> {
        self.get(field)
            .map(|node| {
                node.as_number()
                    .ok_or_else(|| Self::invalid(field, "a number"))
            })
            .transpose()
    }

    fn thickness(&self, field: &'static str) -> Result<f64, ShapeError> {
        let value = self.number(field)?;
        if value < 0.0 {
            return Err(Self::invalid(field, "a non-negative number"));
        }
        Ok(value)
    }

    /// A size in pixels, or `None` when the size is left to the extent.
    fn font_size(&self, field: &'static str) -> Result<Option<f64>, ShapeError> {
        let value = self.number(field)?;
        if !value.is_finite() || value < 0.0 {
            return Err(Self::invalid(field, "a non-negative number"));
        }
        Ok((value > 0.0).then_some(value))
    }

    fn extent(&self, field: &'static str) -> Result<Extent, ShapeError> {
        self.required(field)?
            .as_extent()
            .ok_or_else(|| Self::invalid(field, "a pair of points `{{x1, y1}, {x2, y2}}`"))
    }

    fn points(&self, field: &'static str, min: usize) -> Result<Vec<Point>, ShapeError> {
        self.required(field)?
            .as_points()
            .filter(|points| points.len() >= min)
            .ok_or_else(|| Self::invalid(field, format!("a list of at least {min} points")))
    }

    fn color(&self, field: &'static str) -> Result<Color, ShapeError> {
        let components = self
            .required(field)?
            .as_numbers()
            .ok_or_else(|| Self::invalid(field, "a color triple `{r, g, b}`"))?;

        Color::from_components(&components).map_err(|err| Self::invalid(field, err))
    }

    fn text(&self, field: &'static str) -> Result<String, ShapeError> {
        match self.required(field)? {
            Node::Scalar(Scalar::String(text)) => Ok(text.clone()),
            Node::Scalar(Scalar::Number(value)) => Ok(value.to_string()),
            _ => Err(Self::invalid(field, "a string")),
        }
    }

    fn optional_parsed<T>(&self, field: &'static str) -> Result<Option<T>, ShapeError>
    where
        T: FromStr<Err = String>,
    {
        self.get(field)
            .map(|node| {
                node.as_str()
                    .ok_or_else(|| Self::invalid(field, "an enumeration value"))?
                    .parse()
                    .map_err(|err: String| Self::invalid(field, err))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> Node {
        Node::Sequence(vec![Node::number(x), Node::number(y)])
    }

    fn triple(r: f64, g: f64, b: f64) -> Node {
        Node::Sequence(vec![Node::number(r), Node::number(g), Node::number(b)])
    }

    fn rectangle_node() -> Mapping {
        let mut mapping = Mapping::new();
        mapping.insert(
            "extent",
            Node::Sequence(vec![point(-50.0, -10.0), point(50.0, 10.0)]),
        );
        mapping.insert("lineColor", triple(0.0, 0.0, 0.0));
        mapping.insert("fillColor", triple(200.0, 200.0, 255.0));
        mapping.insert("lineThickness", Node::number(1.0));
        mapping
    }

    #[test]
    fn test_shape_kind_from_key_prefix() {
        assert_eq!(ShapeKind::from_key("Rectangle"), Some(ShapeKind::Rectangle));
        assert_eq!(ShapeKind::from_key("Rectangle_1"), Some(ShapeKind::Rectangle));
        assert_eq!(ShapeKind::from_key("Polygon_0"), Some(ShapeKind::Polygon));
        assert_eq!(ShapeKind::from_key("coordinateSystem"), None);
    }

    #[test]
    fn test_rectangle_from_node() {
        let node = Node::Mapping(rectangle_node());
        let shape = Shape::from_node(ShapeKind::Rectangle, &node).unwrap();

        let Shape::Rectangle(rect) = shape else {
            panic!("Expected rectangle");
        };
        assert_eq!(rect.extent.width(), 100.0);
        assert_eq!(rect.extent.height(), 20.0);
        assert_eq!(rect.rotation, None);
        assert_eq!(rect.fill_pattern, FillPattern::Solid);
        assert_eq!(rect.fill_color.to_string(), "#c8c8ff");
    }

    #[test]
    fn test_rectangle_optional_fields() {
        let mut mapping = rectangle_node();
        mapping.insert("rotation", Node::number(30.0));
        mapping.insert("fillPattern", Node::string("FillPattern.None"));
        mapping.insert("pattern", Node::string("LinePattern.Dash"));

        let Shape::Rectangle(rect) =
            Shape::from_node(ShapeKind::Rectangle, &Node::Mapping(mapping)).unwrap()
        else {
            panic!("Expected rectangle");
        };
        assert_eq!(rect.rotation, Some(30.0));
        assert_eq!(rect.fill_pattern, FillPattern::None);
        assert_eq!(rect.pattern, LinePattern::Dash);
    }

    #[test]
    fn test_missing_required_field() {
        let mut mapping = Mapping::new();
        mapping.insert(
            "extent",
            Node::Sequence(vec![point(0.0, 0.0), point(1.0, 1.0)]),
        );
        mapping.insert("textString", Node::string("Inlet"));

        let err = Shape::from_node(ShapeKind::Text, &Node::Mapping(mapping)).unwrap_err();
        assert_eq!(err, ShapeError::MissingField("fontSize"));
        assert_eq!(err.to_string(), "missing required field `fontSize`");
    }

    #[test]
    fn test_unevaluated_expression_is_invalid_number() {
        let mut mapping = Mapping::new();
        mapping.insert(
            "points",
            Node::Sequence(vec![point(0.0, 0.0), point(1.0, 1.0)]),
        );
        mapping.insert("color", triple(0.0, 0.0, 255.0));
        mapping.insert("thickness", Node::string("thick"));

        let err = Shape::from_node(ShapeKind::Line, &Node::Mapping(mapping)).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::InvalidField {
                field: "thickness",
                ..
            }
        ));
    }

    #[test]
    fn test_color_out_of_range_is_rejected() {
        let mut mapping = rectangle_node();
        mapping = {
            let mut fresh = Mapping::new();
            for (key, entry) in mapping.iter() {
                if key != "fillColor" {
                    fresh.insert(key, entry.first().clone());
                }
            }
            fresh
        };
        mapping.insert("fillColor", triple(0.0, 0.0, 512.0));

        let err = Shape::from_node(ShapeKind::Rectangle, &Node::Mapping(mapping)).unwrap_err();
        assert!(err.to_string().contains("fillColor"));
    }

    #[test]
    fn test_line_requires_two_points() {
        let mut mapping = Mapping::new();
        mapping.insert("points", Node::Sequence(vec![point(0.0, 0.0)]));
        mapping.insert("color", triple(0.0, 0.0, 0.0));
        mapping.insert("thickness", Node::number(1.0));

        assert!(Shape::from_node(ShapeKind::Line, &Node::Mapping(mapping)).is_err());
    }

    #[test]
    fn test_two_point_polygon_is_accepted() {
        let polygon = |points: Vec<Node>| {
            let mut mapping = rectangle_node();
            mapping.insert("points", Node::Sequence(points));
            Shape::from_node(ShapeKind::Polygon, &Node::Mapping(mapping))
        };

        let Shape::Polygon(flat) = polygon(vec![point(-10.0, 0.0), point(10.0, 0.0)]).unwrap()
        else {
            panic!("Expected polygon");
        };
        assert_eq!(flat.points.len(), 2);

        assert!(polygon(vec![point(0.0, 0.0)]).is_err());
    }

    #[test]
    fn test_numeric_text_string_is_formatted() {
        let mut mapping = Mapping::new();
        mapping.insert(
            "extent",
            Node::Sequence(vec![point(0.0, 0.0), point(10.0, 10.0)]),
        );
        mapping.insert("textString", Node::number(10.0));
        mapping.insert("fontSize", Node::number(12.0));

        let Shape::Text(text) = Shape::from_node(ShapeKind::Text, &Node::Mapping(mapping)).unwrap()
        else {
            panic!("Expected text");
        };
        assert_eq!(text.text, "10");
    }

    #[test]
    fn test_non_mapping_is_rejected() {
        let err = Shape::from_node(ShapeKind::Ellipse, &Node::number(1.0)).unwrap_err();
        assert_eq!(err, ShapeError::NotAConstructor);
    }

    #[test]
    fn test_zero_font_size_fits_extent() {
        let mut mapping = Mapping::new();
        mapping.insert(
            "extent",
            Node::Sequence(vec![point(-10.0, -10.0), point(10.0, 10.0)]),
        );
        mapping.insert("textString", Node::string("Pump"));
        mapping.insert("fontSize", Node::number(0.0));

        let Shape::Text(text) = Shape::from_node(ShapeKind::Text, &Node::Mapping(mapping)).unwrap()
        else {
            panic!("Expected text");
        };
        assert_eq!(text.font_size, None);
    }

    #[test]
    fn test_negative_font_size_is_rejected() {
        let mut mapping = Mapping::new();
        mapping.insert(
            "extent",
            Node::Sequence(vec![point(0.0, 0.0), point(10.0, 10.0)]),
        );
        mapping.insert("textString", Node::string("Pump"));
        mapping.insert("fontSize", Node::number(-2.0));

        let err = Shape::from_node(ShapeKind::Text, &Node::Mapping(mapping)).unwrap_err();
        assert_eq!(err.to_string(), "field `fontSize` must be a non-negative number");
    }
}
