//! Stroke and line-style definitions.
//!
//! Exported types:
//! - [`StrokeDefinition`]: The stroke properties of an outline (color, width, style)
//! - [`StrokeStyle`]: Enum defining line patterns (solid, dashed, dotted, etc.)
//! - [`apply_stroke!`](crate::apply_stroke!): Macro for applying stroke attributes to SVG elements
//!
//! Stroke widths are given in screen pixels and rendered with
//! `vector-effect="non-scaling-stroke"`, so a `lineThickness = 1` outline
//! stays one pixel wide whatever the canvas size.
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#000000"`, `0.5` |
//! | `width` | `stroke-width` | `2.0` |
//! | `style` | `stroke-dasharray` | `"5,5"`, `"10,5,2,5"` |

use crate::{color::Color, shape::LinePattern};

/// Defines the visual style of a stroke, including dash patterns.
///
/// # SVG Mapping
///
/// Each variant maps to specific SVG `stroke-dasharray` values:
/// - `Solid`: No dasharray attribute
/// - `Dashed`: "5,5"
/// - `Dotted`: "2,3"
/// - `DashDot`: "10,5,2,5"
/// - `DashDotDot`: "10,5,2,5,2,5"
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
    DashDotDot,
}

impl StrokeStyle {
    /// Maps an annotation line pattern to a stroke style.
    ///
    /// Returns `None` for `LinePattern.None`, which draws no outline at all.
    pub fn from_line_pattern(pattern: LinePattern) -> Option<Self> {
        match pattern {
            LinePattern::None => None,
            LinePattern::Solid => Some(Self::Solid),
            LinePattern::Dash => Some(Self::Dashed),
            LinePattern::Dot => Some(Self::Dotted),
            LinePattern::DashDot => Some(Self::DashDot),
            LinePattern::DashDotDot => Some(Self::DashDotDot),
        }
    }

    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
            Self::Dotted => Some("2,3"),
            Self::DashDot => Some("10,5,2,5"),
            Self::DashDotDot => Some("10,5,2,5,2,5"),
        }
    }
}

/// A stroke definition for rendering lines and borders.
///
/// # Examples
///
/// ```
/// use annoview_core::color::Color;
/// use annoview_core::draw::{StrokeDefinition, StrokeStyle};
///
/// let stroke = StrokeDefinition::new(Color::from_rgb8(0, 0, 255), 2.0)
///     .with_style(StrokeStyle::Dashed);
/// assert_eq!(stroke.width(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f64,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a solid stroke with the given color and width in pixels.
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Builds the stroke for an annotation outline, or `None` when the
    /// pattern suppresses it.
    pub fn from_pattern(color: Color, width: f64, pattern: LinePattern) -> Option<Self> {
        StrokeStyle::from_line_pattern(pattern).map(|style| Self::new(color, width).with_style(style))
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// This macro applies color, opacity, width and dash pattern (if not solid)
/// and marks the stroke as non-scaling.
///
/// # Examples
///
/// ```
/// use annoview_core::color::Color;
/// use annoview_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::new(Color::default(), 2.0);
/// let rect = svg_element::Rectangle::new()
///     .set("x", 0)
///     .set("y", 0);
///
/// let rect = annoview_core::apply_stroke!(rect, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("vector-effect", "non-scaling-stroke");

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

/// Apply an optional fill and optional stroke to an SVG element.
///
/// A missing fill or stroke is written as `none`.
#[macro_export]
macro_rules! apply_paint {
    ($element:expr, $fill:expr, $stroke:expr) => {{
        let elem = match $fill {
            Some(color) => $element
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha()),
            None => $element.set("fill", "none"),
        };

        match $stroke {
            Some(stroke) => $crate::apply_stroke!(elem, stroke),
            None => elem.set("stroke", "none"),
        }
    }};
}
