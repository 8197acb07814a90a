//! Color handling for annotation graphics
//!
//! This module provides the [`Color`] type which wraps an sRGB `AlphaColor`
//! from the color crate. Annotation colors arrive as `{r, g, b}` triples of
//! 0-255 integers and are normalized to 0-1 fractions on construction.

use std::{fmt, str::FromStr};

use color::{AlphaColor, DynamicColor, Srgb};

/// Wrapper around an sRGB color from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: AlphaColor<Srgb>,
}

impl Color {
    /// Create a new `Color` from a CSS color string
    /// such as "#ff0000", "rgb(255, 0, 0)" or "red".
    ///
    /// # Examples
    ///
    /// ```
    /// use annoview_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self {
                color: color.to_alpha_color::<Srgb>(),
            }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Create an opaque color from 8-bit channel values.
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            color: AlphaColor::new([
                f32::from(red) / 255.0,
                f32::from(green) / 255.0,
                f32::from(blue) / 255.0,
                1.0,
            ]),
        }
    }

    /// Create a color from an annotation triple such as `{200, 200, 255}`.
    ///
    /// Every component must lie in `0..=255`; fractional values are rounded.
    ///
    /// # Examples
    ///
    /// ```
    /// use annoview_core::color::Color;
    ///
    /// let color = Color::from_components(&[0.0, 127.5, 255.0]).unwrap();
    /// assert_eq!(color.to_string(), "#0080ff");
    /// assert!(Color::from_components(&[0.0, 0.0]).is_err());
    /// assert!(Color::from_components(&[0.0, 0.0, 300.0]).is_err());
    /// ```
    pub fn from_components(components: &[f64]) -> Result<Self, String> {
        let [red, green, blue] = components else {
            return Err(format!(
                "expected 3 color components, found {}",
                components.len()
            ));
        };

        let channel = |value: f64| {
            if value.is_finite() && (0.0..=255.0).contains(&value) {
                Ok(value.round() as u8)
            } else {
                Err(format!("color component {value} is outside 0..=255"))
            }
        };

        Ok(Self::from_rgb8(channel(*red)?, channel(*green)?, channel(*blue)?))
    }

    /// Returns the red, green and blue channels as 0-1 fractions.
    pub fn fractions(&self) -> [f32; 3] {
        let [red, green, blue, _] = self.color.components;
        [red, green, blue]
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_rgb8(0, 0, 0)
    }
}

/// Formats the color as a `#rrggbb` hex string; alpha is exposed separately.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [red, green, blue] = self
            .fractions()
            .map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8);
        write!(f, "#{red:02x}{green:02x}{blue:02x}")
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
