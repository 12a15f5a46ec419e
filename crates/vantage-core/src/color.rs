//! Color handling for Vantage charts
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors are parsed from CSS strings, serialized back
//! to CSS strings in chart specifications, and converted directly into SVG
//! attribute values by the renderer.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;
use serde::{Serialize, Serializer};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#09188d"`,
    /// `"rgba(150,150,150,0.5)"` or `"orange"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vantage_core::color::Color;
    ///
    /// let primary = Color::new("#09188d").unwrap();
    /// let faded = Color::new("rgba(150,150,150,0.5)").unwrap();
    /// assert!(faded.alpha() < 1.0);
    /// assert!(Color::new("not-a-color").is_err());
    /// # let _ = primary;
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns a string usable inside an SVG `id` attribute.
    ///
    /// The result contains only alphanumeric characters and underscores and
    /// always starts with a letter. The SVG renderer uses it to name one
    /// arrowhead marker per edge color.
    pub fn to_id_safe_string(self) -> String {
        let color_str = self.to_string();
        let mut sanitized = color_str
            .replace('#', "hex")
            .replace(['(', ')', ',', ' ', ';', '.', '%', '/'], "_");

        if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            sanitized = format!("c_{sanitized}");
        }

        sanitized
    }

    /// Creates a new color with the specified alpha value in `0.0..=1.0`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component of this color, `0.0` being fully transparent.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#2ca02c").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("#ff7f0e").unwrap();
        let transparent = color.with_alpha(0.5);
        assert_approx_eq!(f32, transparent.alpha(), 0.5, epsilon = 0.001);
    }

    #[test]
    fn test_rgba_string_keeps_alpha() {
        let color = Color::new("rgba(150,150,150,0.5)").unwrap();
        assert_approx_eq!(f32, color.alpha(), 0.5, epsilon = 0.001);
    }

    #[test]
    fn test_color_to_id_safe_string() {
        let safe_id = Color::new("rgba(150,150,150,0.5)")
            .unwrap()
            .to_id_safe_string();
        assert!(safe_id.chars().all(|c| c.is_alphanumeric() || c == '_'));
        assert!(safe_id.starts_with(|c: char| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_from_str_matches_new() {
        let parsed: Color = "#58508d".parse().unwrap();
        assert_eq!(parsed, Color::new("#58508d").unwrap());
    }

    #[test]
    fn test_color_eq_hash() {
        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }
}
