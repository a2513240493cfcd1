// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated attribute types.
//!
//! Every type here is valid by construction: the only ways to obtain one are
//! the checked constructors, so a stored layer can never hold an out-of-range
//! opacity or a malformed color.

use core::fmt;
use core::str::FromStr;

use crate::error::{LayerError, LayerResult};

/// An opacity percentage in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "i64", into = "u8")
)]
pub struct Opacity(u8);

impl Opacity {
    /// Fully opaque.
    pub const OPAQUE: Self = Self(100);

    /// Fully transparent.
    pub const TRANSPARENT: Self = Self(0);

    /// Largest accepted percentage.
    pub const MAX_PERCENT: u8 = 100;

    /// Creates an opacity from a percentage.
    ///
    /// Out-of-range values are rejected, never clamped.
    pub fn new(percent: i64) -> LayerResult<Self> {
        match u8::try_from(percent) {
            Ok(p) if p <= Self::MAX_PERCENT => Ok(Self(p)),
            _ => Err(LayerError::Range {
                attr: "opacity",
                value: percent,
                min: 0,
                max: i64::from(Self::MAX_PERCENT),
            }),
        }
    }

    /// Returns the stored percentage.
    #[inline]
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Returns the percentage as a factor in `[0.0, 1.0]`.
    #[inline]
    #[must_use]
    pub fn factor(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl TryFrom<i64> for Opacity {
    type Error = LayerError;

    fn try_from(percent: i64) -> LayerResult<Self> {
        Self::new(percent)
    }
}

impl From<Opacity> for u8 {
    fn from(opacity: Opacity) -> Self {
        opacity.0
    }
}

impl fmt::Display for Opacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A hexadecimal CSS color (`#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`).
///
/// The text is kept exactly as given so renderers can emit it verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    text: String,
    rgba: [u8; 4],
}

impl Color {
    /// Parses and validates a color.
    pub fn parse(text: &str) -> LayerResult<Self> {
        let Some(digits) = text.strip_prefix('#') else {
            return Err(LayerError::validation(
                "color",
                format!("{text:?} must start with '#'"),
            ));
        };
        if !matches!(digits.len(), 3 | 4 | 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(LayerError::validation(
                "color",
                format!("{text:?} is not a hexadecimal color"),
            ));
        }
        let parsed: csscolorparser::Color = text
            .parse()
            .map_err(|e| LayerError::validation("color", format!("{text:?}: {e}")))?;
        Ok(Self {
            text: text.to_owned(),
            rgba: parsed.to_rgba8(),
        })
    }

    /// Returns the color text as given at construction.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the color as 8-bit RGBA channels.
    #[inline]
    #[must_use]
    pub const fn rgba(&self) -> [u8; 4] {
        self.rgba
    }
}

impl FromStr for Color {
    type Err = LayerError;

    fn from_str(s: &str) -> LayerResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// The display name of a container, at most [`DisplayName::MAX_CHARS`]
/// characters.
///
/// Names are metadata for editors; renderers never emit them as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct DisplayName(String);

impl DisplayName {
    /// Longest accepted name, in characters.
    pub const MAX_CHARS: usize = 400;

    /// Validates a display name.
    pub fn new(name: impl Into<String>) -> LayerResult<Self> {
        let name = name.into();
        let chars = name.chars().count();
        if chars > Self::MAX_CHARS {
            return Err(LayerError::validation(
                "name",
                format!("{chars} characters exceeds {}", Self::MAX_CHARS),
            ));
        }
        Ok(Self(name))
    }

    /// Returns the name.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = LayerError;

    fn try_from(name: String) -> LayerResult<Self> {
        Self::new(name)
    }
}

impl From<DisplayName> for String {
    fn from(name: DisplayName) -> Self {
        name.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vertical distribution of a modifier's direct children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum VerticalAlign {
    /// Children packed at the top.
    #[default]
    Top,
    /// Children centered.
    Middle,
    /// Children packed at the bottom.
    Bottom,
}

impl VerticalAlign {
    /// All alignments, in code order.
    pub const ALL: [Self; 3] = [Self::Top, Self::Middle, Self::Bottom];

    /// Returns the stored integer code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Top => 0,
            Self::Middle => 1,
            Self::Bottom => 2,
        }
    }

    /// Looks up an alignment by integer code.
    pub fn from_code(code: i64) -> LayerResult<Self> {
        Self::ALL
            .into_iter()
            .find(|a| i64::from(a.code()) == code)
            .ok_or_else(|| LayerError::invalid_enum("alignment", code))
    }

    /// Returns the lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

impl FromStr for VerticalAlign {
    type Err = LayerError;

    fn from_str(s: &str) -> LayerResult<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| LayerError::invalid_enum("alignment", s))
    }
}

/// Anchor point of an image inside its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnchorPoint {
    /// Top edge, centered.
    #[cfg_attr(feature = "serde", serde(rename = "center top"))]
    North,
    /// Top right corner.
    #[cfg_attr(feature = "serde", serde(rename = "right top"))]
    NorthEast,
    /// Right edge, centered.
    #[cfg_attr(feature = "serde", serde(rename = "right center"))]
    East,
    /// Bottom right corner.
    #[cfg_attr(feature = "serde", serde(rename = "right bottom"))]
    SouthEast,
    /// Bottom edge, centered.
    #[cfg_attr(feature = "serde", serde(rename = "center bottom"))]
    South,
    /// Bottom left corner.
    #[cfg_attr(feature = "serde", serde(rename = "left bottom"))]
    SouthWest,
    /// Left edge, centered.
    #[cfg_attr(feature = "serde", serde(rename = "left center"))]
    West,
    /// Top left corner.
    #[cfg_attr(feature = "serde", serde(rename = "left top"))]
    NorthWest,
    /// Center of the box.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "center center"))]
    Center,
}

impl AnchorPoint {
    /// All anchor points, clockwise from north, then center.
    pub const ALL: [Self; 9] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
        Self::Center,
    ];

    /// Returns the stored code, a CSS `object-position` pair.
    #[must_use]
    pub const fn css_value(self) -> &'static str {
        match self {
            Self::North => "center top",
            Self::NorthEast => "right top",
            Self::East => "right center",
            Self::SouthEast => "right bottom",
            Self::South => "center bottom",
            Self::SouthWest => "left bottom",
            Self::West => "left center",
            Self::NorthWest => "left top",
            Self::Center => "center center",
        }
    }

    /// Returns the compass label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::NorthEast => "North-east",
            Self::East => "East",
            Self::SouthEast => "South-east",
            Self::South => "South",
            Self::SouthWest => "South-west",
            Self::West => "West",
            Self::NorthWest => "North-west",
            Self::Center => "Middle",
        }
    }
}

impl FromStr for AnchorPoint {
    type Err = LayerError;

    fn from_str(s: &str) -> LayerResult<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.css_value() == s)
            .ok_or_else(|| LayerError::invalid_enum("anchor_point", s))
    }
}

/// How an image is resized to its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ObjectFit {
    /// Stretch to fill the box.
    Fill,
    /// Fit inside the box, keeping the aspect ratio.
    Contain,
    /// Fill the box, keeping the aspect ratio.
    #[default]
    Cover,
    /// Keep the intrinsic size.
    None,
    /// Like `None` or `Contain`, whichever is smaller.
    ScaleDown,
}

impl ObjectFit {
    /// All fit modes.
    pub const ALL: [Self; 5] = [
        Self::Fill,
        Self::Contain,
        Self::Cover,
        Self::None,
        Self::ScaleDown,
    ];

    /// Returns the stored code, a CSS `object-fit` keyword.
    #[must_use]
    pub const fn css_value(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Contain => "contain",
            Self::Cover => "cover",
            Self::None => "none",
            Self::ScaleDown => "scale-down",
        }
    }
}

impl FromStr for ObjectFit {
    type Err = LayerError;

    fn from_str(s: &str) -> LayerResult<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.css_value() == s)
            .ok_or_else(|| LayerError::invalid_enum("object_fit", s))
    }
}
