// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of layer kinds and their attributes.

use core::fmt;
use std::collections::BTreeMap;

use crate::error::{LayerError, LayerResult};

use super::attr::{AnchorPoint, Color, DisplayName, ObjectFit, Opacity, VerticalAlign};

/// Discriminant of a [`Layer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum LayerKind {
    /// Groups layers; the root of every tree is one.
    Container,
    /// A solid color panel. Always a leaf.
    ColorLayer,
    /// Scales the opacity of its subtree.
    OpacityModifier,
    /// Distributes its children vertically.
    VerticalAlignModifier,
    /// Image anchor and fit. Defined but not wired into nesting or rendering.
    ImageAnchorModifier,
}

impl LayerKind {
    /// All kinds.
    pub const ALL: [Self; 5] = [
        Self::Container,
        Self::ColorLayer,
        Self::OpacityModifier,
        Self::VerticalAlignModifier,
        Self::ImageAnchorModifier,
    ];

    /// Returns the camel-case name used in rendered output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::ColorLayer => "colorLayer",
            Self::OpacityModifier => "opacityModifier",
            Self::VerticalAlignModifier => "verticalAlignModifier",
            Self::ImageAnchorModifier => "imageAnchorModifier",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw attribute value as exchanged with editors and stores.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum AttrValue {
    /// An integer (opacity percentage, alignment code).
    Int(i64),
    /// Text (name, color, enum codes).
    Text(String),
}

impl AttrValue {
    fn int(&self, attr: &str) -> LayerResult<i64> {
        match self {
            Self::Int(v) => Ok(*v),
            Self::Text(t) => Err(LayerError::validation(
                attr,
                format!("expected an integer, got {t:?}"),
            )),
        }
    }

    fn text(&self, attr: &str) -> LayerResult<&str> {
        match self {
            Self::Text(t) => Ok(t),
            Self::Int(v) => Err(LayerError::validation(
                attr,
                format!("expected text, got {v}"),
            )),
        }
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Attribute name to value, the shape a store loads and saves.
pub type RawAttrs = BTreeMap<String, AttrValue>;

/// A layer's kind together with its validated attributes.
///
/// With the `serde` feature, a layer is stored as its raw attributes next to
/// a `kind` tag, e.g. `{"kind": "opacityModifier", "opacity": 30}`. Loading
/// goes through [`Layer::from_attrs`], so stored data is validated and
/// defaulted exactly like editor input.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// See [`LayerKind::Container`].
    Container {
        /// Optional display name.
        name: Option<DisplayName>,
    },
    /// See [`LayerKind::ColorLayer`].
    ColorLayer {
        /// Fill color.
        color: Color,
    },
    /// See [`LayerKind::OpacityModifier`].
    OpacityModifier {
        /// Opacity applied to the subtree.
        opacity: Opacity,
    },
    /// See [`LayerKind::VerticalAlignModifier`].
    VerticalAlignModifier {
        /// Vertical distribution of the direct children.
        alignment: VerticalAlign,
    },
    /// See [`LayerKind::ImageAnchorModifier`].
    ImageAnchorModifier {
        /// Anchor of the image in its box.
        anchor_point: AnchorPoint,
        /// Resize mode.
        object_fit: ObjectFit,
    },
}

impl Layer {
    /// A container. An empty name is treated as no name.
    pub fn container(name: Option<&str>) -> LayerResult<Self> {
        let name = match name {
            Some(n) if !n.is_empty() => Some(DisplayName::new(n)?),
            _ => None,
        };
        Ok(Self::Container { name })
    }

    /// A color panel.
    pub fn color(color: &str) -> LayerResult<Self> {
        Ok(Self::ColorLayer {
            color: Color::parse(color)?,
        })
    }

    /// An opacity modifier from a percentage.
    pub fn opacity(percent: i64) -> LayerResult<Self> {
        Ok(Self::OpacityModifier {
            opacity: Opacity::new(percent)?,
        })
    }

    /// A vertical alignment modifier.
    #[must_use]
    pub const fn vertical_align(alignment: VerticalAlign) -> Self {
        Self::VerticalAlignModifier { alignment }
    }

    /// An image anchor modifier.
    #[must_use]
    pub const fn image_anchor(anchor_point: AnchorPoint, object_fit: ObjectFit) -> Self {
        Self::ImageAnchorModifier {
            anchor_point,
            object_fit,
        }
    }

    /// Returns the kind of this layer.
    #[must_use]
    pub const fn kind(&self) -> LayerKind {
        match self {
            Self::Container { .. } => LayerKind::Container,
            Self::ColorLayer { .. } => LayerKind::ColorLayer,
            Self::OpacityModifier { .. } => LayerKind::OpacityModifier,
            Self::VerticalAlignModifier { .. } => LayerKind::VerticalAlignModifier,
            Self::ImageAnchorModifier { .. } => LayerKind::ImageAnchorModifier,
        }
    }

    /// Returns a short human-readable label, as shown in editor outlines.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Container { name } => name
                .as_ref()
                .map(|n| n.as_str().to_owned())
                .unwrap_or_default(),
            Self::ColorLayer { color } => color.to_string(),
            Self::OpacityModifier { opacity } => opacity.to_string(),
            Self::VerticalAlignModifier { alignment } => alignment.name().to_owned(),
            Self::ImageAnchorModifier { anchor_point, .. } => anchor_point.label().to_owned(),
        }
    }

    /// Builds a layer of `kind` from raw attributes.
    ///
    /// Optional attributes take their defaults when absent. `color` and
    /// `opacity` are required for their kinds.
    pub fn from_attrs(kind: LayerKind, attrs: &RawAttrs) -> LayerResult<Self> {
        let required = |attr: &str| {
            attrs
                .get(attr)
                .ok_or_else(|| LayerError::validation(attr, "required attribute is missing"))
        };
        let base = match kind {
            LayerKind::Container => Self::Container { name: None },
            LayerKind::ColorLayer => Self::ColorLayer {
                color: Color::parse(required("color")?.text("color")?)?,
            },
            LayerKind::OpacityModifier => Self::OpacityModifier {
                opacity: Opacity::new(required("opacity")?.int("opacity")?)?,
            },
            LayerKind::VerticalAlignModifier => Self::vertical_align(VerticalAlign::default()),
            LayerKind::ImageAnchorModifier => {
                Self::image_anchor(AnchorPoint::default(), ObjectFit::default())
            }
        };
        base.with_attrs(attrs)
    }

    /// Returns a copy of this layer with `attrs` applied on top.
    ///
    /// Attributes not mentioned keep their current value.
    pub fn with_attrs(&self, attrs: &RawAttrs) -> LayerResult<Self> {
        let mut next = self.clone();
        for (attr, value) in attrs {
            next.set_attr(attr, value)?;
        }
        Ok(next)
    }

    /// Returns the raw attributes of this layer.
    ///
    /// `Layer::from_attrs(layer.kind(), &layer.to_attrs())` yields an equal
    /// layer.
    #[must_use]
    pub fn to_attrs(&self) -> RawAttrs {
        let mut attrs = RawAttrs::new();
        match self {
            Self::Container { name } => {
                if let Some(name) = name {
                    attrs.insert("name".into(), name.as_str().into());
                }
            }
            Self::ColorLayer { color } => {
                attrs.insert("color".into(), color.as_str().into());
            }
            Self::OpacityModifier { opacity } => {
                attrs.insert("opacity".into(), i64::from(opacity.percent()).into());
            }
            Self::VerticalAlignModifier { alignment } => {
                attrs.insert("alignment".into(), i64::from(alignment.code()).into());
            }
            Self::ImageAnchorModifier {
                anchor_point,
                object_fit,
            } => {
                attrs.insert("anchor_point".into(), anchor_point.css_value().into());
                attrs.insert("object_fit".into(), object_fit.css_value().into());
            }
        }
        attrs
    }

    fn set_attr(&mut self, attr: &str, value: &AttrValue) -> LayerResult<()> {
        let kind = self.kind();
        match (self, attr) {
            (Self::Container { name }, "name") => {
                let text = value.text(attr)?;
                *name = if text.is_empty() {
                    None
                } else {
                    Some(DisplayName::new(text)?)
                };
            }
            (Self::ColorLayer { color }, "color") => {
                *color = Color::parse(value.text(attr)?)?;
            }
            (Self::OpacityModifier { opacity }, "opacity") => {
                *opacity = Opacity::new(value.int(attr)?)?;
            }
            (Self::VerticalAlignModifier { alignment }, "alignment") => {
                *alignment = match value {
                    AttrValue::Int(code) => VerticalAlign::from_code(*code)?,
                    AttrValue::Text(name) => name.parse::<VerticalAlign>()?,
                };
            }
            (Self::ImageAnchorModifier { anchor_point, .. }, "anchor_point") => {
                *anchor_point = value.text(attr)?.parse::<AnchorPoint>()?;
            }
            (Self::ImageAnchorModifier { object_fit, .. }, "object_fit") => {
                *object_fit = value.text(attr)?.parse::<ObjectFit>()?;
            }
            _ => {
                return Err(LayerError::validation(
                    attr,
                    format!("unknown attribute for {kind}"),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Layer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let attrs = self.to_attrs();
        let mut map = serializer.serialize_map(Some(attrs.len() + 1))?;
        map.serialize_entry("kind", &self.kind())?;
        for (attr, value) in &attrs {
            map.serialize_entry(attr, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Layer {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Stored {
            kind: LayerKind,
            #[serde(flatten)]
            attrs: RawAttrs,
        }

        let stored = Stored::deserialize(deserializer)?;
        Self::from_attrs(stored.kind, &stored.attrs).map_err(serde::de::Error::custom)
    }
}
