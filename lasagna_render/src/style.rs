// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style resolution: raw layer attributes to rendering primitives.

use core::fmt;

use lasagna_core::layer::{Color, Layer, VerticalAlign};

use crate::error::{RenderError, RenderResult};

/// Alignment of content along the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum AlignKeyword {
    /// Pack content at the top.
    Start,
    /// Center content.
    Center,
    /// Pack content at the bottom.
    End,
}

impl AlignKeyword {
    /// Returns the keyword as used in rendered output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }

    /// Returns the CSS flexbox value for `justify-content`.
    #[must_use]
    pub const fn css_value(self) -> &'static str {
        match self {
            Self::Start => "flex-start",
            Self::Center => "center",
            Self::End => "flex-end",
        }
    }
}

impl From<VerticalAlign> for AlignKeyword {
    fn from(alignment: VerticalAlign) -> Self {
        match alignment {
            VerticalAlign::Top => Self::Start,
            VerticalAlign::Middle => Self::Center,
            VerticalAlign::Bottom => Self::End,
        }
    }
}

impl fmt::Display for AlignKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete rendering primitives for one output node.
///
/// Every field is optional; an all-`None` style is empty and is omitted from
/// serialized output.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResolvedStyle {
    /// Opacity factor in `[0.0, 1.0]`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub opacity: Option<f64>,
    /// Fill color, verbatim as validated.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub fill: Option<Color>,
    /// Vertical alignment of the node's children.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub align: Option<AlignKeyword>,
}

impl ResolvedStyle {
    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.opacity.is_none() && self.fill.is_none() && self.align.is_none()
    }
}

/// Resolves the local style of a single layer.
///
/// Containers resolve to an empty style; their name is metadata. Image anchor
/// modifiers have no rendering and yield [`RenderError::Unrenderable`] with no
/// layer id attached.
pub fn resolve(layer: &Layer) -> RenderResult<ResolvedStyle> {
    let style = match layer {
        Layer::Container { .. } => ResolvedStyle::default(),
        Layer::ColorLayer { color } => ResolvedStyle {
            fill: Some(color.clone()),
            ..ResolvedStyle::default()
        },
        Layer::OpacityModifier { opacity } => ResolvedStyle {
            opacity: Some(opacity.factor()),
            ..ResolvedStyle::default()
        },
        Layer::VerticalAlignModifier { alignment } => ResolvedStyle {
            align: Some((*alignment).into()),
            ..ResolvedStyle::default()
        },
        Layer::ImageAnchorModifier { .. } => {
            return Err(RenderError::Unrenderable {
                layer: None,
                kind: layer.kind(),
            });
        }
    };
    Ok(style)
}

#[cfg(test)]
mod tests {
    use lasagna_core::layer::{AnchorPoint, LayerKind, ObjectFit};

    use super::*;

    #[test]
    fn container_style_is_empty() {
        let style = resolve(&Layer::container(Some("hero")).unwrap()).unwrap();
        assert!(style.is_empty(), "name must not leak into style");
    }

    #[test]
    fn color_is_passed_through_verbatim() {
        let style = resolve(&Layer::color("#FF0000").unwrap()).unwrap();
        assert_eq!(style.fill.as_ref().map(Color::as_str), Some("#FF0000"));
        assert_eq!(style.opacity, None);
    }

    #[test]
    fn opacity_is_a_factor() {
        for (percent, factor) in [(0, 0.0), (30, 0.3), (50, 0.5), (100, 1.0)] {
            let style = resolve(&Layer::opacity(percent).unwrap()).unwrap();
            assert_eq!(style.opacity, Some(factor), "{percent}%");
        }
    }

    #[test]
    fn alignment_maps_to_keywords() {
        let cases = [
            (VerticalAlign::Top, AlignKeyword::Start, "flex-start"),
            (VerticalAlign::Middle, AlignKeyword::Center, "center"),
            (VerticalAlign::Bottom, AlignKeyword::End, "flex-end"),
        ];
        for (alignment, keyword, css) in cases {
            let style = resolve(&Layer::vertical_align(alignment)).unwrap();
            assert_eq!(style.align, Some(keyword));
            assert_eq!(keyword.css_value(), css);
        }
    }

    #[test]
    fn image_anchor_is_unrenderable() {
        let layer = Layer::image_anchor(AnchorPoint::Center, ObjectFit::Cover);
        assert_eq!(
            resolve(&layer),
            Err(RenderError::Unrenderable {
                layer: None,
                kind: LayerKind::ImageAnchorModifier,
            })
        );
    }
}
