// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attachment rules: which kinds may nest under which.

use crate::error::{LayerError, LayerResult};

use super::kind::LayerKind;

/// Parents accepted by every wired-in kind.
const STACKING_PARENTS: &[LayerKind] = &[
    LayerKind::Container,
    LayerKind::OpacityModifier,
    LayerKind::VerticalAlignModifier,
];

impl LayerKind {
    /// Returns the kinds a layer of this kind may be attached under.
    ///
    /// [`ImageAnchorModifier`](Self::ImageAnchorModifier) is accepted nowhere.
    #[must_use]
    pub const fn permitted_parents(self) -> &'static [Self] {
        match self {
            Self::Container
            | Self::ColorLayer
            | Self::OpacityModifier
            | Self::VerticalAlignModifier => STACKING_PARENTS,
            Self::ImageAnchorModifier => &[],
        }
    }

    /// Whether layers of this kind never own children.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::ColorLayer)
    }

    /// Whether a layer of this kind may be attached under `parent`.
    #[must_use]
    pub fn may_nest_under(self, parent: Self) -> bool {
        self.permitted_parents().contains(&parent)
    }
}

/// Checks the kind pair of a prospective attachment.
///
/// A leaf parent is reported as [`LayerError::LeafViolation`] even when the
/// pair is also absent from the table.
pub fn check_nesting(child: LayerKind, parent: LayerKind) -> LayerResult<()> {
    if parent.is_leaf() {
        return Err(LayerError::LeafViolation { parent });
    }
    if !child.may_nest_under(parent) {
        return Err(LayerError::InvalidNesting { child, parent });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_layer_is_the_only_leaf() {
        for kind in LayerKind::ALL {
            assert_eq!(kind.is_leaf(), kind == LayerKind::ColorLayer, "{kind}");
        }
    }

    #[test]
    fn nothing_attaches_under_a_leaf() {
        for child in LayerKind::ALL {
            assert_eq!(
                check_nesting(child, LayerKind::ColorLayer),
                Err(LayerError::LeafViolation {
                    parent: LayerKind::ColorLayer
                }),
                "{child}"
            );
        }
    }

    #[test]
    fn stacking_kinds_nest_under_each_other() {
        let stacking = [
            LayerKind::Container,
            LayerKind::ColorLayer,
            LayerKind::OpacityModifier,
            LayerKind::VerticalAlignModifier,
        ];
        for child in stacking {
            for parent in STACKING_PARENTS {
                assert_eq!(check_nesting(child, *parent), Ok(()), "{child} under {parent}");
            }
        }
    }

    #[test]
    fn image_anchor_is_inert() {
        for parent in STACKING_PARENTS {
            assert_eq!(
                check_nesting(LayerKind::ImageAnchorModifier, *parent),
                Err(LayerError::InvalidNesting {
                    child: LayerKind::ImageAnchorModifier,
                    parent: *parent,
                })
            );
        }
        assert_eq!(
            check_nesting(LayerKind::ColorLayer, LayerKind::ImageAnchorModifier),
            Err(LayerError::InvalidNesting {
                child: LayerKind::ColorLayer,
                parent: LayerKind::ImageAnchorModifier,
            })
        );
    }
}
