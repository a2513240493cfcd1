// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render output: a nested tree of resolved nodes.

use lasagna_core::layer::{LayerId, LayerKind};

use crate::style::ResolvedStyle;

/// The result of rendering a lasagna.
///
/// Serializes as its root node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct OutputTree {
    /// The node rendered from the start layer.
    pub root: OutputNode,
}

impl OutputTree {
    /// Returns the total number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Iterates all nodes in depth-first pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &OutputNode> {
        self.root.iter()
    }
}

/// One rendered layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OutputNode {
    /// The layer this node was rendered from.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub layer: LayerId,
    /// Kind of that layer.
    pub kind: LayerKind,
    /// Display name, for named containers.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    /// Resolved style, with opacity already composed with ancestors.
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "ResolvedStyle::is_empty")
    )]
    pub style: ResolvedStyle,
    /// Rendered children, in paint order.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<OutputNode>,
}

impl OutputNode {
    /// Iterates this node and its descendants in depth-first pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        core::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Whether this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
