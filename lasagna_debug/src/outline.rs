// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indented text outline of a layer tree.

use std::fmt::Write;

use lasagna_core::error::LayerResult;
use lasagna_core::layer::{LayerId, LayerTree};

/// Returns an outline of the whole tree, one layer per line.
///
/// Each line holds the kind and, when non-empty, the layer's label:
///
/// ```text
/// container "hero"
///   opacityModifier "50%"
///     colorLayer "#ff0000"
/// ```
#[must_use]
pub fn outline(tree: &LayerTree) -> String {
    let mut out = String::new();
    // The root is always live.
    let _ = write_layer(tree, tree.root(), &mut out);
    out
}

/// Returns an outline of the subtree at `node`, attached or not.
pub fn outline_from(tree: &LayerTree, node: LayerId) -> LayerResult<String> {
    let mut out = String::new();
    write_layer(tree, node, &mut out)?;
    Ok(out)
}

fn write_layer(tree: &LayerTree, id: LayerId, out: &mut String) -> LayerResult<()> {
    write_line(tree, id, 0, out)?;
    let mut stack = vec![tree.children(id)?];
    while let Some(children) = stack.last_mut() {
        let Some(child) = children.next() else {
            stack.pop();
            continue;
        };
        write_line(tree, child, stack.len(), out)?;
        stack.push(tree.children(child)?);
    }
    Ok(())
}

fn write_line(tree: &LayerTree, id: LayerId, depth: usize, out: &mut String) -> LayerResult<()> {
    let layer = tree.get(id)?;
    let label = layer.label();
    let _ = write!(out, "{:indent$}{}", "", layer.kind(), indent = depth * 2);
    if !label.is_empty() {
        let _ = write!(out, " {label:?}");
    }
    out.push('\n');
    Ok(())
}
