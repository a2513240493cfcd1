// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HTML fragment writer for rendered output.
//!
//! Containers and opacity modifiers stack their children in a single grid
//! cell, so later children paint over earlier ones. Vertical-align modifiers
//! lay their children out as a flex column. Opacity is written on painted
//! color layers only, since CSS opacity on a wrapper would compound with the
//! already composed value.

use core::fmt::{self, Write};

use html_escape::encode_double_quoted_attribute;
use lasagna_core::layer::LayerKind;

use crate::output::{OutputNode, OutputTree};

/// Renders `tree` as a self-contained HTML fragment.
///
/// Fails when a node lacks the style its kind is drawn with, as in a
/// hand-built vertical-align node without an alignment.
pub fn to_markup(tree: &OutputTree) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_markup(tree, &mut out)?;
    Ok(out)
}

/// Writes `tree` as an HTML fragment into `out`.
pub fn write_markup<W: Write>(tree: &OutputTree, out: &mut W) -> fmt::Result {
    open_tag(&tree.root, false, out)?;
    let mut stack = vec![(&tree.root, tree.root.children.iter())];
    while let Some((node, children)) = stack.last_mut() {
        if let Some(child) = children.next() {
            open_tag(child, stacks_children(node.kind), out)?;
            stack.push((child, child.children.iter()));
        } else {
            out.write_str("</div>")?;
            stack.pop();
        }
    }
    Ok(())
}

/// Whether children of `kind` share a single grid cell.
fn stacks_children(kind: LayerKind) -> bool {
    matches!(kind, LayerKind::Container | LayerKind::OpacityModifier)
}

fn open_tag<W: Write>(node: &OutputNode, stacked: bool, out: &mut W) -> fmt::Result {
    let mut decls: Vec<String> = Vec::new();
    if stacked {
        decls.push("grid-area:1/1".into());
    }

    let class = match node.kind {
        LayerKind::Container => {
            decls.push("display:grid".into());
            "lasagna"
        }
        LayerKind::OpacityModifier => {
            decls.push("display:grid".into());
            "lasagna-opacity"
        }
        LayerKind::VerticalAlignModifier => {
            let align = node.style.align.ok_or(fmt::Error)?;
            decls.push("display:flex".into());
            decls.push("flex-direction:column".into());
            decls.push(format!("justify-content:{}", align.css_value()));
            "lasagna-valign"
        }
        LayerKind::ColorLayer => {
            let fill = node.style.fill.as_ref().ok_or(fmt::Error)?;
            decls.push(format!("background-color:{fill}"));
            if let Some(opacity) = node.style.opacity {
                decls.push(format!("opacity:{opacity}"));
            }
            "lasagna-color"
        }
        LayerKind::ImageAnchorModifier => "lasagna-anchor",
    };

    write!(out, "<div class=\"{class}\"")?;
    if let Some(name) = &node.name {
        write!(out, " data-name=\"{}\"", encode_double_quoted_attribute(name))?;
    }
    if !decls.is_empty() {
        let style = decls.join(";");
        write!(out, " style=\"{}\"", encode_double_quoted_attribute(&style))?;
    }
    out.write_char('>')
}
