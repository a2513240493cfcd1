// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export.
//!
//! [`to_json`] serializes rendered output in the `{kind, style, children}`
//! shape consumed by front-end templates. [`tree_to_json`] dumps the stored
//! tree, with each layer's raw attributes, for inspection.

use std::io::{self, Write};

use serde_json::{Map, Value, json};

use lasagna_core::error::{LayerError, LayerResult};
use lasagna_core::layer::{Children, LayerId, LayerKind, LayerTree};
use lasagna_render::OutputTree;

/// Converts rendered output to a JSON value.
pub fn to_json(tree: &OutputTree) -> serde_json::Result<Value> {
    serde_json::to_value(tree)
}

/// Serializes rendered output as a pretty-printed JSON string.
pub fn to_json_string(tree: &OutputTree) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tree)
}

/// Writes rendered output as compact JSON to `writer`.
pub fn write_json(tree: &OutputTree, writer: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, tree)?;
    writer.flush()
}

/// Dumps the subtree at `node` as nested `{id, kind, attrs, children}`
/// objects.
pub fn tree_to_json(tree: &LayerTree, node: LayerId) -> LayerResult<Value> {
    let mut stack = vec![Dump::enter(tree, node)?];
    while let Some(top) = stack.last_mut() {
        if let Some(child) = top.pending.next() {
            let next = Dump::enter(tree, child)?;
            stack.push(next);
            continue;
        }
        let Some(done) = stack.pop() else { break };
        let value = done.finish();
        match stack.last_mut() {
            Some(parent) => parent.children.push(value),
            None => return Ok(value),
        }
    }
    Err(LayerError::NotFound(node))
}

/// A layer whose children are still being dumped.
struct Dump<'t> {
    id: LayerId,
    kind: LayerKind,
    attrs: Map<String, Value>,
    pending: Children<'t>,
    children: Vec<Value>,
}

impl<'t> Dump<'t> {
    fn enter(tree: &'t LayerTree, id: LayerId) -> LayerResult<Self> {
        let layer = tree.get(id)?;
        let attrs = layer
            .to_attrs()
            .into_iter()
            .map(|(name, value)| (name, json!(value)))
            .collect();
        Ok(Self {
            id,
            kind: layer.kind(),
            attrs,
            pending: tree.children(id)?,
            children: Vec::new(),
        })
    }

    fn finish(self) -> Value {
        json!({
            "id": self.id.to_string(),
            "kind": self.kind.as_str(),
            "attrs": self.attrs,
            "children": self.children,
        })
    }
}
