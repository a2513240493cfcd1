// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{INVALID, LayerId};
use super::tree::LayerTree;

/// An iterator over the direct children of a layer, in paint order.
///
/// Created by [`LayerTree::children`].
#[derive(Debug)]
pub struct Children<'a> {
    tree: &'a LayerTree,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(tree: &'a LayerTree, first: u32) -> Self {
        Self {
            tree,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.tree.next_sibling[idx as usize];
        Some(self.tree.id_at(idx))
    }
}

/// An iterator walking parent links upward, nearest ancestor first.
///
/// Created by [`LayerTree::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    tree: &'a LayerTree,
    current: u32,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(tree: &'a LayerTree, first: u32) -> Self {
        Self {
            tree,
            current: first,
        }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.tree.parent[idx as usize];
        Some(self.tree.id_at(idx))
    }
}
