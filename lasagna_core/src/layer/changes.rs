// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change draining.
//!
//! A host that persists a tree or caches rendered fragments calls
//! [`LayerTree::take_changes`] after a batch of edits. It drains every dirty
//! channel:
//!
//! 1. **ATTRIBUTES**: layers whose stored attributes were replaced.
//! 2. **OPACITY**: layers whose effective opacity may differ, including all
//!    descendants of an edited or moved opacity modifier.
//! 3. **TOPOLOGY**: layers whose child list changed.
//!
//! Unlike the raw dirty keys, [`TreeChanges`] carries [`LayerId`]s so that
//! entries can be used directly as store keys. Layers destroyed before the
//! drain are filtered out of every channel and reported in
//! [`removed`](TreeChanges::removed) instead.

use crate::dirty;
use crate::trace::Tracer;

use super::id::LayerId;
use super::tree::LayerTree;

/// The set of changes accumulated since the previous
/// [`LayerTree::take_changes`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeChanges {
    /// Layers created since the last drain and still alive.
    pub added: Vec<LayerId>,
    /// Layers destroyed since the last drain that existed before it.
    pub removed: Vec<LayerId>,
    /// Layers whose attributes were updated.
    pub attributes: Vec<LayerId>,
    /// Layers whose effective opacity must be recomputed.
    pub opacities: Vec<LayerId>,
    /// Layers whose child list changed.
    pub restructured: Vec<LayerId>,
    /// Whether any attach, detach, or move happened.
    pub topology_changed: bool,
}

impl TreeChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
        self.attributes.clear();
        self.opacities.clear();
        self.restructured.clear();
        self.topology_changed = false;
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.attributes.is_empty()
            && self.opacities.is_empty()
            && self.restructured.is_empty()
            && !self.topology_changed
    }
}

impl LayerTree {
    /// Drains all dirty channels and returns the accumulated changes.
    pub fn take_changes(&mut self) -> TreeChanges {
        let mut changes = TreeChanges::default();
        self.take_changes_into(&mut changes);
        changes
    }

    /// Like [`take_changes`](Self::take_changes), but reuses a
    /// caller-provided buffer to avoid allocation.
    pub fn take_changes_into(&mut self, changes: &mut TreeChanges) {
        changes.clear();

        let attributes: Vec<u32> = self
            .dirty
            .drain(dirty::ATTRIBUTES)
            .deterministic()
            .run()
            .collect();
        changes
            .attributes
            .extend(attributes.into_iter().filter_map(|idx| self.live_id(idx)));

        let opacities: Vec<u32> = self
            .dirty
            .drain(dirty::OPACITY)
            .affected()
            .deterministic()
            .run()
            .collect();
        changes
            .opacities
            .extend(opacities.into_iter().filter_map(|idx| self.live_id(idx)));

        let restructured: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();
        changes
            .restructured
            .extend(restructured.into_iter().filter_map(|idx| self.live_id(idx)));

        changes.topology_changed = self.topology_dirty;
        self.topology_dirty = false;

        // Move lifecycle lists.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }

    /// Like [`take_changes`](Self::take_changes), reporting the drained set
    /// to `tracer`.
    pub fn take_changes_traced(&mut self, tracer: &mut Tracer<'_>) -> TreeChanges {
        let changes = self.take_changes();
        tracer.tree_changes(&changes);
        changes
    }

    fn live_id(&self, idx: u32) -> Option<LayerId> {
        let id = self.id_at(idx);
        self.is_alive(id).then_some(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::layer::{Layer, VerticalAlign};

    use super::*;

    #[test]
    fn first_drain_reports_the_root() {
        let mut tree = LayerTree::new();
        let changes = tree.take_changes();
        assert_eq!(changes.added, vec![tree.root()]);
        assert!(changes.topology_changed);

        let changes = tree.take_changes();
        assert!(changes.is_empty(), "second drain should be empty: {changes:?}");
    }

    #[test]
    fn attach_reports_parent_and_opacity_subtree() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let _ = tree.take_changes();

        let group = tree.create(Layer::opacity(50).unwrap());
        let leaf = tree.create(Layer::color("#fff").unwrap());
        tree.append(group, leaf).unwrap();
        let _ = tree.take_changes();

        tree.append(root, group).unwrap();
        let changes = tree.take_changes();
        assert!(changes.topology_changed);
        assert!(changes.restructured.contains(&root));
        assert!(changes.opacities.contains(&group));
        assert!(changes.opacities.contains(&leaf), "descendants are inherited");
        assert!(changes.added.is_empty());
    }

    #[test]
    fn opacity_edit_propagates_but_other_edits_stay_local() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let group = tree.insert(root, Layer::opacity(50).unwrap(), 0).unwrap();
        let align = tree
            .insert(group, Layer::vertical_align(VerticalAlign::Top), 0)
            .unwrap();
        let leaf = tree.insert(align, Layer::color("#000").unwrap(), 0).unwrap();
        let _ = tree.take_changes();

        tree.update(group, Layer::opacity(25).unwrap()).unwrap();
        let changes = tree.take_changes();
        assert_eq!(changes.attributes, vec![group]);
        for id in [group, align, leaf] {
            assert!(changes.opacities.contains(&id), "{id:?} should be marked");
        }
        assert!(!changes.topology_changed);

        tree.update(align, Layer::vertical_align(VerticalAlign::Bottom))
            .unwrap();
        let changes = tree.take_changes();
        assert_eq!(changes.attributes, vec![align]);
        assert!(changes.opacities.is_empty());
    }

    #[test]
    fn detach_reports_removed_layers_only_once() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let group = tree.insert(root, Layer::opacity(50).unwrap(), 0).unwrap();
        let leaf = tree.insert(group, Layer::color("#000").unwrap(), 0).unwrap();
        let _ = tree.take_changes();

        tree.update(leaf, Layer::color("#111").unwrap()).unwrap();
        tree.detach(group).unwrap();
        let changes = tree.take_changes();
        assert_eq!(changes.removed, vec![group, leaf]);
        assert!(changes.attributes.is_empty(), "dead layers are filtered");
        assert!(changes.restructured.contains(&root));
    }

    #[test]
    fn short_lived_layers_are_not_reported() {
        let mut tree = LayerTree::new();
        let _ = tree.take_changes();

        let temp = tree.create(Layer::color("#000").unwrap());
        tree.detach(temp).unwrap();
        let changes = tree.take_changes();
        assert!(changes.added.is_empty());
        assert!(changes.removed.is_empty());
    }

    #[test]
    fn traced_drain_matches_plain_drain() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let _ = tree.take_changes();
        let leaf = tree.insert(root, Layer::color("#000").unwrap(), 0).unwrap();

        let mut tracer = Tracer::none();
        let changes = tree.take_changes_traced(&mut tracer);
        assert_eq!(changes.added, vec![leaf]);
        assert_eq!(changes.restructured, vec![root]);
    }

    #[test]
    fn take_changes_into_reuses_buffer() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let mut changes = TreeChanges::default();
        tree.take_changes_into(&mut changes);
        assert_eq!(changes.added.len(), 1);

        let leaf = tree.insert(root, Layer::color("#000").unwrap(), 0).unwrap();
        tree.take_changes_into(&mut changes);
        assert_eq!(changes.added, vec![leaf], "buffer is cleared, not accumulated");
    }
}
