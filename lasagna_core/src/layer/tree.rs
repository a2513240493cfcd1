// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layer tree with allocation, validated topology, and
//! attribute management.

use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use crate::dirty;
use crate::error::{LayerError, LayerResult};

use super::id::{INVALID, LayerId};
use super::kind::{Layer, LayerKind, RawAttrs};
use super::rules;
use super::traverse::{Ancestors, Children};

/// A lasagna: one root container and the layers nested under it.
///
/// Layers are addressed by [`LayerId`] handles. Internally, each layer
/// occupies a slot in parallel arrays. Destroyed layers are recycled via a
/// free list, and generation counters make stale handles fail with
/// [`LayerError::NotFound`].
///
/// Every mutation is validated before anything is touched, so a call that
/// returns an error leaves the tree exactly as it was.
///
/// Layers created with [`create`](Self::create) start unattached. They can be
/// assembled into subtrees and are only rendered once attached beneath the
/// root.
#[derive(Debug)]
pub struct LayerTree {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Attributes --
    pub(crate) layer: Vec<Layer>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) alive: Vec<bool>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,
    pub(crate) root: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
    pub(crate) topology_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<LayerId>,
    pub(crate) pending_removed: Vec<LayerId>,
}

impl Default for LayerTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerTree {
    /// Creates a tree holding only an unnamed root container.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(Layer::Container { name: None })
    }

    /// Creates a tree whose root container carries `name`.
    pub fn named(name: &str) -> LayerResult<Self> {
        Ok(Self::with_root(Layer::container(Some(name))?))
    }

    fn with_root(root: Layer) -> Self {
        let mut tree = Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            layer: Vec::new(),
            generation: Vec::new(),
            alive: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            root: INVALID,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            topology_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        };
        tree.root = tree.create(root).idx;
        tree
    }

    // -- Allocation API --

    /// Creates an unattached layer and returns its handle.
    pub fn create(&mut self, layer: Layer) -> LayerId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.parent[idx as usize] = INVALID;
            self.first_child[idx as usize] = INVALID;
            self.next_sibling[idx as usize] = INVALID;
            self.prev_sibling[idx as usize] = INVALID;
            self.layer[idx as usize] = layer;
            self.alive[idx as usize] = true;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.layer.push(layer);
            self.generation.push(0);
            self.alive.push(true);
            idx
        };

        let id = self.id_at(idx);
        self.pending_added.push(id);
        id
    }

    /// Creates an unattached layer of `kind` from raw attributes.
    pub fn create_from_attrs(&mut self, kind: LayerKind, attrs: &RawAttrs) -> LayerResult<LayerId> {
        Ok(self.create(Layer::from_attrs(kind, attrs)?))
    }

    /// Creates a layer and attaches it under `parent` at `index`.
    ///
    /// Nothing is created when the placement is rejected.
    pub fn insert(&mut self, parent: LayerId, layer: Layer, index: usize) -> LayerResult<LayerId> {
        let p = self.check(parent)?;
        rules::check_nesting(layer.kind(), self.layer[p as usize].kind())?;
        self.check_index(p, index, 0)?;

        let id = self.create(layer);
        self.link(id.idx, p, index);
        Ok(id)
    }

    /// Returns whether the given handle refers to a live layer.
    #[must_use]
    pub fn is_alive(&self, id: LayerId) -> bool {
        (id.idx < self.len)
            && self.alive[id.idx as usize]
            && self.generation[id.idx as usize] == id.generation
    }

    /// Returns the number of live layers, attached or not, including the root.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Topology API --

    /// Attaches the unattached layer `child` under `parent` at `index`.
    ///
    /// `index` may equal the current number of children to append.
    ///
    /// # Errors
    ///
    /// Checked in this order: [`NotFound`], [`RootNode`] (`child` is the
    /// root), [`LeafViolation`], [`Cycle`] (`child` is `parent` or one of its
    /// ancestors), [`InvalidNesting`], [`AlreadyAttached`],
    /// [`IndexOutOfBounds`].
    ///
    /// [`NotFound`]: LayerError::NotFound
    /// [`RootNode`]: LayerError::RootNode
    /// [`LeafViolation`]: LayerError::LeafViolation
    /// [`Cycle`]: LayerError::Cycle
    /// [`InvalidNesting`]: LayerError::InvalidNesting
    /// [`AlreadyAttached`]: LayerError::AlreadyAttached
    /// [`IndexOutOfBounds`]: LayerError::IndexOutOfBounds
    pub fn attach(&mut self, parent: LayerId, child: LayerId, index: usize) -> LayerResult<()> {
        let p = self.check(parent)?;
        let c = self.check(child)?;
        self.check_placement(c, p)?;
        if self.parent[c as usize] != INVALID {
            return Err(LayerError::AlreadyAttached(child));
        }
        self.check_index(p, index, 0)?;

        self.link(c, p, index);
        Ok(())
    }

    /// Attaches `child` as the last child of `parent`.
    pub fn append(&mut self, parent: LayerId, child: LayerId) -> LayerResult<()> {
        let p = self.check(parent)?;
        let index = self.count_children(p);
        self.attach(parent, child, index)
    }

    /// Detaches `node` and destroys it together with its whole subtree.
    ///
    /// Returns the destroyed handles in depth-first pre-order. They are stale
    /// from now on, even if their slots are reused.
    pub fn detach(&mut self, node: LayerId) -> LayerResult<Vec<LayerId>> {
        let n = self.check(node)?;
        if n == self.root {
            return Err(LayerError::RootNode(node));
        }

        self.unlink(n);

        let mut doomed = Vec::new();
        self.collect_subtree(n, &mut doomed);
        let mut destroyed = Vec::with_capacity(doomed.len());
        for idx in doomed {
            destroyed.push(self.id_at(idx));
            self.destroy_slot(idx);
        }
        self.topology_dirty = true;
        Ok(destroyed)
    }

    /// Moves `node` under `new_parent` at `index`.
    ///
    /// `index` is the position among `new_parent`'s children once `node` has
    /// been taken out of its current place, so moving within the same parent
    /// accepts `0..child_count`. Validation covers the same errors as
    /// [`attach`](Self::attach), minus `AlreadyAttached`; on failure nothing
    /// moves.
    pub fn move_to(&mut self, node: LayerId, new_parent: LayerId, index: usize) -> LayerResult<()> {
        let p = self.check(new_parent)?;
        let n = self.check(node)?;
        self.check_placement(n, p)?;
        let leaving = usize::from(self.parent[n as usize] == p);
        self.check_index(p, index, leaving)?;

        self.unlink(n);
        self.link(n, p, index);
        Ok(())
    }

    /// Returns the root container.
    #[must_use]
    pub fn root(&self) -> LayerId {
        self.id_at(self.root)
    }

    /// Returns the parent of a layer, if any.
    pub fn parent(&self, id: LayerId) -> LayerResult<Option<LayerId>> {
        let idx = self.check(id)?;
        let p = self.parent[idx as usize];
        Ok((p != INVALID).then(|| self.id_at(p)))
    }

    /// Returns an iterator over the direct children of a layer, in paint
    /// order.
    pub fn children(&self, id: LayerId) -> LayerResult<Children<'_>> {
        let idx = self.check(id)?;
        Ok(Children::new(self, self.first_child[idx as usize]))
    }

    /// Returns the number of direct children of a layer.
    pub fn child_count(&self, id: LayerId) -> LayerResult<usize> {
        let idx = self.check(id)?;
        Ok(self.count_children(idx))
    }

    /// Returns the position of a layer among its siblings.
    pub fn index_in_parent(&self, id: LayerId) -> LayerResult<Option<usize>> {
        let idx = self.check(id)?;
        if self.parent[idx as usize] == INVALID {
            return Ok(None);
        }
        let mut position = 0;
        let mut prev = self.prev_sibling[idx as usize];
        while prev != INVALID {
            position += 1;
            prev = self.prev_sibling[prev as usize];
        }
        Ok(Some(position))
    }

    /// Returns an iterator from the parent of `id` up to the top of its
    /// subtree.
    pub fn ancestors(&self, id: LayerId) -> LayerResult<Ancestors<'_>> {
        let idx = self.check(id)?;
        Ok(Ancestors::new(self, self.parent[idx as usize]))
    }

    /// Returns whether `id` is live and reachable from the root.
    #[must_use]
    pub fn is_attached(&self, id: LayerId) -> bool {
        let Ok(idx) = self.check(id) else {
            return false;
        };
        let mut current = idx;
        while current != INVALID {
            if current == self.root {
                return true;
            }
            current = self.parent[current as usize];
        }
        false
    }

    /// Returns `id` and all its descendants in depth-first pre-order.
    pub fn descendants(&self, id: LayerId) -> LayerResult<Vec<LayerId>> {
        let idx = self.check(id)?;
        let mut order = Vec::new();
        self.collect_subtree(idx, &mut order);
        Ok(order.into_iter().map(|i| self.id_at(i)).collect())
    }

    // -- Attribute API --

    /// Returns the layer stored at `id`.
    pub fn get(&self, id: LayerId) -> LayerResult<&Layer> {
        let idx = self.check(id)?;
        Ok(&self.layer[idx as usize])
    }

    /// Returns the kind of the layer at `id`.
    pub fn kind(&self, id: LayerId) -> LayerResult<LayerKind> {
        self.get(id).map(Layer::kind)
    }

    /// Replaces the attributes of a layer. The kind must not change.
    ///
    /// Marks the ATTRIBUTES channel, and for opacity modifiers the OPACITY
    /// channel with eager propagation to descendants.
    pub fn update(&mut self, id: LayerId, layer: Layer) -> LayerResult<()> {
        let idx = self.check(id)?;
        let existing = self.layer[idx as usize].kind();
        if existing != layer.kind() {
            return Err(LayerError::KindMismatch {
                existing,
                replacement: layer.kind(),
            });
        }

        self.layer[idx as usize] = layer;
        self.dirty.mark(idx, dirty::ATTRIBUTES);
        if existing == LayerKind::OpacityModifier {
            self.dirty.mark_with(idx, dirty::OPACITY, &EagerPolicy);
        }
        Ok(())
    }

    /// Applies raw attributes on top of the current ones.
    pub fn update_attributes(&mut self, id: LayerId, attrs: &RawAttrs) -> LayerResult<()> {
        let next = self.get(id)?.with_attrs(attrs)?;
        self.update(id, next)
    }

    // -- Internal helpers --

    pub(crate) fn id_at(&self, idx: u32) -> LayerId {
        LayerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Returns the slot of a live handle.
    fn check(&self, id: LayerId) -> LayerResult<u32> {
        if self.is_alive(id) {
            Ok(id.idx)
        } else {
            Err(LayerError::NotFound(id))
        }
    }

    /// Validates placing slot `c` under slot `p`, ignoring where `c` is now.
    fn check_placement(&self, c: u32, p: u32) -> LayerResult<()> {
        if c == self.root {
            return Err(LayerError::RootNode(self.id_at(c)));
        }
        let parent_kind = self.layer[p as usize].kind();
        if parent_kind.is_leaf() {
            return Err(LayerError::LeafViolation {
                parent: parent_kind,
            });
        }
        let mut current = p;
        while current != INVALID {
            if current == c {
                return Err(LayerError::Cycle {
                    child: self.id_at(c),
                    parent: self.id_at(p),
                });
            }
            current = self.parent[current as usize];
        }
        rules::check_nesting(self.layer[c as usize].kind(), parent_kind)
    }

    /// Validates an insertion index under `p`, discounting `leaving` children
    /// that are about to be unlinked from it.
    fn check_index(&self, p: u32, index: usize, leaving: usize) -> LayerResult<()> {
        let len = self.count_children(p) - leaving;
        if index > len {
            return Err(LayerError::IndexOutOfBounds { index, len });
        }
        Ok(())
    }

    fn count_children(&self, p: u32) -> usize {
        Children::new(self, self.first_child[p as usize]).count()
    }

    /// Links the unattached slot `c` under `p` at `index`.
    ///
    /// Marks `c`'s subtree on the inherited channel, since its effective
    /// opacity now comes from a new ancestry.
    fn link(&mut self, c: u32, p: u32, index: usize) {
        let mut before = self.first_child[p as usize];
        let mut after = INVALID;
        for _ in 0..index {
            after = before;
            before = self.next_sibling[before as usize];
        }

        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = after;
        self.next_sibling[c as usize] = before;
        if after == INVALID {
            self.first_child[p as usize] = c;
        } else {
            self.next_sibling[after as usize] = c;
        }
        if before != INVALID {
            self.prev_sibling[before as usize] = c;
        }

        // Child depends on parent for OPACITY.
        let _ = self.dirty.add_dependency(c, p, dirty::OPACITY);
        self.dirty.mark_with(c, dirty::OPACITY, &EagerPolicy);
        self.dirty.mark(p, dirty::TOPOLOGY);
        self.topology_dirty = true;
    }

    /// Removes `idx` from its parent's child list, if it has one.
    fn unlink(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        if p == INVALID {
            return;
        }
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;

        self.dirty.remove_dependency(idx, p, dirty::OPACITY);
        self.dirty.mark(p, dirty::TOPOLOGY);
        self.topology_dirty = true;
    }

    /// Depth-first pre-order collection starting from `idx`.
    fn collect_subtree(&self, idx: u32, out: &mut Vec<u32>) {
        let mut stack = vec![idx];
        while let Some(idx) = stack.pop() {
            out.push(idx);
            // Push children so the first child is popped first.
            let mark = stack.len();
            let mut child = self.first_child[idx as usize];
            while child != INVALID {
                stack.push(child);
                child = self.next_sibling[child as usize];
            }
            stack[mark..].reverse();
        }
    }

    /// Frees a slot whose subtree is being destroyed as a whole.
    fn destroy_slot(&mut self, idx: u32) {
        let id = self.id_at(idx);
        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.parent[idx as usize] = INVALID;
        self.first_child[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.alive[idx as usize] = false;
        self.free_list.push(idx);

        // A layer that never made it into a drain is simply forgotten.
        if let Some(pos) = self.pending_added.iter().position(|&a| a == id) {
            self.pending_added.swap_remove(pos);
        } else {
            self.pending_removed.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{AttrValue, VerticalAlign};

    fn color(tree: &mut LayerTree, text: &str) -> LayerId {
        tree.create(Layer::color(text).unwrap())
    }

    fn opacity(tree: &mut LayerTree, percent: i64) -> LayerId {
        tree.create(Layer::opacity(percent).unwrap())
    }

    fn container(tree: &mut LayerTree) -> LayerId {
        tree.create(Layer::container(None).unwrap())
    }

    /// Snapshot of structure: (id, parent, children) for every live layer.
    fn shape(tree: &LayerTree) -> Vec<(LayerId, Option<LayerId>, Vec<LayerId>)> {
        let mut ids: Vec<_> = (0..tree.len)
            .map(|idx| tree.id_at(idx))
            .filter(|id| tree.is_alive(*id))
            .collect();
        ids.sort();
        ids.into_iter()
            .map(|id| {
                (
                    id,
                    tree.parent(id).unwrap(),
                    tree.children(id).unwrap().collect(),
                )
            })
            .collect()
    }

    #[test]
    fn new_tree_has_a_container_root() {
        let tree = LayerTree::new();
        let root = tree.root();
        assert_eq!(tree.kind(root), Ok(LayerKind::Container));
        assert_eq!(tree.parent(root), Ok(None));
        assert_eq!(tree.layer_count(), 1);
        assert!(tree.is_attached(root));

        let named = LayerTree::named("hero").unwrap();
        assert_eq!(named.get(named.root()).unwrap().label(), "hero");
    }

    #[test]
    fn attach_respects_index_order() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let a = color(&mut tree, "#000");
        let b = color(&mut tree, "#111");
        let c = color(&mut tree, "#222");
        let d = color(&mut tree, "#333");

        tree.attach(root, a, 0).unwrap();
        tree.attach(root, c, 1).unwrap();
        tree.attach(root, b, 1).unwrap();
        tree.attach(root, d, 0).unwrap();

        let kids: Vec<_> = tree.children(root).unwrap().collect();
        assert_eq!(kids, vec![d, a, b, c]);
        assert_eq!(tree.index_in_parent(b), Ok(Some(2)));
        assert_eq!(tree.index_in_parent(root), Ok(None));
        assert_eq!(tree.parent(b), Ok(Some(root)));
    }

    #[test]
    fn attach_rejects_index_past_the_end() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let a = color(&mut tree, "#000");
        assert_eq!(
            tree.attach(root, a, 1),
            Err(LayerError::IndexOutOfBounds { index: 1, len: 0 })
        );
        assert_eq!(tree.parent(a), Ok(None));
    }

    #[test]
    fn attach_under_color_layer_is_a_leaf_violation() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let panel = color(&mut tree, "#ff0000");
        tree.append(root, panel).unwrap();

        for child in [
            container(&mut tree),
            color(&mut tree, "#00ff00"),
            opacity(&mut tree, 10),
            tree.create(Layer::vertical_align(VerticalAlign::Middle)),
        ] {
            assert_eq!(
                tree.attach(panel, child, 0),
                Err(LayerError::LeafViolation {
                    parent: LayerKind::ColorLayer
                })
            );
        }
        assert_eq!(tree.child_count(panel), Ok(0));
    }

    #[test]
    fn attach_rejects_cycles() {
        let mut tree = LayerTree::new();
        let outer = opacity(&mut tree, 50);
        let inner = opacity(&mut tree, 50);
        tree.append(outer, inner).unwrap();

        assert_eq!(
            tree.attach(inner, outer, 0),
            Err(LayerError::Cycle {
                child: outer,
                parent: inner
            })
        );
        assert_eq!(
            tree.attach(outer, outer, 0),
            Err(LayerError::Cycle {
                child: outer,
                parent: outer
            })
        );
        assert_eq!(tree.parent(outer), Ok(None));
    }

    #[test]
    fn attach_rejects_invalid_nesting_and_reattachment() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let anchor = tree.create(Layer::image_anchor(
            crate::layer::AnchorPoint::Center,
            crate::layer::ObjectFit::Cover,
        ));
        assert_eq!(
            tree.append(root, anchor),
            Err(LayerError::InvalidNesting {
                child: LayerKind::ImageAnchorModifier,
                parent: LayerKind::Container,
            })
        );

        let a = container(&mut tree);
        let b = container(&mut tree);
        tree.append(root, a).unwrap();
        tree.append(root, b).unwrap();
        assert_eq!(tree.append(b, a), Err(LayerError::AlreadyAttached(a)));
    }

    #[test]
    fn root_cannot_be_attached_moved_or_detached() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let c = container(&mut tree);
        assert_eq!(tree.attach(c, root, 0), Err(LayerError::RootNode(root)));
        assert_eq!(tree.move_to(root, c, 0), Err(LayerError::RootNode(root)));
        assert_eq!(tree.detach(root), Err(LayerError::RootNode(root)));
    }

    #[test]
    fn insert_creates_nothing_on_failure() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let panel = tree.insert(root, Layer::color("#fff").unwrap(), 0).unwrap();
        let before = tree.layer_count();

        assert_eq!(
            tree.insert(panel, Layer::opacity(10).unwrap(), 0),
            Err(LayerError::LeafViolation {
                parent: LayerKind::ColorLayer
            })
        );
        assert_eq!(
            tree.insert(root, Layer::opacity(10).unwrap(), 5),
            Err(LayerError::IndexOutOfBounds { index: 5, len: 1 })
        );
        assert_eq!(tree.layer_count(), before);
    }

    #[test]
    fn detach_destroys_the_whole_subtree() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let keep = tree.insert(root, Layer::color("#000").unwrap(), 0).unwrap();
        let group = tree.insert(root, Layer::opacity(50).unwrap(), 1).unwrap();
        let inner = tree.insert(group, Layer::container(None).unwrap(), 0).unwrap();
        let leaf = tree.insert(inner, Layer::color("#fff").unwrap(), 0).unwrap();
        let sibling = tree.insert(group, Layer::color("#eee").unwrap(), 1).unwrap();

        let destroyed = tree.detach(group).unwrap();
        assert_eq!(destroyed, vec![group, inner, leaf, sibling]);
        for id in &destroyed {
            assert!(!tree.is_alive(*id), "{id:?} should be dead");
            assert_eq!(tree.get(*id), Err(LayerError::NotFound(*id)));
        }
        assert_eq!(tree.children(root).unwrap().collect::<Vec<_>>(), vec![keep]);
        assert_eq!(tree.layer_count(), 2);
        assert_eq!(tree.descendants(root), Ok(vec![root, keep]));
    }

    #[test]
    fn slot_reuse_keeps_old_handles_stale() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let old = tree.insert(root, Layer::color("#000").unwrap(), 0).unwrap();
        tree.detach(old).unwrap();
        let new = color(&mut tree, "#fff");

        assert_eq!(old.index(), new.index());
        assert_ne!(old.generation(), new.generation());
        assert!(!tree.is_alive(old));
        assert!(tree.is_alive(new));
        assert_eq!(tree.detach(old), Err(LayerError::NotFound(old)));
    }

    #[test]
    fn detach_unattached_layer_discards_it() {
        let mut tree = LayerTree::new();
        let group = opacity(&mut tree, 20);
        let leaf = color(&mut tree, "#abc");
        tree.append(group, leaf).unwrap();
        assert!(!tree.is_attached(leaf));

        assert_eq!(tree.detach(group), Ok(vec![group, leaf]));
        assert_eq!(tree.layer_count(), 1);
    }

    #[test]
    fn move_within_the_same_parent() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let a = tree.insert(root, Layer::color("#000").unwrap(), 0).unwrap();
        let b = tree.insert(root, Layer::color("#111").unwrap(), 1).unwrap();
        let c = tree.insert(root, Layer::color("#222").unwrap(), 2).unwrap();

        tree.move_to(a, root, 2).unwrap();
        assert_eq!(tree.children(root).unwrap().collect::<Vec<_>>(), vec![b, c, a]);

        tree.move_to(a, root, 0).unwrap();
        assert_eq!(tree.children(root).unwrap().collect::<Vec<_>>(), vec![a, b, c]);

        assert_eq!(
            tree.move_to(a, root, 3),
            Err(LayerError::IndexOutOfBounds { index: 3, len: 2 })
        );
    }

    #[test]
    fn move_reparents() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let left = tree.insert(root, Layer::opacity(50).unwrap(), 0).unwrap();
        let right = tree
            .insert(root, Layer::vertical_align(VerticalAlign::Bottom), 1)
            .unwrap();
        let leaf = tree.insert(left, Layer::color("#000").unwrap(), 0).unwrap();

        tree.move_to(leaf, right, 0).unwrap();
        assert_eq!(tree.parent(leaf), Ok(Some(right)));
        assert_eq!(tree.child_count(left), Ok(0));
        assert_eq!(tree.ancestors(leaf).unwrap().collect::<Vec<_>>(), vec![right, root]);
    }

    #[test]
    fn failed_move_leaves_the_tree_untouched() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let outer = tree.insert(root, Layer::opacity(50).unwrap(), 0).unwrap();
        let inner = tree.insert(outer, Layer::opacity(50).unwrap(), 0).unwrap();
        let panel = tree.insert(inner, Layer::color("#f00").unwrap(), 0).unwrap();
        let other = tree.insert(root, Layer::color("#0f0").unwrap(), 1).unwrap();
        let before = shape(&tree);

        assert!(matches!(
            tree.move_to(outer, inner, 0),
            Err(LayerError::Cycle { .. })
        ));
        assert!(matches!(
            tree.move_to(outer, panel, 0),
            Err(LayerError::LeafViolation { .. })
        ));
        assert!(matches!(
            tree.move_to(other, inner, 9),
            Err(LayerError::IndexOutOfBounds { .. })
        ));
        let stale = color(&mut tree, "#123");
        tree.detach(stale).unwrap();
        assert_eq!(tree.move_to(stale, root, 0), Err(LayerError::NotFound(stale)));

        assert_eq!(shape(&tree), before);
    }

    #[test]
    fn update_keeps_the_kind() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let group = tree.insert(root, Layer::opacity(50).unwrap(), 0).unwrap();

        tree.update(group, Layer::opacity(75).unwrap()).unwrap();
        assert_eq!(tree.get(group), Ok(&Layer::opacity(75).unwrap()));

        assert_eq!(
            tree.update(group, Layer::color("#000").unwrap()),
            Err(LayerError::KindMismatch {
                existing: LayerKind::OpacityModifier,
                replacement: LayerKind::ColorLayer,
            })
        );
    }

    #[test]
    fn update_attributes_is_atomic() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let group = tree.insert(root, Layer::opacity(50).unwrap(), 0).unwrap();

        let mut attrs = RawAttrs::new();
        attrs.insert("opacity".into(), AttrValue::Int(101));
        assert!(matches!(
            tree.update_attributes(group, &attrs),
            Err(LayerError::Range { .. })
        ));
        assert_eq!(tree.get(group), Ok(&Layer::opacity(50).unwrap()));

        attrs.insert("opacity".into(), AttrValue::Int(20));
        tree.update_attributes(group, &attrs).unwrap();
        assert_eq!(tree.get(group), Ok(&Layer::opacity(20).unwrap()));
    }

    #[test]
    fn deep_chains_detach_without_recursion() {
        const DEPTH: usize = 2_000;

        let mut tree = LayerTree::new();
        let root = tree.root();
        let top = tree.insert(root, Layer::container(None).unwrap(), 0).unwrap();
        let mut chain = vec![top];
        for _ in 1..DEPTH {
            let parent = chain[chain.len() - 1];
            chain.push(tree.insert(parent, Layer::container(None).unwrap(), 0).unwrap());
        }

        assert_eq!(tree.descendants(top).unwrap(), chain);
        assert_eq!(tree.detach(top).unwrap(), chain);
        assert_eq!(tree.layer_count(), 1);
        assert!(chain.iter().all(|id| !tree.is_alive(*id)));
    }

    #[test]
    fn descendants_are_pre_order_across_branches() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let a = tree.insert(root, Layer::container(None).unwrap(), 0).unwrap();
        let a1 = tree.insert(a, Layer::color("#000").unwrap(), 0).unwrap();
        let a2 = tree.insert(a, Layer::color("#111").unwrap(), 1).unwrap();
        let b = tree.insert(root, Layer::color("#222").unwrap(), 1).unwrap();

        assert_eq!(tree.descendants(root).unwrap(), vec![root, a, a1, a2, b]);
    }

    #[test]
    fn freed_slots_are_dead_until_reused() {
        let mut tree = LayerTree::new();
        let root = tree.root();
        let group = container(&mut tree);
        let leaves: Vec<_> = (0..64).map(|_| color(&mut tree, "#000")).collect();
        for leaf in &leaves {
            tree.append(group, *leaf).unwrap();
        }
        tree.append(root, group).unwrap();
        tree.detach(group).unwrap();

        assert_eq!(tree.layer_count(), 1);
        assert!(leaves.iter().all(|id| !tree.is_alive(*id)));

        let reused = color(&mut tree, "#fff");
        assert!(tree.is_alive(reused));
        assert!(
            leaves.iter().chain([&group]).all(|id| !tree.is_alive(*id)),
            "stale handles to a reused slot stay dead"
        );
        assert_eq!(tree.layer_count(), 2);
    }
}
