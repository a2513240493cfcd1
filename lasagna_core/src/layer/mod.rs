// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree data model.
//!
//! A *layer* is a node in a lasagna. Each layer has:
//!
//! - An identity ([`LayerId`]): a generational handle that becomes stale when
//!   the layer is detached, preventing use-after-free bugs at the API level.
//! - Topology: parent, first-child, and sibling links forming an ordered tree.
//!   Sibling order is paint order: later children draw on top.
//! - A [`Layer`] value: its [`LayerKind`] together with the validated
//!   attributes of that kind.
//!
//! Which kinds may nest under which is fixed by a static table (see
//! [`LayerKind::permitted_parents`]). Color layers are leaves. Image anchor
//! modifiers are defined but accepted under no parent.
//!
//! # Dirty tracking
//!
//! Mutations mark the corresponding dirty channel (see
//! [`dirty`](crate::dirty)):
//!
//! - **OPACITY**: propagates to all descendants, since effective opacity is
//!   inherited.
//! - **ATTRIBUTES**: local-only; only the edited layer is marked.
//! - **TOPOLOGY**: the parent whose child list changed.
//!
//! [`LayerTree::take_changes`] drains all three into a [`TreeChanges`].

mod attr;
mod changes;
mod id;
mod kind;
mod rules;
mod traverse;
mod tree;

pub use attr::{AnchorPoint, Color, DisplayName, ObjectFit, Opacity, VerticalAlign};
pub use changes::TreeChanges;
pub use id::LayerId;
pub use kind::{AttrValue, Layer, LayerKind, RawAttrs};
pub use rules::check_nesting;
pub use traverse::{Ancestors, Children};
pub use tree::LayerTree;
