// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Lasagna uses multi-channel dirty tracking (via [`understory_dirty`]) so a
//! host can persist or re-render only what changed since the last drain.
//!
//! # Propagation semantics
//!
//! - **Propagating**: [`OPACITY`] uses
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and has dependency edges
//!   from child to parent. Marking an opacity modifier dirty marks every
//!   descendant, since effective opacity is inherited.
//!
//! - **Local-only**: [`ATTRIBUTES`] is marked with the default policy. Only
//!   the edited layer appears in the drain output.
//!
//! - **Structural**: [`TOPOLOGY`] is marked on the parent whose child list
//!   changed (attach, detach, move). It does not propagate.
//!
//! # Consumption
//!
//! Callers never query dirty state directly. Each
//! [`LayerTree::take_changes`](crate::layer::LayerTree::take_changes) call
//! drains all channels and surfaces the results as
//! [`TreeChanges`](crate::layer::TreeChanges).

use understory_dirty::Channel;

/// Stored attributes changed. No propagation.
pub const ATTRIBUTES: Channel = Channel::new(0);

/// Effective opacity may have changed, for the layer and its descendants.
pub const OPACITY: Channel = Channel::new(1);

/// The child list of a layer changed.
pub const TOPOLOGY: Channel = Channel::new(2);
