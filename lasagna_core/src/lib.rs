// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree model and attachment rules for lasagna page compositions.
//!
//! A *lasagna* is a page region composed as a stack of nested layers: a root
//! container holding colored panels and modifiers that change how their
//! descendants are laid out. `lasagna_core` owns the tree; rendering lives in
//! `lasagna_render`.
//!
//! # Architecture
//!
//! ```text
//!   Editor ──► LayerTree::{create, attach, move_to, detach, update}
//!                  │                 (validated against layer::rules)
//!                  ▼
//!              LayerTree ──► take_changes() ──► TreeChanges ──► store
//!                  │
//!                  └──────► lasagna_render::render() ──► OutputTree
//! ```
//!
//! **[`layer`]**: Struct-of-arrays layer tree with generational handles,
//! the closed set of layer kinds, their validated attributes, and the static
//! permitted-parent table.
//!
//! **[`dirty`]**: Multi-channel dirty tracking via `understory_dirty`.
//! Mutations mark the appropriate channel; [`LayerTree::take_changes`]
//! drains them.
//!
//! **[`error`]**: The [`LayerError`] taxonomy returned by every mutation.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! render and mutation instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `serde` (disabled by default): `Serialize`/`Deserialize` for layers,
//!   attributes and ids.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//!
//! [`LayerTree::take_changes`]: layer::LayerTree::take_changes
//! [`LayerError`]: error::LayerError

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod dirty;
pub mod error;
pub mod layer;
pub mod trace;
