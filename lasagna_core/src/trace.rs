// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for rendering and change draining.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! renderer and [`LayerTree::take_changes_traced`] call. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! [`LayerTree::take_changes_traced`]: crate::layer::LayerTree::take_changes_traced

use crate::layer::{LayerId, LayerKind, TreeChanges};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted before a render walk starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderBeginEvent {
    /// The layer the walk starts from.
    pub root: LayerId,
    /// Number of live layers in the tree, attached or not.
    pub layers: usize,
}

/// Emitted after a render walk completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Number of emitted output nodes.
    pub nodes: usize,
    /// Number of emitted nodes without children.
    pub leaves: usize,
    /// Depth of the deepest emitted node, the start layer being 0.
    pub max_depth: usize,
}

/// Emitted when a render walk meets a layer it cannot render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderFailedEvent {
    /// The offending layer.
    pub layer: LayerId,
    /// Its kind.
    pub kind: LayerKind,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called before a render walk starts.
    fn on_render_begin(&mut self, e: &RenderBeginEvent) {
        _ = e;
    }

    /// Called after a render walk completes.
    fn on_render_end(&mut self, s: &RenderSummary) {
        _ = s;
    }

    /// Called when a render walk aborts on an unrenderable layer.
    fn on_render_failed(&mut self, e: &RenderFailedEvent) {
        _ = e;
    }

    /// Called with the changes drained from a tree.
    fn on_tree_changes(&mut self, changes: &TreeChanges) {
        _ = changes;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`RenderBeginEvent`].
    #[inline]
    pub fn render_begin(&mut self, e: &RenderBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_render_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RenderSummary`].
    #[inline]
    pub fn render_end(&mut self, s: &RenderSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_render_end(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits a [`RenderFailedEvent`].
    #[inline]
    pub fn render_failed(&mut self, e: &RenderFailedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_render_failed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits drained [`TreeChanges`].
    #[inline]
    pub fn tree_changes(&mut self, changes: &TreeChanges) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_tree_changes(changes);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = changes;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerTree;

    #[test]
    fn noop_sink_compiles() {
        let tree = LayerTree::new();
        let mut sink = NoopSink;
        sink.on_render_begin(&RenderBeginEvent {
            root: tree.root(),
            layers: 1,
        });
        sink.on_render_end(&RenderSummary::default());
        sink.on_render_failed(&RenderFailedEvent {
            layer: tree.root(),
            kind: LayerKind::ImageAnchorModifier,
        });
        sink.on_tree_changes(&TreeChanges::default());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.render_end(&RenderSummary::default());
        tracer.tree_changes(&TreeChanges::default());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        struct RecordingSink {
            nodes: Vec<usize>,
        }
        impl TraceSink for RecordingSink {
            fn on_render_end(&mut self, s: &RenderSummary) {
                self.nodes.push(s.nodes);
            }
        }

        let mut sink = RecordingSink { nodes: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.render_end(&RenderSummary {
            nodes: 3,
            leaves: 2,
            max_depth: 1,
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.nodes, &[3]);
    }
}
