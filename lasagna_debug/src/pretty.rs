// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use lasagna_core::layer::TreeChanges;
use lasagna_core::trace::{RenderBeginEvent, RenderFailedEvent, RenderSummary, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_render_begin(&mut self, e: &RenderBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[render:begin] root={} layers={}",
            e.root, e.layers,
        );
    }

    fn on_render_end(&mut self, s: &RenderSummary) {
        let _ = writeln!(
            self.writer,
            "[render:end] nodes={} leaves={} depth={}",
            s.nodes, s.leaves, s.max_depth,
        );
    }

    fn on_render_failed(&mut self, e: &RenderFailedEvent) {
        let _ = writeln!(
            self.writer,
            "[render:failed] layer={} kind={}",
            e.layer, e.kind,
        );
    }

    fn on_tree_changes(&mut self, changes: &TreeChanges) {
        let _ = writeln!(
            self.writer,
            "[changes] added={} removed={} attributes={} opacities={} restructured={} topology={}",
            changes.added.len(),
            changes.removed.len(),
            changes.attributes.len(),
            changes.opacities.len(),
            changes.restructured.len(),
            changes.topology_changed,
        );
    }
}
