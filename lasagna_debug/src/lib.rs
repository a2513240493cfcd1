// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, outlines, and JSON export for lasagna diagnostics.
//!
//! - [`pretty::PrettyPrintSink`]: a [`TraceSink`](lasagna_core::trace::TraceSink)
//!   writing human-readable one-line-per-event output.
//! - [`outline`]: an indented text outline of a layer tree, as an editor's
//!   structure panel would show it.
//! - [`json`]: JSON export of rendered output and of stored layer trees.

pub mod json;
pub mod outline;
pub mod pretty;
