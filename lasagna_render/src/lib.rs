// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style resolution and composition rendering for lasagna layer trees.
//!
//! This crate turns a validated [`LayerTree`](lasagna_core::layer::LayerTree)
//! into nested output. It defines:
//!
//! - [`resolve`]: the per-layer style resolver
//! - [`Renderer`] / [`render`]: the depth-first composition walk producing an
//!   [`OutputTree`]
//! - [`RenderConfig`]: how nested opacity modifiers combine
//! - [`to_markup`]: an HTML fragment writer for rendered output
//!
//! # Crate features
//!
//! - `serde` (disabled by default): `Serialize` for [`OutputTree`] in the
//!   `{kind, style, children}` shape.
//! - `trace` (disabled by default): forwards to `lasagna_core/trace`.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod error;
mod markup;
mod output;
mod render;
mod style;

pub use error::{RenderError, RenderResult};
pub use markup::{to_markup, write_markup};
pub use output::{OutputNode, OutputTree};
pub use render::{OpacityComposition, RenderConfig, Renderer, render, render_subtree};
pub use style::{AlignKeyword, ResolvedStyle, resolve};
