// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render error type.

use lasagna_core::layer::{LayerId, LayerKind};
use thiserror::Error;

/// Result type for style resolution and rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while resolving styles or rendering a tree.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The layer kind has no rendering. Never produced for a tree built
    /// through the validated mutation API.
    #[error("{kind} layer {layer:?} cannot be rendered")]
    Unrenderable {
        /// The offending layer, or `None` when resolving a detached value.
        layer: Option<LayerId>,
        /// Its kind.
        kind: LayerKind,
    },

    /// The start layer does not exist.
    #[error("layer not found: {0:?}")]
    NotFound(LayerId),

    /// The start layer exists but is not reachable from the root.
    #[error("layer {0:?} is not attached to the root")]
    Detached(LayerId),
}
