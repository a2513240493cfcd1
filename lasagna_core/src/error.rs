// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for layer construction and tree mutation.
//!
//! Every error indicates a caller or data problem, never a transient
//! condition: nothing here is worth retrying. A mutation that returns an
//! error has left the tree exactly as it found it.

use thiserror::Error;

use crate::layer::{LayerId, LayerKind};

/// Result type for layer construction and tree mutation.
pub type LayerResult<T> = Result<T, LayerError>;

/// Errors raised while building layers or mutating a [`LayerTree`].
///
/// [`LayerTree`]: crate::layer::LayerTree
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayerError {
    /// A numeric attribute is outside its permitted range.
    #[error("{attr} value {value} is out of range [{min}, {max}]")]
    Range {
        /// Attribute name.
        attr: &'static str,
        /// Rejected value.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },

    /// An attribute value is malformed, missing, or unknown.
    #[error("invalid {attr}: {message}")]
    Validation {
        /// Attribute name.
        attr: String,
        /// What is wrong with it.
        message: String,
    },

    /// An enumerated attribute is not one of its fixed values.
    #[error("{value:?} is not a valid {attr}")]
    InvalidEnumValue {
        /// Attribute name.
        attr: &'static str,
        /// Rejected value, as given.
        value: String,
    },

    /// The parent kind is not permitted for the child kind.
    #[error("{child} cannot be nested under {parent}")]
    InvalidNesting {
        /// Kind of the layer being attached.
        child: LayerKind,
        /// Kind of the prospective parent.
        parent: LayerKind,
    },

    /// The prospective parent is a leaf kind and never owns children.
    #[error("{parent} is a leaf layer and cannot have children")]
    LeafViolation {
        /// Kind of the prospective parent.
        parent: LayerKind,
    },

    /// Attaching would make a layer its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Layer being attached or moved.
        child: LayerId,
        /// Prospective parent, a descendant of `child` (or `child` itself).
        parent: LayerId,
    },

    /// The id does not refer to a live layer.
    #[error("layer not found: {0:?}")]
    NotFound(LayerId),

    /// The root container cannot be attached, moved, or detached.
    #[error("{0:?} is the root container")]
    RootNode(LayerId),

    /// The layer already has a parent; use `move_to` to reparent it.
    #[error("{0:?} is already attached")]
    AlreadyAttached(LayerId),

    /// The insertion index is past the end of the child list.
    #[error("index {index} is out of bounds for {len} children")]
    IndexOutOfBounds {
        /// Requested position.
        index: usize,
        /// Number of children at the target.
        len: usize,
    },

    /// An update tried to change the kind of an existing layer.
    #[error("cannot replace a {existing} with a {replacement}")]
    KindMismatch {
        /// Kind currently stored.
        existing: LayerKind,
        /// Kind of the rejected replacement.
        replacement: LayerKind,
    },
}

impl LayerError {
    pub(crate) fn validation(attr: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            attr: attr.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_enum(attr: &'static str, value: impl ToString) -> Self {
        Self::InvalidEnumValue {
            attr,
            value: value.to_string(),
        }
    }
}
