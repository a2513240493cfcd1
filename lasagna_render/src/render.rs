// Copyright 2026 the Lasagna Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition rendering.
//!
//! Rendering is a depth-first pre-order walk. For every layer the walk:
//!
//! 1. **Resolves** the layer's local style ([`resolve`](crate::resolve)).
//! 2. **Composes** the local opacity with the opacity inherited from its
//!    ancestors, per [`OpacityComposition`].
//! 3. **Emits** an [`OutputNode`] and descends into the children in paint
//!    order, handing down the composed opacity.
//!
//! Alignment is local to the declaring layer and is never handed down. The
//! walk reads the tree and never mutates it.

use lasagna_core::layer::{Children, Layer, LayerId, LayerTree};
use lasagna_core::trace::{RenderBeginEvent, RenderFailedEvent, RenderSummary, Tracer};

use crate::error::{RenderError, RenderResult};
use crate::output::{OutputNode, OutputTree};
use crate::style::{self, ResolvedStyle};

/// How nested opacity modifiers combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OpacityComposition {
    /// Each modifier scales everything below it, so nested factors multiply.
    #[default]
    Multiply,
    /// Only the closest enclosing modifier applies.
    Nearest,
}

impl OpacityComposition {
    /// Combines an inherited opacity with a layer's own.
    #[must_use]
    pub fn compose(self, inherited: Option<f64>, local: Option<f64>) -> Option<f64> {
        match self {
            Self::Multiply => match (inherited, local) {
                (Some(outer), Some(inner)) => Some(outer * inner),
                (outer, inner) => outer.or(inner),
            },
            Self::Nearest => local.or(inherited),
        }
    }
}

/// Renderer configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderConfig {
    /// How nested opacity modifiers combine.
    pub opacity_composition: OpacityComposition,
}

impl RenderConfig {
    /// The default configuration: multiplicative opacity.
    pub const MULTIPLY: Self = Self {
        opacity_composition: OpacityComposition::Multiply,
    };

    /// Only the nearest opacity modifier applies.
    pub const NEAREST: Self = Self {
        opacity_composition: OpacityComposition::Nearest,
    };

    /// Returns this configuration with a different opacity composition.
    #[must_use]
    pub const fn with_opacity_composition(mut self, composition: OpacityComposition) -> Self {
        self.opacity_composition = composition;
        self
    }
}

/// Renders layer trees into [`OutputTree`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Creates a renderer with the given configuration.
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> RenderConfig {
        self.config
    }

    /// Renders the whole tree, starting at its root.
    pub fn render(&self, tree: &LayerTree) -> RenderResult<OutputTree> {
        self.render_traced(tree, &mut Tracer::none())
    }

    /// Renders the whole tree, reporting progress to `tracer`.
    pub fn render_traced(
        &self,
        tree: &LayerTree,
        tracer: &mut Tracer<'_>,
    ) -> RenderResult<OutputTree> {
        self.walk_from(tree, tree.root(), tracer)
    }

    /// Renders the subtree rooted at the attached layer `node`.
    ///
    /// The opacity inherited from `node`'s ancestors is applied, so every
    /// emitted node matches its counterpart in a full render.
    pub fn render_subtree(&self, tree: &LayerTree, node: LayerId) -> RenderResult<OutputTree> {
        self.render_subtree_traced(tree, node, &mut Tracer::none())
    }

    /// Like [`render_subtree`](Self::render_subtree), reporting progress to
    /// `tracer`.
    pub fn render_subtree_traced(
        &self,
        tree: &LayerTree,
        node: LayerId,
        tracer: &mut Tracer<'_>,
    ) -> RenderResult<OutputTree> {
        if !tree.is_alive(node) {
            return Err(RenderError::NotFound(node));
        }
        if !tree.is_attached(node) {
            return Err(RenderError::Detached(node));
        }
        self.walk_from(tree, node, tracer)
    }

    fn walk_from(
        &self,
        tree: &LayerTree,
        start: LayerId,
        tracer: &mut Tracer<'_>,
    ) -> RenderResult<OutputTree> {
        tracer.render_begin(&RenderBeginEvent {
            root: start,
            layers: tree.layer_count(),
        });

        let inherited = self.inherited_opacity(tree, start)?;
        let mut walk = Walk {
            tree,
            composition: self.config.opacity_composition,
            summary: RenderSummary::default(),
        };
        match walk.run(start, inherited) {
            Ok(root) => {
                tracer.render_end(&walk.summary);
                Ok(OutputTree { root })
            }
            Err(err) => {
                if let RenderError::Unrenderable {
                    layer: Some(layer),
                    kind,
                } = err
                {
                    tracer.render_failed(&RenderFailedEvent { layer, kind });
                }
                Err(err)
            }
        }
    }

    /// Composes the opacity modifiers above `start`, outermost first.
    fn inherited_opacity(&self, tree: &LayerTree, start: LayerId) -> RenderResult<Option<f64>> {
        let ancestors: Vec<LayerId> = tree
            .ancestors(start)
            .map_err(|_| RenderError::NotFound(start))?
            .collect();
        let mut inherited = None;
        for id in ancestors.into_iter().rev() {
            if let Ok(Layer::OpacityModifier { opacity }) = tree.get(id) {
                inherited = self
                    .config
                    .opacity_composition
                    .compose(inherited, Some(opacity.factor()));
            }
        }
        Ok(inherited)
    }
}

/// Renders the whole tree with the default configuration.
pub fn render(tree: &LayerTree) -> RenderResult<OutputTree> {
    Renderer::default().render(tree)
}

/// Renders the subtree at `node` with the default configuration.
pub fn render_subtree(tree: &LayerTree, node: LayerId) -> RenderResult<OutputTree> {
    Renderer::default().render_subtree(tree, node)
}

/// State of one render walk.
struct Walk<'t> {
    tree: &'t LayerTree,
    composition: OpacityComposition,
    summary: RenderSummary,
}

/// A layer whose children are still being rendered.
struct Frame<'t> {
    id: LayerId,
    layer: &'t Layer,
    style: ResolvedStyle,
    depth: usize,
    pending: Children<'t>,
    children: Vec<OutputNode>,
}

impl<'t> Walk<'t> {
    /// Renders the subtree at `start` with an explicit stack, so arbitrarily
    /// deep chains cannot exhaust the call stack.
    fn run(&mut self, start: LayerId, inherited: Option<f64>) -> RenderResult<OutputNode> {
        let mut stack = vec![self.enter(start, inherited, 0)?];
        while let Some(frame) = stack.last_mut() {
            if let Some(child) = frame.pending.next() {
                let (opacity, depth) = (frame.style.opacity, frame.depth + 1);
                let next = self.enter(child, opacity, depth)?;
                stack.push(next);
                continue;
            }
            let Some(done) = stack.pop() else { break };
            let node = self.finish(done);
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => return Ok(node),
            }
        }
        Err(RenderError::NotFound(start))
    }

    fn enter(
        &self,
        id: LayerId,
        inherited: Option<f64>,
        depth: usize,
    ) -> RenderResult<Frame<'t>> {
        let tree = self.tree;
        let layer = tree.get(id).map_err(|_| RenderError::NotFound(id))?;
        let local = style::resolve(layer).map_err(|_| RenderError::Unrenderable {
            layer: Some(id),
            kind: layer.kind(),
        })?;
        let opacity = self.composition.compose(inherited, local.opacity);
        let pending = tree.children(id).map_err(|_| RenderError::NotFound(id))?;
        Ok(Frame {
            id,
            layer,
            style: ResolvedStyle { opacity, ..local },
            depth,
            pending,
            children: Vec::new(),
        })
    }

    fn finish(&mut self, frame: Frame<'t>) -> OutputNode {
        self.summary.nodes += 1;
        if frame.children.is_empty() {
            self.summary.leaves += 1;
        }
        self.summary.max_depth = self.summary.max_depth.max(frame.depth);

        let name = match frame.layer {
            Layer::Container { name } => name.as_ref().map(|n| n.as_str().to_owned()),
            _ => None,
        };
        OutputNode {
            layer: frame.id,
            kind: frame.layer.kind(),
            name,
            style: frame.style,
            children: frame.children,
        }
    }
}
