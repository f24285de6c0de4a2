//! Nested transition tables.
//!
//! A [`TransitionTree`] maps an operation name down to phase suffixes and
//! finally to leaf transition functions:
//!
//! ```text
//! GET_ALL ─┬─ PENDING   ──> fn(state, action) -> state
//!          ├─ FULFILLED ──> fn(state, action) -> state
//!          └─ REJECTED  ──> fn(state, action) -> state
//! ```
//!
//! Custom trees may nest deeper or put leaves directly at the top level.
//! Wrapping with an action transformer and merging across rules are both
//! structural recursion over [`TransitionNode`].

use std::sync::Arc;

use indexmap::IndexMap;

use super::action::{Action, State};
use crate::config::ActionTransformer;

/// Leaf transition: `(state, action) -> new state`.
pub type TransitionFn = Arc<dyn Fn(&State, &Action) -> State + Send + Sync>;

/// A node of a transition tree.
#[derive(Clone)]
pub enum TransitionNode {
    Leaf(TransitionFn),
    Branch(TransitionTree),
}

impl TransitionNode {
    pub fn leaf<F>(f: F) -> Self
    where
        F: Fn(&State, &Action) -> State + Send + Sync + 'static,
    {
        TransitionNode::Leaf(Arc::new(f))
    }

    pub fn as_leaf(&self) -> Option<&TransitionFn> {
        match self {
            TransitionNode::Leaf(f) => Some(f),
            TransitionNode::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&TransitionTree> {
        match self {
            TransitionNode::Leaf(_) => None,
            TransitionNode::Branch(tree) => Some(tree),
        }
    }

    fn wrap(&self, transformer: &ActionTransformer) -> TransitionNode {
        match self {
            TransitionNode::Leaf(f) => {
                let f = Arc::clone(f);
                let transformer = transformer.clone();
                TransitionNode::Leaf(Arc::new(move |state: &State, action: &Action| {
                    f(state, &transformer.transform(action))
                }))
            }
            TransitionNode::Branch(tree) => TransitionNode::Branch(tree.wrap(transformer)),
        }
    }
}

impl std::fmt::Debug for TransitionNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionNode::Leaf(_) => f.write_str("Leaf(<fn>)"),
            TransitionNode::Branch(tree) => f.debug_tuple("Branch").field(tree).finish(),
        }
    }
}

impl From<TransitionTree> for TransitionNode {
    fn from(tree: TransitionTree) -> Self {
        TransitionNode::Branch(tree)
    }
}

/// Insertion-ordered mapping from key segment to [`TransitionNode`].
#[derive(Clone, Default)]
pub struct TransitionTree {
    nodes: IndexMap<String, TransitionNode>,
}

impl TransitionTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leaf under `key`, replacing whatever was there.
    pub fn with_leaf<F>(mut self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&State, &Action) -> State + Send + Sync + 'static,
    {
        self.insert(key, TransitionNode::leaf(f));
        self
    }

    /// Add a nested tree under `key`, replacing whatever was there.
    pub fn with_branch(mut self, key: impl Into<String>, tree: TransitionTree) -> Self {
        self.insert(key, TransitionNode::Branch(tree));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, node: TransitionNode) -> Option<TransitionNode> {
        self.nodes.insert(key.into(), node)
    }

    pub fn get(&self, key: &str) -> Option<&TransitionNode> {
        self.nodes.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TransitionNode)> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves at any depth.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .values()
            .map(|node| match node {
                TransitionNode::Leaf(_) => 1,
                TransitionNode::Branch(tree) => tree.leaf_count(),
            })
            .sum()
    }

    /// Rebuild the tree so every leaf sees `transformer(action)` instead of
    /// the dispatched action. Shape and key order are preserved.
    pub fn wrap(&self, transformer: &ActionTransformer) -> TransitionTree {
        TransitionTree {
            nodes: self
                .nodes
                .iter()
                .map(|(key, node)| (key.clone(), node.wrap(transformer)))
                .collect(),
        }
    }

    /// Shallow merge: each top-level key of `other` replaces the same key here.
    ///
    /// Sub-trees are never merged; a colliding operation name takes the whole
    /// sub-tree from `other`.
    pub fn merge(&mut self, other: TransitionTree) {
        for (key, node) in other.nodes {
            self.nodes.insert(key, node);
        }
    }

    /// Every root-to-leaf path joined by `delimiter`, in depth-first order.
    pub fn flatten(&self, delimiter: &str) -> Vec<(String, TransitionFn)> {
        let mut out = Vec::with_capacity(self.leaf_count());
        self.flatten_into(None, delimiter, &mut out);
        out
    }

    fn flatten_into(
        &self,
        prefix: Option<&str>,
        delimiter: &str,
        out: &mut Vec<(String, TransitionFn)>,
    ) {
        for (key, node) in &self.nodes {
            let path = match prefix {
                Some(prefix) => format!("{}{}{}", prefix, delimiter, key),
                None => key.clone(),
            };
            match node {
                TransitionNode::Leaf(f) => out.push((path, Arc::clone(f))),
                TransitionNode::Branch(tree) => tree.flatten_into(Some(&path), delimiter, out),
            }
        }
    }
}

impl std::fmt::Debug for TransitionTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.nodes.iter()).finish()
    }
}

impl<K: Into<String>> FromIterator<(K, TransitionNode)> for TransitionTree {
    fn from_iter<I: IntoIterator<Item = (K, TransitionNode)>>(iter: I) -> Self {
        TransitionTree {
            nodes: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
