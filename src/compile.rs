//! Compiling a transition tree into a dispatchable reducer.
//!
//! Every root-to-leaf path of the tree becomes one dispatch key, formed by
//! joining the path segments with a delimiter (`_` by default):
//!
//! ```text
//! GET_ALL ─┬─ PENDING            "GET_ALL_PENDING"
//!          ├─ FULFILLED   ──>    "GET_ALL_FULFILLED"
//!          └─ REJECTED           "GET_ALL_REJECTED"
//! OPEN                           "OPEN"
//! ```
//!
//! The resulting [`CompiledReducer`] looks the action type up in that table.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Action, State, TransitionFn, TransitionTree};

pub const DEFAULT_DELIMITER: &str = "_";

struct Inner {
    initial_state: State,
    table: HashMap<String, TransitionFn>,
    /// Dispatch keys in tree order.
    keys: Vec<String>,
}

/// A pure `(state, action) -> state` function.
///
/// Cheap to clone and safe to call from many threads at once: it holds no
/// mutable state.
#[derive(Clone)]
pub struct CompiledReducer {
    inner: Arc<Inner>,
}

/// Flatten `tree` and pair it with `initial_state`.
///
/// When two paths flatten to the same key, the later path wins.
pub fn compile(tree: &TransitionTree, initial_state: State, delimiter: &str) -> CompiledReducer {
    let flattened = tree.flatten(delimiter);
    let mut table = HashMap::with_capacity(flattened.len());
    let mut keys = Vec::with_capacity(flattened.len());

    for (key, f) in flattened {
        if table.insert(key.clone(), f).is_some() {
            tracing::warn!(
                key = %key,
                delimiter,
                "Transition paths collide after flattening, keeping the later one"
            );
        } else {
            keys.push(key);
        }
    }

    CompiledReducer {
        inner: Arc::new(Inner {
            initial_state,
            table,
            keys,
        }),
    }
}

impl CompiledReducer {
    /// Apply `action` to `state`, or to the initial state when `state` is `None`.
    ///
    /// Unknown or missing action types return the state unchanged.
    pub fn reduce(&self, state: Option<&State>, action: &Action) -> State {
        let state = state.unwrap_or(&self.inner.initial_state);
        let transition = action
            .action_type()
            .and_then(|action_type| self.inner.table.get(action_type));

        match transition {
            Some(f) => {
                tracing::trace!(action_type = action.action_type(), "Dispatching action");
                f(state, action)
            }
            None => state.clone(),
        }
    }

    pub fn initial_state(&self) -> &State {
        &self.inner.initial_state
    }

    /// Flattened action types this reducer reacts to, in tree order.
    pub fn dispatch_keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys.iter().map(String::as_str)
    }

    pub fn handles(&self, action_type: &str) -> bool {
        self.inner.table.contains_key(action_type)
    }

    /// The reducer as a plain closure, for runtimes that take `Fn` values.
    pub fn as_fn(&self) -> impl Fn(Option<&State>, &Action) -> State + Send + Sync + use<> {
        let reducer = self.clone();
        move |state: Option<&State>, action: &Action| reducer.reduce(state, action)
    }
}

impl std::fmt::Debug for CompiledReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledReducer")
            .field("initial_state", &self.inner.initial_state)
            .field("dispatch_keys", &self.inner.keys)
            .finish()
    }
}
