//! Per-rule override values.
//!
//! Each override is either a plain value or a builder. The distinction is
//! made once here, when the override is constructed; rules only ever see a
//! builder.

use serde_json::Value;

use crate::config::{InitialStateBuilder, TransitionTableBuilder};
use crate::domain::{State, TransitionTree};
use crate::error::{PhaserError, Result};

/// Replacement for a rule's initial state.
#[derive(Debug, Clone)]
pub enum InitialStateOverride {
    /// Used verbatim, including an empty map.
    Value(State),
    /// Called with the rule's lower-camel name.
    Builder(InitialStateBuilder),
}

impl InitialStateOverride {
    pub fn into_builder(self) -> InitialStateBuilder {
        match self {
            InitialStateOverride::Value(state) => InitialStateBuilder::constant(state),
            InitialStateOverride::Builder(builder) => builder,
        }
    }
}

impl From<State> for InitialStateOverride {
    fn from(state: State) -> Self {
        InitialStateOverride::Value(state)
    }
}

impl From<InitialStateBuilder> for InitialStateOverride {
    fn from(builder: InitialStateBuilder) -> Self {
        InitialStateOverride::Builder(builder)
    }
}

impl TryFrom<Value> for InitialStateOverride {
    type Error = PhaserError;

    /// Accepts only JSON objects; null, arrays and primitives are type errors.
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(state) => Ok(InitialStateOverride::Value(state)),
            _ => Err(PhaserError::InvalidType {
                what: "Initial State",
                expected: "an object or a function",
            }),
        }
    }
}

/// Replacement for a rule's transition tree.
#[derive(Debug, Clone)]
pub enum ReducerOverride {
    /// Used verbatim; must not be empty.
    Tree(TransitionTree),
    /// Called with `(operation_name, lower_camel_name, suffixes)`.
    Builder(TransitionTableBuilder),
}

impl ReducerOverride {
    /// Validate and turn the override into a builder.
    ///
    /// # Errors
    /// [`PhaserError::InvalidValue`] when a plain tree has no keys.
    pub fn into_builder(self) -> Result<TransitionTableBuilder> {
        match self {
            ReducerOverride::Tree(tree) if tree.is_empty() => Err(PhaserError::InvalidValue(
                "Reducer object must have keys".to_string(),
            )),
            ReducerOverride::Tree(tree) => Ok(TransitionTableBuilder::constant(tree)),
            ReducerOverride::Builder(builder) => Ok(builder),
        }
    }
}

impl From<TransitionTree> for ReducerOverride {
    fn from(tree: TransitionTree) -> Self {
        ReducerOverride::Tree(tree)
    }
}

impl From<TransitionTableBuilder> for ReducerOverride {
    fn from(builder: TransitionTableBuilder) -> Self {
        ReducerOverride::Builder(builder)
    }
}
