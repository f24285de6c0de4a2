//! Rules: one asynchronous operation's state slice and transitions.
//!
//! A [`Rule`] is built from an operation name and a config snapshot, then
//! refined with builder-style overrides:
//!
//! ```text
//! Rule::new("GET_ALL")
//!     .override_initial_state(..)        (value or builder)
//!     .override_reducer(..)?             (non-empty tree or builder)
//!     .override_action_transformer(..)
//!     .generate()?  ──>  RuleOutput { initial_state, transitions }
//! ```
//!
//! Overrides only replace this rule's own policy slots. The snapshot taken at
//! construction never changes when the config it came from changes.

use metrics::counter;

use crate::config::{
    ActionTransformer, Config, InitialStateBuilder, TransitionTableBuilder, global,
};
use crate::domain::{State, TransitionTree, TypeSuffixes};
use crate::error::{PhaserError, Result};
use crate::naming::snake_to_lower_camel;

pub mod overrides;

pub use overrides::{InitialStateOverride, ReducerOverride};

/// What a single rule contributes to the combined reducer.
#[derive(Debug, Clone, Default)]
pub struct RuleOutput {
    pub initial_state: State,
    pub transitions: TransitionTree,
}

/// Declarative description of one asynchronous operation.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    lower_camel_name: String,
    suffixes: TypeSuffixes,
    initial_state: InitialStateBuilder,
    transition_table: TransitionTableBuilder,
    action_transformer: ActionTransformer,
}

impl Rule {
    /// Create a rule from the current global config.
    ///
    /// # Errors
    /// [`PhaserError::InvalidValue`] if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_config(name, &global::snapshot())
    }

    /// Create a rule from an explicit config.
    pub fn with_config(name: impl Into<String>, config: &Config) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(PhaserError::InvalidValue(
                "Rule name cannot be empty".to_string(),
            ));
        }
        let lower_camel_name = snake_to_lower_camel(&name.to_lowercase());

        Ok(Self {
            name,
            lower_camel_name,
            suffixes: config.suffixes.clone(),
            initial_state: config.policies.initial_state.clone(),
            transition_table: config.policies.transition_table.clone(),
            action_transformer: config.policies.action_transformer.clone(),
        })
    }

    /// Operation name as given, e.g. `GET_ALL`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Derived name used for state fields, e.g. `getAll`.
    pub fn lower_camel_name(&self) -> &str {
        &self.lower_camel_name
    }

    /// Suffix labels captured at construction.
    pub fn suffixes(&self) -> &TypeSuffixes {
        &self.suffixes
    }

    pub fn override_initial_state(mut self, value: impl Into<InitialStateOverride>) -> Self {
        self.initial_state = value.into().into_builder();
        self
    }

    /// # Errors
    /// [`PhaserError::InvalidValue`] for a tree with no keys.
    pub fn override_reducer(mut self, value: impl Into<ReducerOverride>) -> Result<Self> {
        self.transition_table = value.into().into_builder()?;
        Ok(self)
    }

    pub fn override_action_transformer(mut self, transformer: ActionTransformer) -> Self {
        self.action_transformer = transformer;
        self
    }

    /// Build this rule's initial state and its action-transformed transitions.
    ///
    /// Errors from the policy functions are returned unchanged.
    pub fn generate(&self) -> Result<RuleOutput> {
        let initial_state = self.initial_state.build(&self.lower_camel_name)?;
        let raw = self
            .transition_table
            .build(&self.name, &self.lower_camel_name, &self.suffixes)?;
        let transitions = raw.wrap(&self.action_transformer);

        tracing::debug!(
            rule = %self.name,
            fields = initial_state.len(),
            leaves = transitions.leaf_count(),
            "Generated rule"
        );
        counter!("phaser_rules_generated_total").increment(1);

        Ok(RuleOutput {
            initial_state,
            transitions,
        })
    }
}
