//! Configuration shared by every rule built from it.
//!
//! A [`Config`] bundles the type suffix labels with the three default
//! policies. Rules snapshot a config when they are constructed, so changing
//! a config afterwards never reaches back into existing rules.
//!
//! Configs can be passed explicitly ([`Config::rule`], [`Rule::with_config`])
//! or read from the process-wide default in [`global`].
//!
//! [`Rule::with_config`]: crate::Rule::with_config

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::{Action, State, TransitionTree, TypeSuffixes};
use crate::error::Result;
use crate::rule::Rule;

pub mod defaults;
pub mod global;

/// Signature of an initial state builder: `(lower_camel_name) -> state`.
pub type InitialStateFn = dyn Fn(&str) -> Result<State> + Send + Sync;

/// Signature of a transition table builder:
/// `(operation_name, lower_camel_name, suffixes) -> tree`.
pub type TransitionTableFn =
    dyn Fn(&str, &str, &TypeSuffixes) -> Result<TransitionTree> + Send + Sync;

/// Signature of an action transformer.
pub type ActionTransformFn = dyn Fn(&Action) -> Action + Send + Sync;

/// Builds the initial state fragment of a rule from its lower-camel name.
#[derive(Clone)]
pub struct InitialStateBuilder(Arc<InitialStateFn>);

impl InitialStateBuilder {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<State> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Builder that ignores its argument and returns `state`.
    pub fn constant(state: State) -> Self {
        Self::new(move |_| Ok(state.clone()))
    }

    pub fn build(&self, lower_camel_name: &str) -> Result<State> {
        (self.0)(lower_camel_name)
    }
}

/// Builds the transition tree of a rule.
#[derive(Clone)]
pub struct TransitionTableBuilder(Arc<TransitionTableFn>);

impl TransitionTableBuilder {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, &str, &TypeSuffixes) -> Result<TransitionTree> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Builder that ignores its arguments and returns `tree`.
    pub fn constant(tree: TransitionTree) -> Self {
        Self::new(move |_, _, _| Ok(tree.clone()))
    }

    pub fn build(
        &self,
        operation_name: &str,
        lower_camel_name: &str,
        suffixes: &TypeSuffixes,
    ) -> Result<TransitionTree> {
        (self.0)(operation_name, lower_camel_name, suffixes)
    }
}

/// Rewrites every action before a transition function sees it.
#[derive(Clone)]
pub struct ActionTransformer(Arc<ActionTransformFn>);

impl ActionTransformer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Action) -> Action + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn identity() -> Self {
        Self::new(defaults::identity_action)
    }

    pub fn transform(&self, action: &Action) -> Action {
        (self.0)(action)
    }
}

impl Default for ActionTransformer {
    fn default() -> Self {
        Self::identity()
    }
}

macro_rules! opaque_debug {
    ($($ty:ident),*) => {
        $(
            impl std::fmt::Debug for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(concat!(stringify!($ty), "(<fn>)"))
                }
            }
        )*
    };
}

opaque_debug!(InitialStateBuilder, TransitionTableBuilder, ActionTransformer);

/// The three policies a rule starts from unless it overrides them.
#[derive(Debug, Clone)]
pub struct DefaultPolicies {
    pub initial_state: InitialStateBuilder,
    pub transition_table: TransitionTableBuilder,
    pub action_transformer: ActionTransformer,
}

impl Default for DefaultPolicies {
    fn default() -> Self {
        Self {
            initial_state: InitialStateBuilder::new(defaults::initial_state),
            transition_table: TransitionTableBuilder::new(defaults::transition_table),
            action_transformer: ActionTransformer::identity(),
        }
    }
}

/// Suffix labels plus default policies.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub suffixes: TypeSuffixes,
    pub policies: DefaultPolicies,
}

/// Serializable part of a [`Config`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub type_suffixes: TypeSuffixes,
}

impl Config {
    /// Config with the given labels and default policies.
    pub fn with_suffixes(suffixes: TypeSuffixes) -> Result<Self> {
        suffixes.validate()?;
        Ok(Self {
            suffixes,
            policies: DefaultPolicies::default(),
        })
    }

    /// Load suffix labels from JSON such as
    /// `{"type_suffixes": {"PENDING": "LOADING"}}`. Policies stay at their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(json)?;
        Self::with_suffixes(file.type_suffixes)
    }

    pub fn to_config_file(&self) -> ConfigFile {
        ConfigFile {
            type_suffixes: self.suffixes.clone(),
        }
    }

    /// Replace some or all suffix labels; see [`TypeSuffixes::with_overrides`].
    pub fn override_suffixes(&mut self, overrides: &IndexMap<String, String>) -> Result<()> {
        self.suffixes = self.suffixes.with_overrides(overrides)?;
        Ok(())
    }

    pub fn override_suffixes_from_value(&mut self, value: &serde_json::Value) -> Result<()> {
        self.suffixes = self.suffixes.with_overrides_from_value(value)?;
        Ok(())
    }

    pub fn override_initial_state_builder(&mut self, builder: InitialStateBuilder) {
        self.policies.initial_state = builder;
    }

    pub fn override_transition_table_builder(&mut self, builder: TransitionTableBuilder) {
        self.policies.transition_table = builder;
    }

    pub fn override_action_transformer(&mut self, transformer: ActionTransformer) {
        self.policies.action_transformer = transformer;
    }

    /// Construct a rule snapshotting this config.
    pub fn rule(&self, name: impl Into<String>) -> Result<Rule> {
        Rule::with_config(name, self)
    }
}
