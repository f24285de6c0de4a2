//! Build pure reducers for asynchronous operations from declarative rules.
//!
//! Each [`Rule`] describes one operation (a network call, say) that moves
//! through three phases: pending, fulfilled and rejected. A rule contributes
//! a slice of initial state and a transition per phase. A [`Generator`]
//! merges any number of rules into one [`CompiledReducer`], a pure
//! `(state, action) -> state` function suited to a Redux-style store.
//!
//! ```
//! use phaser::{Action, Generator, Rule};
//! use serde_json::json;
//!
//! let reducer = Generator::new([Rule::new("GET_ALL")?, Rule::new("POST")?]).generate()?;
//! let state = reducer.reduce(None, &Action::default());
//! assert_eq!(state["isGetAllPending"], json!(false));
//!
//! let state = reducer.reduce(Some(&state), &Action::new("GET_ALL_FULFILLED").with("data", json!("x")));
//! assert_eq!(state["getAllData"], json!("x"));
//! # Ok::<(), phaser::PhaserError>(())
//! ```
//!
//! Rules snapshot a [`Config`] when constructed: either one passed
//! explicitly, or the process-wide default managed by [`config::global`].

pub mod compile;
pub mod config;
pub mod domain;
pub mod error;
pub mod generator;
pub mod naming;
pub mod rule;

// Re-export commonly used types
pub use compile::CompiledReducer;
pub use config::global::{
    override_default_action_transformer, override_default_initial_state_builder,
    override_default_transition_table_builder, override_suffixes, override_suffixes_from_value,
};
pub use config::{ActionTransformer, Config, DefaultPolicies, InitialStateBuilder, TransitionTableBuilder};
pub use domain::{Action, Phase, State, TransitionFn, TransitionNode, TransitionTree, TypeSuffixes};
pub use error::{PhaserError, Result};
pub use generator::Generator;
pub use rule::{InitialStateOverride, ReducerOverride, Rule, RuleOutput};
