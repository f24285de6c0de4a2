//! Conventional policies a rule gets unless it overrides them.
//!
//! For an operation `GET_ALL` (lower-camel name `getAll`) the state slice is
//! `{isGetAllPending, getAllData, getAllError}` and the transitions are:
//!
//! ```text
//! GET_ALL_PENDING   ──> isGetAllPending: true,  getAllData: null,        getAllError: null
//! GET_ALL_FULFILLED ──> isGetAllPending: false, getAllData: action.data, getAllError: null
//! GET_ALL_REJECTED  ──> isGetAllPending: false, getAllData: null,        getAllError: action.error
//! ```

use serde_json::Value;

use crate::domain::{Action, Phase, State, TransitionTree, TypeSuffixes};
use crate::error::{PhaserError, Result};
use crate::naming::FieldNames;

fn slice(fields: &FieldNames, pending: bool, data: Value, error: Value) -> State {
    let mut state = State::with_capacity(3);
    state.insert(fields.pending.clone(), Value::Bool(pending));
    state.insert(fields.data.clone(), data);
    state.insert(fields.error.clone(), error);
    state
}

fn with_slice(state: &State, slice: State) -> State {
    let mut next = state.clone();
    next.extend(slice);
    next
}

/// `{is<Name>Pending: false, <name>Data: null, <name>Error: null}`.
pub fn initial_state(lower_camel_name: &str) -> Result<State> {
    let fields = FieldNames::new(lower_camel_name);
    Ok(slice(&fields, false, Value::Null, Value::Null))
}

/// Two-level tree: `operation_name -> {pending, fulfilled, rejected}`.
///
/// Fails with [`PhaserError::MissingSuffix`] when a label is empty and with
/// [`PhaserError::DuplicateSuffix`] when two phases share a label, instead of
/// registering a transition under an empty or already taken key.
pub fn transition_table(
    operation_name: &str,
    lower_camel_name: &str,
    suffixes: &TypeSuffixes,
) -> Result<TransitionTree> {
    let labels: Vec<(Phase, &str)> = suffixes.iter().collect();
    for (i, &(first, label)) in labels.iter().enumerate() {
        if label.is_empty() {
            return Err(PhaserError::MissingSuffix(first));
        }
        if let Some(&(second, _)) = labels[i + 1..].iter().find(|(_, other)| *other == label) {
            return Err(PhaserError::DuplicateSuffix {
                label: label.to_string(),
                first,
                second,
            });
        }
    }

    let fields = FieldNames::new(lower_camel_name);
    let on_pending = fields.clone();
    let on_fulfilled = fields.clone();
    let on_rejected = fields;

    let phases = TransitionTree::new()
        .with_leaf(suffixes.get(Phase::Pending), move |state, _action| {
            with_slice(state, slice(&on_pending, true, Value::Null, Value::Null))
        })
        .with_leaf(suffixes.get(Phase::Fulfilled), move |state, action| {
            with_slice(
                state,
                slice(&on_fulfilled, false, action.data().clone(), Value::Null),
            )
        })
        .with_leaf(suffixes.get(Phase::Rejected), move |state, action| {
            with_slice(
                state,
                slice(&on_rejected, false, Value::Null, action.error().clone()),
            )
        });

    Ok(TransitionTree::new().with_branch(operation_name, phases))
}

/// Returns the action unchanged.
pub fn identity_action(action: &Action) -> Action {
    action.clone()
}
