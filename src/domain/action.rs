//! Actions and state slices flowing through a reducer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reducer state: a flat JSON object of field name to value.
///
/// Rules contribute fragments of this shape; the generator merges them into
/// one combined initial state.
pub type State = Map<String, Value>;

static NULL: Value = Value::Null;

/// An action dispatched to a reducer.
///
/// Mirrors the `{ "type": ..., ...fields }` object a Redux-style store hands
/// to its reducer. Only `type` is interpreted by the compiled reducer; every
/// other field is payload for the transition functions.
///
/// # Example
/// ```
/// # use phaser::Action;
/// # use serde_json::json;
/// let action = Action::new("GET_ALL_FULFILLED").with("data", json!(["a", "b"]));
/// assert_eq!(action.action_type(), Some("GET_ALL_FULFILLED"));
/// assert_eq!(action.data(), &json!(["a", "b"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    action_type: Option<String>,

    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Action {
    /// Create an action with the given type and no payload.
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: Some(action_type.into()),
            fields: Map::new(),
        }
    }

    /// Attach a payload field, replacing any previous value under `key`.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(key.into(), value)
    }

    pub fn action_type(&self) -> Option<&str> {
        self.action_type.as_deref()
    }

    pub fn set_action_type(&mut self, action_type: impl Into<String>) {
        self.action_type = Some(action_type.into());
    }

    /// Payload field by name; `Value::Null` when absent.
    pub fn get(&self, key: &str) -> &Value {
        self.fields.get(key).unwrap_or(&NULL)
    }

    /// The `data` field read by the default fulfilled transition.
    pub fn data(&self) -> &Value {
        self.get("data")
    }

    /// The `error` field read by the default rejected transition.
    pub fn error(&self) -> &Value {
        self.get("error")
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Parse an action from a JSON value such as `{"type": "POST_PENDING"}`.
    pub fn from_value(value: Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl From<&str> for Action {
    fn from(action_type: &str) -> Self {
        Action::new(action_type)
    }
}

impl From<String> for Action {
    fn from(action_type: String) -> Self {
        Action::new(action_type)
    }
}
