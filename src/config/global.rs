//! Process-wide default configuration.
//!
//! [`Rule::new`](crate::Rule::new) snapshots this config. Overrides apply to
//! rules constructed afterwards and are never reset automatically; use
//! [`scoped`] to get a section whose overrides are rolled back on drop.
//!
//! Overrides racing with rule construction on other threads are the caller's
//! concern. [`scoped`] sections exclude each other, but plain override calls
//! do not take part in that exclusion.

use std::sync::LazyLock;

use indexmap::IndexMap;
use metrics::counter;
use parking_lot::{Mutex, MutexGuard, RwLock};

use super::{ActionTransformer, Config, InitialStateBuilder, TransitionTableBuilder};
use crate::domain::TypeSuffixes;
use crate::error::Result;

static GLOBAL: LazyLock<RwLock<Config>> = LazyLock::new(|| RwLock::new(Config::default()));

static SCOPE_LOCK: Mutex<()> = parking_lot::const_mutex(());

fn record_override(slot: &'static str) {
    counter!("phaser_config_overrides_total", "slot" => slot).increment(1);
}

/// Copy of the current global config.
pub fn snapshot() -> Config {
    GLOBAL.read().clone()
}

/// Replace the global config wholesale.
pub fn restore(config: Config) {
    *GLOBAL.write() = config;
}

pub fn suffixes() -> TypeSuffixes {
    GLOBAL.read().suffixes.clone()
}

/// Replace some or all global suffix labels.
///
/// # Errors
/// - [`Config`](crate::PhaserError::Config) for an empty mapping or a key
///   outside `PENDING`, `FULFILLED`, `REJECTED`
/// - [`InvalidValue`](crate::PhaserError::InvalidValue) for empty or colliding labels
pub fn override_suffixes(overrides: &IndexMap<String, String>) -> Result<()> {
    let mut global = GLOBAL.write();
    global.override_suffixes(overrides)?;
    tracing::info!(
        pending = %global.suffixes.pending,
        fulfilled = %global.suffixes.fulfilled,
        rejected = %global.suffixes.rejected,
        "Overrode default type suffixes"
    );
    record_override("type_suffixes");
    Ok(())
}

/// As [`override_suffixes`], from a dynamic value; non-objects are type errors.
pub fn override_suffixes_from_value(value: &serde_json::Value) -> Result<()> {
    let mut global = GLOBAL.write();
    global.override_suffixes_from_value(value)?;
    tracing::info!(
        pending = %global.suffixes.pending,
        fulfilled = %global.suffixes.fulfilled,
        rejected = %global.suffixes.rejected,
        "Overrode default type suffixes"
    );
    record_override("type_suffixes");
    Ok(())
}

pub fn default_initial_state_builder() -> InitialStateBuilder {
    GLOBAL.read().policies.initial_state.clone()
}

pub fn default_transition_table_builder() -> TransitionTableBuilder {
    GLOBAL.read().policies.transition_table.clone()
}

pub fn default_action_transformer() -> ActionTransformer {
    GLOBAL.read().policies.action_transformer.clone()
}

pub fn override_default_initial_state_builder(builder: InitialStateBuilder) {
    GLOBAL.write().override_initial_state_builder(builder);
    tracing::info!("Overrode default initial state builder");
    record_override("initial_state");
}

pub fn override_default_transition_table_builder(builder: TransitionTableBuilder) {
    GLOBAL.write().override_transition_table_builder(builder);
    tracing::info!("Overrode default transition table builder");
    record_override("transition_table");
}

pub fn override_default_action_transformer(transformer: ActionTransformer) {
    GLOBAL.write().override_action_transformer(transformer);
    tracing::info!("Overrode default action transformer");
    record_override("action_transformer");
}

/// Guard restoring the global config captured by [`scoped`] when dropped.
#[must_use = "the previous config is restored as soon as the scope is dropped"]
pub struct ConfigScope {
    saved: Option<Config>,
    _exclusive: MutexGuard<'static, ()>,
}

impl Drop for ConfigScope {
    fn drop(&mut self) {
        if let Some(config) = self.saved.take() {
            restore(config);
            tracing::debug!("Restored global config at end of scope");
        }
    }
}

/// Start a section whose global overrides are undone on drop.
///
/// Blocks until no other scope is active. Not reentrant: opening a second
/// scope on the same thread while one is held deadlocks.
///
/// ```
/// # use phaser::config::global;
/// # use indexmap::IndexMap;
/// {
///     let _scope = global::scoped();
///     let overrides = IndexMap::from([("PENDING".to_string(), "LOADING".to_string())]);
///     global::override_suffixes(&overrides).unwrap();
///     assert_eq!(global::suffixes().pending, "LOADING");
/// }
/// assert_eq!(global::suffixes().pending, "PENDING");
/// ```
pub fn scoped() -> ConfigScope {
    let exclusive = SCOPE_LOCK.lock();
    ConfigScope {
        saved: Some(snapshot()),
        _exclusive: exclusive,
    }
}
