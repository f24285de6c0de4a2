//! Lifecycle phases and the labels that name them in action types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{PhaserError, Result};

/// One of the three lifecycle phases of an asynchronous operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Pending,
    Fulfilled,
    Rejected,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Pending, Phase::Fulfilled, Phase::Rejected];

    /// Key naming this phase in a suffix override mapping.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Pending => "PENDING",
            Phase::Fulfilled => "FULFILLED",
            Phase::Rejected => "REJECTED",
        }
    }

    fn allowed_keys() -> String {
        Phase::ALL
            .iter()
            .map(Phase::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = PhaserError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PENDING" => Ok(Phase::Pending),
            "FULFILLED" => Ok(Phase::Fulfilled),
            "REJECTED" => Ok(Phase::Rejected),
            _ => Err(PhaserError::Config(format!(
                "\"{}\" must be in [{}]",
                s,
                Phase::allowed_keys()
            ))),
        }
    }
}

/// Labels appended to an operation name to form its action types.
///
/// Always holds exactly one non-empty label per [`Phase`], and no two phases
/// share a label. Deserializes from `{"PENDING": ..., "FULFILLED": ..., "REJECTED": ...}`;
/// missing keys fall back to the default labels and the result is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "RawTypeSuffixes")]
pub struct TypeSuffixes {
    pub pending: String,
    pub fulfilled: String,
    pub rejected: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "UPPERCASE", deny_unknown_fields, default)]
struct RawTypeSuffixes {
    pending: String,
    fulfilled: String,
    rejected: String,
}

impl Default for RawTypeSuffixes {
    fn default() -> Self {
        let TypeSuffixes {
            pending,
            fulfilled,
            rejected,
        } = TypeSuffixes::default();
        Self {
            pending,
            fulfilled,
            rejected,
        }
    }
}

impl TryFrom<RawTypeSuffixes> for TypeSuffixes {
    type Error = PhaserError;

    fn try_from(raw: RawTypeSuffixes) -> Result<Self> {
        TypeSuffixes::new(raw.pending, raw.fulfilled, raw.rejected)
    }
}

impl Default for TypeSuffixes {
    fn default() -> Self {
        Self {
            pending: "PENDING".to_string(),
            fulfilled: "FULFILLED".to_string(),
            rejected: "REJECTED".to_string(),
        }
    }
}

impl TypeSuffixes {
    /// Build a validated set of labels.
    pub fn new(
        pending: impl Into<String>,
        fulfilled: impl Into<String>,
        rejected: impl Into<String>,
    ) -> Result<Self> {
        let suffixes = Self {
            pending: pending.into(),
            fulfilled: fulfilled.into(),
            rejected: rejected.into(),
        };
        suffixes.validate()?;
        Ok(suffixes)
    }

    pub fn get(&self, phase: Phase) -> &str {
        match phase {
            Phase::Pending => &self.pending,
            Phase::Fulfilled => &self.fulfilled,
            Phase::Rejected => &self.rejected,
        }
    }

    fn slot_mut(&mut self, phase: Phase) -> &mut String {
        match phase {
            Phase::Pending => &mut self.pending,
            Phase::Fulfilled => &mut self.fulfilled,
            Phase::Rejected => &mut self.rejected,
        }
    }

    /// Iterate `(phase, label)` pairs in pending, fulfilled, rejected order.
    pub fn iter(&self) -> impl Iterator<Item = (Phase, &str)> {
        Phase::ALL.into_iter().map(move |phase| (phase, self.get(phase)))
    }

    /// Check the non-empty and pairwise-distinct label invariants.
    pub fn validate(&self) -> Result<()> {
        for (phase, label) in self.iter() {
            if label.is_empty() {
                return Err(PhaserError::InvalidValue(format!(
                    "type suffix for {} cannot be empty",
                    phase
                )));
            }
        }
        if self.pending == self.fulfilled
            || self.pending == self.rejected
            || self.fulfilled == self.rejected
        {
            return Err(PhaserError::InvalidValue(format!(
                "type suffixes must be distinct, got [{},{},{}]",
                self.pending, self.fulfilled, self.rejected
            )));
        }
        Ok(())
    }

    /// Apply a partial override keyed by phase name.
    ///
    /// The mapping must be non-empty and use only `PENDING`, `FULFILLED` and
    /// `REJECTED` as keys; phases it leaves out keep their current label.
    pub fn with_overrides(&self, overrides: &IndexMap<String, String>) -> Result<Self> {
        if overrides.is_empty() {
            return Err(PhaserError::Config(format!(
                "Default types suffixes object must have keys in [{}]",
                Phase::allowed_keys()
            )));
        }

        let mut next = self.clone();
        for (key, label) in overrides {
            let phase: Phase = key.parse()?;
            *next.slot_mut(phase) = label.clone();
        }
        next.validate()?;
        Ok(next)
    }

    /// Apply a partial override from a dynamic JSON value.
    ///
    /// Anything that is not an object of strings fails with
    /// [`PhaserError::InvalidType`] before key validation runs.
    pub fn with_overrides_from_value(&self, value: &serde_json::Value) -> Result<Self> {
        const WHAT: &str = "Default types suffixes";
        let object = value.as_object().ok_or(PhaserError::InvalidType {
            what: WHAT,
            expected: "an object",
        })?;

        let mut overrides = IndexMap::with_capacity(object.len());
        for (key, label) in object {
            let label = label.as_str().ok_or(PhaserError::InvalidType {
                what: "Type suffix labels",
                expected: "strings",
            })?;
            overrides.insert(key.clone(), label.to_string());
        }
        self.with_overrides(&overrides)
    }
}
