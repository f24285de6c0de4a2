//! Combining rules into a single reducer.

use metrics::counter;

use crate::compile::{CompiledReducer, DEFAULT_DELIMITER, compile};
use crate::error::Result;
use crate::rule::{Rule, RuleOutput};

/// An ordered collection of rules merged into one reducer.
///
/// Order matters: when two rules produce the same state field or the same
/// top-level transition key, the rule later in the list wins.
#[derive(Debug, Clone)]
pub struct Generator {
    rules: Vec<Rule>,
    delimiter: String,
}

impl Generator {
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }

    /// Delimiter joining tree path segments into action types.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Generate every rule in order and merge the outputs.
    ///
    /// Both the initial state and the transition tree are merged shallowly,
    /// left to right. A colliding operation name takes the later rule's whole
    /// sub-tree.
    pub fn merge(&self) -> Result<RuleOutput> {
        let mut merged = RuleOutput::default();
        for rule in &self.rules {
            let RuleOutput {
                initial_state,
                transitions,
            } = rule.generate()?;

            for key in transitions.keys() {
                if merged.transitions.contains_key(key) {
                    tracing::debug!(
                        rule = %rule.name(),
                        key,
                        "Later rule replaces transitions of an earlier one"
                    );
                }
            }

            merged.initial_state.extend(initial_state);
            merged.transitions.merge(transitions);
        }
        Ok(merged)
    }

    /// Merge all rules and compile them into one reducer.
    ///
    /// Every call rebuilds from the rules' current policies.
    pub fn generate(&self) -> Result<CompiledReducer> {
        let RuleOutput {
            initial_state,
            transitions,
        } = self.merge()?;

        let reducer = compile(&transitions, initial_state, &self.delimiter);
        tracing::debug!(
            rules = self.rules.len(),
            fields = reducer.initial_state().len(),
            dispatch_keys = reducer.dispatch_keys().count(),
            "Generated reducer"
        );
        counter!("phaser_reducers_generated_total").increment(1);
        Ok(reducer)
    }
}

impl FromIterator<Rule> for Generator {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Generator::new(iter)
    }
}
