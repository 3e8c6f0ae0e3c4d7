//! Label selector the host passes when fetching metrics.
//!
//! A flat set of `key=value` equality requirements. The host uses selectors
//! to address label-partitioned metrics; adapters whose metric has no label
//! dimension accept one and ignore it.

use std::collections::{BTreeMap, HashMap};

use crate::error::ConfigError;

/// Equality-based label requirements, e.g. `app=worker,tier=batch`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector {
    requirements: BTreeMap<String, String>,
}

impl LabelSelector {
    /// A selector with no requirements; matches every label set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list of `key=value` requirements.
    ///
    /// Whitespace around keys and values is trimmed; an empty string parses
    /// to the empty selector. Duplicate keys keep the last value.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let mut requirements = BTreeMap::new();
        for part in input.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (key, value) = part.split_once('=').ok_or_else(|| ConfigError::InvalidValue {
                field: "selector",
                cause: format!("expected key=value, got {part:?}"),
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "selector",
                    cause: format!("empty key in {part:?}"),
                });
            }
            requirements.insert(key.to_string(), value.trim().to_string());
        }
        Ok(Self { requirements })
    }

    /// Whether the given label set satisfies every requirement.
    pub fn matches(&self, labels: &HashMap<String, String>) -> bool {
        self.requirements
            .iter()
            .all(|(key, value)| labels.get(key) == Some(value))
    }

    /// Whether this selector has no requirements.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl std::fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (key, value) in &self.requirements {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{key}={value}")?;
            first = false;
        }
        Ok(())
    }
}
