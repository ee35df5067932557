//! Knobs for the few unification operations whose output may grow
//! combinatorially.  Callers usually embed `UnifierConfig` in their own
//! reasoner configuration, hence the serde support.
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid unifier configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnifierConfig {
    /// Upper bound on the number of alternatives produced when
    /// combining multi-unifiers.  0 means no limit.
    pub max_alternatives: usize,
}

impl UnifierConfig {
    pub const DEFAULT_MAX_ALTERNATIVES: usize = 4096;

    /// Returns a configuration without any limit.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_alternatives: 0,
        }
    }

    /// Parses a JSON configuration; absent fields take their default
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `Err` on malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns true iff `count` alternatives are within the limit.
    #[must_use]
    pub fn allows(&self, count: usize) -> bool {
        self.max_alternatives == 0 || count <= self.max_alternatives
    }
}

impl Default for UnifierConfig {
    fn default() -> Self {
        Self {
            max_alternatives: Self::DEFAULT_MAX_ALTERNATIVES,
        }
    }
}

#[test]
fn test_defaults() {
    let config = UnifierConfig::default();

    assert_eq!(config.max_alternatives, 4096);
    assert!(config.allows(4096));
    assert!(!config.allows(4097));
    assert!(UnifierConfig::unlimited().allows(usize::MAX));
}

#[test]
fn test_from_json() {
    assert_eq!(
        UnifierConfig::from_json("{}").expect("ok"),
        UnifierConfig::default()
    );
    assert_eq!(
        UnifierConfig::from_json(r#"{"max_alternatives": 8}"#)
            .expect("ok")
            .max_alternatives,
        8
    );
    assert!(UnifierConfig::from_json(r#"{"max_alternative": 8}"#).is_err());
    assert!(UnifierConfig::from_json("[").is_err());
}
