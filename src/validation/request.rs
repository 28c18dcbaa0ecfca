//! Request Builder
//!
//! Merges caller options over defaults and builds the JSON request handed to
//! the analyzer.

use serde::{Deserialize, Serialize};

use crate::error::{CheckError, CheckResult};
use crate::validation::kind::ValidatorKind;

/// Options for a theme check run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Analyzer subsystems to run
    pub validator: Vec<ValidatorKind>,
    /// Pretty-print output. Not used by the pipeline itself.
    pub prettify: bool,
    /// Report warnings. Not used by the pipeline itself.
    pub warning: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            validator: ValidatorKind::known(),
            prettify: false,
            warning: true,
        }
    }
}

/// Caller-supplied options; unset fields keep their defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OptionOverrides {
    pub validator: Option<Vec<ValidatorKind>>,
    pub prettify: Option<bool>,
    pub warning: Option<bool>,
}

impl OptionOverrides {
    /// Layer `other` on top of `self`, field by field
    pub fn or(self, other: OptionOverrides) -> OptionOverrides {
        OptionOverrides {
            validator: other.validator.or(self.validator),
            prettify: other.prettify.or(self.prettify),
            warning: other.warning.or(self.warning),
        }
    }
}

impl Options {
    /// Shallow merge: a supplied field replaces the default outright
    pub fn merged(overrides: OptionOverrides) -> Self {
        let defaults = Self::default();
        Self {
            validator: overrides.validator.unwrap_or(defaults.validator),
            prettify: overrides.prettify.unwrap_or(defaults.prettify),
            warning: overrides.warning.unwrap_or(defaults.warning),
        }
    }

    pub fn with_validator(mut self, validator: Vec<ValidatorKind>) -> Self {
        self.validator = validator;
        self
    }
}

/// The request the analyzer receives as its only argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub path: String,
    pub excludes: Vec<String>,
    pub validator: Vec<ValidatorKind>,
}

impl ValidationRequest {
    pub fn build(path: impl Into<String>, options: &Options) -> Self {
        let mut validator: Vec<ValidatorKind> = Vec::with_capacity(options.validator.len());
        for kind in &options.validator {
            if !validator.contains(kind) {
                validator.push(kind.clone());
            }
        }

        Self {
            path: path.into(),
            excludes: Vec::new(),
            validator,
        }
    }

    /// Serialize to the JSON transport form
    pub fn encode(&self) -> CheckResult<String> {
        serde_json::to_string(self).map_err(CheckError::Encode)
    }
}
