//! Result Normalizer
//!
//! Turns the analyzer's JSON response into typed records. Theme Check lines
//! become `{type, message}` diagnostics; every other kind passes through.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CheckError, CheckResult};
use crate::validation::kind::ValidatorKind;
use crate::validation::severity::{Severity, classify};

/// A diagnostic produced from one raw Theme Check line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic from a raw line.
    ///
    /// The message drops everything up to the first `:` and joins the
    /// remaining fields without a separator, so later colons disappear too.
    pub fn from_line(line: &str) -> Self {
        Self {
            severity: classify(line),
            message: line.split(':').skip(1).collect(),
        }
    }
}

/// One group of Theme Check diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticGroup {
    pub items: Vec<Diagnostic>,
    /// Other fields the analyzer attached to the group, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    items: Vec<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    name: ValidatorKind,
    result: Vec<RawGroup>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// The findings of one validator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidatorRecord {
    /// Line-oriented findings, classified by severity
    Lines {
        name: ValidatorKind,
        result: Vec<DiagnosticGroup>,
        /// Other fields the analyzer attached to the record, kept as-is
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    /// Any other record, exactly as the analyzer emitted it
    Opaque(Value),
}

impl ValidatorRecord {
    /// The record's validator name, if it carries a string `name`
    pub fn name(&self) -> Option<&str> {
        match self {
            ValidatorRecord::Lines { name, .. } => Some(name.as_str()),
            ValidatorRecord::Opaque(value) => value.get("name").and_then(Value::as_str),
        }
    }

    /// All classified diagnostics in this record; empty for opaque records
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        let groups: &[DiagnosticGroup] = match self {
            ValidatorRecord::Lines { result, .. } => result,
            ValidatorRecord::Opaque(_) => &[],
        };
        groups.iter().flat_map(|group| group.items.iter())
    }

    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let line_oriented = value
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|name| ValidatorKind::from(name.to_string()).is_line_oriented());
        if !line_oriented {
            return Ok(ValidatorRecord::Opaque(value));
        }

        let raw: RawRecord = serde_json::from_value(value)?;
        let result = raw
            .result
            .into_iter()
            .map(|group| DiagnosticGroup {
                items: group
                    .items
                    .iter()
                    .map(|line| Diagnostic::from_line(line))
                    .collect(),
                extra: group.extra,
            })
            .collect();

        Ok(ValidatorRecord::Lines {
            name: raw.name,
            result,
            extra: raw.extra,
        })
    }
}

/// Parse and normalize the analyzer's full stdout
pub fn normalize(raw_output: &str) -> CheckResult<Vec<ValidatorRecord>> {
    let raw: Vec<Value> =
        serde_json::from_str(raw_output).map_err(CheckError::MalformedOutput)?;

    let records = raw
        .into_iter()
        .map(ValidatorRecord::from_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(CheckError::MalformedOutput)?;

    log::debug!("Normalized {} validator record(s)", records.len());
    Ok(records)
}
