//! Validator kinds understood by the analyzer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of an analyzer subsystem
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValidatorKind {
    /// Theme Mentor: structured, kind-specific findings
    ThemeMentor,
    /// Theme Check: line-oriented findings with severity markers
    ThemeCheck,
    /// Any identifier the analyzer reports that we don't know about
    Other(String),
}

impl ValidatorKind {
    pub const THEME_MENTOR: &'static str = "theme-mentor";
    pub const THEME_CHECK: &'static str = "theme-check";

    /// Every kind the analyzer is known to support, in default request order
    pub fn known() -> Vec<ValidatorKind> {
        vec![ValidatorKind::ThemeMentor, ValidatorKind::ThemeCheck]
    }

    pub fn as_str(&self) -> &str {
        match self {
            ValidatorKind::ThemeMentor => Self::THEME_MENTOR,
            ValidatorKind::ThemeCheck => Self::THEME_CHECK,
            ValidatorKind::Other(name) => name,
        }
    }

    /// Whether this kind reports raw lines that need severity classification
    pub fn is_line_oriented(&self) -> bool {
        matches!(self, ValidatorKind::ThemeCheck)
    }
}

impl From<String> for ValidatorKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            Self::THEME_MENTOR => ValidatorKind::ThemeMentor,
            Self::THEME_CHECK => ValidatorKind::ThemeCheck,
            _ => ValidatorKind::Other(name),
        }
    }
}

impl From<ValidatorKind> for String {
    fn from(kind: ValidatorKind) -> Self {
        match kind {
            ValidatorKind::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ValidatorKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ValidatorKind::from(s.to_string()))
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_identifiers() {
        assert_eq!(
            "theme-check".parse::<ValidatorKind>().unwrap(),
            ValidatorKind::ThemeCheck
        );
        assert_eq!(
            "theme-mentor".parse::<ValidatorKind>().unwrap(),
            ValidatorKind::ThemeMentor
        );
        assert!(ValidatorKind::ThemeCheck.is_line_oriented());
        assert!(!ValidatorKind::ThemeMentor.is_line_oriented());
    }

    #[test]
    fn test_unknown_identifier_is_kept() {
        let kind: ValidatorKind = serde_json::from_str("\"plugin-scan\"").expect("deserialize");
        assert_eq!(kind, ValidatorKind::Other("plugin-scan".to_string()));
        assert_eq!(
            serde_json::to_string(&kind).expect("serialize"),
            "\"plugin-scan\""
        );
        assert!(!kind.is_line_oriented());
    }

    #[test]
    fn test_known_kind_serializes_identifier() {
        let json = serde_json::to_string(&ValidatorKind::ThemeMentor).expect("serialize");
        assert_eq!(json, "\"theme-mentor\"");
    }
}
