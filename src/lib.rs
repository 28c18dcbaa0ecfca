//! Theme Check
//!
//! Runs the external theme analyzer against a theme directory and turns its
//! JSON output into normalized validator records.
//!
//! This library provides:
//! - Request building and option defaults
//! - Analyzer process execution with cancellation
//! - Severity classification of Theme Check lines
//! - Configuration management

pub mod checker;
pub mod config;
pub mod error;
pub mod runner;
pub mod validation;

// Re-exports for clean public API
pub use checker::{ThemeChecker, check};
pub use config::Config;
pub use error::{CheckError, CheckResult};
pub use runner::{AnalyzerCommand, CancelHandle, Cancellation, Launcher, cancellation};
pub use validation::{
    Diagnostic, Options, Severity, ValidationRequest, ValidatorKind, ValidatorRecord,
};
