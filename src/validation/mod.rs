//! Validation Model
//!
//! Request building, severity classification and normalization of analyzer
//! output. Nothing in here touches a process.

pub mod kind;
pub mod normalize;
pub mod request;
pub mod severity;

pub use kind::ValidatorKind;
pub use normalize::{Diagnostic, DiagnosticGroup, ValidatorRecord, normalize};
pub use request::{OptionOverrides, Options, ValidationRequest};
pub use severity::{Severity, classify};
