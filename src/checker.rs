//! Theme Checker
//!
//! The full pipeline: path check, request, analyzer run, normalization.

use std::path::{Path, PathBuf};

use crate::error::{CheckError, CheckResult};
use crate::runner::{self, AnalyzerCommand, Cancellation, Launcher};
use crate::validation::{Options, ValidationRequest, ValidatorRecord, normalize};

/// Runs theme checks through a [`Launcher`]
#[derive(Debug, Clone, Default)]
pub struct ThemeChecker<L = AnalyzerCommand> {
    launcher: L,
}

impl<L: Launcher> ThemeChecker<L> {
    pub fn new(launcher: L) -> Self {
        Self { launcher }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Check a theme directory
    pub async fn check(
        &self,
        dir: impl AsRef<Path>,
        options: &Options,
    ) -> CheckResult<Vec<ValidatorRecord>> {
        self.check_with_cancellation(dir, options, Cancellation::never())
            .await
    }

    /// Check a theme directory, stopping early if `cancellation` fires
    pub async fn check_with_cancellation(
        &self,
        dir: impl AsRef<Path>,
        options: &Options,
        cancellation: Cancellation,
    ) -> CheckResult<Vec<ValidatorRecord>> {
        let dir = dir.as_ref();
        let path = theme_path(dir)?;

        let request = ValidationRequest::build(path, options).encode()?;
        log::info!("Checking theme at {}", dir.display());

        let output = runner::run(&self.launcher, &request, cancellation).await?;
        normalize(&output)
    }
}

/// Check a theme directory with the default analyzer command
pub async fn check(
    dir: impl AsRef<Path>,
    options: &Options,
) -> CheckResult<Vec<ValidatorRecord>> {
    ThemeChecker::new(AnalyzerCommand::default())
        .check(dir, options)
        .await
}

fn theme_path(dir: &Path) -> CheckResult<&str> {
    if !dir.is_dir() {
        return Err(CheckError::InvalidPath(dir.to_path_buf()));
    }
    dir.to_str()
        .ok_or_else(|| CheckError::InvalidPath(PathBuf::from(dir)))
}
