//! Analyzer process execution.
//!
//! Spawns the analyzer with the encoded request as its only argument, drains
//! both output pipes, and settles once the child has exited.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tokio::sync::watch;

use crate::error::{CheckError, CheckResult};

const READ_CHUNK: usize = 8 * 1024;

/// Starts the analyzer process for one request
pub trait Launcher: Send + Sync {
    /// Spawn the analyzer with `request` as its final argument.
    ///
    /// The returned child must have piped stdout and stderr.
    fn launch(&self, request: &str) -> std::io::Result<Child>;
}

/// The analyzer command line: a program, optionally a script it should run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerCommand {
    pub program: PathBuf,
    pub script: Option<PathBuf>,
}

impl AnalyzerCommand {
    pub const DEFAULT_PROGRAM: &'static str = "php";
    pub const DEFAULT_SCRIPT: &'static str = "php-scripts/validators/validator.php";

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            script: None,
        }
    }

    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Arguments passed to the program, request last
    pub fn args(&self, request: &str) -> Vec<OsString> {
        let mut args = Vec::with_capacity(2);
        if let Some(script) = &self.script {
            args.push(script.clone().into_os_string());
        }
        args.push(OsString::from(request));
        args
    }
}

impl Default for AnalyzerCommand {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM).with_script(Self::DEFAULT_SCRIPT)
    }
}

impl Launcher for AnalyzerCommand {
    fn launch(&self, request: &str) -> std::io::Result<Child> {
        log::debug!(
            "Spawning analyzer {:?} (script: {:?})",
            self.program,
            self.script
        );

        Command::new(&self.program)
            .args(self.args(request))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
    }
}

/// Triggers cancellation of a running check
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Observed by the runner; fires once the paired handle cancels
#[derive(Debug, Clone)]
pub struct Cancellation {
    rx: watch::Receiver<bool>,
}

impl Cancellation {
    /// A cancellation that never fires
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    async fn cancelled(&mut self) {
        if self.rx.wait_for(|cancelled| *cancelled).await.is_err() {
            // Handle dropped without cancelling
            std::future::pending::<()>().await;
        }
    }
}

/// Create a linked cancel handle and cancellation
pub fn cancellation() -> (CancelHandle, Cancellation) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, Cancellation { rx })
}

/// Run the analyzer for one encoded request and return its stdout.
///
/// The first stderr chunk becomes the failure message, but both pipes are
/// still read to EOF and the child reaped before returning. Exactly one
/// outcome is produced, in this order: cancelled, analyzer error,
/// non-zero exit, stdout.
///
/// An analyzer that writes to stderr and then never closes its pipes keeps
/// this call pending; cancel it through the [`Cancellation`].
pub async fn run<L: Launcher + ?Sized>(
    launcher: &L,
    request: &str,
    mut cancellation: Cancellation,
) -> CheckResult<String> {
    if cancellation.is_cancelled() {
        return Err(CheckError::Cancelled);
    }

    let mut child = launcher.launch(request).map_err(CheckError::Spawn)?;
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("analyzer stdout is not piped"))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("analyzer stderr is not piped"))?;

    let mut output = Vec::new();
    let mut analyzer_error: Option<String> = None;
    let mut out_chunk = vec![0u8; READ_CHUNK];
    let mut err_chunk = vec![0u8; READ_CHUNK];
    let mut out_open = true;
    let mut err_open = true;

    let status = loop {
        tokio::select! {
            read = stdout.read(&mut out_chunk), if out_open => {
                match read? {
                    0 => out_open = false,
                    n => {
                        log::trace!("Analyzer stdout chunk: {} bytes", n);
                        output.extend_from_slice(&out_chunk[..n]);
                    }
                }
            }
            read = stderr.read(&mut err_chunk), if err_open => {
                match read? {
                    0 => err_open = false,
                    n => {
                        let text = String::from_utf8_lossy(&err_chunk[..n]).into_owned();
                        log::warn!("Analyzer wrote to stderr: {}", text.trim_end());
                        analyzer_error.get_or_insert(text);
                    }
                }
            }
            status = child.wait(), if !out_open && !err_open => break status?,
            _ = cancellation.cancelled() => {
                log::info!("Cancelling analyzer run");
                child.kill().await?;
                return Err(CheckError::Cancelled);
            }
        }
    };

    log::debug!(
        "Analyzer exited with {} after writing {} bytes",
        status,
        output.len()
    );

    if let Some(message) = analyzer_error {
        return Err(CheckError::Analyzer(message));
    }
    if !status.success() {
        return Err(CheckError::NonZeroExit {
            code: status.code(),
        });
    }

    Ok(String::from_utf8_lossy(&output).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_line() {
        let command = AnalyzerCommand::default();
        assert_eq!(command.program, PathBuf::from("php"));
        assert_eq!(
            command.args("{}"),
            vec![
                OsString::from("php-scripts/validators/validator.php"),
                OsString::from("{}")
            ]
        );
    }

    #[test]
    fn test_request_is_a_single_argument() {
        let command = AnalyzerCommand::new("analyzer");
        let request = r#"{"path": "my theme", "excludes": []}"#;
        assert_eq!(command.args(request), vec![OsString::from(request)]);
    }

    #[test]
    fn test_cancellation_flag() {
        let (handle, cancellation) = cancellation();
        assert!(!cancellation.is_cancelled());
        handle.cancel();
        assert!(cancellation.is_cancelled());
        assert!(!Cancellation::never().is_cancelled());
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let command = AnalyzerCommand::new("/nonexistent/theme-check-analyzer");
        let err = run(&command, "{}", Cancellation::never()).await.unwrap_err();
        assert!(matches!(err, CheckError::Spawn(_)));
    }

    #[tokio::test]
    async fn test_pre_cancelled_run_does_not_spawn() {
        let (handle, cancellation) = cancellation();
        handle.cancel();

        let command = AnalyzerCommand::new("/nonexistent/theme-check-analyzer");
        let err = run(&command, "{}", cancellation).await.unwrap_err();
        assert!(matches!(err, CheckError::Cancelled));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_echo_request() {
        let command = AnalyzerCommand::new("echo");
        let output = run(&command, "[]", Cancellation::never())
            .await
            .expect("run echo");
        assert_eq!(output.trim_end(), "[]");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_false_is_non_zero_exit() {
        let command = AnalyzerCommand::new("false");
        let err = run(&command, "{}", Cancellation::never()).await.unwrap_err();
        assert!(matches!(err, CheckError::NonZeroExit { code: Some(1) }));
    }
}
