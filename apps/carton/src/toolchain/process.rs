//! External process execution.
//!
//! Runs a program to completion, capturing stdout and stderr. A non-zero
//! exit status becomes [`CartonError::ExternalProcessFailure`] carrying the
//! captured output.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::errors::{CartonError, Result};

/// Looks up `program` in `PATH`.
///
/// # Errors
///
/// Returns [`CartonError::ExternalProcessFailure`] when the program is not
/// installed.
pub fn require_program(program: &str) -> Result<std::path::PathBuf> {
    which::which(program)
        .map_err(|e| CartonError::external_process(program, None, format!("not found in PATH: {e}")))
}

/// Runs `program` with `args` and returns its captured stdout.
///
/// # Errors
///
/// Returns [`CartonError::ExternalProcessFailure`] if the process cannot be
/// spawned or exits unsuccessfully.
pub async fn run_captured<I, S>(program: &Path, args: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<_> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
    let command_line = render_command_line(program, &args);
    debug!(command = %command_line, "running external process");

    let output = Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| CartonError::external_process(&command_line, None, e.to_string()))?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    if output.status.success() {
        Ok(stdout)
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = format!("{stdout}{stderr}").trim().to_string();
        Err(CartonError::external_process(
            command_line,
            output.status.code(),
            combined,
        ))
    }
}

fn render_command_line(program: &Path, args: &[std::ffi::OsString]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().map(std::ffi::OsString::as_os_str))
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
