// External command runner. Stdout is captured even on non-zero exit,
// since tools like `systemctl is-active` report through both.

use crate::error::ProbeError;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub status: String,
    /// Trimmed stdout.
    pub stdout: String,
}

pub async fn run<S: AsRef<str>>(program: &str, args: &[S]) -> Result<CommandOutput, ProbeError> {
    let output = Command::new(program)
        .args(args.iter().map(|a| a.as_ref()))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .await
        .map_err(|source| ProbeError::Spawn {
            program: program.to_string(),
            source,
        })?;

    Ok(CommandOutput {
        success: output.status.success(),
        status: output.status.to_string(),
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
    })
}
