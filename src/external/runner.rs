use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{ReconError, Result};

/// Captured result of one shell invocation.
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// `sh` resolved on the parent's `PATH`: a child `PATH` set with `Command::env` is also used
/// to look the program up.
fn shell() -> PathBuf {
    which::which("sh").unwrap_or_else(|_| PathBuf::from("/bin/sh"))
}

/// Run `line` through `sh -c`, waiting for it to exit and capturing both streams.
/// `path` replaces the child's `PATH` when given.
pub async fn run_shell_capture(stage: &str, line: &OsStr, path: Option<&OsString>) -> Result<CapturedOutput> {
    let mut cmd = Command::new(shell());
    cmd.arg("-c")
        .arg(line)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(p) = path {
        cmd.env("PATH", p);
    }

    let out = cmd.output().await.map_err(|source| ReconError::Spawn {
        stage: stage.to_string(),
        source,
    })?;

    Ok(CapturedOutput {
        code: out.status.code(),
        stdout: out.stdout,
        stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
    })
}

/// Run `line` through `sh -c` and report only whether it exited cleanly. Errors are swallowed.
pub async fn run_shell_status(line: &str, path: Option<&OsString>) -> bool {
    let mut cmd = Command::new(shell());
    cmd.arg("-c").arg(line).stdin(Stdio::null());
    if let Some(p) = path {
        cmd.env("PATH", p);
    }
    match cmd.status().await {
        Ok(status) => status.success(),
        Err(e) => {
            tracing::error!(error=%e, command=%line, "failed to spawn shell");
            false
        }
    }
}
