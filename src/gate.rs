//! Authorization gate.
//!
//! Real execution needs three signals: the sentinel environment variable, a readable
//! authorization file, and the confirmation phrase typed by the operator. The phrase is only
//! asked for once the first two hold. The result is a single [`ExecutionDecision`] that is
//! computed once and then passed by value through the pipeline.

use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Real,
    Placeholder,
}

/// All-or-nothing switch between real and placeholder mode for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionDecision {
    execute: bool,
}

impl ExecutionDecision {
    pub const fn new(execute: bool) -> Self {
        Self { execute }
    }

    pub const fn dry_run() -> Self {
        Self::new(false)
    }

    pub const fn execute(self) -> bool {
        self.execute
    }

    pub const fn mode(self) -> RunMode {
        if self.execute { RunMode::Real } else { RunMode::Placeholder }
    }
}

/// Source of the interactive confirmation.
pub trait Confirm {
    /// Returns the operator's answer, or `None` on end-of-input or interrupt.
    fn ask(&mut self, phrase: &str) -> Option<String>;
}

/// Prompts on a writer and reads one line from a reader (stdin/stdout in the binary).
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    fn ask(&mut self, phrase: &str) -> Option<String> {
        let _ = writeln!(self.output, "Type the confirmation phrase to execute real commands:");
        let _ = writeln!(self.output, "  {}", phrase);
        let _ = write!(self.output, "> ");
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

pub struct AuthGate {
    env_value: Option<String>,
    expected: String,
    auth_path: PathBuf,
    phrase: String,
    var_name: String,
}

impl AuthGate {
    /// Builds a gate from the process environment.
    pub fn from_env(config: &Config, auth_path: impl Into<PathBuf>) -> Self {
        let env_value = std::env::var(&config.sentinel_var).ok();
        Self::with_env_value(config, env_value, auth_path)
    }

    /// Builds a gate from an explicit sentinel value instead of reading the environment.
    pub fn with_env_value(config: &Config, env_value: Option<String>, auth_path: impl Into<PathBuf>) -> Self {
        Self {
            env_value,
            expected: config.sentinel_value.clone(),
            auth_path: auth_path.into(),
            phrase: config.confirm_phrase.clone(),
            var_name: config.sentinel_var.clone(),
        }
    }

    pub fn env_allowed(&self) -> bool {
        self.env_value.as_deref() == Some(self.expected.as_str())
    }

    pub fn auth_readable(&self) -> bool {
        auth_file_readable(&self.auth_path)
    }

    /// Environment and auth-file checks. The confirmation phrase is only asked when both hold.
    pub fn preconditions_met(&self) -> bool {
        let env_ok = self.env_allowed();
        let auth_ok = self.auth_readable();

        if !env_ok {
            warn!(var = %self.var_name, "Environment variable not set. Running in SAFE mode.");
        }
        if !auth_ok {
            warn!(path = %self.auth_path.display(), "Auth file missing or unreadable. Running in SAFE mode.");
        }
        env_ok && auth_ok
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Maps the operator's answer to a decision. `None` covers end-of-input and interrupts.
    pub fn confirm(&self, answer: Option<String>) -> ExecutionDecision {
        match answer {
            Some(answer) if answer == self.phrase => {
                info!("Confirmation accepted. Execution ENABLED.");
                ExecutionDecision::new(true)
            }
            Some(_) => {
                warn!("Confirmation phrase incorrect. Running in SAFE mode.");
                ExecutionDecision::dry_run()
            }
            None => {
                warn!("No confirmation received. Running in SAFE mode.");
                ExecutionDecision::dry_run()
            }
        }
    }

    pub fn decide(&self, prompt: &mut dyn Confirm) -> ExecutionDecision {
        if !self.preconditions_met() {
            return ExecutionDecision::dry_run();
        }
        self.confirm(prompt.ask(&self.phrase))
    }

    /// Like [`AuthGate::decide`] but reads stdin on a detached thread so Ctrl-C at the prompt
    /// resolves to "not confirmed" instead of killing the process.
    pub async fn decide_interactive(&self) -> ExecutionDecision {
        if !self.preconditions_met() {
            return ExecutionDecision::dry_run();
        }
        self.confirm(ask_stdin_interruptible(&self.phrase).await)
    }
}

#[cfg(unix)]
fn interrupt_listener() -> impl std::future::Future<Output = ()> {
    use tokio::signal::unix::{signal, SignalKind};
    // registered here, before the prompt is shown
    let sig = signal(SignalKind::interrupt());
    async move {
        match sig {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(not(unix))]
fn interrupt_listener() -> impl std::future::Future<Output = ()> {
    async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

async fn ask_stdin_interruptible(phrase: &str) -> Option<String> {
    let interrupted = interrupt_listener();

    let mut err = std::io::stderr();
    let _ = writeln!(err, "Type the confirmation phrase to execute real commands:");
    let _ = writeln!(err, "  {}", phrase);
    let _ = write!(err, "> ");
    let _ = err.flush();

    // detached thread: a spawn_blocking read still pending would hold up runtime shutdown
    let (tx, rx) = tokio::sync::oneshot::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        let answer = match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        };
        let _ = tx.send(answer);
    });

    tokio::select! {
        answer = rx => answer.ok().flatten(),
        _ = interrupted => {
            eprintln!();
            warn!("Interrupted at confirmation prompt.");
            None
        }
    }
}

pub fn auth_file_readable(path: &Path) -> bool {
    path.is_file() && File::open(path).is_ok()
}
