use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::ReconError;
use crate::external::runner::run_shell_capture;
use crate::external::ToolLocator;
use crate::gate::{ExecutionDecision, RunMode};
use crate::output::placeholder::write_placeholder;
use crate::pipeline::stage::PipelineStage;
use crate::progress::{NoProgress, ProgressReporter};

/// Outcome of one stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
    pub name: String,
    pub output: PathBuf,
    pub mode: RunMode,
    pub succeeded: bool,
}

/// Runs a stage for real or writes its placeholder.
pub struct StageRunner {
    locator: ToolLocator,
    progress: Arc<dyn ProgressReporter>,
}

impl Default for StageRunner {
    fn default() -> Self {
        Self::new(ToolLocator::new(), Arc::new(NoProgress))
    }
}

impl StageRunner {
    pub fn new(locator: ToolLocator, progress: Arc<dyn ProgressReporter>) -> Self {
        Self { locator, progress }
    }

    pub fn locator(&self) -> &ToolLocator {
        &self.locator
    }

    /// `succeeded` is only true when the real command ran and exited with 0.
    /// Placeholder mode, a missing tool and a failing command all report false.
    pub async fn run_or_placeholder(&self, stage: &PipelineStage, decision: ExecutionDecision) -> StageReport {
        let command = stage.command.command_line();

        if !decision.execute() {
            info!("[{}] SAFE mode - writing placeholder", stage.name);
            return self.placeholder(stage, &command).await;
        }

        if !self.locator.is_available(&stage.command.tool) {
            warn!("[{}] Tool '{}' not found; writing placeholder.", stage.name, stage.command.tool);
            return self.placeholder(stage, &command).await;
        }

        let succeeded = match self.execute(stage).await {
            Ok(()) => true,
            Err(ReconError::NonZeroExit { stage: name, code, stderr }) => {
                eprintln!("\n[!] {} failed with return code {}", name, code);
                eprintln!("[!] stderr:\n{}", stderr);
                error!(stage = %name, code, "stage failed");
                false
            }
            Err(e) => {
                eprintln!("[!] Exception running {}: {}", stage.name, e);
                error!(stage = stage.name, error = %e, "stage errored");
                false
            }
        };

        StageReport {
            name: stage.name.to_string(),
            output: stage.output.clone(),
            mode: RunMode::Real,
            succeeded,
        }
    }

    async fn execute(&self, stage: &PipelineStage) -> crate::error::Result<()> {
        let line = stage.command.exec_line();
        info!(stage = stage.name, command = %line.to_string_lossy(), "running");

        self.progress.start(stage.name);
        let result = run_shell_capture(stage.name, &line, self.locator.child_path().as_ref()).await;
        let ok = matches!(&result, Ok(out) if out.success());
        self.progress.stop(stage.name, ok);

        let out = result?;
        if !out.success() {
            return Err(ReconError::NonZeroExit {
                stage: stage.name.to_string(),
                code: out.code.unwrap_or(-1),
                stderr: out.stderr,
            });
        }
        tokio::fs::write(&stage.output, &out.stdout)
            .await
            .map_err(|e| ReconError::io(&stage.output, e))
    }

    async fn placeholder(&self, stage: &PipelineStage, command: &str) -> StageReport {
        if let Err(e) = write_placeholder(&stage.output, command).await {
            error!(stage = stage.name, error = %e, "failed to write placeholder");
        }
        StageReport {
            name: stage.name.to_string(),
            output: stage.output.clone(),
            mode: RunMode::Placeholder,
            succeeded: false,
        }
    }
}
