use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::config::Config;
use crate::gate::{ExecutionDecision, RunMode};
use crate::output::merge::merge_targets;
use crate::output::placeholder::write_placeholder;
use crate::pipeline::executor::{StageReport, StageRunner};
use crate::pipeline::stage::{self, StageFiles, MERGE_COMMAND};
use crate::utils::{ensure_dir, run_dir_name};

#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub target: String,
    pub output_dir: PathBuf,
    pub mode: RunMode,
    pub stages: Vec<StageReport>,
}

impl PipelineSummary {
    pub fn succeeded(&self) -> usize {
        self.stages.iter().filter(|s| s.succeeded).count()
    }
}

/// Fixed four-stage recon sequence: subdomains, wayback URLs, live host checks, vulnerability scan.
pub struct Pipeline<'a> {
    target: String,
    config: &'a Config,
    runner: &'a StageRunner,
}

impl<'a> Pipeline<'a> {
    pub fn new(target: impl Into<String>, config: &'a Config, runner: &'a StageRunner) -> Self {
        Self { target: target.into(), config, runner }
    }

    /// Creates a fresh timestamped run directory and runs every stage in order.
    pub async fn run(&self, decision: ExecutionDecision) -> PipelineSummary {
        let outdir = self.prepare_dir(Utc::now());
        info!(dir=%outdir.display(), "Output directory");
        self.run_in(&outdir, decision).await
    }

    /// Run directory under the configured base, or under the system temp dir when the base
    /// is unusable. Stage writes report their own errors if neither can be created.
    fn prepare_dir(&self, now: DateTime<Utc>) -> PathBuf {
        let name = run_dir_name(&self.config.output_prefix, &self.target, now);
        let primary = match self.config.output_base() {
            Ok(base) => base.join(&name),
            Err(e) => {
                error!(error=%e, "cannot resolve output base; using temp dir");
                std::env::temp_dir().join(&name)
            }
        };
        if let Err(e) = ensure_dir(&primary) {
            error!(dir=%primary.display(), error=%e, "cannot create output directory; using temp dir");
            let fallback = std::env::temp_dir().join(&name);
            if let Err(e) = ensure_dir(&fallback) {
                error!(dir=%fallback.display(), error=%e, "cannot create fallback output directory");
            }
            return fallback;
        }
        primary
    }

    /// Runs every stage with outputs inside `outdir`, which must already exist.
    /// Stage failures never stop the sequence.
    pub async fn run_in(&self, outdir: &Path, decision: ExecutionDecision) -> PipelineSummary {
        let files = StageFiles::in_dir(outdir);
        let mut stages = Vec::with_capacity(4);

        stages.push(self.runner.run_or_placeholder(&stage::subfinder(&self.target, &files), decision).await);
        stages.push(self.runner.run_or_placeholder(&stage::wayback(&self.target, &files), decision).await);

        self.combine(&files, decision).await;

        stages.push(self.runner.run_or_placeholder(&stage::httpx(&files), decision).await);
        stages.push(self.runner.run_or_placeholder(&stage::nuclei(&files), decision).await);

        PipelineSummary {
            target: self.target.clone(),
            output_dir: outdir.to_path_buf(),
            mode: decision.mode(),
            stages,
        }
    }

    async fn combine(&self, files: &StageFiles, decision: ExecutionDecision) {
        if let Err(e) = merge_targets(&files.subs, &files.wayback, &files.combined).await {
            error!(error=%e, "Error creating combined live targets file");
            if !decision.execute() {
                if let Err(e) = write_placeholder(&files.combined, MERGE_COMMAND).await {
                    error!(error=%e, "failed to write combined targets placeholder");
                }
            }
        }
    }
}
