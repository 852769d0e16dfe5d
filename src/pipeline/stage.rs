use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::utils::shell_quote_os;

/// Where a stage's standard output goes in the rendered command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Tee(PathBuf),
    Redirect(PathBuf),
    None,
}

/// A stage invocation kept as tool + arguments. The shell string only exists at the edges.
/// Arguments stay `OsString` so output paths reach the tool byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCommand {
    pub tool: String,
    pub args: Vec<OsString>,
    pub sink: Sink,
}

impl StageCommand {
    pub fn new(tool: &str, sink: Sink) -> Self {
        Self { tool: tool.to_string(), args: Vec::new(), sink }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        args.into_iter().fold(self, |cmd, a| cmd.arg(a))
    }

    /// Literal command line, as shown in placeholder files.
    pub fn command_line(&self) -> String {
        let mut line = self.tool.clone();
        for a in &self.args {
            line.push(' ');
            line.push_str(&a.to_string_lossy());
        }
        match &self.sink {
            Sink::Tee(p) => line.push_str(&format!(" | tee {}", p.display())),
            Sink::Redirect(p) => line.push_str(&format!(" > {}", p.display())),
            Sink::None => {}
        }
        line
    }

    /// Quoted invocation handed to `sh -c`. The sink is dropped: the runner writes the
    /// captured stdout to the stage's output file itself.
    pub fn exec_line(&self) -> OsString {
        let mut line = shell_quote_os(OsStr::new(&self.tool));
        for a in &self.args {
            line.push(" ");
            line.push(shell_quote_os(a));
        }
        line
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStage {
    pub name: &'static str,
    pub command: StageCommand,
    pub output: PathBuf,
}

/// Output files of one run, all inside the run directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFiles {
    pub subs: PathBuf,
    pub wayback: PathBuf,
    pub combined: PathBuf,
    pub live: PathBuf,
    pub nuclei: PathBuf,
}

impl StageFiles {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            subs: dir.join("subs.txt"),
            wayback: dir.join("wayback.txt"),
            combined: dir.join("combined_live_targets.txt"),
            live: dir.join("live.txt"),
            nuclei: dir.join("nuclei.txt"),
        }
    }
}

pub const MERGE_COMMAND: &str = "cat subs.txt wayback.txt > combined_live_targets.txt";

pub fn subfinder(target: &str, files: &StageFiles) -> PipelineStage {
    PipelineStage {
        name: "Subfinder",
        command: StageCommand::new("subfinder", Sink::Tee(files.subs.clone())).args(["-d", target, "-silent", "-all"]),
        output: files.subs.clone(),
    }
}

pub fn wayback(target: &str, files: &StageFiles) -> PipelineStage {
    PipelineStage {
        name: "WaybackURLs",
        command: StageCommand::new("waybackurls", Sink::Redirect(files.wayback.clone())).arg(target),
        output: files.wayback.clone(),
    }
}

pub fn httpx(files: &StageFiles) -> PipelineStage {
    PipelineStage {
        name: "HTTPX",
        command: StageCommand::new("httpx", Sink::Tee(files.live.clone()))
            .arg("-l")
            .arg(&files.combined)
            .args(["-silent", "-status-code", "-title", "-follow-redirects"]),
        output: files.live.clone(),
    }
}

pub fn nuclei(files: &StageFiles) -> PipelineStage {
    PipelineStage {
        name: "Nuclei",
        command: StageCommand::new("nuclei", Sink::None)
            .arg("-l")
            .arg(&files.live)
            .args(["-severity", "medium,high,critical", "-o"])
            .arg(&files.nuclei),
        output: files.nuclei.clone(),
    }
}
