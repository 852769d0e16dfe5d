use crate::gate::RunMode;
use crate::pipeline::PipelineSummary;

fn mode_label(mode: RunMode) -> &'static str {
    match mode {
        RunMode::Real => "real",
        RunMode::Placeholder => "placeholder",
    }
}

/// Human readable summary lines, one per stage.
pub fn summary_lines(summary: &PipelineSummary) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("[*] Target: {}  (mode: {})", summary.target, mode_label(summary.mode)));
    for s in &summary.stages {
        let status = match (s.mode, s.succeeded) {
            (RunMode::Placeholder, _) => "skipped",
            (RunMode::Real, true) => "ok",
            (RunMode::Real, false) => "failed",
        };
        let file = s.output.file_name().map(|f| f.to_string_lossy().into_owned()).unwrap_or_default();
        lines.push(format!("    {:<12} {:<12} {:<8} {}", s.name, mode_label(s.mode), status, file));
    }
    lines
}

pub fn print_summary(summary: &PipelineSummary) {
    println!("\n{}", "-".repeat(60));
    for line in summary_lines(summary) {
        println!("{}", line);
    }
    println!("{}", "-".repeat(60));
    println!("\n[+] Recon completed. Results in: {}", summary.output_dir.display());
}

pub fn summary_json(summary: &PipelineSummary) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}
