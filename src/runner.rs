use std::process::ExitCode;
use std::sync::Arc;

use gray_fingering::external::{Installer, ToolLocator, REQUIRED_TOOLS};
use gray_fingering::output::{print_summary, summary_json};
use gray_fingering::progress::{NoProgress, ProgressReporter, SpinnerProgress};
use gray_fingering::utils::looks_like_hostname;
use gray_fingering::{AuthGate, Config, Pipeline, StageRunner};

use crate::cli::Cli;

fn print_banner() {
    println!(r#"
   ____                   _____ _                       _
  / ___|_ __ __ _ _   _  |  ___(_)_ __   __ _  ___ _ __(_)_ __   __ _
 | |  _| '__/ _` | | | | | |_  | | '_ \ / _` |/ _ \ '__| | '_ \ / _` |
 | |_| | | | (_| | |_| | |  _| | | | | | (_| |  __/ |  | | | | | (_| |
  \____|_|  \__,_|\__, | |_|   |_|_| |_|\__, |\___|_|  |_|_| |_|\__, |
                  |___/                 |___/                   |___/
        Guarded Recon Orchestrator (SAFE by default)
    "#);
}

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<ExitCode> {
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug { "debug" } else if cli.verbose { "info" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gray_fingering={}", crate_level)));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .init();

    if !cli.json {
        print_banner();
    }

    if !cli.all {
        tracing::error!("Use --all to run the full pipeline. Exiting.");
        eprintln!("[!] Use --all to run the full pipeline. Exiting.");
        return Ok(ExitCode::FAILURE);
    }

    if !looks_like_hostname(&cli.target) {
        tracing::warn!(domain = %cli.target, "target does not look like a hostname; using it verbatim");
    }
    tracing::info!(domain = %cli.target, threads = cli.threads, "threads value accepted; stages run sequentially");

    let mut config = Config::default();
    if let Some(out) = &cli.out {
        config = config.with_output_base(out);
    }

    let gate = AuthGate::from_env(&config, &cli.auth);
    let decision = gate.decide_interactive().await;

    // Ctrl-C past the prompt aborts the whole run
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n[!] Interrupted. Exiting.");
            std::process::exit(130);
        }
    });

    let progress: Arc<dyn ProgressReporter> = if cli.json {
        Arc::new(NoProgress)
    } else {
        Arc::new(SpinnerProgress::new())
    };
    let runner = StageRunner::new(ToolLocator::new(), progress);

    if decision.execute() && cli.try_install {
        let installer = Installer::new(runner.locator().clone());
        for (tool, ok) in installer.install_missing(&REQUIRED_TOOLS).await {
            tracing::info!(tool = %tool, installed = ok, "install attempt finished");
        }
    }

    let summary = Pipeline::new(cli.target.clone(), &config, &runner)
        .run(decision)
        .await;

    if cli.json {
        println!("{}", summary_json(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(ExitCode::SUCCESS)
}
