use tracing::{info, warn};

use crate::external::runner::run_shell_status;
use crate::external::tools::{go_source, ToolLocator};

/// Shell steps used to install `tool`. `go install` for known tools when the Go toolchain
/// is present, the system package manager otherwise.
pub fn install_plan(tool: &str, go_available: bool) -> Vec<String> {
    match go_source(tool) {
        Some(src) if go_available => vec![format!("go install {}", src)],
        _ => vec![
            "sudo apt-get update -y".to_string(),
            format!("sudo apt-get install -y {}", tool),
        ],
    }
}

/// Best-effort installer. Never fails; the return value is the re-checked availability.
pub struct Installer {
    locator: ToolLocator,
}

impl Installer {
    pub fn new(locator: ToolLocator) -> Self {
        Self { locator }
    }

    pub async fn install(&self, tool: &str) -> bool {
        info!(tool, "[installer] Attempting to install");
        let go_available = self.locator.is_available("go");
        if go_source(tool).is_none() || !go_available {
            info!(tool, "[installer] Trying apt-get install");
        }

        let path = self.locator.child_path();
        for step in install_plan(tool, go_available) {
            info!(command = %step, "[installer] Running");
            if !run_shell_status(&step, path.as_ref()).await {
                warn!(tool, command = %step, "[installer] step did not succeed");
            }
        }

        let ok = self.locator.is_available(tool);
        if !ok {
            warn!(tool, "Failed to install");
        }
        ok
    }

    /// Install every tool in `tools` that is not on the search path yet.
    pub async fn install_missing(&self, tools: &[&str]) -> Vec<(String, bool)> {
        let mut results = Vec::new();
        for tool in self.locator.missing(tools) {
            warn!(tool, "Tool missing. Attempting to install.");
            let ok = self.install(tool).await;
            results.push((tool.to_string(), ok));
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_prefers_go_for_known_tools() {
        assert_eq!(
            install_plan("httpx", true),
            vec!["go install github.com/projectdiscovery/httpx/cmd/httpx@latest".to_string()]
        );
    }

    #[test]
    fn test_plan_falls_back_to_apt() {
        let apt = vec!["sudo apt-get update -y".to_string(), "sudo apt-get install -y nuclei".to_string()];
        assert_eq!(install_plan("nuclei", false), apt);
        assert_eq!(install_plan("jq", true)[1], "sudo apt-get install -y jq");
    }

    #[tokio::test]
    async fn test_install_missing_skips_present_tools() {
        let installer = Installer::new(ToolLocator::new());
        assert!(installer.install_missing(&["sh"]).await.is_empty());
    }
}
