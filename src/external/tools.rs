use std::ffi::OsString;
use std::path::PathBuf;
use which::{which, which_in};

pub const REQUIRED_TOOLS: [&str; 4] = ["subfinder", "waybackurls", "httpx", "nuclei"];

/// `go install` source for the tools the installer knows how to build.
pub fn go_source(tool: &str) -> Option<&'static str> {
    match tool {
        "subfinder" => Some("github.com/projectdiscovery/subfinder/v2/cmd/subfinder@latest"),
        "httpx" => Some("github.com/projectdiscovery/httpx/cmd/httpx@latest"),
        "waybackurls" => Some("github.com/tomnomnom/waybackurls@latest"),
        "nuclei" => Some("github.com/projectdiscovery/nuclei/v2/cmd/nuclei@latest"),
        _ => None,
    }
}

/// Looks tools up on `PATH`, or only on an explicit search path when one is set.
#[derive(Debug, Clone, Default)]
pub struct ToolLocator {
    search_path: Option<OsString>,
}

impl ToolLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_path(path: impl Into<OsString>) -> Self {
        Self { search_path: Some(path.into()) }
    }

    pub fn locate(&self, tool: &str) -> Option<PathBuf> {
        match &self.search_path {
            Some(p) => {
                let cwd = std::env::current_dir().ok()?;
                which_in(tool, Some(p), cwd).ok()
            }
            None => which(tool).ok(),
        }
    }

    pub fn is_available(&self, tool: &str) -> bool {
        self.locate(tool).is_some()
    }

    /// `PATH` for child processes. Same value [`ToolLocator::locate`] searches, so a tool the
    /// locator cannot see is never picked up by the child either. `None` keeps the inherited one.
    pub fn child_path(&self) -> Option<OsString> {
        self.search_path.clone()
    }

    pub fn missing<'a>(&self, tools: &[&'a str]) -> Vec<&'a str> {
        tools.iter().copied().filter(|t| !self.is_available(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_sources() {
        for t in REQUIRED_TOOLS {
            assert!(go_source(t).is_some(), "{t} should be installable with go");
        }
        assert!(go_source("jq").is_none());
    }

    #[test]
    fn test_empty_search_path_finds_nothing() {
        let dir = std::env::temp_dir().join("gray_fingering_no_tools_here");
        let loc = ToolLocator::with_search_path(dir.into_os_string());
        assert!(!loc.is_available("subfinder"));
        assert_eq!(loc.missing(&REQUIRED_TOOLS).len(), 4);
    }

    #[test]
    fn test_child_path_matches_search_path() {
        assert_eq!(ToolLocator::new().child_path(), None);
        let loc = ToolLocator::with_search_path("/opt/stubs");
        assert_eq!(loc.child_path(), Some(OsString::from("/opt/stubs")));
        // `sh` lives on the inherited PATH, which an explicit search path hides
        assert!(!loc.is_available("sh"));
    }
}
