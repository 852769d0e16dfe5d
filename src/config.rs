use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that must hold [`SENTINEL_VALUE`] to unlock real execution.
pub const SENTINEL_VAR: &str = "GRAY_ALLOWED";
pub const SENTINEL_VALUE: &str = "1";
/// Phrase the operator has to type before real commands run.
pub const CONFIRM_PHRASE: &str = "I_HAVE_WRITTEN_AUTHORITY";
pub const OUTPUT_PREFIX: &str = "gray_recon";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub sentinel_var: String,
    pub sentinel_value: String,
    pub confirm_phrase: String,
    pub output_prefix: String,
    /// Parent of the timestamped run directory. `None` means the current directory.
    pub output_base: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sentinel_var: SENTINEL_VAR.to_string(),
            sentinel_value: SENTINEL_VALUE.to_string(),
            confirm_phrase: CONFIRM_PHRASE.to_string(),
            output_prefix: OUTPUT_PREFIX.to_string(),
            output_base: None,
        }
    }
}

impl Config {
    pub fn with_output_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.output_base = Some(base.into());
        self
    }

    pub fn output_base(&self) -> anyhow::Result<PathBuf> {
        match &self.output_base {
            Some(p) => Ok(p.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}
