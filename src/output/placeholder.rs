use std::path::Path;

use crate::error::{ReconError, Result};

pub const PLACEHOLDER_MARKER: &str = "[PLACEHOLDER]";

/// Body of a placeholder file for a command that was not executed.
pub fn placeholder_text(command: &str) -> String {
    format!(
        "{} Command not executed (SAFE mode).\n\
         Command that would have run:\n\
         {}\n\n\
         To execute real commands: set GRAY_ALLOWED=1, pass --auth file, and type the confirmation phrase.\n",
        PLACEHOLDER_MARKER, command
    )
}

pub async fn write_placeholder(path: &Path, command: &str) -> Result<()> {
    tokio::fs::write(path, placeholder_text(command))
        .await
        .map_err(|e| ReconError::io(path, e))
}

pub fn is_placeholder(content: &str) -> bool {
    content.starts_with(PLACEHOLDER_MARKER)
}
