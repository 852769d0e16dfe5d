pub mod installer;
pub mod runner;
pub mod tools;

pub use installer::Installer;
pub use tools::{ToolLocator, REQUIRED_TOOLS};
