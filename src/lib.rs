pub mod config;
pub mod error;
pub mod external;
pub mod gate;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod utils;

// re-export types used in tests and by the binary
pub use crate::config::Config;
pub use crate::gate::{AuthGate, ExecutionDecision, RunMode};
pub use crate::pipeline::{Pipeline, PipelineSummary, StageRunner};
