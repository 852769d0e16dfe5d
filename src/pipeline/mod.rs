pub mod driver;
pub mod executor;
pub mod stage;

pub use driver::{Pipeline, PipelineSummary};
pub use executor::{StageReport, StageRunner};
pub use stage::{PipelineStage, Sink, StageCommand, StageFiles};
