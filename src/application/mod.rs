//! Application layer - the request pipeline and its collaborators.
//!
//! The pipeline sequences detection, engagement and extraction over the model
//! gateway, with every failure path degrading to a canned reply rather than
//! an error status.

pub mod gateway;
pub mod json_recovery;
pub mod orchestrator;
pub mod prompts;
pub mod stages;

pub use gateway::{GatewayError, ModelGateway};
pub use orchestrator::{PipelineVerdict, ScamPipeline};
pub use stages::StageOutcome;
