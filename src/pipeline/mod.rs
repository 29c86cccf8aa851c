//! Pipeline module for orchestrating terrain synthesis.
//!
//! Provides a trait-based architecture for the terrain passes, one stage
//! per pass, and assembles them into a pipeline per terrain strategy.

mod altitude;
mod bands;
mod continents;
mod craters;
mod hydrate;
mod stage;
mod strategy;
mod upscale;

pub use altitude::{altitude_table, NormalizeStage};
pub use bands::{BandStage, BlurStage};
pub use continents::{GrowStage, SeedStage};
pub use craters::CraterStage;
pub use hydrate::HydrateStage;
pub use stage::{GenerationStage, Pipeline, PipelineError, StageId};
pub use strategy::{build_pipeline, synthesize};
pub use upscale::UpscaleStage;
