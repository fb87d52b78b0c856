//! Pipeline module for orchestrating world generation stages.
//!
//! Provides a trait-based architecture for modular generation stages
//! that can be composed into a complete world generation pipeline.

mod stage;
mod world;

pub use stage::{
    generate_world, AtmosphereStage, BiosphereStage, GenerationStage, HydrosphereStage,
    LithosphereStage, Pipeline, PipelineError, StageId,
};
pub use world::{World, WorldConfig};
