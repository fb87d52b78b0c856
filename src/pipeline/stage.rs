//! Generation stage trait and pipeline orchestration.

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use super::world::{World, WorldConfig};
use crate::biomes::classify_biosphere;
use crate::climate::AtmosphereGenerator;
use crate::hydrosphere::HydrosphereGenerator;
use crate::tectonics::PlateFieldGenerator;
use crate::terrain::LithosphereGenerator;

/// Per-stage offsets added to the master seed, so each stage draws from an
/// independent random stream.
const LITHOSPHERE_SALT: u64 = 0x11;
const HYDROSPHERE_SALT: u64 = 0x22;
const ATMOSPHERE_SALT: u64 = 0x33;

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Plates, crust layers and the classified height field.
    Lithosphere,
    /// Rivers, erosion, water proximity and precipitation.
    Hydrosphere,
    /// Wind and temperature.
    Atmosphere,
    /// Holdridge life zones.
    Biosphere,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Lithosphere => "lithosphere",
            StageId::Hydrosphere => "hydrosphere",
            StageId::Atmosphere => "atmosphere",
            StageId::Biosphere => "biosphere",
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Stage '{0}' failed: {1}")]
    StageFailed(String, String),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
    #[error("Stage '{stage}' is missing its {input} input")]
    MissingInput { stage: String, input: &'static str },
}

impl PipelineError {
    fn failed(stage: StageId, reason: &str) -> Self {
        PipelineError::StageFailed(stage.name().to_string(), reason.to_string())
    }

    fn missing(stage: StageId, input: &'static str) -> Self {
        PipelineError::MissingInput {
            stage: stage.name().to_string(),
            input,
        }
    }
}

/// Trait for implementing generation stages.
///
/// Each stage adds one layer to the world, building upon the layers of
/// previous stages.
pub trait GenerationStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the generation stage, adding its layer to `world`.
    fn execute(&self, world: &mut World, config: &WorldConfig) -> Result<(), PipelineError>;
}

/// Orchestrates multiple generation stages into a complete pipeline.
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
    config: WorldConfig,
}

impl Pipeline {
    /// Creates a new empty pipeline with the given configuration.
    pub fn new(config: WorldConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// All four stages in dependency order.
    pub fn standard(config: &WorldConfig) -> Self {
        let mut pipeline = Self::new(config.clone());
        pipeline
            .add_stage(LithosphereStage)
            .add_stage(HydrosphereStage)
            .add_stage(AtmosphereStage)
            .add_stage(BiosphereStage);
        pipeline
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GenerationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Executes all stages in order on the given world.
    pub fn run(&self, world: &mut World) -> Result<(), PipelineError> {
        self.run_with_callbacks(world, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `world` - The world to generate
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        world: &mut World,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);

            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            info!("[{}/{}] {}", i + 1, total, stage.name());
            stage.execute(world, &self.config)?;
            completed.push(stage.id());
            info!("{} complete", stage.name());

            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }
}

/// Runs the standard pipeline on a fresh world.
pub fn generate_world(config: &WorldConfig) -> Result<World, PipelineError> {
    let mut world = World::new(config);
    Pipeline::standard(config).run(&mut world)?;
    Ok(world)
}

fn stage_rng(seed: u64, salt: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.wrapping_add(salt))
}

/// Plate growth, crust layers and height classification.
pub struct LithosphereStage;

impl GenerationStage for LithosphereStage {
    fn id(&self) -> StageId {
        StageId::Lithosphere
    }

    fn name(&self) -> &str {
        "Lithosphere Generation"
    }

    fn execute(&self, world: &mut World, config: &WorldConfig) -> Result<(), PipelineError> {
        let mut rng = stage_rng(world.seed, LITHOSPHERE_SALT);
        let (w, h) = world.dimensions();

        let lithosphere = LithosphereGenerator::new(w, h)
            .with_tectonics(PlateFieldGenerator::new(config.plates.clone()))
            .with_thickness(config.thickness.clone())
            .with_orogenic(config.orogenic.clone())
            .generate(&mut rng)
            .ok_or_else(|| PipelineError::failed(self.id(), "layer generation failed"))?;

        let height = lithosphere
            .height_field(&config.terrain)
            .ok_or_else(|| PipelineError::failed(self.id(), "crust layers differ in size"))?;
        debug!("height range {:.3}..{:.3}", height.min(), height.max());

        world.lithosphere = Some(lithosphere);
        world.height_field = Some(height);
        Ok(())
    }
}

/// River growth with erosion, water proximity and precipitation.
pub struct HydrosphereStage;

impl GenerationStage for HydrosphereStage {
    fn id(&self) -> StageId {
        StageId::Hydrosphere
    }

    fn name(&self) -> &str {
        "Hydrosphere Generation"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Lithosphere]
    }

    fn execute(&self, world: &mut World, config: &WorldConfig) -> Result<(), PipelineError> {
        let mut rng = stage_rng(world.seed, HYDROSPHERE_SALT);
        let height = world
            .height_field
            .as_mut()
            .ok_or_else(|| PipelineError::missing(StageId::Hydrosphere, "height"))?;

        let hydrosphere = HydrosphereGenerator::new(config.hydrosphere_config())
            .with_cloud(config.cloud.clone())
            .with_source_modifier(config.source_modifier.clone())
            .with_equator(config.equator)
            .generate(height, &mut rng)
            .ok_or_else(|| PipelineError::failed(self.id(), "water layers could not be built"))?;

        let rivers = hydrosphere.rivers();
        debug!(
            "{} rivers, {} reach water",
            rivers.len(),
            rivers.rivers().iter().filter(|r| r.reaches_water()).count()
        );

        world.hydrosphere = Some(hydrosphere);
        Ok(())
    }
}

/// Wind and temperature over the eroded height field.
pub struct AtmosphereStage;

impl GenerationStage for AtmosphereStage {
    fn id(&self) -> StageId {
        StageId::Atmosphere
    }

    fn name(&self) -> &str {
        "Atmosphere Generation"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Hydrosphere]
    }

    fn execute(&self, world: &mut World, config: &WorldConfig) -> Result<(), PipelineError> {
        let mut rng = stage_rng(world.seed, ATMOSPHERE_SALT);
        let height = world
            .height_field
            .as_ref()
            .ok_or_else(|| PipelineError::missing(self.id(), "height"))?;
        let equator = world
            .hydrosphere
            .as_ref()
            .map(|h| h.equator())
            .ok_or_else(|| PipelineError::missing(self.id(), "equator"))?;

        let atmosphere = AtmosphereGenerator::new(config.climate_config())
            .with_wind(config.wind.clone())
            .generate(height, equator, &mut rng)
            .ok_or_else(|| PipelineError::failed(self.id(), "temperature could not be composed"))?;

        world.atmosphere = Some(atmosphere);
        Ok(())
    }
}

/// Holdridge classification of every land cell.
pub struct BiosphereStage;

impl GenerationStage for BiosphereStage {
    fn id(&self) -> StageId {
        StageId::Biosphere
    }

    fn name(&self) -> &str {
        "Biosphere Classification"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Hydrosphere, StageId::Atmosphere]
    }

    fn execute(&self, world: &mut World, config: &WorldConfig) -> Result<(), PipelineError> {
        let height = world
            .height()
            .ok_or_else(|| PipelineError::missing(self.id(), "height"))?;
        let temperature = world
            .temperature()
            .ok_or_else(|| PipelineError::missing(self.id(), "temperature"))?;
        let precipitation = world
            .precipitation()
            .ok_or_else(|| PipelineError::missing(self.id(), "precipitation"))?;

        let biosphere_config = config.biosphere_config();
        let biosphere = classify_biosphere(height, temperature, precipitation, &biosphere_config)
            .ok_or_else(|| PipelineError::failed(self.id(), "input fields differ in size"))?;
        debug!("{} land cells classified", biosphere.land_cells());

        world.biosphere = Some(biosphere);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{ConstantGenerator, FieldSource};

    fn small_config(seed: u64) -> WorldConfig {
        let mut config = WorldConfig::earth_like(48, 24, seed);
        config.hydrosphere.river_count = 10;
        config.hydrosphere.bucket_size = 8;
        config
    }

    #[test]
    fn test_pipeline_execution() {
        let config = small_config(42);
        let pipeline = Pipeline::standard(&config);
        assert_eq!(pipeline.stage_count(), 4);

        let mut world = World::new(&config);
        pipeline.run(&mut world).unwrap();
        assert!(world.is_complete());
        assert_eq!(world.height().unwrap().len(), 48 * 24);
    }

    #[test]
    fn test_missing_dependency() {
        let config = small_config(1);
        let mut pipeline = Pipeline::new(config.clone());
        pipeline.add_stage(AtmosphereStage);

        let mut world = World::new(&config);
        let err = pipeline.run(&mut world).unwrap_err();
        assert_eq!(
            err,
            PipelineError::MissingDependency("Atmosphere Generation".into(), "hydrosphere".into())
        );
    }

    #[test]
    fn test_missing_input_is_reported() {
        let config = small_config(1);
        let mut world = World::new(&config);
        let err = HydrosphereStage.execute(&mut world, &config).unwrap_err();
        assert!(matches!(err, PipelineError::MissingInput { input: "height", .. }));
    }

    #[test]
    fn test_callbacks_are_invoked_in_order() {
        let config = small_config(3);
        let pipeline = Pipeline::standard(&config);
        let mut world = World::new(&config);
        let mut started = Vec::new();
        let mut finished = 0;

        pipeline
            .run_with_callbacks(
                &mut world,
                |name, i, total| {
                    assert_eq!(total, 4);
                    started.push((i, name.to_string()));
                },
                |_, _, _| finished += 1,
            )
            .unwrap();

        assert_eq!(finished, 4);
        assert_eq!(started[0], (0, "Lithosphere Generation".to_string()));
        assert_eq!(started[3].1, "Biosphere Classification");
    }

    #[test]
    fn test_stages_use_independent_streams() {
        let config = small_config(9);
        let a = generate_world(&config).unwrap();

        let mut changed = config.clone();
        changed.wind = FieldSource::Constant(ConstantGenerator::new(0.5));
        let b = generate_world(&changed).unwrap();

        assert_eq!(a.height(), b.height());
        assert_eq!(a.precipitation(), b.precipitation());
        assert_ne!(a.temperature(), b.temperature());
    }

    #[test]
    fn test_constant_wind_keeps_temperature_in_range() {
        let mut config = small_config(4);
        config.wind = FieldSource::Constant(ConstantGenerator::new(0.3));
        let world = generate_world(&config).unwrap();
        let temperature = world.temperature().unwrap();
        assert!(temperature.values().iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
