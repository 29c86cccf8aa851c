//! Generation stage trait and pipeline orchestration.

use thiserror::Error;

use crate::geometry::GridError;
use crate::random::RandomSource;
use crate::terrain::{Palette, Surface, SurfaceMap, TerrainConfig, TerrainState};

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Scatter continent seeds over the coarse grid.
    Seed,
    /// Random-walk growth of the seeds.
    Grow,
    /// Expand the coarse grid to the raster surface.
    Upscale,
    /// Percentile bucketing of raster heights.
    Normalize,
    /// Flood to the initial hydrographics, then dry to the final one.
    Hydrate,
    /// Impact craters.
    Craters,
    /// Latitude cloud bands.
    Bands,
    /// Neighbour-copy softening of band edges.
    Blur,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Seed => "seed",
            StageId::Grow => "grow",
            StageId::Upscale => "upscale",
            StageId::Normalize => "normalize",
            StageId::Hydrate => "hydrate",
            StageId::Craters => "craters",
            StageId::Bands => "bands",
            StageId::Blur => "blur",
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Stage '{0}' failed: {1}")]
    StageFailed(String, String),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
    #[error("Generation interrupted")]
    Interrupted,
}

/// Trait for implementing terrain passes.
///
/// Each stage transforms the surface in some way, building upon
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

    /// State the surface is in once this stage has run.
    fn advances_to(&self) -> TerrainState;

    /// Executes the stage, modifying the surface in place.
    ///
    /// # Arguments
    /// * `surface` - The surface to modify
    /// * `config` - Terrain configuration, never modified
    /// * `rng` - Dice for every random decision the stage makes
    ///
    /// # Returns
    /// `Ok(())` on success, or an error describing what went wrong
    fn execute(
        &self,
        surface: &mut Surface,
        config: &TerrainConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<(), PipelineError>;
}

/// Orchestrates terrain stages into a complete synthesis run.
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
    config: TerrainConfig,
}

impl Pipeline {
    /// Creates a new empty pipeline with the given configuration.
    pub fn new(config: TerrainConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
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

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Executes all stages in order on the given surface.
    ///
    /// # Returns
    /// `Ok(())` if all stages complete successfully; the surface is then
    /// summarised onto its coarse grid and marked finished
    pub fn run(&self, surface: &mut Surface, rng: &mut dyn RandomSource) -> Result<(), PipelineError> {
        self.run_with_callbacks(surface, rng, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `surface` - The surface to generate
    /// * `rng` - Dice shared by every stage
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        surface: &mut Surface,
        rng: &mut dyn RandomSource,
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

            stage.execute(surface, &self.config, rng)?;
            surface.state = surface.state.max(stage.advances_to());
            completed.push(stage.id());
            log::debug!("{} complete ({}/{})", stage.name(), i + 1, total);

            on_stage_complete(stage.name(), i, total);
        }

        surface.summarise();
        surface.state = TerrainState::Finished;
        Ok(())
    }
}

/// Splits a surface into its palette and raster map, failing the named
/// stage if the surface has not been upscaled yet.
pub(crate) fn split_fine<'a>(
    surface: &'a mut Surface,
    stage: &str,
) -> Result<(&'a Palette, &'a mut SurfaceMap), PipelineError> {
    let Surface { palette, fine, .. } = surface;
    let map = fine.as_mut().ok_or_else(|| {
        PipelineError::StageFailed(stage.to_string(), "surface has not been upscaled".to_string())
    })?;
    Ok((palette, map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{GrowStage, SeedStage, UpscaleStage};
    use crate::random::Dice;
    use crate::terrain::PlanetArchetype;

    #[test]
    fn test_stage_id_name() {
        assert_eq!(StageId::Seed.name(), "seed");
        assert_eq!(StageId::Hydrate.name(), "hydrate");
    }

    #[test]
    fn test_pipeline_execution() {
        let mut pipeline = Pipeline::new(TerrainConfig::barren().with_tile_size(4));
        pipeline.add_stage(SeedStage).add_stage(GrowStage).add_stage(UpscaleStage);
        assert_eq!(pipeline.stage_count(), 3);

        let mut surface = Surface::new(PlanetArchetype::Hermian);
        pipeline.run(&mut surface, &mut Dice::seeded(42)).unwrap();

        assert_eq!(surface.state, TerrainState::Finished);
        assert!(surface.fine.is_some());
    }

    #[test]
    fn test_missing_dependency() {
        let mut pipeline = Pipeline::new(TerrainConfig::default());
        pipeline.add_stage(GrowStage);

        let mut surface = Surface::new(PlanetArchetype::Hermian);
        let err = pipeline.run(&mut surface, &mut Dice::seeded(1)).unwrap_err();
        assert!(matches!(err, PipelineError::MissingDependency(_, ref dep) if dep == "seed"));
        assert_eq!(surface.state, TerrainState::Unseeded);
    }

    #[test]
    fn test_pipeline_with_callbacks() {
        let mut pipeline = Pipeline::new(TerrainConfig::default().with_tile_size(2));
        pipeline.add_stage(SeedStage);

        let mut surface = Surface::new(PlanetArchetype::Hermian);
        let mut started = false;
        let mut completed = false;

        pipeline
            .run_with_callbacks(
                &mut surface,
                &mut Dice::seeded(42),
                |name, _, _| {
                    assert_eq!(name, "Continent Seeding");
                    started = true;
                },
                |name, _, _| {
                    assert_eq!(name, "Continent Seeding");
                    completed = true;
                },
            )
            .unwrap();

        assert!(started);
        assert!(completed);
    }
}
