//! Driving loop: seed once, then step → extract → triangulate per frame.
//!
//! Each call to [`Simulation::advance`] is one sub-step, and every sub-step can
//! be turned into a renderable [`Frame`]. Field mutation is strictly
//! sequential; parallelism lives inside the individual engines.

use log::{debug, info};

use crate::automaton::{build_kernel_with, random_state, step_with, Kernel, ScalarField};
use crate::config::{LeniaParams, SimulationConfig};
use crate::error::{LeniaError, Result};
use crate::mesh::{extract_mesh, triangle_values, triangulate, Mesh};

/// One time step's geometry, ready for a renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub generation: u64,
    pub mesh: Mesh,
    pub triangles: Vec<[u32; 3]>,
    /// Face intensity repeated for each of its triangles.
    pub triangle_values: Vec<f64>,
}

impl Frame {
    /// Build a frame from an already stepped field.
    pub fn from_field(field: &ScalarField, generation: u64) -> Result<Self> {
        let mesh = extract_mesh(field);
        let triangles = triangulate(&mesh.faces)?;
        let triangle_values = triangle_values(&mesh.faces, &mesh.values);
        Ok(Frame {
            generation,
            mesh,
            triangles,
            triangle_values,
        })
    }
}

/// Owns the field and kernel of one run.
pub struct Simulation {
    config: SimulationConfig,
    field: ScalarField,
    kernel: Kernel,
    seed: u64,
    generation: u64,
    /// Caller-supplied starting field; `None` means the run was seeded.
    initial: Option<ScalarField>,
}

fn kernel_for(params: &LeniaParams, size: usize) -> Result<Kernel> {
    build_kernel_with(params.radius, size, params.kernel, &params.peaks)
}

impl Simulation {
    /// Seed a new field and build its kernel.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let seeding = config.seeding;
        let (field, seed) = random_state(
            seeding.cluster_count,
            seeding.cluster_size,
            config.grid_size,
            seeding.seed,
        )?;
        info!(
            "seeded {}³ field with {} clusters (seed {})",
            config.grid_size, seeding.cluster_count, seed
        );
        let kernel = kernel_for(&config.params, config.grid_size)?;

        Ok(Simulation {
            config,
            field,
            kernel,
            seed,
            generation: 0,
            initial: None,
        })
    }

    /// Start from a caller-supplied field instead of random clusters.
    /// [`reset`](Self::reset) returns to this field.
    pub fn from_field(field: ScalarField, params: LeniaParams) -> Result<Self> {
        params.validate()?;
        let kernel = kernel_for(&params, field.size())?;
        let config = SimulationConfig {
            grid_size: field.size(),
            params,
            ..SimulationConfig::default()
        };
        Ok(Simulation {
            config,
            initial: Some(field.clone()),
            field,
            kernel,
            seed: 0,
            generation: 0,
        })
    }

    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ScalarField {
        &mut self.field
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn params(&self) -> &LeniaParams {
        &self.config.params
    }

    /// Seed that produced the initial field, 0 for a caller-supplied one.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of sub-steps taken since seeding.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Simulated time: one unit per `substeps` generations.
    pub fn time(&self) -> f64 {
        self.generation as f64 / self.config.params.substeps as f64
    }

    /// True once no voxel is occupied; a driver may stop here.
    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    /// Advance the field by one sub-step.
    pub fn advance(&mut self) -> Result<()> {
        let p = &self.config.params;
        step_with(
            &mut self.field,
            &self.kernel,
            p.substeps,
            p.growth,
            p.mean,
            p.stdev,
        )?;
        self.generation += 1;
        Ok(())
    }

    /// Mesh the current field.
    pub fn frame(&self) -> Result<Frame> {
        Frame::from_field(&self.field, self.generation)
    }

    /// Produce the current frame followed by up to `steps` stepped frames.
    ///
    /// Stops early after the field becomes empty; the empty frame is kept so
    /// a renderer sees the extinction.
    pub fn run(&mut self, steps: usize) -> Result<Vec<Frame>> {
        let mut frames = Vec::with_capacity(steps + 1);
        frames.push(self.frame()?);
        for _ in 0..steps {
            self.advance()?;
            frames.push(self.frame()?);
            if self.is_empty() {
                debug!("field went empty at generation {}", self.generation);
                break;
            }
        }
        Ok(frames)
    }

    /// Replace the update rule. The kernel is rebuilt only if its radius,
    /// ring profile or peaks changed.
    pub fn set_params(&mut self, params: LeniaParams) -> Result<()> {
        params.validate()?;
        let old = &self.config.params;
        if params.radius != old.radius || params.kernel != old.kernel || params.peaks != old.peaks
        {
            debug!(
                "rebuilding kernel: radius {} -> {}, {:?} -> {:?}",
                old.radius, params.radius, old.kernel, params.kernel
            );
            self.kernel = kernel_for(&params, self.config.grid_size)?;
        }
        self.config.params = params;
        Ok(())
    }

    /// Return to the starting field and reset the counters.
    ///
    /// A caller-supplied field (from [`from_field`](Self::from_field) or
    /// [`load_field`](Self::load_field)) is restored as is; otherwise the
    /// field is re-seeded from the recorded seed.
    pub fn reset(&mut self) -> Result<()> {
        if let Some(initial) = &self.initial {
            self.field = initial.clone();
            self.generation = 0;
            debug!("reset to loaded field");
            return Ok(());
        }
        let seeding = self.config.seeding;
        let (field, _) = random_state(
            seeding.cluster_count,
            seeding.cluster_size,
            self.config.grid_size,
            Some(self.seed),
        )?;
        self.field = field;
        self.generation = 0;
        debug!("reset to seed {}", self.seed);
        Ok(())
    }

    /// Overwrite the field, keeping its size. Later resets return here.
    pub fn load_field(&mut self, field: ScalarField) -> Result<()> {
        if field.size() != self.field.size() {
            return Err(LeniaError::DimensionMismatch {
                expected: self.field.size(),
                found: field.size(),
            });
        }
        self.initial = Some(field.clone());
        self.field = field;
        self.generation = 0;
        Ok(())
    }
}
