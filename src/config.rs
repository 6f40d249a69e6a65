//! Run configuration: lattice size, update rule and initial seeding.

use serde::{Deserialize, Serialize};

use crate::automaton::grid::cell_count;
use crate::automaton::kernel::validate_peaks;
use crate::automaton::{GrowthFunction, KernelCore};
use crate::error::{LeniaError, Result};

/// Parameters of the Lenia update rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeniaParams {
    /// Kernel radius in cells.
    pub radius: f64,
    /// Growth centre.
    pub mean: f64,
    /// Growth width.
    pub stdev: f64,
    /// Sub-steps per unit of simulated time.
    pub substeps: u32,
    pub growth: GrowthFunction,
    /// Radial profile of each kernel ring.
    pub kernel: KernelCore,
    /// Relative height of each kernel ring, innermost first.
    pub peaks: Vec<f64>,
}

impl Default for LeniaParams {
    fn default() -> Self {
        Self {
            radius: 10.0,
            mean: 0.15,
            stdev: 0.015,
            substeps: 10,
            growth: GrowthFunction::Gaussian,
            kernel: KernelCore::Bell,
            peaks: vec![1.0],
        }
    }
}

impl LeniaParams {
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(LeniaError::invalid("radius must be finite and > 0"));
        }
        if !self.mean.is_finite() {
            return Err(LeniaError::invalid("mean must be finite"));
        }
        if !self.stdev.is_finite() || self.stdev <= 0.0 {
            return Err(LeniaError::invalid("stdev must be finite and > 0"));
        }
        if self.substeps == 0 {
            return Err(LeniaError::invalid("substeps must be > 0"));
        }
        validate_peaks(&self.peaks)
    }
}

/// Random cluster seeding of the initial field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedParams {
    pub cluster_count: usize,
    /// Half-open range of cluster edge lengths.
    pub cluster_size: (usize, usize),
    /// Fixed seed, or `None` to draw one.
    pub seed: Option<u64>,
}

impl Default for SeedParams {
    fn default() -> Self {
        Self {
            cluster_count: 40,
            cluster_size: (2, 8),
            seed: None,
        }
    }
}

impl SeedParams {
    pub fn validate(&self) -> Result<()> {
        let (lo, hi) = self.cluster_size;
        if lo == 0 || lo >= hi {
            return Err(LeniaError::invalid(format!(
                "cluster size range must satisfy 0 < lo < hi (got {}..{})",
                lo, hi
            )));
        }
        Ok(())
    }
}

/// Everything needed to start a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub grid_size: usize,
    pub params: LeniaParams,
    pub seeding: SeedParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_size: 64,
            params: LeniaParams::default(),
            seeding: SeedParams::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        cell_count(self.grid_size)?;
        self.params.validate()?;
        self.seeding.validate()
    }
}
