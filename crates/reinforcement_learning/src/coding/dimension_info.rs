use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// One axis of the tile coder input space: the closed range [lower, upper],
// how many grid cells the axis ideally splits into, and a scale applied to
// the per-tiling random shifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionInfo {
    lower_bound: f64,
    upper_bound: f64,
    grid_count_ideal: usize,
    generalization_scale: f64,
}

impl DimensionInfo {
    pub fn new(
        lower_bound: f64,
        upper_bound: f64,
        grid_count_ideal: usize,
        generalization_scale: f64,
    ) -> Result<Self> {
        if !lower_bound.is_finite() || !upper_bound.is_finite() {
            return Err(Error::invalid_config("dimension bounds must be finite"));
        }
        if upper_bound <= lower_bound {
            return Err(Error::invalid_config(format!(
                "upper bound {upper_bound} must be greater than lower bound {lower_bound}"
            )));
        }
        if grid_count_ideal < 1 {
            return Err(Error::invalid_config("grid count must be at least 1"));
        }
        if !(generalization_scale > 0.0) || !generalization_scale.is_finite() {
            return Err(Error::invalid_config(
                "generalization scale must be positive and finite",
            ));
        }
        Ok(Self {
            lower_bound,
            upper_bound,
            grid_count_ideal,
            generalization_scale,
        })
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    pub fn grid_count_ideal(&self) -> usize {
        self.grid_count_ideal
    }

    // The +1 absorbs x == upper_bound and the positive per-tiling shifts.
    pub fn grid_count_real(&self) -> usize {
        self.grid_count_ideal + 1
    }

    pub fn range_difference(&self) -> f64 {
        (self.upper_bound - self.lower_bound).abs()
    }

    // Quantisation step of this axis.
    pub fn offset(&self) -> f64 {
        self.range_difference() / self.grid_count_ideal as f64
    }

    pub fn generalization_scale(&self) -> f64 {
        self.generalization_scale
    }
}
