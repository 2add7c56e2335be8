use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::DimensionInfo;
use crate::error::{Error, Result};

// Sparse linear function approximator over K overlapping, randomly offset
// grids. Implementations differ only in how a (tiling, grid coordinates)
// tuple becomes a weight index.
pub trait TileCode {
    // Exactly num_tilings() indices, each < size(). Deterministic in the
    // input and in the offsets drawn at construction.
    fn feature_vector(&self, parameters: &[f64]) -> Result<Vec<usize>>;

    fn value_from_features(&self, features: &[usize]) -> f64 {
        features.iter().map(|&index| self.weight(index)).sum()
    }

    fn value_from_parameters(&self, parameters: &[f64]) -> Result<f64> {
        let features = self.feature_vector(parameters)?;
        Ok(self.value_from_features(&features))
    }

    fn weight(&self, index: usize) -> f64;
    fn weight_mut(&mut self, index: usize) -> &mut f64;
    fn size(&self) -> usize;
    fn num_tilings(&self) -> usize;
    fn dimension(&self) -> usize;
}

// State shared by every coder: the axis descriptions, the weight vector and
// the per-tiling random shifts, drawn once at construction.
#[derive(Debug, Clone)]
pub(crate) struct Tilings {
    dimensions: Vec<DimensionInfo>,
    num_tilings: usize,
    weights: Vec<f64>,
    random_offsets: Vec<Vec<f64>>,
}

impl Tilings {
    pub(crate) fn new(
        dimensions: Vec<DimensionInfo>,
        num_tilings: usize,
        size: usize,
        seed: u64,
    ) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let random_offsets = (0..num_tilings)
            .map(|_| {
                dimensions
                    .iter()
                    .map(|dim| {
                        rng.gen_range(0.0..1.0) * dim.offset() * dim.generalization_scale()
                    })
                    .collect()
            })
            .collect();
        Self::with_offsets(dimensions, num_tilings, size, random_offsets)
    }

    pub(crate) fn with_offsets(
        dimensions: Vec<DimensionInfo>,
        num_tilings: usize,
        size: usize,
        random_offsets: Vec<Vec<f64>>,
    ) -> Result<Self> {
        if dimensions.is_empty() {
            return Err(Error::invalid_config("at least one dimension is required"));
        }
        if num_tilings < 1 {
            return Err(Error::invalid_config("at least one tiling is required"));
        }
        if size < 1 {
            return Err(Error::invalid_config("weight vector cannot be empty"));
        }
        if random_offsets.len() != num_tilings
            || random_offsets.iter().any(|row| row.len() != dimensions.len())
        {
            return Err(Error::invalid_config(format!(
                "offsets must be {num_tilings} rows of {} entries",
                dimensions.len()
            )));
        }
        Ok(Self {
            dimensions,
            num_tilings,
            weights: vec![0.0; size],
            random_offsets,
        })
    }

    pub(crate) fn check_arity(&self, parameters: &[f64]) -> Result<()> {
        if parameters.len() != self.dimensions.len() {
            return Err(Error::invalid_config(format!(
                "expected {} coordinates, got {}",
                self.dimensions.len(),
                parameters.len()
            )));
        }
        Ok(())
    }

    // Integer grid cell of one coordinate under one tiling's shift. Inputs
    // outside [lower, upper] (NaN included) are rejected, never clamped.
    pub(crate) fn grid_coordinate(
        &self,
        param: f64,
        tiling: usize,
        dimension: usize,
    ) -> Result<usize> {
        let dim = &self.dimensions[dimension];
        if param.is_nan() || param < dim.lower_bound() || param > dim.upper_bound() {
            return Err(Error::OutOfDomain {
                dimension,
                value: param,
                lower: dim.lower_bound(),
                upper: dim.upper_bound(),
            });
        }
        let shifted = param
            + self.random_offsets[tiling][dimension] * dim.generalization_scale()
            - dim.lower_bound();
        Ok((shifted * dim.grid_count_ideal() as f64 / dim.range_difference()) as usize)
    }

    pub(crate) fn dimensions(&self) -> &[DimensionInfo] {
        &self.dimensions
    }

    pub(crate) fn num_tilings(&self) -> usize {
        self.num_tilings
    }

    pub(crate) fn size(&self) -> usize {
        self.weights.len()
    }

    pub(crate) fn weight(&self, index: usize) -> f64 {
        self.weights[index]
    }

    pub(crate) fn weight_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.weights[index]
    }
}
