use super::tile_code::Tilings;
use super::{DimensionInfo, TileCode};
use crate::error::{Error, Result};

// Collision-free coder: each (grid coordinates, tiling) tuple owns its own
// weight. Memory grows with the product of the per-axis grid counts, so this
// is the coder of choice for low and medium dimensional inputs.
#[derive(Debug, Clone)]
pub struct TileCodeCorrect {
    tilings: Tilings,
}

impl TileCodeCorrect {
    pub fn new(dimensions: Vec<DimensionInfo>, num_tilings: usize, seed: u64) -> Result<Self> {
        let size = Self::calculate_size(&dimensions, num_tilings)?;
        Ok(Self {
            tilings: Tilings::new(dimensions, num_tilings, size, seed)?,
        })
    }

    // Explicit per-tiling shifts, for reproducing a published tiling layout.
    pub fn with_offsets(
        dimensions: Vec<DimensionInfo>,
        num_tilings: usize,
        random_offsets: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let size = Self::calculate_size(&dimensions, num_tilings)?;
        Ok(Self {
            tilings: Tilings::with_offsets(dimensions, num_tilings, size, random_offsets)?,
        })
    }

    fn calculate_size(dimensions: &[DimensionInfo], num_tilings: usize) -> Result<usize> {
        let mut size = num_tilings;
        for dim in dimensions {
            size = size.checked_mul(dim.grid_count_real()).ok_or_else(|| {
                Error::invalid_config(
                    "grid too large for a collision-free coder, use a hashed coder",
                )
            })?;
        }
        Ok(size)
    }
}

impl TileCode for TileCodeCorrect {
    fn feature_vector(&self, parameters: &[f64]) -> Result<Vec<usize>> {
        self.tilings.check_arity(parameters)?;
        let mut features = Vec::with_capacity(self.tilings.num_tilings());
        for tiling in 0..self.tilings.num_tilings() {
            // g_0 + g_1*real_0 + g_2*real_0*real_1 + ...
            let mut index = 0;
            let mut mult = 1;
            for (dimension, &param) in parameters.iter().enumerate() {
                index += self.tilings.grid_coordinate(param, tiling, dimension)? * mult;
                mult *= self.tilings.dimensions()[dimension].grid_count_real();
            }
            features.push(index + mult * tiling);
        }
        Ok(features)
    }

    fn weight(&self, index: usize) -> f64 {
        self.tilings.weight(index)
    }

    fn weight_mut(&mut self, index: usize) -> &mut f64 {
        self.tilings.weight_mut(index)
    }

    fn size(&self) -> usize {
        self.tilings.size()
    }

    fn num_tilings(&self) -> usize {
        self.tilings.num_tilings()
    }

    fn dimension(&self) -> usize {
        self.tilings.dimensions().len()
    }
}
