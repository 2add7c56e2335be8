use rand_mt::Mt64;

use super::tile_code::Tilings;
use super::{DimensionInfo, TileCode};
use crate::error::Result;

// The weight index of tiling t is hash(t, g_0, .., g_{D-1}) mod size.
// Collisions are accepted; the caller picks the size as a space/accuracy
// trade-off. Both hashers are pure functions of the tuple, so features stay
// deterministic and reproducible across instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileHasher {
    Unh,
    Mt19937,
}

#[derive(Debug, Clone)]
pub struct TileCodeHashed {
    tilings: Tilings,
    hasher: TileHasher,
    tuple_buffer_len: usize,
}

impl TileCodeHashed {
    pub fn new(
        dimensions: Vec<DimensionInfo>,
        num_tilings: usize,
        size_hint: usize,
        hasher: TileHasher,
        seed: u64,
    ) -> Result<Self> {
        let tuple_buffer_len = dimensions.len() + 1;
        Ok(Self {
            tilings: Tilings::new(dimensions, num_tilings, size_hint, seed)?,
            hasher,
            tuple_buffer_len,
        })
    }

    pub fn unh(
        dimensions: Vec<DimensionInfo>,
        num_tilings: usize,
        size_hint: usize,
        seed: u64,
    ) -> Result<Self> {
        Self::new(dimensions, num_tilings, size_hint, TileHasher::Unh, seed)
    }

    pub fn mt19937(
        dimensions: Vec<DimensionInfo>,
        num_tilings: usize,
        size_hint: usize,
        seed: u64,
    ) -> Result<Self> {
        Self::new(dimensions, num_tilings, size_hint, TileHasher::Mt19937, seed)
    }

    pub fn hasher(&self) -> TileHasher {
        self.hasher
    }

    fn hash_tuple(&self, tuple: &[usize]) -> u64 {
        match self.hasher {
            TileHasher::Unh => unh_hash(tuple),
            TileHasher::Mt19937 => mt19937_hash(tuple),
        }
    }
}

const UNH_PRIMES: [u64; 8] = [
    2_305_843_009_213_693_951,
    1_099_511_628_211,
    3_266_489_917,
    2_654_435_761,
    2_246_822_519,
    2_147_483_647,
    668_265_263,
    374_761_393,
];

// Knuth's multiplicative constant.
const UNH_MIX: u64 = 2_654_435_761;

fn unh_hash(tuple: &[usize]) -> u64 {
    let mut hash: u64 = 0;
    for (position, &coordinate) in tuple.iter().enumerate() {
        let prime = UNH_PRIMES[(coordinate.wrapping_add(position.wrapping_mul(449)))
            % UNH_PRIMES.len()];
        hash ^= prime.wrapping_mul(coordinate as u64 + 1);
        hash = hash.wrapping_mul(UNH_MIX);
    }
    hash
}

fn mt19937_hash(tuple: &[usize]) -> u64 {
    Mt64::new(fxhash::hash64(&tuple)).next_u64()
}

impl TileCode for TileCodeHashed {
    fn feature_vector(&self, parameters: &[f64]) -> Result<Vec<usize>> {
        self.tilings.check_arity(parameters)?;
        let mut features = Vec::with_capacity(self.tilings.num_tilings());
        let mut tuple = Vec::with_capacity(self.tuple_buffer_len);
        for tiling in 0..self.tilings.num_tilings() {
            tuple.clear();
            tuple.push(tiling);
            for (dimension, &param) in parameters.iter().enumerate() {
                tuple.push(self.tilings.grid_coordinate(param, tiling, dimension)?);
            }
            features.push((self.hash_tuple(&tuple) % self.tilings.size() as u64) as usize);
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
