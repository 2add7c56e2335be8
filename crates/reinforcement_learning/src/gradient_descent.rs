use fxhash::FxHashMap;

use crate::coding::TileCode;
use crate::error::{Error, Result};

// Entries whose magnitude decays below this are dropped from the trace.
const TRACE_FLOOR: f64 = 1e-6;

// The λ-update core: one TD step over tile-coded features with a sparse
// replacing eligibility trace. The weight step is normalised by the number
// of tilings so the effective step size is independent of K.
#[derive(Debug, Clone)]
pub struct GradientDescent {
    learning_rate: f64,
    discount_factor: f64,
    lambda_factor: f64,
    trace: FxHashMap<usize, f64>,
}

impl GradientDescent {
    pub fn new(learning_rate: f64, discount_factor: f64, lambda_factor: f64) -> Result<Self> {
        if !(learning_rate > 0.0 && learning_rate <= 1.0) {
            return Err(Error::invalid_config("step size must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&discount_factor) {
            return Err(Error::invalid_config("discount rate must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&lambda_factor) {
            return Err(Error::invalid_config("lambda must be in [0, 1]"));
        }
        Ok(Self {
            learning_rate,
            discount_factor,
            lambda_factor,
            trace: FxHashMap::default(),
        })
    }

    // One transition (s,a) -r-> (s',a'). `next_features` is None when s' is
    // terminal. Returns the TD error.
    pub fn update(
        &mut self,
        tile_code: &mut dyn TileCode,
        features: &[usize],
        reward: f64,
        next_features: Option<&[usize]>,
    ) -> Result<f64> {
        let current_value = tile_code.value_from_features(features);
        let future_value = next_features
            .map(|fv| tile_code.value_from_features(fv))
            .unwrap_or(0.0);
        let temporal_difference =
            reward + self.discount_factor * future_value - current_value;
        if !temporal_difference.is_finite() {
            return Err(Error::Numeric {
                what: "temporal difference",
            });
        }

        let decay = self.discount_factor * self.lambda_factor;
        self.trace.retain(|_, value| {
            *value *= decay;
            *value > TRACE_FLOOR
        });
        for &index in features {
            self.trace.insert(index, 1.0);
        }

        let step = (self.learning_rate / tile_code.num_tilings() as f64) * temporal_difference;
        for (&index, &eligibility) in self.trace.iter() {
            let weight = tile_code.weight_mut(index);
            *weight += step * eligibility;
            if !weight.is_finite() {
                return Err(Error::Numeric { what: "weight" });
            }
        }
        Ok(temporal_difference)
    }

    // Episode boundary, and Watkins truncation after an exploratory action.
    pub fn reset(&mut self) {
        self.trace.clear();
    }

    pub fn trace_value(&self, index: usize) -> f64 {
        self.trace.get(&index).copied().unwrap_or(0.0)
    }

    pub fn active_trace_count(&self) -> usize {
        self.trace.len()
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    pub fn lambda_factor(&self) -> f64 {
        self.lambda_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coding::{DimensionInfo, TileCodeCorrect};

    fn coder(num_tilings: usize) -> TileCodeCorrect {
        let dims = vec![DimensionInfo::new(0.0, 1.0, 10, 1.0).unwrap()];
        let offsets = vec![vec![0.0]; num_tilings];
        TileCodeCorrect::with_offsets(dims, num_tilings, offsets).unwrap()
    }

    #[test]
    fn rejects_out_of_range_hyperparameters() {
        assert!(GradientDescent::new(0.0, 0.9, 0.5).is_err());
        assert!(GradientDescent::new(1.5, 0.9, 0.5).is_err());
        assert!(GradientDescent::new(0.1, -0.1, 0.5).is_err());
        assert!(GradientDescent::new(0.1, 0.9, 1.1).is_err());
    }

    #[test]
    fn positive_reward_raises_active_weights() {
        // γ = 0, λ = 0: the update reduces to w[F] += α δ / K.
        let mut coder = coder(1);
        let mut gd = GradientDescent::new(0.5, 0.0, 0.0).unwrap();
        let features = coder.feature_vector(&[0.3]).unwrap();
        let before: f64 = coder.value_from_features(&features);
        let delta = gd.update(&mut coder, &features, 1.0, None).unwrap();
        assert_eq!(delta, 1.0);
        assert!(coder.value_from_features(&features) > before);
    }

    #[test]
    fn step_is_normalised_by_tilings() {
        let mut coder = coder(4);
        let mut gd = GradientDescent::new(0.4, 0.0, 0.0).unwrap();
        let features = coder.feature_vector(&[0.3]).unwrap();
        gd.update(&mut coder, &features, 1.0, None).unwrap();
        // Four active weights, each stepped by (0.4 / 4) * 1.0.
        assert!((coder.value_from_features(&features) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn trace_decays_geometrically_for_unvisited_features() {
        let mut coder = coder(1);
        let mut gd = GradientDescent::new(0.1, 0.9, 0.8).unwrap();
        let first = coder.feature_vector(&[0.05]).unwrap();
        let second = coder.feature_vector(&[0.95]).unwrap();
        gd.update(&mut coder, &first, 0.0, Some(&second)).unwrap();
        assert_eq!(gd.trace_value(first[0]), 1.0);
        for step in 1..=3 {
            gd.update(&mut coder, &second, 0.0, Some(&second)).unwrap();
            let expected = (0.9f64 * 0.8).powi(step);
            assert!((gd.trace_value(first[0]) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn visited_features_use_replacing_traces() {
        let mut coder = coder(1);
        let mut gd = GradientDescent::new(0.1, 1.0, 1.0).unwrap();
        let features = coder.feature_vector(&[0.5]).unwrap();
        for _ in 0..3 {
            gd.update(&mut coder, &features, 0.0, Some(&features)).unwrap();
            assert_eq!(gd.trace_value(features[0]), 1.0);
        }
    }

    #[test]
    fn tiny_trace_entries_are_flushed() {
        let mut coder = coder(1);
        let mut gd = GradientDescent::new(0.1, 0.1, 0.1).unwrap();
        let first = coder.feature_vector(&[0.05]).unwrap();
        let second = coder.feature_vector(&[0.95]).unwrap();
        gd.update(&mut coder, &first, 0.0, Some(&second)).unwrap();
        // decay 0.01 per step; four steps push 1.0 well below the 1e-6 floor
        for _ in 0..4 {
            gd.update(&mut coder, &second, 0.0, Some(&second)).unwrap();
        }
        assert_eq!(gd.trace_value(first[0]), 0.0);
        assert_eq!(gd.active_trace_count(), 1);
    }

    #[test]
    fn reset_clears_the_trace() {
        let mut coder = coder(2);
        let mut gd = GradientDescent::new(0.1, 0.9, 0.9).unwrap();
        let features = coder.feature_vector(&[0.5]).unwrap();
        gd.update(&mut coder, &features, 1.0, None).unwrap();
        assert!(gd.active_trace_count() > 0);
        gd.reset();
        assert_eq!(gd.active_trace_count(), 0);
        assert_eq!(gd.trace_value(features[0]), 0.0);
    }

    #[test]
    fn non_finite_reward_is_a_numeric_error() {
        let mut coder = coder(1);
        let mut gd = GradientDescent::new(0.5, 0.0, 0.0).unwrap();
        let features = coder.feature_vector(&[0.3]).unwrap();
        assert!(matches!(
            gd.update(&mut coder, &features, f64::INFINITY, None),
            Err(Error::Numeric { .. })
        ));
    }
}
