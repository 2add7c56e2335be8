#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceType {
    Discrete,
    Continuous,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpaceTypeBounds {
    Discrete(usize),
    Continuous(f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpaceInfo {
    pub data: Vec<SpaceTypeBounds>,
}

impl SpaceInfo {
    pub fn new(data: Vec<SpaceTypeBounds>) -> Self {
        Self { data }
    }

    pub fn get_type(&self) -> SpaceType {
        let mut is_discrete = false;
        let mut is_continuous = false;
        for bounds in self.data.iter() {
            match bounds {
                SpaceTypeBounds::Discrete(_) => is_discrete = true,
                SpaceTypeBounds::Continuous(_, _) => is_continuous = true,
            }
        }
        match (is_discrete, is_continuous) {
            (true, false) => SpaceType::Discrete,
            (false, true) => SpaceType::Continuous,
            (true, true) => SpaceType::Mixed,
            (false, false) => panic!("Empty space"),
        }
    }

    pub fn get_discrete_combinations(&self) -> usize {
        let mut value = 1;
        for bounds in self.data.iter() {
            if let SpaceTypeBounds::Discrete(n) = bounds {
                value *= n;
            }
        }
        value
    }

    // (lower, upper) pairs of the continuous axes, in declaration order.
    pub fn continuous_bounds(&self) -> Vec<(f64, f64)> {
        self.data
            .iter()
            .filter_map(|bounds| match bounds {
                SpaceTypeBounds::Continuous(lo, hi) => Some((*lo, *hi)),
                SpaceTypeBounds::Discrete(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_space_type() {
        let space = SpaceInfo::new(vec![
            SpaceTypeBounds::Discrete(3),
            SpaceTypeBounds::Continuous(-1.0, 1.0),
        ]);
        assert_eq!(space.get_type(), SpaceType::Mixed);
    }

    #[test]
    fn discrete_combinations_multiply() {
        let space = SpaceInfo::new(vec![
            SpaceTypeBounds::Discrete(3),
            SpaceTypeBounds::Discrete(4),
        ]);
        assert_eq!(space.get_discrete_combinations(), 12);
    }

    #[test]
    fn continuous_bounds_keep_order() {
        let space = SpaceInfo::new(vec![
            SpaceTypeBounds::Continuous(-1.2, 0.6),
            SpaceTypeBounds::Continuous(-0.07, 0.07),
        ]);
        assert_eq!(space.continuous_bounds(), vec![(-1.2, 0.6), (-0.07, 0.07)]);
    }
}
