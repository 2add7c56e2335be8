mod mountain_car;

pub use mountain_car::{MountainCarEnv, MountainCarObservation};
