pub mod classic_control;
pub mod env;
pub mod space;
pub mod toy_text;

pub use env::{Env, EnvError};
