use environments::EnvError;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("coordinate {value} of dimension {dimension} is outside [{lower}, {upper}]")]
    OutOfDomain {
        dimension: usize,
        value: f64,
        lower: f64,
        upper: f64,
    },

    #[error("transition model has no recorded next states")]
    ModelEmpty,

    #[error("state was never recorded in the transition model")]
    ModelMissingKey,

    #[error("non-finite {what}, learning diverged (step size too large?)")]
    Numeric { what: &'static str },

    #[error("environment failure: {0}")]
    Environment(#[from] EnvError),
}

impl Error {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfig {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
