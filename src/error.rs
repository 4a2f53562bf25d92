use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeatwiseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Could not resolve location: {0}")]
    LocationNotFound(String),

    #[error("Unclassifiable sample: {0}")]
    Unclassifiable(#[from] Unclassifiable),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Why a reading could not be mapped onto a risk scale.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Unclassifiable {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is not a finite number ({value})")]
    NonFinite { field: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, HeatwiseError>;
