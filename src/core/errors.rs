use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid probability for {name}: {value}. Must be between 0.0 and 1.0")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("At least one qubit must be sent")]
    NoQubits,

    #[error("Invalid security threshold: {0}%. Must be between 0 and 100")]
    InvalidThreshold(f64),

    #[error("A batch needs at least one run")]
    NoRuns,
}

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Could not read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
