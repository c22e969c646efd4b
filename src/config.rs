//! Simulation configuration loaded from YAML.
//!
//! ```yaml
//! qubits: 1000
//! channel_noise: 0.10
//! eavesdrop: 0.05
//! security_threshold_percent: 11
//! runs: 10
//! seed: 42
//! effect_order: noise_then_eavesdrop
//! ```
//!
//! Every key is optional and falls back to the reference setup.

use crate::core::EffectOrder;
use crate::core::errors::{ConfigError, ScenarioError};
use crate::protocols::bb84::{
    DEFAULT_CHANNEL_NOISE, DEFAULT_EAVESDROP, DEFAULT_QUBITS, RunParameters,
};
use crate::protocols::estimator::DEFAULT_THRESHOLD_PERCENT;
use crate::sampler::{DEFAULT_RUNS, Sampler};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Qubits sent per run
    pub qubits: usize,

    /// Bit flip probability of the channel
    pub channel_noise: f64,

    /// Probability Eve intercepts a qubit
    pub eavesdrop: f64,

    /// QBER percentage above which a key is discarded
    pub security_threshold_percent: f64,

    /// Number of runs in a batch
    pub runs: usize,

    /// Random seed (None = generate random)
    pub seed: Option<u64>,

    pub effect_order: EffectOrder,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            qubits: DEFAULT_QUBITS,
            channel_noise: DEFAULT_CHANNEL_NOISE,
            eavesdrop: DEFAULT_EAVESDROP,
            security_threshold_percent: DEFAULT_THRESHOLD_PERCENT,
            runs: DEFAULT_RUNS,
            seed: None,
            effect_order: EffectOrder::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ScenarioError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Rejects the configuration before any run starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.run_parameters()?;
        self.sampler()?;
        Ok(())
    }

    pub fn run_parameters(&self) -> Result<RunParameters, ConfigError> {
        Ok(RunParameters::new(
            self.qubits,
            self.channel_noise,
            self.eavesdrop,
            self.security_threshold_percent,
        )?
        .with_effect_order(self.effect_order))
    }

    pub fn sampler(&self) -> Result<Sampler, ConfigError> {
        let sampler = Sampler::new(self.runs)?;
        Ok(match self.seed {
            Some(seed) => sampler.with_seed(seed),
            None => sampler,
        })
    }
}
