mod core;
pub mod config;
pub mod protocols;
mod sampler;

pub use crate::config::SimulationConfig;
pub use crate::core::{
    Basis, ChannelModel, ChannelOutcome, EffectOrder, EntropySource, entropy, errors, utils,
};
pub use crate::protocols::bb84::{
    Bb84Run, QubitRecord, RunParameters, run_detailed, run_simulation,
};
pub use crate::protocols::estimator::{RunResult, SecurityEstimator, Verdict};
pub use crate::protocols::participants::Participants;
pub use crate::protocols::sifting::SiftedKeyPair;
pub use crate::sampler::{BatchSummary, Sampler};
