mod basis;
mod channels;
pub mod entropy;
pub mod errors;
pub mod utils;

pub use basis::Basis;
pub use channels::{ChannelModel, ChannelOutcome, EffectOrder};
pub use entropy::EntropySource;

#[cfg(test)]
pub(crate) use channels::tests::ScriptedEntropy;
