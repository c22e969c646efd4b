//! BB84 Quantum Key Distribution Protocol.
//!
//! BB84 (Bennett & Brassard, 1984) encodes each key bit in one of two
//! conjugate bases. Alice and Bob publicly compare bases, keep the bits where
//! they agree, and use the error rate of that sifted key to detect an
//! eavesdropper.
//!
//! The simulation is classical: bits are plain booleans handled according to
//! BB84's measurement outcome rules.

use crate::core::errors::ConfigError;
use crate::core::{Basis, ChannelModel, EffectOrder, EntropySource};
use crate::protocols::qkd::estimator::{
    DEFAULT_THRESHOLD_PERCENT, RunResult, SecurityEstimator, Verdict,
};
use crate::protocols::qkd::participants::Participants;
use crate::protocols::qkd::sifting::SiftedKeyPair;
use log::{debug, info, warn};

pub const DEFAULT_QUBITS: usize = 1000;
pub const DEFAULT_CHANNEL_NOISE: f64 = 0.10;
pub const DEFAULT_EAVESDROP: f64 = 0.05;

/// Validated configuration for a single run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunParameters {
    num_qubits: usize,
    channel: ChannelModel,
    estimator: SecurityEstimator,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            num_qubits: DEFAULT_QUBITS,
            channel: ChannelModel::new(DEFAULT_CHANNEL_NOISE, DEFAULT_EAVESDROP)
                .unwrap_or_else(|_| ChannelModel::ideal()),
            estimator: SecurityEstimator::default(),
        }
    }
}

impl RunParameters {
    /// Checks every parameter before anything runs.
    ///
    /// # Arguments
    ///
    /// * `num_qubits` - Qubits Alice sends, at least one.
    /// * `channel_noise` - Bit flip probability of the channel.
    /// * `eavesdrop` - Probability Eve intercepts a given qubit.
    /// * `threshold_percent` - QBER above which the key is discarded.
    pub fn new(
        num_qubits: usize,
        channel_noise: f64,
        eavesdrop: f64,
        threshold_percent: f64,
    ) -> Result<Self, ConfigError> {
        if num_qubits == 0 {
            return Err(ConfigError::NoQubits);
        }

        Ok(Self {
            num_qubits,
            channel: ChannelModel::new(channel_noise, eavesdrop)?,
            estimator: SecurityEstimator::new(threshold_percent)?,
        })
    }

    /// Same parameters with the default security threshold.
    pub fn with_defaults(
        num_qubits: usize,
        channel_noise: f64,
        eavesdrop: f64,
    ) -> Result<Self, ConfigError> {
        Self::new(num_qubits, channel_noise, eavesdrop, DEFAULT_THRESHOLD_PERCENT)
    }

    pub fn with_effect_order(mut self, order: EffectOrder) -> Self {
        self.channel = self.channel.with_order(order);
        self
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn channel_noise(&self) -> f64 {
        self.channel.noise()
    }

    pub fn eavesdrop(&self) -> f64 {
        self.channel.eavesdrop()
    }

    pub fn threshold_percent(&self) -> f64 {
        self.estimator.threshold_percent()
    }

    pub fn effect_order(&self) -> EffectOrder {
        self.channel.order()
    }

    pub fn channel(&self) -> &ChannelModel {
        &self.channel
    }
}

/// Everything known about one qubit once Bob has measured it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QubitRecord {
    pub alice_bit: bool,
    pub alice_basis: Basis,
    pub bob_basis: Basis,
    pub received_bit: bool,
    /// Diagnostic only, never visible to Alice or Bob.
    pub was_intercepted: bool,
}

/// Full transcript of a run.
#[derive(Debug, Clone)]
pub struct Bb84Run {
    /// One record per qubit, indexed by sequence number.
    pub records: Vec<QubitRecord>,
    pub sifted: SiftedKeyPair,
    /// Qubits Eve touched.
    pub intercepted_count: usize,
    pub result: RunResult,
}

impl Bb84Run {
    pub fn raw_length(&self) -> usize {
        self.records.len()
    }
}

/// Runs BB84 and returns only the verdict and statistics.
pub fn run_simulation<E: EntropySource + ?Sized>(params: &RunParameters, rng: &mut E) -> RunResult {
    run_detailed(params, rng).result
}

/// Runs BB84 keeping the per-qubit transcript and the sifted keys.
pub fn run_detailed<E: EntropySource + ?Sized>(params: &RunParameters, rng: &mut E) -> Bb84Run {
    let n = params.num_qubits;

    // Alice prepares, Bob picks measurement bases
    let participants = Participants::generate(n, rng);

    // Qubits travel through the channel
    let mut records = Vec::with_capacity(n);
    let mut intercepted_count = 0;

    for i in 0..n {
        let alice_bit = participants.alice_bits[i];
        let alice_basis = participants.alice_bases[i];
        let bob_basis = participants.bob_bases[i];

        let outcome = params
            .channel
            .transmit(alice_bit, alice_basis, bob_basis, rng);

        if outcome.intercepted {
            intercepted_count += 1;
            debug!("Eve intercepted qubit {i}");
        }

        records.push(QubitRecord {
            alice_bit,
            alice_basis,
            bob_basis,
            received_bit: outcome.received_bit,
            was_intercepted: outcome.intercepted,
        });
    }

    // Sifting stage
    let sifted = SiftedKeyPair::sift(&records);
    debug!(
        "Sifted key length: {} of {} bits",
        sifted.len(),
        records.len()
    );

    let result = params.estimator.estimate(&sifted);

    match (result.verdict, result.qber_percent) {
        (Verdict::Secure, Some(qber)) => info!("QBER {qber:.1}%, key kept"),
        (Verdict::Aborted, Some(qber)) => warn!(
            "QBER {qber:.1}% exceeds {}%, key discarded",
            params.threshold_percent()
        ),
        _ => warn!("Sifted key is empty, QBER undefined"),
    }

    Bb84Run {
        records,
        sifted,
        intercepted_count,
        result,
    }
}
