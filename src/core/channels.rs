use crate::core::basis::Basis;
use crate::core::entropy::EntropySource;
use crate::core::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Order in which the two channel effects hit a qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectOrder {
    /// Noise flips the bit in transit, then Eve may intercept it.
    #[default]
    NoiseThenEavesdrop,
    /// Eve intercepts first, the resent qubit then picks up noise.
    EavesdropThenNoise,
}

/// What Bob gets out of the channel for one qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelOutcome {
    pub received_bit: bool,
    pub intercepted: bool,
}

/// Classical model of a noisy quantum channel with an intercept-resend
/// eavesdropper sitting on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelModel {
    noise: f64,
    eavesdrop: f64,
    order: EffectOrder,
}

impl ChannelModel {
    pub fn new(noise: f64, eavesdrop: f64) -> Result<Self, ConfigError> {
        validate_prob("channel_noise", noise)?;
        validate_prob("eavesdrop", eavesdrop)?;

        Ok(Self {
            noise,
            eavesdrop,
            order: EffectOrder::default(),
        })
    }

    /// Perfect channel, no eavesdropper.
    pub fn ideal() -> Self {
        Self {
            noise: 0.0,
            eavesdrop: 0.0,
            order: EffectOrder::default(),
        }
    }

    pub fn with_order(mut self, order: EffectOrder) -> Self {
        self.order = order;
        self
    }

    pub fn noise(&self) -> f64 {
        self.noise
    }

    pub fn eavesdrop(&self) -> f64 {
        self.eavesdrop
    }

    pub fn order(&self) -> EffectOrder {
        self.order
    }

    /// Sends Alice's bit to Bob, applying noise and interception.
    ///
    /// Every qubit reaches Bob; there is no loss.
    pub fn transmit<E: EntropySource + ?Sized>(
        &self,
        alice_bit: bool,
        alice_basis: Basis,
        bob_basis: Basis,
        rng: &mut E,
    ) -> ChannelOutcome {
        match self.order {
            EffectOrder::NoiseThenEavesdrop => {
                let in_transit = self.apply_noise(alice_bit, rng);
                self.intercept_resend(in_transit, alice_basis, bob_basis, rng)
            }
            EffectOrder::EavesdropThenNoise => {
                let outcome = self.intercept_resend(alice_bit, alice_basis, bob_basis, rng);
                ChannelOutcome {
                    received_bit: self.apply_noise(outcome.received_bit, rng),
                    ..outcome
                }
            }
        }
    }

    /// Bit flip, independent of any basis.
    fn apply_noise<E: EntropySource + ?Sized>(&self, bit: bool, rng: &mut E) -> bool {
        if rng.flip_with_probability(self.noise) {
            !bit
        } else {
            bit
        }
    }

    fn intercept_resend<E: EntropySource + ?Sized>(
        &self,
        bit: bool,
        alice_basis: Basis,
        bob_basis: Basis,
        rng: &mut E,
    ) -> ChannelOutcome {
        if !rng.flip_with_probability(self.eavesdrop) {
            return ChannelOutcome {
                received_bit: bit,
                intercepted: false,
            };
        }

        // Eve measures in a random basis; a wrong guess yields a coin flip
        let eve_basis = rng.next_basis();
        let eve_bit = if eve_basis == alice_basis {
            bit
        } else {
            rng.next_bit()
        };

        // Resent in Eve's basis, Bob only reads it faithfully in the same basis
        let received_bit = if bob_basis == eve_basis {
            eve_bit
        } else {
            rng.next_bit()
        };

        ChannelOutcome {
            received_bit,
            intercepted: true,
        }
    }
}

/// Validate probability parameter
fn validate_prob(name: &'static str, p: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ConfigError::InvalidProbability { name, value: p });
    }
    Ok(())
}
