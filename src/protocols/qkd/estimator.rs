//! QBER estimation and the keep/discard decision.

use crate::core::errors::ConfigError;
use crate::core::utils;
use crate::protocols::qkd::sifting::SiftedKeyPair;
use serde::Serialize;
use std::fmt;

/// QBER percentage above which an eavesdropper can no longer be ruled out.
pub const DEFAULT_THRESHOLD_PERCENT: f64 = 11.0;

/// Number of leading key bits exposed on a secure run.
pub const KEY_PREVIEW_BITS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// QBER within the threshold, the key is kept.
    Secure,
    /// QBER above the threshold, the key is discarded.
    Aborted,
    /// Empty sifted key, the QBER is undefined.
    InsufficientData,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Secure => "SECURE",
            Verdict::Aborted => "ABORTED",
            Verdict::InsufficientData => "INSUFFICIENT_DATA",
        };
        f.write_str(label)
    }
}

/// Outcome of one BB84 run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    /// Bits left after sifting.
    pub sifted_length: usize,
    /// Sifted positions where Bob's bit differs from Alice's.
    pub errors: usize,
    /// Percentage of matching sifted bits, `None` on an empty sifted key.
    pub fidelity_percent: Option<f64>,
    /// `100 - fidelity_percent`.
    pub qber_percent: Option<f64>,
    /// Asymptotic secret fraction of the sifted key at this QBER.
    pub secure_key_fraction: Option<f64>,
    pub verdict: Verdict,
    /// Leading bits of Alice's sifted key, only on a secure run.
    pub key_preview: Option<Vec<bool>>,
}

impl RunResult {
    pub fn is_secure(&self) -> bool {
        self.verdict == Verdict::Secure
    }

    /// Key preview rendered as "0110...".
    pub fn key_preview_string(&self) -> Option<String> {
        self.key_preview.as_deref().map(utils::bits_to_string)
    }
}

/// Turns a sifted key pair into a [`RunResult`] using a QBER threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecurityEstimator {
    threshold_percent: f64,
}

impl Default for SecurityEstimator {
    fn default() -> Self {
        Self {
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
        }
    }
}

impl SecurityEstimator {
    pub fn new(threshold_percent: f64) -> Result<Self, ConfigError> {
        if !(0.0..=100.0).contains(&threshold_percent) {
            return Err(ConfigError::InvalidThreshold(threshold_percent));
        }
        Ok(Self { threshold_percent })
    }

    pub fn threshold_percent(&self) -> f64 {
        self.threshold_percent
    }

    pub fn estimate(&self, sifted: &SiftedKeyPair) -> RunResult {
        let sifted_length = sifted.len();
        let errors = sifted.mismatches();

        // Checked before any ratio is taken
        let Some(fidelity) = utils::percentage(sifted_length - errors, sifted_length) else {
            return RunResult {
                sifted_length,
                errors,
                fidelity_percent: None,
                qber_percent: None,
                secure_key_fraction: None,
                verdict: Verdict::InsufficientData,
                key_preview: None,
            };
        };

        let qber = 100.0 - fidelity;

        let (verdict, key_preview) = if qber > self.threshold_percent {
            (Verdict::Aborted, None)
        } else {
            let take = sifted_length.min(KEY_PREVIEW_BITS);
            (Verdict::Secure, Some(sifted.alice_key()[..take].to_vec()))
        };

        RunResult {
            sifted_length,
            errors,
            fidelity_percent: Some(fidelity),
            qber_percent: Some(qber),
            secure_key_fraction: Some(utils::secure_key_fraction(qber)),
            verdict,
            key_preview,
        }
    }
}
