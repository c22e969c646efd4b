//! Utility functions for key statistics.
//!
//! This module contains helper functions for:
//! - Binary entropy and the asymptotic BB84 secret-key fraction.
//! - Rendering bit sequences for display.

/// Binary Shannon entropy $H_2(p) = -p \log_2 p - (1-p) \log_2 (1-p)$.
///
/// Defined as 0 at the endpoints.
pub fn binary_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        0.0
    } else {
        -p * p.log2() - (1.0 - p) * (1.0 - p).log2()
    }
}

/// Fraction of the sifted key that survives error correction and privacy
/// amplification in the asymptotic limit, $\max(0, 1 - 2 H_2(Q))$.
///
/// `qber_percent` is the QBER as a percentage (0 to 100). The fraction drops
/// to zero at roughly 11%.
pub fn secure_key_fraction(qber_percent: f64) -> f64 {
    let q = (qber_percent / 100.0).clamp(0.0, 0.5);
    (1.0 - 2.0 * binary_entropy(q)).max(0.0)
}

/// Renders bits as a string of '0' and '1'.
pub fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

/// `part / whole` as a percentage, `None` when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(100.0 * part as f64 / whole as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_entropy_peaks_at_half() {
        assert_eq!(binary_entropy(0.0), 0.0);
        assert_eq!(binary_entropy(1.0), 0.0);
        assert!((binary_entropy(0.5) - 1.0).abs() < 1e-12);
        assert!(binary_entropy(0.1) < binary_entropy(0.2));
    }

    #[test]
    fn secure_fraction_vanishes_near_eleven_percent() {
        assert!((secure_key_fraction(0.0) - 1.0).abs() < 1e-12);
        assert!(secure_key_fraction(5.0) > 0.3);
        assert!(secure_key_fraction(10.0) > 0.0);
        assert_eq!(secure_key_fraction(12.0), 0.0);
        assert_eq!(secure_key_fraction(50.0), 0.0);
    }

    #[test]
    fn renders_bits() {
        assert_eq!(bits_to_string(&[true, false, false, true]), "1001");
        assert_eq!(bits_to_string(&[]), "");
    }

    #[test]
    fn percentage_of_nothing_is_undefined() {
        assert_eq!(percentage(0, 0), None);
        assert_eq!(percentage(1, 4), Some(25.0));
    }
}
