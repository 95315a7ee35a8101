//! Overlap estimates from measured swap-test results.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// How often the swap-test result bit read 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapTestOutcome {
    ones: u64,
    shots: u64,
}

impl SwapTestOutcome {
    /// An outcome of `ones` ones in `shots` shots.
    pub fn new(ones: u64, shots: u64) -> ModelResult<Self> {
        if shots == 0 {
            return Err(ModelError::InvalidCounts("no shots recorded".into()));
        }
        if ones > shots {
            return Err(ModelError::InvalidCounts(format!(
                "{ones} ones out of {shots} shots"
            )));
        }
        Ok(Self { ones, shots })
    }

    /// Tally result bit `bit` over a bitstring → count histogram.
    ///
    /// Bitstrings are big-endian: classical bit 0 is the rightmost
    /// character. Spaces between register groups (`"1 01"`) are ignored.
    pub fn from_counts<'a, I>(counts: I, bit: usize) -> ModelResult<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a u64)>,
    {
        let mut ones = 0_u64;
        let mut shots = 0_u64;

        for (bitstring, &count) in counts {
            let bits: Vec<char> = bitstring.chars().filter(|c| !c.is_whitespace()).collect();
            if let Some(bad) = bits.iter().find(|c| !matches!(c, '0' | '1')) {
                return Err(ModelError::InvalidCounts(format!(
                    "unexpected character '{bad}' in bitstring \"{bitstring}\""
                )));
            }
            if bit >= bits.len() {
                return Err(ModelError::InvalidCounts(format!(
                    "bit {bit} out of range for bitstring \"{bitstring}\""
                )));
            }

            shots = shots
                .checked_add(count)
                .ok_or_else(|| ModelError::InvalidCounts("shot total overflows".into()))?;
            if bits[bits.len() - 1 - bit] == '1' {
                ones += count;
            }
        }

        Self::new(ones, shots)
    }

    /// Shots where the result bit was 1.
    pub fn ones(&self) -> u64 {
        self.ones
    }

    /// Total shots.
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Observed P(1).
    #[allow(clippy::cast_precision_loss)]
    pub fn probability_one(&self) -> f64 {
        self.ones as f64 / self.shots as f64
    }

    /// Estimated |⟨ψ|φ⟩|², `1 - 2·P(1)` clamped to `[0, 1]`.
    pub fn overlap(&self) -> f64 {
        (1.0 - 2.0 * self.probability_one()).clamp(0.0, 1.0)
    }

    /// Binomial standard error of the unclamped overlap estimate.
    #[allow(clippy::cast_precision_loss)]
    pub fn standard_error(&self) -> f64 {
        let p = self.probability_one();
        2.0 * (p * (1.0 - p) / self.shots as f64).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    fn counts(entries: &[(&str, u64)]) -> BTreeMap<String, u64> {
        entries.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    #[test]
    fn test_identical_states() {
        let outcome = SwapTestOutcome::new(0, 1000).unwrap();
        assert_eq!(outcome.probability_one(), 0.0);
        assert_eq!(outcome.overlap(), 1.0);
        assert_eq!(outcome.standard_error(), 0.0);
    }

    #[test]
    fn test_orthogonal_states() {
        let outcome = SwapTestOutcome::new(500, 1000).unwrap();
        assert!((outcome.overlap() - 0.0).abs() < 1e-12);
        assert!((outcome.standard_error() - 2.0 * (0.25_f64 / 1000.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_overlap_is_clamped() {
        let outcome = SwapTestOutcome::new(700, 1000).unwrap();
        assert_eq!(outcome.overlap(), 0.0);
    }

    #[test]
    fn test_invalid_outcomes() {
        assert!(matches!(
            SwapTestOutcome::new(0, 0),
            Err(ModelError::InvalidCounts(_))
        ));
        assert!(SwapTestOutcome::new(11, 10).is_err());
    }

    #[test]
    fn test_from_counts_rightmost_is_bit_zero() {
        let counts = counts(&[("01", 30), ("10", 50), ("11", 20)]);

        let bit0 = SwapTestOutcome::from_counts(&counts, 0).unwrap();
        assert_eq!((bit0.ones(), bit0.shots()), (50, 100));

        let bit1 = SwapTestOutcome::from_counts(&counts, 1).unwrap();
        assert_eq!((bit1.ones(), bit1.shots()), (70, 100));
    }

    #[test]
    fn test_from_counts_ignores_register_spacing() {
        let counts: HashMap<String, u64> =
            [("1 00".to_string(), 3), ("0 11".to_string(), 7)].into();
        let outcome = SwapTestOutcome::from_counts(&counts, 2).unwrap();
        assert_eq!((outcome.ones(), outcome.shots()), (3, 10));
    }

    #[test]
    fn test_from_counts_errors() {
        assert!(SwapTestOutcome::from_counts(&counts(&[("0", 4)]), 1).is_err());
        assert!(SwapTestOutcome::from_counts(&counts(&[("0x1", 4)]), 0).is_err());
        assert!(SwapTestOutcome::from_counts(&counts(&[]), 0).is_err());
        assert!(SwapTestOutcome::from_counts(&counts(&[("1", 0)]), 0).is_err());
    }
}
