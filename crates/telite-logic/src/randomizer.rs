//! The low-quality trade generators behind market volatility
//! and in-game chance events.
//!
//! Both algorithms implement [`rand::RngCore`]; the game is generic over
//! `RngCore`, so any generator (for instance `rand::rngs::mock::StepRng` in
//! tests) can stand in for them. Galaxy and goat-soup generation never draw
//! from here.

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Initial accumulator of the linear-congruential generator.
pub const LCC_SEED: u32 = 12345;
const LCC_MULTIPLIER: u32 = 214013;
const LCC_INCREMENT: u32 = 2531011;

/// Initial counter of the shift-and-subtract generator.
pub const SAS_SEED: u32 = LCC_SEED - 1;

/// Which algorithm a [`TradeRng`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Linear congruential, 15-bit output.
    Lcc,
    /// Shift-and-subtract polynomial over a decreasing counter, 31-bit output.
    #[default]
    Sas,
}

/// A single-stream trade randomizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeRng {
    Lcc { next: u32 },
    Sas { counter: u32 },
}

impl Default for TradeRng {
    fn default() -> Self {
        Self::new(Algorithm::default())
    }
}

impl TradeRng {
    /// A generator in its initial state.
    pub fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Lcc => TradeRng::Lcc { next: LCC_SEED },
            Algorithm::Sas => TradeRng::Sas { counter: SAS_SEED },
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            TradeRng::Lcc { .. } => Algorithm::Lcc,
            TradeRng::Sas { .. } => Algorithm::Sas,
        }
    }

    /// Draw the next value.
    pub fn value(&mut self) -> u32 {
        match self {
            TradeRng::Lcc { next } => {
                *next = next.wrapping_mul(LCC_MULTIPLIER).wrapping_add(LCC_INCREMENT);
                (*next >> 16) & 0x7FFF
            }
            TradeRng::Sas { counter } => {
                let lr = *counter;
                let mut r = (lr << 3).wrapping_sub(lr);
                r = (r << 3).wrapping_add(lr);
                r = (r << 1).wrapping_add(lr);
                r = (r << 4).wrapping_sub(lr);
                r = (r << 1).wrapping_sub(lr);
                r = r.wrapping_add(0xE60);
                *counter = counter.wrapping_sub(1);
                r & 0x7FFF_FFFF
            }
        }
    }
}

impl RngCore for TradeRng {
    fn next_u32(&mut self) -> u32 {
        self.value()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.value() as u64;
        let lo = self.value() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.value().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Reduce a draw to a signed volatility byte.
pub fn volatility(draw: u32) -> i8 {
    (draw & 0xFF) as u8 as i8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_sas_sequence() {
        let mut rng = TradeRng::new(Algorithm::Sas);
        assert_eq!(rng.next_u32(), 45392568);
        assert_eq!(rng.next_u32(), 45388891);
        assert_eq!(rng.next_u32(), 45385214);
    }

    #[test]
    fn test_sas_closed_form() {
        let mut rng = TradeRng::new(Algorithm::Sas);
        for k in 0..100u32 {
            let lr = SAS_SEED - k;
            assert_eq!(rng.value(), (3677 * lr + 0xE60) & 0x7FFF_FFFF);
        }
    }

    #[test]
    fn test_sas_counter_passes_zero() {
        let mut rng = TradeRng::Sas { counter: 0 };
        assert_eq!(rng.value(), 0xE60);
        // Counter is now -1: 3677·(−1) + 0xE60 = 3, masked to 31 bits.
        assert_eq!(rng.value(), 3);
        assert!(rng.value() <= 0x7FFF_FFFF);
    }

    #[test]
    fn test_lcc_sequence() {
        let mut rng = TradeRng::new(Algorithm::Lcc);
        assert_eq!(rng.next_u32(), 7584);
        assert_eq!(rng.next_u32(), 19164);
        assert_eq!(rng.next_u32(), 25795);
    }

    #[test]
    fn test_lcc_output_is_15_bits() {
        let mut rng = TradeRng::new(Algorithm::Lcc);
        for _ in 0..1000 {
            assert!(rng.next_u32() <= 0x7FFF);
        }
    }

    #[test]
    fn test_default_is_sas() {
        assert_eq!(TradeRng::default().algorithm(), Algorithm::Sas);
    }

    #[test]
    fn test_volatility_is_signed_low_byte() {
        assert_eq!(volatility(0x1_7F), 127);
        assert_eq!(volatility(0xFF), -1);
        assert_eq!(volatility(0x80), -128);
    }

    #[test]
    fn test_fill_bytes_partial_chunk() {
        let mut a = TradeRng::new(Algorithm::Lcc);
        let mut b = TradeRng::new(Algorithm::Lcc);
        let mut buf = [0u8; 6];
        a.fill_bytes(&mut buf);
        assert_eq!(buf[..4], b.value().to_le_bytes());
        assert_eq!(buf[4..], b.value().to_le_bytes()[..2]);
    }

    #[test]
    fn test_step_rng_substitutes() {
        let mut rng = StepRng::new(5, 1);
        assert_eq!(rng.next_u32(), 5);
        assert_eq!(rng.next_u32(), 6);
    }

    #[test]
    fn test_algorithm_serde_names() {
        let json = serde_json::to_string(&Algorithm::Lcc).unwrap();
        assert_eq!(json, "\"lcc\"");
        let parsed: Algorithm = serde_json::from_str("\"sas\"").unwrap();
        assert_eq!(parsed, Algorithm::Sas);
    }
}
