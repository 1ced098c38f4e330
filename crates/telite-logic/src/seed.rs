//! Galaxy seed: three 16-bit words and the two operations that advance them.
//!
//! Every system in a galaxy is derived from this state, so the arithmetic
//! here is a reproducibility contract: `twist` is a per-byte rotate-left and
//! `shuffle` is a Fibonacci-style step, both wrapping at 16 bits.

use serde::{Deserialize, Serialize};

/// Seed words for galaxy one.
pub const DEFAULT_SEED: SeedState = SeedState {
    w0: 0x5A4A,
    w1: 0x0248,
    w2: 0xB753,
};

/// The 3×16-bit state from which a galaxy's systems are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeedState {
    pub w0: u16,
    pub w1: u16,
    pub w2: u16,
}

impl Default for SeedState {
    fn default() -> Self {
        DEFAULT_SEED
    }
}

impl SeedState {
    pub fn new(w0: u16, w1: u16, w2: u16) -> Self {
        Self { w0, w1, w2 }
    }

    /// Apply [`twist`] to each word independently.
    pub fn twist_all(&mut self) {
        self.w0 = twist(self.w0);
        self.w1 = twist(self.w1);
        self.w2 = twist(self.w2);
    }

    /// Advance the state one step: `w2' = w0 + w1 + w2`, older words shift down.
    pub fn shuffle(&mut self) {
        let next = self.w0.wrapping_add(self.w1).wrapping_add(self.w2);
        self.w0 = self.w1;
        self.w1 = self.w2;
        self.w2 = next;
    }

    /// High byte of a word.
    pub fn hi(word: u16) -> u8 {
        (word >> 8) as u8
    }

    /// Low byte of a word.
    pub fn lo(word: u16) -> u8 {
        (word & 0xFF) as u8
    }
}

impl std::fmt::Display for SeedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.w0, self.w1, self.w2)
    }
}

/// Rotate each byte lane of `x` left by one bit.
pub fn twist(x: u16) -> u16 {
    let rotate = |v: u16| -> u16 {
        let top = v & 0x80;
        2 * (v & 0x7F) + (top >> 7)
    };
    256 * rotate(x >> 8) + rotate(x & 0xFF)
}
