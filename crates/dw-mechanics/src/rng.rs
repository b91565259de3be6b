//! Seeded, reproducible random number generation.
//!
//! Every roll in the engine flows through a caller-owned generator, so a
//! session that stores its seed can replay its dice exactly. [`Mulberry32`]
//! is the house generator: one word of state, stable across releases.
//! It also implements [`RngCore`]/[`SeedableRng`], so anything in the rand
//! ecosystem (including `StdRng`) can stand in wherever the roll functions
//! accept a generic generator.

use rand::{RngCore, SeedableRng};

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Hash an arbitrary seed key into a 32-bit seed (FNV-1a).
///
/// The mapping is fixed for all time: session keys stored months apart must
/// keep producing the same dice.
pub fn hash_seed(key: &str) -> u32 {
    let mut hash = FNV_OFFSET;
    for byte in key.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// The mulberry32 generator: a single `u32` of state, explicit and
/// snapshot-friendly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// A generator starting from the given seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// A generator seeded from a string key via [`hash_seed`].
    pub fn from_key(key: &str) -> Self {
        Self::new(hash_seed(key))
    }

    /// Next value in `[0, 1)`.
    ///
    /// Die faces are derived from this mapping (`floor(f * sides) + 1`), so
    /// roll streams depend only on this generator, never on distribution
    /// code elsewhere.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let mut z = self.state;
        z = (z ^ (z >> 15)).wrapping_mul(z | 1);
        z ^= z.wrapping_add((z ^ (z >> 7)).wrapping_mul(z | 61));
        z ^ (z >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_u32());
        let hi = u64::from(self.next_u32());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}

/// One die face in `1..=sides`.
///
/// A `sides` of zero is a caller error and is clamped to one rather than
/// panicking, matching the parser's tolerance for `NdM` with `M = 0`.
pub fn roll_die<R: RngCore>(rng: &mut R, sides: u32) -> u32 {
    let sides = sides.max(1);
    let f = f64::from(rng.next_u32()) / 4_294_967_296.0;
    (f * f64::from(sides)).floor() as u32 + 1
}
