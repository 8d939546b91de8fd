//! Deterministic seed mixing and random-draw helpers over an injected generator.

use rand_chacha::rand_core::Rng;

/// Uniform index in `0..bound`. `bound` must be positive.
pub fn roll_below<R: Rng>(rng: &mut R, bound: usize) -> usize {
    debug_assert!(bound > 0);
    (rng.next_u64() % bound as u64) as usize
}

/// Uniform integer in `min..=max`.
pub(crate) fn roll_inclusive<R: Rng>(rng: &mut R, min: u32, max: u32) -> u32 {
    debug_assert!(min <= max);
    let span = u64::from(max - min) + 1;
    min + (rng.next_u64() % span) as u32
}

/// Uniform float in `[0, 1)` built from the top 53 bits of one draw.
pub(crate) fn roll_unit<R: Rng>(rng: &mut R) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
}

pub(crate) fn roll_bool<R: Rng>(rng: &mut R) -> bool {
    rng.next_u64() & 1 == 1
}

/// Mixes the run seed and a 1-based level number into that level's generator seed.
pub fn derive_level_seed(run_seed: u64, level: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(level).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
