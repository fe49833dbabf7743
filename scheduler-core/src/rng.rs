use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG seeding, the sole source of non-determinism in the
/// engine (spec §5). The initial seed comes straight from `Config::seed`;
/// each backtrack reseeds with a function of the original seed, the
/// attempt count, and the day index so every retry explores a different
/// neighbourhood while staying reproducible (spec §4.3).
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn backtrack_seed(original_seed: u64, attempts: u32, day_idx: usize) -> u64 {
    original_seed
        .wrapping_add((attempts as u64).wrapping_mul(1000))
        .wrapping_add(day_idx as u64)
}
