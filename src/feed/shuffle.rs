//! Fisher–Yates shuffles: seeded (deterministic) and unseeded.

use chrono::Utc;
use rand::Rng;

/// LCG multiplier.
const LCG_MUL: i64 = 9301;
/// LCG increment.
const LCG_INC: i64 = 49297;
/// LCG modulus; also the denominator of the derived fraction.
const LCG_MOD: i64 = 233_280;

/// Parse a seed string into the working LCG state.
///
/// Unparseable seeds fall back to the current time in milliseconds.
fn working_seed(seed: &str) -> i64 {
    match seed.trim().parse::<i64>() {
        Ok(value) => value,
        Err(_) => {
            let now = Utc::now().timestamp_millis();
            tracing::debug!(seed = %seed, fallback = now, "Unparseable shuffle seed, using current time");
            now
        }
    }
}

/// Shuffle a copy of `items` deterministically from `seed`.
///
/// The same `(items, seed)` pair always yields the same order. The input
/// slice is never modified.
pub fn shuffle<T: Clone>(items: &[T], seed: &str) -> Vec<T> {
    let mut shuffled = items.to_vec();
    // Reducing first keeps the recurrence congruent while avoiding overflow
    let mut state = working_seed(seed).rem_euclid(LCG_MOD);

    for i in (1..shuffled.len()).rev() {
        state = (state * LCG_MUL + LCG_INC) % LCG_MOD;
        let fraction = state as f64 / LCG_MOD as f64;
        let j = (fraction * (i + 1) as f64).floor() as usize;
        shuffled.swap(i, j.min(i));
    }

    shuffled
}

/// Shuffle a copy of `items` with a caller-supplied random source.
///
/// No determinism guarantee unless `rng` itself is seeded.
pub fn shuffle_random<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}
