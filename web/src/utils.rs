const HALF: f64 = 4_294_967_296.0;

/// Packs two uniform draws from `[0, 1)` into the high and low words of a seed.
fn seed_from_unit_draws(high: f64, low: f64) -> u64 {
    let word = |draw: f64| (draw.clamp(0.0, 1.0) * HALF).min(HALF - 1.0) as u64;
    (word(high) << 32) | word(low)
}

/// Forced seed from the location hash, or a fresh one from `Math.random`.
pub(crate) fn seed_or_random(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use js_sys::Math::random;
        seed_from_unit_draws(random(), random())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_seed_wins() {
        assert_eq!(seed_or_random(Some(42)), 42);
    }

    #[test]
    fn draws_fill_both_words() {
        assert_eq!(seed_from_unit_draws(0.0, 0.0), 0);
        assert_eq!(seed_from_unit_draws(0.5, 0.0), 1 << 63);
        assert_eq!(seed_from_unit_draws(0.0, 0.5), 1 << 31);
        assert_eq!(seed_from_unit_draws(1.0, 1.0), u64::MAX);
    }
}
