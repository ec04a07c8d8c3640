use rand::Rng;

/// Add up to `jitter_percent` of random jitter on top of `base_ms`.
///
/// A zero percentage still draws from a one-element range so the result is
/// exactly `base_ms`.
pub fn jitter_wait(base_ms: u64, jitter_percent: u32) -> u64 {
    let jitter_range = if jitter_percent == 0 {
        1
    } else {
        std::cmp::max(1, (base_ms.saturating_mul(u64::from(jitter_percent))) / 100)
    };
    let mut rng = rand::rng();
    base_ms.saturating_add(rng.random_range(0..jitter_range))
}

#[cfg(test)]
mod tests {
    use super::jitter_wait;

    #[test]
    fn zero_jitter_is_exact() {
        for base in [0, 1, 250, 8_000] {
            assert_eq!(jitter_wait(base, 0), base);
        }
    }

    #[test]
    fn jitter_stays_within_percentage() {
        for _ in 0..200 {
            let w = jitter_wait(1_000, 20);
            assert!((1_000..1_200).contains(&w), "got {w}");
        }
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        assert_eq!(jitter_wait(u64::MAX, 0), u64::MAX);
        assert_eq!(jitter_wait(u64::MAX, 50), u64::MAX);
    }
}
