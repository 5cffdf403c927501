//! Weighted selection over a fixed-order alternative list.

use rand::Rng;
use rand::rngs::StdRng;

/// Resolve a roll against weighted alternatives.
///
/// Walks the list in order, subtracting each weight from `roll`; the first
/// alternative that brings it to or below zero wins. Alternatives with a
/// non-positive weight are skipped. Returns `fallback` when the roll
/// exceeds the total weight.
pub fn pick_at<T: Copy>(mut roll: f64, alternatives: &[(T, f64)], fallback: T) -> T {
    for &(candidate, weight) in alternatives {
        if weight <= 0.0 {
            continue;
        }
        roll -= weight;
        if roll <= 0.0 {
            return candidate;
        }
    }
    fallback
}

/// Draw one alternative with probability proportional to its weight.
///
/// Returns `fallback` when no alternative carries positive weight.
pub fn pick_weighted<T: Copy>(rng: &mut StdRng, alternatives: &[(T, f64)], fallback: T) -> T {
    let total: f64 = alternatives
        .iter()
        .map(|&(_, w)| w.max(0.0))
        .sum();
    if total <= 0.0 {
        return fallback;
    }
    let roll = rng.random_range(0.0..total);
    pick_at(roll, alternatives, fallback)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    const ALTS: [(&str, f64); 3] = [("a", 0.4), ("b", 0.2), ("c", 0.4)];

    #[test]
    fn roll_lands_in_first_band() {
        assert_eq!(pick_at(0.35, &ALTS, "x"), "a");
    }

    #[test]
    fn roll_lands_in_second_band() {
        assert_eq!(pick_at(0.5, &ALTS, "x"), "b");
    }

    #[test]
    fn band_edges_belong_to_the_earlier_alternative() {
        assert_eq!(pick_at(0.4, &ALTS, "x"), "a");
        assert_eq!(pick_at(0.6, &ALTS, "x"), "b");
    }

    #[test]
    fn zero_weight_alternatives_are_skipped() {
        let alts = [("a", 0.0), ("b", 1.0)];
        assert_eq!(pick_at(0.5, &alts, "x"), "b");
    }

    #[test]
    fn overshoot_falls_back() {
        assert_eq!(pick_at(2.0, &ALTS, "x"), "x");
    }

    #[test]
    fn all_zero_weights_fall_back() {
        let mut rng = StdRng::seed_from_u64(9);
        let alts = [("a", 0.0), ("b", 0.0)];
        assert_eq!(pick_weighted(&mut rng, &alts, "x"), "x");
    }

    #[test]
    fn draws_converge_to_weight_ratios() {
        let mut rng = StdRng::seed_from_u64(1234);
        let alts = [("a", 3.0), ("b", 1.0)];
        let mut hits_a = 0u32;
        let draws = 100_000;
        for _ in 0..draws {
            if pick_weighted(&mut rng, &alts, "x") == "a" {
                hits_a += 1;
            }
        }
        let ratio = f64::from(hits_a) / f64::from(draws);
        assert!((ratio - 0.75).abs() < 0.01, "ratio was {ratio}");
    }
}
