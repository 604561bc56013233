//! Real-coded variation operators.
//!
//! Bounded simulated binary crossover (SBX) and bounded polynomial mutation,
//! both operating in place on [`Individual`] gene vectors. Every gene a
//! variation operator produces is clamped into `[low, up]`; no operator may
//! leave an out-of-bound component.
//!
//! Both operators drop the fitness of anything they touch back to
//! `Unevaluated`. For crossover this happens unconditionally on both
//! children once a pair is attempted, even when no dimension-level trial
//! fires: the fitness state must never be trusted after an operator
//! application without an explicit re-check.
//!
//! # References
//!
//! - Deb & Agrawal (1995), "Simulated Binary Crossover for Continuous
//!   Search Space"
//! - Deb (2001), *Multi-Objective Optimization using Evolutionary
//!   Algorithms*

use crate::individual::{Bounds, Individual};
use rand::Rng;

/// Two parent values closer than this are treated as identical and the
/// dimension is skipped, avoiding division by zero in the spread term.
const SBX_EPSILON: f64 = 1e-14;

/// Bounded simulated binary crossover over a pair of equal-length
/// individuals, in place.
///
/// For each dimension independently (with a 0.5 coin gate per dimension),
/// one uniform draw produces a spread factor distributed via the polynomial
/// density parameterized by `eta`; the two candidate offspring values are
/// reflections of the parent pair around their midpoint, contracted toward
/// the nearer bound, and clamped into `bounds`. Which child receives which
/// candidate is decided by a second coin flip.
///
/// Larger `eta` keeps children closer to their parents.
///
/// Both children's fitness is invalidated unconditionally.
///
/// # Panics
///
/// Panics in debug builds if the parents have different lengths.
pub fn sbx_crossover<R: Rng>(
    c1: &mut Individual,
    c2: &mut Individual,
    bounds: Bounds,
    eta: f64,
    rng: &mut R,
) {
    debug_assert_eq!(c1.len(), c2.len(), "parents must have equal length");
    let (xl, xu) = (bounds.low, bounds.up);

    for i in 0..c1.len() {
        if rng.random::<f64>() > 0.5 {
            continue;
        }
        let (v1, v2) = (c1.genes()[i], c2.genes()[i]);
        if (v1 - v2).abs() <= SBX_EPSILON {
            continue;
        }
        let x1 = v1.min(v2);
        let x2 = v2.max(v1);
        let u = rng.random::<f64>();

        // Contract toward the lower bound for the low child, toward the
        // upper bound for the high child; one shared uniform draw.
        let beta_low = 1.0 + 2.0 * (x1 - xl) / (x2 - x1);
        let low = 0.5 * (x1 + x2 - spread_factor(u, beta_low, eta) * (x2 - x1));

        let beta_high = 1.0 + 2.0 * (xu - x2) / (x2 - x1);
        let high = 0.5 * (x1 + x2 + spread_factor(u, beta_high, eta) * (x2 - x1));

        if rng.random::<f64>() <= 0.5 {
            c1.genes_mut()[i] = high;
            c2.genes_mut()[i] = low;
        } else {
            c1.genes_mut()[i] = low;
            c2.genes_mut()[i] = high;
        }
    }

    c1.clamp(bounds);
    c2.clamp(bounds);
    c1.invalidate();
    c2.invalidate();
}

/// Spread factor beta_q for one boundary-aware SBX term.
fn spread_factor(u: f64, beta: f64, eta: f64) -> f64 {
    let alpha = 2.0 - beta.powf(-(eta + 1.0));
    if u <= 1.0 / alpha {
        (u * alpha).powf(1.0 / (eta + 1.0))
    } else {
        (1.0 / (2.0 - u * alpha)).powf(1.0 / (eta + 1.0))
    }
}

/// Bounded polynomial mutation, in place.
///
/// Each dimension mutates independently with probability `indpb`. The
/// perturbation is asymmetric around the gene's position between the
/// bounds: the polynomial density distinguishes the distance to the lower
/// bound from the distance to the upper one, so genes near a bound are
/// pushed inward more often than outward. Results are clamped into
/// `bounds`.
///
/// Larger `eta` produces smaller perturbations.
///
/// The individual's fitness is invalidated; the caller applies the outer
/// per-individual mutation probability before invoking this.
pub fn polynomial_mutation<R: Rng>(
    ind: &mut Individual,
    bounds: Bounds,
    eta: f64,
    indpb: f64,
    rng: &mut R,
) {
    let (xl, xu) = (bounds.low, bounds.up);
    let range = xu - xl;
    let mut_pow = 1.0 / (eta + 1.0);

    for i in 0..ind.len() {
        if rng.random::<f64>() > indpb {
            continue;
        }
        let x = ind.genes()[i];
        let delta_low = (x - xl) / range;
        let delta_high = (xu - x) / range;
        let u = rng.random::<f64>();

        let delta_q = if u < 0.5 {
            let xy = 1.0 - delta_low;
            let val = 2.0 * u + (1.0 - 2.0 * u) * xy.powf(eta + 1.0);
            val.powf(mut_pow) - 1.0
        } else {
            let xy = 1.0 - delta_high;
            let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * xy.powf(eta + 1.0);
            1.0 - val.powf(mut_pow)
        };

        ind.genes_mut()[i] = x + delta_q * range;
    }

    ind.clamp(bounds);
    ind.invalidate();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    const BOUNDS: Bounds = Bounds { low: -3.0, up: 3.0 };

    fn within_bounds(ind: &Individual, bounds: Bounds) -> bool {
        ind.genes().iter().all(|&g| bounds.contains(g) && g.is_finite())
    }

    // ---- SBX ----

    #[test]
    fn test_sbx_children_within_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let mut a = Individual::random(5, BOUNDS, &mut rng);
            let mut b = Individual::random(5, BOUNDS, &mut rng);
            sbx_crossover(&mut a, &mut b, BOUNDS, 20.0, &mut rng);
            assert!(within_bounds(&a, BOUNDS), "child out of bounds: {a:?}");
            assert!(within_bounds(&b, BOUNDS), "child out of bounds: {b:?}");
        }
    }

    #[test]
    fn test_sbx_children_within_bounds_for_small_eta() {
        // Small eta spreads children far from their parents, which is the
        // regime where clamping actually fires.
        let mut rng = create_rng(123);
        for _ in 0..200 {
            let mut a = Individual::random(5, BOUNDS, &mut rng);
            let mut b = Individual::random(5, BOUNDS, &mut rng);
            sbx_crossover(&mut a, &mut b, BOUNDS, 0.5, &mut rng);
            assert!(within_bounds(&a, BOUNDS));
            assert!(within_bounds(&b, BOUNDS));
        }
    }

    #[test]
    fn test_sbx_invalidates_both_children() {
        let mut rng = create_rng(42);
        let mut a = Individual::random(3, BOUNDS, &mut rng);
        let mut b = Individual::random(3, BOUNDS, &mut rng);
        a.set_score(1.0);
        b.set_score(2.0);
        sbx_crossover(&mut a, &mut b, BOUNDS, 20.0, &mut rng);
        assert!(a.is_stale());
        assert!(b.is_stale());
    }

    #[test]
    fn test_sbx_invalidates_even_without_gene_change() {
        // Identical parents: every dimension is skipped, values stay put,
        // but the fitness must still not be trusted.
        let mut rng = create_rng(42);
        let mut a = Individual::new(vec![1.0, -2.0, 0.5]);
        let mut b = Individual::new(vec![1.0, -2.0, 0.5]);
        a.set_score(0.9);
        b.set_score(0.9);
        sbx_crossover(&mut a, &mut b, BOUNDS, 20.0, &mut rng);
        assert_eq!(a.genes(), &[1.0, -2.0, 0.5]);
        assert_eq!(b.genes(), &[1.0, -2.0, 0.5]);
        assert!(a.is_stale());
        assert!(b.is_stale());
    }

    #[test]
    fn test_sbx_identical_parents_no_nan() {
        // Zero-variance population: no division-by-zero blowups.
        let mut rng = create_rng(7);
        for _ in 0..100 {
            let mut a = Individual::new(vec![2.999, 2.999, 2.999]);
            let mut b = Individual::new(vec![2.999, 2.999, 2.999]);
            sbx_crossover(&mut a, &mut b, BOUNDS, 20.0, &mut rng);
            assert!(within_bounds(&a, BOUNDS));
            assert!(within_bounds(&b, BOUNDS));
        }
    }

    #[test]
    fn test_sbx_parents_at_bounds() {
        let mut rng = create_rng(99);
        for _ in 0..100 {
            let mut a = Individual::new(vec![BOUNDS.low, BOUNDS.up]);
            let mut b = Individual::new(vec![BOUNDS.up, BOUNDS.low]);
            sbx_crossover(&mut a, &mut b, BOUNDS, 2.0, &mut rng);
            assert!(within_bounds(&a, BOUNDS));
            assert!(within_bounds(&b, BOUNDS));
        }
    }

    #[test]
    fn test_mutation_clamps_whole_vector() {
        // The operator finishes with a whole-vector clamp, so even genes
        // the dimension-level trials never touched end up inside bounds.
        let mut rng = create_rng(42);
        let mut ind = Individual::new(vec![-9.0, 9.0, 0.0]);
        polynomial_mutation(&mut ind, BOUNDS, 20.0, 0.0, &mut rng);
        assert_eq!(ind.genes(), &[BOUNDS.low, BOUNDS.up, 0.0]);
    }

    #[test]
    fn test_sbx_deterministic_under_fixed_seed() {
        let make = || {
            (
                Individual::new(vec![-1.0, 0.5, 2.0]),
                Individual::new(vec![1.5, -2.5, 0.0]),
            )
        };
        let (mut a1, mut b1) = make();
        let (mut a2, mut b2) = make();
        sbx_crossover(&mut a1, &mut b1, BOUNDS, 20.0, &mut create_rng(5));
        sbx_crossover(&mut a2, &mut b2, BOUNDS, 20.0, &mut create_rng(5));
        assert_eq!(a1.genes(), a2.genes());
        assert_eq!(b1.genes(), b2.genes());
    }

    // ---- Polynomial mutation ----

    #[test]
    fn test_mutation_stays_within_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let mut ind = Individual::random(5, BOUNDS, &mut rng);
            polynomial_mutation(&mut ind, BOUNDS, 20.0, 1.0, &mut rng);
            assert!(within_bounds(&ind, BOUNDS), "mutant out of bounds: {ind:?}");
        }
    }

    #[test]
    fn test_mutation_stays_within_bounds_for_small_eta() {
        let mut rng = create_rng(123);
        for _ in 0..200 {
            let mut ind = Individual::random(5, BOUNDS, &mut rng);
            polynomial_mutation(&mut ind, BOUNDS, 0.5, 1.0, &mut rng);
            assert!(within_bounds(&ind, BOUNDS));
        }
    }

    #[test]
    fn test_mutation_at_bounds_no_nan() {
        let mut rng = create_rng(7);
        for _ in 0..100 {
            let mut ind = Individual::new(vec![BOUNDS.low, BOUNDS.up, 0.0]);
            polynomial_mutation(&mut ind, BOUNDS, 20.0, 1.0, &mut rng);
            assert!(within_bounds(&ind, BOUNDS));
        }
    }

    #[test]
    fn test_mutation_invalidates_fitness() {
        let mut rng = create_rng(42);
        let mut ind = Individual::random(3, BOUNDS, &mut rng);
        ind.set_score(0.8);
        polynomial_mutation(&mut ind, BOUNDS, 20.0, 1.0, &mut rng);
        assert!(ind.is_stale());
    }

    #[test]
    fn test_mutation_indpb_one_changes_genes() {
        let mut rng = create_rng(42);
        let original = Individual::new(vec![0.0, 0.0, 0.0, 0.0, 0.0]);
        let mut ind = original.clone();
        polynomial_mutation(&mut ind, BOUNDS, 20.0, 1.0, &mut rng);
        assert_ne!(ind.genes(), original.genes());
    }

    #[test]
    fn test_mutation_indpb_zero_is_identity_on_genes() {
        let mut rng = create_rng(42);
        let original = Individual::new(vec![1.0, -1.0, 2.0]);
        let mut ind = original.clone();
        polynomial_mutation(&mut ind, BOUNDS, 20.0, 0.0, &mut rng);
        assert_eq!(ind.genes(), original.genes());
        // Invalidation still happens; the caller gated the outer trial.
        assert!(ind.is_stale());
    }

    #[test]
    fn test_mutation_deterministic_under_fixed_seed() {
        let mut a = Individual::new(vec![-1.0, 0.5, 2.0]);
        let mut b = Individual::new(vec![-1.0, 0.5, 2.0]);
        polynomial_mutation(&mut a, BOUNDS, 20.0, 0.5, &mut create_rng(5));
        polynomial_mutation(&mut b, BOUNDS, 20.0, 0.5, &mut create_rng(5));
        assert_eq!(a.genes(), b.genes());
    }

    #[test]
    fn test_high_eta_keeps_children_near_parents() {
        let mut rng = create_rng(42);
        let mut max_dev: f64 = 0.0;
        for _ in 0..100 {
            let mut a = Individual::new(vec![0.0; 5]);
            let mut b = Individual::new(vec![0.2; 5]);
            sbx_crossover(&mut a, &mut b, BOUNDS, 100.0, &mut rng);
            for i in 0..5 {
                max_dev = max_dev.max((a.genes()[i] - 0.1).abs());
                max_dev = max_dev.max((b.genes()[i] - 0.1).abs());
            }
        }
        // With eta = 100 the offspring cluster tightly around the parents.
        assert!(max_dev < 1.0, "expected tight clustering, max deviation {max_dev}");
    }
}
