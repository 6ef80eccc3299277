//! Weighted sampling over candidate pools
//!
//! Selection draws `r = uniform() * total_weight` and scans the candidates in
//! order, returning the first whose running weight sum reaches `r`. If float
//! error lets the scan fall through, the last candidate is returned, so a
//! non-empty pool always yields a pick.

use crate::rng::RandomSource;

/// Pick an index into `candidates` proportionally to `weight`
///
/// Negative and NaN weights count as zero. Returns `None` only for an empty
/// slice.
pub fn pick_index<T, R>(candidates: &[T], weight: impl Fn(&T) -> f32, rng: &mut R) -> Option<usize>
where
    R: RandomSource + ?Sized,
{
    if candidates.is_empty() {
        return None;
    }

    let weight_of = |c: &T| weight(c).max(0.0);
    let total: f32 = candidates.iter().map(&weight_of).sum();
    let roll = rng.uniform() * total;

    let mut running = 0.0;
    for (i, candidate) in candidates.iter().enumerate() {
        running += weight_of(candidate);
        if roll <= running {
            return Some(i);
        }
    }

    Some(candidates.len() - 1)
}

/// Pick one reference from `candidates` proportionally to `weight`
pub fn pick<'a, T, R>(candidates: &'a [T], weight: impl Fn(&T) -> f32, rng: &mut R) -> Option<&'a T>
where
    R: RandomSource + ?Sized,
{
    pick_index(candidates, weight, rng).map(|i| &candidates[i])
}

/// Pick one candidate and remove it from the pool
///
/// The remaining candidates keep their relative order.
pub fn pick_without_replacement<T, R>(
    candidates: &mut Vec<T>,
    weight: impl Fn(&T) -> f32,
    rng: &mut R,
) -> Option<T>
where
    R: RandomSource + ?Sized,
{
    pick_index(candidates, weight, rng).map(|i| candidates.remove(i))
}
