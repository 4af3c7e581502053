//! Index selection for choice-style fields.

use rand::Rng;

/// Pick `k` distinct indices out of `0..n` with a partial Fisher–Yates shuffle.
///
/// `k` is clamped to `n`. The result is in selection order, not sorted.
pub fn sample_indices<R: Rng + ?Sized>(rng: &mut R, n: usize, k: usize) -> Vec<usize> {
    let k = k.min(n);
    let mut pool: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let j = rng.gen_range(i..n);
        pool.swap(i, j);
    }
    pool.truncate(k);
    pool
}

/// How many checkboxes to tick in a group of `n`: uniform over
/// `[min(lo, n), min(hi, n)]`.
pub fn checkbox_count<R: Rng + ?Sized>(rng: &mut R, n: usize, lo: usize, hi: usize) -> usize {
    let hi = hi.min(n);
    let lo = lo.min(hi);
    rng.gen_range(lo..=hi)
}

/// Dropdown option to pick out of `n`, or `None` when nothing selectable is left.
pub fn dropdown_index<R: Rng + ?Sized>(rng: &mut R, n: usize, skip_first: bool) -> Option<usize> {
    let start = usize::from(skip_first);
    if n <= start {
        return None;
    }
    Some(rng.gen_range(start..n))
}

/// Scale option to pick out of `n`: uniform when `random`, otherwise the
/// (lower) middle option.
pub fn scale_index<R: Rng + ?Sized>(rng: &mut R, n: usize, random: bool) -> Option<usize> {
    match n {
        0 => None,
        _ if random => Some(rng.gen_range(0..n)),
        _ => Some((n - 1) / 2),
    }
}

/// Uniform pick among `n` single-choice options.
pub fn choice_index<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Option<usize> {
    (n > 0).then(|| rng.gen_range(0..n))
}
