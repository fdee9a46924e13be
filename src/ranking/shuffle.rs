// src/ranking/shuffle.rs
use rand::Rng;

/// Fisher–Yates shuffle over a slice, in place.
///
/// Walks `i` from the last index down to 1 and swaps `i` with a uniformly
/// drawn `j` in `[0, i]`. Slices of length 0 or 1 draw nothing.
pub fn shuffle_in_place<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Returns a uniformly random permutation of `items` as a new vector.
/// The caller's slice is left untouched.
pub fn shuffled<T, R>(items: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut out = items.to_vec();
    shuffle_in_place(&mut out, rng);
    out
}
