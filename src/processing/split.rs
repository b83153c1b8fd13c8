/*! Deterministic train/val/test splitting

Indices `[0, N)` are shuffled with a [ChaCha8Rng] seeded through [SeedableRng::seed_from_u64], then cut at the truncated
`train * N` and `val * N` positions (see [SplitFractions]).
Each part is sorted back in ascending order.

The shuffle is a Fisher–Yates pass going from the last position down to 1,
swapping position `i` with a uniformly drawn `j` in `0..=i`.
`j` is drawn with Lemire's widening multiplication: `(x * bound) >> 64` for a 64-bit draw `x`,
rejecting draws whose low half is below `2^64 mod bound`.
Both the generator and the draw are fixed here, so splits do not depend on `rand` internals.
!*/
use log::info;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::SplitFractions;

/// Split names, in the order their datafiles are written.
pub const SPLIT_NAMES: [&str; 3] = ["test", "val", "train"];

/// Three disjoint, sorted index sets covering `[0, N)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splits {
    pub train: Vec<usize>,
    pub val: Vec<usize>,
    pub test: Vec<usize>,
}

impl Splits {
    /// Get the indices of the split named `name`.
    pub fn get(&self, name: &str) -> Option<&[usize]> {
        match name {
            "train" => Some(&self.train),
            "val" => Some(&self.val),
            "test" => Some(&self.test),
            _ => None,
        }
    }
}

/// Uniform draw in `0..bound`. `bound` must be positive.
pub fn gen_index<R: RngCore>(rng: &mut R, bound: usize) -> usize {
    let bound = bound as u64;
    let threshold = bound.wrapping_neg() % bound;
    loop {
        let m = u128::from(rng.next_u64()) * u128::from(bound);
        if m as u64 >= threshold {
            return (m >> 64) as usize;
        }
    }
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle<T, R: RngCore>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = gen_index(rng, i + 1);
        items.swap(i, j);
    }
}

/// Split `[0, n)` using `seed` and `fractions`.
pub fn split(n: usize, seed: u64, fractions: &SplitFractions) -> Splits {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    shuffle(&mut indices, &mut rng);

    let (cut_train, cut_val) = fractions.cuts(n);
    let cut_train = cut_train.min(n);
    let cut_val = cut_val.clamp(cut_train, n);

    let mut test = indices.split_off(cut_val);
    let mut val = indices.split_off(cut_train);
    let mut train = indices;

    train.sort_unstable();
    val.sort_unstable();
    test.sort_unstable();

    info!(
        "split {} items: {} train, {} val, {} test",
        n,
        train.len(),
        val.len(),
        test.len()
    );
    Splits { train, val, test }
}
