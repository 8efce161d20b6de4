//! Matroid independence polytopes.

use std::cmp::Reverse;

use polyview_geometry::{HullAdapter, PointSet, PointSetError};

use crate::{hull_shape, BuildError, BuildFn, BuildOutcome};

pub const BUILDERS: &[(&str, BuildFn)] = &[("build_stellahedron", build_stellahedron)];

/// Minkowski sum of the independence polytopes of `U(1,3)`, `U(2,3)` and
/// `U(3,3)`.
pub fn build_stellahedron(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    let sum = uniform_independence_points(1, 3)?
        .minkowski_sum(&uniform_independence_points(2, 3)?)?
        .minkowski_sum(&uniform_independence_points(3, 3)?)?;
    hull_shape(adapter, sum, "Stellahedron")
}

/// 0/1 vectors of length `n` with at most `rank` ones: the independent sets
/// of the uniform matroid `U(rank, n)`, ordered by size, then
/// lexicographically with earlier elements first.
pub fn uniform_independence_points(rank: usize, n: usize) -> Result<PointSet, PointSetError> {
    let mut sets: Vec<Vec<u8>> = (0u32..1 << n)
        .map(|mask| (0..n).map(|i| ((mask >> i) & 1) as u8).collect::<Vec<u8>>())
        .filter(|set| set.iter().filter(|&&b| b == 1).count() <= rank)
        .collect();
    sets.sort_by_key(|set| (set.iter().filter(|&&b| b == 1).count(), Reverse(set.clone())));

    PointSet::new(
        sets.into_iter()
            .map(|set| set.into_iter().map(f64::from).collect())
            .collect(),
    )
}
