//! Permutahedra and permutation orbit polytopes.

use polyview_geometry::linalg::{project_onto, sum_zero_basis};
use polyview_geometry::{HullAdapter, PointSet};

use crate::combinatorics::{permutations, signed_permutations};
use crate::{hull_shape, BuildError, BuildFn, BuildOutcome};

pub const BUILDERS: &[(&str, BuildFn)] = &[
    ("build_permutahedron", build_permutahedron),
    ("build_permutahedron_B3", build_permutahedron_b3),
    ("build_orbit_polytope", build_orbit_polytope),
];

/// Permutations of `(1, 2, 3, 4)` expressed in an orthonormal basis of the
/// hyperplane `x1 + x2 + x3 + x4 = 0`.
pub fn build_permutahedron(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    let points = orbit_in_sum_zero_hyperplane(&[1.0, 2.0, 3.0, 4.0])?;
    hull_shape(adapter, points, "Permutahedron")
}

/// Signed permutations of `(1, 2, 3)`, centred at the origin.
pub fn build_permutahedron_b3(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    let points = PointSet::new(signed_permutations(&[1.0, 2.0, 3.0]))?.centered();
    hull_shape(adapter, points, "Type B Permutahedron")
}

/// Orbit of `(1, 2, 2, 3)` under coordinate permutations, projected like the
/// permutahedron.
pub fn build_orbit_polytope(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    let points = orbit_in_sum_zero_hyperplane(&[1.0, 2.0, 2.0, 3.0])?;
    hull_shape(adapter, points, "Orbit Polytope")
}

fn orbit_in_sum_zero_hyperplane(seed: &[f64]) -> Result<PointSet, BuildError> {
    let basis = sum_zero_basis(seed.len());
    if basis.len() + 1 != seed.len() {
        return Err(BuildError::Invalid(
            "failed to compute orthonormal basis".to_string(),
        ));
    }
    let points = permutations(seed)
        .iter()
        .map(|p| project_onto(p, &basis))
        .collect();
    Ok(PointSet::new(points)?)
}
