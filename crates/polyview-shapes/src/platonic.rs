//! The five Platonic solids.

use polyview_geometry::{HullAdapter, PointSet};

use crate::combinatorics::{cyclic_shifts, sign_patterns};
use crate::{hull_shape, BuildError, BuildFn, BuildOutcome};

pub const BUILDERS: &[(&str, BuildFn)] = &[
    ("build_tetrahedron", build_tetrahedron),
    ("build_cube", build_cube),
    ("build_octahedron", build_octahedron),
    ("build_dodecahedron", build_dodecahedron),
    ("build_icosahedron", build_icosahedron),
];

/// Golden ratio.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Alternate corners of the unit cube.
pub fn build_tetrahedron(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    let points = PointSet::from_3d([
        [0.0, 0.0, 0.0],
        [0.0, 1.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 0.0],
    ])?;
    hull_shape(adapter, points, "Tetrahedron")
}

/// Unit cube `{0, 1}^3`.
pub fn build_cube(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    let points = PointSet::from_3d(cube_corners(0.0, 1.0))?;
    hull_shape(adapter, points, "Cube")
}

/// `±e_i`.
pub fn build_octahedron(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    let points = PointSet::new(
        cyclic_shifts([1.0, 0.0, 0.0])
            .iter()
            .flat_map(|v| sign_patterns(v))
            .collect(),
    )?;
    hull_shape(adapter, points, "Octahedron")
}

/// `(±1, ±1, ±1)` together with the cyclic shifts of `(0, ±1/φ, ±φ)`.
pub fn build_dodecahedron(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    let mut points: Vec<Vec<f64>> = cube_corners(-1.0, 1.0).iter().map(|p| p.to_vec()).collect();
    for shift in cyclic_shifts([0.0, 1.0 / PHI, PHI]) {
        points.extend(sign_patterns(&shift));
    }
    hull_shape(adapter, PointSet::new(points)?, "Dodecahedron")
}

/// Cyclic shifts of `(0, ±1, ±φ)`.
pub fn build_icosahedron(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    hull_shape(adapter, PointSet::new(icosahedron_vertices())?, "Icosahedron")
}

pub(crate) fn icosahedron_vertices() -> Vec<Vec<f64>> {
    cyclic_shifts([0.0, 1.0, PHI])
        .iter()
        .flat_map(|v| sign_patterns(v))
        .collect()
}

fn cube_corners(lo: f64, hi: f64) -> Vec<[f64; 3]> {
    let pick = |bit: usize| if bit == 0 { lo } else { hi };
    (0..8)
        .map(|i| [pick((i >> 2) & 1), pick((i >> 1) & 1), pick(i & 1)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icosahedron_vertices() {
        let vertices = icosahedron_vertices();
        assert_eq!(vertices.len(), 12);
        let r2 = 1.0 + PHI * PHI;
        for v in &vertices {
            let n2: f64 = v.iter().map(|c| c * c).sum();
            approx::assert_relative_eq!(n2, r2, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_cube_corners_order() {
        let corners = cube_corners(0.0, 1.0);
        assert_eq!(corners[0], [0.0, 0.0, 0.0]);
        assert_eq!(corners[1], [0.0, 0.0, 1.0]);
        assert_eq!(corners[7], [1.0, 1.0, 1.0]);
    }
}
