//! Associahedron, cyclohedron and multiplihedron.

use polyview_geometry::linalg::{principal_projection, project_onto, sum_zero_basis};
use polyview_geometry::{HullAdapter, PointSet};

use crate::combinatorics::full_binary_trees;
use crate::{hull_shape, BuildError, BuildFn, BuildOutcome};

pub const BUILDERS: &[(&str, BuildFn)] = &[
    ("build_Loday_associahedron", build_loday_associahedron),
    ("build_cyclohedron", build_cyclohedron),
    ("build_multiplihedron", build_multiplihedron),
];

/// Leaves of the binary trees indexing the 3D associahedron's vertices.
const ASSOCIAHEDRON_LEAVES: usize = 5;

/// Tubing vectors of the cycle graph on four nodes: entry `i` counts the
/// tubes of a maximal tubing that contain node `i`.
const CYCLOHEDRON_TUBINGS: [[f64; 4]; 20] = [
    [0.0, 1.0, 2.0, 3.0],
    [0.0, 1.0, 3.0, 2.0],
    [0.0, 2.0, 1.0, 2.0],
    [0.0, 2.0, 3.0, 1.0],
    [0.0, 3.0, 2.0, 1.0],
    [1.0, 0.0, 2.0, 3.0],
    [1.0, 0.0, 3.0, 2.0],
    [1.0, 2.0, 0.0, 2.0],
    [1.0, 2.0, 3.0, 0.0],
    [1.0, 3.0, 2.0, 0.0],
    [2.0, 0.0, 1.0, 3.0],
    [2.0, 0.0, 2.0, 1.0],
    [2.0, 1.0, 0.0, 3.0],
    [2.0, 1.0, 2.0, 0.0],
    [2.0, 3.0, 0.0, 1.0],
    [2.0, 3.0, 1.0, 0.0],
    [3.0, 0.0, 1.0, 2.0],
    [3.0, 1.0, 0.0, 2.0],
    [3.0, 2.0, 0.0, 1.0],
    [3.0, 2.0, 1.0, 0.0],
];

const MULTIPLIHEDRON_POINTS: [[f64; 3]; 18] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 0.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 1.0, 1.0],
    [2.0, 0.0, 0.0],
    [0.0, 2.0, 0.0],
    [0.0, 0.0, 2.0],
    [2.0, 2.0, 0.0],
    [2.0, 0.0, 2.0],
    [0.0, 2.0, 2.0],
    [3.0, 1.0, 1.0],
    [1.0, 3.0, 1.0],
    [1.0, 1.0, 3.0],
    [2.0, 2.0, 2.0],
];

/// Loday realization: one point per full binary tree with five leaves,
/// centred and reduced to its three principal axes.
pub fn build_loday_associahedron(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    let features: Vec<Vec<f64>> = full_binary_trees(ASSOCIAHEDRON_LEAVES)
        .iter()
        .map(|tree| tree.loday_vector())
        .collect();
    let centered = PointSet::new(features)?.centered();
    let points = PointSet::new(principal_projection(&centered, 3))?;
    if points.dim() != 3 {
        return Err(BuildError::Invalid(format!(
            "associahedron spans {} dimensions, expected 3",
            points.dim()
        )));
    }
    hull_shape(adapter, points, "Loday Associahedron")
}

/// Cyclohedron W3 from the tubings of the 4-cycle, each vector moved into the
/// sum-zero hyperplane and expressed in an orthonormal basis of it.
pub fn build_cyclohedron(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    let basis = sum_zero_basis(4);
    let points = CYCLOHEDRON_TUBINGS
        .iter()
        .map(|v| {
            let mean = v.iter().sum::<f64>() / v.len() as f64;
            let centered: Vec<f64> = v.iter().map(|x| x - mean).collect();
            project_onto(&centered, &basis)
        })
        .collect();
    hull_shape(adapter, PointSet::new(points)?, "Cyclohedron")
}

/// Multiplihedron M3 from a fixed list of integer points.
pub fn build_multiplihedron(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    let points = PointSet::from_3d(MULTIPLIHEDRON_POINTS)?;
    hull_shape(adapter, points, "Multiplihedron 3D (M₃)")
}
