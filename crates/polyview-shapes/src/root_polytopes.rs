//! Convex hulls of root systems of rank 3.

use polyview_geometry::linalg::{norm, project_onto, sum_zero_basis};
use polyview_geometry::{HullAdapter, PointSet};

use crate::combinatorics::sign_patterns;
use crate::platonic::icosahedron_vertices;
use crate::{hull_shape, BuildError, BuildFn, BuildOutcome};

pub const BUILDERS: &[(&str, BuildFn)] = &[
    ("build_root_polytope_A3", build_root_polytope_a3),
    ("build_root_polytope_B3", build_root_polytope_b3),
    ("build_root_polytope_C3", build_root_polytope_c3),
    ("build_root_polytope_D3", build_root_polytope_d3),
    ("build_root_polytope_H3", build_root_polytope_h3),
];

/// Tolerance for picking icosahedron edges by length.
const EDGE_TOLERANCE: f64 = 1e-6;

/// `±(e_i - e_j)` in `R^4`, expressed in the sum-zero hyperplane.
pub fn build_root_polytope_a3(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    let basis = sum_zero_basis(4);
    let mut points = Vec::new();
    for i in 0..4 {
        for j in i + 1..4 {
            let mut v = vec![0.0; 4];
            v[i] = 1.0;
            v[j] = -1.0;
            let neg: Vec<f64> = v.iter().map(|x| -x).collect();
            points.push(project_onto(&v, &basis));
            points.push(project_onto(&neg, &basis));
        }
    }
    hull_shape(adapter, PointSet::new(points)?, "Root Polytope A3")
}

/// Short roots `±e_i` and long roots `±e_i ± e_j`.
pub fn build_root_polytope_b3(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    let mut points = axis_roots(1.0);
    points.extend(pair_roots());
    hull_shape(adapter, PointSet::new(points)?, "Root Polytope B3")
}

/// Long roots `±2e_i`, short roots `±e_i ± e_j`, plus `±e_i`.
pub fn build_root_polytope_c3(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    let mut points = axis_roots(2.0);
    points.extend(pair_roots());
    points.extend(axis_roots(1.0));
    hull_shape(adapter, PointSet::new(points)?, "Root Polytope C3")
}

/// `±e_i ± e_j`.
pub fn build_root_polytope_d3(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    hull_shape(adapter, PointSet::new(pair_roots())?, "Root Polytope D3")
}

/// Midpoints of the icosahedron's edges.
pub fn build_root_polytope_h3(adapter: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    hull_shape(
        adapter,
        PointSet::new(icosahedron_edge_midpoints())?,
        "Root Polytope H3",
    )
}

fn axis_roots(length: f64) -> Vec<Vec<f64>> {
    (0..3)
        .flat_map(|i| {
            let mut v = vec![0.0; 3];
            v[i] = length;
            sign_patterns(&v)
        })
        .collect()
}

fn pair_roots() -> Vec<Vec<f64>> {
    let mut out = Vec::with_capacity(12);
    for i in 0..3 {
        for j in i + 1..3 {
            let mut v = vec![0.0; 3];
            v[i] = 1.0;
            v[j] = 1.0;
            out.extend(sign_patterns(&v));
        }
    }
    out
}

fn icosahedron_edge_midpoints() -> Vec<Vec<f64>> {
    let vertices = icosahedron_vertices();

    let mut edge = f64::INFINITY;
    for (i, a) in vertices.iter().enumerate() {
        for b in &vertices[i + 1..] {
            let d = distance(a, b);
            if d > EDGE_TOLERANCE && d < edge {
                edge = d;
            }
        }
    }

    let mut midpoints = Vec::new();
    for (i, a) in vertices.iter().enumerate() {
        for b in &vertices[i + 1..] {
            if (distance(a, b) - edge).abs() < EDGE_TOLERANCE {
                midpoints.push(a.iter().zip(b).map(|(x, y)| (x + y) / 2.0).collect());
            }
        }
    }
    midpoints
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    let d: Vec<f64> = a.iter().zip(b).map(|(x, y)| x - y).collect();
    norm(&d)
}
