//! Stub polyhedra and builders with known behaviour.
//!
//! None of these touch the hull adapter, so they pin down driver and
//! exporter behaviour independently of the hull library.

use polyview_geometry::{HullAdapter, Polyhedron, PolyhedronError};
use polyview_shapes::{BuildError, BuildFn, BuildOutcome, ShapeRegistry, DEPENDENCY_UNAVAILABLE};

/// Module name under which every stub builder is registered.
pub const STUB_MODULE: &str = "stubs";

/// Unit cube corners in binary order: vertex `i` is `(i>>2 & 1, i>>1 & 1, i & 1)`.
pub fn unit_cube_vertices() -> Vec<Vec<f64>> {
    (0..8)
        .map(|i: usize| vec![((i >> 2) & 1) as f64, ((i >> 1) & 1) as f64, (i & 1) as f64])
        .collect()
}

/// Expected faces of [`CubeStub`] after export, in facet order.
pub const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 1, 3, 2], // x = 0
    [4, 6, 7, 5], // x = 1
    [0, 4, 5, 1], // y = 0
    [2, 3, 7, 6], // y = 1
    [0, 2, 6, 4], // z = 0
    [1, 5, 7, 3], // z = 1
];

/// Unit cube with scrambled facet vertex lists and no centroid accessor.
#[derive(Debug, Clone, Copy, Default)]
pub struct CubeStub;

impl Polyhedron for CubeStub {
    fn dimension(&self) -> usize {
        3
    }

    fn vertices(&self) -> Result<Vec<Vec<f64>>, PolyhedronError> {
        Ok(unit_cube_vertices())
    }

    fn facets(&self) -> Result<Vec<Vec<usize>>, PolyhedronError> {
        Ok(vec![
            vec![3, 0, 2, 1],
            vec![7, 4, 5, 6],
            vec![5, 0, 1, 4],
            vec![6, 3, 2, 7],
            vec![4, 6, 0, 2],
            vec![7, 1, 3, 5],
        ])
    }
}

/// A polyhedron reporting a dimension other than 3.
#[derive(Debug, Clone, Copy)]
pub struct FlatStub {
    pub dimension: usize,
}

impl Polyhedron for FlatStub {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn vertices(&self) -> Result<Vec<Vec<f64>>, PolyhedronError> {
        Ok(vec![vec![0.0; self.dimension]; self.dimension + 1])
    }

    fn facets(&self) -> Result<Vec<Vec<usize>>, PolyhedronError> {
        Ok(Vec::new())
    }
}

/// A polyhedron whose facet accessor fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrokenFacetsStub;

impl Polyhedron for BrokenFacetsStub {
    fn dimension(&self) -> usize {
        3
    }

    fn vertices(&self) -> Result<Vec<Vec<f64>>, PolyhedronError> {
        Ok(unit_cube_vertices())
    }

    fn facets(&self) -> Result<Vec<Vec<usize>>, PolyhedronError> {
        Err(PolyhedronError::new("facet enumeration failed"))
    }
}

pub fn build_stub_cube(_: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    Ok(BuildOutcome::built(CubeStub, "Cube"))
}

pub fn build_declined(_: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    Ok(BuildOutcome::declined(DEPENDENCY_UNAVAILABLE))
}

pub fn build_panicking(_: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    panic!("generator exploded")
}

pub fn build_erroring(_: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    Err(BuildError::Invalid("no points".to_string()))
}

pub fn build_flat2(_: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    Ok(BuildOutcome::built(FlatStub { dimension: 2 }, "Flat 2"))
}

pub fn build_flat4(_: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    Ok(BuildOutcome::built(FlatStub { dimension: 4 }, "Flat 4"))
}

pub fn build_broken_facets(_: &HullAdapter) -> Result<BuildOutcome, BuildError> {
    Ok(BuildOutcome::built(BrokenFacetsStub, "Broken"))
}

/// Registry with the stub cube only, written as `cube.json`.
pub fn cube_registry() -> ShapeRegistry {
    let mut registry = ShapeRegistry::new();
    registry
        .register(STUB_MODULE, "build_cube", build_stub_cube)
        .expect("register stub cube");
    registry
}

/// Registry holding every stub builder.
pub fn stub_registry() -> ShapeRegistry {
    let mut registry = cube_registry();
    let builders: [(&str, BuildFn); 6] = [
        ("build_declined", build_declined),
        ("build_panicking", build_panicking),
        ("build_erroring", build_erroring),
        ("build_flat2", build_flat2),
        ("build_flat4", build_flat4),
        ("build_broken_facets", build_broken_facets),
    ];
    for (function, build) in builders {
        registry
            .register(STUB_MODULE, function, build)
            .expect("register stub builder");
    }
    registry
}
