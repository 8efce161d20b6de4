//! Every builtin shape through the bundled hull provider.

#![cfg(feature = "chull")]

use polyview_geometry::{to_record, HullAdapter, Polyhedron};
use polyview_shapes::{builtin_registry, BuildOutcome};

fn build(function: &str) -> (Box<dyn Polyhedron>, String) {
    let registry = builtin_registry();
    let entry = registry
        .get(function)
        .unwrap_or_else(|| panic!("{} is not registered", function));
    match (entry.build)(&HullAdapter::with_default_provider()).unwrap() {
        BuildOutcome::Built { polyhedron, name } => (polyhedron, name),
        BuildOutcome::Declined { message } => panic!("{} declined: {}", function, message),
    }
}

fn counts(function: &str) -> (usize, usize) {
    let (poly, _) = build(function);
    (poly.vertices().unwrap().len(), poly.facets().unwrap().len())
}

#[test]
fn platonic_solids() {
    assert_eq!(counts("build_tetrahedron"), (4, 4));
    assert_eq!(counts("build_cube"), (8, 6));
    assert_eq!(counts("build_octahedron"), (6, 8));
    assert_eq!(counts("build_dodecahedron"), (20, 12));
    assert_eq!(counts("build_icosahedron"), (12, 20));
}

#[test]
fn permutahedra() {
    assert_eq!(counts("build_permutahedron"), (24, 14));
    assert_eq!(counts("build_permutahedron_B3"), (48, 26));
}

#[test]
fn associahedron() {
    assert_eq!(counts("build_Loday_associahedron"), (14, 9));
}

#[test]
fn root_polytopes() {
    // A3, B3 and D3 are cuboctahedra; the short B3 roots sit inside the
    // square faces.
    assert_eq!(counts("build_root_polytope_A3"), (12, 14));
    assert_eq!(counts("build_root_polytope_B3"), (12, 14));
    assert_eq!(counts("build_root_polytope_D3"), (12, 14));
    // C3 is an octahedron; its short roots lie on edges or inside.
    assert_eq!(counts("build_root_polytope_C3"), (6, 8));
    // H3 is an icosidodecahedron.
    assert_eq!(counts("build_root_polytope_H3"), (30, 32));
}

#[test]
fn cube_record() {
    let (poly, name) = build("build_cube");
    let record = to_record(&poly, &name).unwrap();
    assert_eq!(record.name, "Cube");
    assert_eq!(record.vertices.len(), 8);
    assert_eq!(record.faces.len(), 6);
    assert!(record.faces.iter().all(|f| f.len() == 4));
    assert_eq!(record.center, [0.5, 0.5, 0.5]);
}

#[test]
fn every_builtin_exports_a_solid() {
    for entry in builtin_registry().iter() {
        let (poly, name) = build(&entry.function);
        let record = to_record(&poly, &name)
            .unwrap_or_else(|e| panic!("{} failed to export: {}", entry.function, e));
        assert!(record.vertices.len() >= 4, "{}", entry.function);
        assert!(record.faces.len() >= 4, "{}", entry.function);

        // Euler characteristic of a convex polyhedron.
        let edges: usize = record.faces.iter().map(|f| f.len()).sum::<usize>() / 2;
        assert_eq!(
            record.vertices.len() + record.faces.len(),
            edges + 2,
            "{} violates V - E + F = 2",
            entry.function
        );
    }
}
