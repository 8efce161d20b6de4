//! Geometric properties of every builtin shape after export.

use approx::assert_relative_eq;
use polyview_geometry::{vertex_mean, HullAdapter};
use polyview_shapes::builtin_registry;
use polyview_tests::geometry_checks::check_record;
use polyview_tests::harness::TestHarness;

#[test]
fn test_every_builtin_exports() {
    let harness = TestHarness::new();
    let registry = builtin_registry();
    let summary = harness
        .run(&registry, &HullAdapter::with_default_provider())
        .unwrap();

    let failures: Vec<String> = summary
        .results
        .iter()
        .filter(|r| !r.is_success())
        .map(|r| format!("{}: {}", r.function, r.message))
        .collect();
    assert!(failures.is_empty(), "failed builders: {:#?}", failures);
    assert_eq!(summary.succeeded, registry.len());
    assert_eq!(harness.read_manifest().len(), registry.len());
}

#[test]
fn test_builtin_faces_are_outward_convex_polygons() {
    let harness = TestHarness::new();
    harness
        .run(&builtin_registry(), &HullAdapter::with_default_provider())
        .unwrap();

    for file in harness.read_manifest() {
        let record = harness.read_record(&file);
        if let Err(violation) = check_record(&record) {
            panic!("{}: {}", file, violation);
        }
    }
}

#[test]
fn test_euler_characteristic() {
    let harness = TestHarness::new();
    harness
        .run(&builtin_registry(), &HullAdapter::with_default_provider())
        .unwrap();

    for file in harness.read_manifest() {
        let record = harness.read_record(&file);
        let mut edges = std::collections::BTreeSet::new();
        for face in &record.faces {
            for (k, &a) in face.iter().enumerate() {
                let b = face[(k + 1) % face.len()];
                edges.insert((a.min(b), a.max(b)));
            }
        }
        let euler = record.vertices.len() as i64 - edges.len() as i64 + record.faces.len() as i64;
        assert_eq!(euler, 2, "{}: V - E + F = {}", file, euler);
    }
}

#[test]
fn test_builtin_centers_are_vertex_means() {
    let harness = TestHarness::new();
    harness
        .run(&builtin_registry(), &HullAdapter::with_default_provider())
        .unwrap();

    for file in harness.read_manifest() {
        let record = harness.read_record(&file);
        let mean = vertex_mean(&record.vertices);
        for (c, m) in record.center.iter().zip(mean) {
            assert_relative_eq!(*c, m, epsilon = 1e-12);
        }
    }
}
