//! Point set -> hull -> record, through the bundled `chull` provider.

#![cfg(feature = "chull")]

use polyview_geometry::{to_record, ChullProvider, HullAdapter, HullError, PointSet, Polyhedron};

fn adapter() -> HullAdapter {
    HullAdapter::new(Box::new(ChullProvider::default()))
}

fn cube_points() -> Vec<[f64; 3]> {
    (0..8)
        .map(|i| [((i >> 2) & 1) as f64, ((i >> 1) & 1) as f64, (i & 1) as f64])
        .collect()
}

#[test]
fn probe_succeeds() {
    adapter().probe().unwrap();
    assert_eq!(adapter().provider_name(), "chull");
}

#[test]
fn cube_keeps_input_vertex_order() {
    let poly = adapter().compute(&PointSet::from_3d(cube_points()).unwrap()).unwrap();
    assert_eq!(poly.dimension(), 3);
    let expected: Vec<Vec<f64>> = cube_points().iter().map(|p| p.to_vec()).collect();
    assert_eq!(poly.vertices().unwrap(), expected);

    let record = to_record(&poly, "Cube").unwrap();
    assert_eq!(record.faces.len(), 6);
    assert!(record.faces.iter().all(|f| f.len() == 4));
    assert_eq!(record.center, [0.5, 0.5, 0.5]);
}

#[test]
fn extreme_scales_hull_and_export() {
    for scale in [1e-20, 1e-12, 1e75, 1e80] {
        let points: Vec<[f64; 3]> = cube_points()
            .iter()
            .map(|p| p.map(|c| c * scale))
            .collect();
        let poly = adapter()
            .compute(&PointSet::from_3d(points.clone()).unwrap())
            .unwrap_or_else(|e| panic!("scale {:e}: {}", scale, e));
        assert_eq!(poly.vertex_count(), 8, "scale {:e}", scale);
        assert_eq!(poly.facet_count(), 6, "scale {:e}", scale);

        let record = to_record(&poly, "Cube").unwrap();
        assert_eq!(record.vertices, points);
        assert_eq!(record.faces[0], vec![0, 1, 3, 2]);
        assert_eq!(record.center, [0.5 * scale; 3]);
    }
}

#[test]
fn duplicates_and_interior_points_are_dropped() {
    let mut points = cube_points();
    points.extend(cube_points());
    points.push([0.5, 0.5, 0.5]);
    points.push([0.25, 0.75, 0.5]);
    let poly = adapter().compute(&PointSet::from_3d(points).unwrap()).unwrap();
    assert_eq!(poly.vertex_count(), 8);
    assert_eq!(poly.facet_count(), 6);
}

#[test]
fn octahedron_has_triangular_faces_wound_outward() {
    let points = [
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ];
    let poly = adapter().compute(&PointSet::from_3d(points).unwrap()).unwrap();
    let record = to_record(&poly, "Octahedron").unwrap();
    assert_eq!(record.vertices.len(), 6);
    assert_eq!(record.faces.len(), 8);

    for face in &record.faces {
        assert_eq!(face.len(), 3);
        let [a, b, c] = [face[0], face[1], face[2]].map(|i| record.vertices[i]);
        let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        let normal = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];
        // The center is the origin, so an outward normal points along `a`.
        let outward: f64 = normal.iter().zip(&a).map(|(n, p)| n * p).sum();
        assert!(outward > 0.0, "face {:?} winds inward", face);
    }
}

#[test]
fn flat_point_set_is_not_exported() {
    let square = PointSet::from_3d([
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
    ])
    .unwrap();
    let poly = adapter().compute(&square).unwrap();
    assert_eq!(poly.dimension(), 2);
    assert!(to_record(&poly, "Square").is_err());
}

#[test]
fn invalid_points_are_rejected_before_the_hull() {
    let err = PointSet::new(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
    let hull_err: HullError = err.into();
    assert!(matches!(hull_err, HullError::InvalidInput(_)));
}
