//! Structural checks for exported geometry records.
//!
//! Each check returns a description of the first violation found, so test
//! failures name the shape and face involved.

use polyview_geometry::{vertex_mean, GeometryRecord};

type Vec3 = [f64; 3];

fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn norm(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

/// Absolute tolerance for plane tests, scaled to the record's extent.
pub fn tolerance(record: &GeometryRecord) -> f64 {
    let extent = record
        .vertices
        .iter()
        .flat_map(|v| v.iter())
        .fold(1.0_f64, |m, c| m.max(c.abs()));
    1e-6 * extent
}

/// Newell normal of a polygon. Points towards the viewer for which the
/// polygon winds counter-clockwise.
pub fn newell_normal(points: &[Vec3]) -> Vec3 {
    let mut n = [0.0; 3];
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        n[0] += (p[1] - q[1]) * (p[2] + q[2]);
        n[1] += (p[2] - q[2]) * (p[0] + q[0]);
        n[2] += (p[0] - q[0]) * (p[1] + q[1]);
    }
    n
}

/// At least a tetrahedron's worth of vertices and faces, finite center.
pub fn check_record_size(record: &GeometryRecord) -> Result<(), String> {
    if record.vertices.len() < 4 {
        return Err(format!("{}: only {} vertices", record.name, record.vertices.len()));
    }
    if record.faces.len() < 4 {
        return Err(format!("{}: only {} faces", record.name, record.faces.len()));
    }
    if !record.center.iter().all(|c| c.is_finite()) {
        return Err(format!("{}: center is not finite", record.name));
    }
    Ok(())
}

/// Face `index` is a convex polygon wound counter-clockwise seen from
/// outside, its plane supports the whole vertex set, and it lists exactly
/// the vertices lying in that plane.
pub fn check_face(record: &GeometryRecord, index: usize) -> Result<(), String> {
    let face = &record.faces[index];
    let label = format!("{} face {} {:?}", record.name, index, face);
    let tol = tolerance(record);

    if face.len() < 3 {
        return Err(format!("{}: fewer than 3 vertices", label));
    }
    let mut sorted = face.clone();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.len() != face.len() {
        return Err(format!("{}: repeated vertex", label));
    }
    if let Some(&bad) = face.iter().find(|&&i| i >= record.vertices.len()) {
        return Err(format!("{}: vertex {} out of range", label, bad));
    }

    let points: Vec<Vec3> = face.iter().map(|&i| record.vertices[i]).collect();
    let normal = newell_normal(&points);
    let length = norm(normal);
    if length <= tol * tol {
        return Err(format!("{}: degenerate polygon", label));
    }
    let unit = normal.map(|c| c / length);
    let offset = dot(unit, points[0]);

    // Outward: every vertex lies on or below the plane.
    for (i, v) in record.vertices.iter().enumerate() {
        let height = dot(unit, *v) - offset;
        if height > tol {
            return Err(format!(
                "{}: vertex {} lies {:.3e} outside the plane (wrong winding or not supporting)",
                label, i, height
            ));
        }
        if height.abs() <= tol && !face.contains(&i) {
            return Err(format!("{}: vertex {} lies in the plane but is missing", label, i));
        }
    }
    let mean = vertex_mean(&record.vertices);
    if dot(unit, mean) - offset >= -tol {
        return Err(format!("{}: vertex mean is not strictly inside", label));
    }

    // Every turn is a left turn and the boundary goes around exactly once.
    let n = points.len();
    let mut turning = 0.0;
    for k in 0..n {
        let a = points[k];
        let b = points[(k + 1) % n];
        let c = points[(k + 2) % n];
        let e1 = sub(b, a);
        let e2 = sub(c, b);
        let turn = dot(cross(e1, e2), unit);
        if turn <= 0.0 {
            return Err(format!("{}: not convex at vertex {}", label, face[(k + 1) % n]));
        }
        turning += turn.atan2(dot(e1, e2));
    }
    if (turning - std::f64::consts::TAU).abs() > 1e-6 {
        return Err(format!("{}: boundary winds {:.4} radians", label, turning));
    }

    Ok(())
}

/// Runs [`check_record_size`] and [`check_face`] on every face, and checks
/// that each face starts at its smallest vertex index.
pub fn check_record(record: &GeometryRecord) -> Result<(), String> {
    check_record_size(record)?;
    for (index, face) in record.faces.iter().enumerate() {
        check_face(record, index)?;
        if face.iter().min() != face.first() {
            return Err(format!(
                "{} face {} {:?}: does not start at its smallest index",
                record.name, index, face
            ));
        }
    }
    Ok(())
}
