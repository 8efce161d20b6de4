//! Conversion of polyhedra into viewer geometry records.

use std::cmp::Ordering;
use std::f64::consts::TAU;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::linalg::plane_normal;
use crate::polyhedron::Polyhedron;

/// Value of the `_comment_coord_type` field in every record.
pub const COORD_TYPE_COMMENT: &str = "float (forced)";

/// Viewer-ready geometry of one shape.
///
/// Field order matches the JSON files consumed by the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryRecord {
    /// Display name.
    pub name: String,
    /// Vertex coordinates, always floats.
    pub vertices: Vec<[f64; 3]>,
    /// Faces as vertex indices in planar cyclic order.
    pub faces: Vec<Vec<usize>>,
    #[serde(rename = "_comment_coord_type")]
    pub coord_type: String,
    pub center: [f64; 3],
}

impl GeometryRecord {
    /// Serializes with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Converts `polyhedron` into a [`GeometryRecord`] named `name`.
///
/// Polyhedra whose dimension is not 3 are rejected with
/// [`ExportError::DimensionMismatch`]. Any accessor failure, malformed
/// vertex or facet, or a boundary with fewer than 4 vertices or 4 faces fails
/// the whole conversion; no partial record is returned.
pub fn to_record<P>(polyhedron: &P, name: &str) -> Result<GeometryRecord, ExportError>
where
    P: Polyhedron + ?Sized,
{
    let dimension = polyhedron.dimension();
    if dimension != 3 {
        return Err(ExportError::DimensionMismatch { found: dimension });
    }

    let vertices = polyhedron
        .vertices()?
        .iter()
        .enumerate()
        .map(|(i, v)| to_point(v).ok_or_else(|| malformed_vertex(i, v)))
        .collect::<Result<Vec<_>, _>>()?;
    if vertices.is_empty() {
        return Err(ExportError::Conversion("polyhedron has no vertices".to_string()));
    }
    let mean = vertex_mean(&vertices);

    let faces = polyhedron
        .facets()?
        .iter()
        .map(|facet| cyclic_order(&vertices, facet, mean))
        .collect::<Result<Vec<_>, _>>()?;
    if vertices.len() < 4 || faces.len() < 4 {
        return Err(ExportError::Conversion(format!(
            "{} vertices and {} faces cannot bound a 3D polytope",
            vertices.len(),
            faces.len()
        )));
    }

    let center = match polyhedron.centroid() {
        Some(Ok(c)) => to_point(&c).unwrap_or(mean),
        Some(Err(_)) | None => mean,
    };

    Ok(GeometryRecord {
        name: name.to_string(),
        vertices,
        faces,
        coord_type: COORD_TYPE_COMMENT.to_string(),
        center,
    })
}

/// Arithmetic mean of `vertices`.
pub fn vertex_mean(vertices: &[[f64; 3]]) -> [f64; 3] {
    let n = vertices.len().max(1) as f64;
    let mut sum = [0.0; 3];
    for v in vertices {
        for (s, c) in sum.iter_mut().zip(v) {
            *s += c;
        }
    }
    sum.map(|s| s / n)
}

/// Puts the vertices of `facet` in planar cyclic order.
///
/// The cycle starts at the smallest vertex index and runs counter-clockwise
/// when seen from the side of the facet plane facing away from `interior`.
/// Angles are measured around the facet centroid; exact ties fall back to
/// index order.
pub fn cyclic_order(
    vertices: &[[f64; 3]],
    facet: &[usize],
    interior: [f64; 3],
) -> Result<Vec<usize>, ExportError> {
    let mut indices = facet.to_vec();
    indices.sort_unstable();
    indices.dedup();

    if let Some(&bad) = indices.iter().find(|&&i| i >= vertices.len()) {
        return Err(ExportError::Conversion(format!(
            "facet references vertex {} but only {} vertices exist",
            bad,
            vertices.len()
        )));
    }
    if indices.len() < 3 {
        return Err(ExportError::Conversion(format!(
            "facet {:?} has fewer than 3 distinct vertices",
            facet
        )));
    }

    let pts: Vec<Vector3<f64>> = indices
        .iter()
        .map(|&i| Vector3::from(vertices[i]))
        .collect();
    let centroid = pts.iter().fold(Vector3::zeros(), |acc, p| acc + p) / pts.len() as f64;

    let mut normal = plane_normal(&pts);
    if normal.dot(&(centroid - Vector3::from(interior))) < 0.0 {
        normal = -normal;
    }

    let Some(u) = pts.iter().find_map(|p| (p - centroid).try_normalize(0.0)) else {
        return Err(ExportError::Conversion(format!(
            "facet {:?} collapses to a point",
            facet
        )));
    };
    let v = normal.cross(&u);

    let mut ordered: Vec<(f64, usize)> = indices
        .iter()
        .zip(&pts)
        .enumerate()
        .map(|(k, (&i, p))| {
            if k == 0 {
                return (0.0, i);
            }
            let d = p - centroid;
            let angle = d.dot(&v).atan2(d.dot(&u)).rem_euclid(TAU);
            (angle, i)
        })
        .collect();
    ordered.sort_by(|a, b| match a.0.total_cmp(&b.0) {
        Ordering::Equal => a.1.cmp(&b.1),
        other => other,
    });

    Ok(ordered.into_iter().map(|(_, i)| i).collect())
}

fn to_point(v: &[f64]) -> Option<[f64; 3]> {
    match v {
        [x, y, z] if x.is_finite() && y.is_finite() && z.is_finite() => Some([*x, *y, *z]),
        _ => None,
    }
}

fn malformed_vertex(index: usize, v: &[f64]) -> ExportError {
    ExportError::Conversion(format!(
        "vertex {} is not a finite 3D point: {:?}",
        index, v
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PolyhedronError;
    use crate::polyhedron::ConvexPolyhedron;
    use pretty_assertions::assert_eq;

    fn cube() -> ConvexPolyhedron {
        let vertices = (0..8)
            .map(|i| vec![((i >> 2) & 1) as f64, ((i >> 1) & 1) as f64, (i & 1) as f64])
            .collect();
        let facets = vec![
            vec![0, 1, 2, 3],
            vec![4, 5, 6, 7],
            vec![0, 1, 4, 5],
            vec![2, 3, 6, 7],
            vec![0, 2, 4, 6],
            vec![1, 3, 5, 7],
        ];
        ConvexPolyhedron::new(3, vertices, facets)
    }

    struct FailingFacets;

    impl Polyhedron for FailingFacets {
        fn dimension(&self) -> usize {
            3
        }

        fn vertices(&self) -> Result<Vec<Vec<f64>>, PolyhedronError> {
            Ok(vec![vec![0.0, 0.0, 0.0]])
        }

        fn facets(&self) -> Result<Vec<Vec<usize>>, PolyhedronError> {
            Err(PolyhedronError::new("facet enumeration failed"))
        }

        fn centroid(&self) -> Option<Result<Vec<f64>, PolyhedronError>> {
            Some(Err(PolyhedronError::new("no centroid")))
        }
    }

    #[test]
    fn test_cube_record() {
        let record = to_record(&cube(), "Cube").unwrap();
        assert_eq!(record.name, "Cube");
        assert_eq!(record.vertices.len(), 8);
        assert_eq!(record.center, [0.5, 0.5, 0.5]);
        assert_eq!(record.coord_type, COORD_TYPE_COMMENT);
        // x = 0 face seen from -x: counter-clockwise is 0 -> 1 -> 3 -> 2.
        assert_eq!(record.faces[0], vec![0, 1, 3, 2]);
        assert!(record.faces.iter().all(|f| f.len() == 4 && f[0] == *f.iter().min().unwrap()));
    }

    #[test]
    fn test_rejects_wrong_dimension() {
        for dim in [0, 1, 2, 4] {
            let poly = ConvexPolyhedron::lower_dimensional(dim, vec![vec![0.0; 3]; 4]);
            assert_eq!(
                to_record(&poly, "flat").unwrap_err(),
                ExportError::DimensionMismatch { found: dim }
            );
        }
    }

    #[test]
    fn test_explicit_centroid_wins() {
        let poly = cube().with_centroid(vec![0.25, 0.5, 0.75]);
        assert_eq!(to_record(&poly, "Cube").unwrap().center, [0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_malformed_centroid_falls_back_to_mean() {
        let poly = cube().with_centroid(vec![1.0, 2.0]);
        assert_eq!(to_record(&poly, "Cube").unwrap().center, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_accessor_failure_is_conversion_error() {
        let err = to_record(&FailingFacets, "broken").unwrap_err();
        assert_eq!(err, ExportError::Conversion("facet enumeration failed".into()));
    }

    #[test]
    fn test_rejects_too_small_boundary() {
        let triangle = ConvexPolyhedron::new(
            3,
            vec![vec![0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]],
            vec![vec![0, 1, 2]],
        );
        assert_eq!(
            to_record(&triangle, "Triangle").unwrap_err(),
            ExportError::Conversion("3 vertices and 1 faces cannot bound a 3D polytope".into())
        );

        let mut facets = cube().facet_slice().to_vec();
        facets.truncate(3);
        let open_box = ConvexPolyhedron::new(3, cube().vertex_slice().to_vec(), facets);
        assert!(matches!(
            to_record(&open_box, "Open box"),
            Err(ExportError::Conversion(_))
        ));
    }

    #[test]
    fn test_malformed_vertex_is_rejected() {
        let poly = ConvexPolyhedron::new(3, vec![vec![0.0, 0.0]], vec![]);
        assert!(matches!(
            to_record(&poly, "bad"),
            Err(ExportError::Conversion(_))
        ));
    }

    #[test]
    fn test_cyclic_order_fixes_scrambled_quad() {
        let vertices = [
            [0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
        ];
        // Seen from +z (outside when the interior is below), counter-clockwise.
        let order = cyclic_order(&vertices, &[1, 3, 0, 2, 2], [0.5, 0.5, 0.0]).unwrap();
        assert_eq!(order, vec![0, 2, 1, 3]);

        // From below the same quad winds the other way.
        let order = cyclic_order(&vertices, &[0, 1, 2, 3], [0.5, 0.5, 2.0]).unwrap();
        assert_eq!(order, vec![0, 3, 1, 2]);
    }

    #[test]
    fn test_cyclic_order_rejects_bad_facets() {
        let vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert!(cyclic_order(&vertices, &[0, 1], [0.0; 3]).is_err());
        assert!(cyclic_order(&vertices, &[0, 1, 1], [0.0; 3]).is_err());
        assert!(cyclic_order(&vertices, &[0, 1, 7], [0.0; 3]).is_err());
    }

    #[test]
    fn test_json_field_order_and_floats() {
        let record = GeometryRecord {
            name: "Tri".into(),
            vertices: vec![[1.0, 0.0, 0.0]],
            faces: vec![vec![0, 1, 2]],
            coord_type: COORD_TYPE_COMMENT.into(),
            center: [0.0, 0.0, 0.0],
        };
        let json = record.to_json_pretty().unwrap();
        let name = json.find("\"name\"").unwrap();
        let vertices = json.find("\"vertices\"").unwrap();
        let faces = json.find("\"faces\"").unwrap();
        let comment = json.find("\"_comment_coord_type\": \"float (forced)\"").unwrap();
        let center = json.find("\"center\"").unwrap();
        assert!(name < vertices && vertices < faces && faces < comment && comment < center);
        assert!(json.contains("1.0"));
        assert!(json.starts_with("{\n  \"name\""));
        assert_eq!(GeometryRecord::from_json(&json).unwrap(), record);
    }
}
