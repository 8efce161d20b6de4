//! Merges a triangulated hull boundary into polygonal facets.

use nalgebra::Vector3;

use crate::error::HullError;

/// Relative tolerance for plane membership, scaled by the point cloud radius.
const PLANE_TOLERANCE: f64 = 1e-7;

struct Plane {
    normal: Vector3<f64>,
    offset: f64,
}

impl Plane {
    fn distance(&self, p: &Vector3<f64>) -> f64 {
        self.normal.dot(p) - self.offset
    }
}

/// Polyhedron data assembled from a hull triangulation.
#[derive(Debug)]
pub(crate) struct Assembled {
    /// Input positions of the points kept as vertices, ascending.
    pub vertex_indices: Vec<usize>,
    /// Facets over the kept vertices, indexing `vertex_indices`.
    pub facets: Vec<Vec<usize>>,
}

/// Groups the `triangles` of a hull over `points` by supporting plane.
///
/// Every point within tolerance of a facet plane joins that facet, and a point
/// is kept as a vertex only when it lies on three or more facets, which drops
/// points on edges or inside faces. Vertices keep their input order; each
/// facet is an ascending list of vertex indices and the facet list is sorted.
pub(crate) fn assemble(
    points: &[[f64; 3]],
    triangles: &[[usize; 3]],
) -> Result<Assembled, HullError> {
    let pts: Vec<Vector3<f64>> = points.iter().map(|p| Vector3::new(p[0], p[1], p[2])).collect();
    if pts.len() < 4 {
        return Err(HullError::Computation(format!(
            "need at least 4 points, got {}",
            pts.len()
        )));
    }

    let interior = pts.iter().fold(Vector3::zeros(), |acc, p| acc + p) / pts.len() as f64;
    let scale = pts
        .iter()
        .map(|p| (p - interior).norm())
        .fold(0.0, f64::max)
        .max(f64::MIN_POSITIVE);
    let tol = PLANE_TOLERANCE * scale;

    let mut candidates: Vec<Vec<usize>> = Vec::new();
    for tri in triangles {
        if tri.iter().any(|&i| i >= pts.len()) {
            return Err(HullError::Computation(format!(
                "triangle {:?} references a missing point",
                tri
            )));
        }
        let Some(plane) = supporting_plane(&pts, tri, &interior, tol) else {
            continue;
        };

        let members: Vec<usize> = (0..pts.len())
            .filter(|&i| plane.distance(&pts[i]).abs() <= tol)
            .collect();
        if members.len() >= 3 && !candidates.contains(&members) {
            candidates.push(members);
        }
    }

    // A candidate that is a strict subset of another lies in the same plane
    // up to tolerance; keep the larger one.
    let facets: Vec<Vec<usize>> = candidates
        .iter()
        .filter(|f| {
            !candidates
                .iter()
                .any(|g| g.len() > f.len() && f.iter().all(|i| g.contains(i)))
        })
        .cloned()
        .collect();

    if facets.len() < 4 {
        return Err(HullError::Computation(format!(
            "hull boundary has {} facets, expected at least 4",
            facets.len()
        )));
    }

    let mut incidence = vec![0usize; pts.len()];
    for facet in &facets {
        for &i in facet {
            incidence[i] += 1;
        }
    }

    let mut remap = vec![None; pts.len()];
    let mut vertex_indices = Vec::new();
    for (i, count) in incidence.iter().enumerate() {
        if *count >= 3 {
            remap[i] = Some(vertex_indices.len());
            vertex_indices.push(i);
        }
    }

    let mut facets: Vec<Vec<usize>> = facets
        .iter()
        .map(|f| f.iter().filter_map(|&i| remap[i]).collect::<Vec<_>>())
        .filter(|f| f.len() >= 3)
        .collect();
    facets.sort();
    facets.dedup();

    Ok(Assembled {
        vertex_indices,
        facets,
    })
}

/// The outward plane through a hull triangle, or `None` when the triangle is
/// degenerate or the plane does not support the point cloud.
fn supporting_plane(
    pts: &[Vector3<f64>],
    tri: &[usize; 3],
    interior: &Vector3<f64>,
    tol: f64,
) -> Option<Plane> {
    let (a, b, c) = (pts[tri[0]], pts[tri[1]], pts[tri[2]]);
    let normal = (b - a).cross(&(c - a)).try_normalize(tol * tol)?;
    let mut plane = Plane {
        offset: normal.dot(&a),
        normal,
    };
    if plane.distance(interior) > 0.0 {
        plane.normal = -plane.normal;
        plane.offset = -plane.offset;
    }
    pts.iter()
        .all(|p| plane.distance(p) <= tol)
        .then_some(plane)
}
