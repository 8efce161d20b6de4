//! Convex hull adapter.
//!
//! [`HullAdapter`] accepts point sets of any dimension, measures their affine
//! dimension and hands the genuinely three-dimensional problem to a
//! [`HullProvider`]. Providers are injected so the pipeline can run without a
//! hull library, in which case every request fails with
//! [`HullError::Unavailable`].

use crate::error::HullError;
use crate::facets;
use crate::linalg::AffineFrame;
use crate::point_set::PointSet;
use crate::polyhedron::ConvexPolyhedron;

/// Points closer than this fraction of the cloud radius are merged.
const DEDUP_TOLERANCE: f64 = 1e-9;

/// Triangulated hull boundary returned by a provider. Indices refer to the
/// slice passed to [`HullProvider::hull_3d`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HullMesh {
    pub triangles: Vec<[usize; 3]>,
}

/// A source of 3D convex hulls.
pub trait HullProvider {
    /// Short name shown by `polyview doctor`.
    fn name(&self) -> &'static str;

    /// Whether the provider can compute hulls at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Triangulates the boundary of the convex hull of `points`.
    fn hull_3d(&self, points: &[[f64; 3]]) -> Result<HullMesh, HullError>;
}

/// Provider used when no hull library is compiled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableHull;

impl HullProvider for UnavailableHull {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn hull_3d(&self, _points: &[[f64; 3]]) -> Result<HullMesh, HullError> {
        Err(HullError::Unavailable)
    }
}

/// Binding over the `chull` crate.
#[cfg(feature = "chull")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ChullProvider {
    /// Iteration cap forwarded to `chull`; `None` means no cap.
    pub max_iter: Option<usize>,
}

#[cfg(feature = "chull")]
impl HullProvider for ChullProvider {
    fn name(&self) -> &'static str {
        "chull"
    }

    fn hull_3d(&self, points: &[[f64; 3]]) -> Result<HullMesh, HullError> {
        use std::collections::HashMap;

        let input: Vec<Vec<f64>> = points.iter().map(|p| p.to_vec()).collect();
        let hull = chull::ConvexHullWrapper::try_new(&input, self.max_iter)
            .map_err(|e| HullError::Computation(format!("{:?}", e)))?;
        let (verts, indices) = hull.vertices_indices();

        // chull renumbers its output vertices; map them back to input slots.
        let by_bits: HashMap<[u64; 3], usize> = points
            .iter()
            .enumerate()
            .map(|(i, p)| ([p[0].to_bits(), p[1].to_bits(), p[2].to_bits()], i))
            .collect();
        let lookup = |v: &Vec<f64>| -> Result<usize, HullError> {
            if v.len() != 3 {
                return Err(HullError::Computation(format!(
                    "hull vertex has {} coordinates",
                    v.len()
                )));
            }
            if let Some(&i) = by_bits.get(&[v[0].to_bits(), v[1].to_bits(), v[2].to_bits()]) {
                return Ok(i);
            }
            nearest(points, [v[0], v[1], v[2]])
                .ok_or_else(|| HullError::Computation("empty point list".to_string()))
        };
        let slots = verts.iter().map(lookup).collect::<Result<Vec<_>, _>>()?;

        let triangles = indices
            .chunks(3)
            .filter(|tri| tri.len() == 3)
            .map(|tri| -> Result<[usize; 3], HullError> {
                let slot = |k: usize| {
                    slots.get(k).copied().ok_or_else(|| {
                        HullError::Computation(format!("hull index {} out of range", k))
                    })
                };
                Ok([slot(tri[0])?, slot(tri[1])?, slot(tri[2])?])
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(HullMesh { triangles })
    }
}

#[cfg(feature = "chull")]
fn nearest(points: &[[f64; 3]], target: [f64; 3]) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let d: f64 = p.iter().zip(&target).map(|(a, b)| (a - b) * (a - b)).sum();
            (i, d)
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// The provider compiled into this build.
pub fn default_provider() -> Box<dyn HullProvider> {
    #[cfg(feature = "chull")]
    {
        Box::new(ChullProvider::default())
    }
    #[cfg(not(feature = "chull"))]
    {
        Box::new(UnavailableHull)
    }
}

/// Builds [`ConvexPolyhedron`]s from point sets of any dimension.
pub struct HullAdapter {
    provider: Box<dyn HullProvider>,
}

impl std::fmt::Debug for HullAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HullAdapter")
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl HullAdapter {
    pub fn new(provider: Box<dyn HullProvider>) -> Self {
        Self { provider }
    }

    pub fn with_default_provider() -> Self {
        Self::new(default_provider())
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Runs a unit tetrahedron through the provider.
    pub fn probe(&self) -> Result<(), HullError> {
        let tetrahedron = PointSet::from_3d([
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ])?;
        let polyhedron = self.compute(&tetrahedron)?;
        if polyhedron.vertex_count() != 4 || polyhedron.facet_count() != 4 {
            return Err(HullError::Computation(format!(
                "probe tetrahedron came back with {} vertices and {} facets",
                polyhedron.vertex_count(),
                polyhedron.facet_count()
            )));
        }
        Ok(())
    }

    /// Computes the convex hull of `points`.
    ///
    /// Sets spanning fewer than three dimensions come back as
    /// lower-dimensional polyhedra without facets. Sets in more than three
    /// coordinates that still span exactly three dimensions are hulled in
    /// their own affine frame; sets spanning more than three are projected
    /// onto the first three coordinate axes first.
    pub fn compute(&self, points: &PointSet) -> Result<ConvexPolyhedron, HullError> {
        if !self.provider.is_available() {
            return Err(HullError::Unavailable);
        }

        let points = points.dedup(DEDUP_TOLERANCE * points.radius());
        let frame = AffineFrame::of(&points);
        let rank = frame.rank();

        if rank < 3 {
            return Ok(ConvexPolyhedron::lower_dimensional(
                rank,
                points.into_points(),
            ));
        }

        let coords: Vec<[f64; 3]> = if rank > 3 {
            let projected = PointSet::new(points.points().iter().map(|p| p[..3].to_vec()).collect())?;
            let projected = projected.dedup(DEDUP_TOLERANCE * projected.radius());
            if AffineFrame::of(&projected).rank() < 3 {
                return Ok(ConvexPolyhedron::lower_dimensional(
                    rank,
                    points.into_points(),
                ));
            }
            projected.points().iter().map(|p| [p[0], p[1], p[2]]).collect()
        } else if points.dim() == 3 {
            points.points().iter().map(|p| [p[0], p[1], p[2]]).collect()
        } else {
            points
                .points()
                .iter()
                .map(|p| {
                    let c = frame.coordinates(p, 3);
                    [c[0], c[1], c[2]]
                })
                .collect()
        };

        // Hull and facet tolerances work on a unit-extent copy; vertices keep
        // the caller's coordinates.
        let unit = normalize(&coords);
        let mesh = self.provider.hull_3d(&unit)?;
        let assembled = facets::assemble(&unit, &mesh.triangles)?;
        let vertices = assembled
            .vertex_indices
            .iter()
            .map(|&i| coords[i].to_vec())
            .collect();
        Ok(ConvexPolyhedron::new(3, vertices, assembled.facets))
    }
}

/// Translates `coords` to their mean and scales the largest coordinate offset
/// to 1. Sets with no finite positive extent are returned unchanged.
fn normalize(coords: &[[f64; 3]]) -> Vec<[f64; 3]> {
    let n = coords.len().max(1) as f64;
    let mut mean = [0.0; 3];
    for c in coords {
        for k in 0..3 {
            mean[k] += c[k] / n;
        }
    }
    let extent = coords
        .iter()
        .flat_map(|c| (0..3).map(move |k| (c[k] - mean[k]).abs()))
        .fold(0.0, f64::max);
    if !(extent.is_finite() && extent > 0.0) {
        return coords.to_vec();
    }
    coords
        .iter()
        .map(|c| [0, 1, 2].map(|k| (c[k] - mean[k]) / extent))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyhedron::Polyhedron;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Provider returning a fixed tetrahedron boundary and counting calls.
    struct TetraProvider {
        calls: Cell<usize>,
    }

    impl HullProvider for TetraProvider {
        fn name(&self) -> &'static str {
            "tetra"
        }

        fn hull_3d(&self, points: &[[f64; 3]]) -> Result<HullMesh, HullError> {
            self.calls.set(self.calls.get() + 1);
            if points.len() != 4 {
                return Err(HullError::Computation("expected 4 points".into()));
            }
            Ok(HullMesh {
                triangles: vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]],
            })
        }
    }

    fn tetra_adapter() -> HullAdapter {
        HullAdapter::new(Box::new(TetraProvider {
            calls: Cell::new(0),
        }))
    }

    #[test]
    fn test_unavailable_provider_fails_closed() {
        let adapter = HullAdapter::new(Box::new(UnavailableHull));
        let points = PointSet::from_3d([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]).unwrap();
        assert_eq!(adapter.compute(&points).unwrap_err(), HullError::Unavailable);
        assert_eq!(adapter.probe().unwrap_err(), HullError::Unavailable);
    }

    #[test]
    fn test_degenerate_input_is_forwarded_without_hull_call() {
        let provider = TetraProvider {
            calls: Cell::new(0),
        };
        let adapter = HullAdapter::new(Box::new(provider));
        let square = PointSet::from_3d([
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
        ])
        .unwrap();
        let poly = adapter.compute(&square).unwrap();
        assert_eq!(poly.dimension(), 2);
        assert_eq!(poly.vertex_count(), 4);
        assert_eq!(poly.facet_count(), 0);
    }

    #[test]
    fn test_tetrahedron_through_mock_provider() {
        let adapter = tetra_adapter();
        adapter.probe().unwrap();
        assert_eq!(adapter.provider_name(), "tetra");
    }

    #[test]
    fn test_rank_three_in_four_coordinates_is_reexpressed() {
        // A tetrahedron embedded in the hyperplane w = 5 of R^4.
        let adapter = tetra_adapter();
        let points = PointSet::new(vec![
            vec![0.0, 0.0, 0.0, 5.0],
            vec![1.0, 0.0, 0.0, 5.0],
            vec![0.0, 1.0, 0.0, 5.0],
            vec![0.0, 0.0, 1.0, 5.0],
        ])
        .unwrap();
        let poly = adapter.compute(&points).unwrap();
        assert_eq!(poly.dimension(), 3);
        assert_eq!(poly.vertex_count(), 4);
        assert!(poly.vertex_slice().iter().all(|v| v.len() == 3));

        // Edge lengths survive the change of frame.
        let v = poly.vertex_slice();
        let d: f64 = v[0].iter().zip(&v[1]).map(|(a, b)| (a - b) * (a - b)).sum();
        approx::assert_relative_eq!(d.sqrt(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_higher_rank_with_flat_projection_is_returned_unprojected() {
        // Spans 4 dimensions but the first three coordinates are collinear.
        let adapter = tetra_adapter();
        let hyper = PointSet::new(vec![
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
        ])
        .unwrap();
        assert!(AffineFrame::of(&hyper).rank() > 3);
        let poly = adapter.compute(&hyper).unwrap();
        assert_eq!(poly.dimension(), 4);
        assert_eq!(poly.vertex_count(), 5);
        assert_eq!(poly.facet_count(), 0);
    }

    #[test]
    fn test_provider_errors_propagate() {
        let adapter = tetra_adapter();
        let cube = PointSet::from_3d(
            (0..8).map(|i| [((i >> 2) & 1) as f64, ((i >> 1) & 1) as f64, (i & 1) as f64]),
        )
        .unwrap();
        assert!(matches!(
            adapter.compute(&cube),
            Err(HullError::Computation(_))
        ));
    }

    /// Records the largest coordinate magnitude it is asked to hull.
    struct ExtentProvider {
        extent: Rc<Cell<f64>>,
    }

    impl HullProvider for ExtentProvider {
        fn name(&self) -> &'static str {
            "extent"
        }

        fn hull_3d(&self, points: &[[f64; 3]]) -> Result<HullMesh, HullError> {
            let extent = points
                .iter()
                .flat_map(|p| p.iter())
                .fold(0.0_f64, |m, c| m.max(c.abs()));
            self.extent.set(extent);
            Ok(HullMesh {
                triangles: vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]],
            })
        }
    }

    #[test]
    fn test_provider_sees_unit_extent_and_vertices_keep_scale() {
        for scale in [1e-20, 1.0, 1e80] {
            let extent = Rc::new(Cell::new(0.0));
            let adapter = HullAdapter::new(Box::new(ExtentProvider {
                extent: Rc::clone(&extent),
            }));
            let tetra = [
                [0.0, 0.0, 0.0],
                [scale, 0.0, 0.0],
                [0.0, scale, 0.0],
                [0.0, 0.0, scale],
            ];
            let poly = adapter.compute(&PointSet::from_3d(tetra).unwrap()).unwrap();

            approx::assert_relative_eq!(extent.get(), 1.0, epsilon = 1e-12);
            assert_eq!(poly.facet_count(), 4);
            assert_eq!(poly.vertex_slice()[1], vec![scale, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_normalize_centres_and_scales() {
        assert_eq!(normalize(&[[3.0, 4.0, 5.0]]), vec![[3.0, 4.0, 5.0]]);
        assert_eq!(
            normalize(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0]]),
            vec![[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]]
        );
    }

    #[cfg(feature = "chull")]
    #[test]
    fn test_chull_cube_with_interior_points() {
        let adapter = HullAdapter::new(Box::new(ChullProvider::default()));
        let mut points: Vec<[f64; 3]> = (0..8)
            .map(|i| [((i >> 2) & 1) as f64, ((i >> 1) & 1) as f64, (i & 1) as f64])
            .collect();
        points.push([0.5, 0.5, 0.5]);
        points.push([0.5, 0.5, 0.0]);
        let poly = adapter.compute(&PointSet::from_3d(points).unwrap()).unwrap();
        assert_eq!(poly.vertex_count(), 8);
        assert_eq!(poly.facet_count(), 6);
    }
}
