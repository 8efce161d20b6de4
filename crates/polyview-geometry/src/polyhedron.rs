//! The read-only polyhedron interface consumed by the exporter.

use crate::error::PolyhedronError;

/// A convex polyhedron as seen by the exporter.
///
/// Vertices are indexed `0..n` in a stable order and facets refer to those
/// indices. Accessors return `Result` so implementations backed by lazy or
/// fallible computations can report failures instead of panicking.
pub trait Polyhedron {
    /// Affine dimension of the polyhedron.
    fn dimension(&self) -> usize;

    /// Vertex coordinates in their stable order.
    fn vertices(&self) -> Result<Vec<Vec<f64>>, PolyhedronError>;

    /// Facets as groups of vertex indices, in any order.
    fn facets(&self) -> Result<Vec<Vec<usize>>, PolyhedronError>;

    /// Optional centroid accessor. `None` means the polyhedron does not
    /// expose one.
    fn centroid(&self) -> Option<Result<Vec<f64>, PolyhedronError>> {
        None
    }
}

/// Concrete polyhedron produced by the hull adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolyhedron {
    dimension: usize,
    vertices: Vec<Vec<f64>>,
    facets: Vec<Vec<usize>>,
    centroid: Option<Vec<f64>>,
}

impl ConvexPolyhedron {
    pub fn new(dimension: usize, vertices: Vec<Vec<f64>>, facets: Vec<Vec<usize>>) -> Self {
        Self {
            dimension,
            vertices,
            facets,
            centroid: None,
        }
    }

    /// A polyhedron of dimension below 3 (or an unprojected higher one)
    /// carrying its points and no facets.
    pub fn lower_dimensional(dimension: usize, vertices: Vec<Vec<f64>>) -> Self {
        Self::new(dimension, vertices, Vec::new())
    }

    /// Attaches an explicit centroid.
    pub fn with_centroid(mut self, centroid: Vec<f64>) -> Self {
        self.centroid = Some(centroid);
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    pub fn vertex_slice(&self) -> &[Vec<f64>] {
        &self.vertices
    }

    pub fn facet_slice(&self) -> &[Vec<usize>] {
        &self.facets
    }
}

impl Polyhedron for ConvexPolyhedron {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn vertices(&self) -> Result<Vec<Vec<f64>>, PolyhedronError> {
        Ok(self.vertices.clone())
    }

    fn facets(&self) -> Result<Vec<Vec<usize>>, PolyhedronError> {
        Ok(self.facets.clone())
    }

    fn centroid(&self) -> Option<Result<Vec<f64>, PolyhedronError>> {
        self.centroid.clone().map(Ok)
    }
}

impl<P: Polyhedron + ?Sized> Polyhedron for Box<P> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn vertices(&self) -> Result<Vec<Vec<f64>>, PolyhedronError> {
        (**self).vertices()
    }

    fn facets(&self) -> Result<Vec<Vec<usize>>, PolyhedronError> {
        (**self).facets()
    }

    fn centroid(&self) -> Option<Result<Vec<f64>, PolyhedronError>> {
        (**self).centroid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_dimensional_has_no_facets() {
        let p = ConvexPolyhedron::lower_dimensional(2, vec![vec![0.0, 0.0, 0.0]; 3]);
        assert_eq!(p.dimension(), 2);
        assert_eq!(p.facet_count(), 0);
        assert!(p.centroid().is_none());
    }

    #[test]
    fn test_with_centroid_is_exposed() {
        let p = ConvexPolyhedron::new(3, vec![], vec![]).with_centroid(vec![1.0, 2.0, 3.0]);
        assert_eq!(p.centroid(), Some(Ok(vec![1.0, 2.0, 3.0])));
    }

    #[test]
    fn test_boxed_polyhedron_delegates() {
        let boxed: Box<dyn Polyhedron> =
            Box::new(ConvexPolyhedron::new(3, vec![vec![1.0, 1.0, 1.0]], vec![vec![0]]));
        assert_eq!(boxed.dimension(), 3);
        assert_eq!(boxed.vertices().unwrap().len(), 1);
        assert_eq!(boxed.facets().unwrap(), vec![vec![0]]);
    }
}
