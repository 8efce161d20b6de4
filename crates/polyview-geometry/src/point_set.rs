//! Fixed-dimension point sets fed to the hull adapter.

use crate::error::PointSetError;

/// An ordered, non-empty list of same-dimension `f64` points.
///
/// Duplicates are allowed; the hull adapter merges them. The order of first
/// occurrence becomes the vertex order of the resulting polyhedron.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    dim: usize,
    points: Vec<Vec<f64>>,
}

impl PointSet {
    /// Creates a point set, checking that it is non-empty, that every point
    /// has the same dimension (at least one) and that all coordinates are
    /// finite.
    pub fn new(points: Vec<Vec<f64>>) -> Result<Self, PointSetError> {
        let dim = points.first().ok_or(PointSetError::Empty)?.len();
        if dim == 0 {
            return Err(PointSetError::ZeroDimension);
        }

        for (index, point) in points.iter().enumerate() {
            if point.len() != dim {
                return Err(PointSetError::MixedDimensions {
                    index,
                    expected: dim,
                    found: point.len(),
                });
            }
            if !point.iter().all(|c| c.is_finite()) {
                return Err(PointSetError::NonFinite { index });
            }
        }

        Ok(Self { dim, points })
    }

    /// Creates a 3D point set from coordinate triples.
    pub fn from_3d<I>(points: I) -> Result<Self, PointSetError>
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        Self::new(points.into_iter().map(|p| p.to_vec()).collect())
    }

    /// Number of coordinates per point.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of points, duplicates included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Vec<f64>> {
        self.points
    }

    /// Arithmetic mean of all points.
    pub fn mean(&self) -> Vec<f64> {
        let mut mean = vec![0.0; self.dim];
        for point in &self.points {
            for (m, c) in mean.iter_mut().zip(point) {
                *m += c;
            }
        }
        let n = self.points.len() as f64;
        mean.iter_mut().for_each(|m| *m /= n);
        mean
    }

    /// Returns the point set translated so that its mean is the origin.
    pub fn centered(&self) -> PointSet {
        let mean = self.mean();
        let points = self
            .points
            .iter()
            .map(|p| p.iter().zip(&mean).map(|(c, m)| c - m).collect())
            .collect();
        PointSet {
            dim: self.dim,
            points,
        }
    }

    /// Largest Euclidean distance from the mean to any point.
    pub fn radius(&self) -> f64 {
        let mean = self.mean();
        self.points
            .iter()
            .map(|p| {
                p.iter()
                    .zip(&mean)
                    .map(|(c, m)| (c - m) * (c - m))
                    .sum::<f64>()
                    .sqrt()
            })
            .fold(0.0, f64::max)
    }

    /// Minkowski sum: every point of `self` added to every point of `other`.
    ///
    /// The result has `self.len() * other.len()` points, most of them interior
    /// for non-trivial inputs; the hull discards those.
    pub fn minkowski_sum(&self, other: &PointSet) -> Result<PointSet, PointSetError> {
        if other.dim != self.dim {
            return Err(PointSetError::MixedDimensions {
                index: 0,
                expected: self.dim,
                found: other.dim,
            });
        }

        let points = self
            .points
            .iter()
            .flat_map(|a| {
                other
                    .points
                    .iter()
                    .map(move |b| a.iter().zip(b).map(|(x, y)| x + y).collect())
            })
            .collect();
        PointSet::new(points)
    }

    /// Removes points closer than `tolerance` to an earlier point, keeping the
    /// first occurrence.
    pub fn dedup(&self, tolerance: f64) -> PointSet {
        let tol2 = tolerance * tolerance;
        let mut kept: Vec<Vec<f64>> = Vec::with_capacity(self.points.len());
        for point in &self.points {
            let duplicate = kept.iter().any(|k| {
                k.iter()
                    .zip(point)
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>()
                    <= tol2
            });
            if !duplicate {
                kept.push(point.clone());
            }
        }
        PointSet {
            dim: self.dim,
            points: kept,
        }
    }
}
