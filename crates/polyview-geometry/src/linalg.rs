//! Small linear-algebra helpers shared by the hull adapter, the exporter and
//! the coordinate generators.

use nalgebra::{DMatrix, Matrix3, SymmetricEigen, Vector3, SVD};

use crate::point_set::PointSet;

/// Singular values below this fraction of the largest one count as zero when
/// measuring affine rank.
pub const RANK_TOLERANCE: f64 = 1e-9;

/// Vectors shorter than this are dropped by [`gram_schmidt`].
const BASIS_EPSILON: f64 = 1e-8;

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Orthonormalizes `vectors` in order, skipping any vector that is (nearly)
/// dependent on the ones before it.
pub fn gram_schmidt(vectors: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let mut basis: Vec<Vec<f64>> = Vec::with_capacity(vectors.len());
    for v in vectors {
        let mut u = v.clone();
        for e in &basis {
            let proj = dot(&u, e);
            u.iter_mut().zip(e).for_each(|(ui, ei)| *ui -= proj * ei);
        }
        let n = norm(&u);
        if n > BASIS_EPSILON {
            basis.push(u.into_iter().map(|x| x / n).collect());
        }
    }
    basis
}

/// Orthonormal basis of the hyperplane `x_1 + ... + x_n = 0` in `R^n`, built
/// from `e_1 - e_2, e_2 - e_3, ...`.
pub fn sum_zero_basis(n: usize) -> Vec<Vec<f64>> {
    let raw: Vec<Vec<f64>> = (0..n.saturating_sub(1))
        .map(|i| {
            let mut v = vec![0.0; n];
            v[i] = 1.0;
            v[i + 1] = -1.0;
            v
        })
        .collect();
    gram_schmidt(&raw)
}

/// Coordinates of `point` along each vector of `basis`.
pub fn project_onto(point: &[f64], basis: &[Vec<f64>]) -> Vec<f64> {
    basis.iter().map(|e| dot(point, e)).collect()
}

/// The affine hull of a point set: its mean and an orthonormal basis of the
/// directions it spans, ordered by decreasing spread.
#[derive(Debug, Clone, PartialEq)]
pub struct AffineFrame {
    pub origin: Vec<f64>,
    pub axes: Vec<Vec<f64>>,
}

impl AffineFrame {
    /// Measures the affine hull of `points` with an SVD of the centred
    /// coordinate matrix.
    pub fn of(points: &PointSet) -> AffineFrame {
        let origin = points.mean();
        let centered = points.centered();
        let (rows, cols) = (centered.len(), centered.dim());
        let flat: Vec<f64> = centered.points().iter().flatten().copied().collect();

        let matrix = DMatrix::from_row_slice(rows, cols, &flat);
        let svd = SVD::new(matrix, false, true);
        let Some(v_t) = svd.v_t else {
            return AffineFrame {
                origin,
                axes: Vec::new(),
            };
        };

        let max_sv = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
        if max_sv <= 0.0 {
            return AffineFrame {
                origin,
                axes: Vec::new(),
            };
        }

        let mut ranked: Vec<(f64, Vec<f64>)> = svd
            .singular_values
            .iter()
            .enumerate()
            .filter(|(_, &s)| s > max_sv * RANK_TOLERANCE)
            .map(|(i, &s)| (s, v_t.row(i).iter().copied().collect()))
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

        AffineFrame {
            origin,
            axes: ranked.into_iter().map(|(_, axis)| axis).collect(),
        }
    }

    /// Affine dimension of the measured point set.
    pub fn rank(&self) -> usize {
        self.axes.len()
    }

    /// Coordinates of `point` in this frame, truncated to the first `k` axes.
    pub fn coordinates(&self, point: &[f64], k: usize) -> Vec<f64> {
        let shifted: Vec<f64> = point.iter().zip(&self.origin).map(|(p, o)| p - o).collect();
        self.axes.iter().take(k).map(|axis| dot(&shifted, axis)).collect()
    }
}

/// Centres `points` and projects them onto their `k` principal axes.
///
/// When the set spans fewer than `k` directions the result has fewer
/// coordinates; callers building 3D shapes should feed sets of rank at least 3.
pub fn principal_projection(points: &PointSet, k: usize) -> Vec<Vec<f64>> {
    let frame = AffineFrame::of(points);
    points
        .points()
        .iter()
        .map(|p| frame.coordinates(p, k))
        .collect()
}

/// Unit normal of the best-fit plane through `points`: the eigenvector of the
/// covariance matrix with the smallest eigenvalue. The sign is arbitrary.
pub fn plane_normal(points: &[Vector3<f64>]) -> Vector3<f64> {
    if points.is_empty() {
        return Vector3::z();
    }
    let centroid = points.iter().fold(Vector3::zeros(), |acc, p| acc + p) / points.len() as f64;
    let mut covariance = Matrix3::zeros();
    for p in points {
        let d = p - centroid;
        covariance += d * d.transpose();
    }

    let eigen = SymmetricEigen::new(covariance);
    let smallest = eigen
        .eigenvalues
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(2);
    let normal = eigen.eigenvectors.column(smallest).into_owned();
    normal.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::z)
}
