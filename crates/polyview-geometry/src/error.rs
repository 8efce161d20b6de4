//! Error types for point sets, hull construction and geometry export.

use thiserror::Error;

/// Common trait for geometry pipeline errors.
///
/// Every error that can end up in a batch summary exposes a stable code and a
/// category. The batch driver stores the code on each failed result and the
/// summary groups failures by it.
///
/// # Example
///
/// ```
/// use polyview_geometry::{GeometryError, HullError};
///
/// let err = HullError::Unavailable;
/// assert_eq!(err.code(), "HULL_001");
/// assert_eq!(err.category(), "hull");
/// ```
pub trait GeometryError: std::error::Error {
    /// Stable error code such as "HULL_001" or "EXPORT_002".
    fn code(&self) -> &'static str;

    /// Human-readable message; defaults to the `Display` output.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category ("points", "hull", "export", "polyhedron").
    fn category(&self) -> &'static str;
}

/// Errors from constructing a [`PointSet`](crate::PointSet).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointSetError {
    /// No points were supplied.
    #[error("point set is empty")]
    Empty,

    /// Points have no coordinates at all.
    #[error("points must have at least one coordinate")]
    ZeroDimension,

    /// A point does not have the same number of coordinates as the first one.
    #[error("point {index} has {found} coordinates, expected {expected}")]
    MixedDimensions {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("point {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

impl GeometryError for PointSetError {
    fn code(&self) -> &'static str {
        match self {
            PointSetError::Empty => "POINTS_001",
            PointSetError::ZeroDimension => "POINTS_002",
            PointSetError::MixedDimensions { .. } => "POINTS_003",
            PointSetError::NonFinite { .. } => "POINTS_004",
        }
    }

    fn category(&self) -> &'static str {
        "points"
    }
}

/// Errors from the hull adapter and hull providers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HullError {
    /// The hull capability is not available in this build.
    #[error("dependency unavailable")]
    Unavailable,

    /// The input point set was rejected before reaching the provider.
    #[error("invalid point set: {0}")]
    InvalidInput(#[from] PointSetError),

    /// The provider failed or returned an unusable boundary.
    #[error("hull computation failed: {0}")]
    Computation(String),
}

impl GeometryError for HullError {
    fn code(&self) -> &'static str {
        match self {
            HullError::Unavailable => "HULL_001",
            HullError::InvalidInput(_) => "HULL_002",
            HullError::Computation(_) => "HULL_003",
        }
    }

    fn category(&self) -> &'static str {
        "hull"
    }
}

/// Errors from converting a polyhedron into a [`GeometryRecord`](crate::GeometryRecord).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    /// The polyhedron is not three-dimensional. This is a deliberate skip.
    #[error("polyhedron has dimension {found}, expected 3")]
    DimensionMismatch { found: usize },

    /// Vertex, facet or center extraction failed.
    #[error("{0}")]
    Conversion(String),
}

impl GeometryError for ExportError {
    fn code(&self) -> &'static str {
        match self {
            ExportError::DimensionMismatch { .. } => "EXPORT_001",
            ExportError::Conversion(_) => "EXPORT_002",
        }
    }

    fn category(&self) -> &'static str {
        "export"
    }
}

impl From<PolyhedronError> for ExportError {
    fn from(err: PolyhedronError) -> Self {
        ExportError::Conversion(err.to_string())
    }
}

/// Failure reported by a [`Polyhedron`](crate::Polyhedron) accessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PolyhedronError(pub String);

impl PolyhedronError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl GeometryError for PolyhedronError {
    fn code(&self) -> &'static str {
        "POLY_001"
    }

    fn category(&self) -> &'static str {
        "polyhedron"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(PointSetError::Empty.code(), "POINTS_001");
        assert_eq!(PointSetError::NonFinite { index: 3 }.code(), "POINTS_004");
        assert_eq!(HullError::Computation("x".into()).code(), "HULL_003");
        assert_eq!(ExportError::DimensionMismatch { found: 2 }.code(), "EXPORT_001");
        assert_eq!(PolyhedronError::new("boom").code(), "POLY_001");
    }

    #[test]
    fn test_unavailable_message() {
        assert_eq!(HullError::Unavailable.to_string(), "dependency unavailable");
    }

    #[test]
    fn test_point_set_error_wraps_into_hull_error() {
        let err: HullError = PointSetError::Empty.into();
        assert_eq!(err.to_string(), "invalid point set: point set is empty");
        assert_eq!(err.category(), "hull");
    }

    #[test]
    fn test_polyhedron_error_becomes_conversion() {
        let err: ExportError = PolyhedronError::new("facet list unavailable").into();
        assert_eq!(err, ExportError::Conversion("facet list unavailable".into()));
        assert_eq!(err.message(), "facet list unavailable");
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = ExportError::DimensionMismatch { found: 4 };
        assert_eq!(err.to_string(), "polyhedron has dimension 4, expected 3");
    }
}
