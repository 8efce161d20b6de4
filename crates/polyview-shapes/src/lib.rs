//! Polyview Shapes
//!
//! Coordinate generators for the polytopes shipped with the viewer, and the
//! [`ShapeRegistry`] that lists them for the batch driver.
//!
//! Every builder follows the same contract: generate a point set from a
//! closed-form construction, hand it to the [`HullAdapter`], and return the
//! polyhedron with its display name. A builder that cannot run because the
//! hull capability is missing declines with a message instead of failing.
//!
//! ```
//! use polyview_shapes::builtin_registry;
//!
//! let registry = builtin_registry();
//! let cube = registry.get("build_cube").unwrap();
//! assert_eq!(cube.module, "platonic");
//! assert_eq!(cube.json_file(), "cube.json");
//! ```

pub mod associahedra;
pub mod combinatorics;
pub mod matroids;
pub mod permutahedra;
pub mod platonic;
pub mod registry;
pub mod root_polytopes;

use polyview_geometry::{GeometryError, HullAdapter, HullError, PointSet, PointSetError, Polyhedron};
use thiserror::Error;

pub use registry::{RegistryError, ShapeEntry, ShapeRegistry, BUILD_FUNCTION_PREFIX};

/// Message returned by builders when no hull provider is available.
pub const DEPENDENCY_UNAVAILABLE: &str = "Error: dependency unavailable";

/// What a builder produced.
pub enum BuildOutcome {
    /// A polyhedron ready for export, with its display name.
    Built {
        polyhedron: Box<dyn Polyhedron>,
        name: String,
    },
    /// The builder chose not to produce a shape.
    Declined { message: String },
}

impl BuildOutcome {
    pub fn built(polyhedron: impl Polyhedron + 'static, name: impl Into<String>) -> Self {
        BuildOutcome::Built {
            polyhedron: Box::new(polyhedron),
            name: name.into(),
        }
    }

    pub fn declined(message: impl Into<String>) -> Self {
        BuildOutcome::Declined {
            message: message.into(),
        }
    }
}

impl std::fmt::Debug for BuildOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildOutcome::Built { polyhedron, name } => f
                .debug_struct("Built")
                .field("name", name)
                .field("dimension", &polyhedron.dimension())
                .finish(),
            BuildOutcome::Declined { message } => f
                .debug_struct("Declined")
                .field("message", message)
                .finish(),
        }
    }
}

/// Builder execution failure.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    PointSet(#[from] PointSetError),

    #[error(transparent)]
    Hull(#[from] HullError),

    #[error("{0}")]
    Invalid(String),
}

impl GeometryError for BuildError {
    fn code(&self) -> &'static str {
        match self {
            BuildError::PointSet(e) => e.code(),
            BuildError::Hull(e) => e.code(),
            BuildError::Invalid(_) => "BUILD_001",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            BuildError::PointSet(e) => e.category(),
            BuildError::Hull(e) => e.category(),
            BuildError::Invalid(_) => "build",
        }
    }
}

/// Signature shared by all shape builders.
pub type BuildFn = fn(&HullAdapter) -> Result<BuildOutcome, BuildError>;

/// Hulls `points` and wraps the result, declining when the hull capability
/// is unavailable.
pub fn hull_shape(
    adapter: &HullAdapter,
    points: PointSet,
    name: &str,
) -> Result<BuildOutcome, BuildError> {
    match adapter.compute(&points) {
        Ok(polyhedron) => Ok(BuildOutcome::built(polyhedron, name)),
        Err(HullError::Unavailable) => Ok(BuildOutcome::declined(DEPENDENCY_UNAVAILABLE)),
        Err(e) => Err(e.into()),
    }
}

/// Registry holding every builtin builder, grouped by module.
pub fn builtin_registry() -> ShapeRegistry {
    let mut registry = ShapeRegistry::new();
    let modules: [(&'static str, &[(&'static str, BuildFn)]); 5] = [
        ("platonic", platonic::BUILDERS),
        ("permutahedra", permutahedra::BUILDERS),
        ("associahedra", associahedra::BUILDERS),
        ("matroids", matroids::BUILDERS),
        ("root_polytopes", root_polytopes::BUILDERS),
    ];
    for (module, builders) in modules {
        for &(function, build) in builders {
            let registered = registry.register(module, function, build);
            debug_assert!(registered.is_ok(), "builtin registration failed: {:?}", registered);
        }
    }
    registry
}
