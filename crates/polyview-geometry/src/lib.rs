//! Polyview Geometry Library
//!
//! This crate turns finite point sets into viewer-ready polytope records.
//! It owns the parts of the pipeline that every shape shares:
//!
//! - **Point sets**: validated, fixed-dimension coordinate lists
//! - **Hull adapter**: measures the affine dimension of a point set and hands
//!   the 3D problem to an injected [`HullProvider`]
//! - **Export**: converts any [`Polyhedron`] into a [`GeometryRecord`] with
//!   float coordinates and facets in planar cyclic order
//!
//! # Example
//!
//! ```
//! use polyview_geometry::{to_record, ConvexPolyhedron};
//!
//! // A unit cube described by hand: 8 vertices, 6 facets as index sets.
//! let vertices = (0..8)
//!     .map(|i| vec![((i >> 2) & 1) as f64, ((i >> 1) & 1) as f64, (i & 1) as f64])
//!     .collect();
//! let facets = vec![
//!     vec![0, 1, 2, 3],
//!     vec![4, 5, 6, 7],
//!     vec![0, 1, 4, 5],
//!     vec![2, 3, 6, 7],
//!     vec![0, 2, 4, 6],
//!     vec![1, 3, 5, 7],
//! ];
//! let cube = ConvexPolyhedron::new(3, vertices, facets);
//!
//! let record = to_record(&cube, "Cube").unwrap();
//! assert_eq!(record.faces.len(), 6);
//! assert_eq!(record.center, [0.5, 0.5, 0.5]);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error types and the [`GeometryError`] reporting trait
//! - [`point_set`]: The [`PointSet`] type
//! - [`linalg`]: Small linear-algebra helpers (Gram-Schmidt, affine frames)
//! - [`polyhedron`]: The [`Polyhedron`] trait and [`ConvexPolyhedron`]
//! - [`hull`]: [`HullProvider`], [`HullAdapter`] and the bundled providers
//! - [`export`]: [`GeometryRecord`] and [`to_record`]

pub mod error;
pub mod export;
pub mod hull;
pub mod linalg;
pub mod point_set;
pub mod polyhedron;

mod facets;

pub use error::{ExportError, GeometryError, HullError, PointSetError, PolyhedronError};
pub use export::{cyclic_order, to_record, vertex_mean, GeometryRecord, COORD_TYPE_COMMENT};
pub use hull::{default_provider, HullAdapter, HullMesh, HullProvider, UnavailableHull};
pub use point_set::PointSet;
pub use polyhedron::{ConvexPolyhedron, Polyhedron};

#[cfg(feature = "chull")]
pub use hull::ChullProvider;
