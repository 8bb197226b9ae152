//! **boxnav-core**: core types for navigation over box meshes.
//!
//! A box mesh partitions walkable space into axis-aligned rectangles. This
//! crate provides the geometry primitives, the mesh arena with its adjacency
//! lists, and (behind the `serde` feature) the on-disk level description.

pub mod geom;
#[cfg(feature = "serde")]
pub mod level;
pub mod mesh;

pub use geom::{Point, Rect, closest_point, distance, edge_cost, midpoint};
#[cfg(feature = "serde")]
pub use level::{Level, LevelError};
pub use mesh::{BoxId, Mesh, MeshError};
