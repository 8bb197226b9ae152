//! Pathfinding over box navigation meshes.
//!
//! A query runs in three steps:
//!
//! - **Locate** both endpoints in the mesh ([`find_box`])
//! - **Search** the box-adjacency graph for a box path
//!   ([`bidirectional_path`], or the single-direction [`astar_path`])
//! - **Materialize** the box path into waypoints ([`materialize`])
//!
//! [`PathFinder`] bundles the three behind a [`SearchConfig`], and
//! [`find_path`] runs them with the default settings.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`BoxGraph`] | neighbor enumeration, join validation |
//! | [`WeightedGraph`] : [`BoxGraph`] | path costs |
//! | [`AstarGraph`] : [`WeightedGraph`] | A*, bidirectional search |
//!
//! [`Mesh`](boxnav_core::Mesh) implements all three with box-midpoint
//! distance as both edge cost and estimate.

mod astar;
mod bidir;
mod config;
mod finder;
mod locate;
mod materialize;
#[cfg(feature = "serde")]
mod report;
mod search;
mod traits;

pub use astar::astar_path;
pub use bidir::bidirectional_path;
pub use config::{Algorithm, MeetRule, SearchConfig};
pub use finder::{Endpoint, NavError, PathFinder, Route, find_path, path_cost};
pub use locate::find_box;
pub use materialize::materialize;
#[cfg(feature = "serde")]
pub use report::RouteReport;
pub use search::SearchError;
pub use traits::{AstarGraph, BoxGraph, WeightedGraph};
