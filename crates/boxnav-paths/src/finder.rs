//! Point-to-point queries: locate both endpoints, search the box graph, and
//! materialize waypoints.

use std::fmt;

use boxnav_core::{BoxId, Mesh, Point, Rect};
use thiserror::Error;

use crate::astar::astar_path;
use crate::bidir::bidirectional_path;
use crate::config::{Algorithm, SearchConfig};
use crate::locate::find_box;
use crate::materialize::materialize;
use crate::search::SearchError;
use crate::traits::WeightedGraph;

/// Which end of a query an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Why a query produced no route. All variants are recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum NavError {
    /// An endpoint lies outside every box.
    #[error("{endpoint} point {point} is outside the mesh")]
    PointOutsideMesh { endpoint: Endpoint, point: Point },
    /// Both endpoints are inside the mesh but no chain of boxes links them.
    #[error("no path from box {from} to box {to}")]
    NoPath { from: BoxId, to: BoxId },
    /// The search halves met but their join is not walkable.
    #[error("inconsistent join at box {meeting}; is the mesh adjacency symmetric?")]
    InconsistentJoin { meeting: BoxId },
    /// A box id outside the mesh was passed to a box-level query.
    #[error("box {0} is not part of the mesh")]
    UnknownBox(BoxId),
}

/// Sum of edge costs along a box path.
pub fn path_cost<G: WeightedGraph>(graph: &G, path: &[BoxId]) -> f64 {
    path.windows(2).map(|w| graph.cost(w[0], w[1])).sum()
}

/// The result of a successful query: waypoints plus the boxes they cross.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Waypoints from the exact source to the exact destination.
    pub points: Vec<Point>,
    /// Boxes crossed, from the source box to the destination box.
    pub boxes: Vec<BoxId>,
}

impl Route {
    /// Whether this is the empty "no path" route.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.boxes.is_empty()
    }

    /// Total box-midpoint cost of the route.
    pub fn cost(&self, mesh: &Mesh) -> f64 {
        path_cost(mesh, &self.boxes)
    }

    /// Cost accumulated on arrival at each box; the first entry is 0.
    pub fn cumulative_costs(&self, mesh: &Mesh) -> Vec<f64> {
        let mut acc = 0.0;
        let mut out = Vec::with_capacity(self.boxes.len());
        for (i, &id) in self.boxes.iter().enumerate() {
            if i > 0 {
                acc += mesh.cost(self.boxes[i - 1], id);
            }
            out.push(acc);
        }
        out
    }

    /// The crossed boxes by value.
    pub fn rects(&self, mesh: &Mesh) -> Vec<Rect> {
        self.boxes.iter().map(|&id| mesh.rect(id)).collect()
    }

    /// Length of the waypoint polyline.
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// Runs point-to-point queries against a mesh.
///
/// A `PathFinder` holds only its configuration; all search state is
/// allocated per query, so one finder (and one mesh) can be shared across
/// threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathFinder {
    config: SearchConfig,
}

impl PathFinder {
    /// Create a finder with the given settings.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// The settings in use.
    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Compute a box path between two boxes with the configured algorithm.
    pub fn box_path(
        &self,
        mesh: &Mesh,
        source: BoxId,
        destination: BoxId,
    ) -> Result<Vec<BoxId>, NavError> {
        let result = match self.config.algorithm {
            Algorithm::Bidirectional => {
                bidirectional_path(mesh, source, destination, self.config.meet)
            }
            Algorithm::Astar => astar_path(mesh, source, destination),
        };
        result.map_err(|e| match e {
            SearchError::NoPath => NavError::NoPath {
                from: source,
                to: destination,
            },
            SearchError::InconsistentJoin { meeting } => NavError::InconsistentJoin { meeting },
            SearchError::UnknownBox(id) => NavError::UnknownBox(id),
        })
    }

    /// Find a route from `source` to `destination`.
    pub fn search(&self, mesh: &Mesh, source: Point, destination: Point) -> Result<Route, NavError> {
        let source_box = find_box(source, mesh).ok_or(NavError::PointOutsideMesh {
            endpoint: Endpoint::Source,
            point: source,
        })?;
        let destination_box = find_box(destination, mesh).ok_or(NavError::PointOutsideMesh {
            endpoint: Endpoint::Destination,
            point: destination,
        })?;

        let boxes = self.box_path(mesh, source_box, destination_box)?;
        let points = materialize(source, destination, boxes.iter().map(|&id| mesh.rect(id)));
        log::debug!(
            "route {source} -> {destination}: {} boxes, {} waypoints",
            boxes.len(),
            points.len()
        );
        Ok(Route { points, boxes })
    }

    /// Find a route, returning the empty route when none exists.
    ///
    /// The failure is logged; use [`search`](Self::search) to inspect it.
    pub fn find_path(&self, mesh: &Mesh, source: Point, destination: Point) -> Route {
        match self.search(mesh, source, destination) {
            Ok(route) => route,
            Err(e @ NavError::InconsistentJoin { .. }) => {
                log::error!("no path possible: {e}");
                Route::default()
            }
            Err(e) => {
                log::info!("no path possible: {e}");
                Route::default()
            }
        }
    }
}

/// Find a route with the default settings (bidirectional search, first
/// meeting). Returns the empty route if either point is outside the mesh
/// or the two are not connected.
pub fn find_path(source: Point, destination: Point, mesh: &Mesh) -> Route {
    PathFinder::default().find_path(mesh, source, destination)
}
