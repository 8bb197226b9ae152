//! Serialisable summary of a query, for storage or display by other tools.

use boxnav_core::{Mesh, Point, Rect};

use crate::finder::Route;

/// A route resolved against its mesh, with per-box cost annotations.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RouteReport {
    pub source: Point,
    pub destination: Point,
    /// Waypoints; empty when no path exists.
    pub points: Vec<Point>,
    /// Crossed boxes by value.
    pub boxes: Vec<Rect>,
    /// Total box-midpoint cost.
    pub cost: f64,
    /// Cost accumulated on arrival at each entry of `boxes`.
    pub box_costs: Vec<f64>,
}

impl RouteReport {
    pub fn new(mesh: &Mesh, source: Point, destination: Point, route: &Route) -> Self {
        Self {
            source,
            destination,
            points: route.points.clone(),
            boxes: route.rects(mesh),
            cost: route.cost(mesh),
            box_costs: route.cumulative_costs(mesh),
        }
    }

    /// Whether the query found a path.
    pub fn found(&self) -> bool {
        !self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::find_path;
    use boxnav_core::BoxId;

    #[test]
    fn report_round_trip() {
        let mesh = Mesh::from_pairs(
            vec![Rect::new(0.0, 2.0, 0.0, 2.0), Rect::new(2.0, 4.0, 0.0, 2.0)],
            [(BoxId(0), BoxId(1))],
        )
        .unwrap();
        let src = Point::new(0.5, 0.5);
        let dst = Point::new(3.5, 1.5);
        let report = RouteReport::new(&mesh, src, dst, &find_path(src, dst, &mesh));
        assert!(report.found());
        assert_eq!(report.boxes, mesh.boxes().to_vec());
        assert_eq!(report.box_costs, vec![0.0, 2.0]);

        let json = serde_json::to_string(&report).unwrap();
        let back: RouteReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn empty_report() {
        let mesh = Mesh::default();
        let src = Point::new(0.0, 0.0);
        let report = RouteReport::new(&mesh, src, src, &find_path(src, src, &mesh));
        assert!(!report.found());
        assert!(report.boxes.is_empty());
        assert_eq!(report.cost, 0.0);
    }
}
