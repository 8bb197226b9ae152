use boxnav_core::{BoxId, Mesh, Point};

/// Find the box containing `p`.
///
/// Boxes are scanned in id order and the first whose closed bounds contain
/// the point wins, so a point on a shared edge belongs to the lower id.
/// Returns `None` if the point lies outside the mesh.
pub fn find_box(p: Point, mesh: &Mesh) -> Option<BoxId> {
    mesh.iter()
        .find(|(_, r)| r.contains(p))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxnav_core::Rect;

    fn two_boxes() -> Mesh {
        Mesh::from_pairs(
            vec![Rect::new(0.0, 10.0, 0.0, 10.0), Rect::new(10.0, 20.0, 0.0, 5.0)],
            [(BoxId(0), BoxId(1))],
        )
        .unwrap()
    }

    #[test]
    fn interior_points() {
        let mesh = two_boxes();
        assert_eq!(find_box(Point::new(5.0, 5.0), &mesh), Some(BoxId(0)));
        assert_eq!(find_box(Point::new(15.0, 2.5), &mesh), Some(BoxId(1)));
    }

    #[test]
    fn shared_edge_resolves_to_lower_id() {
        let mesh = two_boxes();
        assert_eq!(find_box(Point::new(10.0, 3.0), &mesh), Some(BoxId(0)));
        // Above box 1 but still on box 0's edge.
        assert_eq!(find_box(Point::new(10.0, 8.0), &mesh), Some(BoxId(0)));
    }

    #[test]
    fn outside_mesh() {
        let mesh = two_boxes();
        assert_eq!(find_box(Point::new(15.0, 8.0), &mesh), None);
        assert_eq!(find_box(Point::new(-1e9, 1e9), &mesh), None);
        assert_eq!(find_box(Point::new(1.0, 1.0), &Mesh::default()), None);
    }

    #[test]
    fn overlap_first_match() {
        let mesh = Mesh::from_pairs(
            vec![Rect::new(0.0, 4.0, 0.0, 4.0), Rect::new(2.0, 6.0, 2.0, 6.0)],
            [],
        )
        .unwrap();
        assert_eq!(find_box(Point::new(3.0, 3.0), &mesh), Some(BoxId(0)));
        assert_eq!(find_box(Point::new(5.0, 5.0), &mesh), Some(BoxId(1)));
    }
}
