use boxnav_core::{Point, Rect};

/// Turn a box path into waypoints.
///
/// Starting from `source`, each box contributes the point of that box
/// closest to the previous waypoint. `destination` is appended verbatim, so
/// the result always begins with `source` and ends with `destination` and
/// has `boxes.len() + 2` entries.
///
/// This is a greedy projection, not a taut-string shortest polyline.
pub fn materialize(
    source: Point,
    destination: Point,
    boxes: impl IntoIterator<Item = Rect>,
) -> Vec<Point> {
    let boxes = boxes.into_iter();
    let mut points = Vec::with_capacity(boxes.size_hint().0 + 2);
    points.push(source);

    let mut reference = source;
    for r in boxes {
        reference = r.clamp(reference);
        points.push(reference);
    }

    points.push(destination);
    points
}
