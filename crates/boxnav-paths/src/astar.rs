use boxnav_core::BoxId;

use crate::search::{Direction, Frontier, SearchError, SearchTable};
use crate::traits::AstarGraph;

/// Compute the cheapest box path from `source` to `destination` using A*.
///
/// Returns the full path (including both endpoints). A query whose two
/// boxes coincide yields that single box.
pub fn astar_path<G: AstarGraph>(
    graph: &G,
    source: BoxId,
    destination: BoxId,
) -> Result<Vec<BoxId>, SearchError> {
    let len = graph.box_count();
    for id in [source, destination] {
        if id.index() >= len {
            return Err(SearchError::UnknownBox(id));
        }
    }

    if source == destination {
        return Ok(vec![source]);
    }

    let mut table = SearchTable::new(len, source);
    let mut open = Frontier::new();
    open.push(
        graph.estimate(source, destination),
        source,
        Direction::Forward,
    );

    let mut nbuf = Vec::new();
    let mut expanded = 0usize;

    while let Some(current) = open.pop() {
        let ci = current.id;

        // Skip stale entries.
        if !table.is_open(ci) {
            continue;
        }

        if ci == destination {
            log::debug!("astar: reached {destination} after {expanded} expansions");
            let mut path = table
                .chain(destination)
                .ok_or(SearchError::InconsistentJoin {
                    meeting: destination,
                })?;
            path.reverse();
            return Ok(path);
        }

        table.close(ci);
        expanded += 1;
        let Some(current_g) = table.cost(ci) else {
            continue;
        };

        nbuf.clear();
        graph.neighbors(ci, &mut nbuf);

        for &ni in nbuf.iter() {
            if ni.index() >= len {
                continue;
            }
            let tentative_g = current_g + graph.cost(ci, ni);
            if table.relax(ni, tentative_g, ci) {
                open.push(
                    tentative_g + graph.estimate(ni, destination),
                    ni,
                    Direction::Forward,
                );
            }
        }
    }

    log::debug!("astar: frontier exhausted after {expanded} expansions");
    Err(SearchError::NoPath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxnav_core::{Mesh, Rect};

    /// Three boxes in a row plus a detached one.
    fn row() -> Mesh {
        Mesh::from_pairs(
            vec![
                Rect::new(0.0, 1.0, 0.0, 1.0),
                Rect::new(1.0, 2.0, 0.0, 1.0),
                Rect::new(2.0, 3.0, 0.0, 1.0),
                Rect::new(10.0, 11.0, 0.0, 1.0),
            ],
            [(BoxId(0), BoxId(1)), (BoxId(1), BoxId(2))],
        )
        .unwrap()
    }

    #[test]
    fn straight_row() {
        let mesh = row();
        assert_eq!(
            astar_path(&mesh, BoxId(0), BoxId(2)),
            Ok(vec![BoxId(0), BoxId(1), BoxId(2)])
        );
        assert_eq!(
            astar_path(&mesh, BoxId(2), BoxId(0)),
            Ok(vec![BoxId(2), BoxId(1), BoxId(0)])
        );
    }

    #[test]
    fn same_box() {
        assert_eq!(astar_path(&row(), BoxId(1), BoxId(1)), Ok(vec![BoxId(1)]));
    }

    #[test]
    fn detached_box_has_no_path() {
        assert_eq!(
            astar_path(&row(), BoxId(0), BoxId(3)),
            Err(SearchError::NoPath)
        );
    }

    #[test]
    fn unknown_box() {
        assert_eq!(
            astar_path(&row(), BoxId(0), BoxId(9)),
            Err(SearchError::UnknownBox(BoxId(9)))
        );
    }

    #[test]
    fn prefers_cheaper_detour() {
        // Box 1 is very tall, so its midpoint sits far from the row and
        // the hop through box 2 is cheaper.
        let mesh = Mesh::from_pairs(
            vec![
                Rect::new(0.0, 1.0, 0.0, 1.0),
                Rect::new(1.0, 2.0, 0.0, 100.0),
                Rect::new(1.0, 2.0, 0.0, 1.0),
                Rect::new(2.0, 3.0, 0.0, 1.0),
            ],
            [
                (BoxId(0), BoxId(1)),
                (BoxId(1), BoxId(3)),
                (BoxId(0), BoxId(2)),
                (BoxId(2), BoxId(3)),
            ],
        )
        .unwrap();
        assert_eq!(
            astar_path(&mesh, BoxId(0), BoxId(3)),
            Ok(vec![BoxId(0), BoxId(2), BoxId(3)])
        );
    }
}
