//! Bidirectional best-first search over the box graph.
//!
//! Two A*-style expansions share one frontier: the forward half grows from
//! the source box and is guided toward the destination, the backward half
//! grows from the destination and is guided toward the source. Every
//! frontier entry carries its [`Direction`], and each half keeps its own
//! cost/predecessor table. Once the halves meet at a box, the two
//! predecessor chains are stitched together there.

use boxnav_core::BoxId;

use crate::config::MeetRule;
use crate::search::{Direction, Frontier, SearchError, SearchTable};
use crate::traits::AstarGraph;

/// Compute a box path from `source` to `destination` by searching from
/// both ends at once.
///
/// With [`MeetRule::FirstMeeting`] the search stops at the first popped box
/// that the opposite half has already reached. With [`MeetRule::Optimal`]
/// it keeps going until no frontier entry can undercut the cheapest
/// connection found.
///
/// The returned path starts at `source`, ends at `destination`, and every
/// consecutive pair is adjacent in `graph`.
pub fn bidirectional_path<G: AstarGraph>(
    graph: &G,
    source: BoxId,
    destination: BoxId,
    rule: MeetRule,
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

    let mut forward = SearchTable::new(len, source);
    let mut backward = SearchTable::new(len, destination);

    let mut open = Frontier::new();
    open.push(0.0, source, Direction::Forward);
    open.push(0.0, destination, Direction::Backward);

    // Cheapest complete connection seen so far, and where the halves touch.
    let mut best: Option<(f64, BoxId)> = None;
    let mut nbuf = Vec::new();
    let mut expanded = 0usize;

    while let Some(current) = open.pop() {
        let ci = current.id;
        let dir = current.direction;
        let (table, other) = match dir {
            Direction::Forward => (&mut forward, &backward),
            Direction::Backward => (&mut backward, &forward),
        };

        log::trace!(
            "bidir: pop {ci} ({dir:?}) priority {:.3}",
            current.priority
        );

        match rule {
            MeetRule::FirstMeeting => {
                if other.reached(ci) {
                    log::debug!("bidir: halves met at {ci} after {expanded} expansions");
                    return join(graph, table, other, ci, source, destination);
                }
            }
            MeetRule::Optimal => {
                if let Some((mu, meeting)) = best {
                    if current.priority >= mu {
                        log::debug!(
                            "bidir: best connection {mu:.3} via {meeting} settled after {expanded} expansions"
                        );
                        return join(graph, &forward, &backward, meeting, source, destination);
                    }
                }
            }
        }

        // Skip stale entries.
        if !table.is_open(ci) {
            continue;
        }
        table.close(ci);
        expanded += 1;

        let Some(current_g) = table.cost(ci) else {
            continue;
        };
        let goal = dir.goal(source, destination);

        nbuf.clear();
        graph.neighbors(ci, &mut nbuf);

        for &ni in nbuf.iter() {
            if ni.index() >= len {
                continue;
            }
            let tentative_g = current_g + graph.cost(ci, ni);
            if !table.relax(ni, tentative_g, ci) {
                continue;
            }
            open.push(tentative_g + graph.estimate(ni, goal), ni, dir);

            if let Some(other_g) = other.cost(ni) {
                let total = tentative_g + other_g;
                if best.is_none_or(|(mu, _)| total < mu) {
                    best = Some((total, ni));
                }
            }
        }
    }

    // The frontier can drain after a connection was recorded when the
    // optimal rule is still waiting for a pop above the bound.
    if let (MeetRule::Optimal, Some((_, meeting))) = (rule, best) {
        return join(graph, &forward, &backward, meeting, source, destination);
    }

    log::debug!("bidir: frontier exhausted after {expanded} expansions");
    Err(SearchError::NoPath)
}

/// Stitch the two half-paths together at `meeting`.
///
/// `near` is the table whose chain becomes the prefix (origin first, ending
/// at `meeting`) and `far` the one whose chain becomes the suffix. The
/// result is flipped if it runs destination → source, and rejected if its
/// endpoints or adjacency are wrong.
fn join<G: AstarGraph>(
    graph: &G,
    near: &SearchTable,
    far: &SearchTable,
    meeting: BoxId,
    source: BoxId,
    destination: BoxId,
) -> Result<Vec<BoxId>, SearchError> {
    let inconsistent = SearchError::InconsistentJoin { meeting };

    let mut path = near.chain(meeting).ok_or(inconsistent)?;
    path.reverse();
    let suffix = far.chain(meeting).ok_or(inconsistent)?;
    path.extend_from_slice(&suffix[1..]);

    match (path.first(), path.last()) {
        (Some(&a), Some(&b)) if a == source && b == destination => {}
        (Some(&a), Some(&b)) if a == destination && b == source => path.reverse(),
        _ => {
            log::error!(
                "bidir: joined path at {meeting} does not connect {source} and {destination}"
            );
            return Err(inconsistent);
        }
    }

    if let Some(w) = path.windows(2).find(|w| !graph.is_adjacent(w[0], w[1])) {
        log::error!(
            "bidir: joined path at {meeting} steps from {} to non-neighbor {}",
            w[0],
            w[1]
        );
        return Err(inconsistent);
    }

    Ok(path)
}
