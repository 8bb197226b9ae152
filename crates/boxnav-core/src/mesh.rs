//! The navigation mesh: an arena of boxes addressed by [`BoxId`] with an
//! adjacency list per box.

use std::fmt;

use thiserror::Error;

use crate::geom::Rect;

/// Stable index of a box inside its [`Mesh`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct BoxId(pub u32);

impl BoxId {
    /// The id as an index into per-box tables.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for BoxId {
    #[inline]
    fn from(i: usize) -> Self {
        Self(i as u32)
    }
}

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural problems detected while building or validating a [`Mesh`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// The number of adjacency lists differs from the number of boxes.
    #[error("mesh has {boxes} boxes but {lists} adjacency lists")]
    AdjacencyLength { boxes: usize, lists: usize },
    /// An adjacency entry refers to a box that is not in the mesh.
    #[error("box {from} lists unknown neighbour {to}")]
    UnknownBox { from: BoxId, to: BoxId },
    /// `from` lists `to` as a neighbour but not the other way round.
    #[error("adjacency is not symmetric: {from} -> {to} has no reverse edge")]
    Asymmetric { from: BoxId, to: BoxId },
    /// A box has inverted or non-finite bounds.
    #[error("box {id} has invalid bounds {rect}")]
    InvalidBox { id: BoxId, rect: Rect },
}

/// A set of boxes plus the relation of which boxes border which.
///
/// The mesh is only read by queries, so one value can serve any number of
/// concurrent searches.
///
/// Boxes are expected not to overlap. When they do, point lookups resolve to
/// the lowest id; [`overlapping_pairs`](Self::overlapping_pairs) reports
/// such cases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    boxes: Vec<Rect>,
    adjacency: Vec<Vec<BoxId>>,
}

impl Mesh {
    /// Create a mesh from its boxes and one neighbour list per box.
    ///
    /// Box bounds and referential integrity are checked here; call
    /// [`validate`](Self::validate) for symmetry.
    pub fn new(boxes: Vec<Rect>, adjacency: Vec<Vec<BoxId>>) -> Result<Self, MeshError> {
        check_bounds(&boxes)?;
        if boxes.len() != adjacency.len() {
            return Err(MeshError::AdjacencyLength {
                boxes: boxes.len(),
                lists: adjacency.len(),
            });
        }
        for (i, list) in adjacency.iter().enumerate() {
            if let Some(&to) = list.iter().find(|n| n.index() >= boxes.len()) {
                return Err(MeshError::UnknownBox {
                    from: BoxId::from(i),
                    to,
                });
            }
        }
        Ok(Self { boxes, adjacency })
    }

    /// Create a mesh from undirected neighbour pairs.
    ///
    /// Each pair adds both directions. Duplicates and self-loops are dropped,
    /// so the result is always symmetric.
    pub fn from_pairs(
        boxes: Vec<Rect>,
        pairs: impl IntoIterator<Item = (BoxId, BoxId)>,
    ) -> Result<Self, MeshError> {
        check_bounds(&boxes)?;
        let mut adjacency = vec![Vec::new(); boxes.len()];
        for (a, b) in pairs {
            for (from, to) in [(a, b), (b, a)] {
                if from.index() >= boxes.len() || to.index() >= boxes.len() {
                    return Err(MeshError::UnknownBox { from, to });
                }
            }
            if a == b {
                continue;
            }
            if !adjacency[a.index()].contains(&b) {
                adjacency[a.index()].push(b);
            }
            if !adjacency[b.index()].contains(&a) {
                adjacency[b.index()].push(a);
            }
        }
        Ok(Self { boxes, adjacency })
    }

    /// Check adjacency symmetry.
    ///
    /// Bidirectional search relies on symmetry to join its two halves into a
    /// walkable path.
    pub fn validate(&self) -> Result<(), MeshError> {
        for (i, list) in self.adjacency.iter().enumerate() {
            let from = BoxId::from(i);
            for &to in list {
                if !self.adjacency[to.index()].contains(&from) {
                    return Err(MeshError::Asymmetric { from, to });
                }
            }
        }
        Ok(())
    }

    /// Every pair of boxes that share a region of positive area.
    pub fn overlapping_pairs(&self) -> Vec<(BoxId, BoxId)> {
        let mut out = Vec::new();
        for (i, a) in self.boxes.iter().enumerate() {
            for (j, b) in self.boxes.iter().enumerate().skip(i + 1) {
                if a.overlaps(*b) {
                    out.push((BoxId::from(i), BoxId::from(j)));
                }
            }
        }
        out
    }

    /// Number of boxes.
    #[inline]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether the mesh has no boxes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// The box with the given id, if it exists.
    #[inline]
    pub fn get(&self, id: BoxId) -> Option<Rect> {
        self.boxes.get(id.index()).copied()
    }

    /// The box with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this mesh.
    #[inline]
    pub fn rect(&self, id: BoxId) -> Rect {
        self.boxes[id.index()]
    }

    /// All boxes in id order.
    #[inline]
    pub fn boxes(&self) -> &[Rect] {
        &self.boxes
    }

    /// Boxes bordering `id`. Empty for unknown ids.
    #[inline]
    pub fn neighbors(&self, id: BoxId) -> &[BoxId] {
        self.adjacency
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `b` is listed as a neighbour of `a`.
    #[inline]
    pub fn is_adjacent(&self, a: BoxId, b: BoxId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Iterate over `(id, box)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (BoxId, Rect)> + '_ {
        self.boxes
            .iter()
            .enumerate()
            .map(|(i, r)| (BoxId::from(i), *r))
    }
}

/// Edge costs are midpoint distances, so a box with infinite or NaN bounds
/// would feed NaN into the search.
fn check_bounds(boxes: &[Rect]) -> Result<(), MeshError> {
    match boxes.iter().position(|r| !r.is_valid()) {
        Some(i) => Err(MeshError::InvalidBox {
            id: BoxId::from(i),
            rect: boxes[i],
        }),
        None => Ok(()),
    }
}
