//! Serialisable level description and its conversion to a [`Mesh`].
//!
//! A level lists its boxes by value and, for each box, the boxes it
//! borders:
//!
//! ```json
//! {
//!   "boxes": [[0, 10, 0, 10], [10, 20, 0, 10]],
//!   "adj": [
//!     [[0, 10, 0, 10], [[10, 20, 0, 10]]],
//!     [[10, 20, 0, 10], [[0, 10, 0, 10]]]
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::geom::Rect;
use crate::mesh::{BoxId, Mesh, MeshError};

/// A mesh as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Level {
    /// Every box of the mesh, in id order.
    pub boxes: Vec<Rect>,
    /// Each box paired with its neighbours. Boxes without an entry have none.
    #[serde(default)]
    pub adj: Vec<(Rect, Vec<Rect>)>,
}

/// Errors raised while reading a level or turning it into a mesh.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed level JSON")]
    Json(#[from] serde_json::Error),
    #[error("box {0} appears more than once")]
    DuplicateBox(Rect),
    #[error("adjacency refers to box {0} which is not in the box list")]
    UnknownBox(Rect),
    #[error("invalid mesh")]
    Mesh(#[from] MeshError),
}

/// Hashable identity of a box's bounds.
fn key(r: Rect) -> [u64; 4] {
    [
        r.x_min.to_bits(),
        r.x_max.to_bits(),
        r.y_min.to_bits(),
        r.y_max.to_bits(),
    ]
}

impl Level {
    /// Parse a level from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a level file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json_str(&text)?;
        log::debug!(
            "loaded level {} ({} boxes, {} adjacency entries)",
            path.display(),
            level.boxes.len(),
            level.adj.len()
        );
        Ok(level)
    }

    /// Serialise to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve boxes to ids and build a validated mesh.
    pub fn into_mesh(self) -> Result<Mesh, LevelError> {
        let mut ids: HashMap<[u64; 4], BoxId> = HashMap::with_capacity(self.boxes.len());
        for (i, r) in self.boxes.iter().enumerate() {
            if ids.insert(key(*r), BoxId::from(i)).is_some() {
                return Err(LevelError::DuplicateBox(*r));
            }
        }
        let lookup = |r: Rect| ids.get(&key(r)).copied().ok_or(LevelError::UnknownBox(r));

        let mut adjacency = vec![Vec::new(); self.boxes.len()];
        for (rect, neighbors) in &self.adj {
            let from = lookup(*rect)?;
            let list: &mut Vec<BoxId> = &mut adjacency[from.index()];
            for n in neighbors {
                let to = lookup(*n)?;
                if !list.contains(&to) {
                    list.push(to);
                }
            }
        }

        let mesh = Mesh::new(self.boxes, adjacency)?;
        mesh.validate()?;
        let overlaps = mesh.overlapping_pairs();
        if !overlaps.is_empty() {
            log::warn!(
                "level has {} overlapping box pairs; lookups resolve to the lowest id",
                overlaps.len()
            );
        }
        Ok(mesh)
    }

    /// Describe an existing mesh as a level.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let adj = mesh
            .iter()
            .filter(|(id, _)| !mesh.neighbors(*id).is_empty())
            .map(|(id, r)| {
                let ns = mesh.neighbors(id).iter().map(|&n| mesh.rect(n)).collect();
                (r, ns)
            })
            .collect();
        Self {
            boxes: mesh.boxes().to_vec(),
            adj,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ROOMS: &str = r#"{
        "boxes": [[0, 10, 0, 10], [10, 20, 0, 10], [30, 40, 0, 10]],
        "adj": [
            [[0, 10, 0, 10], [[10, 20, 0, 10]]],
            [[10, 20, 0, 10], [[0, 10, 0, 10]]]
        ]
    }"#;

    #[test]
    fn parse_into_mesh() {
        let mesh = Level::from_json_str(TWO_ROOMS).unwrap().into_mesh().unwrap();
        assert_eq!(mesh.len(), 3);
        assert_eq!(mesh.neighbors(BoxId(0)), &[BoxId(1)]);
        assert_eq!(mesh.neighbors(BoxId(1)), &[BoxId(0)]);
        assert!(mesh.neighbors(BoxId(2)).is_empty());
    }

    #[test]
    fn mesh_round_trip() {
        let mesh = Level::from_json_str(TWO_ROOMS).unwrap().into_mesh().unwrap();
        let json = Level::from_mesh(&mesh).to_json_string().unwrap();
        let back = Level::from_json_str(&json).unwrap().into_mesh().unwrap();
        assert_eq!(back, mesh);
    }

    #[test]
    fn unknown_neighbour_is_rejected() {
        let json = r#"{ "boxes": [[0, 1, 0, 1]], "adj": [[[0, 1, 0, 1], [[1, 2, 0, 1]]]] }"#;
        let err = Level::from_json_str(json).unwrap().into_mesh().unwrap_err();
        assert!(matches!(err, LevelError::UnknownBox(r) if r == Rect::new(1.0, 2.0, 0.0, 1.0)));
    }

    #[test]
    fn duplicate_box_is_rejected() {
        let json = r#"{ "boxes": [[0, 1, 0, 1], [0, 1, 0, 1]] }"#;
        let err = Level::from_json_str(json).unwrap().into_mesh().unwrap_err();
        assert!(matches!(err, LevelError::DuplicateBox(_)));
    }

    #[test]
    fn one_way_adjacency_is_rejected() {
        let json = r#"{
            "boxes": [[0, 1, 0, 1], [1, 2, 0, 1]],
            "adj": [[[0, 1, 0, 1], [[1, 2, 0, 1]]]]
        }"#;
        let err = Level::from_json_str(json).unwrap().into_mesh().unwrap_err();
        assert!(matches!(
            err,
            LevelError::Mesh(MeshError::Asymmetric { .. })
        ));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            Level::from_json_str("{ boxes: }"),
            Err(LevelError::Json(_))
        ));
    }

    #[test]
    fn missing_file() {
        let err = Level::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }
}
