use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Index into `MeshDescription::vertices`
pub type VertexIndex = u32;

/// Errors found while checking a mesh description
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// An edge references a vertex that does not exist
    EdgeOutOfRange { edge: usize, vertex: VertexIndex },
    /// A face references a vertex that does not exist
    FaceOutOfRange { face: usize, vertex: VertexIndex },
    /// A face has fewer than three corners
    DegenerateFace { face: usize, corners: usize },
    /// A selected index does not exist
    SelectionOutOfRange(VertexIndex),
}

impl std::fmt::Display for MeshError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeshError::EdgeOutOfRange { edge, vertex } => {
                write!(f, "Edge {} references missing vertex {}", edge, vertex)
            }
            MeshError::FaceOutOfRange { face, vertex } => {
                write!(f, "Face {} references missing vertex {}", face, vertex)
            }
            MeshError::DegenerateFace { face, corners } => {
                write!(f, "Face {} has only {} corners", face, corners)
            }
            MeshError::SelectionOutOfRange(vertex) => {
                write!(f, "Selected vertex {} does not exist", vertex)
            }
        }
    }
}

impl std::error::Error for MeshError {}

/// Editable mesh as stored on disk: world-space positions, adjacency and
/// the selected vertex set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshDescription {
    pub vertices: Vec<[f32; 3]>,
    /// Explicit edge list; derived from the face loops when empty
    #[serde(default)]
    pub edges: Vec<[VertexIndex; 2]>,
    /// Face loops, counter-clockwise
    #[serde(default)]
    pub faces: Vec<Vec<VertexIndex>>,
    #[serde(default)]
    pub selected: Vec<VertexIndex>,
}

impl MeshDescription {
    /// Check that every index is in range and every face is a polygon
    pub fn validate(&self) -> Result<(), MeshError> {
        let count = self.vertices.len() as VertexIndex;

        for (edge, pair) in self.edges.iter().enumerate() {
            if let Some(&vertex) = pair.iter().find(|&&v| v >= count) {
                return Err(MeshError::EdgeOutOfRange { edge, vertex });
            }
        }

        for (face, corners) in self.faces.iter().enumerate() {
            if corners.len() < 3 {
                return Err(MeshError::DegenerateFace {
                    face,
                    corners: corners.len(),
                });
            }
            if let Some(&vertex) = corners.iter().find(|&&v| v >= count) {
                return Err(MeshError::FaceOutOfRange { face, vertex });
            }
        }

        if let Some(&vertex) = self.selected.iter().find(|&&v| v >= count) {
            return Err(MeshError::SelectionOutOfRange(vertex));
        }

        Ok(())
    }

    /// Explicit edges, or the unique boundary edges of every face loop
    pub fn resolved_edges(&self) -> Vec<[VertexIndex; 2]> {
        if !self.edges.is_empty() {
            return self.edges.clone();
        }

        let mut unique = BTreeSet::new();
        for corners in &self.faces {
            for (i, &a) in corners.iter().enumerate() {
                let b = corners[(i + 1) % corners.len()];
                unique.insert([a.min(b), a.max(b)]);
            }
        }
        unique.into_iter().collect()
    }
}
