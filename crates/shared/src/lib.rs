use serde::{Deserialize, Serialize};

pub mod mesh;

pub use mesh::{MeshDescription, MeshError, VertexIndex};

/// Which mesh elements the falloff overlay visualizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    #[default]
    Vertex,
    Edge,
    Face,
}

impl DrawMode {
    pub fn label(&self) -> &'static str {
        match self {
            DrawMode::Vertex => "Vertex",
            DrawMode::Edge => "Edge",
            DrawMode::Face => "Face",
        }
    }

    pub fn all() -> &'static [DrawMode] {
        &[DrawMode::Vertex, DrawMode::Edge, DrawMode::Face]
    }
}

/// How the radius ring is drawn while adjusting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingStyle {
    /// Fixed circle in screen space around the projected center
    #[default]
    Screen,
    /// World-space circle in the view plane, projected point by point
    World,
}
