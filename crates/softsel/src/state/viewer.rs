use shared::{DrawMode, MeshDescription, MeshError};

use crate::viewport::mesh::EditMesh;

use super::settings::ToolSettings;

/// Everything the viewer edits: the mesh and the persisted tool settings
pub struct ViewerState {
    pub mesh: EditMesh,
    pub settings: ToolSettings,
}

impl ViewerState {
    pub fn new(desc: &MeshDescription, settings: ToolSettings) -> Result<Self, MeshError> {
        let mut mesh = EditMesh::from_description(desc)?;
        mesh.select_mode = settings.overlay.draw_mode;
        Ok(Self { mesh, settings })
    }

    /// An empty mesh with the given settings
    pub fn empty(settings: ToolSettings) -> Self {
        let mesh = EditMesh::empty(settings.overlay.draw_mode);
        Self { mesh, settings }
    }

    /// Switch the sampling mode and remember it for the next session
    pub fn set_mode(&mut self, mode: DrawMode) {
        self.mesh.select_mode = mode;
        self.settings.overlay.draw_mode = mode;
    }
}
