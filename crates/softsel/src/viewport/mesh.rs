use glam::Vec3;
use shared::{DrawMode, MeshDescription, MeshError};

use crate::falloff::Rgba;

/// What the overlay vertices in an `OverlayPrimitives` form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Points,
    /// Two vertices per segment
    Lines,
    /// Three vertices per triangle
    Triangles,
}

impl PrimitiveKind {
    pub fn for_mode(mode: DrawMode) -> Self {
        match mode {
            DrawMode::Vertex => PrimitiveKind::Points,
            DrawMode::Edge => PrimitiveKind::Lines,
            DrawMode::Face => PrimitiveKind::Triangles,
        }
    }

    /// Vertices consumed by one primitive
    pub fn arity(&self) -> usize {
        match self {
            PrimitiveKind::Points => 1,
            PrimitiveKind::Lines => 2,
            PrimitiveKind::Triangles => 3,
        }
    }
}

/// Colored overlay geometry: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPrimitives {
    pub kind: PrimitiveKind,
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

const STRIDE: usize = 7;

impl OverlayPrimitives {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            vertices: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / STRIDE
    }

    /// Number of points, segments or triangles
    pub fn primitive_count(&self) -> usize {
        self.vertex_count() / self.kind.arity()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn position(&self, index: usize) -> Vec3 {
        let base = index * STRIDE;
        Vec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    pub fn color(&self, index: usize) -> Rgba {
        let base = index * STRIDE + 3;
        [
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
            self.vertices[base + 3],
        ]
    }

    pub fn push(&mut self, p: Vec3, c: Rgba) {
        self.vertices
            .extend_from_slice(&[p.x, p.y, p.z, c[0], c[1], c[2], c[3]]);
    }
}

/// Mesh being edited, with its selection and select mode.
///
/// `selection_version` is bumped on every selection change so caches can
/// detect staleness without diffing the selection.
#[derive(Debug, Clone, Default)]
pub struct EditMesh {
    positions: Vec<Vec3>,
    edges: Vec<[u32; 2]>,
    faces: Vec<Vec<u32>>,
    selected: Vec<bool>,
    selection_version: u64,
    /// Element type the user is editing (vertex, edge or face select mode)
    pub select_mode: DrawMode,
}

impl EditMesh {
    pub fn from_description(desc: &MeshDescription) -> Result<Self, MeshError> {
        desc.validate()?;

        let mut selected = vec![false; desc.vertices.len()];
        for &v in &desc.selected {
            selected[v as usize] = true;
        }

        Ok(Self {
            positions: desc.vertices.iter().map(|p| Vec3::from_array(*p)).collect(),
            edges: desc.resolved_edges(),
            faces: desc.faces.clone(),
            selected,
            selection_version: 0,
            select_mode: DrawMode::default(),
        })
    }

    /// No geometry, nothing selected
    pub fn empty(select_mode: DrawMode) -> Self {
        Self {
            select_mode,
            ..Self::default()
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }

    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    pub fn position(&self, index: u32) -> Vec3 {
        self.positions[index as usize]
    }

    pub fn selection_version(&self) -> u64 {
        self.selection_version
    }

    pub fn is_selected(&self, index: u32) -> bool {
        self.selected.get(index as usize).copied().unwrap_or(false)
    }

    pub fn selected_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.selected
            .iter()
            .enumerate()
            .filter(|(_, s)| **s)
            .map(|(i, _)| i as u32)
    }

    /// World-space positions of the selected vertices
    pub fn selected_positions(&self) -> Vec<Vec3> {
        self.selected_indices().map(|i| self.position(i)).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|s| **s).count()
    }

    /// Add a vertex to the selection; out-of-range indices are ignored
    pub fn select(&mut self, index: u32) {
        if let Some(s) = self.selected.get_mut(index as usize) {
            if !*s {
                *s = true;
                self.selection_version += 1;
            }
        }
    }

    pub fn deselect(&mut self, index: u32) {
        if let Some(s) = self.selected.get_mut(index as usize) {
            if *s {
                *s = false;
                self.selection_version += 1;
            }
        }
    }

    pub fn toggle(&mut self, index: u32) {
        if self.is_selected(index) {
            self.deselect(index);
        } else {
            self.select(index);
        }
    }

    pub fn clear_selection(&mut self) {
        if self.selected.iter().any(|s| *s) {
            self.selected.iter_mut().for_each(|s| *s = false);
            self.selection_version += 1;
        }
    }
}
