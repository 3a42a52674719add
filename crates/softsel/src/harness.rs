//! Headless test harness: an in-memory host for the soft-selection tool.
//!
//! Stands in for the editor: an orthographic top-down viewport, a canvas
//! that records draw calls, a shared render surface and the settings that
//! hold the persistent falloff size.

use glam::{Mat4, Vec2, Vec3};
use shared::{DrawMode, MeshDescription, MeshError};

use crate::falloff::Rgba;
use crate::host::{Canvas, Viewport};
use crate::input::{InputEvent, Key, PointerButton};
use crate::overlay::{FrameOutcome, SkipReason};
use crate::state::settings::ToolSettings;
use crate::tool::{ModalResult, SoftSelectTool};
use crate::viewport::mesh::{EditMesh, OverlayPrimitives};
use crate::viewport::surface::SharedSurface;

/// Top-down orthographic view looking down -Z. Screen Y grows downward.
#[derive(Debug, Clone)]
pub struct OrthoViewport {
    pub pixels_per_unit: f32,
    /// Screen position of the world origin
    pub origin: Vec2,
    pub view: Mat4,
    pub grid_scale: f32,
    /// Simulate a camera that sees nothing (every projection fails)
    pub behind_camera: bool,
}

impl Default for OrthoViewport {
    fn default() -> Self {
        Self {
            pixels_per_unit: 100.0,
            origin: Vec2::new(400.0, 300.0),
            view: Mat4::IDENTITY,
            grid_scale: 1.0,
            behind_camera: false,
        }
    }
}

impl OrthoViewport {
    /// Pan the camera; changes the view matrix like a real camera move
    pub fn pan(&mut self, delta: Vec3) {
        self.view = Mat4::from_translation(-delta) * self.view;
        self.origin -= Vec2::new(delta.x, -delta.y) * self.pixels_per_unit;
    }
}

impl Viewport for OrthoViewport {
    fn project(&self, point: Vec3) -> Option<Vec2> {
        if self.behind_camera {
            return None;
        }
        Some(self.origin + Vec2::new(point.x, -point.y) * self.pixels_per_unit)
    }

    fn view_matrix(&self) -> Mat4 {
        self.view
    }

    fn world_per_pixel(&self) -> f32 {
        1.0 / self.pixels_per_unit
    }

    fn grid_scale(&self) -> f32 {
        self.grid_scale
    }
}

/// Canvas that keeps every call of the current frame
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub primitives: Vec<OverlayPrimitives>,
    pub polylines: Vec<(Vec<Vec2>, bool)>,
    pub labels: Vec<String>,
}

impl RecordingCanvas {
    pub fn clear(&mut self) {
        self.primitives.clear();
        self.polylines.clear();
        self.labels.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn draw_primitives(&mut self, primitives: &OverlayPrimitives) {
        self.primitives.push(primitives.clone());
    }

    fn draw_polyline(&mut self, points: &[Vec2], closed: bool, _color: Rgba) {
        self.polylines.push((points.to_vec(), closed));
    }

    fn draw_text(&mut self, _pos: Vec2, text: &str, _color: Rgba) {
        self.labels.push(text.to_string());
    }
}

/// Headless host — owns the mesh, viewport, canvas, surface and settings
pub struct TestHarness {
    pub mesh: EditMesh,
    pub viewport: OrthoViewport,
    pub canvas: RecordingCanvas,
    pub settings: ToolSettings,
    pub surface: SharedSurface,
    tool: Option<SoftSelectTool<SharedSurface>>,
}

impl TestHarness {
    /// Create a harness around a mesh, with default settings and no tool
    pub fn new(desc: &MeshDescription) -> Result<Self, MeshError> {
        Ok(Self {
            mesh: EditMesh::from_description(desc)?,
            viewport: OrthoViewport::default(),
            canvas: RecordingCanvas::default(),
            settings: ToolSettings::default(),
            surface: SharedSurface::new(),
            tool: None,
        })
    }

    /// Load a mesh from JSON (replaces the current one)
    pub fn load_mesh_json(&mut self, json: &str) -> Result<(), String> {
        let desc: MeshDescription =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.mesh = EditMesh::from_description(&desc).map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn set_mode(&mut self, mode: DrawMode) {
        self.mesh.select_mode = mode;
    }

    // ── Tool lifecycle ────────────────────────────────────────

    /// Start a new tool invocation, replacing (and releasing) any previous one
    pub fn start_tool(&mut self) {
        self.tool = Some(SoftSelectTool::start(self.surface.clone(), &self.settings));
    }

    pub fn tool(&self) -> Option<&SoftSelectTool<SharedSurface>> {
        self.tool.as_ref()
    }

    pub fn tool_mut(&mut self) -> Option<&mut SoftSelectTool<SharedSurface>> {
        self.tool.as_mut()
    }

    /// Drop the tool without any exit event
    pub fn drop_tool(&mut self) {
        self.tool = None;
    }

    pub fn proportional_size(&self) -> f32 {
        self.settings.proportional_size
    }

    // ── Input ─────────────────────────────────────────────────

    pub fn send(&mut self, event: InputEvent) -> ModalResult {
        match self.tool.as_mut() {
            Some(tool) => tool.handle_event(&event, &self.mesh, &self.viewport, &mut self.settings),
            None => ModalResult::PassThrough,
        }
    }

    pub fn press_key(&mut self, key: Key, time: f64) -> ModalResult {
        self.send(InputEvent::KeyPress { key, time })
    }

    pub fn release_key(&mut self, key: Key, time: f64) -> ModalResult {
        self.send(InputEvent::KeyRelease { key, time })
    }

    pub fn press_button(&mut self, button: PointerButton, pos: Vec2, time: f64) -> ModalResult {
        self.send(InputEvent::ButtonPress { button, pos, time })
    }

    pub fn release_button(&mut self, button: PointerButton, pos: Vec2, time: f64) -> ModalResult {
        self.send(InputEvent::ButtonRelease { button, pos, time })
    }

    pub fn move_pointer(&mut self, pos: Vec2) -> ModalResult {
        self.send(InputEvent::PointerMove { pos })
    }

    /// Hold the hold key and press the drag button at `time`
    pub fn begin_drag(&mut self, time: f64) -> ModalResult {
        let hold = self.settings.bindings.hold_key;
        let drag = self.settings.bindings.drag_button;
        self.press_key(hold, time);
        self.press_button(drag, Vec2::ZERO, time)
    }

    /// Release the drag button, then the hold key
    pub fn end_drag(&mut self, time: f64) -> ModalResult {
        let hold = self.settings.bindings.hold_key;
        let drag = self.settings.bindings.drag_button;
        let result = self.release_button(drag, Vec2::ZERO, time);
        self.release_key(hold, time);
        result
    }

    /// Screen position of a world point in the harness viewport
    pub fn screen_of(&self, point: Vec3) -> Vec2 {
        self.viewport.project(point).unwrap_or(Vec2::ZERO)
    }

    // ── Frames ────────────────────────────────────────────────

    /// Run one draw callback into a cleared canvas
    pub fn draw(&mut self) -> FrameOutcome {
        self.canvas.clear();
        match self.tool.as_mut() {
            Some(tool) => tool.draw(&self.mesh, &self.viewport, &mut self.canvas, &mut self.settings),
            None => FrameOutcome::Skipped(SkipReason::NotRegistered),
        }
    }

    /// Primitives drawn by the last frame
    pub fn drawn(&self) -> Option<&OverlayPrimitives> {
        self.canvas.primitives.last()
    }

    pub fn rebuild_count(&self) -> u64 {
        self.tool.as_ref().map(|t| t.renderer().rebuild_count()).unwrap_or(0)
    }
}
