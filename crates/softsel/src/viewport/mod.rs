//! 3D viewport panel: camera, selection picking and the soft-selection tool

mod camera;
mod painter;
pub use softsel_lib::viewport::surface;

use egui::Ui;
use glam::Vec2;

use softsel_lib::host::Canvas;
use softsel_lib::input::{InputEvent, Key, PointerButton};
use softsel_lib::overlay::FrameOutcome;
use softsel_lib::sampler::{self, FaceDisplay};
use softsel_lib::tool::{ModalResult, SoftSelectTool};
use softsel_lib::viewport::mesh::{EditMesh, OverlayPrimitives};

use crate::state::ViewerState;
use camera::{ArcBallCamera, CameraView};
use painter::PainterCanvas;
use surface::SharedSurface;

/// Click radius for vertex picking, pixels
const PICK_RADIUS: f32 = 10.0;

/// 3D viewport panel
pub struct ViewportPanel {
    camera: ArcBallCamera,
    surface: SharedSurface,
    tool: Option<SoftSelectTool<SharedSurface>>,
    last_frame: Option<FrameOutcome>,
    /// Valence points and inset faces, built when the display is turned on
    mesh_display: Option<(OverlayPrimitives, FaceDisplay)>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: ArcBallCamera::new(),
            surface: SharedSurface::new(),
            tool: None,
            last_frame: None,
            mesh_display: None,
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = ArcBallCamera::new();
    }

    /// Start the soft-selection tool unless one is already running
    pub fn start_tool(&mut self, state: &ViewerState) {
        if self.tool.as_ref().is_some_and(|t| t.is_active()) {
            return;
        }
        self.tool = Some(SoftSelectTool::start(self.surface.clone(), &state.settings));
    }

    pub fn tool(&self) -> Option<&SoftSelectTool<SharedSurface>> {
        self.tool.as_ref().filter(|t| t.is_active())
    }

    pub fn tool_mut(&mut self) -> Option<&mut SoftSelectTool<SharedSurface>> {
        self.tool.as_mut().filter(|t| t.is_active())
    }

    /// Switch between the plain wireframe and the topology display.
    /// Returns whether the display is now on.
    pub fn toggle_mesh_display(&mut self, mesh: &EditMesh) -> bool {
        self.mesh_display = match self.mesh_display.take() {
            Some(_) => None,
            None => Some((sampler::valence_points(mesh), sampler::face_display(mesh))),
        };
        self.mesh_display.is_some()
    }

    pub fn last_frame(&self) -> Option<FrameOutcome> {
        self.last_frame
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut ViewerState) {
        let (rect, response) = ui.allocate_exact_size(
            ui.available_size(),
            egui::Sense::click_and_drag(),
        );

        // ── Tool input ─────────────────────────────
        let tool_owns_pointer = self.dispatch_tool_events(ui, rect, state);

        // ── Camera controls ─────────────────────────────
        if !tool_owns_pointer {
            if response.dragged_by(egui::PointerButton::Middle) {
                let delta = response.drag_delta();
                self.camera.rotate(delta.x * 0.5, delta.y * 0.5);
            }
            if response.dragged_by(egui::PointerButton::Secondary) {
                let delta = response.drag_delta();
                self.camera.pan(-delta.x * 0.01, delta.y * 0.01);
            }
        }
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll.abs() > 0.1 {
            self.camera.zoom(scroll * 0.01);
        }

        // ── Vertex selection via click ──────────────────────────
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let toggle = ui.input(|i| i.modifiers.shift);
                self.pick_vertex(pos, rect, toggle, state);
            }
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        // ── Drawing ─────────────────────────────────────
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(30, 30, 35));
        match &self.mesh_display {
            Some((points, faces)) => {
                let mut canvas = PainterCanvas {
                    painter: &painter,
                    camera: &self.camera,
                    rect,
                };
                canvas.draw_primitives(&faces.fill);
                canvas.draw_primitives(&faces.wire);
                canvas.draw_primitives(points);
            }
            None => painter::draw_edges(&painter, rect, &self.camera, &state.mesh),
        }
        painter::draw_selection(&painter, rect, &self.camera, &state.mesh);

        self.last_frame = None;
        if let Some(tool) = self.tool.as_mut() {
            if self.surface.active_handlers() > 0 {
                let view = CameraView {
                    camera: &self.camera,
                    rect,
                };
                let mut canvas = PainterCanvas {
                    painter: &painter,
                    camera: &self.camera,
                    rect,
                };
                self.last_frame =
                    Some(tool.draw(&state.mesh, &view, &mut canvas, &mut state.settings));
            }
        }

        if self.surface.take_redraw() {
            ui.ctx().request_repaint();
        }
    }

    /// Feed this frame's input to the tool. Returns true while the tool owns
    /// the pointer (a radius drag is in progress).
    fn dispatch_tool_events(&mut self, ui: &Ui, rect: egui::Rect, state: &mut ViewerState) -> bool {
        let Some(tool) = self.tool.as_mut() else {
            return false;
        };

        let (events, time) = ui.input(|i| (i.events.clone(), i.time));
        let view = CameraView {
            camera: &self.camera,
            rect,
        };

        let mut ended = false;
        for event in events.iter().filter_map(|e| translate_event(e, time)) {
            match tool.handle_event(&event, &state.mesh, &view, &mut state.settings) {
                ModalResult::Running | ModalResult::PassThrough => {}
                ModalResult::Finished | ModalResult::Cancelled => {
                    ended = true;
                    break;
                }
            }
        }

        if ended {
            self.tool = None;
            state.settings.save();
            ui.ctx().request_repaint();
            return false;
        }
        tool.gesture().is_adjusting()
    }

    fn pick_vertex(&self, pos: egui::Pos2, rect: egui::Rect, toggle: bool, state: &mut ViewerState) {
        let mut best: Option<(u32, f32)> = None;
        for (i, p) in state.mesh.positions().iter().enumerate() {
            if let Some(screen) = self.camera.project(*p, rect) {
                let d = screen.distance(pos);
                if d <= PICK_RADIUS && best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((i as u32, d));
                }
            }
        }

        match (best, toggle) {
            (Some((i, _)), true) => state.mesh.toggle(i),
            (Some((i, _)), false) => {
                state.mesh.clear_selection();
                state.mesh.select(i);
            }
            (None, false) => state.mesh.clear_selection(),
            (None, true) => {}
        }
    }
}

/// egui event → tool input event. Keys without a tool meaning are dropped.
fn translate_event(event: &egui::Event, time: f64) -> Option<InputEvent> {
    match event {
        egui::Event::Key {
            key,
            pressed,
            repeat: false,
            ..
        } => {
            let key = translate_key(*key)?;
            Some(if *pressed {
                InputEvent::KeyPress { key, time }
            } else {
                InputEvent::KeyRelease { key, time }
            })
        }
        egui::Event::PointerButton {
            pos,
            button,
            pressed,
            ..
        } => {
            let button = match button {
                egui::PointerButton::Primary => PointerButton::Left,
                egui::PointerButton::Middle => PointerButton::Middle,
                egui::PointerButton::Secondary => PointerButton::Right,
                _ => return None,
            };
            let pos = Vec2::new(pos.x, pos.y);
            Some(if *pressed {
                InputEvent::ButtonPress { button, pos, time }
            } else {
                InputEvent::ButtonRelease { button, pos, time }
            })
        }
        egui::Event::PointerMoved(pos) => Some(InputEvent::PointerMove {
            pos: Vec2::new(pos.x, pos.y),
        }),
        _ => None,
    }
}

fn translate_key(key: egui::Key) -> Option<Key> {
    match key {
        egui::Key::Escape => Some(Key::Escape),
        egui::Key::Enter => Some(Key::Enter),
        egui::Key::Space => Some(Key::Space),
        other => {
            let mut chars = other.name().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => Some(Key::Char(c.to_ascii_uppercase())),
                _ => None,
            }
        }
    }
}
