//! Modal soft-selection tool: one invocation owns the gesture, the overlay
//! cache and the draw-callback registration.

use crate::gesture::{GestureOutcome, GestureState, RadiusGesture};
use crate::host::{Canvas, DrawRegistration, FalloffSetting, RenderSurface, Viewport};
use crate::input::InputEvent;
use crate::overlay::{FrameOutcome, OverlayRenderer, SkipReason};
use crate::state::settings::{OverlaySettings, ToolSettings};
use crate::viewport::mesh::EditMesh;

/// Result of one modal event, mirroring what the host's event loop expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalResult {
    /// Event consumed, keep the tool running
    Running,
    /// Event not used; host handles it, tool keeps running
    PassThrough,
    /// Tool completed normally
    Finished,
    /// Tool cancelled
    Cancelled,
}

pub struct SoftSelectTool<S: RenderSurface> {
    gesture: RadiusGesture,
    renderer: OverlayRenderer,
    registration: DrawRegistration<S>,
    overlay: OverlaySettings,
}

impl<S: RenderSurface> SoftSelectTool<S> {
    /// Register the overlay on `surface` and enter MAIN
    pub fn start(surface: S, settings: &ToolSettings) -> Self {
        let mut registration = DrawRegistration::register(surface);
        registration.request_redraw();
        tracing::info!("Soft selection tool started");
        Self {
            gesture: RadiusGesture::new(settings.bindings.clone(), settings.double_press_window),
            renderer: OverlayRenderer::new(),
            registration,
            overlay: settings.overlay.clone(),
        }
    }

    /// False once the tool finished or was cancelled
    pub fn is_active(&self) -> bool {
        self.registration.is_registered()
    }

    pub fn state(&self) -> GestureState {
        self.gesture.state()
    }

    pub fn interaction_radius(&self) -> f32 {
        self.gesture.interaction_radius()
    }

    pub fn gesture(&self) -> &RadiusGesture {
        &self.gesture
    }

    pub fn renderer(&self) -> &OverlayRenderer {
        &self.renderer
    }

    pub fn overlay_settings_mut(&mut self) -> &mut OverlaySettings {
        &mut self.overlay
    }

    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        mesh: &EditMesh,
        viewport: &impl Viewport,
        setting: &mut impl FalloffSetting,
    ) -> ModalResult {
        if !self.is_active() {
            return ModalResult::PassThrough;
        }

        match self.gesture.handle(event, mesh, viewport) {
            GestureOutcome::Ignored => ModalResult::PassThrough,
            GestureOutcome::Consumed => ModalResult::Running,
            GestureOutcome::Started | GestureOutcome::Updated => {
                self.registration.request_redraw();
                ModalResult::Running
            }
            GestureOutcome::Finished { published_size } => {
                setting.set_proportional_size(published_size);
                tracing::info!("Proportional size set to {published_size:.4}");
                self.registration.request_redraw();
                ModalResult::Running
            }
            GestureOutcome::ToolCancelled => {
                tracing::info!("Soft selection tool cancelled");
                self.teardown();
                ModalResult::Cancelled
            }
            GestureOutcome::ToolFinished => {
                tracing::info!("Soft selection tool finished");
                self.teardown();
                ModalResult::Finished
            }
        }
    }

    /// Per-frame draw callback
    pub fn draw(
        &mut self,
        mesh: &EditMesh,
        viewport: &impl Viewport,
        canvas: &mut impl Canvas,
        setting: &mut impl FalloffSetting,
    ) -> FrameOutcome {
        if !self.is_active() {
            tracing::warn!("Overlay draw after teardown ignored");
            return FrameOutcome::Skipped(SkipReason::NotRegistered);
        }
        self.renderer
            .draw(&self.gesture, mesh, viewport, canvas, setting, &self.overlay)
    }

    /// Forced teardown by the host (e.g. the view closes)
    pub fn cancel(&mut self) {
        if self.is_active() {
            tracing::info!("Soft selection tool torn down by host");
            self.teardown();
        }
    }

    fn teardown(&mut self) {
        self.gesture.reset();
        self.renderer.invalidate();
        self.registration.release();
    }
}
