//! Interfaces the host editor provides to the tool.
//!
//! The tool never reaches into host state directly: viewport queries,
//! drawing, draw-callback registration and the persistent falloff size all
//! go through these traits, so the headless harness can stand in for a
//! real editor.

use glam::{Mat4, Vec2, Vec3};

use crate::falloff::Rgba;
use crate::viewport::mesh::OverlayPrimitives;

/// Camera queries for the active 3D view
pub trait Viewport {
    /// Screen position of a world point; `None` behind the camera
    fn project(&self, point: Vec3) -> Option<Vec2>;

    /// World → camera transform, used to detect camera movement
    fn view_matrix(&self) -> Mat4;

    /// World units covered by one screen pixel at the view target
    fn world_per_pixel(&self) -> f32;

    /// Grid scale of the view (1.0 unless the host scales its grid)
    fn grid_scale(&self) -> f32 {
        1.0
    }
}

/// Screen distance → world radius factor used by both the gesture and
/// the ring, so the ring tracks the pointer.
pub fn viewport_scale(viewport: &impl Viewport) -> f32 {
    viewport.world_per_pixel() * viewport.grid_scale()
}

/// Per-frame drawing target
pub trait Canvas {
    /// World-space colored points, lines or triangles
    fn draw_primitives(&mut self, primitives: &OverlayPrimitives);

    /// Screen-space polyline
    fn draw_polyline(&mut self, points: &[Vec2], closed: bool, color: Rgba);

    /// Screen-space label anchored at its top-left corner
    fn draw_text(&mut self, pos: Vec2, text: &str, color: Rgba);
}

/// Identifier of a registered per-frame draw callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawHandle(pub u64);

/// Draw-callback registration on the host's render surface
pub trait RenderSurface {
    fn subscribe(&mut self) -> DrawHandle;
    fn unsubscribe(&mut self, handle: DrawHandle);
    fn request_redraw(&mut self);
}

/// The host's persistent proportional falloff size
pub trait FalloffSetting {
    fn proportional_size(&self) -> f32;
    fn set_proportional_size(&mut self, size: f32);
}

/// A draw-callback subscription released exactly once: explicitly through
/// `release`, or when dropped.
pub struct DrawRegistration<S: RenderSurface> {
    surface: S,
    handle: Option<DrawHandle>,
}

impl<S: RenderSurface> DrawRegistration<S> {
    pub fn register(mut surface: S) -> Self {
        let handle = surface.subscribe();
        tracing::debug!("Registered overlay draw handler {:?}", handle);
        Self {
            surface,
            handle: Some(handle),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<DrawHandle> {
        self.handle
    }

    pub fn request_redraw(&mut self) {
        if self.handle.is_some() {
            self.surface.request_redraw();
        }
    }

    /// Unsubscribe and request one last redraw so stale overlay disappears
    pub fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.surface.unsubscribe(handle);
            self.surface.request_redraw();
            tracing::debug!("Released overlay draw handler {:?}", handle);
        }
    }
}

impl<S: RenderSurface> Drop for DrawRegistration<S> {
    fn drop(&mut self) {
        self.release();
    }
}
