//! Per-frame falloff overlay: cached colored primitives, plus the radius
//! ring and status label while a radius drag is in progress.

use glam::{Mat4, Vec2, Vec3};
use shared::{DrawMode, RingStyle};

use crate::gesture::{RadiusGesture, PUBLISH_SCALE};
use crate::host::{viewport_scale, Canvas, FalloffSetting, Viewport};
use crate::sampler::{compute_center_and_base_radius, sample};
use crate::state::settings::OverlaySettings;
use crate::viewport::mesh::{EditMesh, OverlayPrimitives};

/// Segments of the radius ring
pub const RING_SEGMENTS: usize = 64;

/// Offset of the status label from the projected center, pixels
const LABEL_OFFSET: Vec2 = Vec2::new(12.0, -24.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No selected vertices, so there is no falloff center
    EmptySelection,
    /// Draw callback fired for a tool that is no longer registered
    NotRegistered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Primitives drawn; `ring` tells whether the ring made it on screen
    Drawn { ring: bool },
    Skipped(SkipReason),
}

/// Everything the cached primitives depend on
#[derive(Debug, Clone, Copy, PartialEq)]
struct CacheKey {
    view: Mat4,
    selection_version: u64,
    center: Vec3,
    radius: f32,
    mode: DrawMode,
}

#[derive(Default)]
pub struct OverlayRenderer {
    cache: Option<(CacheKey, OverlayPrimitives)>,
    rebuild_count: u64,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the sampler ran
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    pub fn cached(&self) -> Option<&OverlayPrimitives> {
        self.cache.as_ref().map(|(_, prims)| prims)
    }

    /// Drop cached primitives; the next frame resamples
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    pub fn draw(
        &mut self,
        gesture: &RadiusGesture,
        mesh: &EditMesh,
        viewport: &impl Viewport,
        canvas: &mut impl Canvas,
        setting: &mut impl FalloffSetting,
        style: &OverlaySettings,
    ) -> FrameOutcome {
        let (center, live_base) = match gesture.anchor().filter(|_| gesture.is_adjusting()) {
            Some(anchor) => (anchor.center, anchor.base_radius),
            None => match compute_center_and_base_radius(&mesh.selected_positions()) {
                Some(found) => found,
                None => return FrameOutcome::Skipped(SkipReason::EmptySelection),
            },
        };
        let radius = gesture.effective_radius(live_base, setting.proportional_size());

        let key = CacheKey {
            view: viewport.view_matrix(),
            selection_version: mesh.selection_version(),
            center,
            radius,
            mode: mesh.select_mode,
        };
        self.refresh(key, mesh);
        if let Some((_, prims)) = &self.cache {
            canvas.draw_primitives(prims);
        }

        if !gesture.is_adjusting() {
            return FrameOutcome::Drawn { ring: false };
        }

        let ring = draw_ring(gesture, center, radius, viewport, canvas, style);
        if ring {
            setting.set_proportional_size(gesture.interaction_radius() / PUBLISH_SCALE);
        }
        FrameOutcome::Drawn { ring }
    }

    /// Resample unless the cache matches `key`. Face mode always resamples.
    fn refresh(&mut self, key: CacheKey, mesh: &EditMesh) {
        let fresh = match &self.cache {
            Some((cached, _)) => key.mode != DrawMode::Face && *cached == key,
            None => false,
        };
        if fresh {
            return;
        }

        let prims = sample(mesh, key.center, key.radius, key.mode);
        self.rebuild_count += 1;
        tracing::trace!(
            "Resampled {:?} overlay: {} primitives, radius {:.3}",
            key.mode,
            prims.primitive_count(),
            key.radius
        );
        self.cache = Some((key, prims));
    }
}

/// Draw ring and label. Returns false when the center does not project.
fn draw_ring(
    gesture: &RadiusGesture,
    center: Vec3,
    radius: f32,
    viewport: &impl Viewport,
    canvas: &mut impl Canvas,
    style: &OverlaySettings,
) -> bool {
    let Some(screen_center) = viewport.project(center) else {
        return false;
    };

    match style.ring_style {
        RingStyle::Screen => {
            let scale = viewport_scale(viewport);
            if scale <= 0.0 {
                return false;
            }
            let points = screen_ring(screen_center, gesture.interaction_radius() / scale);
            canvas.draw_polyline(&points, true, style.ring_color);
        }
        RingStyle::World => {
            let projected = world_ring(center, radius, viewport.view_matrix())
                .into_iter()
                .map(|p| viewport.project(p))
                .collect::<Vec<_>>();
            draw_projected_ring(&projected, canvas, style.ring_color);
        }
    }

    let label = format!(
        "{}: radius {:.3}, size {:.3}",
        gesture.state().label(),
        radius,
        gesture.interaction_radius() / PUBLISH_SCALE
    );
    canvas.draw_text(screen_center + LABEL_OFFSET, &label, style.text_color);
    true
}

/// `RING_SEGMENTS` points on a screen-space circle
pub fn screen_ring(center: Vec2, radius_px: f32) -> Vec<Vec2> {
    (0..RING_SEGMENTS)
        .map(|i| {
            let angle = i as f32 * std::f32::consts::TAU / RING_SEGMENTS as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radius_px
        })
        .collect()
}

/// `RING_SEGMENTS` points on a world-space circle facing the camera
pub fn world_ring(center: Vec3, radius: f32, view: Mat4) -> Vec<Vec3> {
    let camera = view.inverse();
    let right = camera.x_axis.truncate().normalize_or_zero();
    let up = camera.y_axis.truncate().normalize_or_zero();
    (0..RING_SEGMENTS)
        .map(|i| {
            let angle = i as f32 * std::f32::consts::TAU / RING_SEGMENTS as f32;
            center + (right * angle.cos() + up * angle.sin()) * radius
        })
        .collect()
}

/// Closed ring when every point projects, otherwise the visible runs
fn draw_projected_ring(points: &[Option<Vec2>], canvas: &mut impl Canvas, color: [f32; 4]) {
    if points.iter().all(Option::is_some) {
        let closed: Vec<Vec2> = points.iter().flatten().copied().collect();
        canvas.draw_polyline(&closed, true, color);
        return;
    }

    let mut run = Vec::new();
    for p in points {
        match p {
            Some(p) => run.push(*p),
            None => {
                if run.len() > 1 {
                    canvas.draw_polyline(&run, false, color);
                }
                run.clear();
            }
        }
    }
    if run.len() > 1 {
        canvas.draw_polyline(&run, false, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_ring_radius() {
        let pts = screen_ring(Vec2::new(10.0, 20.0), 5.0);
        assert_eq!(pts.len(), RING_SEGMENTS);
        for p in pts {
            assert!((p.distance(Vec2::new(10.0, 20.0)) - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_world_ring_faces_camera() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let pts = world_ring(Vec3::ZERO, 2.0, view);
        assert_eq!(pts.len(), RING_SEGMENTS);
        for p in pts {
            assert!(p.z.abs() < 1e-5);
            assert!((p.length() - 2.0).abs() < 1e-4);
        }
    }

    #[derive(Default)]
    struct Lines(Vec<(usize, bool)>);

    impl Canvas for Lines {
        fn draw_primitives(&mut self, _primitives: &OverlayPrimitives) {}
        fn draw_polyline(&mut self, points: &[Vec2], closed: bool, _color: [f32; 4]) {
            self.0.push((points.len(), closed));
        }
        fn draw_text(&mut self, _pos: Vec2, _text: &str, _color: [f32; 4]) {}
    }

    #[test]
    fn test_projected_ring_splits_runs() {
        let mut points: Vec<Option<Vec2>> = (0..8).map(|i| Some(Vec2::splat(i as f32))).collect();
        points[3] = None;
        let mut canvas = Lines::default();
        draw_projected_ring(&points, &mut canvas, [1.0; 4]);
        assert_eq!(canvas.0, vec![(3, false), (4, false)]);
    }

    #[test]
    fn test_projected_ring_closed_when_complete() {
        let points: Vec<Option<Vec2>> = (0..8).map(|i| Some(Vec2::splat(i as f32))).collect();
        let mut canvas = Lines::default();
        draw_projected_ring(&points, &mut canvas, [1.0; 4]);
        assert_eq!(canvas.0, vec![(8, true)]);
    }
}
