//! Radius-adjustment gesture: hold key + drag button grows or shrinks the
//! falloff radius by the pointer's screen distance from the selection center.

use glam::{Vec2, Vec3};

use crate::host::{viewport_scale, Viewport};
use crate::input::{DoublePress, InputBindings, InputEvent};
use crate::sampler::compute_center_and_base_radius;
use crate::viewport::mesh::EditMesh;

/// Smallest growth applied by one pointer update
pub const MIN_GROWTH_STEP: f32 = 0.1;
/// Fraction of the remaining gap closed by one growth update
pub const GROWTH_DAMPING: f32 = 0.1;
/// InteractionRadius / PUBLISH_SCALE is written to the falloff size setting
pub const PUBLISH_SCALE: f32 = 20.0;
/// Default double-press window of the hold key, seconds
pub const DOUBLE_PRESS_WINDOW: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Main,
    Adjusting,
}

impl GestureState {
    pub fn label(&self) -> &'static str {
        match self {
            GestureState::Main => "Main",
            GestureState::Adjusting => "Adjusting",
        }
    }
}

/// What an input event did to the gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Not ours; the host should handle it
    Ignored,
    /// Ours, but nothing visible changed
    Consumed,
    /// Entered ADJUSTING
    Started,
    /// Radius changed while ADJUSTING
    Updated,
    /// Drag released; the radius should be published
    Finished { published_size: f32 },
    /// Cancel key or hold-key double press: end the whole tool
    ToolCancelled,
    /// Confirm key: complete the tool
    ToolFinished,
}

/// Selection snapshot captured when a drag starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub center: Vec3,
    pub base_radius: f32,
    /// Projected center the drag distance is measured from
    pub screen: Vec2,
}

/// Next InteractionRadius for a pointer update.
///
/// Shrinking snaps straight to the candidate. Growing moves by a tenth of
/// the gap, but never less than `MIN_GROWTH_STEP`.
pub fn smooth_radius(current: f32, candidate: f32) -> f32 {
    if candidate < current {
        candidate
    } else if candidate > current {
        current + (GROWTH_DAMPING * (candidate - current)).max(MIN_GROWTH_STEP)
    } else {
        current
    }
}

pub struct RadiusGesture {
    bindings: InputBindings,
    double_press_window: f64,
    state: GestureState,
    interaction_radius: f32,
    anchor: Option<Anchor>,
    hold_down: bool,
    double_press: DoublePress,
}

impl RadiusGesture {
    pub fn new(bindings: InputBindings, double_press_window: f64) -> Self {
        Self {
            bindings,
            double_press_window,
            state: GestureState::Main,
            interaction_radius: 0.0,
            anchor: None,
            hold_down: false,
            double_press: DoublePress::default(),
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_adjusting(&self) -> bool {
        self.state == GestureState::Adjusting
    }

    pub fn interaction_radius(&self) -> f32 {
        self.interaction_radius
    }

    /// Captured selection while ADJUSTING
    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    /// Captured BaseRadius + InteractionRadius while ADJUSTING, otherwise
    /// the live base radius plus the host's static falloff size.
    pub fn effective_radius(&self, live_base: f32, static_size: f32) -> f32 {
        match (&self.state, &self.anchor) {
            (GestureState::Adjusting, Some(anchor)) => anchor.base_radius + self.interaction_radius,
            _ => live_base + static_size,
        }
    }

    /// Back to MAIN with nothing captured
    pub fn reset(&mut self) {
        self.state = GestureState::Main;
        self.interaction_radius = 0.0;
        self.anchor = None;
        self.hold_down = false;
        self.double_press.reset();
    }

    pub fn handle(
        &mut self,
        event: &InputEvent,
        mesh: &EditMesh,
        viewport: &impl Viewport,
    ) -> GestureOutcome {
        match *event {
            InputEvent::KeyPress { key, .. } if key == self.bindings.cancel_key => {
                tracing::debug!("Cancel key in {:?}", self.state);
                self.reset();
                GestureOutcome::ToolCancelled
            }
            InputEvent::KeyPress { key, time } if key == self.bindings.hold_key => {
                self.on_hold_press(time)
            }
            InputEvent::KeyRelease { key, time } if key == self.bindings.hold_key => {
                self.hold_down = false;
                self.double_press.release(time);
                GestureOutcome::Consumed
            }
            InputEvent::KeyPress { key, .. } if key == self.bindings.confirm_key => {
                match self.state {
                    GestureState::Main => GestureOutcome::ToolFinished,
                    GestureState::Adjusting => GestureOutcome::Consumed,
                }
            }
            InputEvent::ButtonPress { button, .. } if button == self.bindings.drag_button => {
                if self.hold_down && self.state == GestureState::Main {
                    self.begin(mesh, viewport)
                } else {
                    GestureOutcome::Ignored
                }
            }
            InputEvent::PointerMove { pos } if self.state == GestureState::Adjusting => {
                self.update(pos, viewport)
            }
            InputEvent::ButtonRelease { button, .. }
                if button == self.bindings.drag_button && self.state == GestureState::Adjusting =>
            {
                self.finish()
            }
            _ => GestureOutcome::Ignored,
        }
    }

    fn on_hold_press(&mut self, time: f64) -> GestureOutcome {
        // key repeat
        if self.hold_down {
            return GestureOutcome::Consumed;
        }
        self.hold_down = true;

        if self.state == GestureState::Main
            && self.double_press.press(time, self.double_press_window)
        {
            tracing::debug!("Hold key double press at {time:.3}s");
            self.reset();
            return GestureOutcome::ToolCancelled;
        }
        GestureOutcome::Consumed
    }

    fn begin(&mut self, mesh: &EditMesh, viewport: &impl Viewport) -> GestureOutcome {
        let Some((center, base_radius)) =
            compute_center_and_base_radius(&mesh.selected_positions())
        else {
            tracing::debug!("Radius drag ignored: empty selection");
            return GestureOutcome::Consumed;
        };
        let Some(screen) = viewport.project(center) else {
            tracing::debug!("Radius drag ignored: center behind camera");
            return GestureOutcome::Consumed;
        };

        self.anchor = Some(Anchor {
            center,
            base_radius,
            screen,
        });
        self.interaction_radius = 0.0;
        self.state = GestureState::Adjusting;
        self.double_press.reset();
        tracing::debug!("Radius drag started: center {center}, base radius {base_radius:.3}");
        GestureOutcome::Started
    }

    fn update(&mut self, pos: Vec2, viewport: &impl Viewport) -> GestureOutcome {
        let Some(anchor) = self.anchor else {
            return GestureOutcome::Ignored;
        };
        let candidate = (pos - anchor.screen).length() * viewport_scale(viewport);
        self.interaction_radius = smooth_radius(self.interaction_radius, candidate);
        GestureOutcome::Updated
    }

    fn finish(&mut self) -> GestureOutcome {
        let published_size = self.interaction_radius / PUBLISH_SCALE;
        tracing::debug!(
            "Radius drag finished: interaction radius {:.3}, publishing {:.4}",
            self.interaction_radius,
            published_size
        );
        self.interaction_radius = 0.0;
        self.anchor = None;
        self.state = GestureState::Main;
        GestureOutcome::Finished { published_size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, PointerButton};
    use glam::Mat4;
    use shared::MeshDescription;

    /// Top-down view: 100 pixels per world unit, nothing behind the camera
    struct TopDown;

    impl Viewport for TopDown {
        fn project(&self, point: Vec3) -> Option<Vec2> {
            Some(point.truncate() * 100.0)
        }
        fn view_matrix(&self) -> Mat4 {
            Mat4::IDENTITY
        }
        fn world_per_pixel(&self) -> f32 {
            0.01
        }
    }

    struct Behind;

    impl Viewport for Behind {
        fn project(&self, _point: Vec3) -> Option<Vec2> {
            None
        }
        fn view_matrix(&self) -> Mat4 {
            Mat4::IDENTITY
        }
        fn world_per_pixel(&self) -> f32 {
            0.01
        }
    }

    fn mesh(selected: Vec<u32>) -> EditMesh {
        EditMesh::from_description(&MeshDescription {
            vertices: vec![[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 3.0, 0.0]],
            selected,
            ..Default::default()
        })
        .unwrap()
    }

    fn gesture() -> RadiusGesture {
        RadiusGesture::new(InputBindings::default(), DOUBLE_PRESS_WINDOW)
    }

    fn key_press(key: Key, time: f64) -> InputEvent {
        InputEvent::KeyPress { key, time }
    }

    fn key_release(key: Key, time: f64) -> InputEvent {
        InputEvent::KeyRelease { key, time }
    }

    fn mmb_press(time: f64) -> InputEvent {
        InputEvent::ButtonPress {
            button: PointerButton::Middle,
            pos: Vec2::ZERO,
            time,
        }
    }

    fn mmb_release(time: f64) -> InputEvent {
        InputEvent::ButtonRelease {
            button: PointerButton::Middle,
            pos: Vec2::ZERO,
            time,
        }
    }

    const B: Key = Key::Char('B');

    #[test]
    fn test_shrink_snaps() {
        assert_eq!(smooth_radius(5.0, 2.0), 2.0);
    }

    #[test]
    fn test_first_growth_step_is_floor() {
        assert_eq!(smooth_radius(0.0, 1.0), 0.1);
    }

    #[test]
    fn test_large_growth_damped() {
        assert!((smooth_radius(0.0, 10.0) - 1.0).abs() < 1e-6);
        assert!((smooth_radius(2.0, 12.0) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_equal_unchanged() {
        assert_eq!(smooth_radius(1.5, 1.5), 1.5);
    }

    #[test]
    fn test_growth_settles_on_candidate() {
        // growth may overshoot by less than one floor step, then snaps back
        let mut r = 0.0;
        for _ in 0..200 {
            let next = smooth_radius(r, 3.0);
            assert!(next < 3.0 + MIN_GROWTH_STEP);
            r = next;
        }
        assert_eq!(r, 3.0);
    }

    #[test]
    fn test_start_requires_hold_key() {
        let m = mesh(vec![0, 1]);
        let mut g = gesture();
        assert_eq!(g.handle(&mmb_press(0.0), &m, &TopDown), GestureOutcome::Ignored);
        assert_eq!(g.state(), GestureState::Main);
    }

    #[test]
    fn test_start_captures_anchor() {
        let m = mesh(vec![0, 1]);
        let mut g = gesture();
        g.handle(&key_press(B, 0.0), &m, &TopDown);
        assert_eq!(g.handle(&mmb_press(0.1), &m, &TopDown), GestureOutcome::Started);
        assert!(g.is_adjusting());
        let anchor = g.anchor().unwrap();
        assert_eq!(anchor.center, Vec3::ZERO);
        assert_eq!(anchor.base_radius, 1.0);
        assert_eq!(anchor.screen, Vec2::ZERO);
        assert_eq!(g.interaction_radius(), 0.0);
        assert_eq!(g.effective_radius(4.0, 7.0), 1.0);
    }

    #[test]
    fn test_empty_selection_stays_main() {
        let m = mesh(Vec::new());
        let mut g = gesture();
        g.handle(&key_press(B, 0.0), &m, &TopDown);
        assert_eq!(g.handle(&mmb_press(0.1), &m, &TopDown), GestureOutcome::Consumed);
        assert_eq!(g.state(), GestureState::Main);
        assert!(g.anchor().is_none());
    }

    #[test]
    fn test_center_behind_camera_stays_main() {
        let m = mesh(vec![0]);
        let mut g = gesture();
        g.handle(&key_press(B, 0.0), &m, &Behind);
        g.handle(&mmb_press(0.1), &m, &Behind);
        assert_eq!(g.state(), GestureState::Main);
    }

    #[test]
    fn test_drag_updates_radius() {
        let m = mesh(vec![0, 1]);
        let mut g = gesture();
        g.handle(&key_press(B, 0.0), &m, &TopDown);
        g.handle(&mmb_press(0.1), &m, &TopDown);

        // 300 px at 0.01 world/px = candidate 3.0; first step damped to 0.3
        let out = g.handle(&InputEvent::PointerMove { pos: Vec2::new(300.0, 0.0) }, &m, &TopDown);
        assert_eq!(out, GestureOutcome::Updated);
        assert!((g.interaction_radius() - 0.3).abs() < 1e-6);

        // 50 px: candidate 0.5 is still above 0.3, so it grows by the floor
        g.handle(&InputEvent::PointerMove { pos: Vec2::new(50.0, 0.0) }, &m, &TopDown);
        assert!((g.interaction_radius() - 0.4).abs() < 1e-6);

        // 10 px: candidate 0.1 < 0.4 snaps immediately
        g.handle(&InputEvent::PointerMove { pos: Vec2::new(0.0, 10.0) }, &m, &TopDown);
        assert!((g.interaction_radius() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_release_publishes_and_resets() {
        let m = mesh(vec![0, 1]);
        let mut g = gesture();
        g.handle(&key_press(B, 0.0), &m, &TopDown);
        g.handle(&mmb_press(0.1), &m, &TopDown);
        g.handle(&InputEvent::PointerMove { pos: Vec2::new(1000.0, 0.0) }, &m, &TopDown);
        let radius = g.interaction_radius();
        assert!(radius > 0.0);

        match g.handle(&mmb_release(0.5), &m, &TopDown) {
            GestureOutcome::Finished { published_size } => {
                assert!((published_size - radius / 20.0).abs() < 1e-7);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(g.state(), GestureState::Main);
        assert_eq!(g.interaction_radius(), 0.0);
        assert!(g.anchor().is_none());
    }

    #[test]
    fn test_pointer_move_in_main_ignored() {
        let m = mesh(vec![0]);
        let mut g = gesture();
        let out = g.handle(&InputEvent::PointerMove { pos: Vec2::ONE }, &m, &TopDown);
        assert_eq!(out, GestureOutcome::Ignored);
    }

    #[test]
    fn test_cancel_key_while_adjusting() {
        let m = mesh(vec![0, 1]);
        let mut g = gesture();
        g.handle(&key_press(B, 0.0), &m, &TopDown);
        g.handle(&mmb_press(0.1), &m, &TopDown);
        g.handle(&InputEvent::PointerMove { pos: Vec2::new(500.0, 0.0) }, &m, &TopDown);
        let out = g.handle(&key_press(Key::Escape, 0.2), &m, &TopDown);
        assert_eq!(out, GestureOutcome::ToolCancelled);
        assert_eq!(g.state(), GestureState::Main);
        assert_eq!(g.interaction_radius(), 0.0);
    }

    #[test]
    fn test_cancel_key_in_main() {
        let m = mesh(vec![0]);
        let mut g = gesture();
        let out = g.handle(&key_press(Key::Escape, 0.0), &m, &TopDown);
        assert_eq!(out, GestureOutcome::ToolCancelled);
    }

    #[test]
    fn test_double_press_cancels_tool() {
        let m = mesh(vec![0]);
        let mut g = gesture();
        assert_eq!(g.handle(&key_press(B, 0.0), &m, &TopDown), GestureOutcome::Consumed);
        g.handle(&key_release(B, 0.1), &m, &TopDown);
        assert_eq!(g.handle(&key_press(B, 0.5), &m, &TopDown), GestureOutcome::ToolCancelled);
    }

    #[test]
    fn test_slow_second_press_is_ordinary() {
        let m = mesh(vec![0]);
        let mut g = gesture();
        g.handle(&key_press(B, 0.0), &m, &TopDown);
        g.handle(&key_release(B, 0.1), &m, &TopDown);
        assert_eq!(g.handle(&key_press(B, 1.2), &m, &TopDown), GestureOutcome::Consumed);
        assert_eq!(g.state(), GestureState::Main);
    }

    #[test]
    fn test_key_repeat_not_double_press() {
        let m = mesh(vec![0]);
        let mut g = gesture();
        g.handle(&key_press(B, 0.0), &m, &TopDown);
        assert_eq!(g.handle(&key_press(B, 0.03), &m, &TopDown), GestureOutcome::Consumed);
        assert_eq!(g.handle(&key_press(B, 0.06), &m, &TopDown), GestureOutcome::Consumed);
    }

    #[test]
    fn test_quick_press_after_drag_cancels() {
        let m = mesh(vec![0, 1]);
        let mut g = gesture();
        g.handle(&key_press(B, 0.0), &m, &TopDown);
        g.handle(&mmb_press(0.05), &m, &TopDown);
        g.handle(&mmb_release(0.1), &m, &TopDown);
        g.handle(&key_release(B, 0.2), &m, &TopDown);
        assert_eq!(g.handle(&key_press(B, 0.5), &m, &TopDown), GestureOutcome::ToolCancelled);
    }

    #[test]
    fn test_hold_release_during_drag_arms_double_press() {
        let m = mesh(vec![0, 1]);
        let mut g = gesture();
        g.handle(&key_press(B, 0.0), &m, &TopDown);
        g.handle(&mmb_press(0.1), &m, &TopDown);
        g.handle(&key_release(B, 0.2), &m, &TopDown);
        g.handle(&mmb_release(0.3), &m, &TopDown);
        assert_eq!(g.handle(&key_press(B, 0.6), &m, &TopDown), GestureOutcome::ToolCancelled);
    }

    #[test]
    fn test_slow_press_after_drag_starts_again() {
        let m = mesh(vec![0, 1]);
        let mut g = gesture();
        g.handle(&key_press(B, 0.0), &m, &TopDown);
        g.handle(&mmb_press(0.1), &m, &TopDown);
        g.handle(&mmb_release(0.2), &m, &TopDown);
        g.handle(&key_release(B, 0.3), &m, &TopDown);
        assert_eq!(g.handle(&key_press(B, 1.5), &m, &TopDown), GestureOutcome::Consumed);
        assert_eq!(g.handle(&mmb_press(1.6), &m, &TopDown), GestureOutcome::Started);
    }

    #[test]
    fn test_confirm_finishes_tool_only_in_main() {
        let m = mesh(vec![0, 1]);
        let mut g = gesture();
        g.handle(&key_press(B, 0.0), &m, &TopDown);
        g.handle(&mmb_press(0.1), &m, &TopDown);
        assert_eq!(g.handle(&key_press(Key::Enter, 0.2), &m, &TopDown), GestureOutcome::Consumed);
        g.handle(&mmb_release(0.3), &m, &TopDown);
        assert_eq!(
            g.handle(&key_press(Key::Enter, 0.4), &m, &TopDown),
            GestureOutcome::ToolFinished
        );
    }

    #[test]
    fn test_effective_radius_in_main_adds_static_size_to_live_base() {
        let g = gesture();
        assert_eq!(g.effective_radius(1.0, 2.5), 3.5);
        assert_eq!(g.effective_radius(0.0, 0.1), 0.1);
    }
}
