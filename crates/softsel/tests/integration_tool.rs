//! Integration tests for the tool lifecycle: draw-handler registration,
//! exit paths and draws after teardown.

use softsel_lib::fixtures::*;
use softsel_lib::gesture::GestureState;
use softsel_lib::harness::TestHarness;
use softsel_lib::input::Key;
use softsel_lib::overlay::{FrameOutcome, SkipReason};
use softsel_lib::tool::ModalResult;

fn running_harness() -> TestHarness {
    let mut h = TestHarness::new(&unit_square_points()).unwrap();
    h.start_tool();
    h
}

#[test]
fn test_start_registers_one_handler() {
    let h = running_harness();
    assert_eq!(h.surface.active_handlers(), 1);
    assert_eq!(h.surface.subscribe_count(), 1);
    assert!(h.surface.take_redraw());

    let tool = h.tool().unwrap();
    assert!(tool.is_active());
    assert_eq!(tool.state(), GestureState::Main);
    assert_eq!(tool.interaction_radius(), 0.0);
}

#[test]
fn test_cancel_key_unsubscribes() {
    let mut h = running_harness();
    assert_eq!(h.press_key(Key::Escape, 0.0), ModalResult::Cancelled);
    assert_eq!(h.surface.active_handlers(), 0);
    assert_eq!(h.surface.unsubscribe_count(), 1);
    assert!(!h.tool().unwrap().is_active());

    // Dropping the finished tool must not unsubscribe a second time
    h.drop_tool();
    assert_eq!(h.surface.unsubscribe_count(), 1);
}

#[test]
fn test_confirm_key_finishes() {
    let mut h = running_harness();
    assert_eq!(h.press_key(Key::Enter, 0.0), ModalResult::Finished);
    assert_eq!(h.surface.active_handlers(), 0);
    assert_eq!(h.surface.unsubscribe_count(), 1);
}

#[test]
fn test_confirm_while_adjusting_keeps_running() {
    let mut h = running_harness();
    assert_eq!(h.begin_drag(0.0), ModalResult::Running);
    assert_eq!(h.press_key(Key::Enter, 0.1), ModalResult::Running);
    assert_eq!(h.tool().unwrap().state(), GestureState::Adjusting);
    assert_eq!(h.surface.active_handlers(), 1);
}

#[test]
fn test_escape_while_adjusting_cancels_without_publishing() {
    let mut h = running_harness();
    h.begin_drag(0.0);
    let far = h.screen_of(glam::Vec3::ZERO) + glam::Vec2::new(200.0, 0.0);
    h.move_pointer(far);
    assert_eq!(h.press_key(Key::Escape, 0.2), ModalResult::Cancelled);
    assert_eq!(h.proportional_size(), 1.0);
    assert_eq!(h.surface.active_handlers(), 0);
}

#[test]
fn test_hold_key_double_press_cancels() {
    let mut h = running_harness();
    assert_eq!(h.press_key(Key::Char('B'), 0.0), ModalResult::Running);
    assert_eq!(h.release_key(Key::Char('B'), 0.1), ModalResult::Running);
    assert_eq!(h.press_key(Key::Char('B'), 0.5), ModalResult::Cancelled);
    assert_eq!(h.surface.active_handlers(), 0);
}

#[test]
fn test_slow_double_press_keeps_running() {
    let mut h = running_harness();
    h.press_key(Key::Char('B'), 0.0);
    h.release_key(Key::Char('B'), 0.1);
    assert_eq!(h.press_key(Key::Char('B'), 1.5), ModalResult::Running);
    assert!(h.tool().unwrap().is_active());
}

#[test]
fn test_hold_key_repeat_is_not_a_double_press() {
    let mut h = running_harness();
    h.press_key(Key::Char('B'), 0.0);
    assert_eq!(h.press_key(Key::Char('B'), 0.03), ModalResult::Running);
    assert_eq!(h.press_key(Key::Char('B'), 0.06), ModalResult::Running);
    assert!(h.tool().unwrap().is_active());
}

#[test]
fn test_quick_press_after_drag_cancels() {
    let mut h = running_harness();
    let drag = h.settings.bindings.drag_button;
    h.press_key(Key::Char('B'), 0.0);
    h.press_button(drag, glam::Vec2::ZERO, 0.05);
    h.release_button(drag, glam::Vec2::ZERO, 0.1);
    h.release_key(Key::Char('B'), 0.2);
    assert_eq!(h.press_key(Key::Char('B'), 0.5), ModalResult::Cancelled);
    assert_eq!(h.surface.active_handlers(), 0);
}

#[test]
fn test_slow_press_after_drag_keeps_running() {
    let mut h = running_harness();
    h.begin_drag(0.0);
    h.end_drag(0.3);
    assert_eq!(h.press_key(Key::Char('B'), 1.5), ModalResult::Running);
    assert!(h.tool().unwrap().is_active());
}

#[test]
fn test_other_keys_pass_through() {
    let mut h = running_harness();
    assert_eq!(h.press_key(Key::Char('G'), 0.0), ModalResult::PassThrough);
    assert_eq!(h.press_key(Key::Space, 0.0), ModalResult::PassThrough);
}

#[test]
fn test_drop_releases_handler() {
    let mut h = running_harness();
    h.drop_tool();
    assert_eq!(h.surface.active_handlers(), 0);
    assert_eq!(h.surface.unsubscribe_count(), 1);
}

#[test]
fn test_restart_replaces_previous_invocation() {
    let mut h = running_harness();
    h.start_tool();
    assert_eq!(h.surface.subscribe_count(), 2);
    assert_eq!(h.surface.unsubscribe_count(), 1);
    assert_eq!(h.surface.active_handlers(), 1);
}

#[test]
fn test_host_cancel_tears_down_once() {
    let mut h = running_harness();
    h.begin_drag(0.0);
    h.tool_mut().unwrap().cancel();
    h.tool_mut().unwrap().cancel();

    let tool = h.tool().unwrap();
    assert!(!tool.is_active());
    assert_eq!(tool.state(), GestureState::Main);
    assert!(tool.renderer().cached().is_none());
    assert_eq!(h.surface.unsubscribe_count(), 1);
    assert_eq!(h.press_key(Key::Escape, 1.0), ModalResult::PassThrough);
}

#[test]
fn test_draw_after_teardown_is_skipped() {
    let mut h = running_harness();
    h.settings.proportional_size = 2.0;
    assert!(matches!(h.draw(), FrameOutcome::Drawn { .. }));

    h.press_key(Key::Escape, 0.0);
    assert_eq!(h.draw(), FrameOutcome::Skipped(SkipReason::NotRegistered));
    assert!(h.canvas.primitives.is_empty());
}

#[test]
fn test_events_request_redraws() {
    let mut h = running_harness();
    h.surface.take_redraw();
    h.begin_drag(0.0);
    assert!(h.surface.take_redraw());

    let pos = h.screen_of(glam::Vec3::ZERO) + glam::Vec2::new(50.0, 0.0);
    h.move_pointer(pos);
    assert!(h.surface.take_redraw());

    h.end_drag(0.5);
    assert!(h.surface.take_redraw());
}
