//! Keyboard shortcut handling

use eframe::egui;
use shared::{DrawMode, RingStyle};

use crate::state::ViewerState;
use crate::viewport::ViewportPanel;

const MODE_KEYS: [egui::Key; 3] = [egui::Key::Num1, egui::Key::Num2, egui::Key::Num3];

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(
    ctx: &egui::Context,
    state: &mut ViewerState,
    viewport: &mut ViewportPanel,
) {
    // A radius drag owns the keyboard until it ends
    if viewport
        .tool()
        .is_some_and(|tool| tool.gesture().is_adjusting())
    {
        return;
    }

    let mut restart = false;
    let mut toggle_ring = false;
    let mut toggle_display = false;
    ctx.input(|i| {
        if i.modifiers.command {
            return;
        }
        // 1/2/3 — vertex, edge, face draw mode
        for (key, mode) in MODE_KEYS.into_iter().zip(DrawMode::all()) {
            if i.key_pressed(key) {
                state.set_mode(*mode);
            }
        }
        // T — start the tool again after it finished
        if i.key_pressed(egui::Key::T) {
            restart = true;
        }
        // R — switch between screen and world ring
        if i.key_pressed(egui::Key::R) {
            toggle_ring = true;
        }
        // V — valence and face topology display
        if i.key_pressed(egui::Key::V) {
            toggle_display = true;
        }
        // Home — reset the camera
        if i.key_pressed(egui::Key::Home) {
            viewport.reset_camera();
        }
    });

    if restart {
        viewport.start_tool(state);
    }
    if toggle_display {
        let on = viewport.toggle_mesh_display(&state.mesh);
        tracing::info!("Mesh display: {}", if on { "on" } else { "off" });
    }
    if toggle_ring {
        let overlay = &mut state.settings.overlay;
        overlay.ring_style = next_ring_style(overlay.ring_style);
        tracing::info!("Ring style: {:?}", overlay.ring_style);
        if let Some(tool) = viewport.tool_mut() {
            tool.overlay_settings_mut().ring_style = overlay.ring_style;
        }
    }
}

fn next_ring_style(style: RingStyle) -> RingStyle {
    match style {
        RingStyle::Screen => RingStyle::World,
        RingStyle::World => RingStyle::Screen,
    }
}
