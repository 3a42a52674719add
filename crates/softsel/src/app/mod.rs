//! Main application module

mod keyboard;

use eframe::egui;

use crate::fixtures;
use crate::state::{ToolSettings, ViewerState};
use crate::viewport::ViewportPanel;
use softsel_lib::overlay::{FrameOutcome, SkipReason};

/// Main application
pub struct SoftselApp {
    state: ViewerState,
    viewport: ViewportPanel,
}

impl SoftselApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        initial_mesh: Option<shared::MeshDescription>,
    ) -> Self {
        let settings = ToolSettings::load();

        // CLI mesh takes priority over the demo grid
        let desc = initial_mesh.unwrap_or_else(fixtures::demo_mesh);
        let state = match ViewerState::new(&desc, settings.clone()) {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("Invalid mesh: {e}");
                ViewerState::empty(settings)
            }
        };

        let mut viewport = ViewportPanel::new();
        viewport.start_tool(&state);

        Self { state, viewport }
    }
}

impl eframe::App for SoftselApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        keyboard::handle_keyboard(ctx, &mut self.state, &mut self.viewport);

        // ── Status bar ────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                self.status_bar(ui);
            });
        });

        // ── 3D Viewport ───────────────────────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.settings.save();
    }
}

impl SoftselApp {
    fn status_bar(&self, ui: &mut egui::Ui) {
        match self.viewport.tool() {
            Some(tool) => {
                ui.label(format!("Tool: {}", tool.state().label()));
                ui.separator();
                ui.label(format!("Radius: {:.3}", tool.interaction_radius()));
            }
            None => {
                ui.label("Tool: off");
            }
        }
        ui.separator();
        ui.label(format!("Mode: {}", self.state.mesh.select_mode.label()));
        ui.separator();
        ui.label(format!("Size: {:.3}", self.state.settings.proportional_size));
        ui.separator();
        ui.label(format!("Selected: {}", self.state.mesh.selected_count()));

        if let Some(FrameOutcome::Skipped(SkipReason::EmptySelection)) = self.viewport.last_frame() {
            ui.separator();
            ui.colored_label(egui::Color32::YELLOW, "Nothing selected");
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let hint = if self.viewport.tool().is_some() {
                "Hold B + middle drag: radius | Enter: confirm | Esc or BB: cancel"
            } else {
                "T: start tool"
            };
            ui.weak(format!("{hint} | 1/2/3: mode | R: ring | V: topology | Home: camera"));
        });
    }
}
