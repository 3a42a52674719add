//! Tool settings, persisted as JSON in the platform config directory

use serde::{Deserialize, Serialize};
use shared::{DrawMode, RingStyle};

use crate::gesture::DOUBLE_PRESS_WINDOW;
use crate::host::FalloffSetting;
use crate::input::InputBindings;

/// Overlay display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySettings {
    /// Draw mode used until the mesh select mode changes it
    pub draw_mode: DrawMode,
    /// How the radius ring is drawn
    pub ring_style: RingStyle,
    /// Ring color RGBA
    pub ring_color: [f32; 4],
    /// Status label color RGBA
    pub text_color: [f32; 4],
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            draw_mode: DrawMode::Vertex,
            ring_style: RingStyle::Screen,
            ring_color: [1.0, 0.7, 0.2, 0.6],
            text_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

fn default_double_press_window() -> f64 {
    DOUBLE_PRESS_WINDOW
}

/// All soft-selection tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Proportional falloff size (the persistent setting the gesture publishes)
    pub proportional_size: f32,
    /// Hold-key double press window, seconds
    #[serde(default = "default_double_press_window")]
    pub double_press_window: f64,
    #[serde(default)]
    pub bindings: InputBindings,
    #[serde(default)]
    pub overlay: OverlaySettings,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            proportional_size: 1.0,
            double_press_window: DOUBLE_PRESS_WINDOW,
            bindings: InputBindings::default(),
            overlay: OverlaySettings::default(),
        }
    }
}

impl FalloffSetting for ToolSettings {
    fn proportional_size(&self) -> f32 {
        self.proportional_size
    }

    fn set_proportional_size(&mut self, size: f32) {
        self.proportional_size = size;
    }
}

impl ToolSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(dirs) = directories::ProjectDirs::from("com", "softsel", "softsel") {
            let config_path = dirs.config_dir().join("settings.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                match Self::from_json(&json) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring {}: {e}", config_path.display()),
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(dirs) = directories::ProjectDirs::from("com", "softsel", "softsel") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("settings.json");
                if let Ok(json) = serde_json::to_string_pretty(self) {
                    if let Err(e) = std::fs::write(&config_path, json) {
                        tracing::warn!("Failed to save {}: {e}", config_path.display());
                    }
                }
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Settings parse error: {e}"))
    }
}
