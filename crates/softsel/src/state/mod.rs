pub mod settings;
pub mod viewer;

pub use settings::{OverlaySettings, ToolSettings};
pub use viewer::ViewerState;
