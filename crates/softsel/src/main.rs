mod app;
mod viewport;

// Re-export library modules so that `crate::state` and friends resolve to
// the lib crate types everywhere in the binary.
pub use softsel_lib::fixtures;
pub use softsel_lib::state;

use app::SoftselApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "softsel=info,softsel_lib=info".into()),
        )
        .init();

    // Parse --mesh <path> argument
    let initial_mesh = parse_mesh_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("softsel: proportional editing preview")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "softsel",
        native_options,
        Box::new(move |cc| Ok(Box::new(SoftselApp::new(cc, initial_mesh)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_mesh_arg() -> Option<shared::MeshDescription> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--mesh" && i + 1 < args.len() {
            let path = &args[i + 1];
            match std::fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<shared::MeshDescription>(&json) {
                    Ok(mesh) => {
                        tracing::info!(
                            "Loaded mesh from {path} ({} vertices, {} faces)",
                            mesh.vertices.len(),
                            mesh.faces.len()
                        );
                        return Some(mesh);
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse mesh JSON from {path}: {e}");
                    }
                },
                Err(e) => {
                    tracing::error!("Failed to read mesh file {path}: {e}");
                }
            }
            break;
        }
        i += 1;
    }
    None
}
