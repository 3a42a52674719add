// Library crate: the soft-selection core plus the headless harness used by
// integration tests. The egui viewer (app, camera, painter canvas) stays in
// the binary crate.

pub mod falloff;
pub mod fixtures;
pub mod gesture;
pub mod harness;
pub mod host;
pub mod input;
pub mod overlay;
pub mod sampler;
pub mod state;
pub mod tool;

/// Mesh and render-surface types shared by the core and the viewer.
/// The camera and egui drawing stay in the binary crate.
pub mod viewport {
    pub mod mesh;
    pub mod surface;
}
