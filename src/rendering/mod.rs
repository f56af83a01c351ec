pub mod camera;
pub mod light;
pub mod materials;
pub mod mesh;
pub mod renderer;
pub mod scene;
pub mod stage;

// Re-export the stage as the main interface
pub use stage::Stage;
pub use renderer::{RenderStats, SceneRenderer};
