// Walkbot: a walking robot that goes where you click

pub mod config;
pub mod rendering;
pub mod ui;
pub mod utils;
pub mod world;

// Re-export commonly used types for convenience
pub use config::{load_or_default, WalkbotSettings};
pub use world::{input_channel, FigureState, LocomotionController, Simulation};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
