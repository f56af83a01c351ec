pub mod app;
pub mod components;
pub mod main_app;

pub use app::WalkbotApp;

/// Window title and heading.
pub const TITLE: &str = "Walking Robot";
pub const SUBTITLE: &str = "Click on the ground to make the robot walk there!";
pub const HINT: &str =
    "Click ground to walk • Move mouse to control gaze • Drag to rotate view";
