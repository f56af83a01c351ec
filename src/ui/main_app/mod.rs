pub mod overlay;
pub mod world_view;

pub use overlay::show_overlay;
pub use world_view::show_world_view;
