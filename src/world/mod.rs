pub mod avatar;
pub mod events;
pub mod rig;
pub mod simulation;
pub mod target;

// Re-export the types the app shell wires together
pub use avatar::{FigureState, FrameInput, JointAngles, LocomotionController};
pub use events::*;
pub use simulation::{FrameReport, Simulation};
pub use target::TargetSelection;
