pub mod controller;
pub mod motion;
pub mod ticker;

// Re-export commonly used types for convenience
pub use controller::RocketController;
pub use motion::{LinearMotion, MotionPlan, MotionState, Step};
#[cfg(feature = "tokio-runtime")]
pub use ticker::TokioTicks;
pub use ticker::{ManualTicks, TickSource, WallClockTicks};
