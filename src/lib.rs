//! Sky Shooter — a small real-time arcade shooter.
//!
//! The simulation (`entities`, `spawner`, `compute`, `input`) is pure and
//! host-agnostic; `driver` runs it one frame at a time against host
//! capabilities, and `display` supplies a crossterm host for the binary.

pub mod compute;
pub mod config;
pub mod display;
pub mod driver;
pub mod entities;
pub mod error;
pub mod input;
pub mod spawner;

pub use config::GameConfig;
pub use driver::{CancelHandle, Canvas, FrameScheduler, GameLoop, LoopState, ScoreSink};
pub use entities::Session;
pub use error::GameError;
