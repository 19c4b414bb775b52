//! Fusion Game - the combination engine
//!
//! Provides the recipe registry, discovery tracking, the drag/hover/combine
//! state machine and the adapters hosts use to drive it.

pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod host;
pub mod input;
pub mod recipe;

pub use config::GameConfig;
pub use discovery::{DiscoveryProgress, DiscoveryTracker, TOTAL_DISCOVERIES};
pub use engine::{
    CombinationEngine, CombineOutcome, DragOutcome, InteractionState, RejectReason, ResetOutcome,
};
pub use error::ConfigError;
pub use host::{GameHost, HostEvent, NullHost, RecordingHost};
pub use input::{Command, CommandQueue, PointerEvent, Response};
pub use recipe::{Recipe, RecipeBook};
