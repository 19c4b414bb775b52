//! Fusion ECS - item arena
//!
//! Live items are stored in slots addressed by generational handles, so a
//! handle kept after its item was destroyed is detected instead of silently
//! resolving to whatever item reused the slot.

mod handle;
mod storage;
mod world;

pub use handle::{HandleAllocator, ItemHandle};
pub use world::{Item, ItemWorld};
