//! Fusion Core - Core types and utilities for the Fusion discovery game
//!
//! This crate provides the foundational types shared by the other crates:
//! - Mathematical primitives (re-exported from glam)
//! - Item kind identifiers
//! - The rectangular spawn area and midpoint helper

pub mod types;

pub use glam::Vec2;
pub use types::{midpoint, ItemKind, SpawnArea};
