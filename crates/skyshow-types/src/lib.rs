//! Shared type definitions for the Skyshow timeline engine.
//!
//! This crate is the single source of truth for the types that cross crate
//! boundaries in the Skyshow workspace. Types defined here flow downstream
//! to `TypeScript` via `ts-rs` for the planner's chart and form UI.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for firework, show, and owner IDs
//! - [`firework`] -- The [`Firework`] entity (also the flat interchange
//!   record) and the [`ShowRecord`] persistence envelope

pub mod firework;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use firework::{Firework, ShowRecord};
pub use ids::{FireworkId, OwnerId, ShowId};
