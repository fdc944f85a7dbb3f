//! Dependency-resolving show timeline core for the Skyshow planner.
//!
//! A show is a set of fireworks, each with a fuse phase and an effect
//! phase. Some fireworks are timed absolutely; others are timed against
//! another firework's end plus a signed offset, forming a dependency
//! forest. This crate keeps that timeline consistent: every mutation
//! validates, re-derives every dependent start and every end time, and
//! commits only when the whole graph reaches its fixed point.
//!
//! The core is synchronous and single-threaded by design -- no I/O, no
//! locking, no background work. Hosts that embed it concurrently must
//! serialize mutating calls themselves.
//!
//! # Modules
//!
//! - [`show`] -- [`ShowTimeline`], the owning store with add/update/remove
//!   and the sorted and record projections
//! - [`resolver`] -- derived-time formulas and the topological full-graph
//!   resolve
//! - [`validator`] -- field checks, cycle prevention, and the advisory
//!   start ceiling
//! - [`stats`] -- aggregate show statistics
//! - [`view`] -- the Gantt chart projection
//! - [`sample`] -- the canned three-firework demo show
//! - [`error`] -- [`TimelineError`]

pub mod error;
pub mod resolver;
pub mod sample;
pub mod show;
pub mod stats;
pub mod validator;
pub mod view;

// Re-export primary types at crate root.
pub use error::TimelineError;
pub use sample::{SampleShowIds, create_sample_show};
pub use show::{ConstraintPolicy, FireworkDraft, FireworkPatch, ShowTimeline};
pub use stats::ShowStats;
pub use view::{DependencyEdge, Interval, TimelineRow, TimelineView};
