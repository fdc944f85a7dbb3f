//! Error types for the `skyshow-timeline` crate.
//!
//! All fallible operations in this crate return [`TimelineError`] through
//! the standard [`Result`] type alias. Variants group into five families:
//! malformed input (empty name, non-positive duration, unknown or duplicate
//! references), missing targets, dependency cycles, the advisory start
//! ceiling when a host enforces it as hard, and the fatal resolver stall
//! that signals a corrupt graph.

use rust_decimal::Decimal;
use skyshow_types::FireworkId;

/// Errors that can occur during show timeline operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimelineError {
    /// A firework name was empty or all whitespace.
    #[error("firework name must not be empty")]
    EmptyName,

    /// A duration field that must be strictly positive was not.
    #[error("{field} must be greater than zero, got {value}")]
    NonPositiveDuration {
        /// The offending field name.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// A field that must be non-negative was negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeValue {
        /// The offending field name.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },

    /// A dependency referenced a firework that is not on the timeline.
    #[error("dependency target not found: {0}")]
    UnknownDependency(FireworkId),

    /// An imported record set contained the same firework ID twice.
    #[error("duplicate firework id: {0}")]
    DuplicateFirework(FireworkId),

    /// An operation targeted a firework that is not on the timeline.
    #[error("firework not found: {0}")]
    FireworkNotFound(FireworkId),

    /// A firework was asked to depend on itself.
    #[error("firework {0} cannot depend on itself")]
    SelfDependency(FireworkId),

    /// A dependency edit would create a cycle, or the ancestor chain walked
    /// past the total firework count (corrupt graph guard).
    #[error("setting {firework} to depend on {dependency} would create a cycle")]
    DependencyCycle {
        /// The firework being edited.
        firework: FireworkId,
        /// The proposed dependency target.
        dependency: FireworkId,
    },

    /// Under [`ConstraintPolicy::Enforce`], a direct start-time edit pushed
    /// a firework past the earliest start of its dependents.
    ///
    /// [`ConstraintPolicy::Enforce`]: crate::show::ConstraintPolicy::Enforce
    #[error(
        "start time {requested} for {firework} exceeds the dependent ceiling {ceiling}"
    )]
    StartCeilingExceeded {
        /// The firework being edited.
        firework: FireworkId,
        /// The requested start time.
        requested: Decimal,
        /// The earliest start time among direct dependents.
        ceiling: Decimal,
    },

    /// The resolver could not order every firework: a cycle or dangling
    /// dependency slipped past write-time validation. Fatal; the store
    /// rejects the mutation that exposed it.
    #[error("resolver stalled: ordered {resolved} of {total} fireworks")]
    ResolverStalled {
        /// How many fireworks were successfully ordered and resolved.
        resolved: usize,
        /// How many fireworks are on the timeline.
        total: usize,
    },

    /// Arithmetic overflow during a checked timeline calculation.
    #[error("arithmetic overflow in timeline calculation")]
    ArithmeticOverflow,
}
