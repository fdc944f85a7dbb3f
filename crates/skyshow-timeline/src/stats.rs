//! Aggregate show statistics.
//!
//! A pure read projection over the timeline: firework count, total cost,
//! and overall show duration (the latest end time). Displayed by the
//! planner next to the chart; never feeds back into the core.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TimelineError;
use crate::show::ShowTimeline;

/// Aggregate statistics for one show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowStats {
    /// Number of fireworks on the timeline.
    pub fireworks: usize,
    /// Sum of all firework costs, in dollars.
    pub total_cost: Decimal,
    /// Overall show duration in seconds: the maximum end time across all
    /// fireworks, or zero for an empty show.
    pub total_duration: Decimal,
}

impl ShowStats {
    /// Compute statistics for the given timeline.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::ArithmeticOverflow`] if the cost sum
    /// overflows.
    pub fn compute(show: &ShowTimeline) -> Result<Self, TimelineError> {
        let mut total_cost = Decimal::ZERO;
        let mut total_duration = Decimal::ZERO;
        for firework in show.fireworks() {
            total_cost = total_cost
                .checked_add(firework.cost)
                .ok_or(TimelineError::ArithmeticOverflow)?;
            total_duration = total_duration.max(firework.end_time);
        }
        Ok(Self {
            fireworks: show.len(),
            total_cost,
            total_duration,
        })
    }
}
