//! Chart projection of the timeline.
//!
//! Produces the data behind the planner's Gantt chart: one row per
//! firework with separate fuse and effect intervals, plus one edge per
//! dependency relation from the parent's end to the child's start. Rows
//! are ordered by ignition time (start plus fuse), the order the audience
//! sees bursts. A pure read model; nothing here writes back to the store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use skyshow_types::FireworkId;

use crate::error::TimelineError;
use crate::show::ShowTimeline;

/// A half-open time interval on the show clock, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Interval start.
    pub start: Decimal,
    /// Interval end.
    pub end: Decimal,
}

/// One chart row: a firework split into its fuse and effect phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineRow {
    /// The firework this row renders.
    pub firework: FireworkId,
    /// Display name for the row label.
    pub name: String,
    /// The fuse phase: launch to burst.
    pub fuse: Interval,
    /// The effect phase: burst to fade.
    pub effect: Interval,
    /// Cost, for the hover card.
    pub cost: Decimal,
}

/// A dependency edge drawn between two rows: from the parent's end time to
/// the child's start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// The parent firework.
    pub parent: FireworkId,
    /// The dependent firework.
    pub child: FireworkId,
    /// Where the edge leaves the parent row.
    pub parent_end: Decimal,
    /// Where the edge meets the child row.
    pub child_start: Decimal,
}

/// The full chart payload: rows ordered by ignition time plus all
/// dependency edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineView {
    /// Chart rows, earliest burst first.
    pub rows: Vec<TimelineRow>,
    /// Dependency edges, in timeline insertion order.
    pub edges: Vec<DependencyEdge>,
}

impl TimelineView {
    /// Project the current timeline into chart data.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::ArithmeticOverflow`] if checked arithmetic
    /// fails while splitting phases.
    pub fn project(show: &ShowTimeline) -> Result<Self, TimelineError> {
        let mut rows = Vec::with_capacity(show.len());
        for firework in show.fireworks() {
            let burst = firework
                .start_time
                .checked_add(firework.fuse_duration)
                .ok_or(TimelineError::ArithmeticOverflow)?;
            rows.push(TimelineRow {
                firework: firework.id,
                name: firework.name.clone(),
                fuse: Interval {
                    start: firework.start_time,
                    end: burst,
                },
                effect: Interval {
                    start: burst,
                    end: firework.end_time,
                },
                cost: firework.cost,
            });
        }
        // Earliest burst first; insertion order breaks ties (stable sort).
        rows.sort_by(|a, b| a.fuse.end.cmp(&b.fuse.end));

        let mut edges = Vec::new();
        for firework in show.fireworks() {
            if let Some(parent) = firework.dependent_on
                && let Some(parent_fw) = show.get(parent)
            {
                edges.push(DependencyEdge {
                    parent,
                    child: firework.id,
                    parent_end: parent_fw.end_time,
                    child_start: firework.start_time,
                });
            }
        }

        Ok(Self { rows, edges })
    }
}
