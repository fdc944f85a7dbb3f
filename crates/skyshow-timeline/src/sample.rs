//! The canned three-firework demo show.
//!
//! Used by the planner's "load sample show" action, by documentation, and
//! by tests that want a small but fully chained timeline: an opener, a
//! candle timed two seconds after the opener fades, and a finale two
//! seconds after the candle.

use rust_decimal::Decimal;
use skyshow_types::FireworkId;

use crate::error::TimelineError;
use crate::show::{FireworkDraft, ShowTimeline};

/// IDs of the three fireworks in the sample show, for callers that want to
/// point at specific entries.
#[derive(Debug, Clone, Copy)]
pub struct SampleShowIds {
    /// The independent opener: starts at 0, fuse 2s, effect 3s.
    pub opening_burst: FireworkId,
    /// Depends on the opener, offset +2s: fuse 1.5s, effect 8s.
    pub roman_candle: FireworkId,
    /// Depends on the candle, offset +2s: fuse 3s, effect 5s.
    pub grand_finale: FireworkId,
}

/// Build the sample show: Opening Burst -> Roman Candle -> Grand Finale.
///
/// Resolved times: opener 0..5, candle 7..16.5, finale 18.5..26.5.
///
/// # Errors
///
/// Returns a [`TimelineError`] only if the store rejects the canned data,
/// which would indicate a bug in the store itself.
pub fn create_sample_show() -> Result<(ShowTimeline, SampleShowIds), TimelineError> {
    let mut show = ShowTimeline::new();

    let opening_burst = show.add(FireworkDraft {
        name: String::from("Opening Burst"),
        start_time: Decimal::ZERO,
        fuse_duration: Decimal::TWO,
        effect_duration: Decimal::from(3),
        dependent_on: None,
        dependency_offset: Decimal::ZERO,
        cost: Decimal::new(2500, 2), // 25.00
    })?;

    let roman_candle = show.add(FireworkDraft {
        name: String::from("Roman Candle"),
        start_time: Decimal::ZERO,
        fuse_duration: Decimal::new(15, 1), // 1.5
        effect_duration: Decimal::from(8),
        dependent_on: Some(opening_burst),
        dependency_offset: Decimal::TWO,
        cost: Decimal::new(4550, 2), // 45.50
    })?;

    let grand_finale = show.add(FireworkDraft {
        name: String::from("Grand Finale"),
        start_time: Decimal::ZERO,
        fuse_duration: Decimal::from(3),
        effect_duration: Decimal::from(5),
        dependent_on: Some(roman_candle),
        dependency_offset: Decimal::TWO,
        cost: Decimal::new(12075, 2), // 120.75
    })?;

    Ok((
        show,
        SampleShowIds {
            opening_burst,
            roman_candle,
            grand_finale,
        },
    ))
}
