//! Derived-time resolution for the dependency forest.
//!
//! A firework with a dependency derives its start time from its parent:
//! `max(0, parent.end_time + dependency_offset)`. Every firework's end time
//! is `start_time + fuse_duration + effect_duration`. After any mutation the
//! whole graph is brought back to a fixed point by [`resolve`].
//!
//! # Strategy
//!
//! Because the dependency relation is kept a forest at write time (no
//! cycles, no self-references), a valid parents-before-children order always
//! exists. [`resolve`] therefore runs a single topological pass (Kahn's
//! algorithm): roots first, then each child as soon as its parent has been
//! recomputed. No iteration cap is needed -- the bounded-relaxation
//! alternative converges to the same fixed point but takes one pass per
//! chain level. If any firework cannot be ordered, write-time validation
//! has been bypassed and the pass fails with
//! [`TimelineError::ResolverStalled`].
//!
//! The pass is idempotent: resolving an already-resolved graph changes
//! nothing.

use std::collections::{BTreeMap, VecDeque};

use rust_decimal::Decimal;
use skyshow_types::{Firework, FireworkId};

use crate::error::TimelineError;

/// Compute the derived start time for a dependent firework:
/// the parent's end time plus the signed offset, clamped at zero so a
/// large negative offset never schedules a launch before the show starts.
///
/// # Errors
///
/// Returns [`TimelineError::ArithmeticOverflow`] if checked arithmetic fails.
pub fn effective_start(
    parent_end: Decimal,
    offset: Decimal,
) -> Result<Decimal, TimelineError> {
    let raw = parent_end
        .checked_add(offset)
        .ok_or(TimelineError::ArithmeticOverflow)?;
    Ok(raw.max(Decimal::ZERO))
}

/// Compute a firework's end time: start plus fuse plus effect.
///
/// # Errors
///
/// Returns [`TimelineError::ArithmeticOverflow`] if checked arithmetic fails.
pub fn end_time(
    start: Decimal,
    fuse_duration: Decimal,
    effect_duration: Decimal,
) -> Result<Decimal, TimelineError> {
    start
        .checked_add(fuse_duration)
        .and_then(|launch| launch.checked_add(effect_duration))
        .ok_or(TimelineError::ArithmeticOverflow)
}

/// Bring every firework's derived `start_time` and `end_time` to the fixed
/// point implied by the current dependency forest.
///
/// Roots keep their authoritative start times (only `end_time` is
/// recomputed); dependents get `effective_start` from their parent. Children
/// are processed only after their parent, so one pass suffices.
///
/// # Errors
///
/// Returns [`TimelineError::ResolverStalled`] if some fireworks could not be
/// ordered (a cycle or a dependency on a missing firework), or
/// [`TimelineError::ArithmeticOverflow`] on checked arithmetic failure. The
/// map may be partially updated on error; callers stage mutations on a copy
/// and discard it on failure.
pub fn resolve(
    fireworks: &mut BTreeMap<FireworkId, Firework>,
) -> Result<(), TimelineError> {
    // Children adjacency and the root queue.
    let mut children: BTreeMap<FireworkId, Vec<FireworkId>> = BTreeMap::new();
    let mut queue: VecDeque<FireworkId> = VecDeque::new();

    for (id, firework) in fireworks.iter() {
        match firework.dependent_on {
            Some(parent) => children.entry(parent).or_default().push(*id),
            None => queue.push_back(*id),
        }
    }

    let total = fireworks.len();
    let mut resolved = 0_usize;

    while let Some(id) = queue.pop_front() {
        let Some(firework) = fireworks.get(&id) else {
            continue;
        };

        let new_start = match firework.dependent_on {
            Some(parent) => {
                // The parent was dequeued before us, so its end time is final.
                let Some(parent_end) = fireworks.get(&parent).map(|p| p.end_time) else {
                    continue;
                };
                effective_start(parent_end, firework.dependency_offset)?
            }
            None => firework.start_time,
        };
        let new_end = end_time(
            new_start,
            firework.fuse_duration,
            firework.effect_duration,
        )?;

        if let Some(firework) = fireworks.get_mut(&id) {
            firework.start_time = new_start;
            firework.end_time = new_end;
        }
        resolved = resolved.saturating_add(1);

        if let Some(dependents) = children.get(&id) {
            for child in dependents {
                queue.push_back(*child);
            }
        }
    }

    // Anything left unordered is unreachable from a root: a cycle, or a
    // dependency on a firework that is not in the map.
    if resolved == total {
        Ok(())
    } else {
        Err(TimelineError::ResolverStalled { resolved, total })
    }
}
