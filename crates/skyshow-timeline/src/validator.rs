//! Edit validation: field checks, cycle prevention, and the advisory
//! start-time ceiling.
//!
//! Validation runs before any mutation touches the store, so a rejected
//! edit leaves the timeline exactly as it was. The cycle check walks
//! ancestor references with a hop budget of the total firework count; a
//! longer chain means the graph is already corrupt and is reported the same
//! way as a cycle.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use skyshow_types::{Firework, FireworkId};

use crate::error::TimelineError;

/// Reject empty (or all-whitespace) display names.
///
/// # Errors
///
/// Returns [`TimelineError::EmptyName`] when the name has no visible text.
pub fn ensure_name(name: &str) -> Result<(), TimelineError> {
    if name.trim().is_empty() {
        return Err(TimelineError::EmptyName);
    }
    Ok(())
}

/// Reject durations that are not strictly positive.
///
/// # Errors
///
/// Returns [`TimelineError::NonPositiveDuration`] naming the field.
pub fn ensure_positive(
    field: &'static str,
    value: Decimal,
) -> Result<(), TimelineError> {
    if value <= Decimal::ZERO {
        return Err(TimelineError::NonPositiveDuration { field, value });
    }
    Ok(())
}

/// Reject negative values for fields that must be zero or greater
/// (authoritative start times, costs).
///
/// # Errors
///
/// Returns [`TimelineError::NegativeValue`] naming the field.
pub fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), TimelineError> {
    if value < Decimal::ZERO {
        return Err(TimelineError::NegativeValue { field, value });
    }
    Ok(())
}

/// Check that making `firework` depend on `dependency` keeps the graph a
/// forest.
///
/// Walks parent references upward from `dependency`; encountering
/// `firework` anywhere on that chain means the edit would close a loop.
/// The walk is budgeted at the total firework count -- a chain longer than
/// that can only mean the stored graph already contains a cycle.
///
/// # Errors
///
/// Returns [`TimelineError::SelfDependency`] when the target is the
/// firework itself, or [`TimelineError::DependencyCycle`] for indirect
/// cycles and blown hop budgets.
pub fn ensure_no_cycle(
    fireworks: &BTreeMap<FireworkId, Firework>,
    firework: FireworkId,
    dependency: FireworkId,
) -> Result<(), TimelineError> {
    if dependency == firework {
        return Err(TimelineError::SelfDependency(firework));
    }

    let mut current = Some(dependency);
    let mut hops = 0_usize;
    while let Some(ancestor) = current {
        if ancestor == firework {
            return Err(TimelineError::DependencyCycle {
                firework,
                dependency,
            });
        }
        hops = hops.saturating_add(1);
        if hops > fireworks.len() {
            return Err(TimelineError::DependencyCycle {
                firework,
                dependency,
            });
        }
        current = fireworks.get(&ancestor).and_then(|fw| fw.dependent_on);
    }
    Ok(())
}

/// The advisory start-time ceiling for a firework: the earliest
/// `start_time` among its direct dependents, or `None` when nothing depends
/// on it (no ceiling).
///
/// A parent is conventionally expected to finish before its dependents
/// begin, so planner UIs surface this value next to the start-time field.
/// Dependents recompute automatically either way; the ceiling only becomes
/// a hard limit under [`ConstraintPolicy::Enforce`].
///
/// [`ConstraintPolicy::Enforce`]: crate::show::ConstraintPolicy::Enforce
pub fn max_allowed_start(
    fireworks: &BTreeMap<FireworkId, Firework>,
    id: FireworkId,
) -> Option<Decimal> {
    fireworks
        .values()
        .filter(|fw| fw.dependent_on == Some(id))
        .map(|fw| fw.start_time)
        .min()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn make_firework(dependent_on: Option<FireworkId>, start: Decimal) -> Firework {
        Firework {
            id: FireworkId::new(),
            name: String::from("test"),
            start_time: start,
            fuse_duration: dec!(1),
            effect_duration: dec!(1),
            end_time: dec!(2),
            dependent_on,
            dependency_offset: Decimal::ZERO,
            cost: Decimal::ZERO,
        }
    }

    fn insert(map: &mut BTreeMap<FireworkId, Firework>, fw: Firework) -> FireworkId {
        let id = fw.id;
        map.insert(id, fw);
        id
    }

    #[test]
    fn name_must_have_visible_text() {
        assert_eq!(ensure_name("Opening Burst"), Ok(()));
        assert_eq!(ensure_name(""), Err(TimelineError::EmptyName));
        assert_eq!(ensure_name("   "), Err(TimelineError::EmptyName));
    }

    #[test]
    fn durations_must_be_positive() {
        assert_eq!(ensure_positive("fuse_duration", dec!(0.1)), Ok(()));
        assert_eq!(
            ensure_positive("fuse_duration", dec!(0)),
            Err(TimelineError::NonPositiveDuration {
                field: "fuse_duration",
                value: dec!(0)
            })
        );
        assert!(ensure_positive("effect_duration", dec!(-1)).is_err());
    }

    #[test]
    fn non_negative_check() {
        assert_eq!(ensure_non_negative("cost", dec!(0)), Ok(()));
        assert!(ensure_non_negative("start_time", dec!(-0.5)).is_err());
    }

    #[test]
    fn self_dependency_rejected() {
        let mut map = BTreeMap::new();
        let a = insert(&mut map, make_firework(None, dec!(0)));
        assert_eq!(
            ensure_no_cycle(&map, a, a),
            Err(TimelineError::SelfDependency(a))
        );
    }

    #[test]
    fn direct_cycle_rejected() {
        let mut map = BTreeMap::new();
        let a = insert(&mut map, make_firework(None, dec!(0)));
        let b = insert(&mut map, make_firework(Some(a), dec!(0)));
        // a -> b would close the loop b -> a.
        assert_eq!(
            ensure_no_cycle(&map, a, b),
            Err(TimelineError::DependencyCycle {
                firework: a,
                dependency: b
            })
        );
    }

    #[test]
    fn transitive_cycle_rejected() {
        let mut map = BTreeMap::new();
        let a = insert(&mut map, make_firework(None, dec!(0)));
        let b = insert(&mut map, make_firework(Some(a), dec!(0)));
        let c = insert(&mut map, make_firework(Some(b), dec!(0)));
        assert!(ensure_no_cycle(&map, a, c).is_err());
    }

    #[test]
    fn valid_dependency_accepted() {
        let mut map = BTreeMap::new();
        let a = insert(&mut map, make_firework(None, dec!(0)));
        let b = insert(&mut map, make_firework(Some(a), dec!(0)));
        let c = insert(&mut map, make_firework(None, dec!(0)));
        // c may depend on b: c is not an ancestor of b.
        assert_eq!(ensure_no_cycle(&map, c, b), Ok(()));
    }

    #[test]
    fn corrupt_chain_hits_hop_budget() {
        // Hand-build a pre-existing cycle between b and c, then validate an
        // edit on an unrelated firework whose chain walks into it.
        let mut map = BTreeMap::new();
        let b = insert(&mut map, make_firework(None, dec!(0)));
        let c = insert(&mut map, make_firework(Some(b), dec!(0)));
        if let Some(fw) = map.get_mut(&b) {
            fw.dependent_on = Some(c);
        }
        let d = insert(&mut map, make_firework(None, dec!(0)));

        assert_eq!(
            ensure_no_cycle(&map, d, b),
            Err(TimelineError::DependencyCycle {
                firework: d,
                dependency: b
            })
        );
    }

    #[test]
    fn ceiling_is_earliest_dependent_start() {
        let mut map = BTreeMap::new();
        let parent = insert(&mut map, make_firework(None, dec!(0)));
        let _early = insert(&mut map, make_firework(Some(parent), dec!(4)));
        let _late = insert(&mut map, make_firework(Some(parent), dec!(9)));

        assert_eq!(max_allowed_start(&map, parent), Some(dec!(4)));
    }

    #[test]
    fn no_dependents_means_no_ceiling() {
        let mut map = BTreeMap::new();
        let lone = insert(&mut map, make_firework(None, dec!(0)));
        assert_eq!(max_allowed_start(&map, lone), None);
    }
}
