//! End-to-end scenarios for the show timeline core.
//!
//! Exercises the public API the way the planner does: build a chained
//! show, edit it, delete from it, and push it through the interchange
//! records, checking the resolved times exactly at each step.

// Tests use unwrap extensively for clarity -- panicking on failure is the
// correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::items_after_statements,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::arithmetic_side_effects
)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use skyshow_timeline::{
    ConstraintPolicy, FireworkDraft, FireworkPatch, ShowStats, ShowTimeline, TimelineError,
    TimelineView, create_sample_show,
};

fn root(name: &str, start: Decimal, fuse: Decimal, effect: Decimal) -> FireworkDraft {
    FireworkDraft {
        name: name.to_string(),
        start_time: start,
        fuse_duration: fuse,
        effect_duration: effect,
        dependent_on: None,
        dependency_offset: Decimal::ZERO,
        cost: Decimal::ZERO,
    }
}

fn chained(
    name: &str,
    parent: skyshow_types::FireworkId,
    offset: Decimal,
    fuse: Decimal,
    effect: Decimal,
) -> FireworkDraft {
    FireworkDraft {
        name: name.to_string(),
        start_time: Decimal::ZERO,
        fuse_duration: fuse,
        effect_duration: effect,
        dependent_on: Some(parent),
        dependency_offset: offset,
        cost: Decimal::ZERO,
    }
}

// =============================================================================
// Chain propagation
// =============================================================================

#[test]
fn chain_propagation_after_fuse_edit() {
    let mut show = ShowTimeline::new();
    let a = show.add(root("A", dec!(0), dec!(2), dec!(3))).unwrap();
    let b = show
        .add(chained("B", a, dec!(2), dec!(1.5), dec!(8)))
        .unwrap();
    let c = show.add(chained("C", b, dec!(2), dec!(3), dec!(5))).unwrap();

    // Initial resolution.
    assert_eq!(show.get(a).unwrap().end_time, dec!(5));
    assert_eq!(show.get(b).unwrap().start_time, dec!(7));
    assert_eq!(show.get(b).unwrap().end_time, dec!(16.5));
    assert_eq!(show.get(c).unwrap().start_time, dec!(18.5));
    assert_eq!(show.get(c).unwrap().end_time, dec!(26.5));

    // Lengthening A's fuse shifts the whole chain in one resolve.
    show.update(
        a,
        FireworkPatch {
            fuse_duration: Some(dec!(4)),
            ..FireworkPatch::default()
        },
    )
    .unwrap();

    assert_eq!(show.get(a).unwrap().end_time, dec!(7));
    assert_eq!(show.get(b).unwrap().start_time, dec!(9));
    assert_eq!(show.get(b).unwrap().end_time, dec!(18.5));
    assert_eq!(show.get(c).unwrap().start_time, dec!(20.5));
    assert_eq!(show.get(c).unwrap().end_time, dec!(28.5));
}

#[test]
fn every_end_time_is_start_plus_phases() {
    let (mut show, ids) = create_sample_show().unwrap();
    show.update(
        ids.roman_candle,
        FireworkPatch {
            effect_duration: Some(dec!(4)),
            ..FireworkPatch::default()
        },
    )
    .unwrap();

    for firework in show.fireworks() {
        let expected = firework.start_time + firework.fuse_duration + firework.effect_duration;
        assert_eq!(firework.end_time, expected);
    }
}

#[test]
fn negative_offset_clamps_to_show_start() {
    let mut show = ShowTimeline::new();
    let a = show.add(root("A", dec!(0), dec!(2), dec!(3))).unwrap();
    let b = show
        .add(chained("B", a, dec!(-10), dec!(1), dec!(1)))
        .unwrap();

    assert_eq!(show.get(b).unwrap().start_time, dec!(0));
    assert_eq!(show.get(b).unwrap().end_time, dec!(2));
}

// =============================================================================
// Cycle rejection
// =============================================================================

#[test]
fn descendant_dependency_rejected_anywhere_in_chain() {
    let mut show = ShowTimeline::new();
    let a = show.add(root("A", dec!(0), dec!(1), dec!(1))).unwrap();
    let b = show.add(chained("B", a, dec!(0), dec!(1), dec!(1))).unwrap();
    let c = show.add(chained("C", b, dec!(0), dec!(1), dec!(1))).unwrap();

    let before = show.to_records();
    for target in [a, b, c] {
        let result = show.update(
            a,
            FireworkPatch {
                dependent_on: Some(Some(target)),
                ..FireworkPatch::default()
            },
        );
        assert!(matches!(
            result,
            Err(TimelineError::SelfDependency(_))
                | Err(TimelineError::DependencyCycle { .. })
        ));
    }
    assert_eq!(show.to_records(), before);
}

// =============================================================================
// Deletion repair
// =============================================================================

#[test]
fn deleting_mid_chain_repairs_and_detaches() {
    let (mut show, ids) = create_sample_show().unwrap();

    show.remove(ids.roman_candle).unwrap();

    assert_eq!(show.len(), 2);
    let finale = show.get(ids.grand_finale).unwrap();
    assert_eq!(finale.dependent_on, None);
    assert_eq!(finale.dependency_offset, dec!(0));
    // The finale keeps its last resolved start and stops tracking the opener.
    assert_eq!(finale.start_time, dec!(18.5));

    show.update(
        ids.opening_burst,
        FireworkPatch {
            start_time: Some(dec!(40)),
            ..FireworkPatch::default()
        },
    )
    .unwrap();
    assert_eq!(show.get(ids.grand_finale).unwrap().start_time, dec!(18.5));
}

// =============================================================================
// Interchange round trip
// =============================================================================

#[test]
fn json_round_trip_reproduces_resolved_times() {
    let (show, ids) = create_sample_show().unwrap();

    let json = serde_json::to_string(&show.to_records()).unwrap();
    let records: Vec<skyshow_types::Firework> = serde_json::from_str(&json).unwrap();
    let restored = ShowTimeline::from_records(records).unwrap();

    assert_eq!(restored.to_records(), show.to_records());
    assert_eq!(
        restored.get(ids.grand_finale).unwrap().start_time,
        dec!(18.5)
    );
}

// =============================================================================
// Projections
// =============================================================================

#[test]
fn stats_and_view_agree_with_sample_show() {
    let (show, ids) = create_sample_show().unwrap();

    let stats = ShowStats::compute(&show).unwrap();
    assert_eq!(stats.fireworks, 3);
    assert_eq!(stats.total_cost, dec!(191.25));
    assert_eq!(stats.total_duration, dec!(26.5));

    let view = TimelineView::project(&show).unwrap();
    assert_eq!(view.rows.len(), 3);
    assert_eq!(view.edges.len(), 2);
    let finale_edge = view
        .edges
        .iter()
        .find(|e| e.child == ids.grand_finale)
        .unwrap();
    assert_eq!(finale_edge.parent_end, dec!(16.5));
    assert_eq!(finale_edge.child_start, dec!(18.5));
}

// =============================================================================
// Constraint policy
// =============================================================================

#[test]
fn ceiling_is_advisory_unless_enforced() {
    let mut show = ShowTimeline::new();
    let a = show.add(root("A", dec!(0), dec!(2), dec!(3))).unwrap();
    let b = show.add(chained("B", a, dec!(2), dec!(1), dec!(1))).unwrap();

    assert_eq!(show.max_allowed_start(a).unwrap(), Some(dec!(7)));

    // Advisory: accepted, dependent recomputes.
    show.update(
        a,
        FireworkPatch {
            start_time: Some(dec!(20)),
            ..FireworkPatch::default()
        },
    )
    .unwrap();
    assert_eq!(show.get(b).unwrap().start_time, dec!(27));

    // Enforce: the same style of edit is rejected once it passes the new
    // ceiling.
    let ceiling = show.max_allowed_start(a).unwrap().unwrap();
    let result = show.update_with_policy(
        a,
        FireworkPatch {
            start_time: Some(ceiling + dec!(1)),
            ..FireworkPatch::default()
        },
        ConstraintPolicy::Enforce,
    );
    assert!(matches!(
        result,
        Err(TimelineError::StartCeilingExceeded { .. })
    ));
}
