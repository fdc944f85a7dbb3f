//! The show timeline: the owning store for all fireworks in a show.
//!
//! [`ShowTimeline`] holds the canonical firework collection and is the only
//! writer of firework fields. Every mutation -- add, update, remove --
//! validates first, stages the change on a working copy, re-resolves the
//! whole dependency forest, and commits only when the resolve succeeds.
//! A failed mutation therefore leaves the timeline exactly as it was.
//!
//! Reads are projections: [`by_start`] for the sorted listing,
//! [`to_records`] for the flat interchange records, and
//! [`max_allowed_start`] for the advisory start ceiling shown next to the
//! planner's start-time field.
//!
//! [`by_start`]: ShowTimeline::by_start
//! [`to_records`]: ShowTimeline::to_records
//! [`max_allowed_start`]: ShowTimeline::max_allowed_start

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use skyshow_types::{Firework, FireworkId};
use tracing::debug;

use crate::error::TimelineError;
use crate::resolver;
use crate::validator;

// ---------------------------------------------------------------------------
// Mutation parameters
// ---------------------------------------------------------------------------

/// Parameters for adding a firework to the timeline.
///
/// `start_time` is used as-is for an independent firework and ignored in
/// favor of the derived start when `dependent_on` is set (the planner form
/// shows the computed value instead of an input in that case).
#[derive(Debug, Clone)]
pub struct FireworkDraft {
    /// Display name. Must have visible text.
    pub name: String,
    /// Requested start time in seconds. Must be zero or greater.
    pub start_time: Decimal,
    /// Fuse phase length in seconds. Must be strictly positive.
    pub fuse_duration: Decimal,
    /// Effect phase length in seconds. Must be strictly positive.
    pub effect_duration: Decimal,
    /// Optional parent firework to time this one against.
    pub dependent_on: Option<FireworkId>,
    /// Signed offset from the parent's end time, in seconds.
    pub dependency_offset: Decimal,
    /// Cost in dollars. Must be zero or greater.
    pub cost: Decimal,
}

/// A batch of field changes applied atomically by [`ShowTimeline::update`].
///
/// `None` leaves a field untouched. `dependent_on` is doubly optional:
/// `Some(Some(id))` retargets the dependency, `Some(None)` clears it
/// (zeroing the offset and freezing the last resolved start as the new
/// authoritative start), `None` keeps the current target.
#[derive(Debug, Clone, Default)]
pub struct FireworkPatch {
    /// New display name.
    pub name: Option<String>,
    /// New authoritative start time. Overwritten by the resolver if the
    /// firework still has a dependency after this patch.
    pub start_time: Option<Decimal>,
    /// New fuse phase length.
    pub fuse_duration: Option<Decimal>,
    /// New effect phase length.
    pub effect_duration: Option<Decimal>,
    /// Dependency retarget (`Some(Some(..))`), clear (`Some(None)`), or
    /// keep (`None`).
    pub dependent_on: Option<Option<FireworkId>>,
    /// New signed offset from the parent's end time.
    pub dependency_offset: Option<Decimal>,
    /// New cost.
    pub cost: Option<Decimal>,
}

/// How to treat the advisory dependent start ceiling during updates.
///
/// The ceiling ([`ShowTimeline::max_allowed_start`]) is advisory at the
/// core level: dependents recompute automatically however their parent
/// moves. Hosts that want the planner form's hard clamp opt into
/// [`Enforce`], which turns a ceiling violation into
/// [`TimelineError::StartCeilingExceeded`].
///
/// [`Enforce`]: ConstraintPolicy::Enforce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstraintPolicy {
    /// Report the ceiling through the query API, never reject an edit.
    #[default]
    Advisory,
    /// Reject direct start-time edits that exceed the ceiling.
    Enforce,
}

// ---------------------------------------------------------------------------
// ShowTimeline
// ---------------------------------------------------------------------------

/// The owning store for all fireworks in one show.
///
/// Fireworks are indexed by ID; a separate insertion-order list breaks
/// sorting ties and keeps record export order stable. The store upholds
/// four invariants after every successful mutation:
///
/// 1. A dependent's start equals its parent's end plus the offset, clamped
///    at zero.
/// 2. Every end time equals start plus fuse plus effect.
/// 3. The dependency relation is a forest.
/// 4. No firework references a deleted parent.
#[derive(Debug, Clone)]
pub struct ShowTimeline {
    /// All fireworks indexed by their identifier.
    fireworks: BTreeMap<FireworkId, Firework>,
    /// Insertion order, for tie-breaking and record export.
    order: Vec<FireworkId>,
}

impl ShowTimeline {
    /// Create an empty timeline.
    pub const fn new() -> Self {
        Self {
            fireworks: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// Return the number of fireworks on the timeline.
    pub fn len(&self) -> usize {
        self.fireworks.len()
    }

    /// Return whether the timeline has no fireworks.
    pub fn is_empty(&self) -> bool {
        self.fireworks.is_empty()
    }

    /// Return whether a firework with the given ID is on the timeline.
    pub fn contains(&self, id: FireworkId) -> bool {
        self.fireworks.contains_key(&id)
    }

    /// Get an immutable reference to a firework.
    pub fn get(&self, id: FireworkId) -> Option<&Firework> {
        self.fireworks.get(&id)
    }

    /// Iterate over all fireworks in insertion order.
    pub fn fireworks(&self) -> impl Iterator<Item = &Firework> {
        self.order.iter().filter_map(|id| self.fireworks.get(id))
    }

    /// Return all fireworks sorted by start time ascending, ties broken by
    /// insertion order. A projection; the stored collection is unordered.
    pub fn by_start(&self) -> Vec<&Firework> {
        let mut sorted: Vec<&Firework> = self.fireworks().collect();
        sorted.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        sorted
    }

    /// The advisory start ceiling for a firework: the earliest start among
    /// its direct dependents, or `None` when nothing depends on it.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::FireworkNotFound`] for an unknown ID.
    pub fn max_allowed_start(
        &self,
        id: FireworkId,
    ) -> Result<Option<Decimal>, TimelineError> {
        if !self.fireworks.contains_key(&id) {
            return Err(TimelineError::FireworkNotFound(id));
        }
        Ok(validator::max_allowed_start(&self.fireworks, id))
    }

    // -------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------

    /// Add a firework to the timeline and re-resolve the graph.
    ///
    /// A fresh ID is allocated and returned. When `dependent_on` is set,
    /// the draft's `start_time` is replaced by the derived start from the
    /// parent's end time and the offset.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::EmptyName`],
    /// [`TimelineError::NonPositiveDuration`],
    /// [`TimelineError::NegativeValue`], or
    /// [`TimelineError::UnknownDependency`] on invalid input; the timeline
    /// is unchanged on any error.
    pub fn add(&mut self, draft: FireworkDraft) -> Result<FireworkId, TimelineError> {
        validator::ensure_name(&draft.name)?;
        validator::ensure_positive("fuse_duration", draft.fuse_duration)?;
        validator::ensure_positive("effect_duration", draft.effect_duration)?;
        validator::ensure_non_negative("start_time", draft.start_time)?;
        validator::ensure_non_negative("cost", draft.cost)?;

        let start_time = match draft.dependent_on {
            Some(parent) => {
                let parent_end = self
                    .fireworks
                    .get(&parent)
                    .map(|p| p.end_time)
                    .ok_or(TimelineError::UnknownDependency(parent))?;
                resolver::effective_start(parent_end, draft.dependency_offset)?
            }
            None => draft.start_time,
        };
        let end_time =
            resolver::end_time(start_time, draft.fuse_duration, draft.effect_duration)?;

        let id = FireworkId::new();
        let firework = Firework {
            id,
            name: draft.name,
            start_time,
            fuse_duration: draft.fuse_duration,
            effect_duration: draft.effect_duration,
            end_time,
            dependent_on: draft.dependent_on,
            dependency_offset: draft.dependency_offset,
            cost: draft.cost,
        };

        let mut staged = self.fireworks.clone();
        staged.insert(id, firework);
        resolver::resolve(&mut staged)?;

        self.fireworks = staged;
        self.order.push(id);
        debug!(%id, count = self.fireworks.len(), "Added firework");
        Ok(id)
    }

    /// Apply a batch of field changes atomically with the default
    /// [`ConstraintPolicy::Advisory`].
    ///
    /// # Errors
    ///
    /// See [`update_with_policy`](Self::update_with_policy).
    pub fn update(
        &mut self,
        id: FireworkId,
        patch: FireworkPatch,
    ) -> Result<(), TimelineError> {
        self.update_with_policy(id, patch, ConstraintPolicy::Advisory)
    }

    /// Apply a batch of field changes atomically, then re-resolve.
    ///
    /// All checks run before anything is written, and the resolve runs on
    /// a staged copy, so the patch is all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::FireworkNotFound`] for an unknown ID, the
    /// field-validation errors of [`add`](Self::add),
    /// [`TimelineError::SelfDependency`] /
    /// [`TimelineError::DependencyCycle`] when the new dependency would
    /// break the forest, and [`TimelineError::StartCeilingExceeded`] under
    /// [`ConstraintPolicy::Enforce`].
    pub fn update_with_policy(
        &mut self,
        id: FireworkId,
        patch: FireworkPatch,
        policy: ConstraintPolicy,
    ) -> Result<(), TimelineError> {
        let current = self
            .fireworks
            .get(&id)
            .ok_or(TimelineError::FireworkNotFound(id))?;

        if let Some(name) = &patch.name {
            validator::ensure_name(name)?;
        }
        if let Some(value) = patch.fuse_duration {
            validator::ensure_positive("fuse_duration", value)?;
        }
        if let Some(value) = patch.effect_duration {
            validator::ensure_positive("effect_duration", value)?;
        }
        if let Some(value) = patch.start_time {
            validator::ensure_non_negative("start_time", value)?;
        }
        if let Some(value) = patch.cost {
            validator::ensure_non_negative("cost", value)?;
        }

        let new_parent = match patch.dependent_on {
            Some(Some(parent)) => {
                if !self.fireworks.contains_key(&parent) {
                    return Err(TimelineError::UnknownDependency(parent));
                }
                validator::ensure_no_cycle(&self.fireworks, id, parent)?;
                Some(parent)
            }
            Some(None) => None,
            None => current.dependent_on,
        };

        // The ceiling only constrains direct start edits on fireworks that
        // end up without a dependency of their own.
        if policy == ConstraintPolicy::Enforce
            && new_parent.is_none()
            && let Some(requested) = patch.start_time
            && let Some(ceiling) = validator::max_allowed_start(&self.fireworks, id)
            && requested > ceiling
        {
            return Err(TimelineError::StartCeilingExceeded {
                firework: id,
                requested,
                ceiling,
            });
        }

        let mut staged = self.fireworks.clone();
        if let Some(firework) = staged.get_mut(&id) {
            if let Some(name) = patch.name {
                firework.name = name;
            }
            if let Some(value) = patch.start_time {
                firework.start_time = value;
            }
            if let Some(value) = patch.fuse_duration {
                firework.fuse_duration = value;
            }
            if let Some(value) = patch.effect_duration {
                firework.effect_duration = value;
            }
            if let Some(value) = patch.cost {
                firework.cost = value;
            }
            match patch.dependent_on {
                Some(Some(parent)) => {
                    firework.dependent_on = Some(parent);
                    if let Some(offset) = patch.dependency_offset {
                        firework.dependency_offset = offset;
                    }
                }
                Some(None) => {
                    // The last resolved start freezes as the authoritative
                    // start; the stale offset is zeroed.
                    firework.dependent_on = None;
                    firework.dependency_offset = Decimal::ZERO;
                }
                None => {
                    if let Some(offset) = patch.dependency_offset {
                        firework.dependency_offset = offset;
                    }
                }
            }
        }
        resolver::resolve(&mut staged)?;

        self.fireworks = staged;
        debug!(%id, "Updated firework");
        Ok(())
    }

    /// Remove a firework, repair its dependents, and re-resolve.
    ///
    /// Every firework that depended on the removed one has its dependency
    /// cleared and its offset zeroed; its last resolved start time becomes
    /// authoritative. No dangling references survive.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::FireworkNotFound`] for an unknown ID.
    pub fn remove(&mut self, id: FireworkId) -> Result<(), TimelineError> {
        if !self.fireworks.contains_key(&id) {
            return Err(TimelineError::FireworkNotFound(id));
        }

        let mut staged = self.fireworks.clone();
        staged.remove(&id);
        for firework in staged.values_mut() {
            if firework.dependent_on == Some(id) {
                firework.dependent_on = None;
                firework.dependency_offset = Decimal::ZERO;
            }
        }
        resolver::resolve(&mut staged)?;

        self.fireworks = staged;
        self.order.retain(|existing| *existing != id);
        debug!(%id, remaining = self.fireworks.len(), "Removed firework");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Interchange records
    // -------------------------------------------------------------------

    /// Export all fireworks as flat interchange records in insertion order.
    ///
    /// Feeding the result back through [`from_records`](Self::from_records)
    /// reproduces an equal timeline, including listing tie-breaks.
    pub fn to_records(&self) -> Vec<Firework> {
        self.fireworks().cloned().collect()
    }

    /// Rebuild a timeline from flat interchange records.
    ///
    /// Input is untrusted: names, durations, costs, duplicate IDs,
    /// dependency targets, and acyclicity are all validated, and the
    /// derived `start_time`/`end_time` of dependents are recomputed rather
    /// than taken from the records.
    ///
    /// # Errors
    ///
    /// Returns the field-validation errors of [`add`](Self::add),
    /// [`TimelineError::DuplicateFirework`],
    /// [`TimelineError::UnknownDependency`], or the cycle errors of
    /// [`update_with_policy`](Self::update_with_policy).
    pub fn from_records(records: Vec<Firework>) -> Result<Self, TimelineError> {
        let mut fireworks: BTreeMap<FireworkId, Firework> = BTreeMap::new();
        let mut order = Vec::with_capacity(records.len());

        for record in records {
            validator::ensure_name(&record.name)?;
            validator::ensure_positive("fuse_duration", record.fuse_duration)?;
            validator::ensure_positive("effect_duration", record.effect_duration)?;
            validator::ensure_non_negative("cost", record.cost)?;
            if record.dependent_on.is_none() {
                // Authoritative starts must be valid; derived starts get
                // recomputed below regardless of what the record claims.
                validator::ensure_non_negative("start_time", record.start_time)?;
            }
            if fireworks.contains_key(&record.id) {
                return Err(TimelineError::DuplicateFirework(record.id));
            }
            order.push(record.id);
            fireworks.insert(record.id, record);
        }

        // Cross-record checks once the whole set is assembled.
        for (id, firework) in &fireworks {
            if let Some(parent) = firework.dependent_on {
                if !fireworks.contains_key(&parent) {
                    return Err(TimelineError::UnknownDependency(parent));
                }
                validator::ensure_no_cycle(&fireworks, *id, parent)?;
            }
        }

        let mut show = Self { fireworks, order };
        resolver::resolve(&mut show.fireworks)?;
        debug!(count = show.len(), "Imported timeline from records");
        Ok(show)
    }
}

impl Default for ShowTimeline {
    fn default() -> Self {
        Self::new()
    }
}
