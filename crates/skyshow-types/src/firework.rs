//! The firework entity and the saved-show persistence envelope.
//!
//! A [`Firework`] is a single timed item on the show timeline. It burns
//! through two phases: the fuse (ignition to launch) and the effect (the
//! visible display). Its serde representation is the flat interchange record
//! used by JSON export/import and by the show repository -- one field per
//! timeline attribute, nothing nested.
//!
//! All fractional quantities (seconds, dollars) are [`Decimal`], never
//! floating point, so resolved timelines compare exactly.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{FireworkId, OwnerId, ShowId};

/// A single firework on the show timeline.
///
/// `start_time` is authoritative when `dependent_on` is `None` and derived
/// (overwritten by the timeline resolver) when a dependency is set.
/// `end_time` is always derived: `start_time + fuse_duration +
/// effect_duration`. Consumers must treat both as read-only; the timeline
/// store is the only writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Firework {
    /// Unique identifier, assigned at creation, immutable thereafter.
    pub id: FireworkId,
    /// Display label. Non-empty, but not required to be unique.
    pub name: String,
    /// Launch time in seconds from show start. Never negative.
    #[ts(as = "String")]
    pub start_time: Decimal,
    /// Length of the fuse phase in seconds. Strictly positive.
    #[ts(as = "String")]
    pub fuse_duration: Decimal,
    /// Length of the effect phase in seconds. Strictly positive.
    #[ts(as = "String")]
    pub effect_duration: Decimal,
    /// Derived: `start_time + fuse_duration + effect_duration`.
    #[ts(as = "String")]
    pub end_time: Decimal,
    /// Parent firework this one is timed against, if any.
    pub dependent_on: Option<FireworkId>,
    /// Signed offset in seconds from the parent's end time. Meaningful only
    /// when `dependent_on` is set; negative means this firework launches
    /// before its parent finishes.
    #[ts(as = "String")]
    pub dependency_offset: Decimal,
    /// Cost in dollars. Never negative. Has no effect on scheduling.
    #[ts(as = "String")]
    pub cost: Decimal,
}

impl Firework {
    /// Whether this firework's start time is derived from a dependency.
    pub const fn is_dependent(&self) -> bool {
        self.dependent_on.is_some()
    }
}

/// A saved show: the persistence envelope around a firework list.
///
/// Mirrors the document shape stored by the remote show repository: the
/// firework records plus display name, owner, and bookkeeping timestamps.
/// The timeline core never sees this type; it belongs to the storage
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ShowRecord {
    /// Unique identifier of the saved show.
    pub id: ShowId,
    /// Display name of the show.
    pub name: String,
    /// Owner the show is filed under.
    pub owner: OwnerId,
    /// The firework records, in timeline insertion order.
    pub fireworks: Vec<Firework>,
    /// When the show was first saved.
    pub created_at: DateTime<Utc>,
    /// When the show was last saved.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn make_firework() -> Firework {
        Firework {
            id: FireworkId::new(),
            name: String::from("Opening Burst"),
            start_time: dec!(0),
            fuse_duration: dec!(2),
            effect_duration: dec!(3),
            end_time: dec!(5),
            dependent_on: None,
            dependency_offset: dec!(0),
            cost: dec!(25.00),
        }
    }

    #[test]
    fn serde_record_is_flat() {
        let fw = make_firework();
        let json = serde_json::to_value(&fw).unwrap_or_default();
        let obj = json.as_object().cloned().unwrap_or_default();
        // One field per timeline attribute, nothing nested.
        assert_eq!(obj.len(), 9);
        assert!(obj.contains_key("start_time"));
        assert!(obj.contains_key("dependency_offset"));
        assert!(obj.get("dependent_on").is_some_and(serde_json::Value::is_null));
    }

    #[test]
    fn serde_roundtrip_preserves_fields() {
        let fw = make_firework();
        let json = serde_json::to_string(&fw).unwrap_or_default();
        let restored: Result<Firework, _> = serde_json::from_str(&json);
        assert_eq!(restored.ok(), Some(fw));
    }

    #[test]
    fn dependent_flag() {
        let mut fw = make_firework();
        assert!(!fw.is_dependent());
        fw.dependent_on = Some(FireworkId::new());
        assert!(fw.is_dependent());
    }
}
