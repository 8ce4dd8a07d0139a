use serde::{Deserialize, Serialize};

/// Stable identity of a tracked player, unique within a game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct EntityId(pub i64);

/// Identity of a group (team) an entity is affiliated with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct GroupId(pub i64);

/// One player's position within a single moment.
///
/// Entities are per-moment snapshots. Identity across moments is carried by
/// [`Entity::id`] only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub group: GroupId,
    pub x: f64,
    pub y: f64,
}

impl Entity {
    #[must_use]
    pub fn new(id: EntityId, group: GroupId, x: f64, y: f64) -> Self {
        Self { id, group, x, y }
    }
}

/// Position of the ball within a single moment.
///
/// `z` is the height above the court.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Display metadata for an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub first_name: String,
    pub last_name: String,
    /// Jersey number as printed (may carry leading zeros, e.g. `"00"`)
    pub jersey: String,
}

impl EntityInfo {
    /// Full display name, `"first last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A named affiliation (team)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub abbreviation: String,
}
