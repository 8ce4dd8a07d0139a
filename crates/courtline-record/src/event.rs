use serde::{Deserialize, Serialize};

use crate::{BallSample, Entity, EntityId};

/// One tracking sample: clock metadata plus every player on the court.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    /// Period index, starting at 1
    pub quarter: u32,
    /// Seconds remaining in the quarter
    pub game_clock: f64,
    /// Seconds remaining on the shot clock, if it was running
    pub shot_clock: Option<f64>,
    /// Ball position, if the ball was tracked at this instant
    pub ball: Option<BallSample>,
    /// Players present at this instant, in record order
    pub entities: Vec<Entity>,
}

impl Moment {
    #[must_use]
    pub fn new(quarter: u32, game_clock: f64, entities: Vec<Entity>) -> Self {
        Self {
            quarter,
            game_clock,
            shot_clock: None,
            ball: None,
            entities,
        }
    }

    /// Iterates over the ids of the players present, in record order.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().map(|entity| entity.id)
    }

    #[must_use]
    pub fn contains_entity(&self, id: EntityId) -> bool {
        self.entities.iter().any(|entity| entity.id == id)
    }
}

/// A contiguous span of play, sampled as an ordered list of moments.
///
/// An event may carry no moments at all. Such events are degenerate: every
/// accessor that depends on a moment returns `None` for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Identifier from the source record, if any
    pub id: Option<String>,
    pub moments: Vec<Moment>,
}

impl Event {
    #[must_use]
    pub fn new(moments: Vec<Moment>) -> Self {
        Self { id: None, moments }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moments.len()
    }

    #[must_use]
    pub fn first_moment(&self) -> Option<&Moment> {
        self.moments.first()
    }

    #[must_use]
    pub fn last_moment(&self) -> Option<&Moment> {
        self.moments.last()
    }

    /// Quarter of the first moment
    #[must_use]
    pub fn quarter(&self) -> Option<u32> {
        self.first_moment().map(|moment| moment.quarter)
    }

    /// Game clock of the first moment
    #[must_use]
    pub fn start_time(&self) -> Option<f64> {
        self.first_moment().map(|moment| moment.game_clock)
    }

    /// Game clock of the last moment
    #[must_use]
    pub fn end_time(&self) -> Option<f64> {
        self.last_moment().map(|moment| moment.game_clock)
    }
}
