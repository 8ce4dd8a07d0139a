use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{EntityId, EntityInfo, Event, Group, GroupId};

/// A whole tracked game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Identifier from the source record
    pub id: String,
    /// Date the game was played, as given by the source record
    pub date: Option<String>,
    pub home: Group,
    pub guest: Group,
    /// Display metadata for every entity appearing anywhere in the game
    pub directory: BTreeMap<EntityId, EntityInfo>,
    /// Plays, in record order
    pub events: Vec<Event>,
}

impl Game {
    /// Looks up the home or guest group by id.
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        [&self.home, &self.guest]
            .into_iter()
            .find(|group| group.id == id)
    }

    #[must_use]
    pub fn entity_info(&self, id: EntityId) -> Option<&EntityInfo> {
        self.directory.get(&id)
    }
}
