//! Synthetic games for tests
//!
//! Every player's position is derived from its id and the moment's clock
//! (`x = id`, `y = game_clock`), so expected tensor contents can be written
//! down directly.

use std::collections::BTreeMap;

use courtline_record::{Entity, EntityId, EntityInfo, Event, Game, Group, GroupId, Moment};

pub(crate) const HOME: GroupId = GroupId(10);
pub(crate) const AWAY: GroupId = GroupId(20);

#[expect(clippy::cast_precision_loss)]
pub(crate) fn moment(quarter: u32, game_clock: f64, groups: &[(GroupId, &[i64])]) -> Moment {
    let entities = groups
        .iter()
        .flat_map(|(group, ids)| {
            ids.iter()
                .map(move |id| Entity::new(EntityId(*id), *group, *id as f64, game_clock))
        })
        .collect();
    Moment::new(quarter, game_clock, entities)
}

/// An event whose moments all carry the same players.
pub(crate) fn event(quarter: u32, clocks: &[f64], groups: &[(GroupId, &[i64])]) -> Event {
    Event::new(
        clocks
            .iter()
            .map(|clock| moment(quarter, *clock, groups))
            .collect(),
    )
}

/// Wraps events into a game whose directory lists every player seen.
pub(crate) fn game(events: Vec<Event>) -> Game {
    let directory = events
        .iter()
        .flat_map(|event| &event.moments)
        .flat_map(|moment| moment.entity_ids())
        .map(|id| {
            let info = EntityInfo {
                first_name: "Player".to_owned(),
                last_name: id.to_string(),
                jersey: id.to_string(),
            };
            (id, info)
        })
        .collect::<BTreeMap<_, _>>();
    Game {
        id: "0021500492".to_owned(),
        date: None,
        home: Group {
            id: HOME,
            name: "Charlotte Hornets".to_owned(),
            abbreviation: "CHA".to_owned(),
        },
        guest: Group {
            id: AWAY,
            name: "Toronto Raptors".to_owned(),
            abbreviation: "TOR".to_owned(),
        },
        directory,
        events,
    }
}
