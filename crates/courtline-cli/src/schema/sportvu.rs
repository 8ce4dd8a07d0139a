//! Raw SportVU-style tracking file
//!
//! ```json
//! {
//!   "gameid": "0021500492",
//!   "gamedate": "2016-01-01",
//!   "events": [
//!     {
//!       "eventId": "1",
//!       "home": { "name": "...", "teamid": 1610612766, "abbreviation": "CHA", "players": [...] },
//!       "visitor": { ... },
//!       "moments": [
//!         [1, 1451692800000, 720.0, 24.0, null, [[-1, -1, 46.1, 25.4, 5.1], [1610612766, 2744, 45.6, 25.1, 0.0]]]
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Each moment row is `[quarter, timestamp_ms, game_clock, shot_clock, unused, entities]`
//! and each entity row is `[team_id, player_id, x, y, z]`. The row with team id
//! `-1` is the ball.

use std::collections::BTreeMap;

use anyhow::Context as _;
use courtline_record::{
    BallSample, Entity, EntityId, EntityInfo, Event, Game, Group, GroupId, Moment,
};
use serde::{Deserialize, de::IgnoredAny};

const BALL_TEAM_ID: i64 = -1;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawGame {
    pub gameid: String,
    #[serde(default)]
    pub gamedate: Option<String>,
    pub events: Vec<RawEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEvent {
    #[serde(default)]
    pub event_id: Option<String>,
    pub home: RawTeam,
    pub visitor: RawTeam,
    pub moments: Vec<RawMoment>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawTeam {
    pub name: String,
    pub teamid: i64,
    pub abbreviation: String,
    #[serde(default)]
    pub players: Vec<RawPlayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawPlayer {
    pub firstname: String,
    pub lastname: String,
    pub playerid: i64,
    pub jersey: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawMoment(
    u32,
    Option<i64>,
    f64,
    Option<f64>,
    IgnoredAny,
    Vec<RawEntity>,
);

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct RawEntity(i64, i64, f64, f64, f64);

impl RawTeam {
    fn to_group(&self) -> Group {
        Group {
            id: GroupId(self.teamid),
            name: self.name.clone(),
            abbreviation: self.abbreviation.clone(),
        }
    }
}

impl From<RawMoment> for Moment {
    fn from(raw: RawMoment) -> Self {
        let RawMoment(quarter, _timestamp, game_clock, shot_clock, _, rows) = raw;
        let mut ball = None;
        let mut entities = Vec::with_capacity(rows.len());
        for RawEntity(team_id, player_id, x, y, z) in rows {
            if team_id == BALL_TEAM_ID {
                ball = Some(BallSample { x, y, z });
            } else {
                entities.push(Entity::new(EntityId(player_id), GroupId(team_id), x, y));
            }
        }
        Moment {
            quarter,
            game_clock,
            shot_clock,
            ball,
            entities,
        }
    }
}

impl RawGame {
    /// Converts into the record model.
    ///
    /// Home and guest come from the first event; the directory merges the
    /// player lists of every event.
    pub(crate) fn into_game(self) -> anyhow::Result<Game> {
        let first = self
            .events
            .first()
            .with_context(|| format!("game {} has no events", self.gameid))?;
        let home = first.home.to_group();
        let guest = first.visitor.to_group();

        let mut directory = BTreeMap::new();
        let mut events = Vec::with_capacity(self.events.len());
        for raw in self.events {
            for player in raw.home.players.iter().chain(&raw.visitor.players) {
                directory
                    .entry(EntityId(player.playerid))
                    .or_insert_with(|| EntityInfo {
                        first_name: player.firstname.clone(),
                        last_name: player.lastname.clone(),
                        jersey: player.jersey.clone(),
                    });
            }
            events.push(Event {
                id: raw.event_id,
                moments: raw.moments.into_iter().map(Moment::from).collect(),
            });
        }

        Ok(Game {
            id: self.gameid,
            date: self.gamedate,
            home,
            guest,
            directory,
            events,
        })
    }
}
