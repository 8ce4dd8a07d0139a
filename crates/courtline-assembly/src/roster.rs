//! Roster resolution
//!
//! The roster is the fixed, index-stable list of players whose positions end
//! up in the output tensors. It is seeded once from the first moment of the
//! first event: every player of the first-encountered group (the *focal*
//! group) becomes a roster member, in the order they appear in that moment.
//! The member's position in that list is its coordinate on the tensor's
//! entity axis for the lifetime of the assembly.
//!
//! # Examples
//!
//! ```no_run
//! use courtline_assembly::roster::Roster;
//! use courtline_record::Game;
//!
//! let game: Game = todo!();
//! let roster = Roster::resolve(&game)?;
//! for (j, member) in roster.members().iter().enumerate() {
//!     println!("{j}: {}", member.id);
//! }
//! # Ok::<(), courtline_assembly::roster::RosterError>(())
//! ```

use std::collections::{HashMap, HashSet};

use courtline_record::{EntityId, EntityInfo, Game, GroupId, Moment};
use serde::Serialize;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum RosterError {
    #[display("cannot resolve roster: the first event has no moments or no players")]
    Empty,
    #[display(
        "cannot resolve roster: found {num_groups} groups in the seeding moment, expected at most 2"
    )]
    Ambiguous { num_groups: usize },
}

/// Display label of a group, resolved against the game's home and guest groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupLabel {
    pub id: GroupId,
    pub name: String,
    pub abbreviation: String,
}

impl GroupLabel {
    pub(crate) fn resolve(game: &Game, id: GroupId) -> Self {
        match game.group(id) {
            Some(group) => Self {
                id,
                name: group.name.clone(),
                abbreviation: group.abbreviation.clone(),
            },
            None => Self {
                id,
                name: id.to_string(),
                abbreviation: id.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterMember {
    pub id: EntityId,
    /// Name and jersey from the game's directory, if listed there
    pub info: Option<EntityInfo>,
}

/// Fixed, ordered set of tracked players from the focal group.
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    focal: GroupLabel,
    opponent: Option<GroupLabel>,
    members: Vec<RosterMember>,
    #[serde(skip)]
    index: HashMap<EntityId, usize>,
}

impl Roster {
    /// Resolves the roster from the first moment of the game's first event.
    pub fn resolve(game: &Game) -> Result<Self, RosterError> {
        let moment = game
            .events
            .first()
            .and_then(|event| event.first_moment())
            .ok_or(RosterError::Empty)?;
        Self::from_moment(game, moment)
    }

    /// Seeds a roster from an arbitrary moment.
    ///
    /// The first player in the moment determines the focal group. A player
    /// listed twice keeps its first position.
    pub fn from_moment(game: &Game, moment: &Moment) -> Result<Self, RosterError> {
        let mut groups: Vec<GroupId> = vec![];
        for entity in &moment.entities {
            if !groups.contains(&entity.group) {
                groups.push(entity.group);
            }
        }
        let (focal, opponent) = match groups[..] {
            [] => return Err(RosterError::Empty),
            [focal] => (focal, None),
            [focal, opponent] => (focal, Some(opponent)),
            _ => {
                return Err(RosterError::Ambiguous {
                    num_groups: groups.len(),
                });
            }
        };

        let mut members = vec![];
        let mut index = HashMap::new();
        for entity in moment.entities.iter().filter(|e| e.group == focal) {
            if index.contains_key(&entity.id) {
                continue;
            }
            index.insert(entity.id, members.len());
            members.push(RosterMember {
                id: entity.id,
                info: game.entity_info(entity.id).cloned(),
            });
        }

        Ok(Self {
            focal: GroupLabel::resolve(game, focal),
            opponent: opponent.map(|id| GroupLabel::resolve(game, id)),
            members,
            index,
        })
    }

    /// Number of members, the size of the entity axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false` for a resolved roster.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn members(&self) -> &[RosterMember] {
        &self.members
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.members.iter().map(|member| member.id)
    }

    /// Entity-axis index of `id`, or `None` if `id` is not on the roster.
    #[must_use]
    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    #[must_use]
    pub fn focal(&self) -> &GroupLabel {
        &self.focal
    }

    /// The other group seen in the seeding moment, if there was one.
    #[must_use]
    pub fn opponent(&self) -> Option<&GroupLabel> {
        self.opponent.as_ref()
    }

    /// Returns `true` if every member appears among the moment's players.
    #[must_use]
    pub fn is_contained_in(&self, moment: &Moment) -> bool {
        let present = moment
            .entities
            .iter()
            .filter(|entity| self.index.contains_key(&entity.id))
            .map(|entity| entity.id)
            .collect::<HashSet<_>>();
        present.len() == self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use courtline_record::{Entity, Event};

    use super::*;
    use crate::fixture::{self, AWAY, HOME};

    #[test]
    fn test_focal_group_is_first_encountered() {
        let game = fixture::game(vec![fixture::event(
            1,
            &[700.0],
            &[(HOME, &[11, 12, 13]), (AWAY, &[21, 22])],
        )]);
        let roster = Roster::resolve(&game).unwrap();

        assert_eq!(roster.len(), 3);
        assert_eq!(
            roster.ids().collect::<Vec<_>>(),
            [EntityId(11), EntityId(12), EntityId(13)]
        );
        assert_eq!(roster.focal().abbreviation, "CHA");
        assert_eq!(roster.opponent().unwrap().abbreviation, "TOR");
        assert_eq!(roster.index_of(EntityId(12)), Some(1));
        assert_eq!(roster.index_of(EntityId(21)), None);
    }

    #[test]
    fn test_member_order_follows_first_appearance() {
        let moment = Moment::new(
            1,
            720.0,
            vec![
                Entity::new(EntityId(30), AWAY, 0.0, 0.0),
                Entity::new(EntityId(5), HOME, 0.0, 0.0),
                Entity::new(EntityId(31), AWAY, 0.0, 0.0),
                Entity::new(EntityId(4), AWAY, 0.0, 0.0),
            ],
        );
        let game = fixture::game(vec![Event::new(vec![moment])]);
        let roster = Roster::resolve(&game).unwrap();

        assert_eq!(roster.focal().id, AWAY);
        assert_eq!(
            roster.ids().collect::<Vec<_>>(),
            [EntityId(30), EntityId(31), EntityId(4)]
        );
    }

    #[test]
    fn test_duplicate_ids_keep_first_index() {
        let moment = Moment::new(
            1,
            720.0,
            vec![
                Entity::new(EntityId(1), HOME, 0.0, 0.0),
                Entity::new(EntityId(2), HOME, 0.0, 0.0),
                Entity::new(EntityId(1), HOME, 1.0, 1.0),
            ],
        );
        let game = fixture::game(vec![Event::new(vec![moment])]);
        let roster = Roster::resolve(&game).unwrap();

        let unique = roster.ids().collect::<HashSet<_>>();
        assert_eq!(unique.len(), roster.len());
        assert_eq!(roster.index_of(EntityId(1)), Some(0));
        assert_eq!(roster.index_of(EntityId(2)), Some(1));
    }

    #[test]
    fn test_directory_metadata_is_attached() {
        let game = fixture::game(vec![fixture::event(1, &[700.0], &[(HOME, &[11])])]);
        let roster = Roster::resolve(&game).unwrap();

        let info = roster.members()[0].info.as_ref().unwrap();
        assert_eq!(info.jersey, "11");
        assert!(roster.opponent().is_none());
    }

    #[test]
    fn test_unknown_group_falls_back_to_id() {
        let game = fixture::game(vec![fixture::event(
            1,
            &[700.0],
            &[(GroupId(99), &[1, 2])],
        )]);
        let roster = Roster::resolve(&game).unwrap();
        assert_eq!(roster.focal().abbreviation, "99");
    }

    #[test]
    fn test_empty_first_event_fails() {
        let game = fixture::game(vec![
            Event::default(),
            fixture::event(1, &[700.0], &[(HOME, &[1])]),
        ]);
        assert!(Roster::resolve(&game).unwrap_err().is_empty());

        let game = fixture::game(vec![]);
        assert!(Roster::resolve(&game).unwrap_err().is_empty());
    }

    #[test]
    fn test_first_moment_without_players_fails() {
        let game = fixture::game(vec![Event::new(vec![Moment::new(1, 720.0, vec![])])]);
        assert!(Roster::resolve(&game).unwrap_err().is_empty());
    }

    #[test]
    fn test_more_than_two_groups_fails() {
        let game = fixture::game(vec![fixture::event(
            1,
            &[700.0],
            &[(HOME, &[1]), (AWAY, &[2]), (GroupId(3), &[3])],
        )]);
        let err = Roster::resolve(&game).unwrap_err();
        assert!(matches!(err, RosterError::Ambiguous { num_groups: 3 }));
        assert!(err.to_string().contains("3 groups"));
    }

    #[test]
    fn test_containment() {
        let game = fixture::game(vec![fixture::event(
            1,
            &[700.0],
            &[(HOME, &[1, 2]), (AWAY, &[3])],
        )]);
        let roster = Roster::resolve(&game).unwrap();

        let full = fixture::moment(1, 690.0, &[(HOME, &[2, 1, 9])]);
        let partial = fixture::moment(1, 690.0, &[(HOME, &[1]), (AWAY, &[3])]);
        assert!(roster.is_contained_in(&full));
        assert!(!roster.is_contained_in(&partial));
    }
}
