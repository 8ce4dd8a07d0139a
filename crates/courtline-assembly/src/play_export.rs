//! Export of a single play with every player on the court
//!
//! Unlike the roster-based layouts, the entity axis here covers all players
//! of the play's first moment, from both groups, in the order they appear
//! there.

use std::collections::HashMap;

use courtline_record::{EntityId, Game};
use ndarray::Array3;
use serde::Serialize;

use crate::{
    roster::GroupLabel,
    tensor::{COORDINATES, MISSING},
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum PlayExportError {
    #[display("event index {index} is out of range (the game has {num_events} events)")]
    EventOutOfRange { index: usize, num_events: usize },
    #[display("event {index} has no moments")]
    EmptyEvent { index: usize },
}

/// Who occupies one column of the entity axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayColumn {
    pub index: usize,
    pub id: EntityId,
    pub group: GroupLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayExport {
    pub event_index: usize,
    pub columns: Vec<PlayColumn>,
    /// `(T, J_all, 2)`
    pub positions: Array3<f64>,
}

impl PlayExport {
    pub fn from_event(game: &Game, index: usize) -> Result<Self, PlayExportError> {
        let event = game
            .events
            .get(index)
            .ok_or(PlayExportError::EventOutOfRange {
                index,
                num_events: game.events.len(),
            })?;
        let first = event
            .first_moment()
            .ok_or(PlayExportError::EmptyEvent { index })?;

        let mut columns: Vec<PlayColumn> = vec![];
        let mut column_of = HashMap::new();
        for entity in &first.entities {
            column_of.entry(entity.id).or_insert_with(|| {
                columns.push(PlayColumn {
                    index: columns.len(),
                    id: entity.id,
                    group: GroupLabel::resolve(game, entity.group),
                });
                columns.len() - 1
            });
        }

        let mut positions = Array3::from_elem((event.len(), columns.len(), COORDINATES), MISSING);
        for (mut cells, moment) in positions.outer_iter_mut().zip(&event.moments) {
            for entity in &moment.entities {
                if let Some(&j) = column_of.get(&entity.id) {
                    cells[[j, 0]] = entity.x;
                    cells[[j, 1]] = entity.y;
                }
            }
        }

        Ok(Self {
            event_index: index,
            columns,
            positions,
        })
    }
}
