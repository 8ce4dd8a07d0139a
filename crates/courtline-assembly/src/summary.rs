//! Summary figures for a game and its selected plays

use std::fmt;

use courtline_record::Game;
use serde::Serialize;

use crate::selection::Selection;

/// Number of moments of every event, in record order.
#[must_use]
pub fn moment_counts(game: &Game) -> Vec<usize> {
    game.events.iter().map(|event| event.len()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionSummary {
    pub num_plays: usize,
    /// Game-clock seconds covered by the selected plays
    pub total_seconds: f64,
    /// `T_grand` of the stacked layout
    pub total_moments: usize,
    /// `T_max` of the padded layout
    pub max_moments: usize,
}

impl SelectionSummary {
    #[must_use]
    pub fn from_selection(game: &Game, selection: &Selection) -> Self {
        let lengths = selection
            .events(game)
            .map(|(_play, event)| event.len())
            .collect::<Vec<_>>();
        Self {
            num_plays: selection.len(),
            total_seconds: selection.plays().iter().map(|play| play.duration()).sum(),
            total_moments: lengths.iter().sum(),
            max_moments: lengths.iter().copied().max().unwrap_or(0),
        }
    }

    #[must_use]
    pub fn total_minutes(&self) -> f64 {
        self.total_seconds / 60.0
    }
}

impl fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "When starters were in, there were {} plays totaling {:.02} mins",
            self.num_plays,
            self.total_minutes()
        )
    }
}
