//! Play selection
//!
//! Scans a game's events once, left to right, and keeps the plays that
//!
//! - carry at least one moment,
//! - have every roster member on the court in their first moment, and
//! - start strictly before the previously kept play ended (game clocks count
//!   down, so "before" means a smaller clock value).
//!
//! Two values carry over from one event to the next: the quarter being
//! scanned and the *boundary clock*, the end time of the last kept play.
//! Entering a later quarter resets the boundary clock to the quarter length.
//! The scan is an explicit fold over [`ScanState`], so a single step can be
//! driven and inspected on its own with [`PlaySelector::step`].
//!
//! Every non-empty event produces a [`SelectionDiagnostic`], logged at
//! `debug` level and handed to the observer of [`PlaySelector::select_with`].
//!
//! # Examples
//!
//! ```no_run
//! use courtline_assembly::{
//!     roster::Roster,
//!     selection::{PlaySelector, SelectionConfig},
//! };
//! use courtline_record::Game;
//!
//! let game: Game = todo!();
//! let roster = Roster::resolve(&game)?;
//! let selection = PlaySelector::new(SelectionConfig::default()).select(&game, &roster);
//! for play in selection.plays() {
//!     println!("event {} ({:.1}s)", play.event_index, play.duration());
//! }
//! # Ok::<(), courtline_assembly::roster::RosterError>(())
//! ```

use std::fmt;

use courtline_record::{Event, Game};
use serde::Serialize;

use crate::roster::Roster;

/// Nominal quarter length in seconds.
pub const QUARTER_LENGTH: f64 = 720.0;

/// How the scan catches up when an event's quarter is ahead of the current one.
///
/// The two policies only differ when a quarter is skipped entirely, i.e. an
/// event arrives more than one quarter ahead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::Display)]
pub enum QuarterAdvance {
    /// Move straight to the event's quarter.
    #[default]
    #[display("jump")]
    Jump,
    /// Move forward by a single quarter. Every following event that is still
    /// ahead triggers another advance and another boundary reset.
    #[display("step")]
    Step,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionConfig {
    /// Value the boundary clock takes at the start of each quarter
    pub quarter_length: f64,
    pub quarter_advance: QuarterAdvance,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            quarter_length: QUARTER_LENGTH,
            quarter_advance: QuarterAdvance::default(),
        }
    }
}

/// An accepted play, with the time bounds it was accepted under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectedPlay {
    /// Position of the event in the game's record order
    pub event_index: usize,
    pub quarter: u32,
    /// Game clock of the first moment
    pub start_time: f64,
    /// Game clock of the last moment
    pub end_time: f64,
}

impl SelectedPlay {
    /// Elapsed game-clock seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.start_time - self.end_time
    }
}

/// Accepted plays, in record order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    plays: Vec<SelectedPlay>,
}

impl Selection {
    #[must_use]
    pub fn plays(&self) -> &[SelectedPlay] {
        &self.plays
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plays.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn event_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.plays.iter().map(|play| play.event_index)
    }

    /// Iterates over accepted plays paired with their events.
    ///
    /// # Panics
    ///
    /// Panics if the selection was made from a different game with fewer events.
    pub fn events<'a>(
        &'a self,
        game: &'a Game,
    ) -> impl Iterator<Item = (&'a SelectedPlay, &'a Event)> + 'a {
        self.plays
            .iter()
            .map(move |play| (play, &game.events[play.event_index]))
    }
}

/// State carried from one scanned event to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanState {
    pub current_quarter: u32,
    /// A candidate play must start strictly below this clock value
    pub boundary_clock: f64,
}

impl ScanState {
    #[must_use]
    pub fn new(config: &SelectionConfig) -> Self {
        Self {
            current_quarter: 1,
            boundary_clock: config.quarter_length,
        }
    }
}

/// Per-event trace of the selection filter.
///
/// `boundary_clock` is the value after the event was processed, so for an
/// accepted play it equals the play's end time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionDiagnostic {
    pub event_index: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub boundary_clock: f64,
    pub event_quarter: u32,
    pub current_quarter: u32,
    pub contains_roster: bool,
    pub is_non_overlapping: bool,
}

impl SelectionDiagnostic {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.contains_roster && self.is_non_overlapping
    }
}

impl fmt::Display for SelectionDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "start: {:.02}. end: {:.02}. game clock at end of prev play: {:.02}. \
             event quarter: {}. current quarter {} starters: {}. overlap: {}",
            self.start_time,
            self.end_time,
            self.boundary_clock,
            self.event_quarter,
            self.current_quarter,
            TraceFlag(self.contains_roster),
            TraceFlag(self.is_non_overlapping),
        )
    }
}

/// Boolean rendered as `True`/`False` in trace lines.
struct TraceFlag(bool);

impl fmt::Display for TraceFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "True" } else { "False" })
    }
}

/// Outcome of scanning one non-empty event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanStep {
    pub state: ScanState,
    pub accepted: Option<SelectedPlay>,
    pub diagnostic: SelectionDiagnostic,
}

#[derive(Debug, Clone, Default)]
pub struct PlaySelector {
    config: SelectionConfig,
}

impl PlaySelector {
    #[must_use]
    pub fn new(config: SelectionConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    #[must_use]
    pub fn select(&self, game: &Game, roster: &Roster) -> Selection {
        self.select_with(game, roster, |_| {})
    }

    /// Scans the game and calls `observe` with the diagnostic of every
    /// non-empty event, in record order.
    pub fn select_with<F>(&self, game: &Game, roster: &Roster, mut observe: F) -> Selection
    where
        F: FnMut(&SelectionDiagnostic),
    {
        let initial = (ScanState::new(&self.config), Vec::new());
        let (_state, plays) = game.events.iter().enumerate().fold(
            initial,
            |(state, mut plays), (event_index, event)| {
                let Some(step) = self.step(state, event_index, event, roster) else {
                    return (state, plays);
                };
                log::debug!("event {event_index}: {}", step.diagnostic);
                observe(&step.diagnostic);
                plays.extend(step.accepted);
                (step.state, plays)
            },
        );
        Selection { plays }
    }

    /// Applies the selection filter to a single event.
    ///
    /// Returns `None` for an event without moments; such events leave the
    /// state untouched.
    #[must_use]
    pub fn step(
        &self,
        mut state: ScanState,
        event_index: usize,
        event: &Event,
        roster: &Roster,
    ) -> Option<ScanStep> {
        let first = event.first_moment()?;
        let last = event.last_moment()?;
        let event_quarter = first.quarter;

        if event_quarter > state.current_quarter {
            if event_quarter - state.current_quarter > 1 {
                log::warn!(
                    "event {event_index}: quarter jumps from {} to {event_quarter} (advance policy: {})",
                    state.current_quarter,
                    self.config.quarter_advance,
                );
            }
            state.current_quarter = match self.config.quarter_advance {
                QuarterAdvance::Jump => event_quarter,
                QuarterAdvance::Step => state.current_quarter + 1,
            };
            state.boundary_clock = self.config.quarter_length;
        }

        let start_time = first.game_clock;
        let end_time = last.game_clock;
        let contains_roster = roster.is_contained_in(first);
        let is_non_overlapping = start_time < state.boundary_clock;

        let accepted = (contains_roster && is_non_overlapping).then(|| {
            state.boundary_clock = end_time;
            SelectedPlay {
                event_index,
                quarter: event_quarter,
                start_time,
                end_time,
            }
        });

        let diagnostic = SelectionDiagnostic {
            event_index,
            start_time,
            end_time,
            boundary_clock: state.boundary_clock,
            event_quarter,
            current_quarter: state.current_quarter,
            contains_roster,
            is_non_overlapping,
        };
        Some(ScanStep {
            state,
            accepted,
            diagnostic,
        })
    }
}
