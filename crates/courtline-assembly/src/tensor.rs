//! Tensor assembly
//!
//! Packs the position streams of the selected plays into dense arrays. Two
//! layouts are available, both implementing [`PackingStrategy`]:
//!
//! - [`Padded`] produces one `(E, T_max, J, 2)` array. Play `e` occupies
//!   `[e, 0..len_e, .., ..]` and the rest of its time axis is padding.
//! - [`Stacked`] concatenates all plays along the time axis into one
//!   `(T_grand, J, 2)` array, plus an `(E + 1,)` boundary index
//!   `end_times = [-1, t_1, ..., t_E]` where `t_e` is the running moment
//!   count after play `e`. With at least one play `end_times[E]` equals
//!   `T_grand`; an empty selection yields a `(0, J, 2)` array and
//!   `end_times = [-1]`.
//!
//! `E` is the number of selected plays, `J` the roster size, and the last
//! axis holds the `(x, y)` coordinates.
//!
//! Every cell starts as [`MISSING`]. Only roster members present in a moment
//! overwrite their cells, so absent players and padding stay missing; other
//! players and the ball are ignored.
//!
//! # Slicing a stacked play
//!
//! `end_times[e]` is the number of moments in plays `1..=e`, so play `e`
//! (1-indexed) occupies the 0-based timesteps `end_times[e-1]..end_times[e]`,
//! reading the leading `-1` sentinel as `0`. [`StackedPlays::play_range`]
//! computes this range.
//!
//! ```no_run
//! use courtline_assembly::{
//!     pipeline::Assembly,
//!     selection::SelectionConfig,
//!     tensor::{Padded, Stacked},
//! };
//! use courtline_record::Game;
//!
//! let game: Game = todo!();
//! let assembly = Assembly::run(&game, SelectionConfig::default())?;
//!
//! let padded = assembly.pack(&game, &Padded);
//! let stacked = assembly.pack(&game, &Stacked);
//! assert_eq!(padded.num_plays(), stacked.num_plays());
//! let first_play = stacked.play(1);
//! # Ok::<(), courtline_assembly::roster::RosterError>(())
//! ```

use std::ops::Range;

use courtline_record::{Game, Moment};
use ndarray::{Array1, Array3, Array4, ArrayView3, ArrayViewMut2, Axis, s};
use serde::Serialize;

use crate::{roster::Roster, selection::Selection};

/// Marker for a cell with no coordinate sample.
///
/// NaN never compares equal to a coordinate, including itself. Test cells
/// with [`is_missing`].
pub const MISSING: f64 = f64::NAN;

/// Number of coordinates per cell (`x`, `y`)
pub const COORDINATES: usize = 2;

/// First entry of a stacked boundary index
pub const BOUNDARY_SENTINEL: i64 = -1;

#[must_use]
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// A way of packing selected plays into arrays.
pub trait PackingStrategy {
    type Output;

    fn pack(&self, game: &Game, roster: &Roster, selection: &Selection) -> Self::Output;
}

/// Writes the `(x, y)` of every roster member present in `moment` into the
/// `(J, 2)` slice `cells`.
fn write_moment(mut cells: ArrayViewMut2<'_, f64>, moment: &Moment, roster: &Roster) {
    for entity in &moment.entities {
        let Some(j) = roster.index_of(entity.id) else {
            continue;
        };
        cells[[j, 0]] = entity.x;
        cells[[j, 1]] = entity.y;
    }
}

/// One padded block per play
#[derive(Debug, Clone, Copy, Default)]
pub struct Padded;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaddedPlays {
    /// `(E, T_max, J, 2)`
    pub positions: Array4<f64>,
    /// Moment count of each play, in selection order
    pub lengths: Vec<usize>,
}

impl PaddedPlays {
    #[must_use]
    pub fn num_plays(&self) -> usize {
        self.positions.len_of(Axis(0))
    }

    #[must_use]
    pub fn max_moments(&self) -> usize {
        self.positions.len_of(Axis(1))
    }

    /// The `(len_e, J, 2)` block of play `e` (0-indexed), without padding.
    #[must_use]
    pub fn play(&self, e: usize) -> ArrayView3<'_, f64> {
        self.positions.slice(s![e, ..self.lengths[e], .., ..])
    }
}

impl PackingStrategy for Padded {
    type Output = PaddedPlays;

    fn pack(&self, game: &Game, roster: &Roster, selection: &Selection) -> PaddedPlays {
        let lengths = selection
            .events(game)
            .map(|(_play, event)| event.len())
            .collect::<Vec<_>>();
        let max_moments = lengths.iter().copied().max().unwrap_or(0);
        let mut positions = Array4::from_elem(
            (lengths.len(), max_moments, roster.len(), COORDINATES),
            MISSING,
        );

        for (mut block, (_play, event)) in positions.outer_iter_mut().zip(selection.events(game)) {
            for (cells, moment) in block.outer_iter_mut().zip(&event.moments) {
                write_moment(cells, moment, roster);
            }
        }

        PaddedPlays { positions, lengths }
    }
}

/// All plays concatenated along the time axis
#[derive(Debug, Clone, Copy, Default)]
pub struct Stacked;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedPlays {
    /// `(T_grand, J, 2)`
    pub positions: Array3<f64>,
    /// `(E + 1,)`, `[-1, t_1, ..., t_E]`
    pub end_times: Array1<i64>,
}

impl StackedPlays {
    #[must_use]
    pub fn num_plays(&self) -> usize {
        self.end_times.len() - 1
    }

    #[must_use]
    pub fn total_moments(&self) -> usize {
        self.positions.len_of(Axis(0))
    }

    /// 0-based timestep range of play `e`, 1-indexed like `end_times`.
    ///
    /// # Panics
    ///
    /// Panics if `e` is 0 or greater than the number of plays.
    #[must_use]
    #[expect(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn play_range(&self, e: usize) -> Range<usize> {
        assert!(
            (1..=self.num_plays()).contains(&e),
            "play index {e} out of range 1..={}",
            self.num_plays()
        );
        let start = self.end_times[e - 1].max(0) as usize;
        let end = self.end_times[e] as usize;
        start..end
    }

    /// The `(len_e, J, 2)` block of play `e`, 1-indexed like `end_times`.
    #[must_use]
    pub fn play(&self, e: usize) -> ArrayView3<'_, f64> {
        self.positions.slice(s![self.play_range(e), .., ..])
    }
}

/// Global starting timestep of each play, followed by the grand total.
///
/// Plays can be written independently once these offsets are known.
#[must_use]
pub fn play_offsets(lengths: &[usize]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(lengths.len() + 1);
    offsets.push(0);
    let mut total = 0;
    for len in lengths {
        total += len;
        offsets.push(total);
    }
    offsets
}

impl PackingStrategy for Stacked {
    type Output = StackedPlays;

    #[expect(clippy::cast_possible_wrap)]
    fn pack(&self, game: &Game, roster: &Roster, selection: &Selection) -> StackedPlays {
        let lengths = selection
            .events(game)
            .map(|(_play, event)| event.len())
            .collect::<Vec<_>>();
        let offsets = play_offsets(&lengths);
        let total_moments = offsets.last().copied().unwrap_or(0);
        let mut positions =
            Array3::from_elem((total_moments, roster.len(), COORDINATES), MISSING);

        for ((_play, event), window) in selection.events(game).zip(offsets.windows(2)) {
            let mut block = positions.slice_mut(s![window[0]..window[1], .., ..]);
            for (cells, moment) in block.outer_iter_mut().zip(&event.moments) {
                write_moment(cells, moment, roster);
            }
        }

        let end_times = std::iter::once(BOUNDARY_SENTINEL)
            .chain(offsets[1..].iter().map(|&t| t as i64))
            .collect::<Array1<_>>();
        if !lengths.is_empty() {
            debug_assert_eq!(end_times[lengths.len()], total_moments as i64);
        }

        StackedPlays {
            positions,
            end_times,
        }
    }
}

#[cfg(test)]
mod tests {
    use courtline_record::{Entity, EntityId, Event, Moment};
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;
    use crate::{
        fixture::{self, AWAY, HOME},
        selection::{PlaySelector, SelectionConfig},
    };

    const STARTERS: &[i64] = &[1, 2];

    fn assemble(game: &Game) -> (Roster, Selection) {
        let roster = Roster::resolve(game).unwrap();
        let selection = PlaySelector::new(SelectionConfig::default()).select(game, &roster);
        (roster, selection)
    }

    fn same_cells(a: ArrayView3<'_, f64>, b: ArrayView3<'_, f64>) -> bool {
        a.shape() == b.shape()
            && a.iter()
                .zip(b.iter())
                .all(|(x, y)| (is_missing(*x) && is_missing(*y)) || x == y)
    }

    fn scenario_game() -> Game {
        fixture::game(vec![
            fixture::event(1, &[700.0, 690.0], &[(HOME, STARTERS)]),
            Event::default(),
            fixture::event(1, &[680.0, 670.0, 660.0], &[(HOME, STARTERS)]),
        ])
    }

    #[test]
    fn test_stacked_scenario() {
        let game = scenario_game();
        let (roster, selection) = assemble(&game);
        let stacked = Stacked.pack(&game, &roster, &selection);

        assert_eq!(stacked.positions.shape(), [5, 2, 2]);
        assert_eq!(stacked.end_times.to_vec(), [-1, 2, 5]);
        assert_eq!(stacked.play_range(1), 0..2);
        assert_eq!(stacked.play_range(2), 2..5);

        // x = id, y = game clock
        assert_eq!(stacked.positions[[0, 0, 0]], 1.0);
        assert_eq!(stacked.positions[[0, 1, 0]], 2.0);
        assert_eq!(stacked.positions[[1, 1, 1]], 690.0);
        assert_eq!(stacked.positions[[2, 0, 1]], 680.0);
        assert_eq!(stacked.positions[[4, 1, 1]], 660.0);
        assert!(stacked.positions.iter().all(|v| !is_missing(*v)));
    }

    #[test]
    fn test_padded_scenario() {
        let game = scenario_game();
        let (roster, selection) = assemble(&game);
        let padded = Padded.pack(&game, &roster, &selection);

        assert_eq!(padded.positions.shape(), [2, 3, 2, 2]);
        assert_eq!(padded.lengths, [2, 3]);
        assert_eq!(padded.positions[[0, 1, 1, 1]], 690.0);
        assert_eq!(padded.positions[[1, 2, 0, 0]], 1.0);
        // The shorter play is padded with missing markers.
        assert!(
            padded
                .positions
                .slice(s![0, 2, .., ..])
                .iter()
                .all(|v| is_missing(*v))
        );
        assert_eq!(padded.play(0).shape(), [2, 2, 2]);
    }

    #[test]
    fn test_non_roster_players_are_ignored_and_absent_ones_missing() {
        let mut play = fixture::event(1, &[680.0, 670.0], &[(HOME, STARTERS), (AWAY, &[7, 8])]);
        // Player 2 leaves the court in the second moment.
        play.moments[1] = fixture::moment(1, 670.0, &[(AWAY, &[7, 8]), (HOME, &[1])]);
        let game = fixture::game(vec![play]);
        let (roster, selection) = assemble(&game);

        let stacked = Stacked.pack(&game, &roster, &selection);
        assert_eq!(stacked.positions.shape(), [2, 2, 2]);
        assert_eq!(stacked.positions[[1, 0, 0]], 1.0);
        assert!(is_missing(stacked.positions[[1, 1, 0]]));
        assert!(is_missing(stacked.positions[[1, 1, 1]]));
        assert!(!stacked.positions.iter().any(|v| *v == 7.0 || *v == 8.0));
    }

    #[test]
    fn test_zero_coordinate_is_not_missing() {
        let moment = Moment::new(1, 700.0, vec![Entity::new(EntityId(1), HOME, 0.0, 0.0)]);
        let game = fixture::game(vec![Event::new(vec![moment])]);
        let (roster, selection) = assemble(&game);

        let padded = Padded.pack(&game, &roster, &selection);
        assert_eq!(padded.positions[[0, 0, 0, 0]], 0.0);
        assert!(!is_missing(padded.positions[[0, 0, 0, 0]]));
    }

    #[test]
    fn test_empty_selection() {
        let game = fixture::game(vec![fixture::event(1, &[720.0], &[(HOME, STARTERS)])]);
        let (roster, selection) = assemble(&game);
        assert!(selection.is_empty());

        let padded = Padded.pack(&game, &roster, &selection);
        assert_eq!(padded.positions.shape(), [0, 0, 2, 2]);
        let stacked = Stacked.pack(&game, &roster, &selection);
        assert_eq!(stacked.positions.shape(), [0, 2, 2]);
        assert_eq!(stacked.end_times.to_vec(), [BOUNDARY_SENTINEL]);
        assert_eq!(stacked.num_plays(), 0);
    }

    #[test]
    fn test_play_offsets() {
        assert_eq!(play_offsets(&[]), [0]);
        assert_eq!(play_offsets(&[2, 3, 1]), [0, 2, 5, 6]);
    }

    fn random_game(rng: &mut Pcg32) -> Game {
        let starters = [1, 2, 3];
        let mut clock = 720.0;
        let mut events = vec![];
        for _ in 0..rng.random_range(1..12) {
            let num_moments = rng.random_range(0..6);
            let mut moments = vec![];
            // Occasionally step back in time to produce overlapping plays.
            if rng.random_bool(0.2) {
                clock += 15.0;
            }
            for _ in 0..num_moments {
                clock -= rng.random_range(0.04..2.0);
                let mut entities = vec![];
                for id in starters {
                    if rng.random_bool(0.9) {
                        entities.push(Entity::new(
                            EntityId(id),
                            HOME,
                            rng.random_range(0.0..94.0),
                            rng.random_range(0.0..50.0),
                        ));
                    }
                }
                entities.push(Entity::new(EntityId(40), AWAY, 1.0, 1.0));
                moments.push(Moment::new(1, clock, entities));
            }
            events.push(Event::new(moments));
        }
        let seed = fixture::moment(1, 720.0, &[(HOME, &starters), (AWAY, &[40])]);
        events.insert(0, Event::new(vec![seed]));
        fixture::game(events)
    }

    #[test]
    fn test_padded_and_stacked_agree() {
        let mut rng = Pcg32::seed_from_u64(0x5eed);
        for _ in 0..50 {
            let game = random_game(&mut rng);
            let (roster, selection) = assemble(&game);
            let padded = Padded.pack(&game, &roster, &selection);
            let stacked = Stacked.pack(&game, &roster, &selection);

            assert_eq!(padded.num_plays(), stacked.num_plays());
            assert_eq!(stacked.end_times[0], BOUNDARY_SENTINEL);
            assert_eq!(
                stacked.end_times[stacked.num_plays()],
                i64::try_from(stacked.total_moments()).unwrap()
            );
            for pair in stacked.end_times.as_slice().unwrap()[1..].windows(2) {
                assert!(pair[0] < pair[1]);
            }

            for e in 0..padded.num_plays() {
                assert!(same_cells(padded.play(e), stacked.play(e + 1)));
                let padding = padded
                    .positions
                    .slice(s![e, padded.lengths[e].., .., ..]);
                assert!(padding.iter().all(|v| is_missing(*v)));
            }
        }
    }

    #[test]
    fn test_packing_is_idempotent() {
        let mut rng = Pcg32::seed_from_u64(7);
        let game = random_game(&mut rng);
        let (roster, selection) = assemble(&game);

        let first = Stacked.pack(&game, &roster, &selection);
        let second = Stacked.pack(&game, &roster, &selection);
        assert_eq!(first.end_times, second.end_times);
        assert!(same_cells(first.positions.view(), second.positions.view()));
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
