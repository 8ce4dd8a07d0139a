//! Play selection and tensor assembly for player-tracking data
//!
//! This crate turns a tracked [`Game`](courtline_record::Game) into dense
//! position arrays for statistical inference.
//!
//! # Overview
//!
//! 1. **Resolve the Roster** ([`roster::Roster`]): fix the tracked players and
//!    their entity-axis indices from the first moment of the game
//! 2. **Select Plays** ([`selection::PlaySelector`]): scan events in order and
//!    keep the non-overlapping plays that have the whole roster on the court
//! 3. **Pack Tensors** ([`tensor::PackingStrategy`]): write the selected plays
//!    into either the [`tensor::Padded`] or the [`tensor::Stacked`] layout
//!
//! [`pipeline::Assembly`] runs steps 1 and 2 and packs on demand.
//! [`play_export::PlayExport`] exports a single play with every player on
//! the court, and [`summary`] reports on the selection.
//!
//! Gaps in the tracking data are never filled: a roster member absent from a
//! moment leaves [`tensor::MISSING`] in its cells.
//!
//! # Examples
//!
//! ```no_run
//! use courtline_assembly::{
//!     pipeline::Assembly, selection::SelectionConfig, summary::SelectionSummary,
//!     tensor::Stacked,
//! };
//! use courtline_record::Game;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let game: Game = todo!(); // Decode from a tracking file
//! let assembly = Assembly::run(&game, SelectionConfig::default())?;
//! println!("{}", SelectionSummary::from_selection(&game, &assembly.selection));
//!
//! let stacked = assembly.pack(&game, &Stacked);
//! println!(
//!     "{} moments, boundaries {:?}",
//!     stacked.total_moments(),
//!     stacked.end_times
//! );
//! # Ok(())
//! # }
//! ```

pub mod pipeline;
pub mod play_export;
pub mod roster;
pub mod selection;
pub mod summary;
pub mod tensor;

#[cfg(test)]
mod fixture;
