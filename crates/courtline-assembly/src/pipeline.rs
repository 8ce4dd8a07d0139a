//! End-to-end assembly: roster, then selection, then packing

use courtline_record::Game;

use crate::{
    roster::{Roster, RosterError},
    selection::{PlaySelector, Selection, SelectionConfig, SelectionDiagnostic},
    tensor::PackingStrategy,
};

/// Roster and selected plays for one game.
///
/// Packing reads only this and the game, so one assembly can be packed into
/// several layouts without rescanning.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub roster: Roster,
    pub selection: Selection,
}

impl Assembly {
    pub fn run(game: &Game, config: SelectionConfig) -> Result<Self, RosterError> {
        Self::run_with(game, config, |_| {})
    }

    /// Like [`Assembly::run`], handing every selection diagnostic to `observe`.
    ///
    /// Fails before any event is scanned if the roster cannot be resolved.
    pub fn run_with<F>(
        game: &Game,
        config: SelectionConfig,
        observe: F,
    ) -> Result<Self, RosterError>
    where
        F: FnMut(&SelectionDiagnostic),
    {
        let roster = Roster::resolve(game)?;
        log::info!(
            "Resolved roster of {} players from {}",
            roster.len(),
            roster.focal().abbreviation
        );
        let selection = PlaySelector::new(config).select_with(game, &roster, observe);
        log::info!(
            "Selected {} of {} events",
            selection.len(),
            game.events.len()
        );
        Ok(Self { roster, selection })
    }

    #[must_use]
    pub fn pack<P>(&self, game: &Game, strategy: &P) -> P::Output
    where
        P: PackingStrategy,
    {
        strategy.pack(game, &self.roster, &self.selection)
    }
}
