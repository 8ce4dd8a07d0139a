use std::path::PathBuf;

use clap::Args;
use courtline_assembly::play_export::PlayExport;

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct PlayArg {
    /// Path to the tracking JSON file
    game: PathBuf,
    /// Index of the event to export, in record order
    #[arg(long)]
    event: usize,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        game,
        event,
        output,
    } = arg;
    let game = util::read_game_file(game)?;
    let export = PlayExport::from_event(&game, *event)?;

    eprintln!(
        "Event {event}: {} moments, {} players",
        export.positions.shape()[0],
        export.columns.len()
    );
    for column in &export.columns {
        let name = game
            .entity_info(column.id)
            .map_or_else(|| "?".to_owned(), |info| info.full_name());
        eprintln!(
            "{:>3} {:>8} {:<4} {name}",
            column.index, column.id, column.group.abbreviation
        );
    }

    Output::save_json(&export, output.clone())?;
    Ok(())
}
