use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::{Args, ValueEnum};
use courtline_assembly::{
    pipeline::Assembly,
    roster::{GroupLabel, RosterMember},
    selection::{QUARTER_LENGTH, QuarterAdvance, SelectedPlay, SelectionConfig},
    summary::SelectionSummary,
    tensor::{Padded, Stacked},
};
use courtline_record::Game;
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Layout {
    Stacked,
    Padded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum QuarterAdvanceArg {
    /// Move straight to the event's quarter
    Jump,
    /// Move forward one quarter per event
    Step,
}

impl From<QuarterAdvanceArg> for QuarterAdvance {
    fn from(arg: QuarterAdvanceArg) -> Self {
        match arg {
            QuarterAdvanceArg::Jump => QuarterAdvance::Jump,
            QuarterAdvanceArg::Step => QuarterAdvance::Step,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct SelectionArg {
    /// Boundary clock at the start of every quarter, in seconds
    #[arg(long, default_value_t = QUARTER_LENGTH)]
    quarter_length: f64,
    /// How to catch up when an event is more than one quarter ahead
    #[arg(long, value_enum, default_value_t = QuarterAdvanceArg::Jump)]
    quarter_advance: QuarterAdvanceArg,
    /// Print the selection trace of every event
    #[arg(long)]
    verbose: bool,
}

impl SelectionArg {
    fn config(&self) -> SelectionConfig {
        SelectionConfig {
            quarter_length: self.quarter_length,
            quarter_advance: self.quarter_advance.into(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct AssembleArg {
    /// Path to the tracking JSON file
    game: PathBuf,
    /// Directory to write the output files into
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    #[clap(flatten)]
    selection: SelectionArg,
}

/// Roster and play listing written next to the arrays
#[derive(Debug, Serialize)]
struct RosterReport<'a> {
    game_id: &'a str,
    focal: &'a GroupLabel,
    opponent: Option<&'a GroupLabel>,
    members: &'a [RosterMember],
    plays: &'a [SelectedPlay],
    summary: SelectionSummary,
}

pub(crate) fn run(arg: &AssembleArg, layout: Layout) -> anyhow::Result<()> {
    let AssembleArg {
        game,
        output_dir,
        selection,
    } = arg;
    check_output_dir(output_dir)?;
    let game = util::read_game_file(game)?;

    let verbose = selection.verbose;
    let assembly = Assembly::run_with(&game, selection.config(), |diagnostic| {
        if verbose {
            println!("{diagnostic}");
        }
    })?;
    let summary = SelectionSummary::from_selection(&game, &assembly.selection);
    println!("{summary}");

    let prefix = file_prefix(assembly.roster.focal(), assembly.roster.opponent());
    match layout {
        Layout::Stacked => {
            let stacked = assembly.pack(&game, &Stacked);
            eprintln!(
                "Stacked {} plays into {:?}",
                stacked.num_plays(),
                stacked.positions.shape()
            );
            save(
                output_dir,
                &file_name(&prefix, STACKED_PLAYS),
                &stacked.positions,
            )?;
            save(
                output_dir,
                &file_name(&prefix, END_TIMES),
                &stacked.end_times,
            )?;
        }
        Layout::Padded => {
            let padded = assembly.pack(&game, &Padded);
            eprintln!(
                "Padded {} plays into {:?}",
                padded.num_plays(),
                padded.positions.shape()
            );
            save(
                output_dir,
                &file_name(&prefix, PADDED_PLAYS),
                &padded.positions,
            )?;
        }
    }

    let report = roster_report(&game, &assembly, summary);
    save(output_dir, &file_name(&prefix, ROSTER), &report)?;

    Ok(())
}

const STACKED_PLAYS: &str = "stacked_starter_plays";
const END_TIMES: &str = "end_times";
const PADDED_PLAYS: &str = "all_starter_plays";
const ROSTER: &str = "roster";

fn check_output_dir(output_dir: &Path) -> anyhow::Result<()> {
    if !output_dir.is_dir() {
        bail!(
            "Output directory {} does not exist or is not a directory",
            output_dir.display()
        );
    }
    Ok(())
}

fn file_prefix(focal: &GroupLabel, opponent: Option<&GroupLabel>) -> String {
    let opponent = opponent.map_or("unknown", |group| group.abbreviation.as_str());
    format!("basketball_game_{}_vs_{opponent}", focal.abbreviation)
}

fn file_name(prefix: &str, kind: &str) -> String {
    format!("{prefix}_{kind}.json")
}

fn roster_report<'a>(
    game: &'a Game,
    assembly: &'a Assembly,
    summary: SelectionSummary,
) -> RosterReport<'a> {
    RosterReport {
        game_id: &game.id,
        focal: assembly.roster.focal(),
        opponent: assembly.roster.opponent(),
        members: assembly.roster.members(),
        plays: assembly.selection.plays(),
        summary,
    }
}

fn save<T>(output_dir: &Path, file_name: &str, value: &T) -> anyhow::Result<()>
where
    T: Serialize,
{
    let mut output = Output::open(output_dir.join(file_name))?;
    output.write_json(value)?;
    eprintln!("Wrote {}", output.display_path());
    Ok(())
}
