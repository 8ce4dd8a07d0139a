use clap::{Parser, Subcommand};

use self::{
    assemble::{AssembleArg, Layout},
    inspect::InspectArg,
    play::PlayArg,
};

mod assemble;
mod inspect;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Export selected plays stacked along one time axis, with play boundaries
    Stacked(#[clap(flatten)] AssembleArg),
    /// Export selected plays as one padded block per play
    Padded(#[clap(flatten)] AssembleArg),
    /// Export a single play with every player on the court
    Play(#[clap(flatten)] PlayArg),
    /// Print teams, players and moment counts of a tracking file
    Inspect(#[clap(flatten)] InspectArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Stacked(arg) => assemble::run(&arg, Layout::Stacked)?,
        Mode::Padded(arg) => assemble::run(&arg, Layout::Padded)?,
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Inspect(arg) => inspect::run(&arg)?,
    }
    Ok(())
}
