use std::path::PathBuf;

use clap::Args;
use courtline_assembly::summary;

use crate::util;

#[derive(Debug, Clone, Args)]
pub(crate) struct InspectArg {
    /// Path to the tracking JSON file
    game: PathBuf,
}

pub(crate) fn run(arg: &InspectArg) -> anyhow::Result<()> {
    let game = util::read_game_file(&arg.game)?;

    println!("Game {}", game.id);
    if let Some(date) = &game.date {
        println!("Played on {date}");
    }
    println!(
        "The home team is {} ({})",
        game.home.name, game.home.abbreviation
    );
    println!(
        "The guest team is {} ({})",
        game.guest.name, game.guest.abbreviation
    );
    println!();

    println!("Players:");
    for (id, info) in &game.directory {
        println!("{id:>8} #{:<3} {}", info.jersey, info.full_name());
    }
    println!();

    let counts = summary::moment_counts(&game);
    let empty = counts.iter().filter(|count| **count == 0).count();
    println!(
        "{} events, {} without moments, {} moments in total",
        counts.len(),
        empty,
        counts.iter().sum::<usize>()
    );
    for (index, (event, count)) in game.events.iter().zip(&counts).enumerate() {
        match (event.quarter(), event.start_time(), event.end_time()) {
            (Some(quarter), Some(start), Some(end)) => {
                println!("{index:>4}: {count:>4} moments, Q{quarter} {start:.02} -> {end:.02}");
            }
            _ => println!("{index:>4}: {count:>4} moments"),
        }
    }

    Ok(())
}
