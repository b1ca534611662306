//! Terminal runner for shuffle doubles tournaments.
//!
//! Reads the roster from a file, prints each round's courts and byes, and
//! collects one score line per court from stdin.

mod config;
mod session;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Error};
use ctrlc::set_handler;
use log::info;
use milly_shuffle::tournament::{RandomByePicker, Tournament};
use pico_args::Arguments;

use config::{CliConfig, Overrides};
use session::{Session, read_players};

const HELP: &str = "\
Run a shuffle doubles tournament in the terminal

USAGE:
  ms_cli --players FILE [OPTIONS]

OPTIONS:
  --players    FILE        Player names, one per line in seed order  [default: env SHUFFLE_PLAYERS_FILE]
  --rounds     N           Number of rounds                          [default: env SHUFFLE_ROUNDS or 4]
  --best-of    N           Match length as best of N games           [default: env SHUFFLE_BEST_OF or 21]
  --first-to   N           Match length as first to N games          [default: env SHUFFLE_FIRST_TO]
  --seed       N           Seed for reproducible bye selection       [default: env SHUFFLE_SEED]

FLAGS:
  --opponents-as-partners  Also avoid partnering former opponents
  --json                   Print final standings as JSON
  -h, --help               Print help information

Scores are entered as 11-5, 11:5 or 11 5, team on the left first.
";

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = Overrides {
        players_file: pargs.opt_value_from_str::<_, PathBuf>("--players")?,
        rounds: pargs.opt_value_from_str("--rounds")?,
        best_of: pargs.opt_value_from_str("--best-of")?,
        first_to: pargs.opt_value_from_str("--first-to")?,
        seed: pargs.opt_value_from_str("--seed")?,
        opponents_as_partners: pargs.contains("--opponents-as-partners"),
        json: pargs.contains("--json"),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unexpected arguments: {remaining:?}");
    }

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    let config = CliConfig::from_env(overrides)?;
    config.validate()?;

    let players = read_players(&config.players_file)?;
    info!(
        "Loaded {} players from {}",
        players.len(),
        config.players_file.display()
    );

    let picker = match config.seed {
        Some(seed) => RandomByePicker::seeded(seed),
        None => RandomByePicker::new(),
    };
    let tournament = Tournament::new(&players, config.tournament.clone())
        .context("Failed to set up tournament")?
        .with_bye_picker(picker);

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    Session::new(tournament, stdin, stdout).run(config.json)?;

    Ok(())
}
