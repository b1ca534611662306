//! Tournament Simulation Example
//!
//! Plays a short shuffle tournament with made-up scores and prints each draw
//! and the final standings.

use milly_shuffle::tournament::{RandomByePicker, Tournament, TournamentConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Shuffle Doubles Simulation ===\n");

    let players = [
        "Ana", "Ben", "Cleo", "Dev", "Eli", "Fay", "Gus", "Hana", "Ivo", "Jun",
    ];
    let config = TournamentConfig::from_best_of(4, 21);
    let mut tournament =
        Tournament::new(&players, config)?.with_bye_picker(RandomByePicker::seeded(2024));

    while !tournament.is_complete() {
        let draw = tournament.advance_round()?;
        println!("Round {}", draw.round);
        for (court, (team1, team2)) in draw.matches.iter().enumerate() {
            println!("  Court {}: {} vs {}", court + 1, team1, team2);
        }
        for bye in &draw.byes {
            println!("  Bye: {}", bye);
        }

        // Team1 wins on odd courts, loses on even ones
        let results: Vec<(u32, u32)> = (0..draw.matches.len())
            .map(|court| {
                let loser = (court as u32 * 3 + draw.round) % 11;
                if court % 2 == 0 { (11, loser) } else { (loser, 11) }
            })
            .collect();
        tournament.submit_results(&results)?;
        println!();
    }

    println!("Grand finalists:");
    for standing in tournament.grand_finalists() {
        println!(
            "  {}. {} - Points: {}, Game Count: {}",
            standing.rank, standing.name, standing.points, standing.game_count
        );
    }

    Ok(())
}
