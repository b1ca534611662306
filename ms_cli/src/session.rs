//! Interactive round loop over any line-based input and output.

use anyhow::{Context, Result, bail};
use log::{info, warn};
use milly_shuffle::tournament::{RoundDraw, Score, Standing, Tournament};
use std::io::{BufRead, Write};
use std::path::Path;

/// Read player names, one per line in seed order. Blank lines are skipped.
pub fn read_players(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read players file {}", path.display()))?;
    Ok(parse_players(&contents))
}

pub fn parse_players(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a score line such as `11-5`, `11:5` or `11 5`
pub fn parse_score(line: &str) -> Result<Score> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let (score1, score2) = match tokens.as_slice() {
        [single] => single
            .split_once(['-', ':'])
            .with_context(|| format!("Expected two scores like 11-5, got {single:?}"))?,
        [score1, score2] => (*score1, *score2),
        [score1, "-" | ":", score2] => (*score1, *score2),
        _ => bail!("Expected two scores like 11-5, got {:?}", line.trim()),
    };

    let score1 = score1
        .parse()
        .with_context(|| format!("Invalid score {score1:?}"))?;
    let score2 = score2
        .parse()
        .with_context(|| format!("Invalid score {score2:?}"))?;
    Ok((score1, score2))
}

/// Drives a tournament from start to finish over `input`/`output`
pub struct Session<R, W> {
    tournament: Tournament,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(tournament: Tournament, input: R, output: W) -> Self {
        Self {
            tournament,
            input,
            output,
        }
    }

    /// Play every round, then print the grand finalists and standings
    pub fn run(mut self, json: bool) -> Result<Tournament> {
        while !self.tournament.is_complete() {
            let draw = self.tournament.advance_round()?;
            self.print_draw(&draw)?;

            loop {
                let results = self.collect_scores(&draw)?;
                match self.tournament.submit_results(&results) {
                    Ok(_) => break,
                    Err(e) if e.is_recoverable() => {
                        warn!("Rejected results for round {}: {}", draw.round, e);
                        writeln!(self.output, "{e}. Enter the round's scores again.")?;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }

        info!("All {} rounds played", self.tournament.rounds_played());
        if json {
            writeln!(self.output, "{}", self.tournament.to_json()?)?;
        } else {
            self.print_grand_finals()?;
            let standings = self.tournament.standings();
            self.print_standings(&standings)?;
        }

        Ok(self.tournament)
    }

    fn print_draw(&mut self, draw: &RoundDraw) -> Result<()> {
        writeln!(self.output, "\nRound {}", draw.round)?;
        for (court, (team1, team2)) in draw.matches.iter().enumerate() {
            writeln!(self.output, "  Court {}: {} vs {}", court + 1, team1, team2)?;
        }
        for bye in &draw.byes {
            writeln!(self.output, "  bye: {bye}")?;
        }
        Ok(())
    }

    fn collect_scores(&mut self, draw: &RoundDraw) -> Result<Vec<Score>> {
        let mut results = Vec::with_capacity(draw.matches.len());

        for (court, (team1, team2)) in draw.matches.iter().enumerate() {
            loop {
                write!(
                    self.output,
                    "Court {} score ({} vs {}): ",
                    court + 1,
                    team1,
                    team2
                )?;
                self.output.flush()?;

                let mut line = String::new();
                if self.input.read_line(&mut line)? == 0 {
                    bail!("Input closed before round {} was finished", draw.round);
                }

                match parse_score(&line) {
                    Ok(score) => {
                        results.push(score);
                        break;
                    }
                    Err(e) => writeln!(self.output, "{e}")?,
                }
            }
        }

        Ok(results)
    }

    fn print_grand_finals(&mut self) -> Result<()> {
        writeln!(self.output, "\nGrand Finals Participants")?;
        for standing in self.tournament.grand_finalists() {
            writeln!(
                self.output,
                "{}. {} - Points: {}, Game Count: {}",
                standing.rank, standing.name, standing.points, standing.game_count
            )?;
        }
        Ok(())
    }

    fn print_standings(&mut self, standings: &[Standing]) -> Result<()> {
        writeln!(self.output, "\nFinal Standings")?;
        writeln!(
            self.output,
            "{:<6} {:<20} {:>8} {:>12} {:>6}",
            "Rank", "Player", "Points", "Game Count", "Byes"
        )?;
        writeln!(self.output, "{}", "-".repeat(56))?;
        for s in standings {
            writeln!(
                self.output,
                "{:<6} {:<20} {:>8} {:>12} {:>6}",
                s.rank, s.name, s.points, s.game_count, s.bye_count
            )?;
        }
        Ok(())
    }
}
