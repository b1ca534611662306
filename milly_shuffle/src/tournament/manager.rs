//! Tournament orchestration across rounds.

use log::{debug, info};
use std::collections::HashSet;

use super::bye_picker::{ByePicker, RandomByePicker};
use super::errors::{TournamentError, TournamentResult};
use super::models::{
    GRAND_FINALISTS, MIN_PLAYERS, Match, MatchRecord, Player, PlayerId, RoundDraw, RoundRecord,
    Standing, TournamentConfig, TournamentSnapshot, TournamentState,
};
use super::pairing::PairingEngine;
use super::results::{ResultAggregator, Score};
use super::scheduler::schedule_matches;

/// The round currently waiting for results
#[derive(Debug, Clone)]
struct CurrentRound {
    number: u32,
    matches: Vec<Match>,
    byes: Vec<PlayerId>,
}

/// A shuffle doubles tournament.
///
/// Owns the roster and is the only place player records change. A round is
/// drawn with [`Tournament::advance_round`] and closed with
/// [`Tournament::submit_results`]; standings only ever include closed rounds.
pub struct Tournament {
    config: TournamentConfig,
    roster: Vec<Player>,
    state: TournamentState,
    rounds_played: u32,
    current: Option<CurrentRound>,
    history: Vec<RoundRecord>,
    picker: Box<dyn ByePicker>,
}

impl Tournament {
    /// Create a tournament from player names in seed order
    ///
    /// # Errors
    ///
    /// Returns [`TournamentError::InvalidConfiguration`] if the roster is
    /// odd, smaller than four, contains blank or duplicate names or a name
    /// with `/`, or if the
    /// round count or first-to target is zero.
    pub fn new<S: AsRef<str>>(players: &[S], config: TournamentConfig) -> TournamentResult<Self> {
        config.validate()?;
        let roster = build_roster(players)?;

        info!(
            "Created tournament: {} players, {} rounds, first to {}",
            roster.len(),
            config.num_rounds,
            config.first_to
        );

        Ok(Self {
            config,
            roster,
            state: TournamentState::Setup,
            rounds_played: 0,
            current: None,
            history: Vec::new(),
            picker: Box::new(RandomByePicker::new()),
        })
    }

    /// Shorthand for [`Tournament::new`] with default history handling
    pub fn create<S: AsRef<str>>(
        players: &[S],
        num_rounds: u32,
        first_to: u32,
    ) -> TournamentResult<Self> {
        Self::new(players, TournamentConfig::new(num_rounds, first_to))
    }

    /// Replace the source used to break ties between bye candidates
    pub fn with_bye_picker(mut self, picker: impl ByePicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Draw the next round: byes, teams, then matches
    ///
    /// # Errors
    ///
    /// * [`TournamentError::TournamentComplete`] once every round is played
    /// * [`TournamentError::RoundInProgress`] if the last draw has no results yet
    pub fn advance_round(&mut self) -> TournamentResult<RoundDraw> {
        match self.state {
            TournamentState::Complete => {
                return Err(TournamentError::TournamentComplete {
                    rounds: self.config.num_rounds,
                });
            }
            TournamentState::RoundInProgress { round } => {
                return Err(TournamentError::RoundInProgress { round });
            }
            TournamentState::Setup | TournamentState::BetweenRounds { .. } => {}
        }

        let number = self.rounds_played + 1;
        let plan = PairingEngine::new(&self.roster, self.config.opponents_count_as_partners)
            .plan_round(self.picker.as_mut());

        for &id in &plan.byes {
            self.roster[id].record_bye();
        }
        for team in &plan.teams {
            let [a, b] = team.players;
            let name_a = self.roster[a].name().to_string();
            let name_b = self.roster[b].name().to_string();
            self.roster[a].record_partner(&name_b);
            self.roster[b].record_partner(&name_a);
        }

        let matches = schedule_matches(plan.teams, &self.roster);
        let round = CurrentRound {
            number,
            matches,
            byes: plan.byes,
        };
        let draw = self.draw_for(&round);

        info!(
            "Round {}/{} drawn: {} matches, {} byes",
            number,
            self.config.num_rounds,
            draw.matches.len(),
            draw.byes.len()
        );

        self.current = Some(round);
        self.state = TournamentState::RoundInProgress { round: number };
        Ok(draw)
    }

    /// Apply scores for the current round, in match order
    ///
    /// Nothing changes unless every score is valid.
    ///
    /// # Errors
    ///
    /// * [`TournamentError::NoRoundInProgress`] if no round is waiting
    /// * [`TournamentError::ResultCountMismatch`] if `results` and matches differ in length
    /// * [`TournamentError::InvalidScore`] for a tied or empty score
    /// * [`TournamentError::StatOverflow`] if a credit would overflow a player's totals
    pub fn submit_results(&mut self, results: &[Score]) -> TournamentResult<Vec<Standing>> {
        let round = self
            .current
            .as_ref()
            .ok_or(TournamentError::NoRoundInProgress)?;

        let outcome = ResultAggregator::new(
            &self.roster,
            &round.matches,
            &round.byes,
            self.config.first_to,
        )
        .aggregate(results)?;

        let record = RoundRecord {
            round: round.number,
            matches: outcome
                .matches
                .iter()
                .map(|scored| {
                    let (team1, team2) = scored.fixture.labels(&self.roster);
                    MatchRecord {
                        team1,
                        team2,
                        score1: scored.score.0,
                        score2: scored.score.1,
                    }
                })
                .collect(),
            byes: self.names(&round.byes),
        };

        for &(id, credit) in &outcome.credits {
            self.roster[id].credit(credit);
        }
        for &(id, opponent) in &outcome.opponents {
            let name = self.roster[opponent].name().to_string();
            self.roster[id].record_opponent(&name);
        }

        debug!("Applied results for round {}: {:?}", record.round, results);
        self.history.push(record);
        self.current = None;
        self.rounds_played += 1;

        self.state = if self.rounds_played >= self.config.num_rounds {
            info!("Tournament complete after {} rounds", self.rounds_played);
            TournamentState::Complete
        } else {
            TournamentState::BetweenRounds {
                completed: self.rounds_played,
            }
        };

        Ok(self.standings())
    }

    /// Every player ranked by points, game count, then seed
    pub fn standings(&self) -> Vec<Standing> {
        let mut ranked: Vec<&Player> = self.roster.iter().collect();
        ranked.sort_by(|a, b| a.cmp_rank(b));
        ranked
            .into_iter()
            .enumerate()
            .map(|(i, player)| Standing::from_player(i + 1, player))
            .collect()
    }

    /// The top four of the standings
    pub fn grand_finalists(&self) -> Vec<Standing> {
        let mut standings = self.standings();
        standings.truncate(GRAND_FINALISTS);
        standings
    }

    /// Draw of the round waiting for results, if any
    pub fn current_draw(&self) -> Option<RoundDraw> {
        self.current.as_ref().map(|round| self.draw_for(round))
    }

    /// Matches of the round waiting for results
    pub fn current_matches(&self) -> &[Match] {
        self.current
            .as_ref()
            .map(|round| round.matches.as_slice())
            .unwrap_or_default()
    }

    /// Byes of the round waiting for results
    pub fn current_byes(&self) -> Vec<&Player> {
        self.current
            .as_ref()
            .map(|round| round.byes.iter().map(|&id| &self.roster[id]).collect())
            .unwrap_or_default()
    }

    pub fn state(&self) -> TournamentState {
        self.state
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn rounds_remaining(&self) -> u32 {
        self.config.num_rounds.saturating_sub(self.rounds_played)
    }

    pub fn is_complete(&self) -> bool {
        self.state == TournamentState::Complete
    }

    /// Players in seed order
    pub fn players(&self) -> &[Player] {
        &self.roster
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.roster.iter().find(|p| p.name() == name)
    }

    /// Applied rounds, oldest first
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    /// Export standings and history
    pub fn snapshot(&self) -> TournamentSnapshot {
        TournamentSnapshot {
            config: self.config.clone(),
            state: self.state,
            rounds_played: self.rounds_played,
            standings: self.standings(),
            history: self.history.clone(),
        }
    }

    /// [`Tournament::snapshot`] as pretty-printed JSON
    pub fn to_json(&self) -> TournamentResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| TournamentError::Serialization(e.to_string()))
    }

    fn draw_for(&self, round: &CurrentRound) -> RoundDraw {
        RoundDraw {
            round: round.number,
            matches: round
                .matches
                .iter()
                .map(|m| m.labels(&self.roster))
                .collect(),
            byes: self.names(&round.byes),
        }
    }

    fn names(&self, ids: &[PlayerId]) -> Vec<String> {
        ids.iter()
            .map(|&id| self.roster[id].name().to_string())
            .collect()
    }
}

/// Build the roster, seeding players 1..N in input order
fn build_roster<S: AsRef<str>>(players: &[S]) -> TournamentResult<Vec<Player>> {
    if players.len() < MIN_PLAYERS {
        return Err(TournamentError::InvalidConfiguration(format!(
            "need at least {MIN_PLAYERS} players, got {}",
            players.len()
        )));
    }

    if players.len() % 2 != 0 {
        return Err(TournamentError::InvalidConfiguration(format!(
            "number of players must be even, got {}",
            players.len()
        )));
    }

    let mut seen = HashSet::new();
    let mut roster = Vec::with_capacity(players.len());

    for (i, raw) in players.iter().enumerate() {
        let name = raw.as_ref().trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidConfiguration(format!(
                "player {} has no name",
                i + 1
            )));
        }
        if name.contains('/') {
            return Err(TournamentError::InvalidConfiguration(format!(
                "player name {name:?} can't contain '/'"
            )));
        }
        if !seen.insert(name) {
            return Err(TournamentError::InvalidConfiguration(format!(
                "duplicate player name: {name}"
            )));
        }
        roster.push(Player::new(name, i as u32 + 1));
    }

    Ok(roster)
}
