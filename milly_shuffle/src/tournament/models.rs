//! Tournament data models for shuffle doubles.

use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::BTreeSet, fmt};

use super::errors::{TournamentError, TournamentResult};

/// Index of a player in the tournament roster.
///
/// Rosters never shrink, so a `PlayerId` stays valid for the whole
/// tournament. It's always `seed - 1`.
pub type PlayerId = usize;

/// Minimum roster size that can fill a single match
pub const MIN_PLAYERS: usize = 4;

/// Number of players promoted to the grand finals
pub const GRAND_FINALISTS: usize = 4;

/// A registered player and their cumulative record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    seed: u32,
    points: u32,
    game_count: u32,
    previous_partners: BTreeSet<String>,
    previous_opponents: BTreeSet<String>,
    bye_count: u32,
}

impl Player {
    /// Create a player with a clean record
    pub fn new(name: &str, seed: u32) -> Self {
        Self {
            name: name.to_string(),
            seed,
            points: 0,
            game_count: 0,
            previous_partners: BTreeSet::new(),
            previous_opponents: BTreeSet::new(),
            bye_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry position, 1-based. Only ever used as the final tie-break.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Matches won, byes included
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Games won across every match played, byes credited at the first-to target
    pub fn game_count(&self) -> u32 {
        self.game_count
    }

    pub fn bye_count(&self) -> u32 {
        self.bye_count
    }

    pub fn previous_partners(&self) -> &BTreeSet<String> {
        &self.previous_partners
    }

    pub fn previous_opponents(&self) -> &BTreeSet<String> {
        &self.previous_opponents
    }

    pub fn has_partnered(&self, other: &str) -> bool {
        self.previous_partners.contains(other)
    }

    pub fn has_faced(&self, other: &str) -> bool {
        self.previous_opponents.contains(other)
    }

    /// Ranking order shared by pairing and standings: points descending,
    /// then game count descending, then seed ascending.
    ///
    /// Seeds are unique within a tournament so this is a strict total order.
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then_with(|| other.game_count.cmp(&self.game_count))
            .then_with(|| self.seed.cmp(&other.seed))
    }

    pub(crate) fn credit(&mut self, credit: Credit) {
        self.points += credit.points;
        self.game_count += credit.games;
    }

    pub(crate) fn record_partner(&mut self, name: &str) {
        self.previous_partners.insert(name.to_string());
    }

    pub(crate) fn record_opponent(&mut self, name: &str) {
        self.previous_opponents.insert(name.to_string());
    }

    pub(crate) fn record_bye(&mut self) {
        self.bye_count += 1;
    }
}

/// Points and games owed to a player or team for one round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub points: u32,
    pub games: u32,
}

/// Two players partnered for a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Roster ids, higher-ranked player first
    pub players: [PlayerId; 2],
    /// Round-scoped match points
    pub points: u32,
    /// Round-scoped games won
    pub game_count: u32,
}

impl Team {
    pub(crate) fn new(first: PlayerId, second: PlayerId) -> Self {
        debug_assert_ne!(first, second, "a player can't partner themselves");
        Self {
            players: [first, second],
            points: 0,
            game_count: 0,
        }
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains(&id)
    }

    /// Display label, e.g. `Alice/Bob`
    pub fn label(&self, roster: &[Player]) -> String {
        format!(
            "{}/{}",
            roster[self.players[0]].name(),
            roster[self.players[1]].name()
        )
    }

    pub(crate) fn credit(&mut self, credit: Credit) {
        self.points += credit.points;
        self.game_count += credit.games;
    }
}

/// Two teams drawn against each other for a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub team1: Team,
    pub team2: Team,
}

impl Match {
    pub fn labels(&self, roster: &[Player]) -> (String, String) {
        (self.team1.label(roster), self.team2.label(roster))
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.team1.players.iter().chain(self.team2.players.iter()).copied()
    }
}

/// Tournament configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Number of rounds to play before the grand finals
    pub num_rounds: u32,
    /// Games needed to win a match; also the games credited for a bye
    pub first_to: u32,
    /// Treat former opponents like former partners when forming teams
    pub opponents_count_as_partners: bool,
}

impl TournamentConfig {
    pub fn new(num_rounds: u32, first_to: u32) -> Self {
        Self {
            num_rounds,
            first_to,
            opponents_count_as_partners: false,
        }
    }

    /// Create a configuration from a best-of-N match length
    ///
    /// A best of 5 is played first to 3, a best of 4 first to 3 as well.
    pub fn from_best_of(num_rounds: u32, best_of: u32) -> Self {
        Self::new(num_rounds, best_of / 2 + 1)
    }

    /// Keep a single history for partners and opponents, so anyone already
    /// faced is avoided as a partner too
    pub fn with_opponents_as_partners(mut self) -> Self {
        self.opponents_count_as_partners = true;
        self
    }

    /// Check that the round count and match length can run
    pub fn validate(&self) -> TournamentResult<()> {
        if self.num_rounds == 0 {
            return Err(TournamentError::InvalidConfiguration(
                "number of rounds must be positive".to_string(),
            ));
        }

        if self.first_to == 0 {
            return Err(TournamentError::InvalidConfiguration(
                "first-to target must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Tournament lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentState {
    /// Created, no round drawn yet
    Setup,
    /// Round drawn and waiting for results
    RoundInProgress { round: u32 },
    /// Results applied, next round not drawn yet
    BetweenRounds { completed: u32 },
    /// Every round played
    Complete,
}

impl fmt::Display for TournamentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::RoundInProgress { round } => write!(f, "round {round} in progress"),
            Self::BetweenRounds { completed } => write!(f, "round {completed} complete"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Published draw for a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundDraw {
    /// Round number (1-indexed)
    pub round: u32,
    /// Match labels in court order
    pub matches: Vec<(String, String)>,
    /// Players sitting out
    pub byes: Vec<String>,
}

/// One row of the standings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Position (1-indexed)
    pub rank: usize,
    pub name: String,
    pub seed: u32,
    pub points: u32,
    pub game_count: u32,
    pub bye_count: u32,
}

impl Standing {
    pub(crate) fn from_player(rank: usize, player: &Player) -> Self {
        Self {
            rank,
            name: player.name().to_string(),
            seed: player.seed(),
            points: player.points(),
            game_count: player.game_count(),
            bye_count: player.bye_count(),
        }
    }
}

/// Result of a single match as recorded in the round history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub team1: String,
    pub team2: String,
    pub score1: u32,
    pub score2: u32,
}

/// A fully applied round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub matches: Vec<MatchRecord>,
    pub byes: Vec<String>,
}

/// Read-only export of a tournament: configuration, progress, standings and
/// every applied round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub config: TournamentConfig,
    pub state: TournamentState,
    pub rounds_played: u32,
    pub standings: Vec<Standing>,
    pub history: Vec<RoundRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with(name: &str, seed: u32, points: u32, games: u32) -> Player {
        let mut player = Player::new(name, seed);
        player.credit(Credit { points, games });
        player
    }

    #[test]
    fn test_rank_order_points_first() {
        let a = player_with("a", 5, 2, 10);
        let b = player_with("b", 1, 1, 30);
        assert_eq!(a.cmp_rank(&b), Ordering::Less);
        assert_eq!(b.cmp_rank(&a), Ordering::Greater);
    }

    #[test]
    fn test_rank_order_games_then_seed() {
        let a = player_with("a", 4, 1, 20);
        let b = player_with("b", 2, 1, 15);
        assert_eq!(a.cmp_rank(&b), Ordering::Less);

        let c = player_with("c", 3, 1, 20);
        assert_eq!(c.cmp_rank(&a), Ordering::Less);
        assert_eq!(a.cmp_rank(&a), Ordering::Equal);
    }

    #[test]
    fn test_history_is_split() {
        let mut player = Player::new("a", 1);
        player.record_partner("b");
        player.record_opponent("c");

        assert!(player.has_partnered("b"));
        assert!(!player.has_partnered("c"));
        assert!(player.has_faced("c"));
    }

    #[test]
    fn test_team_label() {
        let roster = vec![Player::new("Alice", 1), Player::new("Bob", 2)];
        let team = Team::new(1, 0);
        assert_eq!(team.label(&roster), "Bob/Alice");
        assert!(team.contains(0));
    }

    #[test]
    fn test_from_best_of() {
        assert_eq!(TournamentConfig::from_best_of(3, 5).first_to, 3);
        assert_eq!(TournamentConfig::from_best_of(3, 4).first_to, 3);
        assert_eq!(TournamentConfig::from_best_of(3, 1).first_to, 1);
        assert_eq!(TournamentConfig::from_best_of(3, 21).first_to, 11);
    }

    #[test]
    fn test_config_validation() {
        assert!(TournamentConfig::new(3, 11).validate().is_ok());
        assert!(matches!(
            TournamentConfig::new(0, 11).validate(),
            Err(TournamentError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            TournamentConfig::new(3, 0).validate(),
            Err(TournamentError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_opponents_as_partners_flag() {
        let config = TournamentConfig::new(2, 6);
        assert!(!config.opponents_count_as_partners);
        assert!(config.with_opponents_as_partners().opponents_count_as_partners);
    }
}
