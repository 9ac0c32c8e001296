//! Local matches between agents, used by the `selfplay` binary.

use serde::Serialize;

use crate::ai::Agent;
use crate::error::ArenaError;
use crate::game::{Color, GameOutcome, GameState, Move};

/// Result of one complete game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    /// Placements in play order; passes are implicit
    pub moves: Vec<(Color, Move)>,
    pub outcome: GameOutcome,
    /// Final (dark, light) disk counts
    pub score: (u32, u32),
}

impl GameRecord {
    /// Disk margin from `color`'s point of view.
    pub fn margin(&self, color: Color) -> i32 {
        let (dark, light) = self.score;
        let diff = dark as i32 - light as i32;
        match color {
            Color::Dark => diff,
            Color::Light => -diff,
        }
    }
}

fn step(agent: &mut dyn Agent, state: &GameState) -> Result<(Move, GameState), ArenaError> {
    let mv = agent
        .select_move(state)
        .ok_or_else(|| ArenaError::MissingMove {
            agent: agent.name().to_string(),
            legal: state.legal_moves(),
        })?;
    let next = state
        .apply_move(mv)
        .map_err(|reason| ArenaError::IllegalMove {
            agent: agent.name().to_string(),
            mv,
            reason,
        })?;
    Ok((mv, next))
}

fn finish(state: &GameState, outcome: GameOutcome, moves: Vec<(Color, Move)>) -> GameRecord {
    log::debug!(
        "game over after {} placements: {:?} {:?}",
        moves.len(),
        outcome,
        state.board().score()
    );
    GameRecord {
        moves,
        outcome,
        score: state.board().score(),
    }
}

/// Play one game from the opening. Passes are handled by [`GameState`], so
/// an agent is only asked for a move when it has one.
pub fn play_game(dark: &mut dyn Agent, light: &mut dyn Agent) -> Result<GameRecord, ArenaError> {
    let mut state = GameState::initial();
    let mut moves = Vec::new();

    loop {
        if let Some(outcome) = state.outcome() {
            return Ok(finish(&state, outcome, moves));
        }
        let color = state.to_move();
        let agent: &mut dyn Agent = match color {
            Color::Dark => &mut *dark,
            Color::Light => &mut *light,
        };
        let (mv, next) = step(agent, &state)?;
        moves.push((color, mv));
        state = next;
    }
}

/// Play one game with `agent` on both sides.
pub fn play_self_game(agent: &mut dyn Agent) -> Result<GameRecord, ArenaError> {
    let mut state = GameState::initial();
    let mut moves = Vec::new();

    loop {
        if let Some(outcome) = state.outcome() {
            return Ok(finish(&state, outcome, moves));
        }
        let color = state.to_move();
        let (mv, next) = step(agent, &state)?;
        moves.push((color, mv));
        state = next;
    }
}

/// Derive a deterministic seed for a given game index.
pub fn game_seed(base_seed: u64, game_index: usize) -> u64 {
    let mut hash = base_seed ^ 0x517cc1b727220a95;
    let index = game_index as u64;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index >> 32;
    hash
}

/// Running tally of games from one side's point of view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchStats {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    #[serde(skip)]
    total_margin: i64,
    #[serde(skip)]
    total_placements: usize,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `record` for the agent that played `color`.
    pub fn record(&mut self, record: &GameRecord, color: Color) {
        self.games += 1;
        match record.outcome {
            GameOutcome::Winner(winner) if winner == color => self.wins += 1,
            GameOutcome::Winner(_) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        self.total_margin += i64::from(record.margin(color));
        self.total_placements += record.moves.len();
    }

    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games as f64
    }

    pub fn average_margin(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_margin as f64 / self.games as f64
    }

    pub fn average_game_length(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_placements as f64 / self.games as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{Algorithm, RandomAgent, SearchAgent, SearchConfig};

    /// Always answers with a fixed square.
    struct Stubborn;

    impl Agent for Stubborn {
        fn select_move(&mut self, _state: &GameState) -> Option<Move> {
            Some(Move::new(0, 0))
        }

        fn name(&self) -> &str {
            "Stubborn"
        }
    }

    /// Never answers.
    struct Silent;

    impl Agent for Silent {
        fn select_move(&mut self, _state: &GameState) -> Option<Move> {
            None
        }

        fn name(&self) -> &str {
            "Silent"
        }
    }

    #[test]
    fn test_random_game_completes() {
        let mut dark = RandomAgent::seeded(1);
        let mut light = RandomAgent::seeded(2);
        let record = play_game(&mut dark, &mut light).unwrap();

        let (d, l) = record.score;
        assert!(d + l <= 64);
        assert!(record.moves.len() as u32 + 4 == d + l);
        assert_eq!(record.moves[0].0, Color::Dark);
    }

    #[test]
    fn test_moves_replay_to_final_score() {
        let mut dark = RandomAgent::seeded(5);
        let mut light = RandomAgent::seeded(6);
        let record = play_game(&mut dark, &mut light).unwrap();

        let mut state = GameState::initial();
        for (color, mv) in &record.moves {
            assert_eq!(state.to_move(), *color);
            state = state.apply_move(*mv).unwrap();
        }
        assert!(state.is_terminal());
        assert_eq!(state.board().score(), record.score);
        assert_eq!(state.outcome(), Some(record.outcome));
    }

    #[test]
    fn test_self_game_completes() {
        let mut engine = SearchAgent::new(SearchConfig {
            algorithm: Algorithm::AlphaBeta,
            depth_limit: 1,
            caching: true,
            ..SearchConfig::default()
        });
        let record = play_self_game(&mut engine).unwrap();
        let (d, l) = record.score;
        assert_eq!(record.moves.len() as u32 + 4, d + l);
        assert!(engine.total_stats().nodes > 0);
        assert!(!engine.cache(Color::Dark).is_empty());
        assert!(!engine.cache(Color::Light).is_empty());
    }

    #[test]
    fn test_illegal_move_is_reported() {
        let mut light = RandomAgent::seeded(0);
        let err = play_game(&mut Stubborn, &mut light).unwrap_err();
        assert!(matches!(err, ArenaError::IllegalMove { ref agent, .. } if agent == "Stubborn"));
    }

    #[test]
    fn test_missing_move_is_reported() {
        let mut dark = RandomAgent::seeded(0);
        let err = play_game(&mut dark, &mut Silent).unwrap_err();
        match err {
            ArenaError::MissingMove { agent, legal } => {
                assert_eq!(agent, "Silent");
                assert!(!legal.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_match_stats() {
        let win = GameRecord {
            moves: vec![(Color::Dark, Move::new(2, 3))],
            outcome: GameOutcome::Winner(Color::Dark),
            score: (40, 24),
        };
        let draw = GameRecord {
            moves: vec![(Color::Dark, Move::new(2, 3)); 3],
            outcome: GameOutcome::Draw,
            score: (32, 32),
        };

        let mut stats = MatchStats::new();
        stats.record(&win, Color::Dark);
        stats.record(&win, Color::Light);
        stats.record(&draw, Color::Light);

        assert_eq!(stats.games, 3);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.draws, 1);
        assert!((stats.win_rate() - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.average_margin(), 0.0);
        assert!((stats.average_game_length() - 5.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats() {
        let stats = MatchStats::new();
        assert_eq!(stats.win_rate(), 0.0);
        assert_eq!(stats.average_margin(), 0.0);
    }

    #[test]
    fn test_game_seed() {
        assert_eq!(game_seed(42, 100), game_seed(42, 100));
        assert_ne!(game_seed(42, 0), game_seed(42, 1));
        assert_ne!(game_seed(1, 0), game_seed(2, 0));
    }
}
