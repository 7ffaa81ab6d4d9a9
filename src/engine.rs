//! AI engine orchestrating the cache and the search
//!
//! The engine answers one question: "what is the best move in this
//! position?" For sparse boards it consults the position cache first and
//! falls back to the exhaustive search on a miss, writing the answer back so
//! the next game gets it for free. Dense boards are cheap to solve and skip
//! the cache entirely.
//!
//! The engine never mutates the caller's board. It consumes a read-only
//! snapshot and returns the move; applying it to the authoritative board is
//! the caller's job.
//!
//! # Example
//!
//! ```
//! use obstruction::{Board, Engine, EngineConfig, Player, PositionCache};
//!
//! let mut board = Board::new();
//! let mut engine = Engine::with_cache(EngineConfig::default(), PositionCache::new());
//!
//! // The engine opens in a corner without searching
//! let opening = engine.opening_move();
//! board.apply_move(Player::First, opening.best_move).unwrap();
//! assert_eq!(board.available_moves(), 32);
//! ```

use rand::Rng;
use tracing::{debug, info};

use crate::board::{Board, Move, SearchBoard};
use crate::cache::PositionCache;
use crate::config::EngineConfig;
use crate::search::Searcher;

/// Where a computed move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// Fixed corner opening, no search involved
    Opening,
    /// Recorded answer from the position cache
    Cache,
    /// Fresh exhaustive search
    Search,
}

/// A computed move with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub best_move: Move,
    /// Exact score from the search; 0 for opening and cached moves
    pub score: i32,
    /// Nodes visited; 0 when the search never ran
    pub nodes: u64,
    pub source: MoveSource,
}

/// The four corners of the board. They are symmetric under rotation, so any
/// one is an equally optimal opening.
pub const OPENING_CORNERS: [Move; 4] = [
    Move { row: 1, col: 1 },
    Move { row: 1, col: 6 },
    Move { row: 6, col: 1 },
    Move { row: 6, col: 6 },
];

/// Move computation engine with a persistent position cache.
pub struct Engine {
    cache: PositionCache,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine, loading the cache from `config.cache_path`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let cache = PositionCache::load(&config.cache_path);
        Self::with_cache(config, cache)
    }

    /// Create an engine around an existing cache. Nothing is read from disk.
    #[must_use]
    pub fn with_cache(config: EngineConfig, cache: PositionCache) -> Self {
        Self { cache, config }
    }

    /// Opening move for an empty board.
    ///
    /// Skips the search: the corners are interchangeable, and picking one at
    /// random avoids a predictable opening.
    #[must_use]
    pub fn opening_move(&self) -> MoveResult {
        let mut rng = rand::rng();
        let best_move = OPENING_CORNERS[rng.random_range(0..OPENING_CORNERS.len())];
        debug!(row = best_move.row, col = best_move.col, "opening move");
        MoveResult {
            best_move,
            score: 0,
            nodes: 0,
            source: MoveSource::Opening,
        }
    }

    /// Compute the best move for the side to move on `board`.
    ///
    /// Consults the cache when the position still has at least
    /// `cache_min_available` empty cells; otherwise, or on a miss, runs the
    /// search and records the answer for cacheable positions.
    ///
    /// Returns `None` when the board is already terminal - callers check
    /// `is_game_over` first in the normal flow.
    #[must_use]
    pub fn compute_move(&mut self, board: &Board) -> Option<MoveResult> {
        let available = board.available_moves();
        let canonical = (available >= self.config.cache_min_available)
            .then(|| board.sorted_moves());

        if let Some(key) = &canonical {
            if let Some(best_move) = self.cache.lookup(available, key) {
                debug!(available, row = best_move.row, col = best_move.col, "position cache hit");
                return Some(MoveResult {
                    best_move,
                    score: 0,
                    nodes: 0,
                    source: MoveSource::Cache,
                });
            }
            debug!(available, "position cache miss");
        }

        let result = Searcher::new().search(&SearchBoard::from(board));
        let best_move = result.best_move?;
        debug!(
            score = result.score,
            nodes = result.nodes,
            "search complete"
        );

        if let Some(key) = canonical {
            self.cache.insert(available, key, best_move);
        }

        Some(MoveResult {
            best_move,
            score: result.score,
            nodes: result.nodes,
            source: MoveSource::Search,
        })
    }

    /// Persist the cache to `config.cache_path`. Call once, when a game
    /// concludes.
    pub fn flush_cache(&self) {
        info!(
            path = %self.config.cache_path.display(),
            entries = self.cache.len(),
            "flushing position cache"
        );
        self.cache.save(&self.config.cache_path);
    }

    /// Read access to the accumulated cache
    #[must_use]
    pub fn cache(&self) -> &PositionCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;

    /// Config that never touches the real cache file
    fn test_config(threshold: u32) -> EngineConfig {
        EngineConfig {
            cache_path: std::env::temp_dir()
                .join(format!("obstruction-engine-{}.bin", std::process::id())),
            cache_min_available: threshold,
        }
    }

    fn sparse_board() -> Board {
        // Nine empty cells left, all in the lower-right quadrant
        let mut board = Board::new();
        let mut player = Player::First;
        for (row, col) in [(2, 2), (2, 5), (5, 2)] {
            board.apply_move(player, Move::new(row, col)).unwrap();
            player = player.opponent();
        }
        board
    }

    #[test]
    fn test_opening_move_is_always_a_corner() {
        let engine = Engine::with_cache(test_config(20), PositionCache::new());
        for _ in 0..64 {
            let result = engine.opening_move();
            assert!(OPENING_CORNERS.contains(&result.best_move));
            assert_eq!(result.source, MoveSource::Opening);
            assert_eq!(result.nodes, 0);
        }
    }

    #[test]
    fn test_below_threshold_skips_cache() {
        let mut engine = Engine::with_cache(test_config(20), PositionCache::new());
        let board = sparse_board();
        assert!(board.available_moves() < 20);

        let result = engine.compute_move(&board).unwrap();

        assert_eq!(result.source, MoveSource::Search);
        assert!(board.is_move_valid(result.best_move));
        assert!(engine.cache().is_empty());
    }

    #[test]
    fn test_at_threshold_inserts_then_hits() {
        // Threshold low enough that the nine-cell position is cacheable
        let mut engine = Engine::with_cache(test_config(5), PositionCache::new());
        let board = sparse_board();

        let first = engine.compute_move(&board).unwrap();
        assert_eq!(first.source, MoveSource::Search);
        assert_eq!(engine.cache().len(), 1);

        let second = engine.compute_move(&board).unwrap();
        assert_eq!(second.source, MoveSource::Cache);
        assert_eq!(second.best_move, first.best_move);
    }

    #[test]
    fn test_cache_hit_answers_without_search() {
        let board = sparse_board();
        let mut cache = PositionCache::new();
        cache.insert(
            board.available_moves(),
            board.sorted_moves(),
            Move::new(6, 6),
        );

        let mut engine = Engine::with_cache(test_config(5), cache);
        let result = engine.compute_move(&board).unwrap();

        assert_eq!(result.source, MoveSource::Cache);
        assert_eq!(result.best_move, Move::new(6, 6));
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_compute_move_is_deterministic() {
        let board = sparse_board();

        let mut a = Engine::with_cache(test_config(20), PositionCache::new());
        let mut b = Engine::with_cache(test_config(20), PositionCache::new());

        assert_eq!(a.compute_move(&board), b.compute_move(&board));
    }

    #[test]
    fn test_compute_move_never_mutates_snapshot() {
        let board = sparse_board();
        let snapshot = board.clone();

        let mut engine = Engine::with_cache(test_config(20), PositionCache::new());
        let _ = engine.compute_move(&board);

        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_terminal_board_yields_no_move() {
        let mut board = Board::new();
        let mut player = Player::First;
        for (row, col) in [(2, 2), (2, 5), (5, 2), (5, 5)] {
            board.apply_move(player, Move::new(row, col)).unwrap();
            player = player.opponent();
        }
        assert!(board.is_game_over());

        let mut engine = Engine::with_cache(test_config(20), PositionCache::new());
        assert!(engine.compute_move(&board).is_none());
    }

    #[test]
    fn test_flush_then_reload_preserves_lookups() {
        let config = test_config(5);
        let board = sparse_board();

        let mut engine = Engine::with_cache(config.clone(), PositionCache::new());
        let result = engine.compute_move(&board).unwrap();
        engine.flush_cache();

        let reloaded = Engine::new(config.clone());
        let _ = std::fs::remove_file(&config.cache_path);

        assert_eq!(reloaded.cache(), engine.cache());
        assert_eq!(
            reloaded
                .cache()
                .lookup(board.available_moves(), &board.sorted_moves()),
            Some(result.best_move)
        );
    }
}
