//! Persistent cache of solved positions
//!
//! Solving a sparse board is expensive, so positions solved once are kept
//! and reused across games. Entries are bucketed by the number of available
//! moves at query time and keyed by the canonical (sorted) move history, so
//! two games that reach the same cells in a different order share an entry.
//!
//! The whole cache round-trips through a single `bincode` blob on disk. A
//! missing or corrupt file is never an error - the cache just starts empty
//! and persistence stays best effort.
//!
//! # Example
//!
//! ```
//! use obstruction::{Move, PositionCache};
//!
//! let mut cache = PositionCache::new();
//! let key = vec![Move::new(1, 1), Move::new(4, 4)];
//!
//! cache.insert(25, key.clone(), Move::new(6, 6));
//! assert_eq!(cache.lookup(25, &key), Some(Move::new(6, 6)));
//! assert_eq!(cache.lookup(24, &key), None);
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::Move;

/// A solved position: the canonical move sequence that reached it and the
/// best reply the search found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Move history sorted ascending by (row, col)
    pub moves: Vec<Move>,
    /// Best move for the side to move in this position
    pub best_move: Move,
}

/// Position cache bucketed by available-move count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionCache {
    buckets: HashMap<u32, Vec<CacheRecord>>,
}

impl PositionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a cache from disk.
    ///
    /// An absent, truncated or otherwise unreadable file yields an empty
    /// cache, never an error.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(path = %path.display(), %err, "no position cache on disk, starting empty");
                return Self::new();
            }
        };
        match bincode::deserialize(&bytes) {
            Ok(cache) => {
                debug!(path = %path.display(), "loaded position cache");
                cache
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "corrupt position cache, starting empty");
                Self::new()
            }
        }
    }

    /// Persist the cache as a single blob. Best effort: failures are logged
    /// and swallowed, the in-memory state is unaffected.
    pub fn save(&self, path: &Path) {
        let bytes = match bincode::serialize(self) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(%err, "failed to serialize position cache");
                return;
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = fs::create_dir_all(parent) {
                    warn!(path = %path.display(), %err, "failed to create cache directory");
                    return;
                }
            }
        }

        match fs::write(path, bytes) {
            Ok(()) => debug!(path = %path.display(), entries = self.len(), "saved position cache"),
            Err(err) => warn!(path = %path.display(), %err, "failed to write position cache"),
        }
    }

    /// Find the recorded best move for a canonical move sequence.
    ///
    /// Scans the bucket linearly and returns the first record whose sequence
    /// matches; both sides of the comparison are sorted, so plain list
    /// equality is enough.
    #[must_use]
    pub fn lookup(&self, available: u32, canonical: &[Move]) -> Option<Move> {
        self.buckets
            .get(&available)?
            .iter()
            .find(|record| record.moves == canonical)
            .map(|record| record.best_move)
    }

    /// Record a solved position.
    ///
    /// Appends without checking for an existing identical key; lookup always
    /// takes the first match, so a duplicate costs space, not correctness.
    pub fn insert(&mut self, available: u32, canonical: Vec<Move>, best_move: Move) {
        self.buckets.entry(available).or_default().push(CacheRecord {
            moves: canonical,
            best_move,
        });
    }

    /// Total number of records across all buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }
}
