//! Search module for the Obstruction solver
//!
//! Contains the exhaustive minimax search with alpha-beta pruning that
//! solves a position outright. There is no heuristic evaluation: every
//! line is searched to a terminal board, so the returned score is exact.

pub mod minimax;

pub use minimax::{SearchResult, Searcher, SEARCH_WINDOW, WIN_SCORE};
