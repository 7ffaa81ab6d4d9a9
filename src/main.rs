//! Obstruction AI Engine CLI
//!
//! A command-line driver for the Obstruction solver. Runs a few scripted
//! scenarios and a full self-play game, exercising the public interface the
//! way a front-end would: query the engine for a move, apply it to the
//! authoritative board, and flush the cache when the game ends.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use obstruction::{load_config, Board, Engine, Move, MoveSource, Player};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("===========================================");
    println!("      Obstruction AI Engine v0.1.0");
    println!("===========================================\n");

    let config = load_config();
    let mut engine = Engine::new(config);

    println!("--- Test 1: Corner Opening ---");
    test_opening(&engine);

    println!("\n--- Test 2: Forced Final Move ---");
    test_forced_final_move(&mut engine);

    println!("\n--- Test 3: Self-Play Game ---");
    play_self_play_game(&mut engine)?;

    // Persist everything learned this session
    engine.flush_cache();

    println!("\n===========================================");
    println!("          All Scenarios Completed");
    println!("===========================================");
    Ok(())
}

fn test_opening(engine: &Engine) {
    let result = engine.opening_move();
    println!("  Opening move: ({}, {})", result.best_move.row, result.best_move.col);
    println!("  Source: {:?}", result.source);

    let corner = matches!(
        (result.best_move.row, result.best_move.col),
        (1, 1) | (1, 6) | (6, 1) | (6, 6)
    );
    println!("  Result: {}", if corner { "PASS" } else { "FAIL - not a corner" });
}

fn test_forced_final_move(engine: &mut Engine) {
    let mut board = Board::new();
    let mut player = Player::First;
    for (row, col) in [(2, 2), (2, 5), (5, 2), (4, 4), (5, 6)] {
        board
            .apply_move(player, Move::new(row, col))
            .expect("scripted scenario moves are valid");
        player = player.opponent();
    }

    println!("  Position: one empty cell left at (6, 4)");
    match engine.compute_move(&board) {
        Some(result) => {
            println!("  Engine plays: ({}, {})", result.best_move.row, result.best_move.col);
            println!("  Score: {} (win on the next ply)", result.score);
            println!("  Nodes: {}", result.nodes);
            let pass = result.best_move == Move::new(6, 4) && result.score == 9;
            println!("  Result: {}", if pass { "PASS" } else { "FAIL" });
        }
        None => println!("  Result: FAIL - no move found"),
    }
}

/// Both sides use the engine until the board fills up. The player who makes
/// the last move wins, since the opponent is left without a reply.
fn play_self_play_game(engine: &mut Engine) -> Result<()> {
    let mut board = Board::new();
    let mut player = Player::First;

    // First move is special-cased: corner, no search
    let opening = engine.opening_move();
    board.apply_move(player, opening.best_move)?;
    println!(
        "  {:?} opens at ({}, {})",
        player, opening.best_move.row, opening.best_move.col
    );
    player = player.opponent();

    let mut last_to_move = Player::First;
    while !board.is_game_over() {
        let result = engine
            .compute_move(&board)
            .expect("board is not terminal inside the loop");
        board.apply_move(player, result.best_move)?;

        let source = match result.source {
            MoveSource::Cache => "cache",
            MoveSource::Search => "search",
            MoveSource::Opening => "opening",
        };
        println!(
            "  {:?} plays ({}, {}) [{source}, {} nodes]",
            player, result.best_move.row, result.best_move.col, result.nodes
        );

        last_to_move = player;
        player = player.opponent();
    }

    println!("\n{}", board);
    println!("  Game over after {} moves: {:?} wins", board.moves().len(), last_to_move);
    Ok(())
}
