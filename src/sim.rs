// Headless game loop.
//
// Drives the pilot tick by tick: decide, hold still while a search is still
// pending, move, eat, respawn the apple, and stop on death, a full board, or
// the tick limit. The loop doubles as the integration-test harness.

use std::time::Instant;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{Board, StepOutcome};
use crate::config::Config;
use crate::debug_logger::{DebugLogger, TickRecord};
use crate::pilot::{Decision, Pilot};
use crate::search::ResumeCursor;
use crate::types::Coord;

/// How a single game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    /// The snake ran into a wall or itself.
    Died,
    /// The snake covered every cell of the board.
    FilledBoard,
    /// The tick limit cut the game short.
    TickLimit,
}

/// Statistics for one finished game.
#[derive(Debug, Clone)]
pub struct GameStats {
    pub end: GameEnd,
    pub ticks: usize,
    pub apples: usize,
    pub final_len: usize,
    /// Ticks spent holding still while the search was suspended.
    pub searching_ticks: usize,
    pub elapsed_ms: u128,
}

/// One seeded, self-contained game.
pub struct GameRunner {
    board: Board,
    pilot: Pilot,
    logger: DebugLogger,
    rng: StdRng,
    max_ticks: usize,
}

impl GameRunner {
    pub fn new(config: &Config, seed: u64) -> GameRunner {
        let board = Board::new(
            config.board.size,
            Coord::new(config.board.start_x, config.board.start_y),
        );
        let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path);

        GameRunner {
            board,
            pilot: Pilot::new(config.clone()),
            logger,
            rng: StdRng::seed_from_u64(seed),
            max_ticks: config.sim.max_ticks,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Runs the game to its end and returns the stats.
    pub fn run(&mut self) -> GameStats {
        let start = Instant::now();
        let mut stats = GameStats {
            end: GameEnd::TickLimit,
            ticks: 0,
            apples: 0,
            final_len: self.board.body_len(),
            searching_ticks: 0,
            elapsed_ms: 0,
        };

        if let Some(apple) = self.board.place_apple(&mut self.rng) {
            self.pilot.set_target(apple);
        }

        let mut resume: Option<ResumeCursor> = None;
        for tick in 0..self.max_ticks {
            stats.ticks = tick + 1;

            match self.pilot.decide(&self.board, resume.take()) {
                Decision::Searching(cursor) => {
                    // The board must not change while the token is alive,
                    // so the snake holds still this tick.
                    stats.searching_ticks += 1;
                    self.log_tick(tick, "searching");
                    resume = Some(cursor);
                }
                Decision::Move(direction) => {
                    self.log_tick(tick, direction.as_str());
                    match self.board.step(direction) {
                        StepOutcome::Died => {
                            warn!(
                                "tick {}: snake died moving {} at {:?}",
                                tick,
                                direction.as_str(),
                                self.board.head()
                            );
                            stats.end = GameEnd::Died;
                            break;
                        }
                        StepOutcome::Moved { ate } => {
                            if ate {
                                stats.apples += 1;
                                match self.board.place_apple(&mut self.rng) {
                                    Some(apple) => self.pilot.set_target(apple),
                                    None => {
                                        stats.end = GameEnd::FilledBoard;
                                        break;
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        stats.final_len = self.board.body_len();
        stats.elapsed_ms = start.elapsed().as_millis();
        info!(
            "game over: {:?} after {} ticks, {} apples, final length {}",
            stats.end, stats.ticks, stats.apples, stats.final_len
        );
        stats
    }

    fn log_tick(&mut self, tick: usize, decision: &str) {
        let record = TickRecord::new(
            tick,
            self.board.head(),
            self.board.apple(),
            decision,
            self.board.body_len(),
            self.pilot.search_path().len(),
        );
        self.logger.log_tick(&record);
    }
}

/// Prints a run summary across games in one report block.
pub fn print_report(results: &[GameStats]) {
    println!("\n═══════════════════════════════════════════════════════════");
    println!("                      RUN REPORT");
    println!("═══════════════════════════════════════════════════════════");
    println!("Games:          {}", results.len());

    if results.is_empty() {
        println!("═══════════════════════════════════════════════════════════\n");
        return;
    }

    let apples: usize = results.iter().map(|r| r.apples).sum();
    let avg_len: f64 =
        results.iter().map(|r| r.final_len as f64).sum::<f64>() / results.len() as f64;
    let filled = results
        .iter()
        .filter(|r| r.end == GameEnd::FilledBoard)
        .count();
    let died = results.iter().filter(|r| r.end == GameEnd::Died).count();

    println!("Apples eaten:   {}", apples);
    println!("Avg final len:  {:.1}", avg_len);
    println!("Boards filled:  {}", filled);
    println!("Deaths:         {}", died);
    println!("═══════════════════════════════════════════════════════════\n");

    for (i, result) in results.iter().enumerate() {
        println!(
            "Game {}: {:?} - {} ticks ({} searching), {} apples, length {}, {}ms",
            i + 1,
            result.end,
            result.ticks,
            result.searching_ticks,
            result.apples,
            result.final_len,
            result.elapsed_ms
        );
    }
    println!();
}
