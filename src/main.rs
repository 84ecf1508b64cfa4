use std::env;
use std::time::Instant;

use log::info;

use snake_pilot::config::Config;
use snake_pilot::profiler;
use snake_pilot::sim::{print_report, GameRunner};

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment
    // variable is set, we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting snake-pilot...");

    // Load configuration once at startup
    let config = Config::load_or_default();

    let start = Instant::now();
    let mut results = Vec::new();
    for game in 0..config.sim.games {
        let seed = config.sim.seed.wrapping_add(game as u64);
        info!("Game {} (seed {})", game + 1, seed);
        let mut runner = GameRunner::new(&config, seed);
        results.push(runner.run());
    }

    print_report(&results);
    profiler::print_report(start.elapsed().as_millis() as u64);
}
