//! Lightweight profiling with thread-local counters and a scope guard.
//!
//! Enable with the environment variable SNAKE_PILOT_PROFILE=1. Disabled, the
//! guards are no-ops so the engine pays nothing on the hot path.

use std::cell::RefCell;
use std::time::Instant;

thread_local! {
    static FLOOD_FILL_TIME: RefCell<u64> = RefCell::new(0);
    static FLOOD_FILL_COUNT: RefCell<usize> = RefCell::new(0);

    static SPLIT_CHECK_TIME: RefCell<u64> = RefCell::new(0);
    static SPLIT_CHECK_COUNT: RefCell<usize> = RefCell::new(0);

    static RANK_TIME: RefCell<u64> = RefCell::new(0);
    static RANK_COUNT: RefCell<usize> = RefCell::new(0);

    static SEARCH_TIME: RefCell<u64> = RefCell::new(0);
    static SEARCH_COUNT: RefCell<usize> = RefCell::new(0);
}

#[inline]
pub fn is_profiling_enabled() -> bool {
    std::env::var("SNAKE_PILOT_PROFILE").is_ok()
}

pub struct ProfileGuard {
    start: Instant,
    category: &'static str,
}

impl ProfileGuard {
    pub fn new(category: &'static str) -> Option<Self> {
        if is_profiling_enabled() {
            Some(ProfileGuard {
                start: Instant::now(),
                category,
            })
        } else {
            None
        }
    }
}

impl Drop for ProfileGuard {
    fn drop(&mut self) {
        let elapsed_ns = self.start.elapsed().as_nanos() as u64;

        match self.category {
            "flood_fill" => {
                FLOOD_FILL_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                FLOOD_FILL_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "split_check" => {
                SPLIT_CHECK_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                SPLIT_CHECK_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "rank" => {
                RANK_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                RANK_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "search" => {
                SEARCH_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                SEARCH_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            _ => {}
        }
    }
}

fn line(label: &str, time_cell: &'static std::thread::LocalKey<RefCell<u64>>, count_cell: &'static std::thread::LocalKey<RefCell<usize>>) {
    let ns = time_cell.with(|t| *t.borrow());
    let count = count_cell.with(|c| *c.borrow());
    let ms = ns as f64 / 1_000_000.0;
    let avg_us = if count > 0 {
        ns as f64 / (count * 1000) as f64
    } else {
        0.0
    };
    eprintln!("  {:<14} {:>10.2}ms  {:>9} calls  {:>8.2}µs avg", label, ms, count, avg_us);
}

pub fn print_report(total_time_ms: u64) {
    if !is_profiling_enabled() {
        return;
    }

    eprintln!("\n═══════════════════════════════════════════════════════════");
    eprintln!("                 PERFORMANCE PROFILE");
    eprintln!("═══════════════════════════════════════════════════════════");
    eprintln!("Total Time: {}ms\n", total_time_ms);

    line("Search:", &SEARCH_TIME, &SEARCH_COUNT);
    line("Flood Fill:", &FLOOD_FILL_TIME, &FLOOD_FILL_COUNT);
    line("Split Check:", &SPLIT_CHECK_TIME, &SPLIT_CHECK_COUNT);
    line("Ranking:", &RANK_TIME, &RANK_COUNT);

    eprintln!("═══════════════════════════════════════════════════════════\n");
}

pub fn reset() {
    FLOOD_FILL_TIME.with(|t| *t.borrow_mut() = 0);
    FLOOD_FILL_COUNT.with(|c| *c.borrow_mut() = 0);
    SPLIT_CHECK_TIME.with(|t| *t.borrow_mut() = 0);
    SPLIT_CHECK_COUNT.with(|c| *c.borrow_mut() = 0);
    RANK_TIME.with(|t| *t.borrow_mut() = 0);
    RANK_COUNT.with(|c| *c.borrow_mut() = 0);
    SEARCH_TIME.with(|t| *t.borrow_mut() = 0);
    SEARCH_COUNT.with(|c| *c.borrow_mut() = 0);
}

#[macro_export]
macro_rules! profile {
    ($category:expr, $code:block) => {{
        let _guard = $crate::profiler::ProfileGuard::new($category);
        $code
    }};
}
