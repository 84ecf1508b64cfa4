// Debug logging module for per-tick decision records.
//
// Each tick's state is written as one JSON line so a run can be inspected
// with standard line tools. Logging failures are reported through the log
// facade and never interrupt the game.

use log::error;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use crate::types::Coord;

/// A single debug log entry
#[derive(Debug, Serialize)]
pub struct TickRecord {
    pub tick: usize,
    pub head: Coord,
    pub apple: Option<Coord>,
    pub decision: String,
    pub body_len: usize,
    pub search_path_len: usize,
    pub timestamp: String,
}

pub struct DebugLogger {
    file: Option<BufWriter<File>>,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> DebugLogger {
        if !enabled {
            return DebugLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Some(BufWriter::new(file)),
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                DebugLogger::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> DebugLogger {
        DebugLogger { file: None }
    }

    /// Appends one tick record as a JSON line.
    pub fn log_tick(&mut self, record: &TickRecord) {
        let file = match self.file.as_mut() {
            Some(file) => file,
            None => return,
        };

        match serde_json::to_string(record) {
            Ok(json_line) => {
                if let Err(e) = writeln!(file, "{}", json_line) {
                    error!("Failed to write debug log entry: {}", e);
                } else if let Err(e) = file.flush() {
                    error!("Failed to flush debug log: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
            }
        }
    }
}

impl TickRecord {
    pub fn new(
        tick: usize,
        head: Coord,
        apple: Option<Coord>,
        decision: &str,
        body_len: usize,
        search_path_len: usize,
    ) -> TickRecord {
        TickRecord {
            tick,
            head,
            apple,
            decision: decision.to_string(),
            body_len,
            search_path_len,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
