//! Pos file rendering and output.

pub mod format;
pub mod writer;

use std::env;
use std::fmt;

use chrono::{Local, NaiveDateTime};

pub use format::{NumberFormat, PosTable};
pub use writer::{board_name, output_dir, reset_output_dir, write_pos_files, PosFiles};

/// Line terminator used in pos files.
pub const EOL: &str = "\r\n";

/// Environment variables consulted for the author name, in order.
const USER_VARS: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

/// First line of every pos file: who generated it, when, and with what.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    pub author: String,
    pub timestamp: NaiveDateTime,
    pub version: String,
}

impl Stamp {
    /// Stamp for the current user, local time, and this tool's version.
    pub fn current() -> Self {
        let author = USER_VARS
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|name| !name.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        Self {
            author,
            timestamp: Local::now().naive_local(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "# Author: {} | Timeshtamp: {} | Plugin: {}",
            self.author,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.version
        )
    }
}
