//! Basic facade example.
//!
//! Loads `configs/logger_config.json`, logs at every severity and lets the
//! guard shut logging down on exit.
//!
//! Run with:
//! ```bash
//! cargo run --example basic
//! ```

use cortexi_logging::{Logging, LoggingGuard};

fn main() {
    let _guard = LoggingGuard::from_json("configs/logger_config.json");

    Logging::info("Hello, World!");
    Logging::warn("This is a warning message.");
    Logging::error("This is an error message.");
    Logging::verbose(1, "This is a verbose message.");
    // The sample config sets `fatal_terminates` to false, so this returns.
    Logging::fatal("This is a fatal message.");
}
