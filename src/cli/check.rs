//! Configuration validation commands.

use std::path::Path;

use crate::cli::output;
use crate::config::Config;
use crate::error::Result;

/// Validate configuration file without analyzing anything.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    output::note(&format!("Checking configuration: {}", path.display()));

    let config = Config::load(path)?;
    output::ok("Configuration file is valid");

    output::section("Summary");
    output::key_value("Log level", &config.logging.level);
    output::key_value("Log format", &config.logging.format);
    output::key_value("Min EV", output::percent(config.detector.min_ev));
    output::key_value("Min bookmakers", config.detector.min_bookmakers);
    output::key_value(
        "Arb needs +EV",
        config.detector.arbitrage_requires_positive_ev,
    );
    output::key_value("Concurrency", config.scan.max_concurrent_events);

    if !config.detector.arbitrage_requires_positive_ev {
        output::warn("Arbitrage is reported even for events without a +EV row");
    }
    Ok(())
}
