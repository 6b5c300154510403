//! Handler for the `scan` command.

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::cli::{output, Cli, ScanArgs};
use crate::error::Result;
use crate::scan::{JsonLinesSink, Scanner};
use crate::source::FileSource;

/// Execute the scan command.
pub async fn execute(cli: &Cli, args: &ScanArgs) -> Result<()> {
    let mut config = cli.load_config(&args.detector)?;
    if let Some(concurrency) = args.concurrency {
        config.scan.max_concurrent_events = concurrency;
        config.validate()?;
    }
    config.init_logging();

    let source = Arc::new(FileSource::open(&args.input).await?);
    let file = File::create(&args.output)?;
    let mut sink = JsonLinesSink::new(BufWriter::new(file));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ctrl_c = tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    let scanner = Scanner::new(source, config.scan.max_concurrent_events);
    let result = scanner.run(&mut sink, &config.detector, shutdown_rx).await;
    ctrl_c.abort();
    let summary = result?;

    output::section("Scan");
    output::key_value("Output", args.output.display());
    output::key_value("Events", summary.events);
    output::key_value("Analyzed", summary.analyzed);
    output::key_value("No data", summary.no_data);
    output::key_value("Failed", summary.failed);
    output::key_value("Rows written", summary.rows);
    output::key_value("Positive EV", summary.positive_ev);
    output::key_value("Arbitrage", summary.arbitrage);

    if summary.cancelled {
        warn!(analyzed = summary.analyzed, "Scan interrupted");
        output::warn("Scan interrupted; output holds every event finished before the signal");
    } else {
        output::ok("Scan complete");
    }
    Ok(())
}
