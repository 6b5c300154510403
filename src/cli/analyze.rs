//! Handler for the `analyze` command.

use std::io;

use tabled::{Table, Tabled};
use tracing::{info, warn};

use crate::cli::{output, AnalyzeArgs, Cli};
use crate::config::DetectorConfig;
use crate::error::Result;
use crate::pipeline::{analyze_event, AggregatedOutcomeRow, EventAnalysis};
use crate::scan::{JsonLinesSink, RowSink};
use crate::source::{FileSource, SnapshotSource};

#[derive(Tabled)]
struct RowView {
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Best")]
    best: String,
    #[tabled(rename = "Book")]
    book: String,
    #[tabled(rename = "Books")]
    books: usize,
    #[tabled(rename = "Fair")]
    fair: String,
    #[tabled(rename = "Break-even")]
    break_even: String,
    #[tabled(rename = "EV")]
    ev: String,
    #[tabled(rename = "Arb")]
    arb: &'static str,
}

impl From<&AggregatedOutcomeRow> for RowView {
    fn from(row: &AggregatedOutcomeRow) -> Self {
        let agg = &row.aggregate;
        Self {
            line: agg.line_id.to_string(),
            outcome: agg.outcome.clone(),
            best: agg.best_price.to_string(),
            book: agg.bookmaker_with_best_price.to_string(),
            books: agg.num_bookmakers,
            fair: output::or_dash(agg.avg_no_vig_prob.map(output::percent)),
            break_even: output::or_dash(row.min_price_for_positive_ev),
            ev: output::or_dash(row.ev_pct.map(output::percent)),
            arb: if row.is_arbitrage { "yes" } else { "" },
        }
    }
}

#[derive(Default)]
struct Totals {
    events: usize,
    analyzed: usize,
    no_data: usize,
    positive_ev: usize,
    arbitrage: usize,
}

/// Execute the analyze command.
pub async fn execute(cli: &Cli, args: &AnalyzeArgs) -> Result<()> {
    let config = cli.load_config(&args.detector)?;
    config.init_logging();

    let source = FileSource::open(&args.file).await?;
    let ids = source.snapshot_ids().await?;
    info!(file = %args.file.display(), events = ids.len(), "Analyzing snapshot");

    let mut sink = args.json.then(|| JsonLinesSink::new(io::stdout()));
    let mut totals = Totals {
        events: ids.len(),
        ..Totals::default()
    };

    for id in &ids {
        let raw = source.snapshot(id).await?;
        let analysis = match analyze_event(&raw) {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(event = %id, error = %e, "Skipping event");
                totals.no_data += 1;
                continue;
            }
        };

        let opportunities = analysis.opportunities(&config.detector);
        totals.analyzed += 1;
        totals.positive_ev += opportunities.positive_ev().len();
        totals.arbitrage += opportunities.arbitrage().len();

        match sink.as_mut() {
            Some(sink) => sink.write_event(&analysis)?,
            None => print_event(&analysis, &config.detector),
        }
    }

    match sink.as_mut() {
        Some(sink) => sink.flush()?,
        None => print_totals(&totals),
    }
    Ok(())
}

fn print_event(analysis: &EventAnalysis, detector: &DetectorConfig) {
    let ctx = &analysis.context;
    output::section(&format!(
        "{}  ({}, {})",
        ctx.display_name(),
        ctx.sport_key,
        ctx.commence_time.format("%Y-%m-%d %H:%M UTC")
    ));
    if let Some(at) = ctx.snapshot_at {
        output::key_value("Snapshot", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    let views: Vec<RowView> = analysis.rows.iter().map(RowView::from).collect();
    output::table(&Table::new(views).to_string());

    if analysis.rejected_quotes > 0 {
        output::warn(&format!("{} quotes rejected for invalid prices", analysis.rejected_quotes));
    }
    for issue in &analysis.issues {
        output::warn(&issue.to_string());
    }

    let opportunities = analysis.opportunities(detector);
    if opportunities.is_none() {
        output::note("No opportunities.");
        return;
    }

    for row in opportunities.positive_ev() {
        let agg = &row.aggregate;
        output::ok(&format!(
            "+EV  {} {} {} at {} (EV {})",
            agg.line_id,
            agg.outcome,
            agg.best_price,
            agg.bookmaker_with_best_price,
            output::or_dash(row.ev_pct.map(output::percent)),
        ));
    }
    for row in opportunities.arbitrage() {
        let agg = &row.aggregate;
        let Some(plan) = row.arbitrage else { continue };
        output::ok(&format!(
            "ARB  {} {} {} at {} vs {} {} at {}: stake {} / {}, profit {}",
            agg.line_id,
            agg.outcome,
            agg.best_price,
            agg.bookmaker_with_best_price,
            output::or_dash(agg.counterpart.as_deref()),
            output::or_dash(row.counterpart_best_price),
            output::or_dash(row.counterpart_bookmaker.as_ref()),
            output::percent(plan.stake),
            output::percent(plan.counterpart_stake),
            output::percent(plan.profit_if_win.min(plan.profit_if_counterpart_wins)),
        ));
    }
}

fn print_totals(totals: &Totals) {
    output::section("Summary");
    output::key_value("Events", totals.events);
    output::key_value("Analyzed", totals.analyzed);
    output::key_value("No data", totals.no_data);
    output::key_value("Positive EV", totals.positive_ev);
    output::key_value("Arbitrage", totals.arbitrage);
}
