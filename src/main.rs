use clap::Parser;
use sharpline::cli::{self, output, CheckCommand, Cli, Commands};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Analyze(args) => cli::analyze::execute(&cli, args).await,
        Commands::Scan(args) => cli::scan::execute(&cli, args).await,
        Commands::Odds(args) => cli::odds::execute(args),
        Commands::Check(CheckCommand::Config) => cli::check::execute_config(&cli.config),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
