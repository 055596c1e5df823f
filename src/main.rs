//! Sift CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sift::cli::{Cli, Commands, RankingsCommands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { csv, output_dir } => {
            sift::cli::commands::run::execute(csv, output_dir, cli.json).await
        }
        Commands::Grade { index, csv } => {
            sift::cli::commands::grade::execute(index, csv, cli.json).await
        }
        Commands::Status { csv } => sift::cli::commands::status::execute(csv, cli.json),
        Commands::Rankings(RankingsCommands::Aggregate { arwu, qs, the_ranking, out }) => {
            sift::cli::commands::rankings::aggregate(&arwu, &qs, &the_ranking, &out, cli.json)
        }
        Commands::Rankings(RankingsCommands::Region { table, locations, out }) => {
            sift::cli::commands::rankings::region(&table, &locations, &out, cli.json)
        }
    };

    if let Err(err) = result {
        sift::cli::handle_error(err, cli.json);
    }
}
