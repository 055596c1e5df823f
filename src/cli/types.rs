//! CLI type definitions.
//!
//! Clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Sift - batch applicant evaluation pipeline", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the batch pipeline over all pending rows
    Run {
        /// Path to the candidate CSV table (overrides config)
        #[arg(long)]
        csv: Option<String>,

        /// Directory for charts and logs (overrides config)
        #[arg(long)]
        output_dir: Option<String>,
    },

    /// Evaluate a single candidate row without touching the table
    Grade {
        /// Row index to evaluate
        index: usize,

        /// Path to the candidate CSV table (overrides config)
        #[arg(long)]
        csv: Option<String>,
    },

    /// Show per-row status and the batch tally
    Status {
        /// Path to the candidate CSV table (overrides config)
        #[arg(long)]
        csv: Option<String>,
    },

    /// Ranking reference table tooling
    #[command(subcommand)]
    Rankings(RankingsCommands),
}

#[derive(Subcommand)]
pub enum RankingsCommands {
    /// Merge three ranking sources into the mean-rank world table
    Aggregate {
        /// ARWU source CSV
        #[arg(long)]
        arwu: String,

        /// QS source CSV
        #[arg(long)]
        qs: String,

        /// THE source CSV
        #[arg(long = "the")]
        the_ranking: String,

        /// Output CSV path
        #[arg(long, default_value = "world_rankings.csv")]
        out: String,
    },

    /// Annotate a world table with a Europe/Outside Europe region column
    Region {
        /// World table CSV to annotate
        #[arg(long)]
        table: String,

        /// CSV mapping institution names to countries (name, country)
        #[arg(long)]
        locations: String,

        /// Output CSV path
        #[arg(long, default_value = "world_rankings_with_region.csv")]
        out: String,
    },
}
