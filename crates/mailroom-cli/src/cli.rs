use clap::{Parser, Subcommand};
use mailroom_classifiers::StrategyKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mailroom")]
#[command(
    author,
    version,
    about = "Classify contact messages and run category-driven automation"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a single message and print the result
    Classify {
        /// Message text to classify
        message: String,

        /// Strategy: keyword-based, statistical, linguistic-pipeline, zero-shot
        #[arg(short, long, env = "MAILROOM_STRATEGY", value_parser = parse_strategy)]
        strategy: Option<StrategyKind>,

        /// Classifier configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show keyword scoring details without persisting anything
    Preview {
        /// Message text to inspect
        message: String,

        /// Print the details as JSON
        #[arg(long)]
        json: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the full intake flow: validate, classify, record, automate
    Intake {
        /// Message text from the contact form
        message: String,

        /// Contact name
        #[arg(short, long)]
        name: String,

        /// Contact email address
        #[arg(short, long)]
        email: String,

        /// Strategy: keyword-based, statistical, linguistic-pipeline, zero-shot
        #[arg(short, long, env = "MAILROOM_STRATEGY", value_parser = parse_strategy)]
        strategy: Option<StrategyKind>,

        /// Classifier configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print record and outcome as JSON
        #[arg(long)]
        json: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Classify one message with every strategy side by side
    Compare {
        /// Message text to classify
        message: String,

        /// Classifier configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

fn parse_strategy(s: &str) -> Result<StrategyKind, String> {
    s.parse().map_err(|e| format!("{e}"))
}
