pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ranking::SortKey;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "fluent-workbench")]
#[command(about = "Chapter workspaces and exercise subjects for working through a textbook")]
pub struct CliConfig {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "workbench.toml")]
    pub config: String,

    /// Override the workspace root from the configuration file
    #[arg(long)]
    pub root: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a chapter workspace (e.g. ch01_data_model)
    Init {
        chapter: String,

        #[arg(long)]
        title: Option<String>,

        /// Overwrite files that already exist
        #[arg(long)]
        force: bool,

        #[arg(long, value_delimiter = ',')]
        variants: Vec<String>,

        /// Show the planned files without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Check a chapter workspace for missing pieces
    Verify { chapter: String },
    /// List chapter workspaces under the root
    List,
    /// Print a French deck
    Deck {
        /// Use the textbook suit order
        #[arg(long)]
        classic: bool,

        #[arg(long)]
        shuffle: bool,

        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Only show cards of this suit
        #[arg(long)]
        suit: Option<String>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Evaluate vector operations on one or two vectors
    Vector {
        #[arg(allow_negative_numbers = true, num_args = 2..=4, required = true)]
        components: Vec<f64>,
    },
    /// Step through one of the exercise subjects
    Walkthrough {
        #[arg(value_enum)]
        subject: Subject,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Rank,
    Suit,
    SpadesHigh,
}

#[cfg(feature = "cli")]
impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Rank => SortKey::RankThenSuit,
            SortArg::Suit => SortKey::SuitThenRank,
            SortArg::SpadesHigh => SortKey::SpadesHigh,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Subject {
    Deck,
    Vector,
    Compare,
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_deck_command_arguments() {
        let cli = CliConfig::try_parse_from([
            "fluent-workbench",
            "deck",
            "--seed",
            "3",
            "--sort",
            "spades-high",
            "--format",
            "csv",
        ])
        .unwrap();

        match cli.command {
            Command::Deck {
                seed, sort, format, ..
            } => {
                assert_eq!(seed, Some(3));
                assert_eq!(sort.map(SortKey::from), Some(SortKey::SpadesHigh));
                assert_eq!(format, OutputFormat::Csv);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_vector_command_takes_negative_components() {
        let cli =
            CliConfig::try_parse_from(["fluent-workbench", "vector", "-3", "4.5"]).unwrap();
        match cli.command {
            Command::Vector { components } => assert_eq!(components, vec![-3.0, 4.5]),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
