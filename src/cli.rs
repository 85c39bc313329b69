// src/cli.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use inquire::{InquireError, Select, Text};

use crate::run::RunRequest;

const MODE_CATEGORY: &str = "Whole category";
const MODE_SEARCH: &str = "Keyword search";

#[derive(Debug, Parser)]
#[command(
    name = "wb_scrape",
    version,
    about = "Collect Wildberries product listings into a CSV file"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Settings file to use instead of ./wb_scrape.toml.
    #[arg(global = true, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Skip the per-product sales lookups.
    #[arg(global = true, long)]
    pub no_sales: bool,
    /// Increase logging verbosity (-v, -vv).
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Collect every product in a category, given its name or URL.
    Category {
        #[arg(required = true, num_args = 1..)]
        input: Vec<String>,
    },
    /// Collect the results of a keyword search.
    Search {
        #[arg(required = true, num_args = 1..)]
        keyword: Vec<String>,
    },
}

impl Commands {
    pub fn into_request(self) -> RunRequest {
        match self {
            Commands::Category { input } => RunRequest::Category {
                input: input.join(" "),
            },
            Commands::Search { keyword } => RunRequest::Search {
                keyword: keyword.join(" "),
            },
        }
    }
}

/// Ask for the run mode and its input on the terminal.
pub fn prompt_request() -> Result<RunRequest, InquireError> {
    let mode = Select::new("What should be collected?", vec![MODE_CATEGORY, MODE_SEARCH]).prompt()?;
    let label = if mode == MODE_CATEGORY {
        "Category name or link:"
    } else {
        "Search query:"
    };
    let text = Text::new(label).prompt()?;
    Ok(request_for(mode, text))
}

/// Typed text is kept as entered; category names are matched exactly.
fn request_for(mode: &str, text: String) -> RunRequest {
    if mode == MODE_CATEGORY {
        RunRequest::Category { input: text }
    } else {
        RunRequest::Search { keyword: text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompted_text_is_passed_through_unchanged() {
        assert_eq!(
            request_for(MODE_CATEGORY, " Boots ".into()),
            RunRequest::Category { input: " Boots ".into() }
        );
        assert_eq!(
            request_for(MODE_SEARCH, "  red boots".into()),
            RunRequest::Search {
                keyword: "  red boots".into()
            }
        );
    }

    #[test]
    fn category_words_are_joined() {
        let cli = Cli::try_parse_from(["wb_scrape", "category", "Женская", "обувь"]).unwrap();
        assert_eq!(
            cli.command.unwrap().into_request(),
            RunRequest::Category {
                input: "Женская обувь".into()
            }
        );
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["wb_scrape", "search", "red", "boots", "--no-sales", "-vv"]).unwrap();
        assert!(cli.no_sales);
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.command.unwrap().into_request(),
            RunRequest::Search {
                keyword: "red boots".into()
            }
        );
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["wb_scrape"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn search_needs_a_keyword() {
        assert!(Cli::try_parse_from(["wb_scrape", "search"]).is_err());
    }
}
