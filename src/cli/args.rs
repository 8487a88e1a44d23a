// src/cli/args.rs
use crate::constants::DEFAULT_DATE_FROM;
use crate::domain::Language;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Target language of the vocabulary [default: de]
    #[arg(short, long, value_enum, ignore_case = true, global = true)]
    pub lang: Option<Language>,

    /// Deck file to append to, `-` for standard output [default: -]
    #[arg(short, long, value_name = "FILE", global = true)]
    pub file: Option<PathBuf>,

    /// API key for the model
    #[arg(short, long, env = "GOOGLE_API_KEY", hide_env_values = true, global = true)]
    pub key: Option<String>,

    /// Model used to generate cards [default: gemini-2.5-flash]
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Config file [default: ~/.config/karten/config.toml]
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate a single card and print it as JSON
    Card {
        /// Word to look up
        #[arg(value_name = "WORD")]
        word: String,
    },

    /// Build cards for the given words, skipping words already in the deck file
    Deck {
        /// Words to turn into cards
        #[arg(value_name = "WORDS", required = true)]
        words: Vec<String>,
    },

    /// Build cards for words looked up on a Kindle
    KindleDeck {
        /// Kindle mount point (falls back to the config file)
        #[arg(value_name = "KINDLE_DIR")]
        kindle_dir: Option<PathBuf>,

        /// Only lookups from this date on are included
        #[arg(long, value_name = "YYYY-MM-DD", default_value = DEFAULT_DATE_FROM)]
        date_from: NaiveDate,
    },

    /// List words looked up on a Kindle, most recent first
    KindleWords {
        /// Kindle mount point (falls back to the config file)
        #[arg(value_name = "KINDLE_DIR")]
        kindle_dir: Option<PathBuf>,

        /// Only lookups from this date on are included
        #[arg(long, value_name = "YYYY-MM-DD", default_value = DEFAULT_DATE_FROM)]
        date_from: NaiveDate,
    },

    /// Write a config file with the built-in defaults to the --config path
    InitConfig {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}
