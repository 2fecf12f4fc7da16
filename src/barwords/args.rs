use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "barwords")]
#[command(about = "Convert four dictionary words to a barcode and back", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding config.json, layouts.json and the word list [env: BARWORDS_HOME]
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode four words into a barcode
    #[command(alias = "e")]
    Encode {
        /// The four words, in barcode order
        #[arg(required = true, num_args = 4)]
        words: Vec<String>,

        /// Layout name (defaults to the first layout by name)
        #[arg(short, long)]
        layout: Option<String>,
    },

    /// Decode a barcode into its four words
    #[command(alias = "d")]
    Decode {
        barcode: String,

        /// Layout name (defaults to the first layout by name)
        #[arg(short, long)]
        layout: Option<String>,
    },

    /// Answer a JSON conversion request
    Convert {
        /// Read the request from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Manage layouts
    #[command(subcommand)]
    Layouts(LayoutCommands),

    /// Manage the word list
    #[command(subcommand)]
    Words(WordCommands),

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., max-words)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Create the home directory, default config and default layout
    Init,
}

#[derive(Subcommand, Debug)]
pub enum LayoutCommands {
    /// List layouts
    #[command(alias = "ls")]
    List,

    /// Show the rules of a layout
    Show { name: String },

    /// Import layouts from a JSON file, replacing same-named ones
    Import { file: PathBuf },

    /// Delete a layout
    #[command(alias = "rm")]
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum WordCommands {
    /// Build a word list from a text file
    Build {
        /// Source text, one candidate word per line
        input: PathBuf,

        /// Where to write the list (defaults to the configured dictionary file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Shortest word to keep
        #[arg(long)]
        min_length: Option<usize>,

        /// Most words to keep
        #[arg(long)]
        max_words: Option<usize>,
    },
}
