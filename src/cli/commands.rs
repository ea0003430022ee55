use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `Solution Explorer` - browse and run LLM workflow demos.
#[derive(Parser, Debug)]
#[command(name = "solution-explorer")]
#[command(version)]
#[command(about = "A catalog of runnable LLM workflow demos.", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.solution-explorer/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web explorer
    Serve {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// List catalog entries
    List {
        /// Case-insensitive text matched against name and description
        #[arg(short, long)]
        search: Option<String>,

        /// Only show entries with this tag (repeatable; any tag matches)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Show one catalog entry
    Show {
        /// Solution id
        id: u32,
    },

    /// Run a solution once and print its result
    Run {
        /// Solution id
        id: u32,

        /// Input text or image URL (defaults to the solution's sample input)
        input: Option<String>,

        /// Chat model override (basic chat only)
        #[arg(long)]
        model: Option<String>,
    },

    /// Show the effective configuration
    Status,
}
