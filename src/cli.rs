use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "stockboard")]
#[command(about = "Stock dashboard asset server CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP asset server
    Serve {
        /// Port to listen on (falls back to PORT, then 10000)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Upload a folder of assets into the blob store
    Upload {
        /// Root directory to walk; files are keyed by their relative path
        source: PathBuf,
    },
    /// Show a summary of the blob store contents
    Status,
}

pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            commands::serve::run(port);
        }
        Commands::Upload { source } => {
            commands::upload::run(source);
        }
        Commands::Status => {
            commands::status::run();
        }
    }
}
