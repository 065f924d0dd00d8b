use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Beo photo editor
#[derive(Debug, Parser)]
#[command(name = "beo", about = "AI photo edits through a Gemini-backed proxy")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the edit proxy server
    Serve(ServeArgs),
    #[command(flatten)]
    Client(ClientCommand),
}

/// Commands talking to a running edit proxy or the local history
#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// Localized edit around a point
    Retouch {
        #[command(flatten)]
        edit: EditArgs,
        /// Horizontal pixel coordinate of the edit
        #[arg(short)]
        x: u32,
        /// Vertical pixel coordinate of the edit
        #[arg(short)]
        y: u32,
    },
    /// Apply a stylistic filter to the whole image
    Filter {
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Apply a global adjustment
    Adjust {
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Show or clear the edit history
    History {
        #[command(flatten)]
        store: HistoryArgs,
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
}

#[derive(Debug, clap::Args)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "beo.toml", env = "BEO_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "BEO_LISTEN")]
    pub listen: Option<SocketAddr>,
}

#[derive(Debug, clap::Args)]
pub struct EditArgs {
    /// Source image file
    pub image: PathBuf,

    /// Edit instruction
    #[arg(short, long)]
    pub prompt: String,

    /// Base URL of the edit proxy
    #[arg(long, default_value = "http://localhost:3000", env = "BEO_ENDPOINT")]
    pub endpoint: String,

    /// Write the edited image here instead of printing its data URL
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub store: HistoryArgs,
}

#[derive(Debug, clap::Args)]
pub struct HistoryArgs {
    /// Directory holding the edit history
    #[arg(long, default_value = ".beo", env = "BEO_HISTORY_DIR")]
    pub history_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum HistoryAction {
    /// List entries, most recent first (default)
    List {
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove every entry
    Clear,
}
