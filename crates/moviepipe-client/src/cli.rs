//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::selector::Transport;

/// Movie search over a remote gateway or a local worker channel.
#[derive(Debug, Parser)]
#[command(name = "moviepipe", version, about)]
pub struct Cli {
    /// Base URL of the movie gateway
    #[arg(
        long,
        env = "MOVIEPIPE_GATEWAY",
        default_value = "http://localhost:8080/api/movies",
        global = true
    )]
    pub gateway: String,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search for movies over the chosen transport
    Search {
        /// Transport to use for the search
        #[arg(long, value_enum, default_value = "remote")]
        transport: TransportArg,

        /// How many movies to ask for
        #[arg(long, default_value_t = 6)]
        amount: u64,

        /// Genre filter; empty means all genres
        #[arg(long, default_value = "")]
        genre: String,

        /// Release-year range hint passed along with the search
        #[arg(long, default_value_t = 6)]
        range: u32,
    },

    /// Probe whether the local worker is reachable through the gateway
    Probe,

    /// Run the worker in the foreground
    Worker {
        /// Path to the worker channel endpoint
        #[arg(long, env = "MOVIEPIPE_SOCKET")]
        socket_path: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportArg {
    /// Two-step flow through the remote movie source
    Remote,
    /// Structured search served by the local worker
    Local,
}

impl From<TransportArg> for Transport {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::Remote => Transport::Remote,
            TransportArg::Local => Transport::Local,
        }
    }
}
