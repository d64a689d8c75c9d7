//! Command line definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "evhub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "EventHub plans, gating and dashboard from the command line")]
pub struct Cli {
    /// Config file (stem or full name); defaults to `evhub` in the working directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve and print a plan as JSON
    Plan {
        /// Resolve for this user instead of the signed-in one
        #[arg(long)]
        user: Option<String>,
    },
    /// Check whether the signed-in user may use a feature
    Gate {
        feature_key: String,
        /// Current usage, checked against the plan limit
        #[arg(long)]
        usage: Option<u64>,
    },
    /// List events, newest first
    Events {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Dashboard summary, or RSVP stats of a single event
    Stats { event_id: Option<String> },
}
