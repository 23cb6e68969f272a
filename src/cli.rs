// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "slipway")]
#[command(about = "Blue/green slot deployment for managed app-hosting services")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output for CI
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new slipway.yml configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Deploy the configured artifact to the target slot
    Deploy,

    /// Repoint production traffic to a slot
    SetActive {
        /// Slot to make active
        deployment: String,
    },

    /// Delete a slot (best effort once accepted)
    Delete {
        /// Slot to delete
        deployment: String,
    },

    /// Show the app's slots with their active flag and state
    Status,
}
