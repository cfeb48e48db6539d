// src/cli/mod.rs
// Command line entry points: the HUD runner plus tools for the settings database.

pub mod reset;
pub mod set;
pub mod show;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fovlock-hud")]
#[command(about = "FOV lock HUD with persistent overlay settings", long_about = None)]
pub struct Cli {
    /// Settings database (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Runner config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use the in-process FOV provider instead of the native plugin
    #[arg(long)]
    pub simulate: bool,

    /// Exit after this many frames
    #[arg(long)]
    pub frames: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every setting with its current and persisted value
    Show {
        /// Print the merged settings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change one setting and save it
    Set {
        /// Setting name, e.g. offset
        name: String,
        /// New value; booleans accept true/false or integers
        value: String,
    },

    /// Delete every persisted setting so the defaults apply again
    Reset,
}
