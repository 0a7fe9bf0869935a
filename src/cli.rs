// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines the upgrade subcommand and global output/engine flags.

use clap::{Parser, Subcommand};
use repull::runtime::RuntimeType;
use repull::upgrade::ClassifierKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repull")]
#[command(about = "Pull newer images for running containers and recreate them in place")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print containers that changed
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./repull.yml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Engine socket path
    #[arg(long, global = true, env = "REPULL_SOCKET", value_name = "PATH")]
    pub socket: Option<String>,

    /// Engine type, skipping auto-detection
    #[arg(long, global = true, value_enum)]
    pub runtime: Option<RuntimeType>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upgrade a container image to the most recent with the same tag
    Upgrade {
        /// Name of the running container to upgrade
        #[arg(short, long, value_name = "NAME")]
        container: Option<String>,

        /// Upgrade all running containers
        #[arg(short, long)]
        all: bool,

        /// Only pull images, do not recreate containers
        #[arg(short, long = "pullonly")]
        pull_only: bool,

        /// Seconds to wait for a container to stop before it is killed
        #[arg(long, value_name = "SECS")]
        stop_timeout: Option<u64>,

        /// How to tell whether a pull fetched a newer image
        #[arg(long, value_enum)]
        classifier: Option<ClassifierKind>,
    },
}
