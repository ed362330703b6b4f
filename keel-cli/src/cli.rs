//! CLI argument parsing definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "keel", author, version, about = "Keel project tooling", long_about = None)]
pub struct Cli {
    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a new project from a template
    New {
        /// Name of the project
        project_name: String,

        /// Template id (standard-3tier)
        #[arg(long = "tpl", value_name = "TEMPLATE")]
        template: String,

        /// Directory where the project will be generated
        #[arg(short = 'o', long = "output", value_name = "PATH")]
        output_dir: PathBuf,

        /// Overwrite a non-empty target directory
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}
