use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use keel_cli::cli::{Cli, Commands};
use keel_cli::commands::new::{generate_project, NewProjectConfig};

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref().unwrap_or("info"));

    match cli.command {
        Commands::New {
            project_name,
            template,
            output_dir,
            force,
        } => {
            let target = generate_project(&NewProjectConfig {
                project_name,
                template,
                output_dir,
                force,
            })?;
            println!("Project created at: {}", target.display());
            println!();
            println!("To get started:");
            println!("  cd {}", target.display());
            println!("  cargo run");
        }
    }

    Ok(())
}
