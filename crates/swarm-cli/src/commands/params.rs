//! Parameter inspection commands

use anyhow::{Context, Result};
use clap::Subcommand;
use swarm_particles::SimParams;

#[derive(Subcommand)]
pub enum ParamsCommands {
    /// Print parameters as TOML (defaults, or a file with defaults filled in)
    Show {
        /// Path to a parameters TOML file
        path: Option<String>,
    },

    /// Validate a parameters file
    Check {
        /// Path to a parameters TOML file
        path: String,
    },
}

pub fn run(cmd: ParamsCommands) -> Result<()> {
    match cmd {
        ParamsCommands::Show { path } => {
            let params = match &path {
                Some(path) => load(path)?,
                None => SimParams::default(),
            };
            print!("{}", params.to_toml_string()?);
            Ok(())
        }
        ParamsCommands::Check { path } => {
            let params = load(&path)?;
            println!("{} is valid", path);
            println!(
                "  {} particle(s), spawn radius {}, c = {} {:+}i",
                params.count, params.spawn_radius, params.c_re, params.c_im
            );
            Ok(())
        }
    }
}

fn load(path: &str) -> Result<SimParams> {
    SimParams::load(path).with_context(|| format!("Failed to load parameters from {}", path))
}
