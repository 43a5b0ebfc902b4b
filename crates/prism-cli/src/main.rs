// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! `prism`: list and load lighting techniques and profiles.

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::LoadTarget;
use config::PrismConfig;
use prism_core::LightingRegistry;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "prism", version, about = "Lighting technique registry and WGSL loader")]
struct Cli {
    /// Asset root (directory or URL); overrides PRISM_ASSET_ROOT and the config file.
    #[arg(long, global = true)]
    root: Option<String>,

    /// Configuration file.
    #[arg(long, global = true, default_value = "Prism.toml")]
    config: PathBuf,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List profiles and techniques.
    List,
    /// Show the jobs and locations of a technique.
    Show {
        /// Technique name.
        technique: String,
    },
    /// Load a profile (default) or a single technique and print a summary.
    Load {
        /// Profile to load.
        #[arg(long, conflicts_with = "technique")]
        profile: Option<String>,
        /// Technique to load instead of a profile.
        #[arg(long)]
        technique: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = PrismConfig::load(&cli.config)?;
    let root = config.package_root(cli.root.as_deref())?;
    log::debug!("Asset root: {root}");
    let registry = Arc::new(
        LightingRegistry::new(root).context("Failed to build the lighting registry")?,
    );

    match cli.command {
        Command::List => commands::list(&registry),
        Command::Show { technique } => commands::show(&registry, &technique)?,
        Command::Load { profile, technique } => {
            let target = match (profile, technique) {
                (_, Some(technique)) => LoadTarget::Technique(technique),
                (Some(profile), None) => LoadTarget::Profile(profile),
                (None, None) => LoadTarget::Profile(
                    config
                        .default_profile
                        .unwrap_or_else(|| registry.default_profile_name().to_string()),
                ),
            };
            commands::load(registry, target).await?;
        }
    }
    Ok(())
}
