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

use anyhow::{Context, Result};
use prism_core::{LightingRegistry, Scheme};
use prism_io::{BundleLoader, HttpFetcher, LoadOptions, LoadedJob};
use std::sync::Arc;

/// Prints every profile with its techniques, then every technique with its job keys.
pub fn list(registry: &LightingRegistry) {
    println!("Profiles:");
    for profile in registry.profiles() {
        let marker = default_marker(&profile.name, registry.default_profile_name());
        println!(
            "  {}{marker}: {}",
            profile.name,
            profile.technique_names.join(", ")
        );
    }

    println!("Techniques:");
    for technique in registry.techniques() {
        let marker = default_marker(&technique.name, registry.default_technique_name());
        println!(
            "  {}{marker}: {}",
            technique.name,
            technique.job_keys().collect::<Vec<_>>().join(", ")
        );
    }
}

/// Prints the details of a single technique.
pub fn show(registry: &LightingRegistry, name: &str) -> Result<()> {
    let technique = registry.technique(name)?;
    println!("{}", technique.name);
    println!("  {}", technique.description);
    println!("  prelude: {}", technique.prelude_location);
    for job in &technique.jobs {
        println!("  {} -> {}", job.label, job.location);
    }
    Ok(())
}

/// What `prism load` should load.
pub enum LoadTarget {
    Profile(String),
    Technique(String),
}

/// Loads a profile or technique bundle and prints a per-job summary.
pub async fn load(registry: Arc<LightingRegistry>, target: LoadTarget) -> Result<()> {
    let options = load_options(&registry);
    let loader = BundleLoader::new(registry);

    match target {
        LoadTarget::Profile(name) => {
            let bundle = loader
                .load_profile_bundle(&name, &options)
                .await
                .with_context(|| format!("Failed to load profile '{name}'"))?;
            println!("Profile {} ({})", bundle.profile.name, bundle.profile.description);
            for technique in &bundle.techniques {
                print_technique(&technique.technique_name, &technique.prelude_text, &technique.jobs);
            }
        }
        LoadTarget::Technique(name) => {
            let bundle = loader
                .load_technique_bundle(&name, &options)
                .await
                .with_context(|| format!("Failed to load technique '{name}'"))?;
            print_technique(&name, &bundle.prelude_text, &bundle.jobs);
        }
    }
    Ok(())
}

fn load_options(registry: &LightingRegistry) -> LoadOptions {
    match registry.root().location().scheme() {
        Scheme::LocalFile => LoadOptions::new(),
        Scheme::Network => LoadOptions::new().with_fetcher(Arc::new(HttpFetcher::new())),
    }
}

fn print_technique(name: &str, prelude: &str, jobs: &[LoadedJob]) {
    println!("  {name}: prelude {} bytes", prelude.len());
    for job in jobs {
        println!("    {} {} bytes", job.label, job.text.len());
    }
}

fn default_marker(name: &str, default: &str) -> &'static str {
    if name == default {
        " (default)"
    } else {
        ""
    }
}
