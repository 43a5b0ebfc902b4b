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
use prism_core::PackageRoot;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Represents the structure of the `Prism.toml` configuration file.
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PrismConfig {
    /// Directory or URL holding the `techniques/` tree.
    pub asset_root: Option<String>,
    /// Profile loaded by `prism load` when none is given.
    pub default_profile: Option<String>,
}

impl PrismConfig {
    /// Reads the configuration file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at '{}', using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    /// Parses configuration text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Picks the package root: command line, then environment, then file, then bundled.
    pub fn package_root(&self, cli_root: Option<&str>) -> Result<PackageRoot> {
        if let Some(root) = non_blank(cli_root) {
            return parse_root(root);
        }
        if let Some(root) = PackageRoot::from_env_override() {
            return root.context("Invalid asset root in the environment");
        }
        match non_blank(self.asset_root.as_deref()) {
            Some(root) => parse_root(root),
            None => Ok(PackageRoot::bundled()?),
        }
    }
}

fn non_blank(root: Option<&str>) -> Option<&str> {
    root.map(str::trim).filter(|root| !root.is_empty())
}

fn parse_root(root: &str) -> Result<PackageRoot> {
    PackageRoot::parse(root).with_context(|| format!("Invalid asset root '{root}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = PrismConfig::parse(
            "asset_root = \"https://cdn.example/lighting/\"\ndefault_profile = \"reference\"\n",
        )
        .unwrap();
        assert_eq!(
            config.asset_root.as_deref(),
            Some("https://cdn.example/lighting/")
        );
        assert_eq!(config.default_profile.as_deref(), Some("reference"));
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        assert_eq!(PrismConfig::parse("").unwrap(), PrismConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(PrismConfig::parse("asset_rot = \"typo\"").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PrismConfig::load(&dir.path().join("Prism.toml")).unwrap();
        assert_eq!(config, PrismConfig::default());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Prism.toml");
        fs::write(&path, "default_profile = \"hybrid\"").unwrap();
        let config = PrismConfig::load(&path).unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("hybrid"));
    }

    // Only test in this crate touching PRISM_ASSET_ROOT.
    #[test]
    fn test_root_precedence() {
        use prism_core::location::ASSET_ROOT_ENV;

        let config = PrismConfig {
            asset_root: Some("https://file.example/pkg/".to_string()),
            default_profile: None,
        };

        std::env::set_var(ASSET_ROOT_ENV, "https://env.example/pkg/");
        let root = config.package_root(Some("https://cli.example/pkg/")).unwrap();
        assert_eq!(root.location().as_str(), "https://cli.example/pkg/");
        let root = config.package_root(Some("  ")).unwrap();
        assert_eq!(root.location().as_str(), "https://env.example/pkg/");

        std::env::remove_var(ASSET_ROOT_ENV);
        let root = config.package_root(None).unwrap();
        assert_eq!(root.location().as_str(), "https://file.example/pkg/");
        let root = PrismConfig::default().package_root(None).unwrap();
        assert_eq!(root, PackageRoot::bundled().unwrap());
    }
}
