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

//! Absolute asset locations and the lexical resolver that produces them.
//!
//! Every location is stored as a URL: local files use the `file:` scheme and
//! everything else is considered a network location. Resolution is a pure
//! URL join, so the whole registry can be built without touching storage.

use crate::error::{LightingError, LightingResult};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable overriding the package root at process start.
pub const ASSET_ROOT_ENV: &str = "PRISM_ASSET_ROOT";

/// How a location's content has to be retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// A `file:` URL backed by local storage.
    LocalFile,
    /// Any other scheme (`http`, `https`, ...), fetched through a capability.
    Network,
}

/// A resolved, absolute identifier of retrievable content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetLocation(Url);

impl AssetLocation {
    /// Parses an absolute URL such as `https://cdn.example/pkg/` or `file:///opt/pkg/`.
    pub fn parse(input: &str) -> LightingResult<Self> {
        Url::parse(input)
            .map(Self)
            .map_err(|e| LightingError::InvalidLocation {
                path: input.to_string(),
                base: String::new(),
                message: e.to_string(),
            })
    }

    /// Builds a location for a file. The path must be absolute.
    pub fn from_file_path(path: impl AsRef<Path>) -> LightingResult<Self> {
        let path = path.as_ref();
        Url::from_file_path(path)
            .map(Self)
            .map_err(|()| not_absolute(path))
    }

    /// Builds a location for a directory, so that relative paths resolve inside it.
    pub fn from_directory_path(path: impl AsRef<Path>) -> LightingResult<Self> {
        let path = path.as_ref();
        Url::from_directory_path(path)
            .map(Self)
            .map_err(|()| not_absolute(path))
    }

    /// Returns the retrieval scheme of this location.
    pub fn scheme(&self) -> Scheme {
        if self.0.scheme() == "file" {
            Scheme::LocalFile
        } else {
            Scheme::Network
        }
    }

    /// Returns the local path for `file:` locations, `None` otherwise.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        match self.scheme() {
            Scheme::LocalFile => self.0.to_file_path().ok(),
            Scheme::Network => None,
        }
    }

    /// The absolute form of this location.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The underlying URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// The path component, e.g. `/pkg/techniques/hybrid/prelude.wgsl`.
    pub fn path(&self) -> &str {
        self.0.path()
    }
}

impl fmt::Display for AssetLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<Url> for AssetLocation {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

fn not_absolute(path: &Path) -> LightingError {
    LightingError::InvalidLocation {
        path: path.display().to_string(),
        base: String::new(),
        message: "path must be absolute".to_string(),
    }
}

/// Joins `relative_path` onto `base` using URL reference semantics.
///
/// A base ending in `/` acts as a directory; otherwise its last segment is
/// replaced. `.` and `..` segments are normalized. No I/O is performed.
pub fn resolve(relative_path: &str, base: &AssetLocation) -> LightingResult<AssetLocation> {
    base.0
        .join(relative_path)
        .map(AssetLocation)
        .map_err(|e| LightingError::InvalidLocation {
            path: relative_path.to_string(),
            base: base.to_string(),
            message: e.to_string(),
        })
}

/// The base location every registry path is resolved against.
///
/// Chosen once when the process starts and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRoot(AssetLocation);

impl PackageRoot {
    /// The directory holding the WGSL sources shipped with this crate.
    ///
    /// The path is fixed at compile time from `CARGO_MANIFEST_DIR`, so an
    /// installed binary only finds the bundled sources while the crate's
    /// source tree still exists. Point [`ASSET_ROOT_ENV`] or an explicit root
    /// elsewhere otherwise.
    pub fn bundled() -> LightingResult<Self> {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
        AssetLocation::from_directory_path(dir).map(Self)
    }

    /// Parses a root given as a URL or as a filesystem path.
    ///
    /// Relative paths are anchored at the current working directory.
    pub fn parse(input: &str) -> LightingResult<Self> {
        if looks_like_url(input) {
            let mut url = Url::parse(input).map_err(|e| LightingError::InvalidLocation {
                path: input.to_string(),
                base: String::new(),
                message: e.to_string(),
            })?;
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            return Ok(Self(AssetLocation(url)));
        }

        let path = Path::new(input);
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| LightingError::InvalidLocation {
                    path: input.to_string(),
                    base: String::new(),
                    message: format!("cannot read current directory: {e}"),
                })?
                .join(path)
        };
        AssetLocation::from_directory_path(absolute).map(Self)
    }

    /// Reads [`ASSET_ROOT_ENV`], falling back to [`PackageRoot::bundled`].
    pub fn from_env() -> LightingResult<Self> {
        Self::from_env_override().unwrap_or_else(Self::bundled)
    }

    /// Parses [`ASSET_ROOT_ENV`] when it is set to something other than whitespace.
    pub fn from_env_override() -> Option<LightingResult<Self>> {
        let value = std::env::var(ASSET_ROOT_ENV).ok()?;
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        log::debug!("Using asset root from {ASSET_ROOT_ENV}: {value}");
        Some(Self::parse(value))
    }

    /// The root as a location.
    pub fn location(&self) -> &AssetLocation {
        &self.0
    }

    /// Resolves a path relative to this root.
    pub fn resolve(&self, relative_path: &str) -> LightingResult<AssetLocation> {
        resolve(relative_path, &self.0)
    }
}

impl From<AssetLocation> for PackageRoot {
    fn from(location: AssetLocation) -> Self {
        Self(location)
    }
}

impl fmt::Display for PackageRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A scheme needs at least two characters so `C:\assets` stays a path.
fn looks_like_url(input: &str) -> bool {
    match input.split_once("://") {
        Some((scheme, _)) => {
            scheme.len() > 1
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_against_network_directory() {
        let base = AssetLocation::parse("https://lighting.example/pkg/").unwrap();
        let resolved = resolve("techniques/hybrid/prelude.wgsl", &base).unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://lighting.example/pkg/techniques/hybrid/prelude.wgsl"
        );
        assert_eq!(resolved.scheme(), Scheme::Network);
        assert!(resolved.to_file_path().is_none());
    }

    #[test]
    fn test_resolve_replaces_last_segment_of_file_like_base() {
        let base = AssetLocation::parse("https://lighting.example/pkg/index.js").unwrap();
        let resolved = resolve("./techniques/hdri/brdf-lut.job.wgsl", &base).unwrap();
        assert_eq!(
            resolved.path(),
            "/pkg/techniques/hdri/brdf-lut.job.wgsl"
        );
    }

    #[test]
    fn test_resolve_normalizes_parent_segments() {
        let base = AssetLocation::parse("file:///opt/prism/src/").unwrap();
        let resolved = resolve("techniques/../techniques/./hdri/prelude.wgsl", &base).unwrap();
        assert_eq!(resolved.as_str(), "file:///opt/prism/src/techniques/hdri/prelude.wgsl");
        assert_eq!(resolved.scheme(), Scheme::LocalFile);
    }

    #[test]
    fn test_bundled_root_is_local_directory() {
        let root = PackageRoot::bundled().unwrap();
        assert_eq!(root.location().scheme(), Scheme::LocalFile);
        assert!(root.location().as_str().ends_with("/src/"));
        let prelude = root.resolve("techniques/hybrid/prelude.wgsl").unwrap();
        let path = prelude.to_file_path().unwrap();
        assert!(path.ends_with("src/techniques/hybrid/prelude.wgsl"));
    }

    // Only test in this crate touching the variable, so no other test races it.
    #[test]
    fn test_from_env_prefers_variable_over_bundled() {
        std::env::set_var(ASSET_ROOT_ENV, "  https://cdn.example/lighting  ");
        let root = PackageRoot::from_env().unwrap();
        assert_eq!(root.location().as_str(), "https://cdn.example/lighting/");

        std::env::set_var(ASSET_ROOT_ENV, "   ");
        assert!(PackageRoot::from_env_override().is_none());
        assert_eq!(PackageRoot::from_env().unwrap(), PackageRoot::bundled().unwrap());

        std::env::remove_var(ASSET_ROOT_ENV);
        assert_eq!(PackageRoot::from_env().unwrap(), PackageRoot::bundled().unwrap());
    }

    #[test]
    fn test_parse_root_adds_trailing_slash_to_urls() {
        let root = PackageRoot::parse("https://lighting.example/pkg").unwrap();
        assert_eq!(root.location().as_str(), "https://lighting.example/pkg/");
        let job = root.resolve("techniques/hybrid/screen-trace.job.wgsl").unwrap();
        assert_eq!(
            job.as_str(),
            "https://lighting.example/pkg/techniques/hybrid/screen-trace.job.wgsl"
        );
    }

    #[test]
    fn test_parse_root_accepts_relative_paths() {
        let root = PackageRoot::parse("assets/lighting").unwrap();
        assert_eq!(root.location().scheme(), Scheme::LocalFile);
        assert!(root.location().as_str().ends_with("/assets/lighting/"));
    }

    #[test]
    fn test_from_file_path_rejects_relative_paths() {
        let err = AssetLocation::from_file_path("relative/prelude.wgsl").unwrap_err();
        assert!(matches!(err, LightingError::InvalidLocation { .. }));
    }

    #[test]
    fn test_looks_like_url() {
        assert!(looks_like_url("https://lighting.example/pkg"));
        assert!(looks_like_url("file:///opt/pkg"));
        assert!(!looks_like_url("/opt/pkg"));
        assert!(!looks_like_url("C://weird"));
    }
}
