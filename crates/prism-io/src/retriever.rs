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

//! Retrieval of WGSL text from local storage or through a fetch capability.
//!
//! The strategy is picked from the location's scheme and the presence of a
//! fetcher. Whatever the strategy, the text is sniffed for HTML before it is
//! handed back, so a misconfigured server returning an error page fails here
//! instead of deep inside shader compilation.

use prism_core::{AssetLocation, Fetcher, LightingError, LightingResult, Scheme};
use std::fmt;
use std::io;
use std::sync::Arc;

/// Number of leading characters inspected for HTML markers.
pub const HTML_SNIFF_CHARS: usize = 200;

const HTML_MARKERS: [&str; 3] = ["<!doctype", "<html", "<meta"];

/// Per-call loading options.
#[derive(Clone, Default)]
pub struct LoadOptions {
    fetcher: Option<Arc<dyn Fetcher>>,
}

impl LoadOptions {
    /// Filesystem-only options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables network retrieval through `fetcher`.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// The configured fetcher, if any.
    pub fn fetcher(&self) -> Option<&dyn Fetcher> {
        self.fetcher.as_deref()
    }
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("fetcher", &self.fetcher.is_some())
            .finish()
    }
}

/// What to retrieve.
#[derive(Debug, Clone, Copy)]
pub enum WgslSource<'a> {
    /// Literal WGSL, validated and returned as-is.
    Inline(&'a str),
    /// A resolved location.
    Location(&'a AssetLocation),
}

/// How a location is read.
#[derive(Clone, Copy)]
enum RetrievalStrategy<'a> {
    Filesystem,
    Network(&'a dyn Fetcher),
}

impl<'a> RetrievalStrategy<'a> {
    fn select(location: &AssetLocation, fetcher: Option<&'a dyn Fetcher>) -> Self {
        match (location.scheme(), fetcher) {
            (Scheme::Network, Some(fetcher)) => Self::Network(fetcher),
            _ => Self::Filesystem,
        }
    }
}

/// Retrieves WGSL text.
///
/// # Errors
/// - [`LightingError::ContentNotFound`] when local content is absent.
/// - [`LightingError::Io`] for any other local read failure.
/// - [`LightingError::RetrievalFailed`] when the fetcher answers with a non-ok response.
/// - [`LightingError::Transport`] when the fetcher fails outright.
/// - [`LightingError::ContentTypeMismatch`] when the text looks like HTML.
pub async fn retrieve(source: WgslSource<'_>, options: &LoadOptions) -> LightingResult<String> {
    match source {
        WgslSource::Inline(text) => {
            ensure_not_html(text, "inline WGSL")?;
            Ok(text.to_string())
        }
        WgslSource::Location(location) => {
            let text = match RetrievalStrategy::select(location, options.fetcher()) {
                RetrievalStrategy::Filesystem => read_local(location).await?,
                RetrievalStrategy::Network(fetcher) => fetch_remote(location, fetcher).await?,
            };
            ensure_not_html(&text, location.as_str())?;
            Ok(text)
        }
    }
}

async fn read_local(location: &AssetLocation) -> LightingResult<String> {
    let Some(path) = location.to_file_path() else {
        return Err(LightingError::ContentNotFound {
            location: location.to_string(),
            reason: "no local path for a network location and no fetcher was supplied"
                .to_string(),
        });
    };

    log::debug!("Reading WGSL source from '{}'", path.display());
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LightingError::ContentNotFound {
                location: location.to_string(),
                reason: source.to_string(),
            },
            _ => LightingError::Io {
                location: location.to_string(),
                source,
            },
        })
}

async fn fetch_remote(location: &AssetLocation, fetcher: &dyn Fetcher) -> LightingResult<String> {
    log::debug!("Fetching WGSL source from {location}");
    let response = fetcher
        .fetch(location)
        .await
        .map_err(|e| LightingError::Transport {
            location: location.to_string(),
            message: e.message,
        })?;

    if !response.ok() {
        return Err(LightingError::RetrievalFailed {
            location: location.to_string(),
            status: response.status(),
            status_text: response.status_text().map(str::to_string),
        });
    }

    response.text().await.map_err(|e| LightingError::Transport {
        location: location.to_string(),
        message: format!("failed to read response body: {}", e.message),
    })
}

/// Rejects text whose first [`HTML_SNIFF_CHARS`] characters contain an HTML marker.
///
/// `context` names the source in the error message. Empty text passes.
pub fn ensure_not_html(source: &str, context: &str) -> LightingResult<()> {
    let sample = source
        .chars()
        .take(HTML_SNIFF_CHARS)
        .collect::<String>()
        .to_lowercase();

    if HTML_MARKERS.iter().any(|marker| sample.contains(marker)) {
        log::warn!("Rejected HTML payload for {context}");
        return Err(LightingError::ContentTypeMismatch {
            context: context.to_string(),
        });
    }
    Ok(())
}
