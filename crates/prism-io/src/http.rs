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

//! A [`Fetcher`] backed by `reqwest`.

use async_trait::async_trait;
use prism_core::{AssetLocation, FetchError, FetchResponse, Fetcher};
use reqwest::StatusCode;
use std::time::Duration;

/// Fetches network locations with a shared `reqwest::Client`.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Creates a fetcher whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map(Self::with_client)
            .map_err(|e| FetchError::new(format!("failed to build HTTP client: {e}")))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, location: &AssetLocation) -> Result<Box<dyn FetchResponse>, FetchError> {
        let response = self
            .client
            .get(location.as_str())
            .send()
            .await
            .map_err(|e| FetchError::new(e.to_string()))?;
        log::debug!("GET {location} -> {}", response.status());
        Ok(Box::new(HttpResponse::new(response)))
    }
}

struct HttpResponse {
    status: StatusCode,
    inner: reqwest::Response,
}

impl HttpResponse {
    fn new(inner: reqwest::Response) -> Self {
        Self {
            status: inner.status(),
            inner,
        }
    }
}

#[async_trait]
impl FetchResponse for HttpResponse {
    fn ok(&self) -> bool {
        self.status.is_success()
    }

    fn status(&self) -> Option<u16> {
        Some(self.status.as_u16())
    }

    fn status_text(&self) -> Option<&str> {
        self.status.canonical_reason()
    }

    async fn text(self: Box<Self>) -> Result<String, FetchError> {
        self.inner
            .text()
            .await
            .map_err(|e| FetchError::new(e.to_string()))
    }
}
