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

//! The pluggable network fetch capability.
//!
//! A [`Fetcher`] is supplied by the caller and is the only way network
//! locations can be read. The loader never retries or times out a fetch;
//! wrap the fetcher if you need either.

use crate::location::AssetLocation;
use async_trait::async_trait;

/// A failure raised by the transport before a response body was obtained.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    /// Human-readable description of the failure.
    pub message: String,
}

impl FetchError {
    /// Creates a new `FetchError`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A response-like object produced by a [`Fetcher`].
#[async_trait]
pub trait FetchResponse: Send {
    /// `true` when the request succeeded (a 2xx status for HTTP).
    fn ok(&self) -> bool;

    /// The numeric status, if the transport has one.
    fn status(&self) -> Option<u16> {
        None
    }

    /// The status text, if the transport has one.
    fn status_text(&self) -> Option<&str> {
        None
    }

    /// Consumes the response and returns its body as text.
    async fn text(self: Box<Self>) -> Result<String, FetchError>;
}

/// Retrieves network locations.
///
/// Implementations must be shareable across concurrent loads; the loader
/// places no other constraint on re-entrancy.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issues a request for `location`.
    async fn fetch(&self, location: &AssetLocation) -> Result<Box<dyn FetchResponse>, FetchError>;
}

/// A response whose outcome is fixed up front.
///
/// Used for embedding and tests, and by fetchers that already buffered the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticResponse {
    /// Whether the response is ok.
    pub ok: bool,
    /// Optional numeric status.
    pub status: Option<u16>,
    /// Optional status text.
    pub status_text: Option<String>,
    /// The body returned by [`FetchResponse::text`].
    pub body: String,
}

impl StaticResponse {
    /// An ok response with the given body and no status.
    pub fn success(body: impl Into<String>) -> Self {
        Self {
            ok: true,
            body: body.into(),
            ..Self::default()
        }
    }

    /// A failed response with the given status.
    pub fn failure(status: u16, status_text: impl Into<String>) -> Self {
        let status_text = status_text.into();
        Self {
            ok: false,
            status: Some(status),
            status_text: (!status_text.is_empty()).then_some(status_text),
            body: String::new(),
        }
    }
}

#[async_trait]
impl FetchResponse for StaticResponse {
    fn ok(&self) -> bool {
        self.ok
    }

    fn status(&self) -> Option<u16> {
        self.status
    }

    fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }

    async fn text(self: Box<Self>) -> Result<String, FetchError> {
        Ok(self.body)
    }
}
