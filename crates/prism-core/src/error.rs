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

//! Defines the error type shared by the registry, the retriever and the bundle loader.

use std::io;

/// Any failure produced while looking up or loading lighting assets.
///
/// Lookup variants embed the list of valid names so the message alone is enough
/// to fix a typo. Retrieval variants carry the location that failed.
#[derive(Debug, thiserror::Error)]
pub enum LightingError {
    /// The requested technique is not registered.
    #[error("Unknown lighting technique \"{name}\". Available: {available}.")]
    UnknownTechnique {
        /// The name that was requested.
        name: String,
        /// Comma-separated list of registered technique names.
        available: String,
    },

    /// The requested profile is not registered.
    #[error("Unknown lighting profile \"{name}\". Available: {available}.")]
    UnknownProfile {
        /// The name that was requested.
        name: String,
        /// Comma-separated list of registered profile names.
        available: String,
    },

    /// The technique has no job with the requested key.
    #[error("Unknown job \"{key}\" for technique \"{technique}\". Available: {available}.")]
    UnknownJob {
        /// The technique that was searched.
        technique: String,
        /// The job key that was requested.
        key: String,
        /// Comma-separated list of the technique's job keys.
        available: String,
    },

    /// No local content exists at the location.
    #[error("WGSL source not found at {location}: {reason}")]
    ContentNotFound {
        /// The location that was read.
        location: String,
        /// Why nothing could be read.
        reason: String,
    },

    /// Reading a local file failed for a reason other than absence.
    #[error("Failed to read WGSL source at {location}: {source}")]
    Io {
        /// The location that was read.
        location: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The fetch capability answered with a non-ok response.
    #[error("Failed to load WGSL ({detail}) from {location}", detail = response_detail(.status, .status_text))]
    RetrievalFailed {
        /// The location that was fetched.
        location: String,
        /// Numeric status, if the response carried one.
        status: Option<u16>,
        /// Status text, if the response carried one.
        status_text: Option<String>,
    },

    /// The fetch capability itself failed before producing a usable body.
    #[error("Failed to fetch WGSL from {location}: {message}")]
    Transport {
        /// The location that was fetched.
        location: String,
        /// Description of the transport failure.
        message: String,
    },

    /// HTML was received where WGSL source was expected.
    #[error("Expected WGSL for {context} but received HTML. Check the URL or server root.")]
    ContentTypeMismatch {
        /// The location, or a caller-supplied label such as `inline WGSL`.
        context: String,
    },

    /// Loading a technique's prelude failed.
    #[error("Failed to load {technique} prelude WGSL source: {source}")]
    PreludeLoadFailed {
        /// The technique whose prelude was loaded.
        technique: String,
        /// The retrieval error.
        #[source]
        source: Box<LightingError>,
    },

    /// Loading one of a technique's jobs failed.
    #[error("Failed to load {technique} job \"{job}\" WGSL source: {source}")]
    JobLoadFailed {
        /// The technique owning the job.
        technique: String,
        /// The job key.
        job: String,
        /// The retrieval error.
        #[source]
        source: Box<LightingError>,
    },

    /// A relative path could not be joined onto its base.
    #[error("Cannot resolve '{path}' against '{base}': {message}")]
    InvalidLocation {
        /// The relative path.
        path: String,
        /// The base it was resolved against.
        base: String,
        /// The parser's complaint.
        message: String,
    },

    /// The static technique/profile tables are inconsistent.
    #[error("Invalid lighting registry: {0}")]
    InvalidRegistry(String),
}

impl LightingError {
    /// Strips prelude/job context and returns the underlying error.
    pub fn root_cause(&self) -> &LightingError {
        match self {
            Self::PreludeLoadFailed { source, .. } | Self::JobLoadFailed { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }

    /// Whether retrying the whole load might succeed.
    ///
    /// Server-side statuses (5xx), responses without a status, and transport
    /// failures are treated as transient. Everything else is permanent.
    pub fn is_retryable(&self) -> bool {
        match self.root_cause() {
            Self::RetrievalFailed { status, .. } => status.map_or(true, |code| code >= 500),
            Self::Transport { .. } => true,
            _ => false,
        }
    }
}

/// Formats a response status as `"<status> <statusText>"`, `"<status>"`, or `"unknown"`.
pub fn status_detail(status: Option<u16>, status_text: Option<&str>) -> String {
    let status = status.map_or_else(|| "unknown".to_string(), |code| code.to_string());
    match status_text {
        Some(text) if !text.is_empty() => format!("{status} {text}"),
        _ => status,
    }
}

fn response_detail(status: &Option<u16>, status_text: &Option<String>) -> String {
    status_detail(*status, status_text.as_deref())
}

/// Result alias used throughout the lighting crates.
pub type LightingResult<T> = Result<T, LightingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn status_detail_formats() {
        assert_eq!(status_detail(Some(503), Some("Unavailable")), "503 Unavailable");
        assert_eq!(status_detail(Some(404), None), "404");
        assert_eq!(status_detail(Some(404), Some("")), "404");
        assert_eq!(status_detail(None, None), "unknown");
    }

    #[test]
    fn retrieval_failed_display() {
        let err = LightingError::RetrievalFailed {
            location: "https://lighting.example/pkg/techniques/hybrid/prelude.wgsl".to_string(),
            status: Some(503),
            status_text: Some("Unavailable".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load WGSL (503 Unavailable) from https://lighting.example/pkg/techniques/hybrid/prelude.wgsl"
        );
    }

    #[test]
    fn unknown_job_display_lists_keys() {
        let err = LightingError::UnknownJob {
            technique: "hdri".to_string(),
            key: "nope".to_string(),
            available: "irradianceConvolution, specularPrefilter, brdfLut".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown job \"nope\" for technique \"hdri\". Available: irradianceConvolution, specularPrefilter, brdfLut."
        );
    }

    #[test]
    fn prelude_failure_wraps_and_exposes_root_cause() {
        let inner = LightingError::ContentTypeMismatch {
            context: "inline WGSL".to_string(),
        };
        let err = LightingError::PreludeLoadFailed {
            technique: "hybrid".to_string(),
            source: Box::new(inner),
        };
        assert!(err.to_string().starts_with("Failed to load hybrid prelude WGSL source: Expected WGSL for inline WGSL"));
        assert!(err.source().is_some());
        assert!(matches!(
            err.root_cause(),
            LightingError::ContentTypeMismatch { .. }
        ));
    }

    #[test]
    fn retryable_classification() {
        let unavailable = LightingError::RetrievalFailed {
            location: "x".to_string(),
            status: Some(503),
            status_text: None,
        };
        let missing = LightingError::RetrievalFailed {
            location: "x".to_string(),
            status: Some(404),
            status_text: None,
        };
        let wrapped = LightingError::JobLoadFailed {
            technique: "hybrid".to_string(),
            job: "screenTrace".to_string(),
            source: Box::new(unavailable),
        };
        assert!(wrapped.is_retryable());
        assert!(!missing.is_retryable());
        assert!(!LightingError::InvalidRegistry("bad".to_string()).is_retryable());
    }
}
