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

//! Resolved techniques, their jobs, and the profiles that group them.

use crate::error::{LightingError, LightingResult};
use crate::location::AssetLocation;

/// A single named WGSL fragment belonging to a technique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Key, unique within the owning technique.
    pub key: String,
    /// Debug label, `lighting.<technique>.<key>`.
    pub label: String,
    /// Name reported to shader compilers for diagnostics.
    pub source_name: String,
    /// Where the job's source lives.
    pub location: AssetLocation,
}

/// A named shader pipeline stage: a shared prelude plus its jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Technique {
    /// Unique technique name.
    pub name: String,
    /// Human-readable summary.
    pub description: String,
    /// Where the prelude lives.
    pub prelude_location: AssetLocation,
    /// Jobs in declared order.
    pub jobs: Vec<Job>,
}

impl Technique {
    /// Looks up a job by key.
    ///
    /// # Errors
    /// Returns [`LightingError::UnknownJob`] listing this technique's keys.
    pub fn job(&self, key: &str) -> LightingResult<&Job> {
        self.jobs
            .iter()
            .find(|job| job.key == key)
            .ok_or_else(|| LightingError::UnknownJob {
                technique: self.name.clone(),
                key: key.to_string(),
                available: self.job_keys().collect::<Vec<_>>().join(", "),
            })
    }

    /// Job keys in declared order.
    pub fn job_keys(&self) -> impl Iterator<Item = &str> {
        self.jobs.iter().map(|job| job.key.as_str())
    }
}

/// A named, ordered collection of techniques.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Unique profile name.
    pub name: String,
    /// Human-readable summary.
    pub description: String,
    /// Technique names in declared order.
    pub technique_names: Vec<String>,
}

/// Builds the debug label of a job.
pub fn job_label(technique: &str, key: &str) -> String {
    format!("lighting.{technique}.{key}")
}
