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

//! Text-materialized technique and profile bundles.

use prism_core::Profile;

/// The text of one job, with the identifiers the render pipeline labels it by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedJob {
    /// Debug label, `lighting.<technique>.<key>`.
    pub label: String,
    /// Name reported to the shader compiler.
    pub source_name: String,
    /// The WGSL source.
    pub text: String,
}

/// A technique's prelude and every job, in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTechniqueBundle {
    /// The prelude WGSL.
    pub prelude_text: String,
    /// Jobs in declared order.
    pub jobs: Vec<LoadedJob>,
}

/// One technique entry of a [`LoadedProfileBundle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTechnique {
    /// The technique's name.
    pub technique_name: String,
    /// The prelude WGSL.
    pub prelude_text: String,
    /// Jobs in declared order.
    pub jobs: Vec<LoadedJob>,
}

impl LoadedTechnique {
    pub(crate) fn new(technique_name: String, bundle: LoadedTechniqueBundle) -> Self {
        Self {
            technique_name,
            prelude_text: bundle.prelude_text,
            jobs: bundle.jobs,
        }
    }
}

/// A profile with every technique fully loaded, in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedProfileBundle {
    /// The profile that was loaded.
    pub profile: Profile,
    /// Technique entries in the profile's declared order.
    pub techniques: Vec<LoadedTechnique>,
}
