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

//! Concurrent loading of technique and profile bundles.
//!
//! Every retrieval of a batch is issued at once on the caller's task and
//! joined with fail-fast semantics: the first error aborts the batch and the
//! remaining in-flight retrievals are dropped. Results are always assembled in
//! declared order, never in completion order.

use crate::bundle::{LoadedJob, LoadedProfileBundle, LoadedTechnique, LoadedTechniqueBundle};
use crate::retriever::{retrieve, LoadOptions, WgslSource};
use futures::future::try_join_all;
use prism_core::{Job, LightingError, LightingRegistry, LightingResult, Technique};
use std::sync::Arc;

/// Loads WGSL bundles described by a [`LightingRegistry`].
///
/// Nothing is cached: every call allocates fresh results.
#[derive(Debug, Clone)]
pub struct BundleLoader {
    registry: Arc<LightingRegistry>,
}

impl BundleLoader {
    /// Creates a loader over a shared registry.
    pub fn new(registry: Arc<LightingRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this loader reads from.
    pub fn registry(&self) -> &LightingRegistry {
        &self.registry
    }

    /// Loads the prelude of `technique`.
    ///
    /// # Errors
    /// [`LightingError::UnknownTechnique`], or [`LightingError::PreludeLoadFailed`]
    /// wrapping the retrieval error.
    pub async fn load_technique_prelude(
        &self,
        technique: &str,
        options: &LoadOptions,
    ) -> LightingResult<String> {
        let technique = self.registry.technique(technique)?;
        load_prelude(technique, options).await
    }

    /// Loads a single job of `technique`.
    ///
    /// # Errors
    /// [`LightingError::UnknownTechnique`], [`LightingError::UnknownJob`], or
    /// [`LightingError::JobLoadFailed`] wrapping the retrieval error.
    pub async fn load_technique_job(
        &self,
        technique: &str,
        job_key: &str,
        options: &LoadOptions,
    ) -> LightingResult<String> {
        let technique = self.registry.technique(technique)?;
        let job = technique.job(job_key)?;
        load_job(technique, job, options).await
    }

    /// Loads the prelude and all jobs of `technique` concurrently.
    pub async fn load_technique_bundle(
        &self,
        technique: &str,
        options: &LoadOptions,
    ) -> LightingResult<LoadedTechniqueBundle> {
        let technique = self.registry.technique(technique)?;
        load_bundle(technique, options).await
    }

    /// Loads every technique of `profile` concurrently.
    ///
    /// The profile is looked up before anything is retrieved, so an unknown
    /// name never touches storage or the network.
    pub async fn load_profile_bundle(
        &self,
        profile: &str,
        options: &LoadOptions,
    ) -> LightingResult<LoadedProfileBundle> {
        let profile = self.registry.profile(profile)?;
        let techniques = profile
            .technique_names
            .iter()
            .map(|name| self.registry.technique(name))
            .collect::<LightingResult<Vec<_>>>()?;

        log::info!(
            "Loading lighting profile '{}' ({})",
            profile.name,
            profile.technique_names.join(", ")
        );

        let techniques = try_join_all(techniques.into_iter().map(|technique| async move {
            let bundle = load_bundle(technique, options).await?;
            Ok::<_, LightingError>(LoadedTechnique::new(technique.name.clone(), bundle))
        }))
        .await?;

        Ok(LoadedProfileBundle {
            profile: profile.clone(),
            techniques,
        })
    }

    /// Loads the prelude of the default technique.
    pub async fn load_default_prelude(&self, options: &LoadOptions) -> LightingResult<String> {
        load_prelude(self.registry.default_technique(), options).await
    }

    /// Loads the full bundle of the default technique.
    pub async fn load_default_bundle(
        &self,
        options: &LoadOptions,
    ) -> LightingResult<LoadedTechniqueBundle> {
        load_bundle(self.registry.default_technique(), options).await
    }
}

async fn load_prelude(technique: &Technique, options: &LoadOptions) -> LightingResult<String> {
    retrieve(WgslSource::Location(&technique.prelude_location), options)
        .await
        .map_err(|source| LightingError::PreludeLoadFailed {
            technique: technique.name.clone(),
            source: Box::new(source),
        })
}

async fn load_job(technique: &Technique, job: &Job, options: &LoadOptions) -> LightingResult<String> {
    retrieve(WgslSource::Location(&job.location), options)
        .await
        .map_err(|source| LightingError::JobLoadFailed {
            technique: technique.name.clone(),
            job: job.key.clone(),
            source: Box::new(source),
        })
}

async fn load_bundle(
    technique: &Technique,
    options: &LoadOptions,
) -> LightingResult<LoadedTechniqueBundle> {
    log::debug!(
        "Loading technique bundle '{}' ({} jobs)",
        technique.name,
        technique.jobs.len()
    );

    let jobs = try_join_all(technique.jobs.iter().map(|job| async move {
        let text = load_job(technique, job, options).await?;
        Ok::<_, LightingError>(LoadedJob {
            label: job.label.clone(),
            source_name: job.source_name.clone(),
            text,
        })
    }));
    let (prelude_text, jobs) = futures::try_join!(load_prelude(technique, options), jobs)?;

    Ok(LoadedTechniqueBundle { prelude_text, jobs })
}
