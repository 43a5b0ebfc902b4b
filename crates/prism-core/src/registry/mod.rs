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

//! The frozen technique/profile registry.
//!
//! The registry is built once from declarative tables, resolving every
//! prelude and job location eagerly against a [`PackageRoot`]. Afterwards it
//! only answers lookups; there is no mutation API. Share it behind an `Arc`.

mod specs;
mod technique;

pub use specs::*;
pub use technique::*;

use crate::error::{LightingError, LightingResult};
use crate::location::{AssetLocation, PackageRoot};
use std::collections::HashMap;

/// Directory, relative to the package root, holding one sub-directory per technique.
pub const TECHNIQUES_DIR: &str = "techniques";

/// Read-only lookup tables for techniques and profiles.
#[derive(Debug, Clone)]
pub struct LightingRegistry {
    root: PackageRoot,
    techniques: Vec<Technique>,
    technique_names: Vec<String>,
    technique_index: HashMap<String, usize>,
    profiles: Vec<Profile>,
    profile_names: Vec<String>,
    profile_index: HashMap<String, usize>,
    default_technique: String,
    default_profile: String,
}

impl LightingRegistry {
    /// Builds the registry from the built-in tables.
    ///
    /// # Errors
    /// Fails only if a location cannot be resolved against `root` or the
    /// built-in tables are inconsistent.
    pub fn new(root: PackageRoot) -> LightingResult<Self> {
        Self::from_specs(
            root,
            TECHNIQUE_SPECS,
            PROFILE_SPECS,
            DEFAULT_TECHNIQUE,
            DEFAULT_PROFILE,
        )
    }

    /// Builds the registry against the WGSL sources bundled with this crate.
    pub fn bundled() -> LightingResult<Self> {
        Self::new(PackageRoot::bundled()?)
    }

    /// Builds a registry from arbitrary tables.
    ///
    /// Technique names, profile names and job keys must be unique, every
    /// profile must reference known techniques, and both defaults must exist.
    pub fn from_specs(
        root: PackageRoot,
        technique_specs: &[TechniqueSpec],
        profile_specs: &[ProfileSpec],
        default_technique: &str,
        default_profile: &str,
    ) -> LightingResult<Self> {
        let mut techniques = Vec::with_capacity(technique_specs.len());
        let mut technique_index = HashMap::with_capacity(technique_specs.len());
        for spec in technique_specs {
            if technique_index
                .insert(spec.name.to_string(), techniques.len())
                .is_some()
            {
                return Err(LightingError::InvalidRegistry(format!(
                    "technique \"{}\" is declared twice",
                    spec.name
                )));
            }
            techniques.push(build_technique(&root, spec)?);
        }

        let mut profiles = Vec::with_capacity(profile_specs.len());
        let mut profile_index = HashMap::with_capacity(profile_specs.len());
        for spec in profile_specs {
            if let Some(missing) = spec
                .techniques
                .iter()
                .find(|name| !technique_index.contains_key(**name))
            {
                return Err(LightingError::InvalidRegistry(format!(
                    "profile \"{}\" references unknown technique \"{missing}\"",
                    spec.name
                )));
            }
            if profile_index
                .insert(spec.name.to_string(), profiles.len())
                .is_some()
            {
                return Err(LightingError::InvalidRegistry(format!(
                    "profile \"{}\" is declared twice",
                    spec.name
                )));
            }
            profiles.push(Profile {
                name: spec.name.to_string(),
                description: spec.description.to_string(),
                technique_names: spec.techniques.iter().map(|t| t.to_string()).collect(),
            });
        }

        if !technique_index.contains_key(default_technique) {
            return Err(LightingError::InvalidRegistry(format!(
                "default technique \"{default_technique}\" is not declared"
            )));
        }
        if !profile_index.contains_key(default_profile) {
            return Err(LightingError::InvalidRegistry(format!(
                "default profile \"{default_profile}\" is not declared"
            )));
        }

        log::debug!(
            "Lighting registry built at {root}: {} techniques, {} profiles",
            techniques.len(),
            profiles.len()
        );

        Ok(Self {
            root,
            technique_names: techniques.iter().map(|t| t.name.clone()).collect(),
            techniques,
            technique_index,
            profile_names: profiles.iter().map(|p| p.name.clone()).collect(),
            profiles,
            profile_index,
            default_technique: default_technique.to_string(),
            default_profile: default_profile.to_string(),
        })
    }

    /// The root every location was resolved against.
    pub fn root(&self) -> &PackageRoot {
        &self.root
    }

    /// Technique names in declaration order.
    pub fn technique_names(&self) -> &[String] {
        &self.technique_names
    }

    /// Techniques in declaration order.
    pub fn techniques(&self) -> impl Iterator<Item = &Technique> {
        self.techniques.iter()
    }

    /// Looks up a technique by name.
    ///
    /// # Errors
    /// Returns [`LightingError::UnknownTechnique`] listing every registered name.
    pub fn technique(&self, name: &str) -> LightingResult<&Technique> {
        self.technique_index
            .get(name)
            .map(|&index| &self.techniques[index])
            .ok_or_else(|| LightingError::UnknownTechnique {
                name: name.to_string(),
                available: self.technique_names.join(", "),
            })
    }

    /// The default technique.
    pub fn default_technique(&self) -> &Technique {
        &self.techniques[self.technique_index[&self.default_technique]]
    }

    /// Name of the default technique.
    pub fn default_technique_name(&self) -> &str {
        &self.default_technique
    }

    /// Profile names in declaration order.
    pub fn profile_names(&self) -> &[String] {
        &self.profile_names
    }

    /// Profiles in declaration order.
    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }

    /// Looks up a profile by name.
    ///
    /// # Errors
    /// Returns [`LightingError::UnknownProfile`] listing every registered name.
    pub fn profile(&self, name: &str) -> LightingResult<&Profile> {
        self.profile_index
            .get(name)
            .map(|&index| &self.profiles[index])
            .ok_or_else(|| LightingError::UnknownProfile {
                name: name.to_string(),
                available: self.profile_names.join(", "),
            })
    }

    /// The default profile.
    pub fn default_profile(&self) -> &Profile {
        &self.profiles[self.profile_index[&self.default_profile]]
    }

    /// Name of the default profile.
    pub fn default_profile_name(&self) -> &str {
        &self.default_profile
    }

    /// Looks up a job of a technique.
    ///
    /// # Errors
    /// [`LightingError::UnknownTechnique`] or [`LightingError::UnknownJob`].
    pub fn job(&self, technique: &str, key: &str) -> LightingResult<&Job> {
        self.technique(technique)?.job(key)
    }

    /// Prelude location of the default technique.
    pub fn default_prelude_location(&self) -> &AssetLocation {
        &self.default_technique().prelude_location
    }

    /// `(key, label)` pairs of the default technique's jobs.
    pub fn default_job_labels(&self) -> Vec<(&str, &str)> {
        self.default_technique()
            .jobs
            .iter()
            .map(|job| (job.key.as_str(), job.label.as_str()))
            .collect()
    }
}

fn build_technique(root: &PackageRoot, spec: &TechniqueSpec) -> LightingResult<Technique> {
    let dir = format!("{TECHNIQUES_DIR}/{}", spec.name);
    let prelude_location = root.resolve(&format!("{dir}/{}", spec.prelude))?;

    let mut jobs: Vec<Job> = Vec::with_capacity(spec.jobs.len());
    for (key, file) in spec.jobs {
        if jobs.iter().any(|job| job.key == *key) {
            return Err(LightingError::InvalidRegistry(format!(
                "technique \"{}\" declares job \"{key}\" twice",
                spec.name
            )));
        }
        let label = job_label(spec.name, key);
        jobs.push(Job {
            key: key.to_string(),
            source_name: label.clone(),
            label,
            location: root.resolve(&format!("{dir}/{file}"))?,
        });
    }

    Ok(Technique {
        name: spec.name.to_string(),
        description: spec.description.to_string(),
        prelude_location,
        jobs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn registry() -> LightingRegistry {
        LightingRegistry::bundled().unwrap()
    }

    #[test]
    fn test_names_follow_declaration_order() {
        let registry = registry();
        assert_eq!(
            registry.technique_names(),
            ["hybrid", "pathtracer", "volumetrics", "hdri"]
        );
        assert_eq!(registry.profile_names(), ["realtime", "hybrid", "reference"]);
    }

    #[test]
    fn test_default_technique_matches_named_lookup() {
        let registry = registry();
        assert_eq!(registry.default_technique_name(), "hybrid");
        assert_eq!(
            registry.default_technique(),
            registry.technique(DEFAULT_TECHNIQUE).unwrap()
        );
        assert_eq!(registry.default_profile_name(), "realtime");
        assert_eq!(
            registry.default_profile(),
            registry.profile(DEFAULT_PROFILE).unwrap()
        );
    }

    #[test]
    fn test_unknown_technique_lists_available_names() {
        let err = registry().technique("unknown-technique").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown lighting technique \"unknown-technique\". Available: hybrid, pathtracer, volumetrics, hdri."
        );
    }

    #[test]
    fn test_unknown_profile_lists_available_names() {
        let err = registry().profile("unknown-profile").unwrap_err();
        assert!(matches!(err, LightingError::UnknownProfile { .. }));
        assert!(err.to_string().contains("Available: realtime, hybrid, reference."));
    }

    #[test]
    fn test_unknown_job_lists_technique_keys() {
        let err = registry().job("hybrid", "unknown-key").unwrap_err();
        assert!(matches!(err, LightingError::UnknownJob { .. }));
        assert!(err.to_string().contains(
            "Available: directLighting, screenTrace, radianceCache, finalGather, reflectionResolve."
        ));
    }

    #[test]
    fn test_job_keys_are_unique_and_labelled() {
        let registry = registry();
        for technique in registry.techniques() {
            let keys: HashSet<_> = technique.job_keys().collect();
            assert_eq!(keys.len(), technique.jobs.len());
            for job in &technique.jobs {
                assert_eq!(job.label, format!("lighting.{}.{}", technique.name, job.key));
                assert_eq!(job.source_name, job.label);
            }
        }
    }

    #[test]
    fn test_profiles_reference_known_techniques() {
        let registry = registry();
        for profile in registry.profiles() {
            for name in &profile.technique_names {
                assert!(registry.technique(name).is_ok(), "{name} in {}", profile.name);
            }
        }
    }

    #[test]
    fn test_default_prelude_location_points_at_hybrid_prelude() {
        let registry = registry();
        assert!(registry
            .default_prelude_location()
            .path()
            .ends_with("/techniques/hybrid/prelude.wgsl"));
        let labels = registry.default_job_labels();
        assert_eq!(labels.len(), 5);
        assert_eq!(labels[0], ("directLighting", "lighting.hybrid.directLighting"));
    }

    #[test]
    fn test_network_root_resolves_network_locations() {
        let root = PackageRoot::parse("https://lighting.example/pkg/").unwrap();
        let registry = LightingRegistry::new(root).unwrap();
        let job = registry.job("hdri", "brdfLut").unwrap();
        assert_eq!(
            job.location.as_str(),
            "https://lighting.example/pkg/techniques/hdri/brdf-lut.job.wgsl"
        );
    }

    #[test]
    fn test_profile_with_unknown_technique_is_rejected() {
        let profiles = [ProfileSpec {
            name: "broken",
            description: "references a missing technique",
            techniques: &["hybrid", "raymarch"],
        }];
        let err = LightingRegistry::from_specs(
            PackageRoot::bundled().unwrap(),
            TECHNIQUE_SPECS,
            &profiles,
            DEFAULT_TECHNIQUE,
            "broken",
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown technique \"raymarch\""));
    }

    #[test]
    fn test_duplicate_job_key_is_rejected() {
        let techniques = [TechniqueSpec {
            name: "dup",
            description: "",
            prelude: "prelude.wgsl",
            jobs: &[("a", "a.job.wgsl"), ("a", "b.job.wgsl")],
        }];
        let err =
            LightingRegistry::from_specs(PackageRoot::bundled().unwrap(), &techniques, &[], "dup", "none")
                .unwrap_err();
        assert!(matches!(err, LightingError::InvalidRegistry(_)));
    }
}
