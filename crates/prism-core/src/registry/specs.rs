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

//! The declarative technique and profile tables.
//!
//! Paths are relative to the technique's directory under `techniques/`.

/// Declarative description of a technique.
#[derive(Debug, Clone, Copy)]
pub struct TechniqueSpec {
    /// Unique technique name.
    pub name: &'static str,
    /// Human-readable summary.
    pub description: &'static str,
    /// Prelude file name.
    pub prelude: &'static str,
    /// `(key, file)` pairs in declared order.
    pub jobs: &'static [(&'static str, &'static str)],
}

/// Declarative description of a profile.
#[derive(Debug, Clone, Copy)]
pub struct ProfileSpec {
    /// Unique profile name.
    pub name: &'static str,
    /// Human-readable summary.
    pub description: &'static str,
    /// Technique names in declared order.
    pub techniques: &'static [&'static str],
}

/// Technique loaded when no name is given.
pub const DEFAULT_TECHNIQUE: &str = "hybrid";

/// Profile loaded when no name is given.
pub const DEFAULT_PROFILE: &str = "realtime";

/// Every built-in technique, in declaration order.
pub const TECHNIQUE_SPECS: &[TechniqueSpec] = &[
    TechniqueSpec {
        name: "hybrid",
        description:
            "Lumen-inspired hybrid realtime GI and reflections with radiance cache final gather.",
        prelude: "prelude.wgsl",
        jobs: &[
            ("directLighting", "direct-lighting.job.wgsl"),
            ("screenTrace", "screen-trace.job.wgsl"),
            ("radianceCache", "radiance-cache.job.wgsl"),
            ("finalGather", "final-gather.job.wgsl"),
            ("reflectionResolve", "reflection-resolve.job.wgsl"),
        ],
    },
    TechniqueSpec {
        name: "pathtracer",
        description:
            "Monte Carlo path-traced reference mode with progressive accumulation and denoise stage.",
        prelude: "prelude.wgsl",
        jobs: &[
            ("pathTrace", "pathtrace.job.wgsl"),
            ("accumulate", "accumulate.job.wgsl"),
            ("denoise", "denoise.job.wgsl"),
        ],
    },
    TechniqueSpec {
        name: "volumetrics",
        description: "Froxel volumetric lighting for fog, shafts, and participating media shadows.",
        prelude: "prelude.wgsl",
        jobs: &[
            ("froxelIntegrate", "froxel-integrate.job.wgsl"),
            ("volumetricShadow", "volumetric-shadow.job.wgsl"),
        ],
    },
    TechniqueSpec {
        name: "hdri",
        description:
            "HDRI and IBL precompute passes including irradiance, specular prefilter, and BRDF LUT.",
        prelude: "prelude.wgsl",
        jobs: &[
            ("irradianceConvolution", "irradiance-convolution.job.wgsl"),
            ("specularPrefilter", "specular-prefilter.job.wgsl"),
            ("brdfLut", "brdf-lut.job.wgsl"),
        ],
    },
];

/// Every built-in profile, in declaration order.
pub const PROFILE_SPECS: &[ProfileSpec] = &[
    ProfileSpec {
        name: "realtime",
        description: "Primary runtime profile: hybrid GI/reflections with volumetrics and HDRI/IBL.",
        techniques: &["hybrid", "volumetrics", "hdri"],
    },
    ProfileSpec {
        name: "hybrid",
        description: "Hybrid-focused profile for direct tuning of Lumen-inspired realtime passes.",
        techniques: &["hybrid", "hdri"],
    },
    ProfileSpec {
        name: "reference",
        description:
            "Reference quality profile: path tracing plus volumetrics and HDRI/IBL validation.",
        techniques: &["pathtracer", "volumetrics", "hdri"],
    },
];
