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

//! # Prism Core
//!
//! Foundational crate for the lighting asset system: absolute asset
//! locations and their resolver, the frozen technique/profile registry, the
//! shared error type, and the contract of the pluggable fetch capability.
//!
//! Loading itself lives in `prism-io`; this crate performs no I/O.

#![warn(missing_docs)]

pub mod error;
pub mod fetch;
pub mod location;
pub mod registry;

pub use error::{LightingError, LightingResult};
pub use fetch::{FetchError, FetchResponse, Fetcher, StaticResponse};
pub use location::{resolve, AssetLocation, PackageRoot, Scheme};
pub use registry::{Job, LightingRegistry, Profile, Technique};
