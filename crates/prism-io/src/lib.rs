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

//! # Prism IO
//!
//! I/O services for the lighting asset system: the content retriever, the
//! concurrent bundle loader, and an HTTP fetch capability.

#![warn(missing_docs)]

pub mod bundle;
pub mod http;
pub mod loader;
pub mod retriever;

pub use bundle::{LoadedJob, LoadedProfileBundle, LoadedTechnique, LoadedTechniqueBundle};
pub use http::HttpFetcher;
pub use loader::BundleLoader;
pub use retriever::{ensure_not_html, retrieve, LoadOptions, WgslSource};
