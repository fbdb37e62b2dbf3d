// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration sections.
//!
//! Each section comes in two shapes: a `*ConfigLayer` (every field
//! optional, mergeable across sources) and the resolved `*Config` it
//! finalizes into.

mod auth;
mod directory;
mod http;
mod jobs;
mod logging;

pub use auth::{AuthConfig, AuthConfigLayer};
pub use directory::{DirectoryConfig, DirectoryConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use jobs::{JobsConfig, JobsConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
