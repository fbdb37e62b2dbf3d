// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Ward user-provisioning server.
//!
//! This crate provides the HTTP surface over the provisioning service:
//! bearer-token authentication middleware, the `createUser`/`deleteUser`
//! RPC routes, roster listing, profile updates, health reporting, and the
//! orphan-reconciliation background job.

pub mod api;
pub mod auth_middleware;
pub mod error;
pub mod jobs;
pub mod routes;

pub use api::{create_router, AppState};
pub use error::ServerError;
pub use ward_server_config::ServerConfig;
