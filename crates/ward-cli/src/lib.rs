// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Operator client for the Ward provisioning API.
//!
//! This crate is the programmatic side of the CLI: [`ApiClient`] talks to
//! the server with the operator's bearer token attached, and [`Roster`]
//! holds the in-memory user list the way the dashboard's staff table did:
//! filtered to the operator's authority, updated in place from operation
//! results, and resilient to fetch failures.

pub mod client;
pub mod roster;

pub use client::{ApiClient, ApiError, CreatedUser, NewUserForm, ProfileChanges};
pub use roster::Roster;
