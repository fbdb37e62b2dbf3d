// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The profile-store seam.

use async_trait::async_trait;
use ward_server_auth::{Role, Uid, UserProfile};

use crate::error::Result;

/// The managed document store holding per-principal profile documents,
/// keyed by identity.
///
/// An absent document is a valid, expected state (new or half-provisioned
/// accounts) and is reported as `Ok(None)`; only transport and provider
/// failures are errors.
#[async_trait]
pub trait ProfileStore: Send + Sync {
	/// Fetch the profile document for `uid`, if one exists.
	async fn fetch_profile(&self, uid: &Uid) -> Result<Option<UserProfile>>;

	/// Read a principal's stored role.
	///
	/// `Ok(None)` means no profile document: the principal has no role and
	/// is implicitly least-privileged.
	async fn fetch_role(&self, uid: &Uid) -> Result<Option<Role>> {
		Ok(self.fetch_profile(uid).await?.map(|p| p.role))
	}

	/// Create or replace the profile document keyed by `profile.uid`.
	async fn put_profile(&self, profile: &UserProfile) -> Result<()>;

	/// Delete the profile document for `uid`.
	///
	/// # Errors
	///
	/// `NotFound` when no document exists.
	async fn delete_profile(&self, uid: &Uid) -> Result<()>;

	/// All profile documents, for rosters and reconciliation.
	async fn list_profiles(&self) -> Result<Vec<UserProfile>>;
}
