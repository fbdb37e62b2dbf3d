// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The identity-provider seam.

use async_trait::async_trait;
use ward_server_auth::{Uid, VerifiedCaller};

use crate::error::Result;

/// The managed identity service: owns passwords, issues and verifies
/// bearer credentials, and is the authority on account existence.
///
/// Email uniqueness is enforced here, not by Ward: two concurrent
/// creations for the same email race at this layer and the loser gets
/// [`DirectoryError::Conflict`](crate::DirectoryError::Conflict).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
	/// Verify a bearer credential and return the caller it was issued for.
	///
	/// # Errors
	///
	/// `InvalidToken` for rejected or expired credentials; `Transport` when
	/// the provider could not be reached.
	async fn verify_token(&self, token: &str) -> Result<VerifiedCaller>;

	/// Create an account and return its generated identity.
	///
	/// # Errors
	///
	/// `Conflict` when the email is already registered.
	async fn create_account(
		&self,
		email: &str,
		password: &str,
		display_name: &str,
	) -> Result<Uid>;

	/// Delete the account for `uid`.
	///
	/// # Errors
	///
	/// `NotFound` when no such account exists.
	async fn delete_account(&self, uid: &Uid) -> Result<()>;

	/// All account identities known to the provider, for reconciliation.
	async fn list_account_uids(&self) -> Result<Vec<Uid>>;
}
