// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The provisioning service.
//!
//! Ordering invariants:
//! - every precondition (authentication, payload validation, policy) is
//!   checked before the first mutating call
//! - create writes the identity account, then the profile document
//! - delete removes the profile document, then the identity account, so a
//!   crash between the two fails toward "no access"
//! - nothing is rolled back; orphans are the reconciliation job's problem

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};
use ward_server_auth::{
	decide, CallerAttrs, Decision, Role, Uid, UserProfile, VerifiedCaller,
};
use ward_server_directory::{DirectoryError, IdentityProvider, ProfileStore};

use crate::error::ProvisioningError;
use crate::request::{ProvisionRequest, ProvisionedUser, UpdateRequest};

/// Orchestrates account creation and removal across the identity provider
/// and the profile store.
pub struct ProvisioningService {
	identity: Arc<dyn IdentityProvider>,
	profiles: Arc<dyn ProfileStore>,
	bootstrap_email: String,
	// Completed creations by idempotency key. Per-instance and
	// best-effort: the identity provider's email uniqueness remains the
	// backstop across instances.
	completed: Mutex<HashMap<String, ProvisionedUser>>,
}

impl ProvisioningService {
	pub fn new(
		identity: Arc<dyn IdentityProvider>,
		profiles: Arc<dyn ProfileStore>,
		bootstrap_email: impl Into<String>,
	) -> Self {
		Self {
			identity,
			profiles,
			bootstrap_email: bootstrap_email.into(),
			completed: Mutex::new(HashMap::new()),
		}
	}

	/// Create an identity-provider account plus profile document.
	///
	/// # Errors
	///
	/// `Unauthenticated`, `InvalidArgument`, `Denied` before any mutation;
	/// `Internal` when either store write fails (the identity account is
	/// NOT removed if only the profile write failed).
	#[instrument(level = "info", skip_all, fields(email = %request.email))]
	pub async fn provision(
		&self,
		caller: Option<&VerifiedCaller>,
		request: ProvisionRequest,
	) -> Result<ProvisionedUser, ProvisioningError> {
		let caller = caller.ok_or(ProvisioningError::Unauthenticated)?;
		let target = request.validate()?;

		let attrs = self.resolve_caller(caller).await?;
		let granted = match decide(&attrs, target, &self.bootstrap_email) {
			Decision::Allow(role) => role,
			Decision::Deny(reason) => return Err(ProvisioningError::Denied(reason)),
		};

		if let Some(key) = &request.idempotency_key {
			if let Some(done) = self.completed.lock().await.get(key) {
				info!(uid = %done.uid, %key, "returning recorded provisioning outcome");
				return Ok(done.clone());
			}
		}

		let uid = self
			.identity
			.create_account(&request.email, &request.password, &request.display_name())
			.await?;

		let profile = UserProfile {
			uid: uid.clone(),
			email: request.email.clone(),
			first_name: request.first_name.clone(),
			last_name: request.last_name.clone(),
			phone: request.phone.clone(),
			birthdate: request.birthdate.clone(),
			address: request.address.clone(),
			role: granted,
			created_at: Utc::now(),
		};

		if let Err(e) = self.profiles.put_profile(&profile).await {
			warn!(
				uid = %uid,
				error = %e,
				"profile write failed after account creation; account left for reconciliation"
			);
			return Err(ProvisioningError::Internal(e));
		}

		info!(uid = %uid, role = %granted, actor = %caller.uid, "provisioned user");

		let provisioned = ProvisionedUser { uid, profile };
		if let Some(key) = request.idempotency_key {
			self.completed
				.lock()
				.await
				.insert(key, provisioned.clone());
		}
		Ok(provisioned)
	}

	/// Remove a principal from both stores.
	///
	/// The profile document goes first; an interruption leaves an account
	/// with no role rather than a role with no account.
	///
	/// # Errors
	///
	/// The same gate errors as [`ProvisioningService::provision`], plus
	/// `NotFound` when the target exists in neither store and `Internal`
	/// on store failures (including partial deletions).
	#[instrument(level = "info", skip_all, fields(target = %target))]
	pub async fn deprovision(
		&self,
		caller: Option<&VerifiedCaller>,
		target: &Uid,
	) -> Result<(), ProvisioningError> {
		let caller = caller.ok_or(ProvisioningError::Unauthenticated)?;
		self.authorize_management(caller).await?;

		let profile_existed = match self.profiles.delete_profile(target).await {
			Ok(()) => true,
			Err(DirectoryError::NotFound(_)) => false,
			Err(e) => return Err(ProvisioningError::Internal(e)),
		};

		let account_existed = match self.identity.delete_account(target).await {
			Ok(()) => true,
			Err(DirectoryError::NotFound(_)) => false,
			Err(e) => {
				if profile_existed {
					warn!(
						uid = %target,
						error = %e,
						"account delete failed after profile removal; account left for reconciliation"
					);
				}
				return Err(ProvisioningError::Internal(e));
			}
		};

		if !profile_existed && !account_existed {
			return Err(ProvisioningError::NotFound(target.to_string()));
		}

		info!(uid = %target, actor = %caller.uid, "deprovisioned user");
		Ok(())
	}

	/// Rewrite a principal's profile document.
	///
	/// A role change is authorized as if the caller were creating the new
	/// role; a pure contact-info edit is authorized against the profile's
	/// current role.
	///
	/// # Errors
	///
	/// Gate errors as above; `NotFound` when no profile document exists.
	#[instrument(level = "info", skip_all, fields(target = %target))]
	pub async fn update(
		&self,
		caller: Option<&VerifiedCaller>,
		target: &Uid,
		changes: UpdateRequest,
	) -> Result<UserProfile, ProvisioningError> {
		let caller = caller.ok_or(ProvisioningError::Unauthenticated)?;
		let requested_role = changes.requested_role()?;

		let mut profile = self
			.profiles
			.fetch_profile(target)
			.await?
			.ok_or_else(|| ProvisioningError::NotFound(target.to_string()))?;

		let attrs = self.resolve_caller(caller).await?;
		let effective_role = requested_role.unwrap_or(profile.role);
		match decide(&attrs, effective_role, &self.bootstrap_email) {
			Decision::Allow(role) => profile.role = role,
			Decision::Deny(reason) => return Err(ProvisioningError::Denied(reason)),
		}

		if let Some(first_name) = changes.first_name {
			profile.first_name = first_name;
		}
		if let Some(last_name) = changes.last_name {
			profile.last_name = last_name;
		}
		if let Some(phone) = changes.phone {
			profile.phone = phone;
		}
		if let Some(birthdate) = changes.birthdate {
			profile.birthdate = birthdate;
		}
		if let Some(address) = changes.address {
			profile.address = address;
		}

		self.profiles.put_profile(&profile).await?;
		info!(uid = %target, actor = %caller.uid, "updated profile");
		Ok(profile)
	}

	/// Roster listing, filtered to what the caller may see: principals
	/// whose role exceeds the caller's own authority are withheld.
	#[instrument(level = "debug", skip_all)]
	pub async fn roster(
		&self,
		caller: Option<&VerifiedCaller>,
	) -> Result<Vec<UserProfile>, ProvisioningError> {
		let caller = caller.ok_or(ProvisioningError::Unauthenticated)?;
		let attrs = self.resolve_caller(caller).await?;

		let is_bootstrap =
			!self.bootstrap_email.is_empty() && attrs.email == self.bootstrap_email;
		let authority = if is_bootstrap {
			Role::Superadmin
		} else {
			// No resolvable role reads as least-privileged.
			attrs.role.unwrap_or(Role::Staff)
		};

		let profiles = self.profiles.list_profiles().await?;
		Ok(profiles
			.into_iter()
			.filter(|p| authority.has_permission_of(&p.role))
			.collect())
	}

	/// The caller must hold provisioning authority at all: admin,
	/// superadmin, or the bootstrap identity.
	async fn authorize_management(
		&self,
		caller: &VerifiedCaller,
	) -> Result<CallerAttrs, ProvisioningError> {
		let attrs = self.resolve_caller(caller).await?;
		match decide(&attrs, Role::Staff, &self.bootstrap_email) {
			Decision::Allow(_) => Ok(attrs),
			Decision::Deny(reason) => Err(ProvisioningError::Denied(reason)),
		}
	}

	/// Resolve the caller's stored role. The bootstrap identity skips the
	/// lookup entirely, since it may predate its own profile document.
	async fn resolve_caller(
		&self,
		caller: &VerifiedCaller,
	) -> Result<CallerAttrs, ProvisioningError> {
		let mut attrs = CallerAttrs::new(caller.uid.clone(), caller.email.clone());
		if !self.bootstrap_email.is_empty() && caller.email == self.bootstrap_email {
			return Ok(attrs);
		}
		attrs.role = self.profiles.fetch_role(&caller.uid).await?;
		Ok(attrs)
	}
}
