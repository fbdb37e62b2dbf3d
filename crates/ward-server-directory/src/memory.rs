// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! In-memory directory double.
//!
//! Implements both store seams against process-local maps. Used by tests
//! and by dev mode (`WARD_SERVER_AUTH_DEV_MODE`), where running against the
//! managed backends would be pointless friction. Failure injection toggles
//! let tests exercise the partial-failure paths the REST backends can hit.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use ward_server_auth::{Uid, UserProfile, VerifiedCaller};

use crate::error::{DirectoryError, Result};
use crate::identity::IdentityProvider;
use crate::profile::ProfileStore;

#[derive(Debug, Clone)]
struct MemoryAccount {
	email: String,
	#[allow(dead_code)]
	password: String,
	#[allow(dead_code)]
	display_name: String,
}

/// Process-local implementation of both directory seams.
#[derive(Default)]
pub struct MemoryDirectory {
	accounts: RwLock<HashMap<Uid, MemoryAccount>>,
	tokens: RwLock<HashMap<String, Uid>>,
	profiles: RwLock<HashMap<Uid, UserProfile>>,
	next_id: AtomicU64,
	fail_profile_writes: AtomicBool,
	fail_profile_deletes: AtomicBool,
	fail_account_deletes: AtomicBool,
}

impl MemoryDirectory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Mint a bearer token for an existing account. Test/dev affordance;
	/// real tokens come from the managed identity service.
	pub async fn mint_token(&self, uid: &Uid) -> Result<String> {
		let accounts = self.accounts.read().await;
		if !accounts.contains_key(uid) {
			return Err(DirectoryError::NotFound(format!("no account {uid}")));
		}
		let token = format!("wt_{}", uid);
		self.tokens.write().await.insert(token.clone(), uid.clone());
		Ok(token)
	}

	/// Make subsequent profile writes fail with a provider error.
	pub fn set_fail_profile_writes(&self, fail: bool) {
		self.fail_profile_writes.store(fail, Ordering::SeqCst);
	}

	/// Make subsequent profile deletes fail with a provider error.
	pub fn set_fail_profile_deletes(&self, fail: bool) {
		self.fail_profile_deletes.store(fail, Ordering::SeqCst);
	}

	/// Make subsequent account deletes fail with a provider error.
	pub fn set_fail_account_deletes(&self, fail: bool) {
		self.fail_account_deletes.store(fail, Ordering::SeqCst);
	}

	fn injected_failure(message: &str) -> DirectoryError {
		DirectoryError::Provider {
			code: 500,
			message: message.to_string(),
		}
	}
}

#[async_trait]
impl IdentityProvider for MemoryDirectory {
	async fn verify_token(&self, token: &str) -> Result<VerifiedCaller> {
		let tokens = self.tokens.read().await;
		let uid = tokens
			.get(token)
			.ok_or_else(|| DirectoryError::InvalidToken("unknown token".to_string()))?;

		let accounts = self.accounts.read().await;
		let account = accounts
			.get(uid)
			.ok_or_else(|| DirectoryError::InvalidToken("token for deleted account".to_string()))?;

		Ok(VerifiedCaller::new(uid.clone(), account.email.clone()))
	}

	async fn create_account(
		&self,
		email: &str,
		password: &str,
		display_name: &str,
	) -> Result<Uid> {
		let mut accounts = self.accounts.write().await;
		if accounts.values().any(|a| a.email == email) {
			return Err(DirectoryError::Conflict(format!(
				"email already registered: {email}"
			)));
		}

		let uid = Uid::new(format!("mem-{:04}", self.next_id.fetch_add(1, Ordering::SeqCst)));
		accounts.insert(
			uid.clone(),
			MemoryAccount {
				email: email.to_string(),
				password: password.to_string(),
				display_name: display_name.to_string(),
			},
		);
		Ok(uid)
	}

	async fn delete_account(&self, uid: &Uid) -> Result<()> {
		if self.fail_account_deletes.load(Ordering::SeqCst) {
			return Err(Self::injected_failure("injected account delete failure"));
		}

		let mut accounts = self.accounts.write().await;
		if accounts.remove(uid).is_none() {
			return Err(DirectoryError::NotFound(format!("no account {uid}")));
		}

		// Tokens for a deleted account stop verifying via the account
		// lookup; drop them eagerly anyway.
		self.tokens.write().await.retain(|_, t| *t != *uid);
		Ok(())
	}

	async fn list_account_uids(&self) -> Result<Vec<Uid>> {
		let mut uids: Vec<Uid> = self.accounts.read().await.keys().cloned().collect();
		uids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
		Ok(uids)
	}
}

#[async_trait]
impl ProfileStore for MemoryDirectory {
	async fn fetch_profile(&self, uid: &Uid) -> Result<Option<UserProfile>> {
		Ok(self.profiles.read().await.get(uid).cloned())
	}

	async fn put_profile(&self, profile: &UserProfile) -> Result<()> {
		if self.fail_profile_writes.load(Ordering::SeqCst) {
			return Err(Self::injected_failure("injected profile write failure"));
		}
		self.profiles
			.write()
			.await
			.insert(profile.uid.clone(), profile.clone());
		Ok(())
	}

	async fn delete_profile(&self, uid: &Uid) -> Result<()> {
		if self.fail_profile_deletes.load(Ordering::SeqCst) {
			return Err(Self::injected_failure("injected profile delete failure"));
		}
		if self.profiles.write().await.remove(uid).is_none() {
			return Err(DirectoryError::NotFound(format!("no profile for {uid}")));
		}
		Ok(())
	}

	async fn list_profiles(&self) -> Result<Vec<UserProfile>> {
		let mut profiles: Vec<UserProfile> = self.profiles.read().await.values().cloned().collect();
		profiles.sort_by(|a, b| a.uid.as_str().cmp(b.uid.as_str()));
		Ok(profiles)
	}
}
