// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Cross-store orphan reconciliation.
//!
//! Provisioning spans two stores with no shared transaction, so a crash or
//! partial failure can leave an identity account with no profile document,
//! or a profile document with no identity account. This job scans both
//! sides and reports the orphans. It deliberately repairs nothing, because
//! an automatic delete could race a concurrent in-flight provision.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{instrument, warn};
use ward_server_directory::{IdentityProvider, ProfileStore};
use ward_server_jobs::{Job, JobContext, JobError, JobOutput};

pub struct ReconcileJob {
	identity: Arc<dyn IdentityProvider>,
	profiles: Arc<dyn ProfileStore>,
}

impl ReconcileJob {
	pub fn new(identity: Arc<dyn IdentityProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
		Self { identity, profiles }
	}
}

#[async_trait]
impl Job for ReconcileJob {
	fn id(&self) -> &str {
		"directory-reconcile"
	}

	fn name(&self) -> &str {
		"Directory Reconciliation"
	}

	fn description(&self) -> &str {
		"Report identity accounts without profiles and profiles without accounts"
	}

	#[instrument(skip(self, ctx), fields(job_id = "directory-reconcile"))]
	async fn run(&self, ctx: &JobContext) -> Result<JobOutput, JobError> {
		if ctx.cancellation_token.is_cancelled() {
			return Err(JobError::Cancelled);
		}

		let account_uids: HashSet<String> = self
			.identity
			.list_account_uids()
			.await
			.map_err(|e| JobError::Failed {
				message: e.to_string(),
				retryable: true,
			})?
			.into_iter()
			.map(|uid| uid.into_inner())
			.collect();

		let profile_uids: HashSet<String> = self
			.profiles
			.list_profiles()
			.await
			.map_err(|e| JobError::Failed {
				message: e.to_string(),
				retryable: true,
			})?
			.into_iter()
			.map(|p| p.uid.into_inner())
			.collect();

		let accounts_without_profile: Vec<&String> =
			account_uids.difference(&profile_uids).collect();
		let profiles_without_account: Vec<&String> =
			profile_uids.difference(&account_uids).collect();

		for uid in &accounts_without_profile {
			warn!(uid = %uid, "identity account has no profile document");
		}
		for uid in &profiles_without_account {
			warn!(uid = %uid, "profile document has no identity account");
		}

		let message = format!(
			"{} account orphan(s), {} profile orphan(s)",
			accounts_without_profile.len(),
			profiles_without_account.len()
		);

		Ok(JobOutput {
			message,
			metadata: Some(serde_json::json!({
				"accounts_without_profile": accounts_without_profile,
				"profiles_without_account": profiles_without_account,
			})),
		})
	}
}
