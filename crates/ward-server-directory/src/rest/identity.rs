// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Identity-toolkit REST client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};
use ward_server_auth::{Uid, VerifiedCaller};

use crate::error::{DirectoryError, Result};
use crate::identity::IdentityProvider;
use crate::rest::{provider_error, RestDirectoryConfig};

const LIST_PAGE_SIZE: u32 = 500;

/// [`IdentityProvider`] backed by the managed identity service's REST API.
pub struct RestIdentityProvider {
	client: reqwest::Client,
	config: RestDirectoryConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
	local_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountInfo {
	local_id: String,
	#[serde(default)]
	email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
	#[serde(default)]
	users: Vec<AccountInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchGetResponse {
	#[serde(default)]
	users: Vec<AccountInfo>,
	#[serde(default)]
	next_page_token: Option<String>,
}

impl RestIdentityProvider {
	pub fn new(config: RestDirectoryConfig) -> Self {
		Self {
			client: ward_common_http::new_client(),
			config,
		}
	}

	fn account_url(&self, action: &str) -> String {
		format!(
			"{}/v1/accounts:{}?key={}",
			self.config.identity_endpoint,
			action,
			self.config.api_key.expose()
		)
	}

	fn project_url(&self, action: &str) -> String {
		format!(
			"{}/v1/projects/{}/accounts:{}?key={}",
			self.config.identity_endpoint,
			self.config.project_id,
			action,
			self.config.api_key.expose()
		)
	}
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
	#[instrument(level = "debug", skip_all)]
	async fn verify_token(&self, token: &str) -> Result<VerifiedCaller> {
		let response = self
			.client
			.post(self.account_url("lookup"))
			.json(&json!({ "idToken": token }))
			.send()
			.await?;

		if !response.status().is_success() {
			return Err(provider_error(response).await);
		}

		let lookup: LookupResponse = response.json().await?;
		let account = lookup
			.users
			.into_iter()
			.next()
			.ok_or_else(|| DirectoryError::InvalidToken("credential matches no account".to_string()))?;

		Ok(VerifiedCaller::new(account.local_id, account.email))
	}

	#[instrument(level = "debug", skip(self, password), fields(email = %email))]
	async fn create_account(
		&self,
		email: &str,
		password: &str,
		display_name: &str,
	) -> Result<Uid> {
		let response = self
			.client
			.post(self.account_url("signUp"))
			.json(&json!({
				"email": email,
				"password": password,
				"displayName": display_name,
				"returnSecureToken": false,
			}))
			.send()
			.await?;

		if !response.status().is_success() {
			return Err(provider_error(response).await);
		}

		let created: SignUpResponse = response.json().await?;
		debug!(uid = %created.local_id, "identity account created");
		Ok(Uid::new(created.local_id))
	}

	#[instrument(level = "debug", skip(self), fields(uid = %uid))]
	async fn delete_account(&self, uid: &Uid) -> Result<()> {
		let response = self
			.client
			.post(self.project_url("delete"))
			.json(&json!({ "localId": uid.as_str() }))
			.send()
			.await?;

		if !response.status().is_success() {
			return Err(provider_error(response).await);
		}

		Ok(())
	}

	#[instrument(level = "debug", skip_all)]
	async fn list_account_uids(&self) -> Result<Vec<Uid>> {
		let mut uids = Vec::new();
		let mut page_token: Option<String> = None;

		loop {
			let mut url = format!(
				"{}&maxResults={}",
				self.project_url("batchGet"),
				LIST_PAGE_SIZE
			);
			if let Some(token) = &page_token {
				url.push_str("&nextPageToken=");
				url.push_str(token);
			}

			let response = self.client.get(url).send().await?;
			if !response.status().is_success() {
				return Err(provider_error(response).await);
			}

			let page: BatchGetResponse = response.json().await?;
			uids.extend(page.users.into_iter().map(|u| Uid::new(u.local_id)));

			match page.next_page_token {
				Some(token) if !token.is_empty() => page_token = Some(token),
				_ => break,
			}
		}

		Ok(uids)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ward_common_config::SecretString;

	fn test_config() -> RestDirectoryConfig {
		RestDirectoryConfig {
			identity_endpoint: "https://identity.invalid".to_string(),
			profile_endpoint: "https://documents.invalid".to_string(),
			project_id: "clinic-test".to_string(),
			api_key: SecretString::new("k3y".to_string()),
		}
	}

	#[test]
	fn account_url_carries_action_and_key() {
		let provider = RestIdentityProvider::new(test_config());
		assert_eq!(
			provider.account_url("lookup"),
			"https://identity.invalid/v1/accounts:lookup?key=k3y"
		);
	}

	#[test]
	fn project_url_carries_project_id() {
		let provider = RestIdentityProvider::new(test_config());
		assert_eq!(
			provider.project_url("delete"),
			"https://identity.invalid/v1/projects/clinic-test/accounts:delete?key=k3y"
		);
	}

	#[test]
	fn lookup_response_tolerates_missing_users() {
		let lookup: LookupResponse = serde_json::from_str("{}").unwrap();
		assert!(lookup.users.is_empty());
	}

	#[test]
	fn signup_response_decodes_local_id() {
		let created: SignUpResponse =
			serde_json::from_str(r#"{"localId": "abc123", "email": "a@x.test"}"#).unwrap();
		assert_eq!(created.local_id, "abc123");
	}
}
