// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client for the provisioning API.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use ward_server_auth::{Uid, UserProfile};

/// Errors talking to the provisioning API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	/// The server answered with a structured error.
	#[error("{message} ({kind})")]
	Api { kind: String, message: String },

	/// The server could not be reached or answered garbage.
	#[error("transport error: {0}")]
	Transport(#[from] reqwest::Error),
}

/// The provisioning form's fields, exactly as submitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewUserForm {
	pub email: String,
	pub password: String,
	pub first_name: String,
	pub last_name: String,
	pub phone: String,
	pub birthdate: String,
	pub address: String,
	pub role: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub idempotency_key: Option<String>,
}

/// Partial profile edit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileChanges {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub birthdate: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub address: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
	#[serde(default)]
	error: String,
	#[serde(default)]
	message: String,
}

#[derive(Debug, Deserialize)]
struct ListUsersResponse {
	#[serde(default)]
	users: Vec<UserProfile>,
}

/// The created principal as the server reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedUser {
	pub uid: Uid,
	pub profile: UserProfile,
}

/// Client for the provisioning API. The operator's bearer token rides on
/// every request.
pub struct ApiClient {
	client: reqwest::Client,
	base_url: String,
	token: String,
}

impl ApiClient {
	pub fn new(server_url: &str, token: impl Into<String>) -> Self {
		Self {
			client: ward_common_http::new_client(),
			base_url: server_url.trim_end_matches('/').to_string(),
			token: token.into(),
		}
	}

	#[instrument(skip_all)]
	pub async fn list_users(&self) -> Result<Vec<UserProfile>, ApiError> {
		let response = self
			.client
			.get(format!("{}/api/users", self.base_url))
			.bearer_auth(&self.token)
			.send()
			.await?;

		let response = Self::check(response).await?;
		let list: ListUsersResponse = response.json().await?;
		debug!(count = list.users.len(), "fetched roster");
		Ok(list.users)
	}

	#[instrument(skip_all, fields(email = %form.email))]
	pub async fn create_user(&self, form: &NewUserForm) -> Result<CreatedUser, ApiError> {
		let response = self
			.client
			.post(format!("{}/api/users", self.base_url))
			.bearer_auth(&self.token)
			.json(form)
			.send()
			.await?;

		let response = Self::check(response).await?;
		Ok(response.json().await?)
	}

	#[instrument(skip_all, fields(uid = %uid))]
	pub async fn update_user(
		&self,
		uid: &Uid,
		changes: &ProfileChanges,
	) -> Result<UserProfile, ApiError> {
		let response = self
			.client
			.put(format!("{}/api/users/{}", self.base_url, uid))
			.bearer_auth(&self.token)
			.json(changes)
			.send()
			.await?;

		let response = Self::check(response).await?;
		Ok(response.json().await?)
	}

	#[instrument(skip_all, fields(uid = %uid))]
	pub async fn delete_user(&self, uid: &Uid) -> Result<(), ApiError> {
		let response = self
			.client
			.delete(format!("{}/api/users/{}", self.base_url, uid))
			.bearer_auth(&self.token)
			.send()
			.await?;

		Self::check(response).await?;
		Ok(())
	}

	/// Turn a non-2xx response into the server's structured error.
	async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
		if response.status().is_success() {
			return Ok(response);
		}

		let status = response.status();
		let body = response.text().await.unwrap_or_default();
		let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or(ErrorBody {
			error: status.to_string(),
			message: body,
		});

		Err(ApiError::Api {
			kind: parsed.error,
			message: parsed.message,
		})
	}
}
