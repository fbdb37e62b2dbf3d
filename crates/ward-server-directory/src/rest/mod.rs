// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! REST implementations of the directory seams.
//!
//! [`RestIdentityProvider`] speaks the identity-toolkit account API;
//! [`RestProfileStore`] speaks the document-store API. Endpoints, project
//! id and the API key all come from configuration, never from literals.

mod identity;
mod profile;

pub use identity::RestIdentityProvider;
pub use profile::RestProfileStore;

use serde::Deserialize;
use ward_common_config::SecretString;

use crate::error::DirectoryError;

/// Connection parameters shared by both REST clients.
#[derive(Debug, Clone)]
pub struct RestDirectoryConfig {
	/// Identity-provider API base, e.g. `https://identitytoolkit.googleapis.com`.
	pub identity_endpoint: String,
	/// Document-store API base, e.g. `https://firestore.googleapis.com`.
	pub profile_endpoint: String,
	/// Backend project identifier.
	pub project_id: String,
	/// API key attached to every request.
	pub api_key: SecretString,
}

/// Error envelope both backends return on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
	error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
	#[serde(default)]
	code: u16,
	#[serde(default)]
	message: String,
}

/// Map a non-2xx response body onto the directory error taxonomy.
///
/// The provider reports domain conditions as upper-snake message codes
/// (`EMAIL_EXISTS`, `USER_NOT_FOUND`, `INVALID_ID_TOKEN`, ...).
pub(crate) async fn provider_error(response: reqwest::Response) -> DirectoryError {
	let status = response.status().as_u16();
	let body = response.text().await.unwrap_or_default();

	let (code, message) = match serde_json::from_str::<ApiErrorEnvelope>(&body) {
		Ok(envelope) => {
			let code = if envelope.error.code == 0 {
				status
			} else {
				envelope.error.code
			};
			(code, envelope.error.message)
		}
		Err(_) => (status, body),
	};

	classify_provider_error(code, message)
}

pub(crate) fn classify_provider_error(code: u16, message: String) -> DirectoryError {
	let head = message.split(&[' ', ':'][..]).next().unwrap_or_default();
	match head {
		"EMAIL_EXISTS" | "DUPLICATE_LOCAL_ID" => DirectoryError::Conflict(message),
		"USER_NOT_FOUND" | "EMAIL_NOT_FOUND" => DirectoryError::NotFound(message),
		"INVALID_ID_TOKEN" | "TOKEN_EXPIRED" | "USER_DISABLED" | "MISSING_ID_TOKEN" => {
			DirectoryError::InvalidToken(message)
		}
		_ => DirectoryError::Provider { code, message },
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn email_exists_maps_to_conflict() {
		let err = classify_provider_error(400, "EMAIL_EXISTS".to_string());
		assert!(matches!(err, DirectoryError::Conflict(_)));
	}

	#[test]
	fn user_not_found_maps_to_not_found() {
		let err = classify_provider_error(400, "USER_NOT_FOUND".to_string());
		assert!(matches!(err, DirectoryError::NotFound(_)));
	}

	#[test]
	fn expired_token_maps_to_invalid_token() {
		let err = classify_provider_error(401, "TOKEN_EXPIRED : credential too old".to_string());
		assert!(matches!(err, DirectoryError::InvalidToken(_)));
	}

	#[test]
	fn unknown_code_keeps_provider_status() {
		let err = classify_provider_error(503, "backend unavailable".to_string());
		match err {
			DirectoryError::Provider { code, message } => {
				assert_eq!(code, 503);
				assert_eq!(message, "backend unavailable");
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}
}
