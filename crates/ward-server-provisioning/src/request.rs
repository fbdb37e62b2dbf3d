// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Provisioning request and response payloads.

use serde::{Deserialize, Serialize};
use ward_server_auth::{Role, Uid, UserProfile};

use crate::error::ProvisioningError;

/// Payload for creating a principal.
///
/// Every field defaults so that a missing field reaches validation as an
/// empty string and fails with a typed [`ProvisioningError::InvalidArgument`]
/// rather than a deserializer rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvisionRequest {
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub password: String,
	#[serde(default)]
	pub first_name: String,
	#[serde(default)]
	pub last_name: String,
	#[serde(default)]
	pub phone: String,
	#[serde(default)]
	pub birthdate: String,
	#[serde(default)]
	pub address: String,
	#[serde(default)]
	pub role: String,
	/// Client-supplied key; a repeated key returns the recorded outcome
	/// instead of creating a second account.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub idempotency_key: Option<String>,
}

impl ProvisionRequest {
	/// Check required fields and resolve the requested role.
	///
	/// `email`, `password` and `role` are required. An empty role after
	/// validation would still fall back to [`Role::Staff`] at document
	/// write time, but it never gets that far through this path.
	///
	/// # Errors
	///
	/// [`ProvisioningError::InvalidArgument`] naming the offending field.
	pub fn validate(&self) -> Result<Role, ProvisioningError> {
		if self.email.is_empty() {
			return Err(ProvisioningError::InvalidArgument("email"));
		}
		if self.password.is_empty() {
			return Err(ProvisioningError::InvalidArgument("password"));
		}
		if self.role.is_empty() {
			return Err(ProvisioningError::InvalidArgument("role"));
		}
		self.role
			.parse()
			.map_err(|_| ProvisioningError::InvalidArgument("role"))
	}

	/// Display name for the identity-provider record: first and last name
	/// joined, missing parts degrade to the empty string.
	pub fn display_name(&self) -> String {
		format!("{} {}", self.first_name, self.last_name)
			.trim()
			.to_string()
	}
}

/// Partial profile update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRequest {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub birthdate: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub address: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
}

impl UpdateRequest {
	/// Resolve the requested role change, if any.
	///
	/// # Errors
	///
	/// [`ProvisioningError::InvalidArgument`] for an unknown role string.
	pub fn requested_role(&self) -> Result<Option<Role>, ProvisioningError> {
		match &self.role {
			None => Ok(None),
			Some(role) => role
				.parse()
				.map(Some)
				.map_err(|_| ProvisioningError::InvalidArgument("role")),
		}
	}
}

/// A successfully provisioned principal: the generated identity plus the
/// profile document as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedUser {
	pub uid: Uid,
	pub profile: UserProfile,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn valid_request() -> ProvisionRequest {
		ProvisionRequest {
			email: "b@x.com".to_string(),
			password: "p2".to_string(),
			first_name: "B".to_string(),
			last_name: "C".to_string(),
			role: "staff".to_string(),
			..Default::default()
		}
	}

	#[test]
	fn validate_accepts_complete_request() {
		assert_eq!(valid_request().validate().unwrap(), Role::Staff);
	}

	#[test]
	fn validate_requires_email() {
		let mut req = valid_request();
		req.email = String::new();
		assert!(matches!(
			req.validate(),
			Err(ProvisioningError::InvalidArgument("email"))
		));
	}

	#[test]
	fn validate_requires_password() {
		let mut req = valid_request();
		req.password = String::new();
		assert!(matches!(
			req.validate(),
			Err(ProvisioningError::InvalidArgument("password"))
		));
	}

	#[test]
	fn validate_requires_role() {
		let mut req = valid_request();
		req.role = String::new();
		assert!(matches!(
			req.validate(),
			Err(ProvisioningError::InvalidArgument("role"))
		));
	}

	#[test]
	fn validate_rejects_unknown_role() {
		let mut req = valid_request();
		req.role = "surgeon".to_string();
		assert!(matches!(
			req.validate(),
			Err(ProvisioningError::InvalidArgument("role"))
		));
	}

	#[test]
	fn missing_payload_fields_deserialize_to_empty() {
		let req: ProvisionRequest = serde_json::from_str(r#"{"email": "a@x.com"}"#).unwrap();
		assert_eq!(req.email, "a@x.com");
		assert_eq!(req.password, "");
		assert_eq!(req.role, "");
		assert!(req.idempotency_key.is_none());
	}

	#[test]
	fn display_name_joins_names() {
		assert_eq!(valid_request().display_name(), "B C");

		let mut req = valid_request();
		req.first_name = String::new();
		req.last_name = String::new();
		assert_eq!(req.display_name(), "");
	}

	#[test]
	fn update_role_parses_or_rejects() {
		let update = UpdateRequest {
			role: Some("admin".to_string()),
			..Default::default()
		};
		assert_eq!(update.requested_role().unwrap(), Some(Role::Admin));

		let update = UpdateRequest::default();
		assert_eq!(update.requested_role().unwrap(), None);

		let update = UpdateRequest {
			role: Some("janitor".to_string()),
			..Default::default()
		};
		assert!(update.requested_role().is_err());
	}
}
