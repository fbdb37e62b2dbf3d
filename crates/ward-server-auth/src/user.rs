// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Profile documents and verified callers.
//!
//! This module provides:
//! - [`UserProfile`] - the profile document stored per principal
//! - [`VerifiedCaller`] - identity established from a verified bearer credential

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Role, Uid};

/// A principal's profile document, keyed by identity.
///
/// The document is the sole carrier of the principal's role; the identity
/// provider stores only credentials. Optional contact fields are normalized
/// to the empty string rather than omitted, matching the documents the
/// dashboard has always written.
///
/// # PII Handling
///
/// `email`, names, `phone`, `birthdate` and `address` are user-provided PII
/// and should be redacted in logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
	/// Identity-provider account this document belongs to.
	pub uid: Uid,

	/// Email address, unique across principals.
	pub email: String,

	/// Given name. Empty string when not supplied.
	#[serde(default)]
	pub first_name: String,

	/// Family name. Empty string when not supplied.
	#[serde(default)]
	pub last_name: String,

	/// Contact phone number. Empty string when not supplied.
	#[serde(default)]
	pub phone: String,

	/// Birthdate as entered, free-form. Empty string when not supplied.
	#[serde(default)]
	pub birthdate: String,

	/// Postal address, free-form. Empty string when not supplied.
	#[serde(default)]
	pub address: String,

	/// Authorization role.
	pub role: Role,

	/// Server-assigned creation timestamp.
	pub created_at: DateTime<Utc>,
}

impl UserProfile {
	/// Display name shown in rosters: first and last name joined by a
	/// space. Either part may be empty.
	pub fn display_name(&self) -> String {
		format!("{} {}", self.first_name, self.last_name)
			.trim()
			.to_string()
	}
}

/// A caller whose bearer credential the identity provider has verified.
///
/// Produced by the transport layer before any handler runs. Carries no
/// role: the role is looked up from the profile store per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedCaller {
	/// The caller's identity.
	pub uid: Uid,

	/// The email the credential was issued for.
	pub email: String,
}

impl VerifiedCaller {
	/// Create a verified caller.
	pub fn new(uid: impl Into<Uid>, email: impl Into<String>) -> Self {
		Self {
			uid: uid.into(),
			email: email.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn make_profile() -> UserProfile {
		UserProfile {
			uid: Uid::new("u-1"),
			email: "nurse@clinic.test".to_string(),
			first_name: "Maria".to_string(),
			last_name: "Cruz".to_string(),
			phone: String::new(),
			birthdate: String::new(),
			address: String::new(),
			role: Role::Staff,
			created_at: Utc::now(),
		}
	}

	mod display_name {
		use super::*;

		#[test]
		fn joins_first_and_last() {
			let profile = make_profile();
			assert_eq!(profile.display_name(), "Maria Cruz");
		}

		#[test]
		fn trims_when_last_name_empty() {
			let mut profile = make_profile();
			profile.last_name = String::new();
			assert_eq!(profile.display_name(), "Maria");
		}

		#[test]
		fn empty_when_both_missing() {
			let mut profile = make_profile();
			profile.first_name = String::new();
			profile.last_name = String::new();
			assert_eq!(profile.display_name(), "");
		}
	}

	mod serde_shape {
		use super::*;

		#[test]
		fn optional_fields_default_to_empty_string() {
			let json = r#"{
				"uid": "u-2",
				"email": "a@clinic.test",
				"role": "admin",
				"created_at": "2025-06-01T00:00:00Z"
			}"#;
			let profile: UserProfile = serde_json::from_str(json).unwrap();
			assert_eq!(profile.first_name, "");
			assert_eq!(profile.phone, "");
			assert_eq!(profile.address, "");
			assert_eq!(profile.role, Role::Admin);
		}

		#[test]
		fn role_string_must_be_known() {
			let json = r#"{
				"uid": "u-3",
				"email": "a@clinic.test",
				"role": "owner",
				"created_at": "2025-06-01T00:00:00Z"
			}"#;
			assert!(serde_json::from_str::<UserProfile>(json).is_err());
		}
	}
}
