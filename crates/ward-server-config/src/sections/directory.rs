// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Directory backend configuration section.
//!
//! Connection parameters for the managed identity provider and profile
//! store. The API key is a secret and only ever enters through
//! `WARD_SERVER_DIRECTORY_API_KEY` (or its `_FILE` variant), never the
//! TOML file.

use serde::Deserialize;
use ward_common_config::SecretString;

const DEFAULT_IDENTITY_ENDPOINT: &str = "https://identitytoolkit.googleapis.com";
const DEFAULT_PROFILE_ENDPOINT: &str = "https://firestore.googleapis.com";

/// Directory configuration (runtime, fully resolved).
#[derive(Debug, Clone, Default)]
pub struct DirectoryConfig {
	pub identity_endpoint: String,
	pub profile_endpoint: String,
	pub project_id: String,
	pub api_key: Option<SecretString>,
}

/// Directory configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryConfigLayer {
	#[serde(default)]
	pub identity_endpoint: Option<String>,
	#[serde(default)]
	pub profile_endpoint: Option<String>,
	#[serde(default)]
	pub project_id: Option<String>,
}

impl DirectoryConfigLayer {
	pub fn merge(&mut self, other: DirectoryConfigLayer) {
		if other.identity_endpoint.is_some() {
			self.identity_endpoint = other.identity_endpoint;
		}
		if other.profile_endpoint.is_some() {
			self.profile_endpoint = other.profile_endpoint;
		}
		if other.project_id.is_some() {
			self.project_id = other.project_id;
		}
	}

	pub fn finalize(self, api_key: Option<SecretString>) -> DirectoryConfig {
		DirectoryConfig {
			identity_endpoint: self
				.identity_endpoint
				.unwrap_or_else(|| DEFAULT_IDENTITY_ENDPOINT.to_string()),
			profile_endpoint: self
				.profile_endpoint
				.unwrap_or_else(|| DEFAULT_PROFILE_ENDPOINT.to_string()),
			project_id: self.project_id.unwrap_or_default(),
			api_key,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_to_managed_endpoints() {
		let config = DirectoryConfigLayer::default().finalize(None);
		assert_eq!(config.identity_endpoint, DEFAULT_IDENTITY_ENDPOINT);
		assert_eq!(config.profile_endpoint, DEFAULT_PROFILE_ENDPOINT);
		assert_eq!(config.project_id, "");
		assert!(config.api_key.is_none());
	}

	#[test]
	fn finalize_attaches_secret() {
		let layer = DirectoryConfigLayer {
			project_id: Some("clinic-prod".to_string()),
			..Default::default()
		};
		let config = layer.finalize(Some(SecretString::new("k".to_string())));
		assert_eq!(config.project_id, "clinic-prod");
		assert!(config.api_key.is_some());
	}

	#[test]
	fn merge_keeps_unset_fields() {
		let mut base = DirectoryConfigLayer {
			project_id: Some("a".to_string()),
			..Default::default()
		};
		base.merge(DirectoryConfigLayer {
			identity_endpoint: Some("https://id.local".to_string()),
			..Default::default()
		});
		assert_eq!(base.project_id.as_deref(), Some("a"));
		assert_eq!(base.identity_endpoint.as_deref(), Some("https://id.local"));
	}
}
