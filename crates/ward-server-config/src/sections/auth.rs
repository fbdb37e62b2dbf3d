// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Authentication configuration section.
//!
//! `bootstrap_email` designates the one identity allowed to act with
//! superadmin authority regardless of stored role. It exists to seed the
//! first superadmin; clear it once seeding is done.

use serde::Deserialize;

/// Auth configuration (runtime, fully resolved).
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
	/// Email of the bootstrap identity. Empty disables the bypass.
	pub bootstrap_email: String,
	/// Serve against in-memory stores instead of the managed backends.
	pub dev_mode: bool,
	/// Deployment environment name (`WARD_SERVER_ENV`).
	pub environment: String,
}

/// Auth configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub bootstrap_email: Option<String>,
	#[serde(default)]
	pub dev_mode: Option<bool>,
	#[serde(default)]
	pub environment: Option<String>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.bootstrap_email.is_some() {
			self.bootstrap_email = other.bootstrap_email;
		}
		if other.dev_mode.is_some() {
			self.dev_mode = other.dev_mode;
		}
		if other.environment.is_some() {
			self.environment = other.environment;
		}
	}

	pub fn finalize(self) -> AuthConfig {
		AuthConfig {
			bootstrap_email: self.bootstrap_email.unwrap_or_default(),
			dev_mode: self.dev_mode.unwrap_or(false),
			environment: self.environment.unwrap_or_default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_are_locked_down() {
		let config = AuthConfigLayer::default().finalize();
		assert_eq!(config.bootstrap_email, "");
		assert!(!config.dev_mode);
	}

	#[test]
	fn merge_overwrites_bootstrap_email() {
		let mut base = AuthConfigLayer {
			bootstrap_email: Some("old@clinic.test".to_string()),
			..Default::default()
		};
		base.merge(AuthConfigLayer {
			bootstrap_email: Some("new@clinic.test".to_string()),
			..Default::default()
		});
		assert_eq!(base.finalize().bootstrap_email, "new@clinic.test");
	}
}
