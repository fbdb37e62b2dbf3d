// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Core type definitions for identity and authorization.
//!
//! - [`Uid`]: type-safe wrapper around the identity provider's opaque
//!   account identifier
//! - [`Role`]: closed role enumeration with exhaustive matching everywhere
//!   (no untyped role strings, no silent fallthrough on unknown values)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Uid
// =============================================================================

/// Unique identifier for a principal, issued by the identity provider.
///
/// Opaque, immutable, never reused. Serializes transparently as the
/// underlying string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
	/// Create a Uid from the provider's identifier string.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// The identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Consume the wrapper and return the identifier string.
	pub fn into_inner(self) -> String {
		self.0
	}
}

impl fmt::Display for Uid {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<String> for Uid {
	fn from(id: String) -> Self {
		Self(id)
	}
}

impl From<&str> for Uid {
	fn from(id: &str) -> Self {
		Self(id.to_string())
	}
}

// =============================================================================
// Role
// =============================================================================

/// Authorization role stored in a principal's profile document.
///
/// A principal with no profile document has no role at all, which is
/// modeled as `Option<Role>::None` throughout, not as an extra variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	/// Regular clinic staff; may not provision anyone.
	Staff,
	/// May provision staff accounts.
	Admin,
	/// May provision admin and staff accounts.
	Superadmin,
}

impl Role {
	/// Returns all roles.
	pub fn all() -> &'static [Role] {
		&[Role::Staff, Role::Admin, Role::Superadmin]
	}

	/// Returns true if this role outranks or equals `other`.
	pub fn has_permission_of(&self, other: &Role) -> bool {
		matches!(
			(self, other),
			(Role::Superadmin, _)
				| (Role::Admin, Role::Admin | Role::Staff)
				| (Role::Staff, Role::Staff)
		)
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::Staff => write!(f, "staff"),
			Role::Admin => write!(f, "admin"),
			Role::Superadmin => write!(f, "superadmin"),
		}
	}
}

/// Error parsing a role string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0:?}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
	type Err = RoleParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"staff" => Ok(Role::Staff),
			"admin" => Ok(Role::Admin),
			"superadmin" => Ok(Role::Superadmin),
			other => Err(RoleParseError(other.to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	mod uid {
		use super::*;

		#[test]
		fn roundtrips_inner_string() {
			let uid = Uid::new("LbklG7VzSBU3wF7mSHEG");
			assert_eq!(uid.as_str(), "LbklG7VzSBU3wF7mSHEG");
			assert_eq!(uid.clone().into_inner(), "LbklG7VzSBU3wF7mSHEG");
		}

		#[test]
		fn serializes_as_plain_string() {
			let uid = Uid::new("abc123");
			let json = serde_json::to_string(&uid).unwrap();
			assert_eq!(json, "\"abc123\"");
		}

		#[test]
		fn deserializes_from_plain_string() {
			let uid: Uid = serde_json::from_str("\"abc123\"").unwrap();
			assert_eq!(uid.as_str(), "abc123");
		}

		#[test]
		fn display_matches_inner() {
			assert_eq!(Uid::new("u1").to_string(), "u1");
		}
	}

	mod role {
		use super::*;

		#[test]
		fn parses_known_roles() {
			assert_eq!("staff".parse::<Role>().unwrap(), Role::Staff);
			assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
			assert_eq!("superadmin".parse::<Role>().unwrap(), Role::Superadmin);
		}

		#[test]
		fn rejects_unknown_role() {
			let err = "doctor".parse::<Role>().unwrap_err();
			assert_eq!(err, RoleParseError("doctor".to_string()));
		}

		#[test]
		fn rejects_wrong_case() {
			assert!("Admin".parse::<Role>().is_err());
			assert!("SUPERADMIN".parse::<Role>().is_err());
		}

		#[test]
		fn display_roundtrips_through_parse() {
			for role in Role::all() {
				let parsed: Role = role.to_string().parse().unwrap();
				assert_eq!(parsed, *role);
			}
		}

		#[test]
		fn serializes_snake_case() {
			assert_eq!(
				serde_json::to_string(&Role::Superadmin).unwrap(),
				"\"superadmin\""
			);
			assert_eq!(serde_json::to_string(&Role::Staff).unwrap(), "\"staff\"");
		}

		#[test]
		fn permission_hierarchy() {
			assert!(Role::Superadmin.has_permission_of(&Role::Admin));
			assert!(Role::Superadmin.has_permission_of(&Role::Staff));
			assert!(Role::Admin.has_permission_of(&Role::Staff));
			assert!(!Role::Admin.has_permission_of(&Role::Superadmin));
			assert!(!Role::Staff.has_permission_of(&Role::Admin));
			assert!(Role::Staff.has_permission_of(&Role::Staff));
		}

		proptest! {
			#[test]
			fn serde_roundtrip_every_role(
				idx in 0usize..3
			) {
				let role = Role::all()[idx];
				let json = serde_json::to_string(&role).unwrap();
				let back: Role = serde_json::from_str(&json).unwrap();
				prop_assert_eq!(back, role);
			}

			#[test]
			fn arbitrary_strings_do_not_parse(
				s in "[A-Za-z0-9_]{1,16}"
			) {
				prop_assume!(s != "staff" && s != "admin" && s != "superadmin");
				prop_assert!(s.parse::<Role>().is_err());
			}
		}
	}
}
