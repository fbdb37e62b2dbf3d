// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use ward_server_auth::DenyReason;
use ward_server_directory::DirectoryError;

/// Errors that can occur during user provisioning.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
	#[error("caller is not authenticated")]
	Unauthenticated,

	#[error("invalid request: missing or invalid field {0:?}")]
	InvalidArgument(&'static str),

	#[error("permission denied: {0}")]
	Denied(DenyReason),

	#[error("not found: {0}")]
	NotFound(String),

	#[error("backing store operation failed: {0}")]
	Internal(#[source] DirectoryError),
}

impl ProvisioningError {
	/// Machine-readable error kind, stable across message changes.
	pub fn kind(&self) -> &'static str {
		match self {
			ProvisioningError::Unauthenticated => "unauthenticated",
			ProvisioningError::InvalidArgument(_) => "invalid_argument",
			ProvisioningError::Denied(DenyReason::InsufficientPrivilege) => "insufficient_privilege",
			ProvisioningError::Denied(DenyReason::InvalidTargetRole) => "invalid_target_role",
			ProvisioningError::Denied(DenyReason::RoleNotFound) => "role_not_found",
			ProvisioningError::NotFound(_) => "not_found",
			ProvisioningError::Internal(_) => "internal",
		}
	}
}

impl From<DirectoryError> for ProvisioningError {
	fn from(e: DirectoryError) -> Self {
		ProvisioningError::Internal(e)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn kinds_are_stable_identifiers() {
		assert_eq!(ProvisioningError::Unauthenticated.kind(), "unauthenticated");
		assert_eq!(
			ProvisioningError::InvalidArgument("email").kind(),
			"invalid_argument"
		);
		assert_eq!(
			ProvisioningError::Denied(DenyReason::InvalidTargetRole).kind(),
			"invalid_target_role"
		);
		assert_eq!(
			ProvisioningError::NotFound("u".to_string()).kind(),
			"not_found"
		);
	}

	#[test]
	fn directory_errors_become_internal() {
		let err: ProvisioningError =
			DirectoryError::Conflict("email already registered".to_string()).into();
		assert_eq!(err.kind(), "internal");
	}
}
