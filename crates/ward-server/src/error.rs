// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use ward_server_directory::DirectoryError;
use ward_server_provisioning::ProvisioningError;

/// Wire shape for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
	/// Machine-readable kind (`unauthenticated`, `invalid_argument`, ...).
	pub error: String,
	/// Human-readable message for the operator.
	pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error(transparent)]
	Provisioning(#[from] ProvisioningError),

	#[error(transparent)]
	Directory(#[from] DirectoryError),
}

impl ServerError {
	fn status_and_kind(&self) -> (StatusCode, &'static str) {
		match self {
			ServerError::Provisioning(e) => {
				let status = match e {
					ProvisioningError::Unauthenticated => StatusCode::UNAUTHORIZED,
					ProvisioningError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
					ProvisioningError::Denied(_) => StatusCode::FORBIDDEN,
					ProvisioningError::NotFound(_) => StatusCode::NOT_FOUND,
					ProvisioningError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
				};
				(status, e.kind())
			}
			ServerError::Directory(DirectoryError::InvalidToken(_)) => {
				(StatusCode::UNAUTHORIZED, "unauthenticated")
			}
			ServerError::Directory(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, kind) = self.status_and_kind();
		let message = self.to_string();

		if status.is_server_error() {
			tracing::error!(kind, %message, "request failed");
		}

		let body = ErrorBody {
			error: kind.to_string(),
			message,
		};
		(status, Json(body)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ward_server_auth::DenyReason;

	fn status_of(err: ServerError) -> StatusCode {
		err.status_and_kind().0
	}

	#[test]
	fn provisioning_errors_map_to_expected_statuses() {
		assert_eq!(
			status_of(ProvisioningError::Unauthenticated.into()),
			StatusCode::UNAUTHORIZED
		);
		assert_eq!(
			status_of(ProvisioningError::InvalidArgument("email").into()),
			StatusCode::BAD_REQUEST
		);
		assert_eq!(
			status_of(ProvisioningError::Denied(DenyReason::InsufficientPrivilege).into()),
			StatusCode::FORBIDDEN
		);
		assert_eq!(
			status_of(ProvisioningError::Denied(DenyReason::RoleNotFound).into()),
			StatusCode::FORBIDDEN
		);
		assert_eq!(
			status_of(ProvisioningError::NotFound("u".to_string()).into()),
			StatusCode::NOT_FOUND
		);
	}

	#[test]
	fn invalid_token_maps_to_unauthorized() {
		assert_eq!(
			status_of(DirectoryError::InvalidToken("expired".to_string()).into()),
			StatusCode::UNAUTHORIZED
		);
	}

	#[test]
	fn other_directory_errors_are_internal() {
		assert_eq!(
			status_of(
				DirectoryError::Provider {
					code: 503,
					message: "unavailable".to_string()
				}
				.into()
			),
			StatusCode::INTERNAL_SERVER_ERROR
		);
	}
}
