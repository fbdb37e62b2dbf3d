// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Bearer-token authentication middleware.
//!
//! Extracts the `Authorization: Bearer` credential, verifies it against
//! the identity provider, and attaches a [`CallerContext`] to the request.
//! A missing or rejected credential yields an unauthenticated context and
//! the handlers decide whether that is acceptable; an unreachable identity
//! provider fails the request outright.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;
use ward_server_auth::{extract_bearer_token, VerifiedCaller};
use ward_server_directory::DirectoryError;

use crate::api::AppState;
use crate::error::ServerError;

/// The caller established for this request, if any.
#[derive(Debug, Clone, Default)]
pub struct CallerContext(pub Option<VerifiedCaller>);

impl CallerContext {
	pub fn caller(&self) -> Option<&VerifiedCaller> {
		self.0.as_ref()
	}
}

pub async fn authenticate(
	State(state): State<AppState>,
	mut request: Request,
	next: Next,
) -> Result<Response, ServerError> {
	let context = match extract_bearer_token(request.headers()) {
		None => CallerContext(None),
		Some(token) => match state.identity.verify_token(&token).await {
			Ok(caller) => CallerContext(Some(caller)),
			Err(DirectoryError::InvalidToken(reason)) => {
				debug!(%reason, "bearer credential rejected");
				CallerContext(None)
			}
			Err(e) => return Err(ServerError::Directory(e)),
		},
	};

	request.extensions_mut().insert(context);
	Ok(next.run(request).await)
}
