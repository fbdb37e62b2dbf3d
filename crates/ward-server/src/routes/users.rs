// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! User provisioning HTTP handlers.
//!
//! These are the RPC-style entry points the dashboard calls: `createUser`
//! is `POST /api/users`, `deleteUser` is `DELETE /api/users/{uid}`. The
//! caller's bearer credential has already been verified (or not) by the
//! authentication middleware; every authorization decision happens in the
//! provisioning service.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;
use tracing::info;
use ward_server_auth::{Uid, UserProfile};
use ward_server_provisioning::{ProvisionRequest, ProvisionedUser, UpdateRequest};

use crate::api::AppState;
use crate::auth_middleware::CallerContext;
use crate::error::ServerError;

#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
	pub users: Vec<UserProfile>,
}

#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
	pub uid: Uid,
	pub deleted: bool,
}

/// POST /api/users - create an identity account plus profile document.
pub async fn create_user(
	State(state): State<AppState>,
	Extension(ctx): Extension<CallerContext>,
	Json(payload): Json<ProvisionRequest>,
) -> Result<(StatusCode, Json<ProvisionedUser>), ServerError> {
	let created = state.service.provision(ctx.caller(), payload).await?;

	info!(uid = %created.uid, role = %created.profile.role, "user provisioned via API");
	Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/users - roster listing filtered by the caller's authority.
pub async fn list_users(
	State(state): State<AppState>,
	Extension(ctx): Extension<CallerContext>,
) -> Result<Json<ListUsersResponse>, ServerError> {
	let users = state.service.roster(ctx.caller()).await?;
	Ok(Json(ListUsersResponse { users }))
}

/// PUT /api/users/{uid} - rewrite a principal's profile document.
pub async fn update_user(
	State(state): State<AppState>,
	Extension(ctx): Extension<CallerContext>,
	Path(uid): Path<String>,
	Json(changes): Json<UpdateRequest>,
) -> Result<Json<UserProfile>, ServerError> {
	let uid = Uid::new(uid);
	let profile = state.service.update(ctx.caller(), &uid, changes).await?;
	Ok(Json(profile))
}

/// DELETE /api/users/{uid} - remove a principal from both stores.
pub async fn delete_user(
	State(state): State<AppState>,
	Extension(ctx): Extension<CallerContext>,
	Path(uid): Path<String>,
) -> Result<Json<DeleteUserResponse>, ServerError> {
	let uid = Uid::new(uid);
	state.service.deprovision(ctx.caller(), &uid).await?;

	info!(uid = %uid, "user deprovisioned via API");
	Ok(Json(DeleteUserResponse { uid, deleted: true }))
}
