// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Application state and router assembly.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use ward_server_directory::{IdentityProvider, ProfileStore};
use ward_server_provisioning::ProvisioningService;

use crate::auth_middleware;
use crate::routes;

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ProvisioningService>,
	pub identity: Arc<dyn IdentityProvider>,
	pub profiles: Arc<dyn ProfileStore>,
	/// True when serving against the in-memory directory.
	pub dev_mode: bool,
}

impl AppState {
	pub fn new(
		service: Arc<ProvisioningService>,
		identity: Arc<dyn IdentityProvider>,
		profiles: Arc<dyn ProfileStore>,
		dev_mode: bool,
	) -> Self {
		Self {
			service,
			identity,
			profiles,
			dev_mode,
		}
	}
}

/// Build the full application router.
pub fn create_router(state: AppState) -> Router {
	let api = Router::new()
		.route(
			"/api/users",
			get(routes::users::list_users).post(routes::users::create_user),
		)
		.route(
			"/api/users/{uid}",
			axum::routing::put(routes::users::update_user).delete(routes::users::delete_user),
		)
		.layer(axum::middleware::from_fn_with_state(
			state.clone(),
			auth_middleware::authenticate,
		));

	Router::new()
		.route("/health", get(routes::health::health_check))
		.merge(api)
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.with_state(state)
}
