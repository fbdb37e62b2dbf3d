// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Health HTTP handler.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
	pub timestamp: String,
	pub version: &'static str,
	pub components: HealthComponents,
}

#[derive(Debug, Serialize)]
pub struct HealthComponents {
	pub directory: &'static str,
}

/// GET /health - liveness plus a note on which directory backs the
/// process. Never requires authentication.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
	let directory = if state.dev_mode {
		"in-memory (dev mode)"
	} else {
		"rest"
	};

	Json(HealthResponse {
		status: "ok",
		timestamp: chrono::Utc::now().to_rfc3339(),
		version: env!("CARGO_PKG_VERSION"),
		components: HealthComponents { directory },
	})
}
