// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

/// Errors surfaced by the directory stores.
///
/// "Document absent" is NOT an error; lookups return `Option` for that.
/// These variants cover transport trouble and provider-reported failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
	#[error("transport error: {0}")]
	Transport(#[from] reqwest::Error),

	#[error("bearer credential rejected: {0}")]
	InvalidToken(String),

	#[error("not found: {0}")]
	NotFound(String),

	#[error("conflict: {0}")]
	Conflict(String),

	#[error("provider error {code}: {message}")]
	Provider { code: u16, message: String },

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("malformed document: {0}")]
	Decode(String),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
