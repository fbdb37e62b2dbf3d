// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum JobError {
	#[error("job cancelled")]
	Cancelled,

	#[error("job failed: {message}")]
	Failed { message: String, retryable: bool },
}

pub type Result<T> = std::result::Result<T, JobError>;
