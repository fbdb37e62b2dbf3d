// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::context::JobContext;
use crate::error::JobError;
use crate::types::JobOutput;

/// A background task the scheduler can run.
#[async_trait]
pub trait Job: Send + Sync {
	/// Stable identifier, used for logging and registration.
	fn id(&self) -> &str;

	/// Human-readable name.
	fn name(&self) -> &str;

	/// One-line description of what the job does.
	fn description(&self) -> &str;

	/// Execute one run. Implementations should poll
	/// `ctx.cancellation_token` at convenient points.
	async fn run(&self, ctx: &JobContext) -> Result<JobOutput, JobError>;
}
