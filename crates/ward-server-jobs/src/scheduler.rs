// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::context::{CancellationToken, JobContext};
use crate::error::JobError;
use crate::job::Job;
use crate::types::{JobType, TriggerSource};

const BASE_RETRY_DELAY_SECS: u64 = 1;
const MAX_RETRY_DELAY_SECS: u64 = 60;
const RETRY_FACTOR: f64 = 2.0;
const MAX_RETRIES: u32 = 3;

struct RegisteredJob {
	job: Arc<dyn Job>,
	job_type: JobType,
	cancellation_token: CancellationToken,
}

/// Runs registered jobs on their schedule until shutdown.
pub struct JobScheduler {
	jobs: HashMap<String, RegisteredJob>,
	shutdown_tx: broadcast::Sender<()>,
	handles: Mutex<Vec<JoinHandle<()>>>,
}

impl JobScheduler {
	pub fn new() -> Self {
		let (shutdown_tx, _) = broadcast::channel(1);
		Self {
			jobs: HashMap::new(),
			shutdown_tx,
			handles: Mutex::new(Vec::new()),
		}
	}

	pub fn register_periodic(&mut self, job: Arc<dyn Job>, interval: Duration) {
		let id = job.id().to_string();
		self.jobs.insert(
			id,
			RegisteredJob {
				job,
				job_type: JobType::Periodic { interval },
				cancellation_token: CancellationToken::new(),
			},
		);
	}

	/// Number of registered jobs.
	pub fn job_count(&self) -> usize {
		self.jobs.len()
	}

	/// Spawn one driver task per registered job.
	#[instrument(skip(self))]
	pub async fn start(&self) {
		let mut handles = self.handles.lock().await;

		for (job_id, registered) in &self.jobs {
			let JobType::Periodic { interval } = &registered.job_type else {
				continue;
			};
			let interval = *interval;
			let job = Arc::clone(&registered.job);
			let token = registered.cancellation_token.clone();
			let mut shutdown_rx = self.shutdown_tx.subscribe();
			let job_id = job_id.clone();

			info!(job_id = %job_id, interval_secs = interval.as_secs(), "starting periodic job");

			handles.push(tokio::spawn(async move {
				let mut ticker = tokio::time::interval(interval);
				// The first tick fires immediately; skip it so jobs run one
				// interval after startup.
				ticker.tick().await;

				loop {
					tokio::select! {
						_ = shutdown_rx.recv() => {
							info!(job_id = %job_id, "scheduler shutdown, stopping job");
							break;
						}
						_ = ticker.tick() => {
							if token.is_cancelled() {
								break;
							}
							run_with_retries(job.as_ref(), &token).await;
						}
					}
				}
			}));
		}
	}

	/// Signal every driver task to stop and wait for them.
	#[instrument(skip(self))]
	pub async fn shutdown(&self) {
		for registered in self.jobs.values() {
			registered.cancellation_token.cancel();
		}
		let _ = self.shutdown_tx.send(());

		let mut handles = self.handles.lock().await;
		for handle in handles.drain(..) {
			if let Err(e) = handle.await {
				warn!(error = %e, "job driver task panicked");
			}
		}
	}
}

impl Default for JobScheduler {
	fn default() -> Self {
		Self::new()
	}
}

async fn run_with_retries(job: &dyn Job, token: &CancellationToken) {
	let mut delay = Duration::from_secs(BASE_RETRY_DELAY_SECS);

	for attempt in 0..=MAX_RETRIES {
		let ctx = JobContext {
			run_id: Uuid::new_v4().to_string(),
			triggered_by: TriggerSource::Scheduler,
			cancellation_token: token.clone(),
		};

		match job.run(&ctx).await {
			Ok(output) => {
				info!(
					job_id = job.id(),
					run_id = %ctx.run_id,
					attempt,
					message = %output.message,
					"job run completed"
				);
				return;
			}
			Err(JobError::Cancelled) => {
				info!(job_id = job.id(), run_id = %ctx.run_id, "job run cancelled");
				return;
			}
			Err(JobError::Failed { message, retryable }) => {
				warn!(
					job_id = job.id(),
					run_id = %ctx.run_id,
					attempt,
					retryable,
					message = %message,
					"job run failed"
				);
				if !retryable || attempt == MAX_RETRIES || token.is_cancelled() {
					return;
				}
				tokio::time::sleep(delay).await;
				let next = delay.as_secs_f64() * RETRY_FACTOR;
				delay = Duration::from_secs_f64(next.min(MAX_RETRY_DELAY_SECS as f64));
			}
		}
	}
}
