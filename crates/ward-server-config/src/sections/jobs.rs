// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Background jobs configuration section.

use serde::Deserialize;

const DEFAULT_RECONCILE_INTERVAL_SECS: u64 = 3600;

/// Jobs configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct JobsConfig {
	pub reconcile_enabled: bool,
	pub reconcile_interval_secs: u64,
}

impl Default for JobsConfig {
	fn default() -> Self {
		JobsConfigLayer::default().finalize()
	}
}

/// Jobs configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobsConfigLayer {
	#[serde(default)]
	pub reconcile_enabled: Option<bool>,
	#[serde(default)]
	pub reconcile_interval_secs: Option<u64>,
}

impl JobsConfigLayer {
	pub fn merge(&mut self, other: JobsConfigLayer) {
		if other.reconcile_enabled.is_some() {
			self.reconcile_enabled = other.reconcile_enabled;
		}
		if other.reconcile_interval_secs.is_some() {
			self.reconcile_interval_secs = other.reconcile_interval_secs;
		}
	}

	pub fn finalize(self) -> JobsConfig {
		JobsConfig {
			reconcile_enabled: self.reconcile_enabled.unwrap_or(true),
			reconcile_interval_secs: self
				.reconcile_interval_secs
				.unwrap_or(DEFAULT_RECONCILE_INTERVAL_SECS),
		}
	}
}
