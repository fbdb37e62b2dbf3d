// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The in-memory user roster.
//!
//! Mirrors the behavior of the dashboard's staff table: the list lives in
//! memory, operation results are merged into it rather than triggering a
//! refetch, and a failed fetch degrades to an empty list with a warning
//! instead of taking the view down.

use tracing::warn;
use ward_server_auth::{Role, Uid, UserProfile};

use crate::client::ApiError;

/// In-memory list of principals visible to the operator.
#[derive(Debug, Default)]
pub struct Roster {
	entries: Vec<UserProfile>,
	fetch_failed: bool,
}

impl Roster {
	pub fn new(entries: Vec<UserProfile>) -> Self {
		Self {
			entries,
			fetch_failed: false,
		}
	}

	/// Build a roster from a fetch result. A failure yields an empty
	/// roster and a warning, never an error; the view must keep working.
	pub fn from_fetch(result: Result<Vec<UserProfile>, ApiError>) -> Self {
		match result {
			Ok(entries) => Self::new(entries),
			Err(e) => {
				warn!(error = %e, "roster fetch failed; showing empty list");
				Self {
					entries: Vec::new(),
					fetch_failed: true,
				}
			}
		}
	}

	/// True when this roster is empty because the fetch failed.
	pub fn is_degraded(&self) -> bool {
		self.fetch_failed
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Entries the given viewer may see and manage.
	///
	/// Principals whose role exceeds the viewer's authority are hidden,
	/// and the bootstrap identity's row is hidden from everyone but the
	/// bootstrap operator, since nobody else may edit it.
	pub fn visible_to(
		&self,
		viewer_role: Option<Role>,
		viewer_email: &str,
		bootstrap_email: &str,
	) -> Vec<&UserProfile> {
		let is_bootstrap = !bootstrap_email.is_empty() && viewer_email == bootstrap_email;
		let authority = if is_bootstrap {
			Role::Superadmin
		} else {
			viewer_role.unwrap_or(Role::Staff)
		};

		self.entries
			.iter()
			.filter(|p| authority.has_permission_of(&p.role))
			.filter(|p| is_bootstrap || bootstrap_email.is_empty() || p.email != bootstrap_email)
			.collect()
	}

	/// Merge an operation result into the roster: replaces the entry with
	/// the same identity, or appends a new one.
	pub fn merge(&mut self, profile: UserProfile) {
		match self.entries.iter_mut().find(|p| p.uid == profile.uid) {
			Some(existing) => *existing = profile,
			None => self.entries.push(profile),
		}
	}

	/// Drop a deprovisioned principal.
	pub fn remove(&mut self, uid: &Uid) {
		self.entries.retain(|p| p.uid != *uid);
	}
}
