// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Authorization policy for account provisioning.
//!
//! This module contains the core [`decide`] function that evaluates who may
//! create accounts with which role. Rules, in priority order:
//!
//! 1. **Bootstrap identity**: the configured bootstrap email acts with
//!    superadmin authority regardless of stored role (it may not even have
//!    a profile document yet)
//! 2. **Superadmin**: may create admin or staff accounts
//! 3. **Admin**: may create staff accounts only
//! 4. **Staff / no role**: may create nobody
//!
//! All policy decisions are pure functions with no side effects, making
//! them easy to test and reason about. No variant of the decision grants
//! creation of superadmin accounts; those are seeded out of band.

use crate::types::{Role, Uid};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Attributes describing the caller requesting a provisioning operation.
///
/// All attributes are resolved before evaluation; the policy itself never
/// touches a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerAttrs {
	/// The caller's verified identity.
	pub uid: Uid,
	/// The email the caller's credential was issued for.
	pub email: String,
	/// The caller's stored role, or `None` when no profile document exists.
	pub role: Option<Role>,
}

impl CallerAttrs {
	/// Creates caller attributes with no stored role.
	pub fn new(uid: impl Into<Uid>, email: impl Into<String>) -> Self {
		Self {
			uid: uid.into(),
			email: email.into(),
			role: None,
		}
	}

	/// Builder: set the stored role.
	pub fn with_role(mut self, role: Role) -> Self {
		self.role = Some(role);
		self
	}
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
	/// The operation may proceed; carries the normalized target role.
	Allow(Role),
	/// The operation is denied.
	Deny(DenyReason),
}

impl Decision {
	/// Returns true if this decision allows the operation.
	pub fn is_allowed(&self) -> bool {
		matches!(self, Decision::Allow(_))
	}
}

/// Machine-readable reason for a policy denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
	/// The caller's role does not permit managing the requested role.
	InsufficientPrivilege,
	/// The caller may provision, but not an account of the requested role.
	InvalidTargetRole,
	/// The caller has no resolvable role and is not the bootstrap identity.
	RoleNotFound,
}

impl std::fmt::Display for DenyReason {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DenyReason::InsufficientPrivilege => write!(f, "insufficient_privilege"),
			DenyReason::InvalidTargetRole => write!(f, "invalid_target_role"),
			DenyReason::RoleNotFound => write!(f, "role_not_found"),
		}
	}
}

/// Evaluates whether `caller` may provision an account with role `target`.
///
/// `bootstrap_email` is the configured bootstrap identity; a caller with
/// that email bypasses the role lookup entirely. Deterministic and
/// side-effect-free.
#[instrument(
	level = "debug",
	skip(caller),
	fields(caller_uid = %caller.uid, caller_role = ?caller.role, target = %target)
)]
pub fn decide(caller: &CallerAttrs, target: Role, bootstrap_email: &str) -> Decision {
	if !bootstrap_email.is_empty() && caller.email == bootstrap_email {
		return grantable_by_superadmin(target);
	}

	match caller.role {
		Some(Role::Superadmin) => grantable_by_superadmin(target),
		Some(Role::Admin) => match target {
			Role::Staff => Decision::Allow(Role::Staff),
			Role::Admin | Role::Superadmin => Decision::Deny(DenyReason::InsufficientPrivilege),
		},
		Some(Role::Staff) => Decision::Deny(DenyReason::InsufficientPrivilege),
		None => Decision::Deny(DenyReason::RoleNotFound),
	}
}

/// Targets a superadmin-privileged caller may create. Superadmin accounts
/// are never minted through provisioning, bootstrap included.
fn grantable_by_superadmin(target: Role) -> Decision {
	match target {
		Role::Admin | Role::Staff => Decision::Allow(target),
		Role::Superadmin => Decision::Deny(DenyReason::InvalidTargetRole),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const BOOTSTRAP: &str = "founder@clinic.test";

	fn caller_with_role(role: Role) -> CallerAttrs {
		CallerAttrs::new("caller-uid", "someone@clinic.test").with_role(role)
	}

	mod superadmin_callers {
		use super::*;

		#[test]
		fn may_create_admin_and_staff() {
			let caller = caller_with_role(Role::Superadmin);
			assert_eq!(
				decide(&caller, Role::Admin, BOOTSTRAP),
				Decision::Allow(Role::Admin)
			);
			assert_eq!(
				decide(&caller, Role::Staff, BOOTSTRAP),
				Decision::Allow(Role::Staff)
			);
		}

		#[test]
		fn may_not_create_superadmin() {
			let caller = caller_with_role(Role::Superadmin);
			assert_eq!(
				decide(&caller, Role::Superadmin, BOOTSTRAP),
				Decision::Deny(DenyReason::InvalidTargetRole)
			);
		}
	}

	mod admin_callers {
		use super::*;

		#[test]
		fn may_create_staff_only() {
			let caller = caller_with_role(Role::Admin);
			assert_eq!(
				decide(&caller, Role::Staff, BOOTSTRAP),
				Decision::Allow(Role::Staff)
			);
		}

		#[test]
		fn may_not_create_admin() {
			let caller = caller_with_role(Role::Admin);
			assert_eq!(
				decide(&caller, Role::Admin, BOOTSTRAP),
				Decision::Deny(DenyReason::InsufficientPrivilege)
			);
		}

		#[test]
		fn may_not_create_superadmin() {
			let caller = caller_with_role(Role::Admin);
			assert_eq!(
				decide(&caller, Role::Superadmin, BOOTSTRAP),
				Decision::Deny(DenyReason::InsufficientPrivilege)
			);
		}
	}

	mod unprivileged_callers {
		use super::*;

		#[test]
		fn staff_is_denied_every_target() {
			let caller = caller_with_role(Role::Staff);
			for target in Role::all() {
				assert_eq!(
					decide(&caller, *target, BOOTSTRAP),
					Decision::Deny(DenyReason::InsufficientPrivilege)
				);
			}
		}

		#[test]
		fn missing_role_is_role_not_found() {
			let caller = CallerAttrs::new("caller-uid", "someone@clinic.test");
			for target in Role::all() {
				assert_eq!(
					decide(&caller, *target, BOOTSTRAP),
					Decision::Deny(DenyReason::RoleNotFound)
				);
			}
		}
	}

	mod bootstrap_identity {
		use super::*;

		#[test]
		fn allowed_without_any_profile_document() {
			let caller = CallerAttrs::new("boot-uid", BOOTSTRAP);
			assert_eq!(
				decide(&caller, Role::Admin, BOOTSTRAP),
				Decision::Allow(Role::Admin)
			);
			assert_eq!(
				decide(&caller, Role::Staff, BOOTSTRAP),
				Decision::Allow(Role::Staff)
			);
		}

		#[test]
		fn stored_role_is_irrelevant() {
			let caller = CallerAttrs::new("boot-uid", BOOTSTRAP).with_role(Role::Staff);
			assert_eq!(
				decide(&caller, Role::Admin, BOOTSTRAP),
				Decision::Allow(Role::Admin)
			);
		}

		#[test]
		fn may_not_create_superadmin() {
			let caller = CallerAttrs::new("boot-uid", BOOTSTRAP);
			assert_eq!(
				decide(&caller, Role::Superadmin, BOOTSTRAP),
				Decision::Deny(DenyReason::InvalidTargetRole)
			);
		}

		#[test]
		fn empty_bootstrap_config_grants_nobody() {
			// A caller with an empty email must not match an unset
			// bootstrap identity.
			let caller = CallerAttrs::new("uid", "");
			assert_eq!(
				decide(&caller, Role::Staff, ""),
				Decision::Deny(DenyReason::RoleNotFound)
			);
		}

		#[test]
		fn comparison_is_exact() {
			let caller = CallerAttrs::new("uid", "Founder@clinic.test");
			assert_eq!(
				decide(&caller, Role::Staff, BOOTSTRAP),
				Decision::Deny(DenyReason::RoleNotFound)
			);
		}
	}

	mod property_tests {
		use super::*;
		use proptest::prelude::*;

		fn arb_role() -> impl Strategy<Value = Role> {
			prop_oneof![Just(Role::Staff), Just(Role::Admin), Just(Role::Superadmin)]
		}

		fn arb_opt_role() -> impl Strategy<Value = Option<Role>> {
			prop_oneof![Just(None), arb_role().prop_map(Some)]
		}

		proptest! {
			#[test]
			fn nobody_ever_creates_superadmin(
				role in arb_opt_role(),
				email in "[a-z]{1,10}@[a-z]{1,10}\\.test",
				is_bootstrap in any::<bool>(),
			) {
				let bootstrap = if is_bootstrap { email.clone() } else { BOOTSTRAP.to_string() };
				let mut caller = CallerAttrs::new("uid", email);
				caller.role = role;
				prop_assert!(!decide(&caller, Role::Superadmin, &bootstrap).is_allowed());
			}

			#[test]
			fn bootstrap_always_creates_admin_and_staff(
				role in arb_opt_role(),
				email in "[a-z]{1,10}@[a-z]{1,10}\\.test",
			) {
				let mut caller = CallerAttrs::new("uid", email.clone());
				caller.role = role;
				prop_assert_eq!(decide(&caller, Role::Admin, &email), Decision::Allow(Role::Admin));
				prop_assert_eq!(decide(&caller, Role::Staff, &email), Decision::Allow(Role::Staff));
			}

			#[test]
			fn allowed_target_is_echoed_unchanged(
				target in arb_role(),
			) {
				let caller = caller_with_role(Role::Superadmin);
				if let Decision::Allow(granted) = decide(&caller, target, BOOTSTRAP) {
					prop_assert_eq!(granted, target);
				}
			}

			#[test]
			fn decision_is_deterministic(
				role in arb_opt_role(),
				target in arb_role(),
			) {
				let mut caller = CallerAttrs::new("uid", "x@y.test");
				caller.role = role;
				let first = decide(&caller, target, BOOTSTRAP);
				let second = decide(&caller, target, BOOTSTRAP);
				prop_assert_eq!(first, second);
			}

			#[test]
			fn non_bootstrap_callers_below_admin_create_nobody(
				target in arb_role(),
				has_staff_role in any::<bool>(),
			) {
				let mut caller = CallerAttrs::new("uid", "x@y.test");
				caller.role = has_staff_role.then_some(Role::Staff);
				prop_assert!(!decide(&caller, target, BOOTSTRAP).is_allowed());
			}
		}
	}
}
