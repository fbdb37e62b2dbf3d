// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! User provisioning for Ward.
//!
//! [`ProvisioningService`] implements the privileged account workflow: the
//! two-step create (identity account, then profile document), the inverse
//! delete (profile first, then account), and profile updates, all behind
//! the caller-authentication and authorization gates.
//!
//! The two backing stores are independently consistent but share no
//! transaction. Every precondition is checked before the first mutation;
//! a failure *between* the two mutations is surfaced as
//! [`ProvisioningError::Internal`] and left for the reconciliation pass,
//! never rolled back here.

pub mod error;
pub mod request;
pub mod service;

pub use error::ProvisioningError;
pub use request::{ProvisionRequest, ProvisionedUser, UpdateRequest};
pub use service::ProvisioningService;
