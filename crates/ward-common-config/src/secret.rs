// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! A wrapper type for sensitive values.
//!
//! [`Secret<T>`] keeps API keys and tokens out of logs: both `Debug` and
//! `Display` print [`REDACTED`] instead of the wrapped value. Access to the
//! inner value is explicit via [`Secret::expose`].

/// Placeholder printed in place of a secret value.
pub const REDACTED: &str = "[REDACTED]";

/// A value that must not appear in logs or error messages.
///
/// Serde support is feature-gated and deliberately one-way: secrets can be
/// deserialized from configuration but never serialized back out.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret<T>(T);

/// Convenience alias for the common case.
pub type SecretString = Secret<String>;

impl<T> Secret<T> {
	/// Wrap a sensitive value.
	pub fn new(value: T) -> Self {
		Self(value)
	}

	/// Access the wrapped value.
	///
	/// Call sites are the audit trail for secret usage; keep them few.
	pub fn expose(&self) -> &T {
		&self.0
	}

	/// Consume the wrapper and return the inner value.
	pub fn into_inner(self) -> T {
		self.0
	}
}

impl SecretString {
	/// Returns true if the wrapped string is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<T> std::fmt::Debug for Secret<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> std::fmt::Display for Secret<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> From<T> for Secret<T> {
	fn from(value: T) -> Self {
		Self(value)
	}
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Secret<T> {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		T::deserialize(deserializer).map(Secret)
	}
}
