// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Secret loading from the environment.
//!
//! Secrets follow the `NAME` / `NAME_FILE` convention: the value may be
//! supplied inline in `NAME`, or `NAME_FILE` may point at a file whose
//! trimmed contents are the secret (the usual shape under systemd
//! credentials or Kubernetes mounted secrets). Setting both is a
//! configuration error.

use crate::secret::SecretString;

/// Errors loading a secret from the environment.
#[derive(Debug, thiserror::Error)]
pub enum SecretEnvError {
	#[error("both {var} and {var}_FILE are set; use one")]
	Ambiguous { var: String },

	#[error("failed to read {path} (from {var}_FILE): {source}")]
	FileRead {
		var: String,
		path: String,
		source: std::io::Error,
	},

	#[error("{var} contains invalid UTF-8")]
	InvalidUtf8 { var: String },
}

/// Error for secrets that must be present.
#[derive(Debug, thiserror::Error)]
pub enum RequiredSecretError {
	#[error("required secret {var} is not set (set {var} or {var}_FILE)")]
	Missing { var: String },

	#[error(transparent)]
	Env(#[from] SecretEnvError),
}

/// Load an optional secret from `var` or `var_FILE`.
///
/// Returns `Ok(None)` when neither variable is set. Whitespace around a
/// file-sourced value is trimmed; inline values are taken verbatim.
///
/// # Errors
///
/// Returns an error if both variables are set, the file cannot be read,
/// or the value is not valid UTF-8.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");
	let inline = read_env(var)?;
	let path = read_env(&file_var)?;

	match (inline, path) {
		(Some(_), Some(_)) => Err(SecretEnvError::Ambiguous {
			var: var.to_string(),
		}),
		(Some(value), None) => Ok(Some(SecretString::new(value))),
		(None, Some(path)) => {
			let contents =
				std::fs::read_to_string(&path).map_err(|source| SecretEnvError::FileRead {
					var: var.to_string(),
					path,
					source,
				})?;
			Ok(Some(SecretString::new(contents.trim().to_string())))
		}
		(None, None) => Ok(None),
	}
}

/// Load a secret that must be present.
///
/// # Errors
///
/// Returns [`RequiredSecretError::Missing`] when neither `var` nor
/// `var_FILE` is set, and propagates [`SecretEnvError`] otherwise.
pub fn require_secret_env(var: &str) -> Result<SecretString, RequiredSecretError> {
	load_secret_env(var)?.ok_or_else(|| RequiredSecretError::Missing {
		var: var.to_string(),
	})
}

fn read_env(var: &str) -> Result<Option<String>, SecretEnvError> {
	match std::env::var(var) {
		Ok(value) if value.is_empty() => Ok(None),
		Ok(value) => Ok(Some(value)),
		Err(std::env::VarError::NotPresent) => Ok(None),
		Err(std::env::VarError::NotUnicode(_)) => Err(SecretEnvError::InvalidUtf8 {
			var: var.to_string(),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use std::sync::Mutex;

	// Environment variables are process-global; serialize the tests that
	// mutate them.
	static ENV_MUTEX: Mutex<()> = Mutex::new(());

	fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
	where
		F: FnOnce() -> R,
	{
		let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
		let original: Vec<_> = vars
			.iter()
			.map(|(k, _)| (*k, std::env::var(*k).ok()))
			.collect();

		for (k, v) in vars {
			match v {
				Some(v) => std::env::set_var(k, v),
				None => std::env::remove_var(k),
			}
		}

		let result = f();

		for (k, original_val) in &original {
			match original_val {
				Some(v) => std::env::set_var(k, v),
				None => std::env::remove_var(k),
			}
		}

		result
	}

	#[test]
	fn missing_returns_none() {
		let result = with_env_vars(
			&[("WARD_TEST_ABSENT", None), ("WARD_TEST_ABSENT_FILE", None)],
			|| load_secret_env("WARD_TEST_ABSENT"),
		);
		assert!(result.unwrap().is_none());
	}

	#[test]
	fn inline_value_is_loaded() {
		let result = with_env_vars(
			&[
				("WARD_TEST_INLINE", Some("s3cret")),
				("WARD_TEST_INLINE_FILE", None),
			],
			|| load_secret_env("WARD_TEST_INLINE"),
		);
		assert_eq!(result.unwrap().unwrap().expose(), "s3cret");
	}

	#[test]
	fn empty_value_counts_as_unset() {
		let result = with_env_vars(
			&[
				("WARD_TEST_EMPTY", Some("")),
				("WARD_TEST_EMPTY_FILE", None),
			],
			|| load_secret_env("WARD_TEST_EMPTY"),
		);
		assert!(result.unwrap().is_none());
	}

	#[test]
	fn file_value_is_loaded_and_trimmed() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "  file-secret  ").unwrap();
		let path = file.path().to_str().unwrap().to_string();

		let result = with_env_vars(
			&[
				("WARD_TEST_FROMFILE", None),
				("WARD_TEST_FROMFILE_FILE", Some(&path)),
			],
			|| load_secret_env("WARD_TEST_FROMFILE"),
		);
		assert_eq!(result.unwrap().unwrap().expose(), "file-secret");
	}

	#[test]
	fn both_set_is_an_error() {
		let result = with_env_vars(
			&[
				("WARD_TEST_BOTH", Some("a")),
				("WARD_TEST_BOTH_FILE", Some("/nonexistent")),
			],
			|| load_secret_env("WARD_TEST_BOTH"),
		);
		assert!(matches!(result, Err(SecretEnvError::Ambiguous { .. })));
	}

	#[test]
	fn unreadable_file_is_an_error() {
		let result = with_env_vars(
			&[
				("WARD_TEST_BADFILE", None),
				("WARD_TEST_BADFILE_FILE", Some("/nonexistent/ward-secret")),
			],
			|| load_secret_env("WARD_TEST_BADFILE"),
		);
		assert!(matches!(result, Err(SecretEnvError::FileRead { .. })));
	}

	#[test]
	fn require_reports_missing() {
		let result = with_env_vars(
			&[
				("WARD_TEST_REQUIRED", None),
				("WARD_TEST_REQUIRED_FILE", None),
			],
			|| require_secret_env("WARD_TEST_REQUIRED"),
		);
		let err = result.unwrap_err();
		assert!(err.to_string().contains("WARD_TEST_REQUIRED"));
	}
}
