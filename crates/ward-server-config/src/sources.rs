// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML file, environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::debug;

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	AuthConfigLayer, DirectoryConfigLayer, HttpConfigLayer, JobsConfigLayer, LoggingConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/ward/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: WARD_SERVER_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ServerConfigLayer {
			http: Some(load_http_from_env()?),
			directory: Some(load_directory_from_env()),
			auth: Some(load_auth_from_env()?),
			jobs: Some(load_jobs_from_env()?),
			logging: Some(load_logging_from_env()),
		})
	}
}

fn env_string(var: &str) -> Option<String> {
	std::env::var(var).ok().filter(|v| !v.is_empty())
}

fn env_parse<T: FromStr>(var: &str) -> Result<Option<T>, ConfigError>
where
	T::Err: std::fmt::Display,
{
	match env_string(var) {
		None => Ok(None),
		Some(raw) => raw.parse().map(Some).map_err(|e| ConfigError::InvalidEnv {
			var: var.to_string(),
			message: format!("{e}"),
		}),
	}
}

fn env_bool(var: &str) -> Result<Option<bool>, ConfigError> {
	match env_string(var) {
		None => Ok(None),
		Some(raw) => match raw.to_lowercase().as_str() {
			"1" | "true" | "yes" => Ok(Some(true)),
			"0" | "false" | "no" => Ok(Some(false)),
			other => Err(ConfigError::InvalidEnv {
				var: var.to_string(),
				message: format!("expected a boolean, got {other:?}"),
			}),
		},
	}
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_string("WARD_SERVER_HTTP_HOST"),
		port: env_parse("WARD_SERVER_HTTP_PORT")?,
		base_url: env_string("WARD_SERVER_HTTP_BASE_URL"),
	})
}

fn load_directory_from_env() -> DirectoryConfigLayer {
	DirectoryConfigLayer {
		identity_endpoint: env_string("WARD_SERVER_DIRECTORY_IDENTITY_ENDPOINT"),
		profile_endpoint: env_string("WARD_SERVER_DIRECTORY_PROFILE_ENDPOINT"),
		project_id: env_string("WARD_SERVER_DIRECTORY_PROJECT_ID"),
	}
}

fn load_auth_from_env() -> Result<AuthConfigLayer, ConfigError> {
	Ok(AuthConfigLayer {
		bootstrap_email: env_string("WARD_SERVER_AUTH_BOOTSTRAP_EMAIL"),
		dev_mode: env_bool("WARD_SERVER_AUTH_DEV_MODE")?,
		environment: env_string("WARD_SERVER_ENV"),
	})
}

fn load_jobs_from_env() -> Result<JobsConfigLayer, ConfigError> {
	Ok(JobsConfigLayer {
		reconcile_enabled: env_bool("WARD_SERVER_JOBS_RECONCILE_ENABLED")?,
		reconcile_interval_secs: env_parse("WARD_SERVER_JOBS_RECONCILE_INTERVAL_SECS")?,
	})
}

fn load_logging_from_env() -> LoggingConfigLayer {
	LoggingConfigLayer {
		level: env_string("WARD_SERVER_LOG_LEVEL"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn precedence_orders_env_last() {
		assert!(Precedence::Environment > Precedence::ConfigFile);
		assert!(Precedence::ConfigFile > Precedence::Defaults);
	}

	#[test]
	fn missing_toml_file_is_an_empty_layer() {
		let layer = TomlSource::new("/nonexistent/ward/server.toml")
			.load()
			.unwrap();
		assert!(layer.http.is_none());
		assert!(layer.auth.is_none());
	}

	#[test]
	fn toml_file_parses_sections() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			r#"
[http]
port = 9000

[auth]
bootstrap_email = "founder@clinic.test"

[jobs]
reconcile_interval_secs = 120
"#
		)
		.unwrap();

		let layer = TomlSource::new(file.path()).load().unwrap();
		assert_eq!(layer.http.unwrap().port, Some(9000));
		assert_eq!(
			layer.auth.unwrap().bootstrap_email.as_deref(),
			Some("founder@clinic.test")
		);
		assert_eq!(layer.jobs.unwrap().reconcile_interval_secs, Some(120));
	}

	#[test]
	fn malformed_toml_is_a_parse_error() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[http\nport = ").unwrap();

		let err = TomlSource::new(file.path()).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}
}
