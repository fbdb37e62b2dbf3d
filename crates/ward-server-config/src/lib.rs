// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Centralized configuration management for Ward server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`WARD_SERVER_*`)
//!
//! # Usage
//!
//! ```ignore
//! use ward_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}:{}", config.http.host, config.http.port);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub directory: DirectoryConfig,
	pub auth: AuthConfig,
	pub jobs: JobsConfig,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`WARD_SERVER_*`)
/// 2. Config file (`/etc/ward/server.toml`)
/// 3. Built-in defaults
///
/// # Errors
///
/// Returns an error when a source fails to load or validation fails.
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only (for testing or simple deployments).
///
/// # Errors
///
/// Returns an error when the environment is malformed or validation fails.
pub fn load_config_from_env() -> Result<ServerConfig, ConfigError> {
	let mut merged = ServerConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

/// Load configuration with a custom config file path.
///
/// # Errors
///
/// Returns an error when a source fails to load or validation fails.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let auth = layer.auth.unwrap_or_default().finalize();
	let jobs = layer.jobs.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	let api_key = ward_common_config::load_secret_env("WARD_SERVER_DIRECTORY_API_KEY")
		.map_err(|e| ConfigError::Secret(e.to_string()))?;
	let directory = layer.directory.unwrap_or_default().finalize(api_key);

	validate_config(&auth, &directory)?;

	info!(
		host = %http.host,
		port = http.port,
		project_id = %directory.project_id,
		dev_mode = auth.dev_mode,
		bootstrap_configured = !auth.bootstrap_email.is_empty(),
		reconcile_enabled = jobs.reconcile_enabled,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		directory,
		auth,
		jobs,
		logging,
	})
}

/// Validate cross-field configuration rules.
fn validate_config(auth: &AuthConfig, directory: &DirectoryConfig) -> Result<(), ConfigError> {
	if auth.dev_mode && auth.environment == "production" {
		return Err(ConfigError::Validation(
			"WARD_SERVER_AUTH_DEV_MODE=1 is set while WARD_SERVER_ENV=production. \
			 This is a security risk. Remove WARD_SERVER_AUTH_DEV_MODE or set WARD_SERVER_ENV \
			 to a non-production value."
				.to_string(),
		));
	}

	if !auth.dev_mode {
		if directory.project_id.is_empty() {
			return Err(ConfigError::Validation(
				"directory.project_id is required outside dev mode \
				 (set WARD_SERVER_DIRECTORY_PROJECT_ID)"
					.to_string(),
			));
		}
		if directory.api_key.is_none() {
			return Err(ConfigError::Validation(
				"directory API key is required outside dev mode \
				 (set WARD_SERVER_DIRECTORY_API_KEY or WARD_SERVER_DIRECTORY_API_KEY_FILE)"
					.to_string(),
			));
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use ward_common_config::SecretString;

	fn populated_directory() -> DirectoryConfig {
		DirectoryConfig {
			project_id: "clinic-test".to_string(),
			api_key: Some(SecretString::new("k".to_string())),
			..Default::default()
		}
	}

	#[test]
	fn dev_mode_in_production_is_rejected() {
		let auth = AuthConfig {
			dev_mode: true,
			environment: "production".to_string(),
			..Default::default()
		};
		let result = validate_config(&auth, &populated_directory());
		assert!(result.is_err());
		assert!(result.unwrap_err().to_string().contains("security risk"));
	}

	#[test]
	fn dev_mode_in_development_is_ok() {
		let auth = AuthConfig {
			dev_mode: true,
			environment: "development".to_string(),
			..Default::default()
		};
		assert!(validate_config(&auth, &DirectoryConfig::default()).is_ok());
	}

	#[test]
	fn missing_project_id_is_rejected_outside_dev_mode() {
		let auth = AuthConfig::default();
		let directory = DirectoryConfig {
			api_key: Some(SecretString::new("k".to_string())),
			..Default::default()
		};
		let err = validate_config(&auth, &directory).unwrap_err();
		assert!(err.to_string().contains("project_id"));
	}

	#[test]
	fn missing_api_key_is_rejected_outside_dev_mode() {
		let auth = AuthConfig::default();
		let directory = DirectoryConfig {
			project_id: "clinic-test".to_string(),
			..Default::default()
		};
		let err = validate_config(&auth, &directory).unwrap_err();
		assert!(err.to_string().contains("API key"));
	}

	#[test]
	fn dev_mode_needs_no_backend_settings() {
		let auth = AuthConfig {
			dev_mode: true,
			..Default::default()
		};
		assert!(validate_config(&auth, &DirectoryConfig::default()).is_ok());
	}

	#[test]
	fn socket_addr_joins_host_and_port() {
		let config = ServerConfig {
			http: HttpConfig {
				host: "127.0.0.1".to_string(),
				port: 9000,
				base_url: "http://localhost:9000".to_string(),
			},
			..Default::default()
		};
		assert_eq!(config.socket_addr(), "127.0.0.1:9000");
	}
}
