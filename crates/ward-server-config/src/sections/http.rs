// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP listener configuration section.

use serde::Deserialize;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8470;

/// HTTP configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct HttpConfig {
	pub host: String,
	pub port: u16,
	pub base_url: String,
}

impl Default for HttpConfig {
	fn default() -> Self {
		HttpConfigLayer::default().finalize()
	}
}

/// HTTP configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfigLayer {
	#[serde(default)]
	pub host: Option<String>,
	#[serde(default)]
	pub port: Option<u16>,
	#[serde(default)]
	pub base_url: Option<String>,
}

impl HttpConfigLayer {
	pub fn merge(&mut self, other: HttpConfigLayer) {
		if other.host.is_some() {
			self.host = other.host;
		}
		if other.port.is_some() {
			self.port = other.port;
		}
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
	}

	pub fn finalize(self) -> HttpConfig {
		let host = self.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
		let port = self.port.unwrap_or(DEFAULT_PORT);
		let base_url = self
			.base_url
			.unwrap_or_else(|| format!("http://{host}:{port}"));
		HttpConfig {
			host,
			port,
			base_url,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_to_loopback() {
		let config = HttpConfigLayer::default().finalize();
		assert_eq!(config.host, "127.0.0.1");
		assert_eq!(config.port, 8470);
		assert_eq!(config.base_url, "http://127.0.0.1:8470");
	}

	#[test]
	fn base_url_follows_overridden_host_and_port() {
		let layer = HttpConfigLayer {
			host: Some("0.0.0.0".to_string()),
			port: Some(9000),
			base_url: None,
		};
		assert_eq!(layer.finalize().base_url, "http://0.0.0.0:9000");
	}

	#[test]
	fn merge_overwrites_set_fields_only() {
		let mut base = HttpConfigLayer {
			host: Some("a".to_string()),
			port: Some(1),
			base_url: None,
		};
		base.merge(HttpConfigLayer {
			host: None,
			port: Some(2),
			base_url: None,
		});
		assert_eq!(base.host.as_deref(), Some("a"));
		assert_eq!(base.port, Some(2));
	}
}
