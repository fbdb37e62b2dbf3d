// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Document-store REST client.
//!
//! Profile documents live in a `users` collection keyed by identity. The
//! wire shape is the document store's typed-value encoding; field names
//! (`firstName`, `createdAt`, ...) are the layout the dashboards have
//! always read and must stay stable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;
use ward_server_auth::{Role, Uid, UserProfile};

use crate::error::{DirectoryError, Result};
use crate::profile::ProfileStore;
use crate::rest::{provider_error, RestDirectoryConfig};

const LIST_PAGE_SIZE: u32 = 300;

/// [`ProfileStore`] backed by the managed document store's REST API.
pub struct RestProfileStore {
	client: reqwest::Client,
	config: RestDirectoryConfig,
}

/// A document in the store's typed-value encoding.
#[derive(Debug, Serialize, Deserialize)]
struct Document {
	#[serde(default, skip_serializing)]
	name: String,
	#[serde(default)]
	fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
	#[serde(default)]
	documents: Vec<Document>,
	#[serde(default)]
	next_page_token: Option<String>,
}

impl RestProfileStore {
	pub fn new(config: RestDirectoryConfig) -> Self {
		Self {
			client: ward_common_http::new_client(),
			config,
		}
	}

	fn collection_url(&self) -> String {
		format!(
			"{}/v1/projects/{}/databases/(default)/documents/users",
			self.config.profile_endpoint, self.config.project_id
		)
	}

	fn document_url(&self, uid: &Uid) -> String {
		format!(
			"{}/{}?key={}",
			self.collection_url(),
			uid.as_str(),
			self.config.api_key.expose()
		)
	}
}

#[async_trait]
impl ProfileStore for RestProfileStore {
	#[instrument(level = "debug", skip(self), fields(uid = %uid))]
	async fn fetch_profile(&self, uid: &Uid) -> Result<Option<UserProfile>> {
		let response = self.client.get(self.document_url(uid)).send().await?;

		if response.status() == reqwest::StatusCode::NOT_FOUND {
			return Ok(None);
		}
		if !response.status().is_success() {
			return Err(provider_error(response).await);
		}

		let document: Document = response.json().await?;
		decode_profile(uid, &document).map(Some)
	}

	#[instrument(level = "debug", skip(self, profile), fields(uid = %profile.uid))]
	async fn put_profile(&self, profile: &UserProfile) -> Result<()> {
		let document = Document {
			name: String::new(),
			fields: encode_profile(profile),
		};

		let response = self
			.client
			.patch(self.document_url(&profile.uid))
			.json(&document)
			.send()
			.await?;

		if !response.status().is_success() {
			return Err(provider_error(response).await);
		}

		Ok(())
	}

	#[instrument(level = "debug", skip(self), fields(uid = %uid))]
	async fn delete_profile(&self, uid: &Uid) -> Result<()> {
		// The store deletes absent documents without complaint; probe first
		// so callers can distinguish "was never there".
		if self.fetch_profile(uid).await?.is_none() {
			return Err(DirectoryError::NotFound(format!("no profile for {uid}")));
		}

		let response = self.client.delete(self.document_url(uid)).send().await?;
		if !response.status().is_success() {
			return Err(provider_error(response).await);
		}

		Ok(())
	}

	#[instrument(level = "debug", skip_all)]
	async fn list_profiles(&self) -> Result<Vec<UserProfile>> {
		let mut profiles = Vec::new();
		let mut page_token: Option<String> = None;

		loop {
			let mut url = format!(
				"{}?key={}&pageSize={}",
				self.collection_url(),
				self.config.api_key.expose(),
				LIST_PAGE_SIZE
			);
			if let Some(token) = &page_token {
				url.push_str("&pageToken=");
				url.push_str(token);
			}

			let response = self.client.get(url).send().await?;
			if !response.status().is_success() {
				return Err(provider_error(response).await);
			}

			let page: ListDocumentsResponse = response.json().await?;
			for document in &page.documents {
				let uid = uid_from_document_name(&document.name)?;
				profiles.push(decode_profile(&uid, document)?);
			}

			match page.next_page_token {
				Some(token) if !token.is_empty() => page_token = Some(token),
				_ => break,
			}
		}

		Ok(profiles)
	}
}

fn string_value(value: &str) -> Value {
	serde_json::json!({ "stringValue": value })
}

fn timestamp_value(value: &DateTime<Utc>) -> Value {
	serde_json::json!({ "timestampValue": value.to_rfc3339() })
}

fn encode_profile(profile: &UserProfile) -> Map<String, Value> {
	let mut fields = Map::new();
	fields.insert("uid".to_string(), string_value(profile.uid.as_str()));
	fields.insert("email".to_string(), string_value(&profile.email));
	fields.insert("firstName".to_string(), string_value(&profile.first_name));
	fields.insert("lastName".to_string(), string_value(&profile.last_name));
	fields.insert("phone".to_string(), string_value(&profile.phone));
	fields.insert("birthdate".to_string(), string_value(&profile.birthdate));
	fields.insert("address".to_string(), string_value(&profile.address));
	fields.insert("role".to_string(), string_value(&profile.role.to_string()));
	fields.insert(
		"createdAt".to_string(),
		timestamp_value(&profile.created_at),
	);
	fields
}

fn decode_profile(uid: &Uid, document: &Document) -> Result<UserProfile> {
	let get_string = |field: &str| -> String {
		document
			.fields
			.get(field)
			.and_then(|v| v.get("stringValue"))
			.and_then(Value::as_str)
			.unwrap_or_default()
			.to_string()
	};

	let role_str = get_string("role");
	let role: Role = role_str
		.parse()
		.map_err(|_| DirectoryError::Decode(format!("profile {uid} has unknown role {role_str:?}")))?;

	let created_at = document
		.fields
		.get("createdAt")
		.and_then(|v| v.get("timestampValue"))
		.and_then(Value::as_str)
		.map(|s| {
			DateTime::parse_from_rfc3339(s)
				.map(|dt| dt.with_timezone(&Utc))
				.map_err(|e| DirectoryError::Decode(format!("profile {uid} createdAt: {e}")))
		})
		.transpose()?
		// Documents written before timestamps were recorded have no
		// createdAt; treat them as epoch rather than failing the decode.
		.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

	Ok(UserProfile {
		uid: uid.clone(),
		email: get_string("email"),
		first_name: get_string("firstName"),
		last_name: get_string("lastName"),
		phone: get_string("phone"),
		birthdate: get_string("birthdate"),
		address: get_string("address"),
		role,
		created_at,
	})
}

fn uid_from_document_name(name: &str) -> Result<Uid> {
	name.rsplit('/')
		.next()
		.filter(|s| !s.is_empty())
		.map(Uid::new)
		.ok_or_else(|| DirectoryError::Decode(format!("document name {name:?} has no id")))
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	fn make_profile() -> UserProfile {
		UserProfile {
			uid: Uid::new("u-7"),
			email: "m.cruz@clinic.test".to_string(),
			first_name: "Maria".to_string(),
			last_name: "Cruz".to_string(),
			phone: "555-0101".to_string(),
			birthdate: "1990-02-14".to_string(),
			address: String::new(),
			role: Role::Staff,
			created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
		}
	}

	#[test]
	fn encode_uses_dashboard_field_names() {
		let fields = encode_profile(&make_profile());
		assert_eq!(fields["firstName"]["stringValue"], "Maria");
		assert_eq!(fields["lastName"]["stringValue"], "Cruz");
		assert_eq!(fields["role"]["stringValue"], "staff");
		assert!(fields["createdAt"]["timestampValue"]
			.as_str()
			.unwrap()
			.starts_with("2025-06-01T12:00:00"));
	}

	#[test]
	fn decode_roundtrips_encode() {
		let profile = make_profile();
		let document = Document {
			name: "projects/p/databases/(default)/documents/users/u-7".to_string(),
			fields: encode_profile(&profile),
		};
		let decoded = decode_profile(&profile.uid, &document).unwrap();
		assert_eq!(decoded, profile);
	}

	#[test]
	fn decode_defaults_missing_optional_fields_to_empty() {
		let mut fields = Map::new();
		fields.insert("email".to_string(), string_value("a@x.test"));
		fields.insert("role".to_string(), string_value("admin"));
		let document = Document {
			name: String::new(),
			fields,
		};

		let decoded = decode_profile(&Uid::new("u-1"), &document).unwrap();
		assert_eq!(decoded.first_name, "");
		assert_eq!(decoded.address, "");
		assert_eq!(decoded.role, Role::Admin);
	}

	#[test]
	fn decode_rejects_unknown_role() {
		let mut fields = Map::new();
		fields.insert("email".to_string(), string_value("a@x.test"));
		fields.insert("role".to_string(), string_value("owner"));
		let document = Document {
			name: String::new(),
			fields,
		};

		let err = decode_profile(&Uid::new("u-1"), &document).unwrap_err();
		assert!(matches!(err, DirectoryError::Decode(_)));
	}

	#[test]
	fn uid_parses_from_document_name() {
		let uid =
			uid_from_document_name("projects/p/databases/(default)/documents/users/abc123").unwrap();
		assert_eq!(uid.as_str(), "abc123");
	}

	#[test]
	fn empty_document_name_is_rejected() {
		assert!(uid_from_document_name("").is_err());
	}
}
