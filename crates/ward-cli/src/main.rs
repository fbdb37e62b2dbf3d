// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Ward operator CLI.
//!
//! The command-line rendition of the dashboard's user-management form:
//! list the roster, provision, edit, and deprovision principals. Failures
//! print the server's own message; the typed arguments stay in the shell
//! history for an immediate retry.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ward_cli::{ApiClient, NewUserForm, ProfileChanges, Roster};
use ward_server_auth::{Role, Uid};

#[derive(Parser, Debug)]
#[command(name = "ward", about = "Ward user provisioning CLI", version)]
struct Args {
	/// Server base URL.
	#[arg(long, env = "WARD_SERVER_URL", default_value = "http://127.0.0.1:8470")]
	server: String,

	/// Bearer token issued by the identity provider.
	#[arg(long, env = "WARD_TOKEN", hide_env_values = true)]
	token: String,

	/// The operator's own role, used to pre-filter the roster locally.
	#[arg(long, env = "WARD_ROLE")]
	role: Option<Role>,

	/// The operator's email, for bootstrap-row handling.
	#[arg(long, env = "WARD_EMAIL", default_value = "")]
	email: String,

	/// Bootstrap identity email, if the deployment still has one.
	#[arg(long, env = "WARD_BOOTSTRAP_EMAIL", default_value = "")]
	bootstrap_email: String,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// List the visible roster.
	List,
	/// Provision a new principal.
	Create {
		#[arg(long)]
		email: String,
		#[arg(long)]
		password: String,
		#[arg(long, default_value = "")]
		first_name: String,
		#[arg(long, default_value = "")]
		last_name: String,
		#[arg(long, default_value = "")]
		phone: String,
		#[arg(long, default_value = "")]
		birthdate: String,
		#[arg(long, default_value = "")]
		address: String,
		#[arg(long, default_value = "staff")]
		role: String,
		/// Idempotency key; resubmitting with the same key is safe.
		#[arg(long)]
		idempotency_key: Option<String>,
	},
	/// Edit a principal's profile.
	Update {
		uid: String,
		#[arg(long)]
		first_name: Option<String>,
		#[arg(long)]
		last_name: Option<String>,
		#[arg(long)]
		phone: Option<String>,
		#[arg(long)]
		birthdate: Option<String>,
		#[arg(long)]
		address: Option<String>,
		#[arg(long)]
		role: Option<String>,
	},
	/// Deprovision a principal.
	Delete { uid: String },
}

#[tokio::main]
async fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "warn".into()),
		)
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();
	let client = ApiClient::new(&args.server, &args.token);

	match args.command {
		Command::List => {
			let roster = Roster::from_fetch(client.list_users().await);
			if roster.is_degraded() {
				eprintln!("warning: roster fetch failed; showing empty list");
			}

			let visible = roster.visible_to(args.role, &args.email, &args.bootstrap_email);
			if visible.is_empty() {
				println!("no users");
				return Ok(());
			}

			println!("{:<28} {:<30} {:<10} NAME", "UID", "EMAIL", "ROLE");
			for profile in visible {
				println!(
					"{:<28} {:<30} {:<10} {}",
					profile.uid.as_str(),
					profile.email,
					profile.role.to_string(),
					profile.display_name()
				);
			}
		}
		Command::Create {
			email,
			password,
			first_name,
			last_name,
			phone,
			birthdate,
			address,
			role,
			idempotency_key,
		} => {
			let form = NewUserForm {
				email,
				password,
				first_name,
				last_name,
				phone,
				birthdate,
				address,
				role,
				idempotency_key,
			};
			let created = client
				.create_user(&form)
				.await
				.context("failed to create user")?;
			println!(
				"created {} ({}) as {}",
				created.uid, created.profile.email, created.profile.role
			);
		}
		Command::Update {
			uid,
			first_name,
			last_name,
			phone,
			birthdate,
			address,
			role,
		} => {
			let changes = ProfileChanges {
				first_name,
				last_name,
				phone,
				birthdate,
				address,
				role,
			};
			let updated = client
				.update_user(&Uid::new(uid), &changes)
				.await
				.context("failed to update user")?;
			println!("updated {} ({})", updated.uid, updated.role);
		}
		Command::Delete { uid } => {
			let uid = Uid::new(uid);
			client
				.delete_user(&uid)
				.await
				.context("failed to delete user")?;
			println!("deleted {uid}");
		}
	}

	Ok(())
}
