// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Ward user-provisioning server binary.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use ward_server::{create_router, AppState};
use ward_server_directory::{
	IdentityProvider, MemoryDirectory, ProfileStore, RestDirectoryConfig, RestIdentityProvider,
	RestProfileStore,
};
use ward_server_jobs::JobScheduler;
use ward_server_provisioning::ProvisioningService;

/// Ward server - HTTP server for clinic staff provisioning.
#[derive(Parser, Debug)]
#[command(name = "ward-server", about = "Ward user provisioning server", version)]
struct Args {
	/// Path to the TOML config file (defaults to /etc/ward/server.toml).
	#[arg(long, env = "WARD_SERVER_CONFIG")]
	config: Option<std::path::PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("ward-server {}", env!("CARGO_PKG_VERSION"));
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => ward_server_config::load_config_with_file(path)?,
		None => ward_server_config::load_config()?,
	};

	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		dev_mode = config.auth.dev_mode,
		"starting ward-server"
	);

	let (identity, profiles): (Arc<dyn IdentityProvider>, Arc<dyn ProfileStore>) =
		if config.auth.dev_mode {
			let directory = Arc::new(MemoryDirectory::new());
			seed_dev_directory(&directory, &config.auth.bootstrap_email).await;
			(
				directory.clone() as Arc<dyn IdentityProvider>,
				directory as Arc<dyn ProfileStore>,
			)
		} else {
			let rest_config = RestDirectoryConfig {
				identity_endpoint: config.directory.identity_endpoint.clone(),
				profile_endpoint: config.directory.profile_endpoint.clone(),
				project_id: config.directory.project_id.clone(),
				api_key: config
					.directory
					.api_key
					.clone()
					.ok_or("directory API key not configured")?,
			};
			(
				Arc::new(RestIdentityProvider::new(rest_config.clone())) as Arc<dyn IdentityProvider>,
				Arc::new(RestProfileStore::new(rest_config)) as Arc<dyn ProfileStore>,
			)
		};

	let service = Arc::new(ProvisioningService::new(
		identity.clone(),
		profiles.clone(),
		config.auth.bootstrap_email.clone(),
	));

	let mut scheduler = JobScheduler::new();
	if config.jobs.reconcile_enabled {
		scheduler.register_periodic(
			Arc::new(ward_server::jobs::ReconcileJob::new(
				identity.clone(),
				profiles.clone(),
			)),
			Duration::from_secs(config.jobs.reconcile_interval_secs),
		);
	}
	scheduler.start().await;

	let state = AppState::new(service, identity, profiles, config.auth.dev_mode);
	let app = create_router(state);

	let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
	tracing::info!(addr = %listener.local_addr()?, "listening");

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	scheduler.shutdown().await;
	tracing::info!("ward-server stopped");
	Ok(())
}

/// Seed the in-memory directory so dev mode is usable out of the box: the
/// bootstrap identity gets an account and a ready-made bearer token.
async fn seed_dev_directory(directory: &MemoryDirectory, bootstrap_email: &str) {
	if bootstrap_email.is_empty() {
		tracing::warn!("dev mode without a bootstrap email; no caller can provision");
		return;
	}

	match directory
		.create_account(bootstrap_email, "dev-password", "Bootstrap")
		.await
	{
		Ok(uid) => match directory.mint_token(&uid).await {
			Ok(token) => {
				tracing::info!(email = %bootstrap_email, %token, "dev bootstrap account ready");
			}
			Err(e) => tracing::warn!(error = %e, "failed to mint dev bootstrap token"),
		},
		Err(e) => tracing::warn!(error = %e, "failed to seed dev bootstrap account"),
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::warn!(error = %e, "failed to listen for shutdown signal");
	}
}
