//! CLI commands

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use console_core::{SessionContext, SessionStore};
use console_http::ConsoleClient;
use console_http::types::ProviderInput;
use serde::Serialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::config::{ApiConfig, ConsoleConfig};
use crate::session_file::FileSessionStore;
use crate::terminal::{TerminalNavigator, TerminalNotifier};
use crate::{devserver, publish};

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the built console and forward admin API calls to the backend
    Dev {
        /// Bind address (overrides dev.bind_addr)
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Directory with the built assets (overrides dev.static_dir)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Backend origin (overrides dev.proxy_target)
        #[arg(long)]
        target: Option<String>,
    },

    /// Copy the built console into the backend's static directory
    Publish {
        /// Directory with the built assets
        #[arg(long, default_value = "dist")]
        source: PathBuf,

        /// Output directory (overrides build.out_dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Leave existing files in the output directory
        #[arg(long)]
        keep_existing: bool,
    },

    /// Print the effective configuration
    Config,

    /// Sign in and store the session token
    Login {
        #[arg(long, short)]
        username: String,

        #[arg(long, env = "CONSOLE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage upstream providers
    Providers {
        #[command(subcommand)]
        command: ProviderCommands,
    },

    /// Manage API endpoints
    Endpoints {
        #[command(subcommand)]
        command: EndpointCommands,
    },

    /// Show per-endpoint usage statistics
    Stats {
        /// Day to report, YYYY-MM-DD (defaults to the backend's choice)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Change the admin password
    Passwd {
        #[arg(long, env = "CONSOLE_OLD_PASSWORD", hide_env_values = true)]
        old_password: String,

        #[arg(long, env = "CONSOLE_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },

    /// Change the admin username
    Rename { username: String },
}

#[derive(Subcommand)]
pub enum ProviderCommands {
    /// List providers
    List,

    /// Register a provider
    Create {
        #[arg(long)]
        name: String,

        /// Base URL of the provider's API
        #[arg(long)]
        api_address: String,

        #[arg(long, env = "CONSOLE_PROVIDER_KEY", hide_env_values = true)]
        api_key: String,

        #[arg(long)]
        model_name: String,
    },

    /// Delete a provider
    Delete { id: u64 },
}

#[derive(Subcommand)]
pub enum EndpointCommands {
    /// List endpoints
    List,

    /// Delete an endpoint
    Delete { id: u64 },
}

impl Commands {
    /// Log file component for this command
    pub const fn component(&self) -> &'static str {
        match self {
            Self::Dev { .. } => "dev",
            _ => "cli",
        }
    }

    pub async fn execute(self, data_dir: &Path, config: ConsoleConfig) -> Result<()> {
        match self {
            Self::Dev {
                bind,
                static_dir,
                target,
            } => run_dev_server(config, bind, static_dir, target).await,
            Self::Publish {
                source,
                out_dir,
                keep_existing,
            } => {
                let mut build = config.build;
                if let Some(out_dir) = out_dir {
                    build.out_dir = out_dir;
                }
                if keep_existing {
                    build.empty_out_dir = false;
                }
                let report = publish::publish(&source, &build)?;
                print_json(&report)
            }
            Self::Config => print_json(&config),
            Self::Login { username, password } => {
                let client = admin_client(&config.api, data_dir)?;
                client.login(&username, &password).await?;
                println!("Signed in as {username}");
                Ok(())
            }
            Self::Logout => {
                admin_client(&config.api, data_dir)?.logout()?;
                println!("Signed out");
                Ok(())
            }
            Self::Whoami => print_json(&admin_client(&config.api, data_dir)?.user_info().await?),
            Self::Providers { command } => {
                let client = admin_client(&config.api, data_dir)?;
                match command {
                    ProviderCommands::List => print_json(&client.list_providers().await?),
                    ProviderCommands::Create {
                        name,
                        api_address,
                        api_key,
                        model_name,
                    } => {
                        let input = ProviderInput {
                            name,
                            api_address,
                            api_key,
                            model_name,
                        };
                        print_json(&client.create_provider(&input).await?)
                    }
                    ProviderCommands::Delete { id } => {
                        print_json(&client.delete_provider(id).await?)
                    }
                }
            }
            Self::Endpoints { command } => {
                let client = admin_client(&config.api, data_dir)?;
                match command {
                    EndpointCommands::List => print_json(&client.list_endpoints().await?),
                    EndpointCommands::Delete { id } => {
                        print_json(&client.delete_endpoint(id).await?)
                    }
                }
            }
            Self::Stats { date } => {
                print_json(&admin_client(&config.api, data_dir)?.stats(date).await?)
            }
            Self::Passwd {
                old_password,
                new_password,
            } => print_json(
                &admin_client(&config.api, data_dir)?
                    .update_password(&old_password, &new_password)
                    .await?,
            ),
            Self::Rename { username } => print_json(
                &admin_client(&config.api, data_dir)?
                    .update_user_info(&username)
                    .await?,
            ),
        }
    }
}

/// Session backed by the token file, reporting to the terminal
pub fn terminal_session(data_dir: &Path) -> SessionContext {
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(data_dir));
    SessionContext::new(
        store,
        Arc::new(TerminalNavigator),
        Arc::new(TerminalNotifier::new()),
    )
}

/// Admin API client using the stored session
pub fn admin_client(api: &ApiConfig, data_dir: &Path) -> Result<ConsoleClient> {
    ConsoleClient::builder()
        .origin(api.server_url.as_str())
        .base_path(api.base_path.as_str())
        .timeout(api.timeout())
        .session(terminal_session(data_dir))
        .build()
        .context("Failed to build admin client")
}

async fn run_dev_server(
    config: ConsoleConfig,
    bind: Option<SocketAddr>,
    static_dir: Option<PathBuf>,
    target: Option<String>,
) -> Result<()> {
    let mut dev = config.dev;
    if let Some(bind) = bind {
        dev.bind_addr = bind;
    }
    if let Some(static_dir) = static_dir {
        dev.static_dir = static_dir;
    }
    if let Some(target) = target {
        crate::validation::validators::validate_origin(&target, "--target")?;
        dev.proxy_target = target;
    }

    info!(
        "Forwarding {} to {}, serving {}",
        dev.proxy_prefix,
        dev.proxy_target,
        dev.static_dir.display()
    );
    let app = devserver::router(&dev)?;
    let listener = devserver::bind(&dev).await?;
    devserver::serve(listener, app, shutdown_signal()).await?;
    info!("Dev server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
