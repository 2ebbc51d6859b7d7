//! `console`: command-line access to the licensing backend.
//!
//! Configuration comes from `CONSOLE_*` environment variables; notifications
//! are written to the log.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console_core::{logging, ClientConfig, ConsoleClient, Mutation, MutationOptions, ResourceName, StaticToken};
use serde_json::Value;
use tracing::debug;

#[derive(Parser)]
#[command(name = "console", version, about = "Licensing console client")]
struct Cli {
    /// Override CONSOLE_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every record of a resource
    List { resource: String },
    /// Fetch one record
    Get { resource: String, id: String },
    /// Create a record from a JSON object
    Create {
        resource: String,
        body: String,
        /// Do not emit the success notification
        #[arg(long)]
        silent: bool,
    },
    /// Replace a record with a JSON object
    Update {
        resource: String,
        id: String,
        body: String,
        #[arg(long)]
        silent: bool,
    },
    /// Delete a record
    Delete {
        resource: String,
        id: String,
        #[arg(long)]
        silent: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = ClientConfig::from_env().context("failed to read CONSOLE_* configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
        config.validate()?;
    }
    logging::init_tracing(&config.log_level);
    debug!(base_url = %config.base_url, "configuration loaded");

    let tokens = match &config.api_token {
        Some(token) => StaticToken::new(token.clone()),
        None => StaticToken::none(),
    };
    let client = ConsoleClient::from_config(&config, Arc::new(tokens))?;

    let output = match cli.command {
        Command::List { resource } => Value::Array(client.list(&ResourceName::new(resource)).await?),
        Command::Get { resource, id } => client.get_by_id(&ResourceName::new(resource), &id).await?,
        Command::Create { resource, body, silent } => {
            let mutation = Mutation::create(ResourceName::new(resource), parse_body(&body)?);
            client.mutate(mutation, &options(silent)).await?.payload
        }
        Command::Update {
            resource,
            id,
            body,
            silent,
        } => {
            let mutation = Mutation::update(ResourceName::new(resource), id, parse_body(&body)?);
            client.mutate(mutation, &options(silent)).await?.payload
        }
        Command::Delete { resource, id, silent } => {
            let mutation = Mutation::delete(ResourceName::new(resource), id);
            client.mutate(mutation, &options(silent)).await?.payload
        }
    };

    if !output.is_null() {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}

fn parse_body(raw: &str) -> Result<Value> {
    let body: Value = serde_json::from_str(raw).context("body must be valid JSON")?;
    anyhow::ensure!(body.is_object(), "body must be a JSON object");
    Ok(body)
}

fn options(silent: bool) -> MutationOptions {
    MutationOptions {
        silent,
        ..MutationOptions::default()
    }
}
