//! Session command handlers.

use std::io::BufRead;

use anyhow::{Context, Result};
use cvlens_core::analysis::NO_SESSION_MESSAGE;
use cvlens_core::config::Config;
use cvlens_core::credentials::{CredentialStore, FileCredentialStore, redact};
use cvlens_core::error::WorkflowError;
use cvlens_core::service::{CredentialMode, ServiceClient};
use cvlens_core::session::{self, Validation};

use crate::cli::CredentialArgs;

fn read_password(args: &CredentialArgs) -> Result<String> {
    if args.password_stdin {
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("read password from stdin")?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }
    Ok(args.password.clone().unwrap_or_default())
}

/// Logs in or registers, stores the token, then confirms it with `/me`.
pub async fn submit(config: &Config, mode: CredentialMode, args: CredentialArgs) -> Result<()> {
    let email = args.email.trim().to_string();
    let password = read_password(&args)?;
    if email.is_empty() || password.is_empty() {
        anyhow::bail!("Email and password are required");
    }

    let client = ServiceClient::from_config(config)?;
    let grant = client
        .submit_credentials(mode, &email, &password)
        .await
        .map_err(|e| WorkflowError::from_credentials(&e))?;

    let store = FileCredentialStore::default_location();
    store.save(&grant.access_token)?;
    tracing::info!(mode = mode.label(), token = %redact(&grant.access_token), "session stored");

    match session::validate(&client, &grant.access_token).await {
        Validation::Valid(user) => {
            println!("{}", mode.success_message());
            println!("Signed in as {}", user.email);
            Ok(())
        }
        Validation::Invalid => {
            store.clear()?;
            Err(WorkflowError::session_expired().into())
        }
    }
}

pub fn logout() -> Result<()> {
    FileCredentialStore::default_location().clear()?;
    println!("Logged out.");
    Ok(())
}

/// Validates the stored token. An invalid token is removed.
pub async fn whoami(config: &Config) -> Result<()> {
    let store = FileCredentialStore::default_location();
    let Some(token) = store.load()? else {
        anyhow::bail!(NO_SESSION_MESSAGE);
    };

    let client = ServiceClient::from_config(config)?;
    match session::validate(&client, &token).await {
        Validation::Valid(user) => {
            let status = if user.active { "active" } else { "inactive" };
            println!("{} (id {}, {status})", user.email, user.id);
            Ok(())
        }
        Validation::Invalid => {
            store.clear()?;
            Err(WorkflowError::session_expired().into())
        }
    }
}
