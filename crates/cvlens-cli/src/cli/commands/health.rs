use anyhow::{Context, Result};
use cvlens_core::config::Config;
use cvlens_core::service::ServiceClient;

pub async fn run(config: &Config) -> Result<()> {
    let client = ServiceClient::from_config(config)?;
    let status = client
        .health()
        .await
        .with_context(|| format!("health check against {}", client.base_url()))?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
