//! `probe` - resolve which endpoint class this machine would use.

use crate::error::CliError;
use vectorview::config::ViewerConfig;
use vectorview::endpoint::{EndpointClass, EndpointResolver};

/// Probe the configured self-hosted stack and report the selection.
pub async fn run(config: &ViewerConfig, client: reqwest::Client) -> Result<(), CliError> {
    let resolver = EndpointResolver::new(config.endpoints(), config.context, client)
        .with_probe_timeout(config.probe_timeout());

    let class = resolver.select().await;
    println!("endpoint class: {}", class);
    println!(
        "archive url:    {}",
        resolver.static_archive_url(&config.archive_name).await
    );
    match class {
        EndpointClass::SelfHosted => {
            if let Some(catalog) = resolver.catalog_url().await {
                println!("catalog url:    {}", catalog);
            }
        }
        EndpointClass::Fallback => {
            println!("dynamic tiles:  unavailable (fallback host is static-only)");
        }
    }
    Ok(())
}
