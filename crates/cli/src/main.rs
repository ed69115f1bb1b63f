//! Relikt Arte CLI - Admin URL resolution and backend diagnostics.
//!
//! # Usage
//!
//! ```bash
//! # Resolve a backend URL under the admin policy (always HTTPS)
//! ra-cli url product/5
//!
//! # Resolve against a local backend over plain HTTP
//! BACKEND_ORIGIN=localhost:8000 ra-cli url product/5 --local
//!
//! # Issue a one-shot GET and pretty-print the JSON response
//! ra-cli fetch product/list -p page=1 -p size=10
//! ```
//!
//! # Commands
//!
//! - `url` - Print the resolved backend URL for a path
//! - `fetch` - GET a backend resource and print the decoded payload

#![cfg_attr(not(test), forbid(unsafe_code))]
// CLI results go to stdout by design of the tool.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use relikt_arte_core::url::ApiBase;
use relikt_arte_storefront::catalog::CatalogClient;
use relikt_arte_storefront::config::BackendConfig;

#[derive(Parser)]
#[command(name = "ra-cli")]
#[command(author, version, about = "Relikt Arte admin CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved backend URL for a path
    Url {
        /// Path fragment, e.g. `product/5` or `static/catalog/door/a/1.jpg`
        path: String,

        /// Apply the storefront's local-development policy (HTTP) instead
        /// of the admin policy (HTTPS)
        #[arg(long)]
        local: bool,
    },
    /// GET a backend resource and pretty-print the JSON response
    Fetch {
        /// Path fragment, e.g. `product/list`
        path: String,

        /// Query parameter, repeatable: `-p page=1 -p size=10`
        #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
}

/// Parse a `key=value` command-line parameter.
fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let backend = BackendConfig::from_env()?;

    match cli.command {
        Commands::Url { path, local } => {
            let base = if local {
                ApiBase::new(&backend.origin, true)
            } else {
                ApiBase::secure(&backend.origin)
            };
            println!("{}", base.resource_url(&path));
        }
        Commands::Fetch { path, params } => {
            let client = CatalogClient::new(ApiBase::secure(&backend.origin));
            let query: Vec<(&str, String)> = params
                .iter()
                .map(|(key, value)| (key.as_str(), value.clone()))
                .collect();
            let payload: serde_json::Value = client.get(&path, &query).await?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("page=1"),
            Ok(("page".to_string(), "1".to_string()))
        );
        assert!(parse_key_val("page").is_err());
    }

    #[test]
    fn test_parse_key_val_keeps_extra_equals() {
        assert_eq!(
            parse_key_val("q=a=b"),
            Ok(("q".to_string(), "a=b".to_string()))
        );
    }
}
