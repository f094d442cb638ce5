use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use shared::models::DateRangeQuery;

mod cli;
mod config;
mod dataset;
mod error;
mod server;
mod wind_data;

use config::DatasetConfig;
use wind_data::WindData;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Cli::parse();
    let dataset = DatasetConfig::from_env().context("Invalid RENEWCAST_* dataset config")?;
    let data = WindData::new(&dataset);

    match args.cmd {
        Command::Http {
            address,
            client_url,
        } => {
            let client_url = client_url.as_deref().map(client_origin).transpose()?;
            server::run(address, client_url, data).await;
        }
        Command::Bounds => {
            let bounds = data.date_bounds().context("Failed to load wind data")?;
            println!("{}", serde_json::to_string_pretty(&bounds)?);
        }
        Command::Records(range) => {
            let query = DateRangeQuery {
                start_date: range.from,
                end_date: range.to,
            };
            let records = data
                .records_between(&query)
                .context("Failed to load wind data")?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}

/// Normalizes a client URL into a CORS origin (`scheme://host[:port]`).
fn client_origin(url: &str) -> Result<&str> {
    let origin = url.trim_end_matches('/');
    let uri: warp::http::Uri = origin
        .parse()
        .with_context(|| format!("Invalid client URL: {}", url))?;
    if uri.scheme().is_none() || uri.authority().is_none() || uri.path() != "/" {
        anyhow::bail!("Client URL must be an origin like http://localhost:5173, got {}", url);
    }
    Ok(origin)
}
