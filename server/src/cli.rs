use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(about = "Renewcast wind data API.")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the wind data API over HTTP
    Http {
        #[arg(env = "RENEWCAST_SERVER_ADDRESS", default_value = "127.0.0.1:8000")]
        address: std::net::SocketAddr,
        /// Origin allowed to call the API from a browser (any origin when unset)
        #[arg(env = "RENEWCAST_CLIENT_URL", long)]
        client_url: Option<String>,
    },
    /// Print the earliest and latest timestamps of the dataset
    Bounds,
    /// Print the records within an inclusive date range
    Records(RecordsArgs),
}

#[derive(Debug, Parser)]
pub struct RecordsArgs {
    /// Start date (inclusive)
    #[arg(long, value_parser = parse_datetime)]
    pub from: chrono::DateTime<chrono::Utc>,
    /// End date (inclusive)
    #[arg(long, value_parser = parse_datetime)]
    pub to: chrono::DateTime<chrono::Utc>,
}

fn parse_datetime(value: &str) -> Result<chrono::DateTime<chrono::Utc>, String> {
    shared::timestamp::parse(value).ok_or_else(|| format!("invalid ISO-8601 datetime: '{}'", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_defaults() {
        let cli = Cli::try_parse_from(["renewcast", "http"]).unwrap();
        match cli.cmd {
            Command::Http { address, .. } => assert_eq!(address.port(), 8000),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_records_parses_naive_dates() {
        let cli = Cli::try_parse_from([
            "renewcast",
            "records",
            "--from",
            "2021-01-02T00:00",
            "--to",
            "2021-01-03",
        ])
        .unwrap();
        match cli.cmd {
            Command::Records(args) => {
                assert_eq!(args.from.to_rfc3339(), "2021-01-02T00:00:00+00:00");
                assert_eq!(args.to.to_rfc3339(), "2021-01-03T00:00:00+00:00");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_records_rejects_bad_date() {
        let result =
            Cli::try_parse_from(["renewcast", "records", "--from", "nope", "--to", "2021-01-03"]);
        assert!(result.is_err());
    }
}
