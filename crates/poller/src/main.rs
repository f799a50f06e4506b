//! `greenhouse-poller` -- reads the controller board's sensors on a fixed
//! interval and pushes each snapshot to the greenhouse API.
//!
//! # Environment variables
//!
//! | Variable              | Required | Default                 | Description                     |
//! |-----------------------|----------|-------------------------|---------------------------------|
//! | `BOARD_URL`           | yes      | --                      | Board base URL, e.g. `http://192.168.4.1` |
//! | `API_URL`             | no       | `http://localhost:3000` | Greenhouse API base URL         |
//! | `FETCH_INTERVAL_SECS` | no       | `5`                     | Seconds between polls           |

use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use greenhouse_poller::board::BoardClient;
use greenhouse_poller::poller::Poller;
use greenhouse_poller::sender::ApiSender;

const DEFAULT_INTERVAL_SECS: u64 = 5;
const DEFAULT_API_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greenhouse_poller=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let board_url = std::env::var("BOARD_URL").context("BOARD_URL environment variable is required")?;
    let api_url = std::env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

    let interval_secs: u64 = match std::env::var("FETCH_INTERVAL_SECS") {
        Ok(raw) => raw
            .parse()
            .context("FETCH_INTERVAL_SECS must be a positive integer")?,
        Err(_) => DEFAULT_INTERVAL_SECS,
    };
    if interval_secs == 0 {
        anyhow::bail!("FETCH_INTERVAL_SECS must be at least 1");
    }

    tracing::info!(
        board_url = %board_url,
        api_url = %api_url,
        interval_secs,
        "Starting greenhouse-poller",
    );

    let board = BoardClient::new(board_url).context("Failed to build board client")?;
    let sender = ApiSender::new(api_url).context("Failed to build API client")?;
    let poller = Poller::new(board, sender);

    tokio::select! {
        () = poller.run(Duration::from_secs(interval_secs)) => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl-C")?;
            tracing::info!("Received SIGINT (Ctrl-C), stopping");
        }
    }

    Ok(())
}
