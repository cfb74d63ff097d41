use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use goposctl::api::{ApiClient, OrdersQuery};
use goposctl::oauth::{self, AuthCredentials};

/// Saves a page of GoPOS orders as JSON.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Base URL of the GoPOS instance serving `/oauth/token`.
    #[arg(long, env = "GOPOS_URL")]
    url: String,
    #[arg(long, env = "GOPOS_CLIENT_ID")]
    client_id: String,
    #[arg(long, env = "GOPOS_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,
    /// Prompted for when unset.
    #[arg(long, env = "GOPOS_USERNAME")]
    username: Option<String>,
    /// Prompted for when unset.
    #[arg(long, env = "GOPOS_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    #[arg(long, env = "GOPOS_ORGANIZATION_ID")]
    organization_id: String,
    /// Only orders from this date onwards, e.g. 2024-01-01.
    #[arg(long)]
    date_from: String,
    #[arg(long, default_value = "1")]
    page: String,
    #[arg(long, short, default_value = "orders.json")]
    output: PathBuf,
}

/// Quick and dirty function to read input from the user.
fn interactive_prompt(prompt_type: &str) -> Result<String> {
    let mut response = String::new();
    print!("Please enter {prompt_type} for your GoPOS account: ");
    io::stdout().flush()?;
    io::stdin()
        .read_line(&mut response)
        .context("failed to read from stdin")?;

    Ok(response.trim_end_matches(['\r', '\n']).to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; everything may come from flags instead.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "goposctl=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let username = match args.username {
        Some(username) => username,
        None => interactive_prompt("your username")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => interactive_prompt("your password")?,
    };
    let credentials = AuthCredentials {
        client_id: args.client_id,
        client_secret: args.client_secret,
        username,
        password,
    };

    let http = reqwest::Client::new();
    let access_token = oauth::authenticate_with(&http, &args.url, &credentials)
        .await
        .context("failed to authenticate with GoPOS")?;
    tracing::info!("obtained access token");

    let query = OrdersQuery {
        organization_id: args.organization_id,
        page: args.page,
        date_from: args.date_from,
    };
    ApiClient::new(access_token)?
        .with_http_client(http)
        .fetch_orders(&query, &args.output)
        .await
        .with_context(|| format!("failed to fetch page {} of orders", query.page))?;

    Ok(())
}
