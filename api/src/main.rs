use std::sync::Arc;

use clap::{Parser, Subcommand};
use rentify_web::config::AppConfig;
use rentify_web::error::StartupError;
use rentify_web::jwt::jwt_helper::SessionKeys;
use rentify_web::routes::table::RouteTable;
use rentify_web::services::redis_service::{setup_redis, MemoryRevocations, RevocationList};
use rentify_web::services::user_service::HttpRentalApi;
use rentify_web::state::AppState;
use rentify_web::{build_rocket, Cors};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rentify-web", version, about = "Rentify web front: pages, sessions and bookings")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the web service (the default).
    Serve {
        /// Base url of the rental API, overriding the configuration.
        #[arg(long, env = "RENTIFY_API_BASE_URL")]
        api_base_url: Option<String>,
        /// Redis url for the session revocation list.
        #[arg(long, env = "RENTIFY_REDIS_URL")]
        redis_url: Option<String>,
    },
    /// Print the route table.
    Routes,
}

#[rocket::main]
async fn main() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve {
        api_base_url: None,
        redis_url: None,
    }) {
        Command::Routes => {
            let table = RouteTable::rentify()?;
            for entry in table.entries() {
                println!(
                    "{:<40} {:<24} {}",
                    entry.pattern.as_str(),
                    format!("{:?}", entry.page),
                    entry.access
                );
            }
            Ok(())
        }
        Command::Serve {
            api_base_url,
            redis_url,
        } => serve(api_base_url, redis_url).await,
    }
}

async fn serve(api_base_url: Option<String>, redis_url: Option<String>) -> Result<(), StartupError> {
    let mut figment = rocket::Config::figment();
    if let Some(url) = api_base_url {
        figment = figment.merge(("api_base_url", url));
    }
    if let Some(url) = redis_url {
        figment = figment.merge(("redis_url", url));
    }
    let config = AppConfig::from_figment(&figment)?;

    let api = HttpRentalApi::new(&config.api_base_url, config.request_timeout())?;
    let revocations: Arc<dyn RevocationList> = match &config.redis_url {
        Some(url) => Arc::new(setup_redis(url).await?),
        None => {
            tracing::warn!("no redis_url configured, logouts are only remembered by this process");
            Arc::new(MemoryRevocations::default())
        }
    };

    let state = AppState::new(
        Arc::new(api),
        SessionKeys::new(config.session_secret.as_bytes(), config.session_ttl_secs),
        revocations,
        RouteTable::rentify()?,
    );
    tracing::info!(api = %config.api_base_url, "starting rentify web");

    let cors = Cors {
        allowed_origin: config.cors_allowed_origin.clone(),
    };
    build_rocket(figment, state, cors)
        .launch()
        .await
        .map_err(Box::new)?;
    Ok(())
}
