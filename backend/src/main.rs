//! Backend entry-point: reads configuration from the environment, wires the
//! REST API, and runs the HTTP server.

mod server;

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::{DisplayName, Username};
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use server::{AdminSeed, ServerConfig};

fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(err) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %err, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {err}"
                )))
            }
        }
    }
}

fn same_site_from_env() -> SameSite {
    match env::var("SESSION_SAMESITE").as_deref() {
        Ok("strict") => SameSite::Strict,
        Ok("none") => SameSite::None,
        _ => SameSite::Lax,
    }
}

fn admin_seed_from_env() -> std::io::Result<Option<AdminSeed>> {
    let (Ok(username), Ok(password)) = (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD"))
    else {
        return Ok(None);
    };
    let username = Username::new(username)
        .map_err(|err| std::io::Error::other(format!("invalid ADMIN_USERNAME: {err}")))?;
    let display_name = env::var("ADMIN_DISPLAY_NAME").unwrap_or_else(|_| "Administrator".into());
    let display_name = DisplayName::new(display_name)
        .map_err(|err| std::io::Error::other(format!("invalid ADMIN_DISPLAY_NAME: {err}")))?;
    Ok(Some(AdminSeed::new(username, display_name, password)))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|err| std::io::Error::other(format!("invalid BIND_ADDR: {err}")))?;

    let mut config = ServerConfig::new(key, cookie_secure, same_site_from_env(), bind_addr);

    match env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|err| std::io::Error::other(format!("database pool setup: {err}")))?;
            config = config.with_db_pool(pool);
        }
        Err(_) => {
            warn!("DATABASE_URL not set; using in-memory stores (state is lost on restart)");
        }
    }

    if let Some(seed) = admin_seed_from_env()? {
        config = config.with_admin_seed(seed);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config).await?;
    server.await
}
