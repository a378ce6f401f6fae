/**
 * The `showroll_api` service exposes episodes, guests and the rated
 * appearances linking them as a JSON HTTP API backed by SQLite.
 */
use std::{
    fmt,
    net::{AddrParseError, IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    body::Body,
    http::{
        Request,
        header::{ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE, ORIGIN},
    },
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer,
};

pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod schema;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_database_url() -> String {
    "app.db".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    5555
}

const fn default_pool_size() -> u32 {
    10
}

const fn default_pretty_json() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            host: default_host(),
            port: default_port(),
            pool_size: default_pool_size(),
            pretty_json: default_pretty_json(),
        }
    }
}

impl Config {
    /// The socket address the service should listen on.
    ///
    /// # Errors
    /// If `host` is not an IP address.
    pub fn addr(&self) -> Result<SocketAddr, AddrParseError> {
        let host: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(host, self.port))
    }
}

#[derive(Clone)]
pub struct AppContext {
    pool: db::Pool,
    config: Arc<Config>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("pool", &"Pool<SqliteConnection>")
            .field("config", &self.config)
            .finish()
    }
}

impl AppContext {
    /// Opens the connection pool for `config.database_url` and brings the
    /// schema up to date.
    ///
    /// # Errors
    /// If the pool cannot be built or a migration fails.
    pub fn connect(config: Config) -> Result<Self, db::DbError> {
        let pool = db::create_pool(&config.database_url, config.pool_size)?;
        db::run_migrations(&pool)?;

        Ok(Self {
            pool,
            config: Arc::new(config),
        })
    }

    pub const fn pool(&self) -> &db::Pool {
        &self.pool
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl sr_app::ContextProvider<Config> for AppContext {
    type Error = db::DbError;

    async fn new(config: Config) -> Result<Self, Self::Error> {
        tokio::task::spawn_blocking(move || Self::connect(config))
            .await
            .map_err(|e| db::DbError::Setup(e.to_string()))?
    }
}

/// Builds the service router with its middleware stack.
pub fn app(context: AppContext) -> Router {
    // Set up a trace layer
    let trace_layer = TraceLayer::new_for_http().on_request(
        |request: &Request<Body>, _: &tracing::Span| {
            tracing::info!(
                "received request: {method} {uri}",
                method = request.method(),
                uri = request.uri()
            );
        },
    );

    // Set up a CORS layer
    let cors_layer = CorsLayer::new()
        .allow_headers([ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE, ORIGIN])
        .allow_methods(tower_http::cors::Any)
        .allow_origin(tower_http::cors::Any);

    let compression_layer = CompressionLayer::new().gzip(true).deflate(true);

    Router::new()
        .route("/episodes", get(handlers::episode::get_list::handler))
        .route(
            "/episodes/{id}",
            get(handlers::episode::get_one::handler)
                .delete(handlers::episode::delete::handler),
        )
        .route("/guests", get(handlers::guest::get_list::handler))
        .route("/appearances", post(handlers::appearance::create::handler))
        .route("/health", get(handlers::health::handler))
        .fallback(sr_axum::not_found)
        .layer(cors_layer)
        .layer(trace_layer)
        .layer(compression_layer)
        .with_state(context)
}
