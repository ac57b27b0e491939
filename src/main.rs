// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! ShareFrame Posting Service
//!
//! Function host for feed post submissions. Each `POST /` (or `POST /posts`)
//! is one invocation that validates a post and creates it on the PDS.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables (and `.env` if present):
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `XRPC_ENDPOINT`: createRecord URL (default: https://shareframe.social/xrpc/com.atproto.repo.createRecord)
//! - `RECORD_COLLECTION`: Record collection (default: social.shareframe.feed.post)
//! - `PUBLISH_TIMEOUT_SECS`: Upstream timeout (default: 10)
//! - `REQUIRE_MEDIA`: Require an image or video (default: true)
//! - `MAX_TEXT_CHARS`: Maximum text length (default: 300)
//! - `ENRICH_POSTS`: Stamp source app and story expiry (default: true)
//! - `SOURCE_APP`: Source app label (default: ShareFrame)
//! - `STORY_TTL_HOURS`: Story lifetime (default: 24)

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use posting_service::{
    config::{Config, EnrichmentConfig, PublisherConfig, ValidationConfig},
    enrich::PostEnricher,
    handlers::{router, AppState},
    publisher::XrpcPublisher,
    service::PostingService,
    validator::PostValidator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = load_config();
    info!(
        bind_addr = %config.bind_addr,
        endpoint = %config.publisher.endpoint,
        collection = %config.publisher.collection,
        timeout_secs = config.publisher.timeout_secs,
        require_media = config.validation.require_media,
        enrichment = config.enrichment.enabled,
        "Starting posting service"
    );

    // Create application state
    let publisher = XrpcPublisher::new(&config.publisher)?;
    let service = PostingService::new(
        Arc::new(publisher),
        PostValidator::new(config.validation.clone()),
        PostEnricher::new(config.enrichment.clone()),
    );

    let state = Arc::new(AppState { service });

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// Load configuration from environment variables.
fn load_config() -> Config {
    let defaults = Config::default();
    Config {
        bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
        publisher: PublisherConfig {
            endpoint: std::env::var("XRPC_ENDPOINT").unwrap_or(defaults.publisher.endpoint),
            collection: std::env::var("RECORD_COLLECTION")
                .unwrap_or(defaults.publisher.collection),
            timeout_secs: env_or("PUBLISH_TIMEOUT_SECS", defaults.publisher.timeout_secs),
        },
        validation: ValidationConfig {
            require_media: env_or("REQUIRE_MEDIA", defaults.validation.require_media),
            max_text_chars: env_or("MAX_TEXT_CHARS", defaults.validation.max_text_chars),
        },
        enrichment: EnrichmentConfig {
            enabled: env_or("ENRICH_POSTS", defaults.enrichment.enabled),
            source_app: std::env::var("SOURCE_APP").unwrap_or(defaults.enrichment.source_app),
            story_ttl_hours: env_or("STORY_TTL_HOURS", defaults.enrichment.story_ttl_hours),
        },
    }
}

/// Parse an environment variable, falling back to `default` when unset or malformed.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
