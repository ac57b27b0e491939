// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the posting service.
//!
//! Every value has a default so the service can start with no environment at
//! all; the defaults match the production ShareFrame PDS.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the posting service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Upstream record creation configuration
    #[serde(default)]
    pub publisher: PublisherConfig,

    /// Validation configuration
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Post enrichment configuration
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Upstream `createRecord` configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// Full URL of the `com.atproto.repo.createRecord` XRPC endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Collection the record is filed under (default: social.shareframe.feed.post)
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Bounded wait for the whole upstream exchange in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Validation configuration for feed posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Require at least one image or video reference (default: true)
    #[serde(default = "default_true")]
    pub require_media: bool,

    /// Maximum post text length in Unicode scalar values (default: 300)
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
}

/// Enrichment applied to posts before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Enable enrichment (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Label stamped into `sourceApp` (default: ShareFrame)
    #[serde(default = "default_source_app")]
    pub source_app: String,

    /// Story lifetime used when a story carries no `expiresAt` (default: 24)
    #[serde(default = "default_story_ttl_hours")]
    pub story_ttl_hours: i64,
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_endpoint() -> String {
    "https://shareframe.social/xrpc/com.atproto.repo.createRecord".to_string()
}

fn default_collection() -> String {
    crate::models::FEED_POST_NSID.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_max_text_chars() -> usize {
    300
}

fn default_source_app() -> String {
    "ShareFrame".to_string()
}

fn default_story_ttl_hours() -> i64 {
    24
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            publisher: PublisherConfig::default(),
            validation: ValidationConfig::default(),
            enrichment: EnrichmentConfig::default(),
        }
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            collection: default_collection(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_media: default_true(),
            max_text_chars: default_max_text_chars(),
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            source_app: default_source_app(),
            story_ttl_hours: default_story_ttl_hours(),
        }
    }
}

impl PublisherConfig {
    /// Get the upstream timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl EnrichmentConfig {
    /// Get the story lifetime, `None` when the hour count is out of range
    pub fn story_ttl(&self) -> Option<chrono::Duration> {
        chrono::Duration::try_hours(self.story_ttl_hours)
    }
}
