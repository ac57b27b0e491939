// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Post enrichment applied ahead of validation.
//!
//! Stamps the source application label and fills in `expiresAt` for stories
//! that arrive without one. The computed expiry goes through the same
//! datetime validation as a client-supplied one.

use crate::config::EnrichmentConfig;
use crate::models::Post;
use crate::validator::parse_timestamp;
use chrono::SecondsFormat;
use tracing::{debug, warn};

/// Fills server-owned fields on incoming posts.
#[derive(Debug, Clone)]
pub struct PostEnricher {
    config: EnrichmentConfig,
}

impl PostEnricher {
    pub fn new(config: EnrichmentConfig) -> Self {
        Self { config }
    }

    /// Return the post with enrichment applied, or unchanged when disabled.
    pub fn enrich(&self, mut post: Post) -> Post {
        if !self.config.enabled {
            return post;
        }

        post.source_app = Some(self.config.source_app.clone());

        if post.is_story && post.expiry().is_none() {
            // An unparsable createdAt is left for the validator to reject.
            if let Some(created_at) = parse_timestamp(&post.created_at) {
                match self
                    .config
                    .story_ttl()
                    .and_then(|ttl| created_at.checked_add_signed(ttl))
                {
                    Some(expires_at) => {
                        let expires_at = expires_at.to_rfc3339_opts(SecondsFormat::Secs, true);
                        debug!(created_at = %post.created_at, expires_at = %expires_at, "Story expiry set");
                        post.expires_at = Some(expires_at);
                    }
                    None => {
                        warn!(
                            created_at = %post.created_at,
                            story_ttl_hours = self.config.story_ttl_hours,
                            "Story expiry out of range, left unset"
                        );
                    }
                }
            }
        }

        post
    }
}
