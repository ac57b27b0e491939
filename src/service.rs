// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Post creation flow.
//!
//! Credentials are checked first, then the post is enriched, validated and
//! handed to the publisher. Every step fails fast; nothing is retried.

use crate::enrich::PostEnricher;
use crate::error::{PostError, Result};
use crate::models::{CreatePostRequest, PostResponse};
use crate::publisher::FeedPublisher;
use crate::validator::PostValidator;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Orchestrates one post submission per call.
///
/// Holds no request state; one instance serves concurrent invocations.
pub struct PostingService {
    publisher: Arc<dyn FeedPublisher>,
    validator: PostValidator,
    enricher: PostEnricher,
}

impl PostingService {
    pub fn new(
        publisher: Arc<dyn FeedPublisher>,
        validator: PostValidator,
        enricher: PostEnricher,
    ) -> Self {
        Self {
            publisher,
            validator,
            enricher,
        }
    }

    /// Create a feed post in the request's repository.
    pub async fn create_post(&self, request: CreatePostRequest) -> Result<PostResponse> {
        let CreatePostRequest {
            auth_token,
            did,
            post,
        } = request;

        if auth_token.trim().is_empty() {
            let err = PostError::MissingCredentials { field: "authToken" };
            warn!(did = %did, error = %err, "Rejected request");
            return Err(err);
        }
        if did.trim().is_empty() {
            let err = PostError::MissingCredentials { field: "did" };
            warn!(error = %err, "Rejected request");
            return Err(err);
        }

        let post = self.enricher.enrich(post);

        if let Err(err) = self.validator.validate(&post).into_result() {
            warn!(did = %did, nsid = %post.nsid, error = %err, "Validation failed");
            return Err(err.into());
        }

        match self.publisher.publish(&post, &auth_token, &did).await {
            Ok(response) => {
                info!(did = %did, uri = %response.uri, cid = %response.cid, "Post successfully created");
                Ok(response)
            }
            Err(err) => {
                error!(did = %did, error = %err, "Failed to post to feed");
                Err(err.into())
            }
        }
    }
}
