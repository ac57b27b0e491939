// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Record publishing through `com.atproto.repo.createRecord`.
//!
//! One POST per call, no retries. The full response body is read before the
//! status is inspected so a rejection can carry it verbatim.

use crate::config::PublisherConfig;
use crate::models::{CreateRecordRequest, Post, PostResponse};
use async_trait::async_trait;
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client, StatusCode,
};
use thiserror::Error;
use tracing::{debug, error};

/// Publishing error types.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream rejected post with status {status}: {body}")]
    UpstreamRejected { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    ResponseParse(#[source] serde_json::Error),

    #[error("upstream returned an empty response")]
    EmptyResponse,
}

impl PublishError {
    /// Whether the failure was the bounded wait running out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, PublishError::Transport(e) if e.is_timeout())
    }
}

/// Publishes a validated post to a repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedPublisher: Send + Sync {
    async fn publish(
        &self,
        post: &Post,
        auth_token: &str,
        did: &str,
    ) -> Result<PostResponse, PublishError>;
}

/// XRPC `createRecord` client.
///
/// Holds one `reqwest::Client`, so a single instance shares its connection
/// pool across every invocation.
pub struct XrpcPublisher {
    client: Client,
    endpoint: String,
    collection: String,
}

impl XrpcPublisher {
    /// Create a publisher whose client enforces the configured timeout.
    pub fn new(config: &PublisherConfig) -> Result<Self, PublishError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a publisher around an existing client.
    pub fn with_client(client: Client, config: &PublisherConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            collection: config.collection.clone(),
        }
    }
}

#[async_trait]
impl FeedPublisher for XrpcPublisher {
    async fn publish(
        &self,
        post: &Post,
        auth_token: &str,
        did: &str,
    ) -> Result<PostResponse, PublishError> {
        let request = CreateRecordRequest {
            repo: did,
            collection: &self.collection,
            record: post,
        };

        debug!(endpoint = %self.endpoint, did = %did, "Sending createRecord");

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", auth_token))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, timeout = e.is_timeout(), "HTTP request failed");
                PublishError::Transport(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(error = %e, "Failed to read response body");
            PublishError::Transport(e)
        })?;

        if status != StatusCode::OK {
            error!(status = status.as_u16(), "Failed to post to feed");
            return Err(PublishError::UpstreamRejected {
                status: status.as_u16(),
                body,
            });
        }

        match serde_json::from_str::<Option<PostResponse>>(&body) {
            Ok(Some(post_response)) => Ok(post_response),
            Ok(None) => {
                error!("Upstream returned null body");
                Err(PublishError::EmptyResponse)
            }
            Err(e) => {
                error!(error = %e, "Failed to parse response JSON");
                Err(PublishError::ResponseParse(e))
            }
        }
    }
}
