// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for the posting service.

use crate::publisher::PublishError;
use crate::validator::ValidationError;
use axum::http::StatusCode;
use thiserror::Error;

/// Errors surfaced by a single post invocation.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid request: missing '{field}'")]
    MissingCredentials { field: &'static str },

    #[error("invalid post: {0}")]
    InvalidPost(#[from] ValidationError),

    #[error("posting to feed failed: {0}")]
    PublishFailed(#[from] PublishError),
}

/// Caller-visible error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    MissingCredentials,
    InvalidPost,
    TransportFailure,
    UpstreamRejected,
    ResponseParseFailure,
    EmptyResponse,
}

impl PostError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostError::InvalidInput(_) => ErrorKind::InvalidInput,
            PostError::MissingCredentials { .. } => ErrorKind::MissingCredentials,
            PostError::InvalidPost(_) => ErrorKind::InvalidPost,
            PostError::PublishFailed(e) => match e {
                PublishError::Transport(_) => ErrorKind::TransportFailure,
                PublishError::UpstreamRejected { .. } => ErrorKind::UpstreamRejected,
                PublishError::ResponseParse(_) => ErrorKind::ResponseParseFailure,
                PublishError::EmptyResponse => ErrorKind::EmptyResponse,
            },
        }
    }

    /// HTTP status returned to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidInput | ErrorKind::InvalidPost => StatusCode::BAD_REQUEST,
            ErrorKind::MissingCredentials => StatusCode::UNAUTHORIZED,
            ErrorKind::TransportFailure => match self {
                PostError::PublishFailed(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            },
            ErrorKind::UpstreamRejected
            | ErrorKind::ResponseParseFailure
            | ErrorKind::EmptyResponse => StatusCode::BAD_GATEWAY,
        }
    }
}

impl ErrorKind {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::MissingCredentials => "MISSING_CREDENTIALS",
            ErrorKind::InvalidPost => "INVALID_POST",
            ErrorKind::TransportFailure => "TRANSPORT_FAILURE",
            ErrorKind::UpstreamRejected => "UPSTREAM_REJECTED",
            ErrorKind::ResponseParseFailure => "RESPONSE_PARSE_FAILURE",
            ErrorKind::EmptyResponse => "EMPTY_RESPONSE",
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PostError>;
