// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! ShareFrame Posting Service
//!
//! Accepts a feed post submission, checks it against the
//! `social.shareframe.feed.post` record rules and forwards it to the PDS as a
//! `com.atproto.repo.createRecord` call:
//!
//! - Credential presence check (bearer token and repository DID)
//! - Optional enrichment (source app stamp, story expiry)
//! - Post validation (type, text length, media presence and formats, datetimes)
//! - Record publishing with classified upstream failures

pub mod config;
pub mod enrich;
pub mod error;
pub mod handlers;
pub mod models;
pub mod publisher;
pub mod service;
pub mod validator;

pub use config::Config;
pub use error::{ErrorKind, PostError};
pub use models::{CreatePostRequest, Post, PostResponse};
pub use publisher::{FeedPublisher, PublishError, XrpcPublisher};
pub use service::PostingService;
pub use validator::{PostValidator, ValidationResult};
