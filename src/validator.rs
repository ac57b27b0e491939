// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Feed post validator.
//!
//! Rules are checked in a fixed order and the first failure is reported:
//! - Type identifier must be `social.shareframe.feed.post`
//! - Text length (Unicode scalar values, not bytes)
//! - Media presence (configurable)
//! - Image and video extensions
//! - `createdAt` and, when present, `expiresAt` as RFC 3339 date-times

use crate::config::ValidationConfig;
use crate::models::{Post, FEED_POST_NSID};
use chrono::{DateTime, FixedOffset};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "heic", "heif"];
pub const ALLOWED_VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm"];

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid NSID {nsid:?}: only social.shareframe.feed.post is allowed")]
    InvalidType { nsid: String },

    #[error("post text must be {max} characters or fewer, got {length}")]
    TextTooLong { length: usize, max: usize },

    #[error("at least one image or video is required")]
    MissingMedia,

    #[error("invalid image format: {extension:?} (only jpg, jpeg, png, gif, heic, heif allowed)")]
    InvalidImageFormat { uri: String, extension: String },

    #[error("invalid video format: {extension:?} (only mp4, mov, webm allowed)")]
    InvalidVideoFormat { uri: String, extension: String },

    #[error("invalid datetime format for {field}: {value:?}")]
    InvalidDatetime { field: &'static str, value: String },
}

impl ValidationError {
    /// Wire name of the post field the rule applies to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidType { .. } => "nsid",
            ValidationError::TextTooLong { .. } => "text",
            ValidationError::MissingMedia => "imageUris",
            ValidationError::InvalidImageFormat { .. } => "imageUris",
            ValidationError::InvalidVideoFormat { .. } => "videoUris",
            ValidationError::InvalidDatetime { field, .. } => *field,
        }
    }
}

/// Result of validation.
#[derive(Debug, Clone)]
pub enum ValidationResult {
    /// Post is valid
    Valid,
    /// Post is invalid
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(e) => Some(e),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(e) => Err(e),
        }
    }
}

/// Feed post validator.
#[derive(Debug, Clone)]
pub struct PostValidator {
    config: ValidationConfig,
}

impl PostValidator {
    /// Create a new validator with the given configuration.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a complete post.
    pub fn validate(&self, post: &Post) -> ValidationResult {
        match self.check(post) {
            Ok(()) => {
                debug!(nsid = %post.nsid, "Post valid");
                ValidationResult::Valid
            }
            Err(err) => {
                debug!(field = err.field(), error = %err, "Post invalid");
                ValidationResult::Invalid(err)
            }
        }
    }

    fn check(&self, post: &Post) -> Result<(), ValidationError> {
        if post.nsid != FEED_POST_NSID {
            return Err(ValidationError::InvalidType {
                nsid: post.nsid.clone(),
            });
        }

        let length = post.text.chars().count();
        if length > self.config.max_text_chars {
            return Err(ValidationError::TextTooLong {
                length,
                max: self.config.max_text_chars,
            });
        }

        if self.config.require_media && !post.has_media() {
            return Err(ValidationError::MissingMedia);
        }

        for uri in &post.image_uris {
            let extension = extension_of(uri);
            if !is_allowed(&extension, ALLOWED_IMAGE_EXTENSIONS) {
                return Err(ValidationError::InvalidImageFormat {
                    uri: uri.clone(),
                    extension,
                });
            }
        }

        for uri in &post.video_uris {
            let extension = extension_of(uri);
            if !is_allowed(&extension, ALLOWED_VIDEO_EXTENSIONS) {
                return Err(ValidationError::InvalidVideoFormat {
                    uri: uri.clone(),
                    extension,
                });
            }
        }

        validate_datetime("createdAt", &post.created_at)?;
        if let Some(expires_at) = post.expiry() {
            validate_datetime("expiresAt", expires_at)?;
        }

        Ok(())
    }
}

fn validate_datetime(field: &'static str, value: &str) -> Result<(), ValidationError> {
    parse_timestamp(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::InvalidDatetime {
            field,
            value: value.to_string(),
        })
}

/// Parse a strict RFC 3339 date-time.
///
/// Requires an uppercase `T` separator and an uppercase `Z` designator;
/// the space and lowercase spellings `parse_from_rfc3339` tolerates are refused.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    if value.as_bytes().get(10) != Some(&b'T') || value.ends_with('z') {
        return None;
    }
    DateTime::parse_from_rfc3339(value).ok()
}

/// Extension of the last path segment, without the dot.
///
/// Query strings and fragments are ignored. Returns an empty string when the
/// segment has no period.
fn extension_of(uri: &str) -> String {
    let segment = match Url::parse(uri) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.last())
            .unwrap_or_default()
            .to_string(),
        Err(_) => {
            let path = uri.split(|c: char| c == '?' || c == '#').next().unwrap_or(uri);
            path.rsplit('/').next().unwrap_or(path).to_string()
        }
    };

    segment
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_string())
        .unwrap_or_default()
}

fn is_allowed(extension: &str, allowed: &[&str]) -> bool {
    !extension.is_empty()
        && allowed
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(extension))
}
