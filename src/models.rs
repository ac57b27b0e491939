// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Wire types for feed posts and the `createRecord` exchange.

use crate::error::PostError;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Type identifier every feed post record must carry.
pub const FEED_POST_NSID: &str = "social.shareframe.feed.post";

/// A `social.shareframe.feed.post` record.
///
/// `nsid` and `createdAt` default to empty strings when absent so that the
/// validator, not the decoder, reports them. Empty optional fields are left
/// out of the upstream record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_uris: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub video_uris: Vec<String>,

    #[serde(default)]
    pub created_at: String,

    // Engagement counters
    #[serde(default, skip_serializing_if = "is_zero")]
    pub likes: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub shares: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub comments: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rewatches: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub saves: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub watch_time: u64,

    // Location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geohash: Option<String>,

    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub trending_score: f64,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_story: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_of: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_handle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edit_history: Vec<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_app: Option<String>,

    #[serde(default)]
    pub nsid: String,
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

fn is_zero_f64(n: &f64) -> bool {
    *n == 0.0
}

impl Post {
    /// The explicit expiry, treating an empty string as absent.
    pub fn expiry(&self) -> Option<&str> {
        self.expires_at.as_deref().filter(|s| !s.is_empty())
    }

    /// Whether the post references at least one image or video.
    pub fn has_media(&self) -> bool {
        !self.image_uris.is_empty() || !self.video_uris.is_empty()
    }
}

/// A post submission: the record plus the credentials it is published with.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    /// Bearer token forwarded verbatim to the PDS
    #[serde(default)]
    pub auth_token: String,

    /// Repository DID the record is created in
    #[serde(default)]
    pub did: String,

    #[serde(default)]
    pub post: Post,
}

impl fmt::Debug for CreatePostRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatePostRequest")
            .field("auth_token", &"<redacted>")
            .field("did", &self.did)
            .field("post", &self.post)
            .finish()
    }
}

impl CreatePostRequest {
    /// Decode an invocation body.
    ///
    /// Accepts the request object itself, the flat client submission
    /// `{authToken, did, text, imageUris, videoUris}`, or either one wrapped in
    /// a gateway envelope of the form `{"body": "<request JSON>"}`.
    pub fn from_invocation(raw: &[u8]) -> Result<Self, PostError> {
        let value: Value = serde_json::from_slice(raw).map_err(invalid_input)?;

        if let Some(body) = value.get("body").and_then(Value::as_str) {
            let inner: Value = serde_json::from_str(body).map_err(invalid_input)?;
            return Self::from_value(inner);
        }

        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self, PostError> {
        if value.is_object() && value.get("post").is_none() {
            let submission: ClientSubmission =
                serde_json::from_value(value).map_err(invalid_input)?;
            return Ok(submission.into_request());
        }

        serde_json::from_value(value).map_err(invalid_input)
    }
}

/// Flat post submission sent by ShareFrame clients.
///
/// The server owns `nsid` and `createdAt` for this shape.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientSubmission {
    #[serde(default)]
    auth_token: String,
    #[serde(default)]
    did: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    image_uris: Vec<String>,
    #[serde(default)]
    video_uris: Vec<String>,
}

impl ClientSubmission {
    fn into_request(self) -> CreatePostRequest {
        CreatePostRequest {
            auth_token: self.auth_token,
            did: self.did,
            post: Post {
                nsid: FEED_POST_NSID.to_string(),
                text: self.text,
                image_uris: self.image_uris,
                video_uris: self.video_uris,
                created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                ..Default::default()
            },
        }
    }
}

fn invalid_input(err: serde_json::Error) -> PostError {
    PostError::InvalidInput(err.to_string())
}

/// Body of the `com.atproto.repo.createRecord` call.
#[derive(Debug, Serialize)]
pub struct CreateRecordRequest<'a> {
    pub repo: &'a str,
    pub collection: &'a str,
    pub record: &'a Post,
}

/// Successful `createRecord` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub uri: String,
    pub cid: String,
    pub commit: Commit,
    #[serde(default)]
    pub validation_status: String,
}

/// Repository commit produced by the write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub cid: String,
    pub rev: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_omits_empty_fields() {
        let post = Post {
            nsid: FEED_POST_NSID.to_string(),
            text: "Hello World!".to_string(),
            image_uris: vec!["https://x/y.jpg".to_string()],
            created_at: "2024-01-01T00:00:00Z".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(
            value,
            json!({
                "text": "Hello World!",
                "imageUris": ["https://x/y.jpg"],
                "createdAt": "2024-01-01T00:00:00Z",
                "nsid": "social.shareframe.feed.post"
            })
        );
    }

    #[test]
    fn test_post_decodes_camel_case_extras() {
        let post: Post = serde_json::from_value(json!({
            "nsid": FEED_POST_NSID,
            "createdAt": "2024-01-01T00:00:00Z",
            "isStory": true,
            "watchTime": 42,
            "authorHandle": "alice.shareframe.social",
            "imageMetadata": {"width": 1080}
        }))
        .unwrap();

        assert!(post.is_story);
        assert_eq!(post.watch_time, 42);
        assert_eq!(post.author_handle.as_deref(), Some("alice.shareframe.social"));
        assert_eq!(post.image_metadata.as_ref().unwrap()["width"], 1080);
        assert!(post.expiry().is_none());
    }

    #[test]
    fn test_empty_expiry_is_absent() {
        let post = Post {
            expires_at: Some(String::new()),
            ..Default::default()
        };
        assert!(post.expiry().is_none());
    }

    #[test]
    fn test_create_record_request_shape() {
        let post = Post {
            nsid: FEED_POST_NSID.to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            ..Default::default()
        };
        let request = CreateRecordRequest {
            repo: "did:example:123",
            collection: FEED_POST_NSID,
            record: &post,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["repo"], "did:example:123");
        assert_eq!(value["collection"], "social.shareframe.feed.post");
        assert_eq!(value["record"]["nsid"], "social.shareframe.feed.post");
    }

    #[test]
    fn test_post_response_matches_field_by_field() {
        let body = r#"{"uri":"at://did:example:123/social.shareframe.feed.post/xyz","cid":"bafyre123456","commit":{"cid":"commit123","rev":"rev123"},"validationStatus":"unknown"}"#;
        let parsed: PostResponse = serde_json::from_str(body).unwrap();

        assert_eq!(
            parsed,
            PostResponse {
                uri: "at://did:example:123/social.shareframe.feed.post/xyz".to_string(),
                cid: "bafyre123456".to_string(),
                commit: Commit {
                    cid: "commit123".to_string(),
                    rev: "rev123".to_string(),
                },
                validation_status: "unknown".to_string(),
            }
        );
    }

    #[test]
    fn test_post_response_requires_commit() {
        let body = r#"{"uri":"at://x","cid":"bafy"}"#;
        assert!(serde_json::from_str::<PostResponse>(body).is_err());
    }

    #[test]
    fn test_invocation_direct() {
        let raw = br#"{"authToken":"tok","did":"did:example:123","post":{"nsid":"social.shareframe.feed.post","text":"hi"}}"#;
        let request = CreatePostRequest::from_invocation(raw).unwrap();
        assert_eq!(request.auth_token, "tok");
        assert_eq!(request.did, "did:example:123");
        assert_eq!(request.post.text, "hi");
        assert_eq!(request.post.created_at, "");
    }

    #[test]
    fn test_invocation_envelope() {
        let inner = json!({"authToken": "tok", "did": "did:example:123", "post": {"text": "hi"}});
        let raw = serde_json::to_vec(&json!({"body": inner.to_string()})).unwrap();

        let request = CreatePostRequest::from_invocation(&raw).unwrap();
        assert_eq!(request.auth_token, "tok");
        assert_eq!(request.post.text, "hi");
        assert_eq!(request.post.nsid, "");
    }

    #[test]
    fn test_invocation_flat_submission_stamped() {
        let raw = br#"{"authToken":"tok","did":"did:example:123","text":"hi","imageUris":["https://x/y.jpg"]}"#;
        let request = CreatePostRequest::from_invocation(raw).unwrap();

        assert_eq!(request.auth_token, "tok");
        assert_eq!(request.did, "did:example:123");
        assert_eq!(request.post.nsid, FEED_POST_NSID);
        assert_eq!(request.post.text, "hi");
        assert_eq!(request.post.image_uris, vec!["https://x/y.jpg".to_string()]);
        assert!(request.post.video_uris.is_empty());

        let created_at = chrono::DateTime::parse_from_rfc3339(&request.post.created_at).unwrap();
        assert!(request.post.created_at.ends_with('Z'));
        assert!((Utc::now() - created_at.with_timezone(&Utc)).num_seconds().abs() < 60);
    }

    #[test]
    fn test_invocation_flat_submission_in_envelope() {
        let inner = json!({"authToken": "tok", "did": "did:example:123", "videoUris": ["https://x/v.mp4"]});
        let raw = serde_json::to_vec(&json!({"body": inner.to_string()})).unwrap();

        let request = CreatePostRequest::from_invocation(&raw).unwrap();
        assert_eq!(request.post.nsid, FEED_POST_NSID);
        assert_eq!(request.post.video_uris, vec!["https://x/v.mp4".to_string()]);
        assert!(!request.post.created_at.is_empty());
    }

    #[test]
    fn test_invocation_rejects_garbage() {
        assert!(matches!(
            CreatePostRequest::from_invocation(b"{not json"),
            Err(PostError::InvalidInput(_))
        ));
        assert!(matches!(
            CreatePostRequest::from_invocation(br#"{"body": "[1, 2"}"#),
            Err(PostError::InvalidInput(_))
        ));
        assert!(matches!(
            CreatePostRequest::from_invocation(b"42"),
            Err(PostError::InvalidInput(_))
        ));
        assert!(matches!(
            CreatePostRequest::from_invocation(br#"{"authToken":"tok","imageUris":"nope"}"#),
            Err(PostError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let request = CreatePostRequest {
            auth_token: "secret-token".to_string(),
            did: "did:example:123".to_string(),
            post: Post::default(),
        };
        let debug = format!("{:?}", request);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("did:example:123"));
    }
}
