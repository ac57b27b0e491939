// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test data generators for validation sweeps.

use posting_service::models::{Post, FEED_POST_NSID};

/// A post that passes every rule under the default configuration.
pub fn valid_post() -> Post {
    Post {
        nsid: FEED_POST_NSID.to_string(),
        text: "Hello World!".to_string(),
        image_uris: vec!["https://x/y.jpg".to_string()],
        created_at: "2024-01-01T00:00:00Z".to_string(),
        ..Default::default()
    }
}

/// Type identifiers that must all be rejected.
pub fn generate_wrong_nsids() -> Vec<&'static str> {
    vec![
        "",
        " ",
        "social.shareframe.feed",
        "social.shareframe.feed.post ",
        " social.shareframe.feed.post",
        "SOCIAL.SHAREFRAME.FEED.POST",
        "social.shareframe.feed.post.extra",
        "app.bsky.feed.post",
        "social.shareframe.feed.like",
    ]
}

/// Post bodies longer than 300 characters, ASCII and multi-byte.
pub fn generate_long_texts() -> Vec<String> {
    vec![
        "a".repeat(301),
        "a".repeat(1000),
        "é".repeat(301),
        "語".repeat(301),
        "🦀".repeat(301),
        format!("{}{}", "x".repeat(300), "!"),
    ]
}

/// Post bodies at or under 300 characters that exceed 300 bytes.
pub fn generate_multibyte_texts_within_limit() -> Vec<String> {
    vec!["é".repeat(300), "語".repeat(300), "🦀".repeat(150), "語".repeat(200)]
}

/// Image URIs with rejected extensions, paired with the extension the error must name.
pub fn generate_bad_image_uris() -> Vec<(String, &'static str)> {
    ["pdf", "PDF", "bmp", "tiff", "webp", "svg", "mp4", "jpg2", "txt"]
        .iter()
        .enumerate()
        .map(|(i, ext)| (format!("https://cdn-{}.example.com/media/photo-{}.{}", i, i, ext), *ext))
        .collect()
}

/// Image URIs with accepted extensions in mixed case.
pub fn generate_good_image_uris() -> Vec<String> {
    ["jpg", "JPG", "jpeg", "Jpeg", "png", "PNG", "gif", "heic", "HEIC", "heif"]
        .iter()
        .map(|ext| format!("https://cdn.example.com/media/photo.{}", ext))
        .collect()
}

/// Video URIs with rejected extensions.
pub fn generate_bad_video_uris() -> Vec<(String, &'static str)> {
    ["avi", "mkv", "flv", "wmv", "gif", "MP3"]
        .iter()
        .map(|ext| (format!("https://cdn.example.com/media/clip.{}", ext), *ext))
        .collect()
}

/// Strings that are not RFC 3339 date-times with an offset.
pub fn generate_bad_datetimes() -> Vec<&'static str> {
    vec![
        "",
        "invalid-date",
        "2024-01-01",
        "2024-01-01T00:00:00",
        "2024-13-01T00:00:00Z",
        "2024-01-32T00:00:00Z",
        "01/01/2024",
        "1704067200",
        "2024-01-01T25:00:00Z",
        "2024-01-01 00:00:00Z",
        "2024-01-01t00:00:00Z",
        "2024-01-01T00:00:00z",
        "2024-01-01 00:00:00+02:00",
    ]
}

/// Accepted date-time spellings.
pub fn generate_good_datetimes() -> Vec<&'static str> {
    vec![
        "2024-01-01T00:00:00Z",
        "2024-01-01T00:00:00+00:00",
        "2024-06-30T23:59:59-07:00",
        "2024-02-29T12:00:00.123Z",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_image_uris_end_with_extension() {
        for (uri, ext) in generate_bad_image_uris() {
            assert!(uri.ends_with(&format!(".{}", ext)));
        }
    }

    #[test]
    fn test_long_texts_exceed_limit() {
        for text in generate_long_texts() {
            assert!(text.chars().count() > 300);
        }
    }

    #[test]
    fn test_multibyte_texts_exceed_bytes_only() {
        for text in generate_multibyte_texts_within_limit() {
            assert!(text.chars().count() <= 300);
            assert!(text.len() > 300);
        }
    }
}
