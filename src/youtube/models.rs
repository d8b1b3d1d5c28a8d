//! YouTube Data API v3 search models and the normalized video record.
//!
//! Every nested API object is optional so that partial responses still
//! produce fully populated records.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Normalized description of one video.
///
/// Every field is always a defined string; missing upstream values become
/// empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoRecord {
    /// YouTube video ID
    #[serde(rename = "videoId")]
    pub video_id: String,
    /// Published date as sent by the API (ISO 8601)
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    /// Video title
    pub title: String,
    /// Video description
    pub description: String,
    /// URL of the `default` thumbnail
    #[serde(rename = "smallThumbnailURL")]
    pub small_thumbnail_url: String,
    /// URL of the `medium` thumbnail
    #[serde(rename = "mediumThumbnailURL")]
    pub medium_thumbnail_url: String,
    /// Channel title
    #[serde(rename = "channelName")]
    pub channel_name: String,
    /// Channel ID
    #[serde(rename = "channelId")]
    pub channel_id: String,
}

impl VideoRecord {
    /// Build the watch page URL for this video.
    ///
    /// # Returns
    /// * `Option<String>` - Watch URL, or `None` when the video ID is empty
    pub fn watch_url(&self) -> Option<String> {
        if self.video_id.is_empty() {
            None
        } else {
            Some(format!("https://www.youtube.com/watch?v={}", self.video_id))
        }
    }
}

/// Body of a search.list response (or the static default videos file).
#[derive(Debug, Default, Deserialize)]
pub struct ApiSearchResponse {
    /// Response items
    #[serde(default)]
    pub items: Option<Vec<ApiSearchItem>>,
}

/// Single search result.
///
/// The item itself must be an object. Below it, a node of the wrong type is
/// treated as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ApiSearchItem {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<ApiSearchItemId>,
    #[serde(default, deserialize_with = "lenient")]
    pub snippet: Option<ApiSnippet>,
}

/// Resource ID of a search result.
#[derive(Debug, Default, Deserialize)]
pub struct ApiSearchItemId {
    #[serde(rename = "videoId", default, deserialize_with = "lenient")]
    pub video_id: Option<String>,
}

/// Video snippet from API response.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiSnippet {
    #[serde(rename = "publishedAt", deserialize_with = "lenient")]
    pub published_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub thumbnails: Option<ApiThumbnails>,
    #[serde(rename = "channelTitle", deserialize_with = "lenient")]
    pub channel_title: Option<String>,
    #[serde(rename = "channelId", deserialize_with = "lenient")]
    pub channel_id: Option<String>,
}

/// Thumbnail information.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiThumbnails {
    #[serde(deserialize_with = "lenient")]
    pub default: Option<ApiThumbnail>,
    #[serde(deserialize_with = "lenient")]
    pub medium: Option<ApiThumbnail>,
}

/// Single thumbnail.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiThumbnail {
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
}

/// Deserialize any JSON value, keeping it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

impl ApiSearchResponse {
    /// Convert all items into records, preserving API order.
    pub fn into_records(self) -> Vec<VideoRecord> {
        self.items
            .unwrap_or_default()
            .into_iter()
            .map(VideoRecord::from)
            .collect()
    }
}

impl From<ApiSearchItem> for VideoRecord {
    /// Convert a search item to a record, defaulting every absent level.
    fn from(item: ApiSearchItem) -> Self {
        let video_id = item.id.and_then(|id| id.video_id).unwrap_or_default();
        let snippet = item.snippet.unwrap_or_default();
        let thumbnails = snippet.thumbnails.unwrap_or_default();

        Self {
            video_id,
            published_at: snippet.published_at.unwrap_or_default(),
            title: snippet.title.unwrap_or_default(),
            description: snippet.description.unwrap_or_default(),
            small_thumbnail_url: thumbnails
                .default
                .and_then(|t| t.url)
                .unwrap_or_default(),
            medium_thumbnail_url: thumbnails
                .medium
                .and_then(|t| t.url)
                .unwrap_or_default(),
            channel_name: snippet.channel_title.unwrap_or_default(),
            channel_id: snippet.channel_id.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<VideoRecord> {
        serde_json::from_str::<ApiSearchResponse>(json)
            .unwrap()
            .into_records()
    }

    #[test]
    fn test_full_item_maps_every_field() {
        let records = parse(
            r#"{
                "items": [{
                    "id": { "kind": "youtube#video", "videoId": "abc123" },
                    "snippet": {
                        "publishedAt": "2019-05-01T10:00:00Z",
                        "title": "Pasta",
                        "description": "How to cook pasta",
                        "thumbnails": {
                            "default": { "url": "https://i.ytimg.com/vi/abc123/default.jpg" },
                            "medium": { "url": "https://i.ytimg.com/vi/abc123/mqdefault.jpg" },
                            "high": { "url": "https://i.ytimg.com/vi/abc123/hqdefault.jpg" }
                        },
                        "channelTitle": "Kitchen",
                        "channelId": "UCkitchen"
                    }
                }]
            }"#,
        );

        assert_eq!(
            records,
            vec![VideoRecord {
                video_id: "abc123".to_string(),
                published_at: "2019-05-01T10:00:00Z".to_string(),
                title: "Pasta".to_string(),
                description: "How to cook pasta".to_string(),
                small_thumbnail_url: "https://i.ytimg.com/vi/abc123/default.jpg".to_string(),
                medium_thumbnail_url: "https://i.ytimg.com/vi/abc123/mqdefault.jpg".to_string(),
                channel_name: "Kitchen".to_string(),
                channel_id: "UCkitchen".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_nested_objects_default_to_empty() {
        let records = parse(
            r#"{
                "items": [
                    {},
                    { "id": null, "snippet": null },
                    { "id": {}, "snippet": { "thumbnails": {} } },
                    { "snippet": { "thumbnails": { "default": null, "medium": {} } } }
                ]
            }"#,
        );

        assert_eq!(records.len(), 4);
        for record in records {
            assert_eq!(record, VideoRecord::default());
        }
    }

    #[test]
    fn test_wrongly_typed_nodes_default_to_empty() {
        let records = parse(
            r#"{
                "items": [
                    { "id": "abc", "snippet": { "title": "Pasta" } },
                    { "id": { "videoId": 42 }, "snippet": "none" },
                    { "id": { "videoId": "ok" }, "snippet": {
                        "title": ["not", "a", "string"],
                        "channelTitle": "Kitchen",
                        "thumbnails": "none"
                    } },
                    { "snippet": { "thumbnails": { "default": "x", "medium": { "url": 7 } } } }
                ]
            }"#,
        );

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].video_id, "");
        assert_eq!(records[0].title, "Pasta");
        assert_eq!(records[1], VideoRecord::default());
        assert_eq!(records[2].video_id, "ok");
        assert_eq!(records[2].title, "");
        assert_eq!(records[2].channel_name, "Kitchen");
        assert_eq!(records[2].small_thumbnail_url, "");
        assert_eq!(records[3], VideoRecord::default());
    }

    #[test]
    fn test_malformed_item_containers_are_rejected() {
        for json in [
            r#"{"items": [null]}"#,
            r#"{"items": ["abc"]}"#,
            r#"{"items": "abc"}"#,
            r#"{"items": {"id": {"videoId": "abc"}}}"#,
        ] {
            assert!(
                serde_json::from_str::<ApiSearchResponse>(json).is_err(),
                "accepted {json}"
            );
        }
    }

    #[test]
    fn test_missing_thumbnails_keeps_other_fields() {
        let records = parse(
            r#"{"items": [{"id": {"videoId": "abc123"}, "snippet": {"title": "Pasta"}}]}"#,
        );

        assert_eq!(records[0].video_id, "abc123");
        assert_eq!(records[0].title, "Pasta");
        assert_eq!(records[0].small_thumbnail_url, "");
        assert_eq!(records[0].medium_thumbnail_url, "");
        assert_eq!(records[0].channel_name, "");
    }

    #[test]
    fn test_missing_or_null_items_is_empty() {
        assert!(parse("{}").is_empty());
        assert!(parse(r#"{"items": null}"#).is_empty());
        assert!(parse(r#"{"items": []}"#).is_empty());
    }

    #[test]
    fn test_record_serializes_with_camel_case_names() {
        let record = VideoRecord {
            video_id: "abc123".to_string(),
            ..VideoRecord::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "videoId",
            "publishedAt",
            "title",
            "description",
            "smallThumbnailURL",
            "mediumThumbnailURL",
            "channelName",
            "channelId",
        ] {
            assert!(object[key].is_string(), "missing string field {key}");
        }
        assert_eq!(object.len(), 8);
    }

    #[test]
    fn test_watch_url() {
        let record = VideoRecord {
            video_id: "abc123".to_string(),
            ..VideoRecord::default()
        };
        assert_eq!(
            record.watch_url().as_deref(),
            Some("https://www.youtube.com/watch?v=abc123")
        );
        assert_eq!(VideoRecord::default().watch_url(), None);
    }
}
