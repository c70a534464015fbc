//! Data models for iTunes Search API responses

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A podcast found in the iTunes catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Podcast {
    pub collection_id: u64,
    #[serde(default)]
    pub collection_name: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub artwork_url100: String,
    /// Absent for some catalog entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,
}

/// Raw search response; results are decoded one by one
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

impl SearchResponse {
    /// Decodes the results, skipping the entries that are not podcasts
    pub(crate) fn into_podcasts(self) -> Vec<Podcast> {
        self.results
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Podcast>(value) {
                Ok(podcast) => Some(podcast),
                Err(e) => {
                    tracing::warn!("Skipping iTunes result: {}", e);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_podcast_parsing_ignores_extra_fields() {
        let podcast: Podcast = serde_json::from_value(json!({
            "wrapperType": "track",
            "kind": "podcast",
            "collectionId": 1200361736,
            "collectionName": "The Daily",
            "artistName": "The New York Times",
            "artworkUrl100": "https://is1-ssl.mzstatic.com/100x100bb.jpg",
            "feedUrl": "https://feeds.simplecast.com/54nAGcIl",
            "trackCount": 2500
        }))
        .unwrap();

        assert_eq!(podcast.collection_id, 1200361736);
        assert_eq!(podcast.collection_name, "The Daily");
        assert_eq!(
            podcast.feed_url.as_deref(),
            Some("https://feeds.simplecast.com/54nAGcIl")
        );
    }

    #[test]
    fn test_partial_results_are_kept_or_skipped() {
        let response: SearchResponse = serde_json::from_value(json!({
            "resultCount": 3,
            "results": [
                {"collectionId": 1, "collectionName": "Complete", "artistName": "Host"},
                {"collectionId": 2, "collectionName": "No Artist"},
                {"collectionName": "No Id", "artistName": "Nobody"}
            ]
        }))
        .unwrap();

        let podcasts = response.into_podcasts();
        assert_eq!(podcasts.len(), 2);
        assert_eq!(podcasts[1].collection_name, "No Artist");
        assert_eq!(podcasts[1].artist_name, "");
        assert_eq!(podcasts[1].artwork_url100, "");
    }

    #[test]
    fn test_podcast_serializes_with_upstream_names() {
        let podcast = Podcast {
            collection_id: 1,
            collection_name: "Show".into(),
            artist_name: "Host".into(),
            artwork_url100: "https://example.com/a.jpg".into(),
            feed_url: None,
        };
        assert_eq!(
            serde_json::to_value(&podcast).unwrap(),
            json!({
                "collectionId": 1,
                "collectionName": "Show",
                "artistName": "Host",
                "artworkUrl100": "https://example.com/a.jpg"
            })
        );
    }
}
