//! Data models for Navidrome (Subsonic API) responses

use crate::error::{NavidromeError, Result};
use hrrecipe::{PlaylistChoice, PlaylistInfo};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A Navidrome playlist, as returned by `getPlaylists`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub song_count: Option<u32>,
    /// Total duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,
}

impl Playlist {
    /// Reference stored in a songs block
    ///
    /// Playlists without cover art fall back to their own id, which
    /// Navidrome also accepts in `getCoverArt`.
    pub fn to_playlist_info(&self) -> PlaylistInfo {
        PlaylistInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            cover_art: self.cover_art.clone().unwrap_or_else(|| self.id.clone()),
        }
    }

    /// Entry of the songs form playlist picker; a missing count shows as 0
    pub fn to_playlist_choice(&self) -> PlaylistChoice {
        PlaylistChoice {
            playlist: self.to_playlist_info(),
            song_count: self.song_count.unwrap_or(0),
        }
    }
}

/// Raw cover art image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Top level `{"subsonic-response": {...}}` envelope
#[derive(Debug, Deserialize)]
pub(crate) struct SubsonicEnvelope {
    #[serde(rename = "subsonic-response")]
    pub response: Option<SubsonicResponse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubsonicResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<SubsonicError>,
    #[serde(default)]
    pub playlists: Option<PlaylistsNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubsonicError {
    pub code: u32,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlaylistsNode {
    #[serde(default)]
    pub playlist: Vec<Playlist>,
}

impl SubsonicEnvelope {
    /// Payload of the envelope, or the error it reports
    pub(crate) fn into_result(self, http_status: u16) -> Result<Option<SubsonicResponse>> {
        match self.response {
            Some(response) if response.status.as_deref() == Some("failed") => {
                let (code, message) = response
                    .error
                    .map(|e| (e.code, e.message))
                    .unwrap_or((0, "unknown error".to_string()));
                Err(NavidromeError::from_subsonic(http_status, code, message))
            }
            other => Ok(other),
        }
    }
}
