//! Recipe blocks
//!
//! A recipe is made of four kinds of blocks. [`RecipeItem`] is a closed enum:
//! every `match` in this crate lists the four variants explicitly so that a
//! new kind of block cannot be forgotten anywhere it is dispatched on.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Reference to a Navidrome playlist, as stored in a songs block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistInfo {
    pub id: String,
    pub name: String,
    pub cover_art: String,
}

/// A playlist offered by the songs form, with its size for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistChoice {
    pub playlist: PlaylistInfo,
    pub song_count: u32,
}

impl PlaylistChoice {
    /// Name, then "`{song_count}` songs"
    pub fn lines(&self) -> ItemLines {
        ItemLines {
            title: self.playlist.name.clone(),
            subtitle: format!("{} songs", self.song_count),
        }
    }
}

/// Play `n_songs` songs picked from a Navidrome playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongsBlock {
    pub playlist: PlaylistInfo,
    pub n_songs: u32,
}

/// Play the latest episode of a podcast, falling back to a backup podcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcastBlock {
    pub podcast_name: String,
    pub backup_podcast_name: String,
}

/// Play a radio station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioBlock {
    pub station_name: String,
}

/// How a caddy block uses its URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaddyStrategy {
    /// Play the file at the URL
    #[default]
    File,
    /// Cycle through the files of the directory at the URL
    Cycle,
}

/// Play a static audio file served by Caddy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaddyBlock {
    pub url: String,
    pub strategy: CaddyStrategy,
}

/// One block of a recipe, tagged by `type` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecipeItem {
    Songs(SongsBlock),
    Podcast(PodcastBlock),
    Radio(RadioBlock),
    Caddy(CaddyBlock),
}

/// Payload-free discriminant of a [`RecipeItem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Songs,
    Podcast,
    Radio,
    Caddy,
}

impl BlockKind {
    pub const ALL: [BlockKind; 4] = [
        BlockKind::Songs,
        BlockKind::Podcast,
        BlockKind::Radio,
        BlockKind::Caddy,
    ];

    /// Wire name, as used in the `type` tag
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Songs => "songs",
            BlockKind::Podcast => "podcast",
            BlockKind::Radio => "radio",
            BlockKind::Caddy => "caddy",
        }
    }

    /// Human readable label shown in block headers
    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::Songs => "Navidrome",
            BlockKind::Podcast => "Podcast",
            BlockKind::Radio => "Radio",
            BlockKind::Caddy => "Caddy File",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two display lines of a block in the recipe list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLines {
    pub title: String,
    pub subtitle: String,
}

impl RecipeItem {
    pub fn kind(&self) -> BlockKind {
        match self {
            RecipeItem::Songs(_) => BlockKind::Songs,
            RecipeItem::Podcast(_) => BlockKind::Podcast,
            RecipeItem::Radio(_) => BlockKind::Radio,
            RecipeItem::Caddy(_) => BlockKind::Caddy,
        }
    }

    /// Title and subtitle of the block in the recipe list
    pub fn lines(&self) -> ItemLines {
        match self {
            RecipeItem::Songs(block) => ItemLines {
                title: block.playlist.name.clone(),
                subtitle: format!("{} songs", block.n_songs),
            },
            RecipeItem::Podcast(block) => ItemLines {
                title: block.podcast_name.clone(),
                subtitle: block.backup_podcast_name.clone(),
            },
            RecipeItem::Radio(block) => ItemLines {
                title: block.station_name.clone(),
                subtitle: String::new(),
            },
            RecipeItem::Caddy(block) => {
                let title = match block.strategy {
                    CaddyStrategy::File => "Play File",
                    CaddyStrategy::Cycle => "Cycle Directory",
                };
                let file_name = match block.url.rsplit('/').next() {
                    Some(last) if !last.is_empty() => last.to_string(),
                    _ => block.url.clone(),
                };
                ItemLines {
                    title: title.to_string(),
                    subtitle: file_name,
                }
            }
        }
    }
}

/// A recipe item paired with its stable identifier
///
/// The identifier is assigned once by [`IdentifiedItem::new`] and follows the
/// item through reorders and updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifiedItem {
    pub id: String,
    pub item: RecipeItem,
}

impl IdentifiedItem {
    /// Pairs `item` with a fresh random (UUID v4) identifier
    pub fn new(item: RecipeItem) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            item,
        }
    }
}
