//! Block editor
//!
//! The [`Editor`] holds a mutable draft of one block and reports, after each
//! change, either the complete [`RecipeItem`] the draft describes or `None`
//! when the draft is incomplete. Callers can only ever save a value coming
//! from that report, so an incomplete draft cannot reach the recipe list.

use crate::error::{Error, Result};
use crate::item::{
    BlockKind, CaddyBlock, CaddyStrategy, PlaylistChoice, PlaylistInfo, PodcastBlock, RadioBlock, RecipeItem,
    SongsBlock,
};
use tokio::sync::watch;
use tracing::debug;

/// What the editor is working on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubject {
    /// A new block of the given kind
    Add(BlockKind),
    /// An existing entry of the recipe list
    Edit { id: String, item: RecipeItem },
}

/// Identity of a subject: edits of the same entry share it, whatever the payload
#[derive(Debug, Clone, PartialEq, Eq)]
enum SubjectKey {
    Add(BlockKind),
    Edit(String),
}

impl FormSubject {
    pub fn kind(&self) -> BlockKind {
        match self {
            FormSubject::Add(kind) => *kind,
            FormSubject::Edit { item, .. } => item.kind(),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, FormSubject::Edit { .. })
    }

    fn key(&self) -> SubjectKey {
        match self {
            FormSubject::Add(kind) => SubjectKey::Add(*kind),
            FormSubject::Edit { id, .. } => SubjectKey::Edit(id.clone()),
        }
    }

    fn initial_draft(&self) -> Draft {
        match self {
            FormSubject::Add(kind) => Draft::defaults(*kind),
            FormSubject::Edit { item, .. } => Draft::from_item(item),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongsDraft {
    pub playlist: Option<PlaylistInfo>,
    pub n_songs: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PodcastDraft {
    pub podcast_name: String,
    pub backup_podcast_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RadioDraft {
    pub station_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaddyDraft {
    pub url: String,
    pub strategy: CaddyStrategy,
}

/// Block being edited, possibly incomplete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Songs(SongsDraft),
    Podcast(PodcastDraft),
    Radio(RadioDraft),
    Caddy(CaddyDraft),
}

/// One editable field of a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Playlist(Option<PlaylistInfo>),
    NSongs(u32),
    PodcastName(String),
    BackupPodcastName(String),
    StationName(String),
    Url(String),
    Strategy(CaddyStrategy),
}

impl DraftField {
    pub fn name(&self) -> &'static str {
        match self {
            DraftField::Playlist(_) => "playlist",
            DraftField::NSongs(_) => "n_songs",
            DraftField::PodcastName(_) => "podcast_name",
            DraftField::BackupPodcastName(_) => "backup_podcast_name",
            DraftField::StationName(_) => "station_name",
            DraftField::Url(_) => "url",
            DraftField::Strategy(_) => "strategy",
        }
    }
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

impl Draft {
    /// Draft of a new block: nothing selected, one song
    pub fn defaults(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Songs => Draft::Songs(SongsDraft {
                playlist: None,
                n_songs: 1,
            }),
            BlockKind::Podcast => Draft::Podcast(PodcastDraft::default()),
            BlockKind::Radio => Draft::Radio(RadioDraft::default()),
            BlockKind::Caddy => Draft::Caddy(CaddyDraft::default()),
        }
    }

    /// Draft prefilled from an existing block
    pub fn from_item(item: &RecipeItem) -> Self {
        match item {
            RecipeItem::Songs(block) => Draft::Songs(SongsDraft {
                playlist: Some(block.playlist.clone()),
                n_songs: block.n_songs,
            }),
            RecipeItem::Podcast(block) => Draft::Podcast(PodcastDraft {
                podcast_name: block.podcast_name.clone(),
                backup_podcast_name: block.backup_podcast_name.clone(),
            }),
            RecipeItem::Radio(block) => Draft::Radio(RadioDraft {
                station_name: block.station_name.clone(),
            }),
            RecipeItem::Caddy(block) => Draft::Caddy(CaddyDraft {
                url: block.url.clone(),
                strategy: block.strategy,
            }),
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Draft::Songs(_) => BlockKind::Songs,
            Draft::Podcast(_) => BlockKind::Podcast,
            Draft::Radio(_) => BlockKind::Radio,
            Draft::Caddy(_) => BlockKind::Caddy,
        }
    }

    /// The block this draft describes, or `None` if it is incomplete
    ///
    /// - songs: a playlist is selected and `n_songs >= 1`
    /// - podcast: the podcast name is filled (the backup is optional)
    /// - radio: the station name is filled
    /// - caddy: the URL is filled
    pub fn validate(&self) -> Option<RecipeItem> {
        match self {
            Draft::Songs(draft) => match &draft.playlist {
                Some(playlist) if draft.n_songs >= 1 => Some(RecipeItem::Songs(SongsBlock {
                    playlist: playlist.clone(),
                    n_songs: draft.n_songs,
                })),
                _ => None,
            },
            Draft::Podcast(draft) => filled(&draft.podcast_name).then(|| {
                RecipeItem::Podcast(PodcastBlock {
                    podcast_name: draft.podcast_name.clone(),
                    backup_podcast_name: draft.backup_podcast_name.clone(),
                })
            }),
            Draft::Radio(draft) => filled(&draft.station_name).then(|| {
                RecipeItem::Radio(RadioBlock {
                    station_name: draft.station_name.clone(),
                })
            }),
            Draft::Caddy(draft) => filled(&draft.url).then(|| {
                RecipeItem::Caddy(CaddyBlock {
                    url: draft.url.clone(),
                    strategy: draft.strategy,
                })
            }),
        }
    }

    /// Updates one field; fails if the field belongs to another kind of block
    pub fn set(&mut self, field: DraftField) -> Result<()> {
        match (self, field) {
            (Draft::Songs(d), DraftField::Playlist(playlist)) => d.playlist = playlist,
            (Draft::Songs(d), DraftField::NSongs(n)) => d.n_songs = n,
            (Draft::Podcast(d), DraftField::PodcastName(name)) => d.podcast_name = name,
            (Draft::Podcast(d), DraftField::BackupPodcastName(name)) => {
                d.backup_podcast_name = name
            }
            (Draft::Radio(d), DraftField::StationName(name)) => d.station_name = name,
            (Draft::Caddy(d), DraftField::Url(url)) => d.url = url,
            (Draft::Caddy(d), DraftField::Strategy(strategy)) => d.strategy = strategy,
            (draft, field) => {
                return Err(Error::FieldMismatch {
                    field: field.name(),
                    kind: draft.kind(),
                })
            }
        }
        Ok(())
    }
}

/// Parses the leading integer of a free text input, like a number field does
fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return None;
    }
    // Seul un dépassement peut faire échouer le parse : on sature
    let n = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * n)
}

/// Ticket returned when a playlist fetch starts
///
/// The result of the fetch is only applied if the editor has not been
/// reinitialized in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// Block editor
pub struct Editor {
    subject: FormSubject,
    draft: Draft,
    generation: u64,
    playlists: Option<Vec<PlaylistChoice>>,
    tx: watch::Sender<Option<RecipeItem>>,
}

impl Editor {
    pub fn new(subject: FormSubject) -> Self {
        let draft = subject.initial_draft();
        let (tx, _) = watch::channel(draft.validate());
        Self {
            subject,
            draft,
            generation: 0,
            playlists: None,
            tx,
        }
    }

    pub fn subject(&self) -> &FormSubject {
        &self.subject
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Header shown above the form, e.g. "Adding Navidrome Block"
    pub fn title(&self) -> String {
        let verb = if self.subject.is_edit() { "Editing" } else { "Adding" };
        format!("{} {} Block", verb, self.subject.kind().label())
    }

    /// The block the current draft describes, `None` while it is incomplete
    pub fn valid_item(&self) -> Option<RecipeItem> {
        self.draft.validate()
    }

    /// Receives the validity report published after every draft change
    pub fn subscribe(&self) -> watch::Receiver<Option<RecipeItem>> {
        self.tx.subscribe()
    }

    /// Current generation of the draft, bumped on every reinitialization
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn publish(&self) -> Option<RecipeItem> {
        let valid = self.draft.validate();
        self.tx.send_replace(valid.clone());
        valid
    }

    /// Updates one field of the draft and returns the new validity report
    pub fn set_field(&mut self, field: DraftField) -> Result<Option<RecipeItem>> {
        self.draft.set(field)?;
        Ok(self.publish())
    }

    pub fn select_playlist(&mut self, playlist: PlaylistInfo) -> Result<Option<RecipeItem>> {
        self.set_field(DraftField::Playlist(Some(playlist)))
    }

    fn songs_draft(&self) -> Result<&SongsDraft> {
        match &self.draft {
            Draft::Songs(draft) => Ok(draft),
            other => Err(Error::FieldMismatch {
                field: "n_songs",
                kind: other.kind(),
            }),
        }
    }

    /// Adds `delta` to the number of songs, never going below one
    pub fn step_songs(&mut self, delta: i64) -> Result<Option<RecipeItem>> {
        let current = i64::from(self.songs_draft()?.n_songs);
        let n = (current + delta).clamp(1, i64::from(u32::MAX)) as u32;
        self.set_field(DraftField::NSongs(n))
    }

    /// Sets the number of songs from free text; unparseable or < 1 becomes 1
    pub fn set_songs_from_input(&mut self, input: &str) -> Result<Option<RecipeItem>> {
        self.songs_draft()?;
        let n = match leading_integer(input) {
            Some(v) if v >= 1 => u32::try_from(v).unwrap_or(u32::MAX),
            _ => 1,
        };
        self.set_field(DraftField::NSongs(n))
    }

    /// Switches to another subject
    ///
    /// When the identity of the subject changes (other block kind to add,
    /// add to edit, other edited entry), the draft is rebuilt and unsaved
    /// edits are dropped. Returns whether the draft was rebuilt.
    pub fn reset_subject(&mut self, subject: FormSubject) -> bool {
        if subject.key() == self.subject.key() {
            self.subject = subject;
            return false;
        }

        debug!(from = ?self.subject.key(), to = ?subject.key(), "Editor subject changed, dropping draft");
        self.subject = subject;
        self.reset();
        true
    }

    /// Rebuilds the draft from the current subject
    pub fn reset(&mut self) {
        self.draft = self.subject.initial_draft();
        self.generation += 1;
        self.playlists = None;
        self.publish();
    }

    /// Marks the playlist list as loading and returns the ticket of the fetch
    pub fn begin_playlist_fetch(&mut self) -> FetchTicket {
        self.playlists = None;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Stores fetched playlists unless the editor moved on since the fetch started
    pub fn apply_playlists(&mut self, ticket: FetchTicket, playlists: Vec<PlaylistChoice>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Dropping stale playlist response"
            );
            return false;
        }
        self.playlists = Some(playlists);
        true
    }

    /// Playlists to choose from, `None` while loading
    pub fn playlists(&self) -> Option<&[PlaylistChoice]> {
        self.playlists.as_deref()
    }
}
