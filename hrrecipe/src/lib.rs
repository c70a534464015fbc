//! Recipe model for HomeRadio
//!
//! A recipe is an ordered list of blocks describing how to generate a
//! playlist: songs picked from a Navidrome playlist, a podcast episode, a
//! radio station or a static file served by Caddy.
//!
//! # Components
//!
//! - [`item`]: the block types and their stable identifiers
//! - [`list`]: the recipe being edited, with reordering and change tracking
//! - [`editor`]: the per-block form draft and its validity report
//!
//! # Example
//!
//! ```
//! use hrrecipe::{BlockKind, Baseline, DraftField, Editor, FormSubject, RecipeList};
//!
//! let mut list = RecipeList::from_baseline(Baseline::default());
//!
//! let mut editor = Editor::new(FormSubject::Add(BlockKind::Radio));
//! let item = editor
//!     .set_field(DraftField::StationName("FIP".into()))?
//!     .expect("station name is filled");
//!
//! list.add(item);
//! assert!(list.is_changed());
//!
//! let baseline = list.save();
//! assert!(!list.has_changes(&baseline));
//! # Ok::<(), hrrecipe::Error>(())
//! ```

pub mod editor;
pub mod error;
pub mod item;
pub mod list;

// Re-exports
pub use editor::{
    CaddyDraft, Draft, DraftField, Editor, FetchTicket, FormSubject, PodcastDraft, RadioDraft,
    SongsDraft,
};
pub use error::{Error, Result};
pub use item::{
    BlockKind, CaddyBlock, CaddyStrategy, IdentifiedItem, ItemLines, PlaylistChoice, PlaylistInfo,
    PodcastBlock,
    RadioBlock, RecipeItem, SongsBlock,
};
pub use list::{same_recipe, Baseline, RecipeList};
