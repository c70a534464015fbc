//! Ordered recipe list with change tracking
//!
//! [`RecipeList`] owns the blocks of the recipe being edited. Every mutation
//! recomputes the `changed` flag against the [`Baseline`] the list was loaded
//! from (or last saved to).

use crate::error::{Error, Result};
use crate::item::{IdentifiedItem, RecipeItem};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Snapshot of a recipe taken at load or save time
///
/// Identifiers are unique within a baseline; deserialization rejects
/// duplicates as [`Baseline::new`] does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<IdentifiedItem>", into = "Vec<IdentifiedItem>")]
pub struct Baseline {
    items: Vec<IdentifiedItem>,
}

impl Baseline {
    /// Fails with [`Error::DuplicateId`] if two entries share an identifier
    pub fn new(items: Vec<IdentifiedItem>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        if let Some(dup) = items.iter().find(|entry| !seen.insert(entry.id.as_str())) {
            return Err(Error::DuplicateId(dup.id.clone()));
        }
        Ok(Self { items })
    }

    /// Builds a baseline from bare items, identifying each of them
    pub fn from_items(items: impl IntoIterator<Item = RecipeItem>) -> Self {
        Self {
            items: items.into_iter().map(IdentifiedItem::new).collect(),
        }
    }

    pub fn items(&self) -> &[IdentifiedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl TryFrom<Vec<IdentifiedItem>> for Baseline {
    type Error = Error;

    fn try_from(items: Vec<IdentifiedItem>) -> Result<Self> {
        Self::new(items)
    }
}

impl From<Baseline> for Vec<IdentifiedItem> {
    fn from(baseline: Baseline) -> Self {
        baseline.items
    }
}

/// Structural comparison of two recipes
///
/// Identifiers are ignored: two recipes are the same when, position by
/// position, their block payloads are equal.
pub fn same_recipe(a: &[IdentifiedItem], b: &[IdentifiedItem]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.item == y.item)
}

/// Recipe being edited
#[derive(Debug, Clone, Default)]
pub struct RecipeList {
    items: Vec<IdentifiedItem>,
    baseline: Baseline,
    changed: bool,
}

impl RecipeList {
    /// Empty list with an empty baseline
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the list from a baseline
    pub fn from_baseline(baseline: Baseline) -> Self {
        Self {
            items: baseline.items.clone(),
            baseline,
            changed: false,
        }
    }

    pub fn items(&self) -> &[IdentifiedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the entry identified by `id`
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|entry| entry.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&RecipeItem> {
        self.items
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.item)
    }

    fn position_or_not_found(&self, id: &str) -> Result<usize> {
        self.position(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Moves the entry `active_id` to the position currently held by `over_id`
    ///
    /// The other entries keep their relative order. Swapping an entry with
    /// itself does nothing.
    pub fn swap(&mut self, active_id: &str, over_id: &str) -> Result<()> {
        if active_id == over_id {
            return Ok(());
        }

        let from = self.position_or_not_found(active_id)?;
        let to = self.position_or_not_found(over_id)?;

        let entry = self.items.remove(from);
        self.items.insert(to, entry);
        debug!(active_id, over_id, from, to, "Moved recipe item");

        self.refresh_changed();
        Ok(())
    }

    /// Appends `item` with a fresh identifier and returns that identifier
    pub fn add(&mut self, item: RecipeItem) -> String {
        let entry = IdentifiedItem::new(item);
        let id = entry.id.clone();
        self.items.push(entry);
        debug!(id = %id, "Added recipe item");

        self.refresh_changed();
        id
    }

    /// Replaces the payload of the entry `id`, keeping its identifier and position
    pub fn update(&mut self, id: &str, item: RecipeItem) -> Result<()> {
        let index = self.position_or_not_found(id)?;
        self.items[index].item = item;
        debug!(id, index, "Updated recipe item");

        self.refresh_changed();
        Ok(())
    }

    /// Removes the entry `id` and returns its payload
    pub fn remove(&mut self, id: &str) -> Result<RecipeItem> {
        let index = self.position_or_not_found(id)?;
        let entry = self.items.remove(index);
        debug!(id, index, "Removed recipe item");

        self.refresh_changed();
        Ok(entry.item)
    }

    /// Whether the list differs from `baseline` (order and payloads, not identifiers)
    pub fn has_changes(&self, baseline: &Baseline) -> bool {
        !same_recipe(&self.items, &baseline.items)
    }

    /// Resets the list to `baseline`
    pub fn cancel(&mut self, baseline: &Baseline) {
        self.items = baseline.items.clone();
        self.baseline = baseline.clone();
        self.changed = false;
    }

    /// Whether the list differs from the baseline it was loaded from
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    /// Takes the current list as the new baseline and returns it
    ///
    /// Writing the returned snapshot somewhere is up to the caller.
    pub fn save(&mut self) -> Baseline {
        // Les identifiants de la liste sont déjà uniques
        self.baseline = Baseline {
            items: self.items.clone(),
        };
        self.changed = false;
        self.baseline.clone()
    }

    fn refresh_changed(&mut self) {
        self.changed = self.has_changes(&self.baseline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{CaddyBlock, CaddyStrategy, PlaylistInfo, PodcastBlock, RadioBlock, SongsBlock};

    fn songs(name: &str, n_songs: u32) -> RecipeItem {
        RecipeItem::Songs(SongsBlock {
            playlist: PlaylistInfo {
                id: format!("{}-id", name),
                name: name.to_string(),
                cover_art: format!("{}-art", name),
            },
            n_songs,
        })
    }

    fn podcast(name: &str, backup: &str) -> RecipeItem {
        RecipeItem::Podcast(PodcastBlock {
            podcast_name: name.to_string(),
            backup_podcast_name: backup.to_string(),
        })
    }

    fn radio(name: &str) -> RecipeItem {
        RecipeItem::Radio(RadioBlock {
            station_name: name.to_string(),
        })
    }

    fn ids(list: &RecipeList) -> Vec<String> {
        list.items().iter().map(|e| e.id.clone()).collect()
    }

    fn four_items() -> RecipeList {
        RecipeList::from_baseline(Baseline::from_items(vec![
            songs("A", 1),
            podcast("B", ""),
            radio("C"),
            RecipeItem::Caddy(CaddyBlock {
                url: "https://files.local/d.mp3".into(),
                strategy: CaddyStrategy::File,
            }),
        ]))
    }

    #[test]
    fn test_recipe_scenario() {
        let baseline = Baseline::from_items(vec![songs("playlistA", 3), podcast("World in 10", "Backup")]);
        let mut list = RecipeList::from_baseline(baseline.clone());
        let songs_id = list.items()[0].id.clone();
        let podcast_id = list.items()[1].id.clone();

        list.swap(&songs_id, &podcast_id).unwrap();
        assert_eq!(list.items()[0].item, podcast("World in 10", "Backup"));
        assert_eq!(list.items()[1].item, songs("playlistA", 3));
        assert!(list.has_changes(&baseline));
        assert!(list.is_changed());

        list.cancel(&baseline);
        assert_eq!(ids(&list), vec![songs_id, podcast_id]);
        assert!(!list.has_changes(&baseline));
        assert!(!list.is_changed());
    }

    #[test]
    fn test_swap_moves_one_element() {
        let mut list = four_items();
        let before = ids(&list);

        // A passe à la place de C, B et C remontent
        list.swap(&before[0], &before[2]).unwrap();
        assert_eq!(
            ids(&list),
            vec![before[1].clone(), before[2].clone(), before[0].clone(), before[3].clone()]
        );

        // D passe en tête
        list.swap(&before[3], &before[1]).unwrap();
        assert_eq!(
            ids(&list),
            vec![before[3].clone(), before[1].clone(), before[2].clone(), before[0].clone()]
        );
    }

    #[test]
    fn test_adjacent_swap_is_an_involution() {
        let mut list = four_items();
        let before = ids(&list);

        for i in 0..before.len() - 1 {
            let (a, b) = (&before[i], &before[i + 1]);
            list.swap(a, b).unwrap();
            assert_ne!(ids(&list), before);
            list.swap(b, a).unwrap();
            assert_eq!(ids(&list), before);
        }
    }

    #[test]
    fn test_move_is_undone_by_moving_back() {
        let mut list = four_items();
        let before = ids(&list);

        // A va en position 2 ; B occupe maintenant l'ancienne place de A
        list.swap(&before[0], &before[2]).unwrap();
        let displaced = list.items()[0].id.clone();
        list.swap(&before[0], &displaced).unwrap();

        assert_eq!(ids(&list), before);
        assert!(!list.is_changed());
    }

    #[test]
    fn test_swap_with_itself_is_noop() {
        let mut list = four_items();
        let before = ids(&list);

        list.swap(&before[1], &before[1]).unwrap();
        assert_eq!(ids(&list), before);
        assert!(!list.is_changed());

        list.add(radio("E"));
        assert!(list.is_changed());
        list.swap(&before[1], &before[1]).unwrap();
        assert!(list.is_changed());
    }

    #[test]
    fn test_swap_unknown_id() {
        let mut list = four_items();
        let before = ids(&list);

        assert_eq!(
            list.swap("missing", &before[0]),
            Err(Error::NotFound("missing".into()))
        );
        assert_eq!(
            list.swap(&before[0], "missing"),
            Err(Error::NotFound("missing".into()))
        );
        assert_eq!(ids(&list), before);
    }

    #[test]
    fn test_add_appends() {
        let mut list = RecipeList::new();
        assert!(list.is_empty());

        let first = list.add(radio("FIP"));
        let second = list.add(podcast("News", "Backup"));

        assert_eq!(ids(&list), vec![first.clone(), second]);
        assert_eq!(list.get(&first), Some(&radio("FIP")));
        assert!(list.is_changed());
    }

    #[test]
    fn test_update_preserves_identity_and_position() {
        let mut list = four_items();
        let before = ids(&list);

        list.update(&before[1], songs("Z", 7)).unwrap();

        assert_eq!(ids(&list), before);
        assert_eq!(list.len(), 4);
        assert_eq!(list.items()[1].item, songs("Z", 7));
        assert!(list.is_changed());

        // Revenir au contenu d'origine efface le drapeau
        list.update(&before[1], podcast("B", "")).unwrap();
        assert!(!list.is_changed());
    }

    #[test]
    fn test_update_unknown_id() {
        let mut list = four_items();
        assert_eq!(
            list.update("missing", radio("X")),
            Err(Error::NotFound("missing".into()))
        );
        assert!(!list.is_changed());
    }

    #[test]
    fn test_remove() {
        let mut list = four_items();
        let before = ids(&list);

        let removed = list.remove(&before[2]).unwrap();
        assert_eq!(removed, radio("C"));
        assert_eq!(list.len(), 3);
        assert_eq!(list.position(&before[2]), None);
        assert_eq!(ids(&list), vec![before[0].clone(), before[1].clone(), before[3].clone()]);
        assert!(list.is_changed());
    }

    #[test]
    fn test_remove_unknown_id_leaves_list_unchanged() {
        let mut list = four_items();
        let before = ids(&list);

        assert_eq!(list.remove("missing"), Err(Error::NotFound("missing".into())));
        assert_eq!(ids(&list), before);
        assert!(!list.is_changed());
    }

    #[test]
    fn test_has_changes_ignores_identifiers() {
        let baseline = Baseline::from_items(vec![radio("A"), radio("B")]);
        // Mêmes blocs, identifiants différents
        let other = Baseline::from_items(vec![radio("A"), radio("B")]);
        let list = RecipeList::from_baseline(other);

        assert!(!list.has_changes(&baseline));
        assert!(list.has_changes(&Baseline::from_items(vec![radio("B"), radio("A")])));
        assert!(list.has_changes(&Baseline::from_items(vec![radio("A")])));
    }

    #[test]
    fn test_cancel_after_edits() {
        let baseline = Baseline::from_items(vec![radio("A"), radio("B")]);
        let mut list = RecipeList::from_baseline(baseline.clone());
        let first = list.items()[0].id.clone();

        list.add(radio("C"));
        list.remove(&first).unwrap();
        assert!(list.has_changes(&baseline));

        list.cancel(&baseline);
        assert!(!list.has_changes(&baseline));
        assert!(!list.is_changed());
        assert_eq!(list.items(), baseline.items());
    }

    #[test]
    fn test_baseline_rejects_duplicate_ids() {
        let entry = IdentifiedItem::new(radio("FIP"));
        let other = IdentifiedItem::new(radio("Inter"));

        assert_eq!(
            Baseline::new(vec![entry.clone(), other.clone(), entry.clone()]),
            Err(Error::DuplicateId(entry.id.clone()))
        );

        let baseline = Baseline::new(vec![entry.clone(), other.clone()]).unwrap();
        let mut list = RecipeList::from_baseline(baseline);
        list.remove(&entry.id).unwrap();
        assert_eq!(list.position(&entry.id), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_baseline_deserialization_rejects_duplicate_ids() {
        let entry = IdentifiedItem::new(radio("FIP"));
        let json = serde_json::to_string(&vec![entry.clone(), entry.clone()]).unwrap();

        let err = serde_json::from_str::<Baseline>(&json).unwrap_err();
        assert!(err.to_string().contains(&entry.id));

        let json = serde_json::to_string(&vec![entry.clone()]).unwrap();
        let baseline: Baseline = serde_json::from_str(&json).unwrap();
        assert_eq!(baseline.items(), &[entry.clone()]);
        assert_eq!(serde_json::to_string(&baseline).unwrap(), json);
    }

    #[test]
    fn test_save_takes_new_baseline() {
        let mut list = four_items();
        let first = list.items()[0].id.clone();
        list.remove(&first).unwrap();
        assert!(list.is_changed());

        let saved = list.save();
        assert!(!list.is_changed());
        assert_eq!(saved.len(), 3);
        assert_eq!(list.baseline(), &saved);
        assert!(!list.has_changes(&saved));
    }
}
