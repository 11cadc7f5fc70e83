//! The persisted reading list (bookmarks).
//!
//! The whole list is one JSON array under a single [`Store`] key, in the
//! order articles were added.  Membership is decided by article id, so
//! articles without one cannot be bookmarked.
//!
//! A decoded copy is kept in memory for [`MEMORY_TTL`] to avoid re-reading
//! the blob on every render; [`ReadingList::invalidate`] drops it early.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::source::Article;
use crate::store::{Result, Store};

const READING_LIST_KEY: &str = "reading_list";
const MEMORY_TTL: Duration = Duration::from_secs(30);

pub struct ReadingList {
    store: Arc<dyn Store>,
    memory: Option<(Vec<Article>, Instant)>,
}

impl ReadingList {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            memory: None,
        }
    }

    /// All saved articles, oldest bookmark first.
    pub fn items(&mut self) -> Result<Vec<Article>> {
        if let Some((items, loaded)) = &self.memory {
            if loaded.elapsed() < MEMORY_TTL {
                return Ok(items.clone());
            }
        }
        let items = self.read()?;
        self.memory = Some((items.clone(), Instant::now()));
        Ok(items)
    }

    /// Returns `false` for articles without an id.
    pub fn contains(&mut self, article: &Article) -> bool {
        let Some(id) = article.id() else {
            return false;
        };
        match self.items() {
            Ok(items) => items.iter().any(|a| a.id() == Some(id)),
            Err(e) => {
                tracing::warn!(error = %e, "could not read reading list");
                false
            }
        }
    }

    /// Append `article` unless it is already saved.  Returns whether the
    /// list changed.
    pub fn add(&mut self, article: &Article) -> Result<bool> {
        let Some(id) = article.id() else {
            tracing::debug!("ignoring bookmark for article without id");
            return Ok(false);
        };
        let mut items = self.items()?;
        if items.iter().any(|a| a.id() == Some(id)) {
            return Ok(false);
        }
        items.push(article.clone());
        self.write(items)?;
        tracing::info!(id, title = article.title.as_deref().unwrap_or(""), "added to reading list");
        Ok(true)
    }

    pub fn remove(&mut self, article: &Article) -> Result<bool> {
        match article.id() {
            Some(id) => self.remove_id(id),
            None => Ok(false),
        }
    }

    pub fn remove_id(&mut self, id: &str) -> Result<bool> {
        let mut items = self.items()?;
        let before = items.len();
        items.retain(|a| a.id() != Some(id));
        if items.len() == before {
            return Ok(false);
        }
        self.write(items)?;
        tracing::info!(id, "removed from reading list");
        Ok(true)
    }

    /// Add or remove.  Returns whether the article is saved afterwards.
    pub fn toggle(&mut self, article: &Article) -> Result<bool> {
        if self.contains(article) {
            self.remove(article)?;
            Ok(false)
        } else {
            self.add(article)
        }
    }

    /// Forget the in-memory copy; the next read goes to the store.
    pub fn invalidate(&mut self) {
        self.memory = None;
    }

    fn read(&self) -> Result<Vec<Article>> {
        let Some(bytes) = self.store.get(READING_LIST_KEY)? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "reading list is unreadable, treating it as empty");
            Vec::new()
        }))
    }

    fn write(&mut self, items: Vec<Article>) -> Result<()> {
        let encoded = serde_json::to_vec(&items)?;
        self.store.set(READING_LIST_KEY, &encoded)?;
        self.memory = Some((items, Instant::now()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::article::tests::make_article;
    use crate::store::MemoryStore;

    fn list() -> (Arc<MemoryStore>, ReadingList) {
        let store = Arc::new(MemoryStore::new());
        let list = ReadingList::new(store.clone());
        (store, list)
    }

    #[test]
    fn empty_list_has_no_items() {
        let (_, mut list) = list();
        assert!(list.items().unwrap().is_empty());
        assert_eq!(list.items().unwrap().len(), 0);
    }

    #[test]
    fn add_then_contains() {
        let (_, mut list) = list();
        let news = make_article("test-1", "Test News 1", None);

        assert!(list.add(&news).unwrap());
        assert!(list.contains(&news));
        let items = list.items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), Some("test-1"));
    }

    #[test]
    fn duplicate_add_is_ignored() {
        let (_, mut list) = list();
        let news = make_article("test-1", "Test News 1", None);

        assert!(list.add(&news).unwrap());
        assert!(!list.add(&news).unwrap());
        assert_eq!(list.items().unwrap().len(), 1);
    }

    #[test]
    fn remove_only_touches_matching_id() {
        let (_, mut list) = list();
        let first = make_article("test-1", "Test News 1", None);
        let second = make_article("test-2", "Test News 2", None);
        list.add(&first).unwrap();
        list.add(&second).unwrap();

        assert!(list.remove(&first).unwrap());
        assert!(!list.contains(&first));
        assert!(list.contains(&second));
        assert!(!list.remove(&first).unwrap(), "second removal is a no-op");
    }

    #[test]
    fn insertion_order_is_preserved() {
        let (_, mut list) = list();
        for id in ["c", "a", "b"] {
            list.add(&make_article(id, id, None)).unwrap();
        }
        let ids: Vec<_> = list.items().unwrap().iter().map(|a| a.id().unwrap().to_string()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn articles_without_id_are_rejected() {
        let (_, mut list) = list();
        let anonymous = Article {
            title: Some("No id".into()),
            ..Article::default()
        };
        assert!(!list.add(&anonymous).unwrap());
        assert!(!list.contains(&anonymous));
        assert!(!list.remove(&anonymous).unwrap());
        assert!(list.items().unwrap().is_empty());
    }

    #[test]
    fn toggle_flips_membership() {
        let (_, mut list) = list();
        let news = make_article("x", "X", None);
        assert!(list.toggle(&news).unwrap());
        assert!(!list.toggle(&news).unwrap());
        assert!(list.items().unwrap().is_empty());
    }

    #[test]
    fn persists_across_instances() {
        let (store, mut first) = list();
        let news = make_article("test-1", "Test News 1", None);
        first.add(&news).unwrap();

        let mut second = ReadingList::new(store);
        assert!(second.contains(&news));
        assert_eq!(second.items().unwrap().len(), 1);
    }

    #[test]
    fn invalidate_picks_up_external_writes() {
        let (store, mut list) = list();
        assert!(list.items().unwrap().is_empty());

        // Another instance writes behind our back.
        ReadingList::new(store).add(&make_article("ext", "External", None)).unwrap();
        assert!(list.items().unwrap().is_empty(), "served from memory");

        list.invalidate();
        assert_eq!(list.items().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_blob_reads_as_empty() {
        let (store, mut list) = list();
        store.set(READING_LIST_KEY, b"garbage").unwrap();
        assert!(list.items().unwrap().is_empty());

        // The next write replaces the garbage.
        list.add(&make_article("1", "One", None)).unwrap();
        list.invalidate();
        assert_eq!(list.items().unwrap().len(), 1);
    }
}
