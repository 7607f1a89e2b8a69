//! Local book cache
//!
//! Books are kept in a [`KeyValueStore`] under their decimal id, serialized
//! as JSON. The saved-books listing is derived from the store: rebuilt when
//! the cache is opened, appended to on every first write, emptied on clear.

mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

use crate::error::CacheError;
use crate::types::{Book, BookId, MetadataEntry};
use std::path::PathBuf;

/// Result type for cache operations
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Cache capability used by the view controller
pub trait BookCache {
    /// Saved books, in the order they were cached
    fn list(&self) -> &[MetadataEntry];

    /// Look up a book; unknown ids are simply absent
    fn get(&self, id: BookId) -> Option<Book>;

    /// Store a book unless the id is already cached.
    ///
    /// Returns `true` when the book was written.
    fn put(&mut self, id: BookId, book: &Book) -> CacheResult<bool>;

    /// Remove every cached book
    fn clear(&mut self) -> CacheResult<()>;
}

/// [`BookCache`] over any key-value store
#[derive(Debug)]
pub struct LocalCache<S> {
    store: S,
    index: Vec<MetadataEntry>,
}

/// Cache that lives only as long as the process
pub type MemoryCache = LocalCache<MemoryStore>;

/// Cache persisted to a JSON file
pub type FileCache = LocalCache<FileStore>;

impl<S: KeyValueStore> LocalCache<S> {
    /// Wrap a store, rebuilding the listing from its current contents
    pub fn new(store: S) -> Self {
        let index = store
            .keys()
            .into_iter()
            .filter_map(|key| {
                let Ok(book_id) = key.parse::<BookId>() else {
                    tracing::warn!("Skipping cache key that is not a book id: {:?}", key);
                    return None;
                };
                if book_id.to_string() != key {
                    tracing::warn!(
                        "Skipping cache key that is not a canonical book id: {:?}",
                        key
                    );
                    return None;
                }
                let book = read_book(&store, &key)?;
                Some(MetadataEntry::new(book_id, &book))
            })
            .collect();

        Self { store, index }
    }

}

impl LocalCache<MemoryStore> {
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl LocalCache<FileStore> {
    /// Open (or create on first write) a cache file
    pub fn open(path: impl Into<PathBuf>) -> CacheResult<Self> {
        Ok(Self::new(FileStore::open(path)?))
    }
}

fn read_book<S: KeyValueStore>(store: &S, key: &str) -> Option<Book> {
    let Some(raw) = store.get_item(key) else {
        if store.contains_key(key) {
            tracing::warn!("Ignoring cache entry {} that is not a string", key);
        }
        return None;
    };
    match serde_json::from_str(&raw) {
        Ok(book) => Some(book),
        Err(e) => {
            tracing::warn!("Ignoring unreadable cache entry {}: {}", key, e);
            None
        }
    }
}

impl<S: KeyValueStore> BookCache for LocalCache<S> {
    fn list(&self) -> &[MetadataEntry] {
        &self.index
    }

    fn get(&self, id: BookId) -> Option<Book> {
        read_book(&self.store, &id.to_string())
    }

    fn put(&mut self, id: BookId, book: &Book) -> CacheResult<bool> {
        let key = id.to_string();
        if read_book(&self.store, &key).is_some() {
            tracing::debug!("Book {} already cached, keeping the first copy", id);
            return Ok(false);
        }
        if self.store.contains_key(&key) {
            tracing::warn!("Replacing unreadable cache entry for book {}", id);
        }

        let value = serde_json::to_string(book)?;
        self.store.set_item(&key, value)?;
        self.index.push(MetadataEntry::new(id, book));

        tracing::debug!("Cached book {}", id);
        Ok(true)
    }

    fn clear(&mut self) -> CacheResult<()> {
        self.store.clear()?;
        self.index.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BookMetadata;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn id(n: u32) -> BookId {
        BookId::new(n).unwrap()
    }

    fn book(title: &str, author: &str) -> Book {
        Book::new(format!("{} by {}", title, author), BookMetadata::new(title, author))
    }

    #[test]
    fn test_get_missing_is_absent() {
        let cache = MemoryCache::in_memory();
        assert!(cache.get(id(1234)).is_none());
        assert!(cache.list().is_empty());
    }

    #[test]
    fn test_put_then_get() {
        let mut cache = MemoryCache::in_memory();
        let alice = book("Alice", "Bob");

        assert!(cache.put(id(1234), &alice).unwrap());
        assert_eq!(cache.get(id(1234)), Some(alice.clone()));
        assert_eq!(cache.list(), &[MetadataEntry::new(id(1234), &alice)]);
    }

    #[test]
    fn test_first_write_wins() {
        let mut cache = MemoryCache::in_memory();
        let original = book("Original", "A");
        let other = book("Other", "B");

        assert!(cache.put(id(7), &original).unwrap());
        assert!(!cache.put(id(7), &other).unwrap());

        assert_eq!(cache.get(id(7)), Some(original));
        assert_eq!(cache.list().len(), 1);
        assert_eq!(cache.list()[0].metadata.title, "Original");
    }

    #[test]
    fn test_clear() {
        let mut cache = MemoryCache::in_memory();
        cache.put(id(1), &book("One", "A")).unwrap();
        cache.put(id(2), &book("Two", "B")).unwrap();

        cache.clear().unwrap();

        assert!(cache.list().is_empty());
        assert!(cache.get(id(1)).is_none());
        assert!(cache.get(id(2)).is_none());
    }

    #[test]
    fn test_index_rebuilt_from_store() {
        let mut store = MemoryStore::new();
        store
            .set_item("84", serde_json::to_string(&book("Frankenstein", "Shelley")).unwrap())
            .unwrap();
        store.set_item("theme", "dark".to_string()).unwrap();
        store.set_item("11", "{broken".to_string()).unwrap();
        store
            .set_item("0042", serde_json::to_string(&book("Padded", "Zero")).unwrap())
            .unwrap();
        store
            .set_item(" 7", serde_json::to_string(&book("Spaced", "Blank")).unwrap())
            .unwrap();
        store
            .set_item("1342", serde_json::to_string(&book("Pride", "Austen")).unwrap())
            .unwrap();

        let cache = LocalCache::new(store);
        let ids: Vec<u32> = cache.list().iter().map(|e| e.book_id.get()).collect();
        assert_eq!(ids, vec![84, 1342]);
        assert!(cache.get(id(11)).is_none());
        assert!(cache.get(id(42)).is_none());
        assert!(cache.get(id(7)).is_none());
    }

    #[test]
    fn test_non_canonical_key_does_not_shadow_put() {
        let mut store = MemoryStore::new();
        store
            .set_item("0084", serde_json::to_string(&book("Padded", "Zero")).unwrap())
            .unwrap();

        let mut cache = LocalCache::new(store);
        assert!(cache.list().is_empty());

        let frankenstein = book("Frankenstein", "Shelley");
        assert!(cache.put(id(84), &frankenstein).unwrap());
        assert_eq!(cache.get(id(84)), Some(frankenstein.clone()));
        assert_eq!(cache.list(), &[MetadataEntry::new(id(84), &frankenstein)]);
    }

    #[test]
    fn test_unreadable_entries_are_replaced_on_put() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.json");
        std::fs::write(&path, r#"{"84": {"content": "not a string"}, "11": "{broken"}"#).unwrap();

        let mut cache = FileCache::open(&path).unwrap();
        assert!(cache.list().is_empty());
        assert!(cache.get(id(84)).is_none());

        let frankenstein = book("Frankenstein", "Shelley");
        let alice = book("Alice", "Bob");
        assert!(cache.put(id(84), &frankenstein).unwrap());
        assert!(cache.put(id(11), &alice).unwrap());
        assert!(!cache.put(id(84), &alice).unwrap());

        let cache = FileCache::open(&path).unwrap();
        assert_eq!(cache.get(id(84)), Some(frankenstein));
        assert_eq!(cache.get(id(11)), Some(alice));
        let ids: Vec<u32> = cache.list().iter().map(|e| e.book_id.get()).collect();
        assert_eq!(ids, vec![84, 11]);
    }

    #[test]
    fn test_file_cache_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.json");

        {
            let mut cache = FileCache::open(&path).unwrap();
            cache.put(id(2701), &book("Moby Dick", "Melville")).unwrap();
            cache.put(id(84), &book("Frankenstein", "Shelley")).unwrap();
        }

        let cache = FileCache::open(&path).unwrap();
        let titles: Vec<&str> = cache
            .list()
            .iter()
            .map(|e| e.metadata.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Moby Dick", "Frankenstein"]);
        assert_eq!(cache.get(id(84)).unwrap().author(), "Shelley");
    }

    #[test]
    fn test_file_cache_stores_book_json_strings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("books.json");

        let mut cache = FileCache::open(&path).unwrap();
        cache.put(id(5), &book("Five", "Someone")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let stored: Book = serde_json::from_str(raw["5"].as_str().unwrap()).unwrap();
        assert_eq!(stored.title(), "Five");
    }

    proptest! {
        #[test]
        fn prop_listing_matches_first_writes(raw_ids in prop::collection::vec(1u32..200, 0..40)) {
            let mut cache = MemoryCache::in_memory();
            let mut expected: Vec<(u32, String)> = Vec::new();

            for (n, raw) in raw_ids.iter().enumerate() {
                let title = format!("title-{}", n);
                let written = cache.put(id(*raw), &book(&title, "author")).unwrap();

                let seen = expected.iter().any(|(k, _)| k == raw);
                prop_assert_eq!(written, !seen);
                if !seen {
                    expected.push((*raw, title));
                }
            }

            prop_assert_eq!(cache.list().len(), expected.len());
            for (entry, (raw, title)) in cache.list().iter().zip(&expected) {
                prop_assert_eq!(entry.book_id.get(), *raw);
                prop_assert_eq!(&entry.metadata.title, title);
                let cached = cache.get(id(*raw)).unwrap();
                prop_assert_eq!(&cached.metadata, &entry.metadata);
            }
        }

        #[test]
        fn prop_clear_forgets_everything(raw_ids in prop::collection::btree_set(1u32..10_000, 0..20)) {
            let mut cache = MemoryCache::in_memory();
            for raw in &raw_ids {
                cache.put(id(*raw), &book("t", "a")).unwrap();
            }

            cache.clear().unwrap();

            prop_assert!(cache.list().is_empty());
            for raw in &raw_ids {
                prop_assert!(cache.get(id(*raw)).is_none());
            }
        }
    }
}
