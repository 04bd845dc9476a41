//! In-memory article store.
//!
//! One mutex guards the whole map. Every operation takes the lock, does its
//! work and releases it before returning, so no guard ever lives across an
//! `.await` in a handler.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use crate::error::Error as MichiError;
use crate::params::Params;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("article store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for MichiError {
    fn from(e: StoreError) -> Self {
        MichiError::handler(e)
    }
}

/// One article: an ordered set of string fields, seeded as `title` + `content`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Article {
    fields: Params,
}

impl Article {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let mut fields = Params::new();
        fields.insert("title", title);
        fields.insert("content", content);
        Self { fields }
    }

    pub fn title(&self) -> Option<&str> { self.fields.get("title") }
    pub fn content(&self) -> Option<&str> { self.fields.get("content") }
    pub fn fields(&self) -> &Params { &self.fields }
}

impl From<Params> for Article {
    fn from(fields: Params) -> Self {
        Self { fields }
    }
}

/// Process-lifetime article storage, keyed by the id as it appears in the URL.
#[derive(Debug, Default)]
pub struct ArticleStore {
    articles: Mutex<HashMap<String, Article>>,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the single sample article under id `"1"`.
    pub fn seeded() -> Self {
        let mut articles = HashMap::new();
        articles.insert(
            "1".to_owned(),
            Article::new("Sample Article", "This is a sample article."),
        );
        Self { articles: Mutex::new(articles) }
    }

    pub fn get(&self, id: &str) -> Result<Option<Article>, StoreError> {
        Ok(self.lock()?.get(id).cloned())
    }

    pub fn contains(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.contains_key(id))
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock()?.is_empty())
    }

    /// Removes `id`. Returns the removed article, `None` if it was absent.
    pub fn remove(&self, id: &str) -> Result<Option<Article>, StoreError> {
        Ok(self.lock()?.remove(id))
    }

    /// Overwrites the supplied fields of an existing article, leaving the
    /// rest alone. Returns `false` if `id` does not exist.
    pub fn merge(&self, id: &str, fields: &Params) -> Result<bool, StoreError> {
        let mut articles = self.lock()?;
        let Some(article) = articles.get_mut(id) else {
            return Ok(false);
        };
        article.fields.merge(fields);
        Ok(true)
    }

    /// Replaces an existing article wholesale. Returns `false` if `id` does
    /// not exist; nothing is created.
    pub fn replace(&self, id: &str, article: Article) -> Result<bool, StoreError> {
        let mut articles = self.lock()?;
        let Some(slot) = articles.get_mut(id) else {
            return Ok(false);
        };
        *slot = article;
        Ok(true)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Article>>, StoreError> {
        self.articles.lock().map_err(|_| StoreError::Poisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Params {
        pairs.iter().copied().collect()
    }

    #[test]
    fn seeded_store_holds_the_sample() {
        let store = ArticleStore::seeded();
        let article = store.get("1").unwrap().unwrap();
        assert_eq!(article.title(), Some("Sample Article"));
        assert_eq!(article.content(), Some("This is a sample article."));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn remove_is_idempotent_to_absence() {
        let store = ArticleStore::seeded();
        assert!(store.remove("1").unwrap().is_some());
        assert!(store.remove("1").unwrap().is_none());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn merge_keeps_untouched_fields() {
        let store = ArticleStore::seeded();
        assert!(store.merge("1", &fields(&[("title", "Updated Title")])).unwrap());
        let article = store.get("1").unwrap().unwrap();
        assert_eq!(article.title(), Some("Updated Title"));
        assert_eq!(article.content(), Some("This is a sample article."));
    }

    #[test]
    fn merge_and_replace_never_create() {
        let store = ArticleStore::seeded();
        assert!(!store.merge("2", &fields(&[("title", "x")])).unwrap());
        assert!(!store.replace("2", Article::new("x", "y")).unwrap());
        assert!(!store.contains("2").unwrap());
    }

    #[test]
    fn replace_drops_old_fields() {
        let store = ArticleStore::seeded();
        assert!(store.replace("1", fields(&[("key_a", "value_b")]).into()).unwrap());
        let article = store.get("1").unwrap().unwrap();
        assert_eq!(article.fields().to_json(), r#"{"key_a":"value_b"}"#);
        assert_eq!(article.title(), None);
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let store = std::sync::Arc::new(ArticleStore::seeded());
        let clone = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = clone.articles.lock().unwrap();
            panic!("poison the store");
        })
        .join();
        assert!(matches!(store.get("1"), Err(StoreError::Poisoned)));
    }
}
