use std::sync::{Arc, PoisonError, RwLock};

use super::model::{DocEntry, DocEntrySummary, IconEntry};

/// One complete version of the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    pub entries: Vec<DocEntry>,
    pub icons: Vec<IconEntry>,
}

impl Corpus {
    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            entries: self.entries.len(),
            icons: self.icons.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub entries: usize,
    pub icons: usize,
}

/// Errors caused by the caller's query rather than by the corpus
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("query parameter is required")]
    EmptyQuery,
}

/// In-memory corpus shared between the refresh task and the tool handlers.
///
/// The current [`Corpus`] sits behind an `Arc`. Readers take the lock only
/// long enough to clone that `Arc` and then work on an immutable snapshot;
/// writers build a whole new `Corpus` and swap the pointer. A reader therefore
/// sees either the old or the new corpus, never a mix of both.
#[derive(Debug, Default)]
pub struct CorpusStore {
    current: RwLock<Arc<Corpus>>,
}

impl CorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The corpus as of now. Later reloads do not affect the returned value.
    pub fn snapshot(&self) -> Arc<Corpus> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the whole corpus in one step.
    pub fn install(&self, corpus: Corpus) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(corpus);
    }

    /// Replace the documentation entries, keeping the icon catalog.
    pub fn reload(&self, entries: Vec<DocEntry>) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(Corpus {
            entries,
            icons: current.icons.clone(),
        });
    }

    /// Replace the icon catalog, keeping the documentation entries.
    pub fn reload_icons(&self, icons: Vec<IconEntry>) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(Corpus {
            entries: current.entries.clone(),
            icons,
        });
    }

    pub fn stats(&self) -> CorpusStats {
        self.snapshot().stats()
    }

    /// Case-insensitive substring search over name, description and content.
    pub fn search(&self, query: &str) -> Result<Vec<DocEntry>, QueryError> {
        let query = normalize_query(query)?;
        let corpus = self.snapshot();

        Ok(corpus
            .entries
            .iter()
            .filter(|entry| {
                contains_ci(&entry.name, &query)
                    || contains_ci(&entry.description, &query)
                    || contains_ci(&entry.content, &query)
            })
            .cloned()
            .collect())
    }

    /// First entry whose name matches case-insensitively.
    pub fn get_by_name(&self, name: &str) -> Option<DocEntry> {
        let wanted = name.to_lowercase();
        self.snapshot()
            .entries
            .iter()
            .find(|entry| entry.name.to_lowercase() == wanted)
            .cloned()
    }

    /// Entry summaries sorted by category then name, optionally filtered to
    /// one category. An empty `category` lists everything.
    pub fn list(&self, category: &str) -> Vec<DocEntrySummary> {
        let category = category.trim();
        let corpus = self.snapshot();

        let mut summaries: Vec<DocEntrySummary> = corpus
            .entries
            .iter()
            .filter(|entry| category.is_empty() || entry.category.as_str().eq_ignore_ascii_case(category))
            .map(DocEntrySummary::from)
            .collect();

        summaries.sort_by(|a, b| {
            a.category
                .as_str()
                .cmp(b.category.as_str())
                .then_with(|| a.name.cmp(&b.name))
        });
        summaries
    }

    /// Case-insensitive substring search over icon name, description and category.
    pub fn search_icons(&self, query: &str) -> Result<Vec<IconEntry>, QueryError> {
        let query = normalize_query(query)?;
        let corpus = self.snapshot();

        Ok(corpus
            .icons
            .iter()
            .filter(|icon| {
                contains_ci(&icon.name, &query)
                    || contains_ci(&icon.description, &query)
                    || contains_ci(&icon.category, &query)
            })
            .cloned()
            .collect())
    }
}

/// Lowercased query, matched as given; blank queries are rejected.
fn normalize_query(query: &str) -> Result<String, QueryError> {
    if query.trim().is_empty() {
        return Err(QueryError::EmptyQuery);
    }
    Ok(query.to_lowercase())
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::Category;

    fn entry(name: &str, category: Category, description: &str) -> DocEntry {
        DocEntry {
            name: name.to_string(),
            category,
            description: description.to_string(),
            content: format!("# {name}\n\n{description}"),
        }
    }

    #[test]
    fn test_reload_keeps_other_half() {
        let store = CorpusStore::new();
        store.reload_icons(vec![IconEntry {
            name: "Save".to_string(),
            description: "Persist".to_string(),
            category: "Actions".to_string(),
        }]);
        store.reload(vec![entry("Button", Category::Form, "Clickable")]);

        assert_eq!(store.stats(), CorpusStats { entries: 1, icons: 1 });
    }

    #[test]
    fn test_snapshot_is_stable_across_install() {
        let store = CorpusStore::new();
        store.reload(vec![entry("Button", Category::Form, "Clickable")]);

        let before = store.snapshot();
        store.install(Corpus::default());

        assert_eq!(before.entries.len(), 1);
        assert!(store.snapshot().entries.is_empty());
    }

    #[test]
    fn test_whitespace_query_is_rejected() {
        let store = CorpusStore::new();
        assert_eq!(store.search("   "), Err(QueryError::EmptyQuery));
        assert_eq!(store.search_icons(""), Err(QueryError::EmptyQuery));
    }
}
