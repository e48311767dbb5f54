//! Quote store
//!
//! Owns the in-memory quote collection and exposes every mutation as a named
//! operation (add, import, merge). The store itself is pure in-memory state;
//! persisting it is the caller's job, once per external operation.

use rand::seq::SliceRandom;
use serde_json::Value;
use thiserror::Error;

use crate::types::quote::Quote;

/// Sentinel category meaning "no filter"
pub const ALL_CATEGORIES: &str = "all";

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Quote text and category must not be empty")]
    MissingField,
    #[error("Invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
    #[error("Expected a JSON array of quotes")]
    ExpectedArray,
    #[error("Invalid quote entry: {0}")]
    InvalidEntry(serde_json::Error),
}

/// The ordered, in-memory quote collection
///
/// Duplicates (identical text and category) are permitted; only the remote
/// merge suppresses them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteStore {
    quotes: Vec<Quote>,
}

impl QuoteStore {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Append a new quote from user input
    ///
    /// Both fields are trimmed; an empty result on either side is a
    /// validation error and leaves the store untouched.
    pub fn add(&mut self, text: &str, category: &str) -> Result<Quote, StoreError> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() || category.is_empty() {
            return Err(StoreError::MissingField);
        }
        let quote = Quote::new(text, category);
        self.quotes.push(quote.clone());
        Ok(quote)
    }

    /// Distinct categories in first-appearance order, prefixed with the
    /// "all" sentinel
    pub fn category_index(&self) -> Vec<String> {
        let mut index = vec![ALL_CATEGORIES.to_string()];
        for quote in &self.quotes {
            if !index.iter().any(|c| c == &quote.category) {
                index.push(quote.category.clone());
            }
        }
        index
    }

    /// Pick one quote uniformly at random among those matching `category`
    ///
    /// The sentinel selects over the whole store. Returns `None` when the
    /// filtered subset is empty.
    pub fn pick_random(&self, category: &str) -> Option<Quote> {
        let mut rng = rand::thread_rng();
        if category == ALL_CATEGORIES {
            self.quotes.choose(&mut rng).cloned()
        } else {
            let subset: Vec<&Quote> = self
                .quotes
                .iter()
                .filter(|q| q.category == category)
                .collect();
            subset.choose(&mut rng).map(|q| (*q).clone())
        }
    }

    /// Merge quotes fetched from the remote endpoint
    ///
    /// An incoming quote is admitted only if no entry of the pre-merge store
    /// is structurally equal to it. Admitted quotes keep their remote order.
    /// Returns the number of quotes added.
    pub fn merge_remote(&mut self, incoming: Vec<Quote>) -> usize {
        let fresh: Vec<Quote> = incoming
            .into_iter()
            .filter(|q| !self.quotes.contains(q))
            .collect();
        let added = fresh.len();
        self.quotes.extend(fresh);
        added
    }

    /// Append the quotes of an uploaded JSON document
    ///
    /// The top-level value must be an array; elements must be objects, with
    /// missing text/category tolerated (they default to empty strings).
    /// Every element is validated before any is appended, so a format error
    /// leaves the store unchanged. Returns the number of quotes imported.
    pub fn import_json(&mut self, raw: &str) -> Result<usize, StoreError> {
        let value: Value = serde_json::from_str(raw).map_err(StoreError::InvalidJson)?;
        let items = match value {
            Value::Array(items) => items,
            _ => return Err(StoreError::ExpectedArray),
        };
        let mut imported = Vec::with_capacity(items.len());
        for item in items {
            let quote: Quote = serde_json::from_value(item).map_err(StoreError::InvalidEntry)?;
            imported.push(quote);
        }
        let count = imported.len();
        self.quotes.extend(imported);
        Ok(count)
    }

    /// Serialize the full store as a pretty-printed JSON array
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(pairs: &[(&str, &str)]) -> QuoteStore {
        QuoteStore::new(
            pairs
                .iter()
                .map(|(t, c)| Quote::new(*t, *c))
                .collect(),
        )
    }

    #[test]
    fn test_add_appends_trimmed_pair() {
        let mut store = QuoteStore::default();
        let quote = store.add("  Stay hungry.  ", " Motivation ").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(quote, Quote::new("Stay hungry.", "Motivation"));
        assert_eq!(store.quotes()[0], quote);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut store = QuoteStore::default();
        store.add("A", "X").unwrap();
        store.add("B", "Y").unwrap();
        store.add("C", "X").unwrap();
        let texts: Vec<&str> = store.quotes().iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_add_rejects_empty_input() {
        let mut store = store_with(&[("A", "X")]);
        assert!(matches!(store.add("", "X"), Err(StoreError::MissingField)));
        assert!(matches!(store.add("A", "   "), Err(StoreError::MissingField)));
        assert!(matches!(store.add("\t\n", ""), Err(StoreError::MissingField)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicates_allowed_on_add() {
        let mut store = QuoteStore::default();
        store.add("A", "X").unwrap();
        store.add("A", "X").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_category_index_distinct_first_appearance() {
        let store = store_with(&[("1", "X"), ("2", "Y"), ("3", "X"), ("4", "Z")]);
        assert_eq!(store.category_index(), vec!["all", "X", "Y", "Z"]);
    }

    #[test]
    fn test_category_index_never_duplicates_sentinel() {
        let store = store_with(&[("1", "all"), ("2", "X")]);
        assert_eq!(store.category_index(), vec!["all", "X"]);
    }

    #[test]
    fn test_category_index_on_empty_store() {
        assert_eq!(QuoteStore::default().category_index(), vec!["all"]);
    }

    #[test]
    fn test_pick_random_all_returns_member() {
        let store = store_with(&[("A", "X"), ("B", "Y"), ("C", "Z")]);
        for _ in 0..20 {
            let picked = store.pick_random(ALL_CATEGORIES).unwrap();
            assert!(store.quotes().contains(&picked));
        }
    }

    #[test]
    fn test_pick_random_respects_filter() {
        let store = store_with(&[("A", "X"), ("B", "Y"), ("C", "X")]);
        for _ in 0..20 {
            let picked = store.pick_random("X").unwrap();
            assert_eq!(picked.category, "X");
        }
    }

    #[test]
    fn test_pick_random_empty_subset() {
        let store = store_with(&[("A", "X")]);
        assert_eq!(store.pick_random("nope"), None);
        assert_eq!(QuoteStore::default().pick_random(ALL_CATEGORIES), None);
    }

    #[test]
    fn test_merge_admits_only_novel_quotes() {
        // Scenario: one duplicate suppressed, one new item admitted.
        let mut store = store_with(&[("A", "X")]);
        let incoming = vec![Quote::new("A", "X"), Quote::new("B", "ServerSync")];
        let added = store.merge_remote(incoming);
        assert_eq!(added, 1);
        assert_eq!(
            store.quotes(),
            &[Quote::new("A", "X"), Quote::new("B", "ServerSync")]
        );
    }

    #[test]
    fn test_merge_preserves_remote_order() {
        let mut store = store_with(&[("local", "L")]);
        let incoming = vec![
            Quote::new("1", "ServerSync"),
            Quote::new("2", "ServerSync"),
            Quote::new("3", "ServerSync"),
        ];
        store.merge_remote(incoming);
        let texts: Vec<&str> = store.quotes().iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["local", "1", "2", "3"]);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut store = store_with(&[("A", "X")]);
        let incoming = vec![Quote::new("A", "X"), Quote::new("B", "ServerSync")];
        store.merge_remote(incoming.clone());
        let after_first = store.clone();
        let added = store.merge_remote(incoming);
        assert_eq!(added, 0);
        assert_eq!(store, after_first);
    }

    #[test]
    fn test_import_appends_verbatim() {
        let mut store = store_with(&[("A", "X")]);
        let raw = r#"[{"text":"A","category":"X"},{"text":"B","category":"Y"}]"#;
        let count = store.import_json(raw).unwrap();
        assert_eq!(count, 2);
        // Import does not deduplicate.
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_import_tolerates_missing_fields() {
        let mut store = QuoteStore::default();
        let count = store.import_json(r#"[{"text":"A"},{}]"#).unwrap();
        assert_eq!(count, 2);
        assert_eq!(store.quotes()[0], Quote::new("A", ""));
        assert_eq!(store.quotes()[1], Quote::new("", ""));
    }

    #[test]
    fn test_import_rejects_non_array() {
        let mut store = store_with(&[("A", "X")]);
        assert!(matches!(
            store.import_json(r#"{"text":"A"}"#),
            Err(StoreError::ExpectedArray)
        ));
        assert!(matches!(
            store.import_json("not json"),
            Err(StoreError::InvalidJson(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_import_failure_leaves_store_unchanged() {
        let mut store = store_with(&[("A", "X")]);
        // Second element is not an object; nothing from the document lands.
        let result = store.import_json(r#"[{"text":"B","category":"Y"}, 42]"#);
        assert!(matches!(result, Err(StoreError::InvalidEntry(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_export_import_round_trip() {
        let store = store_with(&[("A", "X"), ("B", "Y")]);
        let exported = store.export_json().unwrap();
        let mut restored = QuoteStore::default();
        restored.import_json(&exported).unwrap();
        assert_eq!(restored, store);
    }
}
