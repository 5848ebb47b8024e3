//! The document-store boundary and its in-memory implementation.
//!
//! The index builder writes [`Document`]s through the [`DocumentStore`]
//! trait and the resolver reads them back through [`Query`] trees. The
//! trait keeps the write/commit/read lifecycle explicit: a store must be
//! committed before it can be searched, and a committed store is
//! immutable.
//!
//! [`MemoryStore`] is the embedded implementation: an inverted index over
//! whole field values (case-insensitive) plus a token index for phrase
//! queries and a numeric index for range queries.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store has not been committed; call commit() before searching")]
    NotCommitted,
    #[error("store is committed and immutable")]
    Committed,
    #[error("document {0} does not exist")]
    UnknownDocument(u64),
}

/// One field value. Text fields are matched case-insensitively; numeric
/// fields serve range queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Int(i64),
}

/// An ordered bag of named fields. Field names may repeat; every value of
/// a repeated field is indexed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    fields: Vec<(String, FieldValue)>,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    pub fn text(mut self, field: &str, value: impl Into<String>) -> Document {
        self.fields.push((field.to_string(), FieldValue::Text(value.into())));
        self
    }

    /// Adds the field only when the value is present.
    pub fn text_opt(self, field: &str, value: Option<impl Into<String>>) -> Document {
        match value {
            Some(v) => self.text(field, v),
            None => self,
        }
    }

    pub fn int(mut self, field: &str, value: i64) -> Document {
        self.fields.push((field.to_string(), FieldValue::Int(value)));
        self
    }

    /// All text values of a field, in insertion order.
    pub fn texts<'a: 'b, 'b>(&'a self, field: &'b str) -> impl Iterator<Item = &'a str> + 'b {
        self.fields.iter().filter_map(move |(name, value)| match value {
            FieldValue::Text(v) if name == field => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn first_text(&self, field: &str) -> Option<&str> {
        self.texts(field).next()
    }

    pub fn first_int(&self, field: &str) -> Option<i64> {
        self.fields.iter().find_map(|(name, value)| match value {
            FieldValue::Int(v) if name == field => Some(*v),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A query tree. `Boolean` scores one point per matched `should` clause;
/// `must` clauses filter without scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Whole-value match on a text field, case-insensitive.
    Term { field: String, value: String },
    /// Consecutive-token match inside a text field, case-insensitive.
    Phrase { field: String, value: String },
    /// Inclusive numeric range.
    Range { field: String, min: i64, max: i64 },
    Boolean { must: Vec<Query>, should: Vec<Query> },
}

impl Query {
    pub fn term(field: &str, value: impl Into<String>) -> Query {
        Query::Term { field: field.to_string(), value: value.into() }
    }

    pub fn phrase(field: &str, value: impl Into<String>) -> Query {
        Query::Phrase { field: field.to_string(), value: value.into() }
    }

    pub fn range(field: &str, min: i64, max: i64) -> Query {
        Query::Range { field: field.to_string(), min, max }
    }

    pub fn boolean(must: Vec<Query>, should: Vec<Query>) -> Query {
        Query::Boolean { must, should }
    }
}

/// One search hit: the document identifier and its should-clause score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub doc_id: u64,
    pub score: u32,
}

/// Write/commit/read lifecycle over documents.
pub trait DocumentStore {
    fn add(&mut self, doc: Document) -> Result<u64, StoreError>;
    fn commit(&mut self) -> Result<(), StoreError>;
    /// Bounded top-N, ordered by score then arrival order.
    fn search(&self, query: &Query, limit: usize) -> Result<Vec<Hit>, StoreError>;
    fn doc(&self, doc_id: u64) -> Result<&Document, StoreError>;
    fn doc_count(&self) -> usize;
}

/// Inverted-index store over a `Vec` of documents.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Vec<Document>,
    committed: bool,
    /// (field, lowercased whole value) -> doc ids in arrival order
    exact: HashMap<(String, String), Vec<u64>>,
    /// (field, lowercased token) -> doc ids in arrival order
    tokens: HashMap<(String, String), Vec<u64>>,
    /// field -> (value, doc id)
    numeric: HashMap<String, Vec<(i64, u64)>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    fn matches(&self, query: &Query) -> HashMap<u64, u32> {
        match query {
            Query::Term { field, value } => {
                let key = (field.clone(), value.to_lowercase());
                self.exact
                    .get(&key)
                    .map(|ids| ids.iter().map(|id| (*id, 1)).collect())
                    .unwrap_or_default()
            }
            Query::Phrase { field, value } => {
                let wanted: Vec<String> =
                    value.split_whitespace().map(str::to_lowercase).collect();
                let first = match wanted.first() {
                    Some(f) => f,
                    None => return HashMap::new(),
                };
                let key = (field.clone(), first.clone());
                let candidates = match self.tokens.get(&key) {
                    Some(ids) => ids,
                    None => return HashMap::new(),
                };
                candidates
                    .iter()
                    .filter(|id| {
                        self.docs[**id as usize]
                            .texts(field)
                            .any(|text| contains_token_run(text, &wanted))
                    })
                    .map(|id| (*id, 1))
                    .collect()
            }
            Query::Range { field, min, max } => self
                .numeric
                .get(field)
                .map(|entries| {
                    entries
                        .iter()
                        .filter(|(v, _)| min <= v && v <= max)
                        .map(|(_, id)| (*id, 1))
                        .collect()
                })
                .unwrap_or_default(),
            Query::Boolean { must, should } => {
                let mut base: Option<HashMap<u64, u32>> = None;
                for clause in must {
                    let found = self.matches(clause);
                    base = Some(match base {
                        None => found.keys().map(|id| (*id, 0)).collect(),
                        Some(prev) => prev
                            .into_iter()
                            .filter(|(id, _)| found.contains_key(id))
                            .collect(),
                    });
                }
                let mut scored = match base {
                    Some(b) => b,
                    None => HashMap::new(),
                };
                for clause in should {
                    let found = self.matches(clause);
                    if must.is_empty() {
                        for id in found.keys() {
                            *scored.entry(*id).or_insert(0) += 1;
                        }
                    } else {
                        for (id, score) in scored.iter_mut() {
                            if found.contains_key(id) {
                                *score += 1;
                            }
                        }
                    }
                }
                scored
            }
        }
    }
}

impl DocumentStore for MemoryStore {
    fn add(&mut self, doc: Document) -> Result<u64, StoreError> {
        if self.committed {
            return Err(StoreError::Committed);
        }
        let doc_id = self.docs.len() as u64;
        for (field, value) in &doc.fields {
            match value {
                FieldValue::Text(text) => {
                    let entry = self
                        .exact
                        .entry((field.clone(), text.to_lowercase()))
                        .or_default();
                    if entry.last() != Some(&doc_id) {
                        entry.push(doc_id);
                    }
                    for token in text.split_whitespace() {
                        let entry = self
                            .tokens
                            .entry((field.clone(), token.to_lowercase()))
                            .or_default();
                        if entry.last() != Some(&doc_id) {
                            entry.push(doc_id);
                        }
                    }
                }
                FieldValue::Int(v) => {
                    self.numeric.entry(field.clone()).or_default().push((*v, doc_id));
                }
            }
        }
        self.docs.push(doc);
        Ok(doc_id)
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.committed = true;
        tracing::debug!(docs = self.docs.len(), "store committed");
        Ok(())
    }

    fn search(&self, query: &Query, limit: usize) -> Result<Vec<Hit>, StoreError> {
        if !self.committed {
            return Err(StoreError::NotCommitted);
        }
        let mut hits: Vec<Hit> = self
            .matches(query)
            .into_iter()
            .map(|(doc_id, score)| Hit { doc_id, score })
            .collect();
        hits.sort_by(|a, b| b.score.cmp(&a.score).then(a.doc_id.cmp(&b.doc_id)));
        hits.truncate(limit);
        tracing::debug!(?query, hits = hits.len(), "search");
        Ok(hits)
    }

    fn doc(&self, doc_id: u64) -> Result<&Document, StoreError> {
        self.docs
            .get(doc_id as usize)
            .ok_or(StoreError::UnknownDocument(doc_id))
    }

    fn doc_count(&self) -> usize {
        self.docs.len()
    }
}

fn contains_token_run(text: &str, wanted: &[String]) -> bool {
    let tokens: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    if wanted.len() > tokens.len() {
        return false;
    }
    tokens.windows(wanted.len()).any(|w| w == wanted)
}
