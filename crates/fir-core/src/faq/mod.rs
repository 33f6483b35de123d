//! Legal FAQ knowledge base and fuzzy answer matcher.
//!
//! The knowledge base is a JSON array of `{ "keywords": [...], "answer": "..." }` records,
//! loaded once at startup with [`KnowledgeBase::load_path`] and shared read-only afterwards.
//!
//! Matching lowercases the query, then scores every keyword of every entry:
//!
//! | Condition                                         | Score          |
//! |---------------------------------------------------|----------------|
//! | keyword is a substring of the query               | keyword length |
//! | else edit distance(keyword, whole query) <= 2     | keyword length |
//!
//! The highest score wins; the first entry/keyword reaching it keeps the answer.

mod distance;
mod store;

pub use distance::levenshtein;
pub use store::{FaqMatch, KnowledgeBase, KnowledgeEntry, MAX_FUZZY_DISTANCE};

use std::path::PathBuf;

/// Fatal knowledge-base load failures. A query with no matching entry is not an error.
#[derive(Debug, thiserror::Error)]
pub enum FaqError {
    #[error("cannot read FAQ knowledge base {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed FAQ knowledge base: {0}")]
    Parse(#[from] serde_json::Error),
}
