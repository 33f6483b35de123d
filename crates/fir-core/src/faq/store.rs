//! Immutable FAQ entries and the keyword / edit-distance scorer.

use super::{levenshtein, FaqError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest edit distance between a keyword and the whole query that still counts as a match.
pub const MAX_FUZZY_DISTANCE: usize = 2;

/// One FAQ record: any of `keywords` selects `answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeEntry {
    pub keywords: Vec<String>,
    pub answer: String,
}

/// Winning keyword for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqMatch<'a> {
    pub answer: &'a str,
    pub keyword: &'a str,
    /// Keyword length in characters.
    pub score: usize,
    /// True when the keyword occurs verbatim in the lowercased query.
    pub exact: bool,
}

/// Ordered FAQ entries. Never mutated after load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self { entries }
    }

    /// Reads and parses the knowledge base at `path`. Any malformed record rejects the whole file.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Self, FaqError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| FaqError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let kb = Self::from_json_str(&raw)?;
        tracing::info!(
            target: "fir::faq",
            path = %path.display(),
            entries = kb.len(),
            "FAQ knowledge base loaded"
        );
        Ok(kb)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, FaqError> {
        let entries: Vec<KnowledgeEntry> = serde_json::from_str(raw)?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best-matching answer for `query`, or `None` when no keyword qualifies.
    pub fn find_answer(&self, query: &str) -> Option<&str> {
        self.best_match(query).map(|m| m.answer)
    }

    /// Scores every keyword against the lowercased query. Only a strictly higher score
    /// replaces the current best, so ties keep the first entry/keyword seen.
    ///
    /// Fuzzy matching compares the keyword against the entire query, not a window of it,
    /// so long queries practically only match by substring.
    pub fn best_match(&self, query: &str) -> Option<FaqMatch<'_>> {
        let query = query.to_lowercase();
        let mut best: Option<FaqMatch<'_>> = None;
        let mut best_score = 0;

        for entry in &self.entries {
            for keyword in &entry.keywords {
                let exact = query.contains(keyword.as_str());
                if !exact && levenshtein(keyword, &query) > MAX_FUZZY_DISTANCE {
                    continue;
                }
                let score = keyword.chars().count();
                if score > best_score {
                    best_score = score;
                    best = Some(FaqMatch {
                        answer: &entry.answer,
                        keyword,
                        score,
                        exact,
                    });
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIR_ANSWER: &str = "File an FIR at...";
    const BAIL_ANSWER: &str = "Bail procedure is...";

    fn sample() -> KnowledgeBase {
        KnowledgeBase::from_json_str(
            r#"[
                {"keywords": ["fir"], "answer": "File an FIR at..."},
                {"keywords": ["bail"], "answer": "Bail procedure is..."}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn substring_keyword_matches() {
        let kb = sample();
        let m = kb.best_match("how do I file an fir").unwrap();
        assert_eq!(m.answer, FIR_ANSWER);
        assert_eq!(m.score, 3);
        assert!(m.exact);
    }

    #[test]
    fn query_is_lowercased_before_matching() {
        assert_eq!(sample().find_answer("How do I file an FIR?"), Some(FIR_ANSWER));
    }

    #[test]
    fn fuzzy_match_uses_the_whole_query() {
        let kb = sample();
        // "bial" is two edits from "bail", but the distance is taken against the full sentence.
        assert_eq!(kb.find_answer("what is the bial process"), None);
        let m = kb.best_match("bial").unwrap();
        assert_eq!(m.answer, BAIL_ANSWER);
        assert!(!m.exact);
        assert_eq!(kb.find_answer("BAIL!"), Some(BAIL_ANSWER));
    }

    #[test]
    fn unrelated_and_empty_queries_do_not_match() {
        let kb = sample();
        assert_eq!(kb.find_answer("unrelated text"), None);
        assert_eq!(kb.find_answer(""), None);
    }

    #[test]
    fn short_keyword_fuzzy_matches_short_queries() {
        // "fir" vs "" is distance 3, but vs "fi" or "fri" it is within 2.
        let kb = sample();
        assert_eq!(kb.find_answer("fi"), Some(FIR_ANSWER));
        assert_eq!(kb.find_answer("fri"), Some(FIR_ANSWER));
        assert_eq!(kb.find_answer("x"), None);
    }

    #[test]
    fn longest_keyword_wins() {
        let kb = KnowledgeBase::from_json_str(
            r#"[
                {"keywords": ["fir"], "answer": "short"},
                {"keywords": ["zero fir"], "answer": "long"}
            ]"#,
        )
        .unwrap();
        assert_eq!(kb.find_answer("can I file a zero fir anywhere"), Some("long"));
    }

    #[test]
    fn ties_keep_first_seen_answer() {
        let kb = KnowledgeBase::from_json_str(
            r#"[
                {"keywords": ["bail"], "answer": "first"},
                {"keywords": ["fees"], "answer": "second"}
            ]"#,
        )
        .unwrap();
        assert_eq!(kb.find_answer("bail fees"), Some("first"));

        let within_entry = KnowledgeEntry {
            keywords: vec!["arrest".to_string(), "police".to_string()],
            answer: "one".to_string(),
        };
        let kb = KnowledgeBase::new(vec![
            within_entry,
            KnowledgeEntry {
                keywords: vec!["police".to_string()],
                answer: "two".to_string(),
            },
        ]);
        let m = kb.best_match("police arrest").unwrap();
        assert_eq!(m.answer, "one");
        assert_eq!(m.keyword, "arrest");
    }

    #[test]
    fn equal_scores_keep_first_even_when_later_is_exact() {
        let kb = KnowledgeBase::from_json_str(
            r#"[
                {"keywords": ["bial"], "answer": "fuzzy"},
                {"keywords": ["bail"], "answer": "exact"}
            ]"#,
        )
        .unwrap();
        // Both score 4; the first entry reaches the maximum first.
        let m = kb.best_match("bail").unwrap();
        assert_eq!(m.answer, "fuzzy");
        assert!(!m.exact);
    }

    #[test]
    fn empty_keyword_never_wins() {
        let kb = KnowledgeBase::from_json_str(r#"[{"keywords": [""], "answer": "nothing"}]"#).unwrap();
        assert_eq!(kb.find_answer("anything at all"), None);
    }

    #[test]
    fn missing_field_rejects_load() {
        let err = KnowledgeBase::from_json_str(r#"[{"keywords": ["fir"]}]"#).unwrap_err();
        assert!(matches!(err, FaqError::Parse(_)));

        let err = KnowledgeBase::from_json_str(
            r#"[{"keywords": ["fir"], "answer": "ok"}, {"answer": "no keywords"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, FaqError::Parse(_)));
    }

    #[test]
    fn wrong_shape_rejects_load() {
        assert!(KnowledgeBase::from_json_str(r#"{"keywords": ["fir"], "answer": "x"}"#).is_err());
        assert!(KnowledgeBase::from_json_str(r#"[{"keywords": "fir", "answer": "x"}]"#).is_err());
        assert!(KnowledgeBase::from_json_str(r#"[{"keywords": ["fir"], "answer": "x", "extra": 1}]"#).is_err());
        assert!(KnowledgeBase::from_json_str("not json").is_err());
    }

    #[test]
    fn empty_array_is_valid() {
        let kb = KnowledgeBase::from_json_str("[]").unwrap();
        assert!(kb.is_empty());
        assert_eq!(kb.find_answer("fir"), None);
    }

    #[test]
    fn load_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"keywords": ["fir"], "answer": "{FIR_ANSWER}"}}]"#).unwrap();
        let kb = KnowledgeBase::load_path(file.path()).unwrap();
        assert_eq!(kb.len(), 1);
        assert_eq!(kb.find_answer("register an fir"), Some(FIR_ANSWER));
    }

    #[test]
    fn load_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = KnowledgeBase::load_path(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, FaqError::Io { .. }));
    }

    #[test]
    fn shipped_knowledge_base_loads() {
        let kb = KnowledgeBase::load_path(concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/legal_faq.json")).unwrap();
        assert!(!kb.is_empty());
        assert!(kb.entries().iter().all(|e| !e.keywords.is_empty() && !e.answer.is_empty()));
        assert!(kb.find_answer("how do i file an fir").unwrap().starts_with("An FIR"));
        assert!(kb.find_answer("can i get anticipatory bail").unwrap().starts_with("Anticipatory bail"));
    }
}
