//! FAQ knowledge base and the keyword matcher that answers from it.
//!
//! A [`KnowledgeBase`] is an ordered, non-empty list of [`KnowledgeEntry`]
//! records. It is fixed once built: the matcher only reads it, and entry order
//! decides ties.

pub mod builtin;
pub mod matcher;
pub mod responder;

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

pub use matcher::{FALLBACK_RESPONSE, Match, best_match, find_best_answer, score};
pub use responder::{FaqResponder, Responder};

/// Errors raised while building or loading a knowledge base
#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("knowledge base must contain at least one entry")]
    Empty,

    #[error("entry \"{question}\" has no keywords")]
    NoKeywords { question: String },

    #[error("entry \"{question}\" has a blank keyword")]
    BlankKeyword { question: String },

    #[error("failed to read knowledge base {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid knowledge base JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One canned question/answer pair and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawEntry")]
pub struct KnowledgeEntry {
    question: String,
    answer: String,
    keywords: Vec<String>,
}

#[derive(Deserialize)]
struct RawEntry {
    question: String,
    answer: String,
    keywords: Vec<String>,
}

impl TryFrom<RawEntry> for KnowledgeEntry {
    type Error = KnowledgeBaseError;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        KnowledgeEntry::new(raw.question, raw.answer, raw.keywords)
    }
}

impl KnowledgeEntry {
    /// Build an entry, normalizing keywords to trimmed lowercase.
    ///
    /// Duplicate keywords are collapsed (first occurrence kept) so each one
    /// counts once when scoring.
    ///
    /// # Errors
    ///
    /// Returns an error if any keyword is blank or no keywords are given.
    pub fn new<I, S>(
        question: impl Into<String>,
        answer: impl Into<String>,
        keywords: I,
    ) -> Result<Self, KnowledgeBaseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let question = question.into();
        let mut normalized: Vec<String> = Vec::new();

        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                return Err(KnowledgeBaseError::BlankKeyword { question });
            }
            if !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }

        if normalized.is_empty() {
            return Err(KnowledgeBaseError::NoKeywords { question });
        }

        Ok(Self {
            question,
            answer: answer.into(),
            keywords: normalized,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

/// Ordered, non-empty collection of knowledge entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Result<Self, KnowledgeBaseError> {
        if entries.is_empty() {
            return Err(KnowledgeBaseError::Empty);
        }
        Ok(Self { entries })
    }

    /// The SalesForecast product FAQ shipped with the assistant.
    pub fn builtin() -> Self {
        builtin::knowledge_base()
    }

    /// Parse a JSON array of `{question, answer, keywords}` objects.
    pub fn from_json(json: &str) -> Result<Self, KnowledgeBaseError> {
        let entries: Vec<KnowledgeEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, KnowledgeBaseError> {
        let content = fs::read_to_string(path).map_err(|source| KnowledgeBaseError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let knowledge_base = Self::from_json(&content)?;
        info!(
            "Loaded {} knowledge entries from {}",
            knowledge_base.len(),
            path.display()
        );
        Ok(knowledge_base)
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed knowledge base.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_best_answer(&self, query: &str) -> &str {
        find_best_answer(query, self)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn keywords_are_lowercased_and_deduplicated() {
        let entry = KnowledgeEntry::new("Q", "A", ["Price", " PRICING ", "price"]).unwrap();
        assert_eq!(entry.keywords(), ["price", "pricing"]);
    }

    #[test]
    fn entry_without_keywords_is_rejected() {
        let err = KnowledgeEntry::new("Q", "A", Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, KnowledgeBaseError::NoKeywords { .. }));
    }

    #[test]
    fn blank_keyword_is_rejected() {
        let err = KnowledgeEntry::new("Q", "A", ["ok", "   "]).unwrap_err();
        assert!(matches!(err, KnowledgeBaseError::BlankKeyword { .. }));
    }

    #[test]
    fn empty_knowledge_base_is_rejected() {
        assert!(matches!(
            KnowledgeBase::new(Vec::new()),
            Err(KnowledgeBaseError::Empty)
        ));
    }

    #[test]
    fn parses_json_and_validates_entries() {
        let kb = KnowledgeBase::from_json(
            r#"[{"question": "Hours?", "answer": "9 to 5", "keywords": ["Hours", "open"]}]"#,
        )
        .unwrap();
        assert_eq!(kb.len(), 1);
        assert_eq!(kb.entries()[0].keywords(), ["hours", "open"]);

        let err = KnowledgeBase::from_json(
            r#"[{"question": "Hours?", "answer": "9 to 5", "keywords": []}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, KnowledgeBaseError::Json(_)));

        assert!(matches!(
            KnowledgeBase::from_json("[]"),
            Err(KnowledgeBaseError::Empty)
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"question": "Refunds?", "answer": "Within 30 days.", "keywords": ["refund"]}}]"#
        )
        .unwrap();

        let kb = KnowledgeBase::from_json_file(file.path()).unwrap();
        assert_eq!(kb.find_best_answer("Can I get a REFUND?"), "Within 30 days.");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = KnowledgeBase::from_json_file(Path::new("/nonexistent/kb.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/kb.json"));
    }
}
