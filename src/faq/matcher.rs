use tracing::debug;

use super::{KnowledgeBase, KnowledgeEntry};

/// Reply used when no knowledge entry shares a keyword with the query.
pub const FALLBACK_RESPONSE: &str = "I'd be happy to help! Here are some topics I can assist with:

• Platform features and capabilities
• Pricing and plans
• How AI predictions work
• Getting started guide
• Integration options
• Security and data privacy

Could you please rephrase your question or ask about one of these topics?";

/// The winning entry for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub index: usize,
    pub entry: &'a KnowledgeEntry,
    pub score: usize,
}

/// Count the entry's keywords that occur anywhere in `normalized_query`.
///
/// `normalized_query` must already be lowercase. Containment is a plain
/// substring test, so "ai" also hits "maintain".
pub fn score(entry: &KnowledgeEntry, normalized_query: &str) -> usize {
    entry
        .keywords()
        .iter()
        .filter(|keyword| normalized_query.contains(keyword.as_str()))
        .count()
}

/// Find the highest-scoring entry, or `None` when nothing scores above zero.
///
/// Ties go to the earliest entry.
pub fn best_match<'a>(query: &str, knowledge_base: &'a KnowledgeBase) -> Option<Match<'a>> {
    let normalized = query.to_lowercase();
    let mut best: Option<Match<'a>> = None;

    for (index, entry) in knowledge_base.entries().iter().enumerate() {
        let score = score(entry, &normalized);
        let best_score = best.map_or(0, |m| m.score);
        if score > best_score {
            best = Some(Match { index, entry, score });
        }
    }

    best
}

/// Answer `query` from the knowledge base, falling back to [`FALLBACK_RESPONSE`].
pub fn find_best_answer<'a>(query: &str, knowledge_base: &'a KnowledgeBase) -> &'a str {
    match best_match(query, knowledge_base) {
        Some(found) => {
            debug!(
                "Matched entry {} (\"{}\") with score {}",
                found.index,
                found.entry.question(),
                found.score
            );
            found.entry.answer()
        }
        None => {
            debug!("No knowledge entry matched, using fallback");
            FALLBACK_RESPONSE
        }
    }
}
