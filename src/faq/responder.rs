use std::sync::Arc;

use async_trait::async_trait;

use super::KnowledgeBase;

/// Produces the assistant's reply to a user message.
///
/// The chat session only talks to this trait, so a remote chatbot backend can
/// replace the FAQ matcher without touching the conversation flow.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, message: &str) -> String;
}

/// Answers from a fixed knowledge base.
#[derive(Debug, Clone)]
pub struct FaqResponder {
    knowledge_base: Arc<KnowledgeBase>,
}

impl FaqResponder {
    pub fn new(knowledge_base: Arc<KnowledgeBase>) -> Self {
        Self { knowledge_base }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }
}

#[async_trait]
impl Responder for FaqResponder {
    async fn respond(&self, message: &str) -> String {
        self.knowledge_base.find_best_answer(message).to_string()
    }
}
