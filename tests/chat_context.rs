use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use salesforecast_assistant::cli::chat::ChatContext;
use salesforecast_assistant::cli::chat::conversation_state::Origin;
use salesforecast_assistant::cli::chat::session::{ChatSession, SessionState};
use salesforecast_assistant::faq::{FALLBACK_RESPONSE, FaqResponder, KnowledgeBase};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn context(input: &str, buffer: &SharedBuffer) -> ChatContext {
    let knowledge_base = Arc::new(KnowledgeBase::builtin());
    let responder = FaqResponder::new(Arc::clone(&knowledge_base));
    let session = ChatSession::new(Arc::new(responder), Duration::from_millis(1000));
    ChatContext::new(
        Box::new(buffer.clone()),
        Some(input.to_string()),
        false,
        session,
        knowledge_base,
    )
}

#[tokio::test(start_paused = true)]
async fn test_one_shot_input_prints_matched_answer() {
    let buffer = SharedBuffer::default();
    let mut chat = context("Do you offer a free trial?", &buffer);
    chat.run().await.unwrap();

    let output = buffer.contents();
    assert!(output.starts_with("Yes! We offer a 14-day free trial"));

    let messages = chat.session().transcript().get_messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].origin, Origin::User);
    assert_eq!(messages[2].origin, Origin::Assistant);
    assert_eq!(chat.session().state(), SessionState::Closed);
}

#[tokio::test(start_paused = true)]
async fn test_one_shot_unknown_question_prints_fallback() {
    let buffer = SharedBuffer::default();
    let mut chat = context("xyz123", &buffer);
    chat.run().await.unwrap();
    assert_eq!(buffer.contents().trim_end(), FALLBACK_RESPONSE);
}

#[tokio::test(start_paused = true)]
async fn test_blank_one_shot_input_sends_nothing() {
    let buffer = SharedBuffer::default();
    let mut chat = context("   ", &buffer);
    chat.run().await.unwrap();
    assert!(buffer.contents().is_empty());
    assert_eq!(chat.session().transcript().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_quick_action_command() {
    let buffer = SharedBuffer::default();
    let mut chat = context("/3", &buffer);
    chat.run().await.unwrap();
    assert!(buffer.contents().starts_with("We offer three plans"));
    assert_eq!(chat.session().transcript().get_messages()[1].text, "Pricing plans");
}

#[tokio::test(start_paused = true)]
async fn test_interrupt_cancels_pending_reply() {
    let buffer = SharedBuffer::default();
    let mut chat = context("pricing", &buffer);
    chat.interrupt_handle().notify_one();
    chat.run().await.unwrap();

    assert_eq!(buffer.contents(), "Reply cancelled.\n");
    let messages = chat.session().transcript().get_messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].origin, Origin::User);

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(chat.session().transcript().len(), 2);
}
