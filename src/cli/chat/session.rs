use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::conversation_state::{ConversationMessage, ConversationState, Origin};
use crate::faq::Responder;
use crate::faq::builtin::{GREETING, QUICK_ACTIONS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("the chat window is closed")]
    Closed,

    #[error("still waiting for the previous reply")]
    AwaitingResponse,

    #[error("no reply is pending")]
    NoPendingReply,

    #[error("the responder failed before replying")]
    ResponderFailed,

    #[error("quick actions are only available before the conversation starts")]
    QuickActionsHidden,

    #[error("there is no quick action #{0}")]
    UnknownQuickAction(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Idle,
    AwaitingResponse,
}

/// One chat window: its open/closed state, its transcript and the reply in
/// flight.
///
/// Replies are produced by a spawned task that waits out the reply delay
/// before asking the responder. The task handle belongs to the session, and
/// closing or clearing aborts it, so a reply is never appended to a closed
/// window.
pub struct ChatSession {
    state: SessionState,
    transcript: ConversationState,
    responder: Arc<dyn Responder>,
    reply_delay: Duration,
    pending: Option<JoinHandle<String>>,
}

impl ChatSession {
    pub fn new(responder: Arc<dyn Responder>, reply_delay: Duration) -> Self {
        let mut transcript = ConversationState::new();
        transcript.add_assistant_message(GREETING);

        Self {
            state: SessionState::Closed,
            transcript,
            responder,
            reply_delay,
            pending: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != SessionState::Closed
    }

    pub fn transcript(&self) -> &ConversationState {
        &self.transcript
    }

    pub fn open(&mut self) {
        if self.state == SessionState::Closed {
            debug!("Opening chat session");
            self.state = SessionState::Idle;
        }
    }

    /// Append a user message and schedule the reply.
    ///
    /// Blank input is ignored and returns `Ok(None)`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn send(&mut self, text: &str) -> Result<Option<&ConversationMessage>, SessionError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        match self.state {
            SessionState::Closed => return Err(SessionError::Closed),
            SessionState::AwaitingResponse => return Err(SessionError::AwaitingResponse),
            SessionState::Idle => {}
        }

        let responder = Arc::clone(&self.responder);
        let delay = self.reply_delay;
        let query = text.to_string();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            responder.respond(&query).await
        }));
        self.state = SessionState::AwaitingResponse;

        Ok(Some(self.transcript.add_user_message(text)))
    }

    /// Wait for the scheduled reply and append it to the transcript.
    ///
    /// The reply task stays owned by the session while this future is
    /// pending, so dropping the future does not lose track of it.
    pub async fn wait_for_reply(&mut self) -> Result<&ConversationMessage, SessionError> {
        let result = match self.pending.as_mut() {
            Some(handle) => handle.await,
            None => return Err(SessionError::NoPendingReply),
        };
        self.pending = None;
        self.state = SessionState::Idle;

        match result {
            Ok(reply) => Ok(self.transcript.add_assistant_message(&reply)),
            Err(e) => {
                error!("Reply task failed: {}", e);
                Err(SessionError::ResponderFailed)
            }
        }
    }

    /// Close the window, cancelling any reply in flight.
    ///
    /// Returns true when a pending reply was cancelled. The transcript is kept.
    pub fn close(&mut self) -> bool {
        let cancelled = self.cancel_pending();
        if self.state != SessionState::Closed {
            info!("Closing chat session");
        }
        self.state = SessionState::Closed;
        cancelled
    }

    /// Start a new conversation in the same window.
    pub fn clear(&mut self) {
        self.cancel_pending();
        self.transcript.clear();
        self.transcript.add_assistant_message(GREETING);
        if self.state == SessionState::AwaitingResponse {
            self.state = SessionState::Idle;
        }
    }

    /// Quick actions are offered until the user sends a first message.
    pub fn quick_actions_visible(&self) -> bool {
        !self
            .transcript
            .get_messages()
            .iter()
            .any(|m| m.origin == Origin::User)
    }

    /// Send the quick action at `index` (zero-based).
    pub fn send_quick_action(
        &mut self,
        index: usize,
    ) -> Result<Option<&ConversationMessage>, SessionError> {
        if !self.quick_actions_visible() {
            return Err(SessionError::QuickActionsHidden);
        }
        let action = QUICK_ACTIONS
            .get(index)
            .ok_or_else(|| SessionError::UnknownQuickAction(index.saturating_add(1)))?;
        self.send(action)
    }

    fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                handle.abort();
                debug!("Cancelled pending reply");
                true
            }
            None => false,
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
