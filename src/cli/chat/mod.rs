pub mod conversation_state;
pub mod prompt;
pub mod session;

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use color_print::cformat;
use conversation_state::{ConversationMessage, Origin};
use eyre::Result;
use prompt::generate_prompt;
use rustyline::error::ReadlineError;
use session::{ChatSession, SessionError};
use tokio::sync::Notify;
use tracing::{debug, error, info};

use crate::faq::KnowledgeBase;
use crate::faq::builtin::QUICK_ACTIONS;

const WELCOME_TEXT: &str = "
SalesForecast Assistant
Ask about features, pricing, predictions, integrations or security.

/help         Show the help dialogue
/quit         Quit the application
";

const HELP_TEXT: &str = "
SalesForecast Assistant

/1 … /4       Ask one of the quick questions (before your first message)
/faq          List the questions I can answer
/clear        Start a new conversation
/help         Show this help dialogue
/quit         Quit the application

Press Ctrl-C while I'm typing to cancel the reply.
";

const TYPING_TEXT: &str = "SalesForecast Assistant is typing…";

/// Terminal front end for a [`ChatSession`].
pub struct ChatContext {
    output: Box<dyn Write>,
    input: Option<String>,
    interactive: bool,
    session: ChatSession,
    knowledge_base: Arc<KnowledgeBase>,
    interrupt: Arc<Notify>,
}

impl ChatContext {
    pub fn new(
        output: Box<dyn Write>,
        input: Option<String>,
        interactive: bool,
        session: ChatSession,
        knowledge_base: Arc<KnowledgeBase>,
    ) -> Self {
        Self {
            output,
            input,
            interactive,
            session,
            knowledge_base,
            interrupt: Arc::new(Notify::new()),
        }
    }

    /// Notifying this cancels the reply being waited on, like Ctrl-C does.
    pub fn interrupt_handle(&self) -> Arc<Notify> {
        Arc::clone(&self.interrupt)
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        self.session.open();

        // Handle non-interactive mode (single query)
        if let Some(input) = self.input.take() {
            self.handle_input(&input).await?;
            self.session.close();
            return Ok(ExitCode::SUCCESS);
        }

        if self.interactive {
            self.print_welcome()?;
            self.run_interactive().await?;
        }

        self.session.close();
        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        writeln!(self.output, "{}", WELCOME_TEXT)?;
        for message in self.session.transcript().get_messages() {
            writeln!(self.output, "{}", format_message(message))?;
        }
        self.print_quick_actions()
    }

    fn print_quick_actions(&mut self) -> Result<()> {
        if !self.session.quick_actions_visible() {
            return Ok(());
        }
        writeln!(self.output, "{}", cformat!("<dim>Quick questions:</>"))?;
        for (index, action) in QUICK_ACTIONS.iter().enumerate() {
            writeln!(self.output, "  /{}  {}", index + 1, action)?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            let prompt_text = generate_prompt(None);
            let readline = rl.readline(&prompt_text);

            match readline {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line.as_str());

                    if line.trim() == "/quit" {
                        break;
                    }

                    if let Err(e) = self.handle_input(&line).await {
                        writeln!(self.output, "Error: {}", e)?;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    error!("Failed to read input: {}", e);
                    writeln!(self.output, "Error: {}", e)?;
                    break;
                }
            }
        }

        Ok(())
    }

    async fn handle_input(&mut self, input: &str) -> Result<()> {
        match input.trim() {
            "/help" => {
                writeln!(self.output, "{}", HELP_TEXT)?;
            }
            "/clear" => {
                self.session.clear();
                writeln!(self.output, "Conversation cleared.")?;
                self.print_welcome()?;
            }
            "/faq" => {
                self.print_faq()?;
            }
            command if command.starts_with('/') => {
                match command[1..].parse::<usize>() {
                    Ok(number) if number > 0 => {
                        let sent = self.session.send_quick_action(number - 1).map(|m| m.cloned());
                        self.after_send(sent).await?;
                    }
                    _ => {
                        writeln!(self.output, "Unknown command: {}. Try /help.", command)?;
                    }
                }
            }
            _ => {
                let sent = self.session.send(input).map(|m| m.cloned());
                self.after_send(sent).await?;
            }
        }

        Ok(())
    }

    async fn after_send(
        &mut self,
        sent: std::result::Result<Option<ConversationMessage>, SessionError>,
    ) -> Result<()> {
        let sent = match sent {
            Ok(Some(message)) => message,
            Ok(None) => return Ok(()),
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                return Ok(());
            }
        };

        debug!("Sent message {}", sent.id);
        if self.interactive {
            writeln!(self.output, "{}", format_message(&sent))?;
            writeln!(self.output, "{}", cformat!("<dim>{}</>", TYPING_TEXT))?;
            self.output.flush()?;
        }

        let interrupt = Arc::clone(&self.interrupt);
        let reply = tokio::select! {
            reply = self.session.wait_for_reply() => Some(reply.map(|m| m.clone())),
            Ok(()) = tokio::signal::ctrl_c() => None,
            _ = interrupt.notified() => None,
        };

        match reply {
            Some(Ok(message)) => {
                if self.interactive {
                    writeln!(self.output, "{}", format_message(&message))?;
                } else {
                    writeln!(self.output, "{}", message.text)?;
                }
            }
            Some(Err(e)) => {
                writeln!(self.output, "Sorry, something went wrong: {}", e)?;
            }
            None => {
                info!("Reply cancelled by user");
                self.session.close();
                self.session.open();
                writeln!(self.output, "Reply cancelled.")?;
            }
        }

        Ok(())
    }

    fn print_faq(&mut self) -> Result<()> {
        writeln!(self.output, "I can answer questions like:")?;
        for entry in self.knowledge_base.entries() {
            writeln!(self.output, "  • {}", entry.question())?;
        }
        Ok(())
    }
}

/// Render a message with its origin and clock time.
pub fn format_message(message: &ConversationMessage) -> String {
    let time = message.time_label();
    let header = match message.origin {
        Origin::Assistant => cformat!("<green><bold>{}</></> <dim>{}</>", message.origin, time),
        Origin::User => cformat!("<cyan><bold>{}</></> <dim>{}</>", message.origin, time),
    };
    format!("{}\n{}\n", header, message.text)
}
