use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use salesforecast_assistant::api::ChatResponse;
use salesforecast_assistant::cli::account;
use salesforecast_assistant::cli::chat::ChatContext;
use salesforecast_assistant::cli::chat::session::ChatSession;
use salesforecast_assistant::config::{self, Settings};
use salesforecast_assistant::faq::{FaqResponder, KnowledgeBase};
use salesforecast_assistant::forms::{LoginForm, RegistrationForm};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input to send to the chat
    #[arg(short, long)]
    input: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Milliseconds the assistant "types" before replying
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// JSON file with the knowledge base to answer from
    #[arg(long, global = true)]
    knowledge_base: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a chat session
    Chat {
        /// Input to send to the chat
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Answer a single question and exit
    Ask {
        question: String,

        /// Print the reply as a JSON chat response
        #[arg(long)]
        json: bool,
    },

    /// List the questions in the knowledge base
    Faq,

    /// Validate a registration and print the request body
    Register {
        #[arg(long, default_value = "")]
        full_name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "")]
        confirm_password: String,
        #[arg(long, default_value = "")]
        business_name: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long)]
        agree_to_terms: bool,
        #[arg(long)]
        json: bool,
    },

    /// Validate a sign-in and print the request body
    Login {
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let settings = Settings::from_env()?.with_overrides(cli.delay_ms, cli.knowledge_base.clone());
    config::log_settings(&settings);

    match cli.command {
        Some(Commands::Chat { input }) => run_chat(&settings, input.or(cli.input)).await,
        None => run_chat(&settings, cli.input).await,
        Some(Commands::Ask { question, json }) => {
            let knowledge_base = settings.load_knowledge_base()?;
            let reply = knowledge_base.find_best_answer(&question);
            let mut stdout = io::stdout();
            if json {
                let response = ChatResponse {
                    reply: reply.to_string(),
                };
                writeln!(stdout, "{}", serde_json::to_string_pretty(&response)?)?;
            } else {
                writeln!(stdout, "{}", reply)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Faq) => {
            let knowledge_base = settings.load_knowledge_base()?;
            let mut stdout = io::stdout();
            for (index, entry) in knowledge_base.entries().iter().enumerate() {
                writeln!(stdout, "{:>2}. {}", index + 1, entry.question())?;
                writeln!(stdout, "    keywords: {}", entry.keywords().join(", "))?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Register {
            full_name,
            email,
            password,
            confirm_password,
            business_name,
            location,
            agree_to_terms,
            json,
        }) => {
            let form = RegistrationForm {
                full_name,
                email,
                password,
                confirm_password,
                business_name,
                location,
                agree_to_terms,
            };
            let accepted = account::register(&mut io::stdout(), &form, json)?;
            Ok(exit_code(accepted))
        }
        Some(Commands::Login {
            email,
            password,
            json,
        }) => {
            let form = LoginForm { email, password };
            let accepted = account::login(&mut io::stdout(), &form, json)?;
            Ok(exit_code(accepted))
        }
    }
}

async fn run_chat(settings: &Settings, input: Option<String>) -> Result<ExitCode> {
    info!("Starting SalesForecast assistant");

    let knowledge_base = Arc::new(load_or_builtin(settings));
    let responder = FaqResponder::new(Arc::clone(&knowledge_base));
    let session = ChatSession::new(Arc::new(responder), settings.reply_delay);

    let interactive = input.is_none();
    let mut chat_context = ChatContext::new(
        Box::new(io::stdout()),
        input,
        interactive,
        session,
        knowledge_base,
    );
    chat_context.run().await
}

/// A broken knowledge base file should not keep the chat from starting.
fn load_or_builtin(settings: &Settings) -> KnowledgeBase {
    match settings.load_knowledge_base() {
        Ok(knowledge_base) => knowledge_base,
        Err(e) => {
            tracing::error!("Failed to load knowledge base, using built-in FAQ: {}", e);
            KnowledgeBase::builtin()
        }
    }
}

fn exit_code(accepted: bool) -> ExitCode {
    if accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
