//! Folio application binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize tracing
//! 3. Build the responder for the configured persona
//! 4. Run the requested command (interactive chat by default)

mod call;
mod cli;
mod console;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};

use folio_chat::{AppointmentDesk, AppointmentRequest, Conversation, Delivery, FileSink, IntentResponder};
use folio_core::config::FolioConfig;
use folio_core::SideEffect;
use folio_voice::{StateMachine, VoiceSession};

use call::{CallDriver, CallInput};
use cli::{BookArgs, CliArgs, Command};
use console::{ConsoleLine, ConsoleSpeech, ConsoleView, TypedCapture, HELP};

type AppResult = Result<(), Box<dyn std::error::Error>>;

/// Interactive chat: a console reader task feeding the call driver.
async fn run_chat(config: &FolioConfig, voice_stdin: bool) -> AppResult {
    let view = Arc::new(ConsoleView::new(&config.persona.assistant_name));
    let responder = IntentResponder::for_persona(&config.persona)?;
    let conversation = Conversation::new(responder, view.clone(), &config.conversation);

    let (tx, rx) = mpsc::unbounded_channel();
    let session = VoiceSession::new(
        Box::new(TypedCapture::new(voice_stdin)),
        Box::new(ConsoleSpeech::new(tx.clone())),
        view,
        config.voice.clone(),
        config.conversation.min_transcript_chars,
    );
    let call_state = session.state_handle();
    let driver = CallDriver::new(conversation, session, config);

    println!(
        "{} is ready. Ask about {}'s skills, projects or story.\n{HELP}\n",
        config.persona.assistant_name, config.persona.subject_short_name
    );

    let desk = AppointmentDesk::new(&config.persona, &config.appointment);
    let sink = FileSink::new(&config.appointment.output_path);
    let reader = tokio::spawn(read_console(tx, call_state, voice_stdin, desk, sink));

    let driver = driver.run(rx).await;
    tracing::info!(turns = driver.conversation().turns().len(), "Chat finished");

    match reader.await {
        Ok(result) => result.map_err(Into::into),
        Err(e) => Err(e.into()),
    }
}

async fn read_console(
    tx: UnboundedSender<CallInput>,
    call_state: StateMachine,
    voice_stdin: bool,
    desk: AppointmentDesk,
    sink: FileSink,
) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let as_transcript = voice_stdin && call_state.current().is_active();
        match console::parse_line(&line, as_transcript) {
            ConsoleLine::Blank => {}
            ConsoleLine::Help => println!("{HELP}"),
            ConsoleLine::Book(request) => submit_booking(&desk, &request, &sink),
            ConsoleLine::Call(input) => {
                let quit = input == CallInput::Quit;
                if tx.send(input).is_err() || quit {
                    return Ok(());
                }
            }
        }
    }

    // EOF
    let _ = tx.send(CallInput::Quit);
    Ok(())
}

fn submit_booking(desk: &AppointmentDesk, request: &AppointmentRequest, sink: &FileSink) {
    match desk.submit(request, sink) {
        Ok(Delivery::Delivered { sink, text }) => {
            println!("Appointment request saved ({sink}):\n{text}");
        }
        Ok(Delivery::Inline { text }) => {
            println!("Could not save the request, copy it from here:\n{text}");
        }
        Err(e) => println!("Appointment not sent: {e}"),
    }
}

fn run_ask(config: &FolioConfig, turn: u32, json: bool, text: &[String]) -> AppResult {
    let text = text.join(" ");
    if folio_chat::normalize(&text).is_empty() {
        return Err(folio_chat::ChatError::EmptyMessage.into());
    }

    let responder = IntentResponder::for_persona(&config.persona)?;
    let resolution = responder.resolve(&text, turn.max(1));
    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }
    println!("{}", resolution.reply);
    if resolution.side_effect == SideEffect::OpenAppointmentForm {
        println!("\nBook with: folio book --name .. --email .. --date .. --time ..");
    }
    Ok(())
}

fn run_rules(config: &FolioConfig) -> AppResult {
    let responder = IntentResponder::for_persona(&config.persona)?;
    for (position, id) in responder.table().rule_ids().iter().enumerate() {
        println!("{:>2}. {id}", position + 1);
    }
    println!(" -. {}", folio_chat::DEFAULT_RULE_ID);
    Ok(())
}

fn run_book(config: &FolioConfig, args: BookArgs) -> AppResult {
    let desk = AppointmentDesk::new(&config.persona, &config.appointment);
    let output = args
        .output
        .unwrap_or_else(|| config.appointment.output_path.clone().into());
    let request = AppointmentRequest {
        name: args.name,
        email: args.email,
        date: args.date,
        time: args.time,
        purpose: args.purpose,
    };

    match desk.submit(&request, &FileSink::new(&output))? {
        Delivery::Delivered { text, .. } => {
            println!("Appointment request written to {}:\n{text}", output.display());
        }
        Delivery::Inline { text } => {
            println!("Could not write {}, here is the request:\n{text}", output.display());
        }
    }
    Ok(())
}

/// Write the default configuration, refusing to clobber an existing file.
fn run_init(path: &Path, force: bool) -> AppResult {
    if path.exists() && !force {
        return Err(format!("{} already exists, pass --force to overwrite", path.display()).into());
    }
    FolioConfig::default().save(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// Load the config before tracing is up so its log level can apply.
fn load_config(path: &Path) -> (FolioConfig, Option<String>) {
    if !path.exists() {
        return (FolioConfig::default(), None);
    }
    match FolioConfig::load(path) {
        Ok(config) => (config, None),
        Err(e) => (FolioConfig::default(), Some(e.to_string())),
    }
}

#[tokio::main]
async fn main() -> AppResult {
    let args = CliArgs::parse();
    let config_file = args.resolve_config_path();
    let (config, load_error) = load_config(&config_file);

    // Tracing.
    let level = args
        .resolve_log_level()
        .unwrap_or_else(|| config.general.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));
    match load_error {
        Some(e) => tracing::warn!(path = %config_file.display(), error = %e, "Failed to load config, using defaults"),
        None => tracing::debug!(path = %config_file.display(), "Configuration resolved"),
    }

    match args.command() {
        Command::Chat { voice_stdin } => run_chat(&config, voice_stdin).await,
        Command::Ask { turn, json, text } => run_ask(&config, turn, json, &text),
        Command::Rules => run_rules(&config),
        Command::Book(book) => run_book(&config, book),
        Command::Init { force } => run_init(&config_file, force),
    }
}
