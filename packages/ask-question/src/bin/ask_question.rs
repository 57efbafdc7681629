// Interactive driver for the Ask a Question actions.
//
// Reads one command per line from stdin:
//   product <slug> | topic <slug> | title <text> | content <text> | submit | show | quit

use std::sync::Arc;

use anyhow::{Context, Result};
use ask_question::{
    Config, EventBus, FormEvent, Product, QuestionEditActions, QuestionStore, StaticCsrfToken,
    Topic,
};
use kitsune_api::KitsuneClient;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, PartialEq)]
enum Command {
    Product(String),
    Topic(String),
    Title(String),
    Content(String),
    Submit,
    Show,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match (verb, rest) {
        ("product", slug) if !slug.is_empty() => Some(Command::Product(slug.to_string())),
        ("topic", slug) if !slug.is_empty() => Some(Command::Topic(slug.to_string())),
        ("title", text) => Some(Command::Title(text.to_string())),
        ("content", text) => Some(Command::Content(text.to_string())),
        ("submit", "") => Some(Command::Submit),
        ("show", "") => Some(Command::Show),
        ("quit" | "exit", "") => Some(Command::Quit),
        _ => None,
    }
}

fn log_events(bus: &EventBus) {
    let mut receiver = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(envelope) => match &envelope.event {
                    FormEvent::SetSuggestions { suggestions } => {
                        tracing::info!(cid = %envelope.cid, count = suggestions.len(), "SET_SUGGESTIONS");
                        for suggestion in suggestions {
                            tracing::info!("  {} ({})", suggestion.title(), suggestion.url());
                        }
                    }
                    event => tracing::info!(cid = %envelope.cid, ?event, "{}", event.kind()),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event logger lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ask_question=debug,kitsune_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(base_url = %config.base_url, "Configuration loaded");

    let bus = EventBus::new();
    let store = QuestionStore::with_bus(bus.clone());
    log_events(&bus);

    let actions = QuestionEditActions::new(
        Arc::new(store.clone()),
        Arc::new(KitsuneClient::new(config.base_url.clone())),
        Arc::new(store.clone()),
        Arc::new(StaticCsrfToken::from(config.csrf_token.clone())),
        config.suggest.clone(),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Some(Command::Product(slug)) => actions.set_product(Product::new(0, slug.clone(), slug)),
            Some(Command::Topic(slug)) => actions.set_topic(Topic::new(0, slug.clone(), slug)),
            Some(Command::Title(title)) => {
                actions.set_title(title);
            }
            Some(Command::Content(content)) => actions.set_content(content),
            Some(Command::Submit) => actions.submit_question().await,
            Some(Command::Show) => {
                let state = store.snapshot();
                println!("{}", serde_json::to_string_pretty(&state.question)?);
                println!("submission: {:?}", state.submission);
            }
            Some(Command::Quit) => break,
            None => tracing::warn!(%line, "Unrecognised command"),
        }
    }

    Ok(())
}
