// src/main.rs

use chrono::{DateTime, Local};
use clap::Parser;
use gitfeed::{
    CommandLineInput, FeedConfig, FeedError, GetterOptions, NoteGetter, Notification,
};
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};

/// Maximum characters of a notification title shown per line.
const TITLE_DISPLAY_LIMIT: usize = 120;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .build(Root::builder().appender("stderr").build(log_level))?;

    log4rs::init_config(config)?;
    Ok(())
}

/// One display line per notification: timestamp, repository, title.
fn format_notification(note: &Notification) -> String {
    let timestamp = DateTime::parse_from_rfc3339(&note.updated_at)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| note.updated_at.clone());

    let mut title = note.title.clone();
    if title.chars().count() > TITLE_DISPLAY_LIMIT {
        title = title.chars().take(TITLE_DISPLAY_LIMIT).collect::<String>() + "…";
    }

    let marker = if note.unread { "*" } else { " " };
    format!(
        "{}{}: ({}) {}",
        marker, timestamp, note.repository_full_name, title
    )
}

async fn run(config: &FeedConfig) -> Result<(), FeedError> {
    let getter = NoteGetter::new(GetterOptions::with_defaults()?);
    let notes = getter
        .get_notifications(&config.token, config.params())
        .await?;

    let notes: Vec<&Notification> = notes
        .iter()
        .filter(|note| !config.unread_only || note.unread)
        .collect();

    if config.json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
        return Ok(());
    }

    if notes.is_empty() {
        println!("No notifications.");
        return Ok(());
    }
    for note in notes {
        println!("{}", format_notification(note));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = FeedConfig::resolve(cli)?;

    run(&config).await?;

    Ok(())
}
