//! `phonebook` - console address book
//!
//! Browse, add, update and delete contacts, group them into categories and
//! send them an email.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod app;
mod console;
mod email;
mod menu;
mod prompts;
mod render;
mod strings;

use anyhow::{Context, Result};
use phonebook_core::{AppConfig, Database, PhonebookService, SmtpCredentials};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use console::TerminalConsole;
use email::EmailSender;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr, the menus to stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phonebook=warn,phonebook_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting phonebook");

    let config = AppConfig::from_env().context("Failed to resolve configuration")?;
    let db = Database::connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to open phonebook store at {}", config.database_url))?;
    let service = PhonebookService::new(db, config.auto_seed);

    let credentials = match SmtpCredentials::load(&config.secrets_file) {
        Ok(credentials) => Some(credentials),
        Err(e) => {
            warn!(
                "Email disabled, cannot read {}: {e}",
                config.secrets_file.display()
            );
            None
        }
    };

    let mut app = App::new(service, EmailSender::new(credentials), TerminalConsole::new());
    app.run(&config.seed_file).await
}
