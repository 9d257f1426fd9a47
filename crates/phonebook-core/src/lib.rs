//! # phonebook-core
//!
//! Core logic for the `phonebook` console address book.
//!
//! This crate provides:
//! - **Persistence gateway** - `SQLite` store with contact and category repositories
//! - **Domain service** - CRUD, filtered queries and first-run seeding
//! - **Validation** - format rules for names, phone numbers and email addresses
//! - **Configuration** - database location, seed file and mail credentials
//! - **Mail** - composing and delivering a message to a contact over SMTP

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod categories;
pub mod config;
pub mod contacts;
mod error;
pub mod mail;
pub mod seed;
pub mod service;
mod store;
pub mod validation;

pub use categories::{Category, CategoryId, CategoryRepository, CategorySummary};
pub use config::{AppConfig, Security, SmtpCredentials};
pub use contacts::{Contact, ContactId, ContactRepository};
pub use error::{Error, Result};
pub use mail::{MailError, OutgoingMessage, send_message};
pub use seed::{SeedData, SeedOutcome};
pub use service::PhonebookService;
pub use store::Database;
pub use validation::ValidationError;
