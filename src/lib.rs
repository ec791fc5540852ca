// src/lib.rs
//! gitfeed library — fetches GitHub notifications and enriches them with
//! subject and latest-comment metadata.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `FeedError`
//! - **Configuration** — `FeedConfig`, `CommandLineInput`
//! - **Domain model** — `Notification`, `ApiPayloads`
//! - **Domain types** — `AuthToken`, `QueryParams`
//! - **API pipeline** — `NoteGetter`, `GetterOptions`, `Transport`,
//!   `ResponseCache`, the cache implementations, and the converter
//!
//! # Example
//!
//! ```no_run
//! use gitfeed::{AuthToken, GetterOptions, NoteGetter, QueryParams};
//!
//! # async fn run() -> Result<(), gitfeed::FeedError> {
//! let getter = NoteGetter::new(GetterOptions::with_defaults()?);
//! let token = AuthToken::new(std::env::var("GITFEED_TOKEN").unwrap_or_default());
//! let notes = getter.get_notifications(&token, QueryParams::new()).await?;
//! for note in &notes {
//!     println!("{}: ({}) {}", note.updated_at, note.repository_full_name, note.title);
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod config;
mod constants;
mod error;
mod model;
mod types;

// --- Error Handling ---
pub use crate::error::{FeedError, Result};

// --- Configuration ---
pub use crate::config::{CommandLineInput, FeedConfig};

// --- Domain Model ---
pub use crate::model::{ApiPayloads, Notification};

// --- Domain Types ---
pub use crate::types::{AuthToken, QueryParams};

// --- API Pipeline ---
pub use crate::api::{
    build_notifications_url, CachedTransport, Converter, GetterOptions, HttpTransport,
    MemoryCache, NoCache, NoteGetter, RequestOptions, ResponseCache, Transport,
    TransportResponse,
};

// --- Constants ---
pub use crate::constants::NOTIFICATIONS_URL;
