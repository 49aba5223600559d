//! Shared records, configuration and ingestion for the post deduplicator.

pub mod config;
pub mod document;
pub mod error;
pub mod ingest;
pub mod types;

pub use config::DedupConfig;
pub use document::{validate_corpus, Document, Post, PostAuthor, RetweetInfo};
pub use error::{DedupError, Result};
pub use types::{Token, TokenFlags, TokenVectorizer};
