//! Shortener error taxonomy

use thiserror::Error;

/// Link engine errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShortenerError {
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("Alias already taken: {alias}")]
    AliasTaken { alias: String },

    #[error("Link not found: {code}")]
    LinkNotFound { code: String },

    #[error("Could not allocate a unique short code")]
    CodeSpaceExhausted,
}
