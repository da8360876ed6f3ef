//! Unified error types for `FoodPrint`.
//!
//! Every fallible operation in the crate returns [`Result`]. Date problems are not
//! errors here: a missing or malformed expiry date degrades to the unknown tier
//! inside the classifier instead of surfacing as an [`Error`].

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Any failure reported by `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// User-supplied input was rejected (blank name, bad barcode, bad date)
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// Category name outside Fridge, Freezer, Pantry, Storage
    #[error("Unknown category '{value}' (expected Fridge, Freezer, Pantry or Storage)")]
    InvalidCategory {
        /// The rejected category string
        value: String,
    },

    /// An item with this id is already stored
    #[error("An item with id '{id}' already exists")]
    DuplicateItem {
        /// The conflicting id
        id: String,
    },

    /// Product lookup request failed
    #[error("Product lookup failed: {message}")]
    Lookup {
        /// Description of the HTTP or decoding failure
        message: String,
    },

    /// JSON (de)serialization of item records failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable is missing or not unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Self::Lookup {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
