//! Error types for the flashcard library.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashcardError {
    /// A card from the creation form is missing required content.
    #[error("Invalid card: {0}")]
    InvalidNewCard(String),

    /// An imported document is not an array of valid card records.
    #[error("The JSON file is not in the expected deck format: {0}")]
    InvalidImportFormat(String),

    /// The deck was changed in memory but could not be saved.
    /// `applied` is the count the action would have returned on success.
    #[error("Changes were applied but could not be saved: {source}")]
    PersistFailed {
        applied: usize,
        #[source]
        source: Box<FlashcardError>,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlashcardError>;
