//! JSON import/export of the deck.
//! Exports are the pretty-printed deck; imports must be an array of card records.

use crate::error::{FlashcardError, Result};
use crate::models::CardStore;
use crate::models::card_store::record_to_card;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub const EXPORT_FILE_NAME: &str = "flashcards_msb_export.json";

/// Writes the whole deck to `path`.
pub fn export_json_to_path(store: &CardStore, path: &Path) -> Result<()> {
    let json_string = store.serialize()?;
    fs::write(path, json_string)?;
    tracing::info!("Exported {} cards to {}", store.len(), path.display());
    Ok(())
}

/// Parses an import document. Returns an error if the text is not JSON.
pub fn parse_import(contents: &str) -> Result<Value> {
    serde_json::from_str(contents).map_err(|e| {
        FlashcardError::InvalidImportFormat(format!("could not read the file as JSON ({})", e))
    })
}

/// Checks that the document is an array in which every element is a valid card.
/// Returns the number of cards it holds.
pub fn validate_import(document: &Value) -> Result<usize> {
    let records = document.as_array().ok_or_else(|| {
        FlashcardError::InvalidImportFormat("expected an array of cards".to_string())
    })?;

    for (i, record) in records.iter().enumerate() {
        if !record.is_object() {
            return Err(FlashcardError::InvalidImportFormat(format!(
                "element {} is not a card object",
                i
            )));
        }
        record_to_card(record).map_err(|e| {
            FlashcardError::InvalidImportFormat(format!("element {}: {}", i, e))
        })?;
    }

    Ok(records.len())
}

/// Reads an import document from disk.
pub fn import_json(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)?;
    let document = parse_import(&contents)?;
    tracing::info!("Read import document from {}", path.display());
    Ok(document)
}
