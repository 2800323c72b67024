pub mod config;
pub mod controller;
pub mod database;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;

pub use controller::StudyController;
pub use error::FlashcardError;
pub use models::{Card, CardStore, DeckView, NewCard, Outcome, ReviewSession};
