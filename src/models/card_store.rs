//! The deck: an ordered collection of cards that owns every mutation of them.
//! Insertion order is the order cards are cycled through during review.

use super::{Answer, Card, CardRecord, NewCard};
use crate::error::{FlashcardError, Result};
use serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardStore {
    cards: Vec<Card>,
}

impl CardStore {
    pub fn new(cards: Vec<Card>) -> Self {
        let mut store = Self { cards };
        store.cards.iter_mut().for_each(Card::clamp_counters);
        store
    }

    /// The two example cards shown on first run.
    pub fn seed() -> Self {
        Self::new(vec![
            Card {
                subject: "Science".to_string(),
                topic: "Ecology".to_string(),
                statement: "Producers are the base of the food chain.".to_string(),
                hint: "Remember: they make their own food through photosynthesis.".to_string(),
                answer: Answer::True,
                explanation: "Producers (autotrophs) are the foundation of every food chain."
                    .to_string(),
                mnemonic: "🌿 Photosynthesis → Solar energy → Glucose".to_string(),
                correct_count: 0,
                total_attempts: 0,
            },
            Card {
                subject: "History".to_string(),
                topic: "Middle Ages".to_string(),
                statement: "Feudalism was a system exclusive to Western Europe.".to_string(),
                hint: "Think about other regions of the world with similar structures."
                    .to_string(),
                answer: Answer::False,
                explanation: "Classic feudalism is European, but similar social and economic \
                              structures (such as feudal Japan) existed elsewhere."
                    .to_string(),
                mnemonic: "Europe (Suzerain/Vassal); Japan (Daimyo/Samurai)".to_string(),
                correct_count: 0,
                total_attempts: 0,
            },
        ])
    }

    /// Restores a deck from its serialized form.
    /// Malformed data never reaches the caller: the seed deck is used instead.
    /// Cards are read with the same rules as imported records.
    pub fn load(serialized: &str) -> Self {
        let parsed = serde_json::from_str::<Vec<CardRecord>>(serialized)
            .map_err(FlashcardError::from)
            .and_then(|records| {
                records
                    .into_iter()
                    .map(CardRecord::into_card)
                    .collect::<Result<Vec<Card>>>()
            });

        match parsed {
            Ok(cards) => {
                tracing::debug!("Loaded {} cards from stored deck", cards.len());
                Self::new(cards)
            }
            Err(e) => {
                tracing::warn!("Stored deck is malformed ({}), falling back to seed deck", e);
                Self::seed()
            }
        }
    }

    /// Pretty-printed JSON of every card, counters included.
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.cards)?)
    }

    /// Appends a card from the creation form. Returns the new card count.
    /// Nothing is changed when the statement or answer is missing.
    pub fn add(&mut self, candidate: NewCard) -> Result<usize> {
        let mut card = CardRecord::from(candidate).into_card()?;
        card.correct_count = 0;
        card.total_attempts = 0;

        self.cards.push(card);
        Ok(self.cards.len())
    }

    /// Appends every valid card-like record in `candidates`, keeping their counters.
    ///
    /// Records without a statement or answer are skipped. If `candidates` is not an
    /// array of objects the deck is left untouched and an error is returned.
    pub fn merge(&mut self, candidates: &Value) -> Result<usize> {
        let records = candidates.as_array().ok_or_else(|| {
            FlashcardError::InvalidImportFormat("expected an array of cards".to_string())
        })?;

        if let Some(position) = records.iter().position(|r| !r.is_object()) {
            return Err(FlashcardError::InvalidImportFormat(format!(
                "element {} is not a card object",
                position
            )));
        }

        let valid: Vec<Card> = records
            .iter()
            .enumerate()
            .filter_map(|(i, record)| match record_to_card(record) {
                Ok(card) => Some(card),
                Err(e) => {
                    tracing::debug!("Skipping imported element {}: {}", i, e);
                    None
                }
            })
            .collect();

        let merged = valid.len();
        self.cards.extend(valid);
        Ok(merged)
    }

    /// Counts one graded attempt on the card at `index`.
    /// Returns false, changing nothing, when the index is out of bounds.
    pub fn record_outcome(&mut self, index: usize, was_correct: bool) -> bool {
        match self.cards.get_mut(index) {
            Some(card) => {
                card.record(was_correct);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Converts one card-like JSON object, applying the same rules as the creation form.
pub(crate) fn record_to_card(record: &Value) -> Result<Card> {
    let record: CardRecord = serde_json::from_value(record.clone())
        .map_err(|e| FlashcardError::InvalidNewCard(e.to_string()))?;
    record.into_card()
}
