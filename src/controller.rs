//! Study controller: owns the deck, the review session and the storage slot.
//!
//! Every handler corresponds to one user action. Handlers that change the deck
//! save it before returning, so at most the action in flight can be lost.

use crate::database::PersistenceGateway;
use crate::error::{FlashcardError, Result};
use crate::export::json::{export_json_to_path, import_json, parse_import, validate_import};
use crate::models::{CardStore, DeckView, NewCard, Outcome, ReviewSession, project};
use serde_json::Value;
use std::path::Path;
use std::time::SystemTime;

pub struct StudyController {
    store: CardStore,
    session: ReviewSession,
    gateway: Box<dyn PersistenceGateway>,
    last_saved: Option<SystemTime>,
}

impl StudyController {
    /// Loads the deck from the gateway. An empty or unreadable slot yields the seed deck.
    pub fn open(gateway: Box<dyn PersistenceGateway>) -> Self {
        let store = match gateway.load() {
            Ok(Some(serialized)) => CardStore::load(&serialized),
            Ok(None) => {
                tracing::info!("No saved deck found, starting with the seed deck");
                CardStore::seed()
            }
            Err(e) => {
                tracing::warn!("Failed to read saved deck ({}), starting with the seed deck", e);
                CardStore::seed()
            }
        };
        tracing::info!("Deck opened with {} cards", store.len());

        Self {
            store,
            session: ReviewSession::new(),
            gateway,
            last_saved: None,
        }
    }

    pub fn store(&self) -> &CardStore {
        &self.store
    }

    pub fn session(&self) -> &ReviewSession {
        &self.session
    }

    pub fn last_saved(&self) -> Option<SystemTime> {
        self.last_saved
    }

    pub fn view(&self) -> DeckView {
        project(&self.store, &self.session)
    }

    pub fn reveal(&mut self) -> bool {
        self.session.reveal(&self.store)
    }

    /// Grades the current card and saves the updated counters.
    pub fn grade(&mut self, outcome: Outcome) -> Result<bool> {
        if !self.session.grade(&mut self.store, outcome) {
            tracing::debug!("Ignoring grade outside of a fresh flip");
            return Ok(false);
        }
        tracing::debug!(
            "Graded card {} as {:?}",
            self.session.current_index(),
            outcome
        );
        self.persist(1)?;
        Ok(true)
    }

    pub fn advance(&mut self) -> bool {
        self.session.advance(&self.store)
    }

    /// Adds a card from the creation form. Returns the new deck size.
    ///
    /// A failed save is reported as `PersistFailed`; the card stays in the deck.
    pub fn add_card(&mut self, candidate: NewCard) -> Result<usize> {
        let count = self.store.add(candidate)?;
        tracing::info!("Card added, deck now has {} cards", count);

        if count == 1 {
            self.session.reinitialize();
        }
        self.persist(count)?;
        Ok(count)
    }

    /// Imports a JSON document. The deck is untouched unless every element is a
    /// valid card. Returns the number of cards added.
    pub fn import_document(&mut self, contents: &str) -> Result<usize> {
        let document = parse_import(contents)?;
        self.import_value(&document)
    }

    pub fn import_file(&mut self, path: &Path) -> Result<usize> {
        let document = import_json(path)?;
        self.import_value(&document)
    }

    fn import_value(&mut self, document: &Value) -> Result<usize> {
        validate_import(document)?;
        let merged = self.store.merge(document)?;
        tracing::info!("Imported {} cards, deck now has {}", merged, self.store.len());

        self.session.reinitialize();
        self.persist(merged)?;
        Ok(merged)
    }

    pub fn export_json(&self) -> Result<String> {
        self.store.serialize()
    }

    pub fn export_file(&self, path: &Path) -> Result<()> {
        export_json_to_path(&self.store, path)
    }

    /// Saves the deck after an action that already changed it.
    fn persist(&mut self, applied: usize) -> Result<()> {
        let saved = self
            .store
            .serialize()
            .and_then(|serialized| self.gateway.save(&serialized));

        match saved {
            Ok(()) => {
                self.last_saved = Some(SystemTime::now());
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to save deck: {}", e);
                Err(FlashcardError::PersistFailed {
                    applied,
                    source: Box::new(e),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryGateway;
    use crate::models::SessionState;

    /// Storage whose writes always fail.
    struct FailingGateway;

    impl PersistenceGateway for FailingGateway {
        fn load(&self) -> Result<Option<String>> {
            Ok(Some("[]".to_string()))
        }

        fn save(&mut self, _serialized: &str) -> Result<()> {
            Err(FlashcardError::Io(std::io::Error::other("disk full")))
        }
    }

    fn empty_controller() -> StudyController {
        StudyController::open(Box::new(MemoryGateway::with_contents("[]")))
    }

    #[test]
    fn test_open_without_saved_deck_uses_seed() {
        let controller = StudyController::open(Box::new(MemoryGateway::default()));
        assert_eq!(controller.store(), &CardStore::seed());
        assert!(controller.last_saved().is_none());
    }

    #[test]
    fn test_open_with_malformed_deck_uses_seed() {
        let controller = StudyController::open(Box::new(MemoryGateway::with_contents("nope")));
        assert_eq!(controller.store().len(), 2);
    }

    #[test]
    fn test_grade_persists() {
        let mut controller = StudyController::open(Box::new(MemoryGateway::default()));
        assert!(controller.reveal());
        assert!(controller.grade(Outcome::Correct).unwrap());
        assert!(!controller.grade(Outcome::Correct).unwrap());
        assert!(controller.last_saved().is_some());

        let saved = controller.export_json().unwrap();
        assert_eq!(CardStore::load(&saved).get(0).unwrap().correct_count, 1);
    }

    #[test]
    fn test_add_first_card_initializes_session() {
        let mut controller = empty_controller();
        assert!(!controller.view().controls.can_reveal);

        let count = controller
            .add_card(NewCard {
                statement: "a".to_string(),
                answer: "TRUE".to_string(),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(controller.session().state(controller.store()), SessionState::Unflipped);
        assert!(controller.view().controls.can_reveal);
    }

    #[test]
    fn test_add_invalid_card_keeps_deck() {
        let mut controller = empty_controller();
        let result = controller.add_card(NewCard::default());

        assert!(matches!(result, Err(FlashcardError::InvalidNewCard(_))));
        assert!(controller.store().is_empty());
        assert!(controller.last_saved().is_none());
    }

    #[test]
    fn test_import_into_empty_deck() {
        let mut controller = empty_controller();
        let merged = controller
            .import_document(r#"[{"statement": "a", "answer": "TRUE"}]"#)
            .unwrap();

        assert_eq!(merged, 1);
        assert_eq!(controller.session().current_index(), 0);
        assert_eq!(controller.session().state(controller.store()), SessionState::Unflipped);
    }

    #[test]
    fn test_import_resets_session_position() {
        let mut controller = StudyController::open(Box::new(MemoryGateway::default()));
        controller.reveal();
        controller.grade(Outcome::Incorrect).unwrap();
        controller.advance();
        assert_eq!(controller.session().current_index(), 1);

        controller
            .import_document(r#"[{"statement": "b", "answer": "FALSE"}]"#)
            .unwrap();
        assert_eq!(controller.session().current_index(), 0);
        assert_eq!(controller.store().len(), 3);
    }

    #[test]
    fn test_import_with_invalid_element_rejected() {
        let mut controller = StudyController::open(Box::new(MemoryGateway::default()));
        let result = controller
            .import_document(r#"[{"statement": "x", "answer": "TRUE"}, {"answer": "FALSE"}]"#);

        assert!(matches!(result, Err(FlashcardError::InvalidImportFormat(_))));
        assert_eq!(controller.store(), &CardStore::seed());
    }

    #[test]
    fn test_add_card_save_failure_is_not_a_validation_error() {
        let mut controller = StudyController::open(Box::new(FailingGateway));
        let result = controller.add_card(NewCard {
            statement: "a".to_string(),
            answer: "TRUE".to_string(),
            ..Default::default()
        });

        match result {
            Err(FlashcardError::PersistFailed { applied, source }) => {
                assert_eq!(applied, 1);
                assert!(matches!(*source, FlashcardError::Io(_)));
            }
            other => panic!("expected PersistFailed, got {:?}", other),
        }
        assert_eq!(controller.store().len(), 1);
        assert!(controller.last_saved().is_none());
        assert_eq!(controller.session().state(controller.store()), SessionState::Unflipped);
    }

    #[test]
    fn test_import_save_failure_still_reinitializes() {
        let mut controller = StudyController::open(Box::new(FailingGateway));
        let result = controller.import_document(
            r#"[{"statement": "a", "answer": "TRUE"}, {"statement": "b", "answer": "FALSE"}]"#,
        );

        assert!(matches!(
            result,
            Err(FlashcardError::PersistFailed { applied: 2, .. })
        ));
        assert_eq!(controller.store().len(), 2);
        assert_eq!(controller.session().current_index(), 0);
        assert!(controller.view().controls.can_reveal);
    }

    #[test]
    fn test_grade_save_failure_keeps_grade_guard() {
        let mut controller = StudyController::open(Box::new(FailingGateway));
        controller
            .import_document(r#"[{"statement": "a", "answer": "TRUE"}]"#)
            .unwrap_err();
        controller.reveal();

        assert!(matches!(
            controller.grade(Outcome::Correct),
            Err(FlashcardError::PersistFailed { .. })
        ));
        assert!(!controller.grade(Outcome::Correct).unwrap());
        assert_eq!(controller.store().get(0).unwrap().total_attempts, 1);
    }

    #[test]
    fn test_huge_imported_counters_can_be_graded() {
        let mut controller = empty_controller();
        controller
            .import_document(&format!(
                r#"[{{"statement": "a", "answer": "TRUE", "correctCount": {max}, "totalAttempts": {max}}},
                    {{"statement": "b", "answer": "TRUE", "correctCount": 1, "totalAttempts": 1}}]"#,
                max = u64::MAX
            ))
            .unwrap();

        assert_eq!(controller.view().score.attempts, u64::MAX);
        controller.reveal();
        assert!(controller.grade(Outcome::Incorrect).unwrap());
        assert_eq!(controller.store().get(0).unwrap().total_attempts, u64::MAX);
    }
}
