//! Read-only projection of the deck and session for the rendering layer.
//! The UI draws a `DeckView` and never inspects the session guards itself.

use super::phase::PhaseReport;
use super::review_session::{ReviewSession, SessionState};
use super::score::{Score, aggregate};
use super::{Card, CardStore};

pub const EMPTY_DECK_TITLE: &str = "No cards";
pub const EMPTY_DECK_SUBTITLE: &str = "Create a new card!";
pub const EMPTY_DECK_MESSAGE: &str = "Use the \"Create new card\" button below.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardView {
    pub position: usize,
    pub subject: String,
    pub topic: String,
    pub statement: String,
    pub hint: String,
    pub answer: String,
    pub explanation: String,
    pub mnemonic: String,
    pub phase: PhaseReport,
}

impl CardView {
    fn from_card(position: usize, card: &Card) -> Self {
        Self {
            position,
            subject: format!("Subject: {}", card.subject),
            topic: format!("Topic: {}", card.topic),
            statement: card.statement.clone(),
            hint: card.hint.clone(),
            answer: card.answer.label().to_string(),
            explanation: card.explanation.clone(),
            mnemonic: card.mnemonic.clone(),
            phase: card.phase(),
        }
    }
}

/// Which actions the presentation should offer right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub can_reveal: bool,
    pub can_grade: bool,
    pub can_advance: bool,
}

impl From<SessionState> for Controls {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::Empty => Controls::default(),
            SessionState::Unflipped => Controls {
                can_reveal: true,
                ..Default::default()
            },
            SessionState::Flipped { graded } => Controls {
                can_reveal: false,
                can_grade: !graded,
                can_advance: graded,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckView {
    /// None when the deck is empty.
    pub card: Option<CardView>,
    pub deck_size: usize,
    pub flipped: bool,
    pub score: Score,
    pub controls: Controls,
}

impl DeckView {
    pub fn score_text(&self) -> String {
        self.score.to_string()
    }
}

pub fn project(store: &CardStore, session: &ReviewSession) -> DeckView {
    let state = session.state(store);
    DeckView {
        card: session
            .current_card(store)
            .map(|card| CardView::from_card(session.current_index(), card)),
        deck_size: store.len(),
        flipped: matches!(state, SessionState::Flipped { .. }),
        score: aggregate(store),
        controls: Controls::from(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Outcome, Phase};

    #[test]
    fn test_empty_deck_projection() {
        let view = project(&CardStore::default(), &ReviewSession::new());
        assert!(view.card.is_none());
        assert_eq!(view.controls, Controls::default());
        assert_eq!(view.score_text(), "Correct: 0 / Total attempts: 0");
    }

    #[test]
    fn test_controls_follow_session() {
        let mut store = CardStore::seed();
        let mut session = ReviewSession::new();

        let view = project(&store, &session);
        assert!(view.controls.can_reveal && !view.controls.can_grade && !view.controls.can_advance);

        session.reveal(&store);
        let view = project(&store, &session);
        assert!(view.flipped);
        assert!(!view.controls.can_reveal && view.controls.can_grade && !view.controls.can_advance);

        session.grade(&mut store, Outcome::Correct);
        let view = project(&store, &session);
        assert!(!view.controls.can_grade && view.controls.can_advance);
    }

    #[test]
    fn test_card_fields_and_phase() {
        let mut store = CardStore::seed();
        let mut session = ReviewSession::new();
        session.reveal(&store);
        session.grade(&mut store, Outcome::Correct);

        let card = project(&store, &session).card.unwrap();
        assert_eq!(card.position, 0);
        assert_eq!(card.subject, "Subject: Science");
        assert_eq!(card.topic, "Topic: Ecology");
        assert_eq!(card.answer, "TRUE");
        assert_eq!(card.phase.phase, Phase::Mastered);
        assert_eq!(card.phase.percent, 100);
    }
}
