//! Review cycle over the deck: reveal the answer, grade yourself, move on.
//!
//! The deck is treated as a ring. After the last card the session returns to the
//! first one; there is no end-of-deck state. Actions that are not legal in the
//! current state are ignored and reported as `false`.

use super::{Card, CardStore};

/// Self-assessment after the answer has been revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// The deck has no cards; only placeholder text can be shown.
    Empty,
    Unflipped,
    Flipped { graded: bool },
}

/// Position in the deck plus the guards for the current card.
/// The session only refers to the deck by index, it never owns cards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewSession {
    current_index: usize,
    flipped: bool,
    graded: bool,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the first card, answer hidden.
    pub fn reinitialize(&mut self) {
        self.current_index = 0;
        self.flipped = false;
        self.graded = false;
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn state(&self, store: &CardStore) -> SessionState {
        if store.is_empty() {
            SessionState::Empty
        } else if self.flipped {
            SessionState::Flipped {
                graded: self.graded,
            }
        } else {
            SessionState::Unflipped
        }
    }

    pub fn current_card<'a>(&self, store: &'a CardStore) -> Option<&'a Card> {
        store.get(self.current_index)
    }

    /// Shows the answer side of the current card.
    pub fn reveal(&mut self, store: &CardStore) -> bool {
        if self.state(store) != SessionState::Unflipped {
            return false;
        }
        self.flipped = true;
        true
    }

    /// Records the self-assessment for the current card. Only one grade is
    /// accepted per flip.
    pub fn grade(&mut self, store: &mut CardStore, outcome: Outcome) -> bool {
        if self.state(store) != (SessionState::Flipped { graded: false }) {
            return false;
        }
        if !store.record_outcome(self.current_index, outcome == Outcome::Correct) {
            return false;
        }
        self.graded = true;
        true
    }

    /// Moves to the next card once the current one has been graded.
    pub fn advance(&mut self, store: &CardStore) -> bool {
        if self.state(store) != (SessionState::Flipped { graded: true }) {
            return false;
        }
        self.current_index = (self.current_index + 1) % store.len();
        self.flipped = false;
        self.graded = false;
        true
    }
}
