use super::CardStore;
use std::fmt;

/// Deck-wide totals, recomputed from the cards whenever they are needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: u64,
    pub attempts: u64,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Correct: {} / Total attempts: {}",
            self.correct, self.attempts
        )
    }
}

/// Totals stop at `u64::MAX` instead of wrapping.
pub fn aggregate(store: &CardStore) -> Score {
    store.cards().iter().fold(Score::default(), |score, card| Score {
        correct: score.correct.saturating_add(card.correct_count),
        attempts: score.attempts.saturating_add(card.total_attempts),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        assert_eq!(aggregate(&CardStore::default()), Score::default());
    }

    #[test]
    fn test_sums_all_cards() {
        let mut store = CardStore::seed();
        store.record_outcome(0, true);
        store.record_outcome(0, true);
        store.record_outcome(1, false);

        let score = aggregate(&store);
        assert_eq!(score.correct, 2);
        assert_eq!(score.attempts, 3);
        assert_eq!(score.to_string(), "Correct: 2 / Total attempts: 3");
    }

    #[test]
    fn test_totals_saturate() {
        let mut store = CardStore::default();
        store
            .merge(&serde_json::json!([
                {"statement": "a", "answer": "TRUE", "correctCount": u64::MAX, "totalAttempts": u64::MAX},
                {"statement": "b", "answer": "FALSE", "correctCount": 1, "totalAttempts": 1}
            ]))
            .unwrap();

        let score = aggregate(&store);
        assert_eq!(score.correct, u64::MAX);
        assert_eq!(score.attempts, u64::MAX);
    }
}
