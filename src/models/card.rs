//! Card is a true/false statement with its supporting notes and accuracy counters.
use super::phase::{PhaseReport, classify};
use crate::error::{FlashcardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SUBJECT: &str = "General";
pub const DEFAULT_TOPIC: &str = "No subject";

/// The expected verdict on a card's statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Answer {
    True,
    False,
}

impl Answer {
    pub fn label(self) -> &'static str {
        match self {
            Answer::True => "TRUE",
            Answer::False => "FALSE",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the canonical labels and the localized ones found in older exports.
impl FromStr for Answer {
    type Err = FlashcardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "TRUE" | "CERTO" | "VERDADEIRO" => Ok(Answer::True),
            "FALSE" | "ERRADO" | "FALSO" => Ok(Answer::False),
            other => Err(FlashcardError::InvalidNewCard(format!(
                "answer must be TRUE or FALSE, got '{}'",
                other
            ))),
        }
    }
}

impl From<Answer> for String {
    fn from(answer: Answer) -> Self {
        answer.label().to_string()
    }
}

/// Cards are only written by serde; reading always goes through `CardRecord`
/// so stored and imported documents follow the same defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub subject: String,
    pub topic: String,
    pub statement: String,
    pub hint: String,
    pub answer: Answer,
    pub explanation: String,
    pub mnemonic: String,
    pub correct_count: u64,
    pub total_attempts: u64,
}

impl Card {
    /// Counts one graded attempt. Counters stop at `u64::MAX`.
    pub fn record(&mut self, was_correct: bool) {
        self.total_attempts = self.total_attempts.saturating_add(1);
        if was_correct {
            self.correct_count = self.correct_count.saturating_add(1);
        }
    }

    pub fn phase(&self) -> PhaseReport {
        classify(self.correct_count, self.total_attempts)
    }

    /// Restores `correct_count <= total_attempts` for data that came from outside.
    pub(crate) fn clamp_counters(&mut self) {
        self.correct_count = self.correct_count.min(self.total_attempts);
    }
}

/// Raw input from the creation form. Empty strings mean "not filled in".
#[derive(Clone, Debug, Default)]
pub struct NewCard {
    pub subject: String,
    pub topic: String,
    pub statement: String,
    pub hint: String,
    pub answer: String,
    pub explanation: String,
    pub mnemonic: String,
}

/// A card-like record as found in a stored or imported document.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    #[serde(default, alias = "materia")]
    pub subject: Option<String>,
    #[serde(default, alias = "assunto")]
    pub topic: Option<String>,
    #[serde(default, alias = "afirmacao")]
    pub statement: Option<String>,
    #[serde(default, alias = "dica")]
    pub hint: Option<String>,
    #[serde(default, alias = "resposta")]
    pub answer: Option<String>,
    #[serde(default, alias = "justificativa")]
    pub explanation: Option<String>,
    #[serde(default, alias = "esquema")]
    pub mnemonic: Option<String>,
    #[serde(default)]
    pub correct_count: Option<u64>,
    #[serde(default)]
    pub total_attempts: Option<u64>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl CardRecord {
    /// Builds a card, requiring a statement and a true/false answer.
    /// Missing optional fields fall back to their defaults.
    pub fn into_card(self) -> Result<Card> {
        let statement = non_empty(self.statement)
            .ok_or_else(|| FlashcardError::InvalidNewCard("statement is required".to_string()))?;
        let answer: Answer = non_empty(self.answer)
            .ok_or_else(|| FlashcardError::InvalidNewCard("answer is required".to_string()))?
            .parse()?;

        let mut card = Card {
            subject: non_empty(self.subject).unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            topic: non_empty(self.topic).unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
            statement,
            hint: self.hint.unwrap_or_default(),
            answer,
            explanation: self.explanation.unwrap_or_default(),
            mnemonic: self.mnemonic.unwrap_or_default(),
            correct_count: self.correct_count.unwrap_or(0),
            total_attempts: self.total_attempts.unwrap_or(0),
        };
        card.clamp_counters();
        Ok(card)
    }
}

impl From<NewCard> for CardRecord {
    fn from(form: NewCard) -> Self {
        Self {
            subject: Some(form.subject),
            topic: Some(form.topic),
            statement: Some(form.statement),
            hint: Some(form.hint),
            answer: Some(form.answer),
            explanation: Some(form.explanation),
            mnemonic: Some(form.mnemonic),
            correct_count: None,
            total_attempts: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_parsing() {
        assert_eq!("TRUE".parse::<Answer>().unwrap(), Answer::True);
        assert_eq!(" false ".parse::<Answer>().unwrap(), Answer::False);
        assert_eq!("Certo".parse::<Answer>().unwrap(), Answer::True);
        assert_eq!("ERRADO".parse::<Answer>().unwrap(), Answer::False);
        assert!("maybe".parse::<Answer>().is_err());
    }

    #[test]
    fn test_record_increments_counters() {
        let mut card = CardRecord {
            statement: Some("water boils at 100C at sea level".to_string()),
            answer: Some("TRUE".to_string()),
            ..Default::default()
        }
        .into_card()
        .unwrap();

        card.record(true);
        card.record(false);
        assert_eq!(card.correct_count, 1);
        assert_eq!(card.total_attempts, 2);
    }

    #[test]
    fn test_form_defaults() {
        let card = CardRecord::from(NewCard {
            statement: "The sun is a star.".to_string(),
            answer: "true".to_string(),
            ..Default::default()
        })
        .into_card()
        .unwrap();

        assert_eq!(card.subject, DEFAULT_SUBJECT);
        assert_eq!(card.topic, DEFAULT_TOPIC);
        assert_eq!(card.hint, "");
        assert_eq!(card.answer, Answer::True);
        assert_eq!(card.total_attempts, 0);
    }

    #[test]
    fn test_missing_statement_rejected() {
        let result = CardRecord::from(NewCard {
            statement: "   ".to_string(),
            answer: "FALSE".to_string(),
            ..Default::default()
        })
        .into_card();

        assert!(matches!(result, Err(FlashcardError::InvalidNewCard(_))));
    }

    #[test]
    fn test_counters_clamped() {
        let card = CardRecord {
            statement: Some("x".to_string()),
            answer: Some("FALSE".to_string()),
            correct_count: Some(9),
            total_attempts: Some(4),
            ..Default::default()
        }
        .into_card()
        .unwrap();

        assert_eq!(card.correct_count, 4);
        assert_eq!(card.total_attempts, 4);
    }

    #[test]
    fn test_record_saturates_at_max() {
        let mut card = CardRecord {
            statement: Some("x".to_string()),
            answer: Some("TRUE".to_string()),
            correct_count: Some(u64::MAX),
            total_attempts: Some(u64::MAX),
            ..Default::default()
        }
        .into_card()
        .unwrap();

        card.record(false);
        card.record(true);
        assert_eq!(card.total_attempts, u64::MAX);
        assert_eq!(card.correct_count, u64::MAX);
    }

    #[test]
    fn test_legacy_keys_accepted() {
        let json = r#"{
  "materia": "Ciências",
  "assunto": "Ecologia",
  "afirmacao": "Os produtores são a base da cadeia alimentar.",
  "resposta": "CERTO",
  "correctCount": 2,
  "totalAttempts": 3
}"#;

        let record: CardRecord = serde_json::from_str(json).unwrap();
        let card = record.into_card().unwrap();
        assert_eq!(card.subject, "Ciências");
        assert_eq!(card.answer, Answer::True);
        assert_eq!(card.hint, "");
        assert_eq!(card.correct_count, 2);
    }

    #[test]
    fn test_answer_serialized_as_label() {
        let json = serde_json::to_string(&Answer::False).unwrap();
        assert_eq!(json, "\"FALSE\"");
    }
}
