//! Learning phase classification.
//!
//! A card's phase is derived only from its accuracy ratio R = correct / attempts * 100:
//! - R >= 80: phase 3, mastered
//! - 60 <= R < 80: phase 2, consolidating
//! - 10 <= R < 60: phase 1, reviewing
//! - R < 10 (including cards never attempted): phase 0, new

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    New,
    Reviewing,
    Consolidating,
    Mastered,
}

impl Phase {
    pub fn tier(self) -> u8 {
        match self {
            Phase::New => 0,
            Phase::Reviewing => 1,
            Phase::Consolidating => 2,
            Phase::Mastered => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::New => "New",
            Phase::Reviewing => "Reviewing",
            Phase::Consolidating => "Consolidating",
            Phase::Mastered => "Mastered",
        }
    }
}

/// Result of classifying a card's counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: Phase,
    /// Accuracy rounded to the nearest whole percent.
    pub percent: u32,
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Phase: {} ({}) ({}% correct)",
            self.phase.tier(),
            self.phase.label(),
            self.percent
        )
    }
}

/// Classifies a card by its accuracy.
/// Thresholds are compared in integer arithmetic; only the displayed percent is rounded.
pub fn classify(correct_count: u64, total_attempts: u64) -> PhaseReport {
    if total_attempts == 0 {
        return PhaseReport {
            phase: Phase::New,
            percent: 0,
        };
    }

    let correct = correct_count.min(total_attempts) as u128;
    let total = total_attempts as u128;
    let scaled = correct * 100;

    let phase = if scaled >= total * 80 {
        Phase::Mastered
    } else if scaled >= total * 60 {
        Phase::Consolidating
    } else if scaled >= total * 10 {
        Phase::Reviewing
    } else {
        Phase::New
    };

    let percent = (correct as f64 / total as f64 * 100.0).round() as u32;

    PhaseReport { phase, percent }
}
