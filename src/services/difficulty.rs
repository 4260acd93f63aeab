use rand::Rng;

use crate::models::domain::{QuizResult, Tier};

const HARD_THRESHOLD: f64 = 0.8;
const EASY_THRESHOLD: f64 = 0.4;

/// Aggregate correct/incorrect answer counts for one user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerformanceHistory {
    pub correct: u32,
    pub incorrect: u32,
}

impl PerformanceHistory {
    pub fn new(correct: u32, incorrect: u32) -> Self {
        Self { correct, incorrect }
    }

    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a QuizResult>) -> Self {
        results
            .into_iter()
            .fold(Self::default(), |acc, result| Self {
                correct: acc.correct + result.correct_count,
                incorrect: acc.incorrect + result.incorrect_count(),
            })
    }

    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect
    }

    pub fn correct_ratio(&self) -> Option<f64> {
        match self.answered() {
            0 => None,
            n => Some(self.correct as f64 / n as f64),
        }
    }

    /// Starting tier for a new adaptive quiz.
    pub fn initial_tier(&self) -> Tier {
        match self.correct_ratio() {
            Some(ratio) if ratio > HARD_THRESHOLD => Tier::Hard,
            Some(ratio) if ratio < EASY_THRESHOLD => Tier::Easy,
            _ => Tier::Medium,
        }
    }
}

/// Row of the drift table, in `Tier::ALL` order.
pub fn transition_weights(from: Tier) -> [f64; 3] {
    match from {
        Tier::Easy => [0.7, 0.3, 0.0],
        Tier::Medium => [0.2, 0.6, 0.2],
        Tier::Hard => [0.0, 0.3, 0.7],
    }
}

/// Maps a uniform sample in `[0, 1)` onto the next tier.
pub fn next_tier(current: Tier, sample: f64) -> Tier {
    let weights = transition_weights(current);
    let mut cumulative = 0.0;
    for (tier, weight) in Tier::ALL.iter().zip(weights) {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        if sample < cumulative {
            return *tier;
        }
    }
    // Samples at or above the accumulated weight (rounding) land on the last reachable tier.
    Tier::ALL
        .iter()
        .zip(weights)
        .rev()
        .find(|(_, weight)| *weight > 0.0)
        .map(|(tier, _)| *tier)
        .unwrap_or(current)
}

/// Tier for each of `count` questions: the first from history, the rest drifting.
pub fn tier_sequence<R: Rng + ?Sized>(
    history: &PerformanceHistory,
    count: usize,
    rng: &mut R,
) -> Vec<Tier> {
    let mut tiers = Vec::with_capacity(count);
    let mut current = history.initial_tier();
    for index in 0..count {
        if index > 0 {
            current = next_tier(current, rng.gen::<f64>());
        }
        tiers.push(current);
    }
    tiers
}
