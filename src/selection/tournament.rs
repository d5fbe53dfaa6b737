use super::selection_strategy::{eligible_indices, SelectionStrategy};
use crate::error::{Result, TimetableError};
use crate::fitness::PenaltyScore;
use crate::rng::RandomNumberGenerator;

/// A selection strategy that picks the best of a small random group.
///
/// Each tournament draws `tournament_size` contestants uniformly with replacement
/// and returns the one with the lowest penalty score, the lowest index on ties.
/// Because contestants are drawn with replacement, even the worst chromosome wins
/// whenever it is drawn alone, so no chromosome starves:
///
/// - Smaller tournament sizes lead to more exploration
/// - Larger tournament sizes lead to more exploitation
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(TimetableError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self { tournament_size: 3 }
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select_index(
        &self,
        scores: &[PenaltyScore],
        rng: &mut RandomNumberGenerator,
        excluded: Option<usize>,
    ) -> Result<usize> {
        let eligible = eligible_indices(scores.len(), excluded)?;

        let mut winner = eligible[rng.gen_index(eligible.len())];
        for _ in 1..self.tournament_size {
            let contestant = eligible[rng.gen_index(eligible.len())];
            if (scores[contestant], contestant) < (scores[winner], winner) {
                winner = contestant;
            }
        }

        Ok(winner)
    }
}
