use rand::distributions::{Distribution, WeightedIndex};

use super::elitist::ranked_indices;
use super::selection_strategy::{eligible_indices, SelectionStrategy};
use crate::error::{Result, TimetableError};
use crate::fitness::PenaltyScore;
use crate::rng::RandomNumberGenerator;

/// A selection strategy that spins a rank-weighted roulette wheel.
///
/// Penalties span several orders of magnitude (one hard violation outweighs any
/// number of soft ones), so slices proportional to the raw score would hand the
/// whole wheel to a single chromosome. Instead the eligible chromosomes are ranked
/// best to worst and the chromosome at rank `r` of `n` gets a slice of weight
/// `n - r`. The worst chromosome keeps a slice of weight 1.
///
/// # Examples
///
/// ```
/// use timetabler::fitness::PenaltyScore;
/// use timetabler::rng::RandomNumberGenerator;
/// use timetabler::selection::{RouletteWheelSelection, SelectionStrategy};
///
/// let scores = vec![
///     PenaltyScore { hard: 0, soft: 20 },
///     PenaltyScore { hard: 3000, soft: 0 },
/// ];
/// let mut rng = RandomNumberGenerator::from_seed(3);
///
/// let selection = RouletteWheelSelection::new();
/// let winner = selection.select_index(&scores, &mut rng, Some(0)).unwrap();
///
/// assert_eq!(winner, 1);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    pub fn new() -> Self {
        Self
    }
}

impl SelectionStrategy for RouletteWheelSelection {
    fn select_index(
        &self,
        scores: &[PenaltyScore],
        rng: &mut RandomNumberGenerator,
        excluded: Option<usize>,
    ) -> Result<usize> {
        let eligible = eligible_indices(scores.len(), excluded)?;
        let ranked = ranked_indices(scores, &eligible);
        let n = ranked.len();

        let wheel = WeightedIndex::new((0..n).map(|rank| n - rank))
            .map_err(|e| TimetableError::Selection(format!("Invalid roulette wheel: {e}")))?;

        Ok(ranked[wheel.sample(&mut rng.rng)])
    }
}
