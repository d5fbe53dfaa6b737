use std::fmt::Debug;

use crate::error::{Result, TimetableError};
use crate::fitness::PenaltyScore;
use crate::rng::RandomNumberGenerator;

/// Indices of the two chromosomes chosen to reproduce.
///
/// Parents are referenced by position so they stay shared, read-only, while
/// offspring are built from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentPair {
    pub first: usize,
    pub second: usize,
}

/// Trait for parent selection strategies.
///
/// Strategies work on the penalty scores of a population, where a lower score is
/// better, and must give every chromosome a non-zero chance of being picked.
///
/// # Examples
///
/// ```
/// use timetabler::fitness::PenaltyScore;
/// use timetabler::rng::RandomNumberGenerator;
/// use timetabler::selection::{SelectionStrategy, TournamentSelection};
///
/// let scores = vec![
///     PenaltyScore { hard: 2000, soft: 0 },
///     PenaltyScore { hard: 0, soft: 15 },
///     PenaltyScore { hard: 1000, soft: 5 },
/// ];
/// let mut rng = RandomNumberGenerator::from_seed(42);
///
/// let selection = TournamentSelection::new(2).unwrap();
/// let parents = selection.select_parents(&scores, &mut rng).unwrap();
///
/// assert_ne!(parents.first, parents.second);
/// ```
pub trait SelectionStrategy: Debug + Send + Sync {
    /// Picks one index of `scores`, never `excluded`.
    ///
    /// # Errors
    ///
    /// Returns an error if `scores` is empty or every index is excluded.
    fn select_index(
        &self,
        scores: &[PenaltyScore],
        rng: &mut RandomNumberGenerator,
        excluded: Option<usize>,
    ) -> Result<usize>;

    /// Picks two distinct parents.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two chromosomes are available.
    fn select_parents(
        &self,
        scores: &[PenaltyScore],
        rng: &mut RandomNumberGenerator,
    ) -> Result<ParentPair> {
        if scores.is_empty() {
            return Err(TimetableError::EmptyPopulation);
        }
        if scores.len() < 2 {
            return Err(TimetableError::Selection(
                "Two distinct parents need a population of at least two".to_string(),
            ));
        }

        let first = self.select_index(scores, rng, None)?;
        let second = self.select_index(scores, rng, Some(first))?;
        Ok(ParentPair { first, second })
    }
}

/// Indices of `0..len` except `excluded`.
pub(crate) fn eligible_indices(len: usize, excluded: Option<usize>) -> Result<Vec<usize>> {
    if len == 0 {
        return Err(TimetableError::EmptyPopulation);
    }
    let eligible: Vec<usize> = (0..len).filter(|&idx| Some(idx) != excluded).collect();
    if eligible.is_empty() {
        return Err(TimetableError::Selection(
            "No eligible chromosomes for selection".to_string(),
        ));
    }
    Ok(eligible)
}
