use crate::error::{Result, TimetableError};
use crate::fitness::PenaltyScore;

/// Orders `candidates` best first by `(score, index)`.
pub fn ranked_indices(scores: &[PenaltyScore], candidates: &[usize]) -> Vec<usize> {
    let mut ranked = candidates.to_vec();
    ranked.sort_by_key(|&idx| (scores[idx], idx));
    ranked
}

/// Index of the best score, the lowest index on ties.
pub fn best_index(scores: &[PenaltyScore]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .min_by_key(|&(idx, score)| (*score, idx))
        .map(|(idx, _)| idx)
}

/// Indices of the `count` best scores, best first. Fewer when `scores` is shorter.
pub fn elite_indices(scores: &[PenaltyScore], count: usize) -> Vec<usize> {
    let all: Vec<usize> = (0..scores.len()).collect();
    let mut ranked = ranked_indices(scores, &all);
    ranked.truncate(count);
    ranked
}

/// Picks the chromosomes copied unchanged into the next generation.
///
/// Carrying at least the best chromosome forward keeps the best score of a run
/// from ever getting worse between generations.
///
/// # Examples
///
/// ```
/// use timetabler::fitness::PenaltyScore;
/// use timetabler::selection::ElitistSelection;
///
/// let scores = vec![
///     PenaltyScore { hard: 1000, soft: 0 },
///     PenaltyScore { hard: 0, soft: 15 },
///     PenaltyScore { hard: 0, soft: 15 },
/// ];
///
/// let elitism = ElitistSelection::new(2).unwrap();
/// assert_eq!(elitism.select(&scores), vec![1, 2]);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct ElitistSelection {
    elite_count: usize,
}

impl ElitistSelection {
    /// # Errors
    ///
    /// Returns an error if `elite_count` is 0.
    pub fn new(elite_count: usize) -> Result<Self> {
        if elite_count == 0 {
            return Err(TimetableError::Configuration(
                "Elite count must be at least 1".to_string(),
            ));
        }
        Ok(Self { elite_count })
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    pub fn select(&self, scores: &[PenaltyScore]) -> Vec<usize> {
        elite_indices(scores, self.elite_count)
    }
}

impl Default for ElitistSelection {
    fn default() -> Self {
        Self { elite_count: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(hard: u64, soft: u64) -> PenaltyScore {
        PenaltyScore { hard, soft }
    }

    #[test]
    fn test_best_index() {
        assert_eq!(best_index(&[]), None);
        assert_eq!(best_index(&[score(10, 0), score(0, 99), score(0, 99)]), Some(1));
    }

    #[test]
    fn test_hard_penalty_dominates() {
        let scores = vec![score(1000, 0), score(0, 500), score(2000, 0)];
        let elitism = ElitistSelection::new(2).unwrap();
        assert_eq!(elitism.select(&scores), vec![1, 0]);
    }

    #[test]
    fn test_count_larger_than_population() {
        let elitism = ElitistSelection::new(5).unwrap();
        assert_eq!(elitism.select(&[score(3, 0), score(1, 0)]), vec![1, 0]);
    }

    #[test]
    fn test_elite_indices_ties_keep_population_order() {
        let scores = vec![score(0, 5), score(0, 1), score(0, 5), score(0, 1)];
        assert_eq!(elite_indices(&scores, 3), vec![1, 3, 0]);
        assert!(elite_indices(&scores, 0).is_empty());
    }

    #[test]
    fn test_zero_count_is_rejected() {
        assert!(ElitistSelection::new(0).is_err());
        assert_eq!(ElitistSelection::default().elite_count(), 1);
    }

    #[test]
    fn test_ranked_indices_subset() {
        let scores = vec![score(0, 9), score(0, 1), score(0, 5)];
        assert_eq!(ranked_indices(&scores, &[0, 2]), vec![2, 0]);
    }
}
