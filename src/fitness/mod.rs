//! # Fitness
//!
//! Turns constraint violation counts into a comparable score.
//!
//! A [`PenaltyBreakdown`] records the count of every constraint kind and the
//! weighted hard and soft penalty sums. Its [`PenaltyScore`] is the single total
//! order used by selection and elitism: lower hard penalty first, then lower soft
//! penalty. [`PenaltyScore::fitness`] maps the same information to `(0, 1]` as
//! `1 / (1 + penalty)`.

mod weights;

use std::fmt::Display;

pub use weights::{ConstraintWeights, ConstraintWeightsBuilder};

use crate::catalog::Catalog;
use crate::chromosome::Chromosome;
use crate::constraints::{ConstraintKind, ConstraintManager};

/// Weighted penalty of a chromosome. Ordered lexicographically, lower is better.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PenaltyScore {
    pub hard: u64,
    pub soft: u64,
}

impl PenaltyScore {
    pub fn total(&self) -> u64 {
        self.hard.saturating_add(self.soft)
    }

    pub fn fitness(&self) -> f64 {
        1.0 / (1.0 + self.total() as f64)
    }
}

impl Display for PenaltyScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hard={} soft={}", self.hard, self.soft)
    }
}

/// Violation counts per constraint kind and the resulting weighted penalties.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PenaltyBreakdown {
    pub faculty_clashes: u32,
    pub room_clashes: u32,
    pub section_clashes: u32,
    pub faculty_unavailable: u32,
    pub lab_continuity: u32,
    pub lunch_intrusions: u32,
    pub load_imbalance: u32,
    pub hard_penalty: u64,
    pub soft_penalty: u64,
}

impl PenaltyBreakdown {
    pub fn count(&self, kind: ConstraintKind) -> u32 {
        match kind {
            ConstraintKind::FacultyClash => self.faculty_clashes,
            ConstraintKind::RoomClash => self.room_clashes,
            ConstraintKind::SectionClash => self.section_clashes,
            ConstraintKind::FacultyUnavailable => self.faculty_unavailable,
            ConstraintKind::LabContinuity => self.lab_continuity,
            ConstraintKind::LunchIntrusion => self.lunch_intrusions,
            ConstraintKind::LoadImbalance => self.load_imbalance,
        }
    }

    fn count_mut(&mut self, kind: ConstraintKind) -> &mut u32 {
        match kind {
            ConstraintKind::FacultyClash => &mut self.faculty_clashes,
            ConstraintKind::RoomClash => &mut self.room_clashes,
            ConstraintKind::SectionClash => &mut self.section_clashes,
            ConstraintKind::FacultyUnavailable => &mut self.faculty_unavailable,
            ConstraintKind::LabContinuity => &mut self.lab_continuity,
            ConstraintKind::LunchIntrusion => &mut self.lunch_intrusions,
            ConstraintKind::LoadImbalance => &mut self.load_imbalance,
        }
    }

    /// Adds `count` violations of `kind`, each costing `weight`.
    pub fn record(&mut self, kind: ConstraintKind, count: u32, weight: u64) {
        *self.count_mut(kind) += count;
        let penalty = weight.saturating_mul(u64::from(count));
        if kind.is_hard() {
            self.hard_penalty = self.hard_penalty.saturating_add(penalty);
        } else {
            self.soft_penalty = self.soft_penalty.saturating_add(penalty);
        }
    }

    pub fn score(&self) -> PenaltyScore {
        PenaltyScore {
            hard: self.hard_penalty,
            soft: self.soft_penalty,
        }
    }

    pub fn fitness(&self) -> f64 {
        self.score().fitness()
    }

    /// Total number of hard-constraint violations.
    pub fn hard_violations(&self) -> u32 {
        ConstraintKind::ALL
            .iter()
            .filter(|kind| kind.is_hard())
            .map(|&kind| self.count(kind))
            .sum()
    }

    /// `true` when no hard constraint is violated. Soft violations may remain.
    pub fn is_perfect(&self) -> bool {
        self.hard_violations() == 0
    }
}

/// Scores chromosomes. Implementations must be deterministic and thread-safe,
/// since a generation is evaluated in parallel.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, chromosome: &Chromosome) -> PenaltyBreakdown;
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&self, chromosome: &Chromosome) -> PenaltyBreakdown {
        (**self).evaluate(chromosome)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, chromosome: &Chromosome) -> PenaltyBreakdown {
        (**self).evaluate(chromosome)
    }
}

/// Runs the catalog's checkers and weighs their counts with the catalog's weights.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<'a> {
    catalog: &'a Catalog,
    constraints: ConstraintManager,
}

impl<'a> FitnessEvaluator<'a> {
    /// An evaluator with the [standard](ConstraintManager::standard) rule set.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_constraints(catalog, ConstraintManager::standard())
    }

    pub fn with_constraints(catalog: &'a Catalog, constraints: ConstraintManager) -> Self {
        Self {
            catalog,
            constraints,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }
}

impl Evaluator for FitnessEvaluator<'_> {
    fn evaluate(&self, chromosome: &Chromosome) -> PenaltyBreakdown {
        let weights = self.catalog.weights();
        let mut breakdown = PenaltyBreakdown::default();
        for (kind, count) in self.constraints.check_all(chromosome, self.catalog) {
            breakdown.record(kind, count, weights.weight(kind));
        }
        breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogBuilder, FacultyId, RoomId, SlotId};
    use crate::chromosome::Gene;

    fn catalog() -> Catalog {
        let mut builder = CatalogBuilder::new();
        let theory = builder.add_subject("Compilers", "CS401", 2, false);
        let lab = builder.add_subject("Compilers Lab", "CS491", 1, true);
        builder.add_faculty("Dr. Mehta", [theory, lab], []);
        builder.add_room("R-9", 60, true);
        builder.weekly_grid(1, 6, 3, 1);
        let section = builder.add_section("CSE-C", 50);
        builder.require(section, theory).require(section, lab);
        builder.build().unwrap()
    }

    fn chromosome(catalog: &Catalog, slots: [(usize, Option<usize>); 3]) -> Chromosome {
        let genes = catalog
            .sessions()
            .iter()
            .zip(slots)
            .map(|(session, (slot, lab_slot))| Gene {
                section: session.section,
                subject: session.subject,
                session: session.index,
                slot: SlotId(slot),
                lab_slot: lab_slot.map(SlotId),
                room: RoomId(0),
                faculty: FacultyId(0),
            })
            .collect();
        Chromosome::from_genes(catalog, genes).unwrap()
    }

    #[test]
    fn test_zero_hard_penalty_for_clean_schedule() {
        let catalog = catalog();
        let evaluator = FitnessEvaluator::new(&catalog);
        let breakdown = evaluator.evaluate(&chromosome(&catalog, [(0, None), (1, None), (4, Some(5))]));

        assert!(breakdown.is_perfect());
        assert_eq!(breakdown.hard_penalty, 0);
        assert_eq!(breakdown.score().hard, 0);
    }

    #[test]
    fn test_soft_violations_do_not_spoil_perfection() {
        let catalog = catalog();
        let evaluator = FitnessEvaluator::new(&catalog);
        // theory in the lunch period 3 while periods 2, 4 and 5 are free
        let breakdown = evaluator.evaluate(&chromosome(&catalog, [(0, None), (3, None), (1, Some(2))]));

        assert_eq!(breakdown.lunch_intrusions, 1);
        assert_eq!(breakdown.soft_penalty, 10);
        assert!(breakdown.is_perfect());
    }

    #[test]
    fn test_clashes_are_weighted() {
        let catalog = catalog();
        let evaluator = FitnessEvaluator::new(&catalog);
        // both theory sessions in period 0: faculty, room and section clash once each
        let breakdown = evaluator.evaluate(&chromosome(&catalog, [(0, None), (0, None), (4, Some(5))]));

        assert_eq!(breakdown.faculty_clashes, 1);
        assert_eq!(breakdown.room_clashes, 1);
        assert_eq!(breakdown.section_clashes, 1);
        assert_eq!(breakdown.hard_violations(), 3);
        assert_eq!(breakdown.hard_penalty, 3000);
        assert!(!breakdown.is_perfect());
    }

    #[test]
    fn test_score_order_prefers_hard_over_soft() {
        let clean_but_late = PenaltyScore { hard: 0, soft: 5000 };
        let clashing = PenaltyScore { hard: 1000, soft: 0 };
        assert!(clean_but_late < clashing);
        assert!(PenaltyScore::default().fitness() == 1.0);
        assert!(clashing.fitness() < PenaltyScore { hard: 0, soft: 10 }.fitness());
    }

    #[test]
    fn test_record_accumulates() {
        let mut breakdown = PenaltyBreakdown::default();
        breakdown.record(ConstraintKind::LoadImbalance, 2, 5);
        breakdown.record(ConstraintKind::RoomClash, 1, 1000);

        assert_eq!(breakdown.count(ConstraintKind::LoadImbalance), 2);
        assert_eq!(breakdown.score(), PenaltyScore { hard: 1000, soft: 10 });
    }
}
