//! # Constraints Module
//!
//! Each timetable rule is an independent checker implementing [`Constraint`]. A
//! checker looks at a whole chromosome and returns how many times the rule is
//! broken; it knows nothing about weights. The [`ConstraintManager`] runs an ordered
//! list of checkers and the fitness evaluator turns their counts into penalties.
//!
//! ## Custom checkers
//!
//! ```rust
//! use timetabler::catalog::Catalog;
//! use timetabler::chromosome::Chromosome;
//! use timetabler::constraints::{Constraint, ConstraintKind, ConstraintManager};
//!
//! // Counts sessions placed in the first period of a day as load imbalance.
//! #[derive(Debug)]
//! struct NoEarlyStart;
//!
//! impl Constraint for NoEarlyStart {
//!     fn kind(&self) -> ConstraintKind {
//!         ConstraintKind::LoadImbalance
//!     }
//!
//!     fn count_violations(&self, chromosome: &Chromosome, catalog: &Catalog) -> u32 {
//!         chromosome
//!             .genes()
//!             .iter()
//!             .filter(|gene| catalog.slot(gene.slot).period == 0)
//!             .count() as u32
//!     }
//! }
//!
//! let mut manager = ConstraintManager::standard();
//! manager.add_constraint(NoEarlyStart);
//! assert_eq!(manager.len(), 8);
//! ```

use std::fmt::{Debug, Display};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::chromosome::Chromosome;

pub mod timetable;

pub use timetable::{
    FacultyClashConstraint, FacultyUnavailableConstraint, LabContinuityConstraint,
    LoadImbalanceConstraint, LunchIntrusionConstraint, RoomClashConstraint,
    SectionClashConstraint,
};

/// The rule families a checker can report against.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKind {
    FacultyClash,
    RoomClash,
    SectionClash,
    FacultyUnavailable,
    LabContinuity,
    LunchIntrusion,
    LoadImbalance,
}

impl ConstraintKind {
    pub const ALL: [ConstraintKind; 7] = [
        ConstraintKind::FacultyClash,
        ConstraintKind::RoomClash,
        ConstraintKind::SectionClash,
        ConstraintKind::FacultyUnavailable,
        ConstraintKind::LabContinuity,
        ConstraintKind::LunchIntrusion,
        ConstraintKind::LoadImbalance,
    ];

    /// Hard violations make a timetable unusable; soft ones only degrade it.
    pub fn is_hard(self) -> bool {
        !matches!(
            self,
            ConstraintKind::LunchIntrusion | ConstraintKind::LoadImbalance
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ConstraintKind::FacultyClash => "faculty clash",
            ConstraintKind::RoomClash => "room clash",
            ConstraintKind::SectionClash => "section clash",
            ConstraintKind::FacultyUnavailable => "faculty unavailable",
            ConstraintKind::LabContinuity => "lab continuity",
            ConstraintKind::LunchIntrusion => "lunch intrusion",
            ConstraintKind::LoadImbalance => "load imbalance",
        }
    }
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single timetable rule.
pub trait Constraint: Debug + Send + Sync {
    /// The rule family violations are reported against.
    fn kind(&self) -> ConstraintKind;

    /// Number of violations of this rule in `chromosome`.
    fn count_violations(&self, chromosome: &Chromosome, catalog: &Catalog) -> u32;
}

/// An ordered list of checkers.
#[derive(Debug, Clone, Default)]
pub struct ConstraintManager {
    constraints: Vec<Arc<dyn Constraint>>,
}

impl ConstraintManager {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// The full rule set: the five hard checkers followed by the two soft ones.
    pub fn standard() -> Self {
        let mut manager = Self::new();
        manager
            .add_constraint(FacultyClashConstraint)
            .add_constraint(RoomClashConstraint)
            .add_constraint(SectionClashConstraint)
            .add_constraint(FacultyUnavailableConstraint)
            .add_constraint(LabContinuityConstraint)
            .add_constraint(LunchIntrusionConstraint)
            .add_constraint(LoadImbalanceConstraint);
        manager
    }

    pub fn add_constraint<C>(&mut self, constraint: C) -> &mut Self
    where
        C: Constraint + 'static,
    {
        self.constraints.push(Arc::new(constraint));
        self
    }

    /// Runs every checker in order and returns its kind with the violation count.
    pub fn check_all(
        &self,
        chromosome: &Chromosome,
        catalog: &Catalog,
    ) -> Vec<(ConstraintKind, u32)> {
        self.constraints
            .iter()
            .map(|c| (c.kind(), c.count_violations(chromosome, catalog)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}
