//! The built-in timetable checkers.
//!
//! Slots are discrete, so two genes overlap exactly when they share a slot id. A lab
//! gene counts as using both of its slots. Clash checkers count, for every
//! (resource, slot) pair, the bookings beyond the first.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use super::{Constraint, ConstraintKind};
use crate::catalog::{Catalog, SectionId, SlotId};
use crate::chromosome::{Chromosome, Gene};

fn excess_bookings<K, I>(keys: I) -> u32
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    let mut bookings: HashMap<K, u32> = HashMap::new();
    for key in keys {
        *bookings.entry(key).or_insert(0) += 1;
    }
    bookings.values().map(|count| count - 1).sum()
}

fn gene_day(catalog: &Catalog, gene: &Gene) -> usize {
    catalog.slot(gene.slot).day
}

/// The same faculty member teaching two sessions in one slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacultyClashConstraint;

impl Constraint for FacultyClashConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::FacultyClash
    }

    fn count_violations(&self, chromosome: &Chromosome, _catalog: &Catalog) -> u32 {
        excess_bookings(
            chromosome
                .genes()
                .iter()
                .flat_map(|gene| gene.slots().map(move |slot| (gene.faculty, slot))),
        )
    }
}

/// The same room hosting two sessions in one slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomClashConstraint;

impl Constraint for RoomClashConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::RoomClash
    }

    fn count_violations(&self, chromosome: &Chromosome, _catalog: &Catalog) -> u32 {
        excess_bookings(
            chromosome
                .genes()
                .iter()
                .flat_map(|gene| gene.slots().map(move |slot| (gene.room, slot))),
        )
    }
}

/// A section attending two sessions in one slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionClashConstraint;

impl Constraint for SectionClashConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::SectionClash
    }

    fn count_violations(&self, chromosome: &Chromosome, _catalog: &Catalog) -> u32 {
        excess_bookings(
            chromosome
                .genes()
                .iter()
                .flat_map(|gene| gene.slots().map(move |slot| (gene.section, slot))),
        )
    }
}

/// Occupied slots that fall into the faculty member's unavailable set.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacultyUnavailableConstraint;

impl Constraint for FacultyUnavailableConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::FacultyUnavailable
    }

    fn count_violations(&self, chromosome: &Chromosome, catalog: &Catalog) -> u32 {
        chromosome
            .genes()
            .iter()
            .map(|gene| {
                let member = catalog.faculty_member(gene.faculty);
                gene.slots().filter(|&slot| !member.is_available(slot)).count() as u32
            })
            .sum()
    }
}

/// Lab genes whose two periods are not back to back on one day.
///
/// Room and faculty are stored once per lab gene, so a lab can only break by
/// being split in time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabContinuityConstraint;

impl Constraint for LabContinuityConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::LabContinuity
    }

    fn count_violations(&self, chromosome: &Chromosome, catalog: &Catalog) -> u32 {
        chromosome
            .genes()
            .iter()
            .filter_map(|gene| gene.lab_slot.map(|second| (gene.slot, second)))
            .filter(|&(first, second)| !catalog.are_contiguous(first, second))
            .count() as u32
    }
}

/// Sessions placed in a lunch period on a day the section has other sessions,
/// while a free non-lunch period (a free non-lunch pair for labs) was left that day.
#[derive(Debug, Clone, Copy, Default)]
pub struct LunchIntrusionConstraint;

impl LunchIntrusionConstraint {
    fn count_for_section(&self, genes: &[&Gene], catalog: &Catalog) -> u32 {
        let occupied: HashSet<SlotId> = genes.iter().flat_map(|gene| gene.slots()).collect();
        let mut sessions_per_day: HashMap<usize, u32> = HashMap::new();
        for gene in genes {
            *sessions_per_day.entry(gene_day(catalog, gene)).or_insert(0) += 1;
        }

        let is_free = |slot: SlotId| {
            let slot = catalog.slot(slot);
            !slot.lunch && !occupied.contains(&slot.id)
        };

        genes
            .iter()
            .filter(|gene| gene.slots().any(|slot| catalog.slot(slot).lunch))
            .filter(|gene| {
                let day = gene_day(catalog, gene);
                if sessions_per_day.get(&day).copied().unwrap_or(0) < 2 {
                    return false;
                }
                catalog
                    .slots()
                    .iter()
                    .filter(|slot| slot.day == day && is_free(slot.id))
                    .any(|slot| {
                        if gene.is_lab() {
                            catalog.next_slot(slot.id).map_or(false, is_free)
                        } else {
                            true
                        }
                    })
            })
            .count() as u32
    }
}

impl Constraint for LunchIntrusionConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::LunchIntrusion
    }

    fn count_violations(&self, chromosome: &Chromosome, catalog: &Catalog) -> u32 {
        let mut by_section: HashMap<SectionId, Vec<&Gene>> = HashMap::new();
        for gene in chromosome.genes() {
            by_section.entry(gene.section).or_default().push(gene);
        }
        by_section
            .values()
            .map(|genes| self.count_for_section(genes, catalog))
            .sum()
    }
}

/// Sessions a faculty member teaches on one day beyond
/// [`ConstraintWeights::max_daily_sessions`](crate::fitness::ConstraintWeights).
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadImbalanceConstraint;

impl Constraint for LoadImbalanceConstraint {
    fn kind(&self) -> ConstraintKind {
        ConstraintKind::LoadImbalance
    }

    fn count_violations(&self, chromosome: &Chromosome, catalog: &Catalog) -> u32 {
        let threshold = catalog.weights().max_daily_sessions;
        let mut load: HashMap<_, u32> = HashMap::new();
        for gene in chromosome.genes() {
            *load.entry((gene.faculty, gene_day(catalog, gene))).or_insert(0) += 1;
        }
        load.values()
            .map(|&sessions| sessions.saturating_sub(threshold))
            .sum()
    }
}
