//! # Chromosome
//!
//! A chromosome is one candidate timetable. It holds exactly one [`Gene`] per
//! required session of the catalog, in the catalog's canonical session order, so
//! gene `i` always answers "where and by whom is session `i` taught".
//!
//! Completeness is enforced when a chromosome is created. Clashes are not: two
//! genes may use the same faculty, room or section in the same slot, and the
//! fitness evaluator is what penalizes it.
//!
//! ## Example
//!
//! ```rust
//! use timetabler::catalog::CatalogBuilder;
//! use timetabler::chromosome::Chromosome;
//! use timetabler::rng::RandomNumberGenerator;
//!
//! let mut builder = CatalogBuilder::new();
//! let lab = builder.add_subject("Circuits Lab", "EE291", 2, true);
//! builder.add_faculty("Dr. Bose", [lab], []);
//! builder.add_room("Lab-2", 30, true);
//! builder.weekly_grid(5, 6, 3, 1);
//! let section = builder.add_section("EEE-A", 30);
//! builder.require(section, lab);
//! let catalog = builder.build().unwrap();
//!
//! let mut rng = RandomNumberGenerator::from_seed(5);
//! let chromosome = Chromosome::random(&catalog, &mut rng).unwrap();
//!
//! assert_eq!(chromosome.len(), 2);
//! assert!(chromosome.is_complete(&catalog));
//! ```

use crate::catalog::{Catalog, FacultyId, RoomId, SectionId, SlotId, SubjectId};
use crate::error::{Result, TimetableError};
use crate::rng::RandomNumberGenerator;

/// One session placed in time, space and with a teacher.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gene {
    pub section: SectionId,
    pub subject: SubjectId,
    /// Ordinal of the session among the section's sessions of the subject.
    pub session: u32,
    pub slot: SlotId,
    /// Second period of a lab session; `None` for theory sessions.
    pub lab_slot: Option<SlotId>,
    pub room: RoomId,
    pub faculty: FacultyId,
}

impl Gene {
    /// Draws a uniformly random eligible placement for the session at `session_idx`.
    ///
    /// Returns `None` when the session has no eligible faculty, room or start slot.
    pub fn random(
        catalog: &Catalog,
        session_idx: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Option<Self> {
        let session = catalog.sessions().get(session_idx)?;
        let eligibility = catalog.eligibility(session_idx);

        let faculty = *rng.choose(&eligibility.faculty)?;
        let room = *rng.choose(&eligibility.rooms)?;
        let slot = *rng.choose(&eligibility.start_slots)?;
        let lab_slot = if session.is_lab {
            Some(catalog.next_slot(slot)?)
        } else {
            None
        };

        Some(Self {
            section: session.section,
            subject: session.subject,
            session: session.index,
            slot,
            lab_slot,
            room,
            faculty,
        })
    }

    /// The slots this gene occupies: one for theory, two for labs.
    pub fn slots(&self) -> impl Iterator<Item = SlotId> {
        std::iter::once(self.slot).chain(self.lab_slot)
    }

    pub fn is_lab(&self) -> bool {
        self.lab_slot.is_some()
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome {
    genes: Vec<Gene>,
}

impl Chromosome {
    /// Builds a chromosome from explicit genes.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::Structure`] unless gene `i` covers session `i` of the
    /// catalog for every session, uses eligible faculty and room, references slots of
    /// the catalog, and carries a second slot exactly when the session is a lab.
    /// Whether that second slot is contiguous is left to the evaluator.
    pub fn from_genes(catalog: &Catalog, genes: Vec<Gene>) -> Result<Self> {
        if let Some(problem) = structure_problem(catalog, &genes) {
            return Err(TimetableError::Structure(problem));
        }
        Ok(Self { genes })
    }

    pub(crate) fn from_genes_unchecked(genes: Vec<Gene>) -> Self {
        Self { genes }
    }

    /// Places every session of the catalog uniformly at random among its eligible
    /// faculty, rooms and start slots.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::Configuration`] if a session has nothing eligible.
    pub fn random(catalog: &Catalog, rng: &mut RandomNumberGenerator) -> Result<Self> {
        let genes = (0..catalog.session_count())
            .map(|idx| {
                Gene::random(catalog, idx, rng).ok_or_else(|| {
                    TimetableError::Configuration(format!(
                        "Session {} has no eligible placement",
                        idx
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { genes })
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn into_genes(self) -> Vec<Gene> {
        self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// The contiguous block of genes belonging to `section`.
    pub fn section_block(&self, catalog: &Catalog, section: SectionId) -> &[Gene] {
        &self.genes[catalog.section_sessions(section)]
    }

    pub fn genes_for_section(&self, section: SectionId) -> impl Iterator<Item = &Gene> {
        self.genes.iter().filter(move |gene| gene.section == section)
    }

    pub fn genes_for_faculty(&self, faculty: FacultyId) -> impl Iterator<Item = &Gene> {
        self.genes.iter().filter(move |gene| gene.faculty == faculty)
    }

    /// Whether gene `i` places session `i` of `catalog` for every session.
    pub(crate) fn covers_sessions(&self, catalog: &Catalog) -> bool {
        self.genes.len() == catalog.session_count()
            && self.genes.iter().zip(catalog.sessions()).all(|(gene, session)| {
                gene.section == session.section
                    && gene.subject == session.subject
                    && gene.session == session.index
            })
    }

    /// Completeness invariant: structurally valid and every lab occupies two
    /// contiguous same-day slots. Every chromosome produced by initialization,
    /// crossover or mutation satisfies it.
    pub fn is_complete(&self, catalog: &Catalog) -> bool {
        structure_problem(catalog, &self.genes).is_none()
            && self.genes.iter().all(|gene| match gene.lab_slot {
                Some(second) => catalog.are_contiguous(gene.slot, second),
                None => true,
            })
    }
}

fn structure_problem(catalog: &Catalog, genes: &[Gene]) -> Option<String> {
    if genes.len() != catalog.session_count() {
        return Some(format!(
            "Expected {} genes but got {}",
            catalog.session_count(),
            genes.len()
        ));
    }

    let slot_count = catalog.slots().len();
    for (idx, (gene, session)) in genes.iter().zip(catalog.sessions()).enumerate() {
        if gene.section != session.section
            || gene.subject != session.subject
            || gene.session != session.index
        {
            return Some(format!("Gene {} does not cover session {}", idx, idx));
        }
        if gene.slots().any(|slot| slot.0 >= slot_count) {
            return Some(format!("Gene {} references an unknown slot", idx));
        }
        if gene.is_lab() != session.is_lab {
            return Some(format!(
                "Gene {} must occupy {} slot(s)",
                idx,
                if session.is_lab { 2 } else { 1 }
            ));
        }
        let eligibility = catalog.eligibility(idx);
        if !eligibility.faculty.contains(&gene.faculty) {
            return Some(format!("Gene {} uses an ineligible faculty member", idx));
        }
        if !eligibility.rooms.contains(&gene.room) {
            return Some(format!("Gene {} uses an ineligible room", idx));
        }
    }

    None
}
