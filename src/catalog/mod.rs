//! # Catalog
//!
//! The read-only description of one timetabling problem: subjects, faculty, rooms,
//! time slots and sections, together with the constraint weights and evolution
//! options for the run.
//!
//! On construction the catalog expands every section requirement into individual
//! [`Session`]s, in section order, and precomputes which faculty, rooms and start
//! slots are structurally eligible for each of them. Initialization and mutation
//! draw from these tables; clashes between sessions are not considered here.

mod builder;
mod model;

use std::ops::Range;

use tracing::debug;

pub use builder::{CatalogBuilder, RequirementEntry};
pub use model::{
    Faculty, FacultyId, Requirement, Room, RoomId, Section, SectionId, SlotId, Subject,
    SubjectId, TimeSlot,
};

use crate::error::{Result, TimetableError};
use crate::evolution::options::EvolutionOptions;
use crate::fitness::ConstraintWeights;

/// One required weekly session of a subject for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub section: SectionId,
    pub subject: SubjectId,
    /// Ordinal of this session among the section's sessions of the subject.
    pub index: u32,
    pub is_lab: bool,
    requirement: usize,
}

/// Faculty, rooms and start slots a session may be assigned to.
///
/// For lab sessions `start_slots` only holds slots with a contiguous successor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Eligibility {
    pub faculty: Vec<FacultyId>,
    pub rooms: Vec<RoomId>,
    pub start_slots: Vec<SlotId>,
}

impl Eligibility {
    pub fn is_empty(&self) -> bool {
        self.faculty.is_empty() || self.rooms.is_empty() || self.start_slots.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    subjects: Vec<Subject>,
    faculty: Vec<Faculty>,
    rooms: Vec<Room>,
    slots: Vec<TimeSlot>,
    sections: Vec<Section>,
    weights: ConstraintWeights,
    options: EvolutionOptions,
    sessions: Vec<Session>,
    section_ranges: Vec<Range<usize>>,
    // indexed by requirement, in section order
    eligibility: Vec<Eligibility>,
    successors: Vec<Option<SlotId>>,
    days: Vec<usize>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    pub(crate) fn assemble(
        subjects: Vec<Subject>,
        faculty: Vec<Faculty>,
        rooms: Vec<Room>,
        slots: Vec<TimeSlot>,
        sections: Vec<Section>,
        weights: ConstraintWeights,
        options: EvolutionOptions,
    ) -> Self {
        let successors: Vec<Option<SlotId>> = slots
            .iter()
            .map(|slot| {
                slots
                    .iter()
                    .find(|next| slot.is_followed_by(next))
                    .map(|next| next.id)
            })
            .collect();

        let mut days: Vec<usize> = slots.iter().map(|slot| slot.day).collect();
        days.sort_unstable();
        days.dedup();

        let mut sessions = Vec::new();
        let mut section_ranges = Vec::with_capacity(sections.len());
        let mut eligibility = Vec::new();

        for section in &sections {
            let start = sessions.len();
            for requirement in &section.requirements {
                let subject = &subjects[requirement.subject.0];
                let requirement_idx = eligibility.len();
                eligibility.push(Eligibility {
                    faculty: faculty
                        .iter()
                        .filter(|member| member.can_teach(subject.id))
                        .map(|member| member.id)
                        .collect(),
                    rooms: rooms
                        .iter()
                        .filter(|room| room.capacity >= section.strength)
                        .filter(|room| !subject.is_lab || room.lab_capable)
                        .map(|room| room.id)
                        .collect(),
                    start_slots: slots
                        .iter()
                        .filter(|slot| !subject.is_lab || successors[slot.id.0].is_some())
                        .map(|slot| slot.id)
                        .collect(),
                });
                sessions.extend((0..requirement.sessions).map(|index| Session {
                    section: section.id,
                    subject: subject.id,
                    index,
                    is_lab: subject.is_lab,
                    requirement: requirement_idx,
                }));
            }
            section_ranges.push(start..sessions.len());
        }

        debug!(
            sections = sections.len(),
            sessions = sessions.len(),
            slots = slots.len(),
            "catalog assembled"
        );

        Self {
            subjects,
            faculty,
            rooms,
            slots,
            sections,
            weights,
            options,
            sessions,
            section_ranges,
            eligibility,
            successors,
            days,
        }
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn faculty(&self) -> &[Faculty] {
        &self.faculty
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn weights(&self) -> &ConstraintWeights {
        &self.weights
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    /// The distinct days covered by the slots, ascending.
    pub fn days(&self) -> &[usize] {
        &self.days
    }

    /// All required sessions in canonical order: grouped by section, then by requirement.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Range of `sessions()` belonging to `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section` does not belong to this catalog.
    pub fn section_sessions(&self, section: SectionId) -> Range<usize> {
        self.section_ranges[section.0].clone()
    }

    /// Structural eligibility of the session at `session_idx`.
    ///
    /// # Panics
    ///
    /// Panics if `session_idx >= session_count()`.
    pub fn eligibility(&self, session_idx: usize) -> &Eligibility {
        &self.eligibility[self.sessions[session_idx].requirement]
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this catalog.
    pub fn slot(&self, id: SlotId) -> &TimeSlot {
        &self.slots[id.0]
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this catalog.
    pub fn faculty_member(&self, id: FacultyId) -> &Faculty {
        &self.faculty[id.0]
    }

    /// The slot directly after `slot` on the same day, if the catalog has one.
    pub fn next_slot(&self, slot: SlotId) -> Option<SlotId> {
        self.successors.get(slot.0).copied().flatten()
    }

    pub fn are_contiguous(&self, first: SlotId, second: SlotId) -> bool {
        self.next_slot(first) == Some(second)
    }

    /// Checks that every session can be placed somewhere, ignoring clashes.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::Configuration`] when a required subject has no
    /// qualified faculty, no suitable room, no start slot (labs need two contiguous
    /// periods), or when a section needs more periods than the week provides.
    pub fn check_feasibility(&self) -> Result<()> {
        for section in &self.sections {
            let range = self.section_sessions(section.id);
            let mut periods_needed = 0usize;

            for session_idx in range {
                let session = self.sessions[session_idx];
                let subject = &self.subjects[session.subject.0];
                let eligibility = self.eligibility(session_idx);

                let missing = if eligibility.faculty.is_empty() {
                    Some("no qualified faculty")
                } else if eligibility.rooms.is_empty() {
                    Some(if subject.is_lab {
                        "no lab-capable room large enough"
                    } else {
                        "no room large enough"
                    })
                } else if eligibility.start_slots.is_empty() {
                    Some("no pair of contiguous slots for a lab")
                } else {
                    None
                };
                if let Some(reason) = missing {
                    return Err(TimetableError::Configuration(format!(
                        "Subject '{}' for section '{}' has {}",
                        subject.name, section.name, reason
                    )));
                }

                periods_needed += if session.is_lab { 2 } else { 1 };
            }

            if periods_needed > self.slots.len() {
                return Err(TimetableError::Configuration(format!(
                    "Section '{}' needs {} periods but only {} time slots exist",
                    section.name,
                    periods_needed,
                    self.slots.len()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> CatalogBuilder {
        let mut builder = CatalogBuilder::new();
        let theory = builder.add_subject("Data Structures", "CS201", 3, false);
        let lab = builder.add_subject("Data Structures Lab", "CS291", 1, true);
        builder.add_faculty("Dr. Sen", [theory, lab], []);
        builder.add_room("R-1", 40, false);
        builder.add_room("Lab-1", 40, true);
        builder.weekly_grid(2, 4, 2, 1);
        let section = builder.add_section("CSE-A", 35);
        builder.require(section, theory).require(section, lab);
        builder
    }

    #[test]
    fn test_sessions_expand_in_section_order() {
        let mut builder = small_catalog();
        let other = builder.add_section("CSE-B", 35);
        builder.require(other, SubjectId(0));
        let catalog = builder.build().unwrap();

        assert_eq!(catalog.session_count(), 7);
        assert_eq!(catalog.section_sessions(SectionId(0)), 0..4);
        assert_eq!(catalog.section_sessions(SectionId(1)), 4..7);
        assert!(catalog.sessions()[3].is_lab);
        assert_eq!(catalog.sessions()[2].index, 2);
    }

    #[test]
    fn test_lab_eligibility() {
        let catalog = small_catalog().build().unwrap();
        let lab = catalog.eligibility(3);

        assert_eq!(lab.rooms, vec![RoomId(1)]);
        // the last period of each day has no successor
        assert_eq!(lab.start_slots.len(), 6);
        assert!(lab
            .start_slots
            .iter()
            .all(|&slot| catalog.next_slot(slot).is_some()));

        let theory = catalog.eligibility(0);
        assert_eq!(theory.rooms, vec![RoomId(0), RoomId(1)]);
        assert_eq!(theory.start_slots.len(), 8);
    }

    #[test]
    fn test_contiguity_does_not_cross_days() {
        let catalog = small_catalog().build().unwrap();
        assert!(catalog.are_contiguous(SlotId(0), SlotId(1)));
        assert!(!catalog.are_contiguous(SlotId(3), SlotId(4)));
        assert_eq!(catalog.days(), &[0, 1]);
    }

    #[test]
    fn test_successors_follow_periods_not_insertion_order() {
        let mut builder = CatalogBuilder::new();
        let afternoon = builder.add_slot(0, 1, false);
        let morning = builder.add_slot(0, 0, false);
        builder.add_slot(1, 2, false);
        let catalog = builder.build().unwrap();

        assert_eq!(catalog.next_slot(morning), Some(afternoon));
        assert_eq!(catalog.next_slot(afternoon), None);
        assert_eq!(catalog.next_slot(SlotId(2)), None);
    }

    #[test]
    fn test_feasibility_passes() {
        assert!(small_catalog().build().unwrap().check_feasibility().is_ok());
    }

    #[test]
    fn test_feasibility_requires_qualified_faculty() {
        let mut builder = small_catalog();
        let orphan = builder.add_subject("Ethics", "HS101", 1, false);
        builder.require(SectionId(0), orphan);
        let err = builder.build().unwrap().check_feasibility().unwrap_err();
        assert!(err.to_string().contains("no qualified faculty"));
    }

    #[test]
    fn test_feasibility_requires_room_capacity() {
        let mut builder = small_catalog();
        let crowd = builder.add_section("Auditorium batch", 200);
        builder.require(crowd, SubjectId(0));
        let err = builder.build().unwrap().check_feasibility().unwrap_err();
        assert!(matches!(err, TimetableError::Configuration(_)));
    }

    #[test]
    fn test_feasibility_counts_periods() {
        let mut builder = small_catalog();
        // 3 theory + 2 (lab) + 4 = 9 periods on an 8-slot grid
        let extra = builder.add_subject("Discrete Maths", "MA201", 4, false);
        builder.add_faculty("Dr. Paul", [extra], []);
        builder.require(SectionId(0), extra);
        let err = builder.build().unwrap().check_feasibility().unwrap_err();
        assert!(err.to_string().contains("needs 9 periods"));
    }
}
