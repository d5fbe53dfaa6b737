use std::collections::{BTreeSet, HashSet};

use super::model::{
    Faculty, FacultyId, Requirement, Room, RoomId, Section, SectionId, SlotId, Subject,
    SubjectId, TimeSlot,
};
use super::Catalog;
use crate::error::{Result, TimetableError};
use crate::evolution::options::EvolutionOptions;
use crate::fitness::ConstraintWeights;

/// A requirement recorded on the builder before the subject's default session
/// count is resolved.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementEntry {
    pub section: SectionId,
    pub subject: SubjectId,
    /// `None` means the subject's `weekly_sessions`.
    pub sessions: Option<u32>,
}

/// Collects subjects, faculty, rooms, slots and sections and hands out their ids.
///
/// `build` borrows the builder, so a caller can adjust it and build again to
/// regenerate a timetable from a modified problem.
///
/// # Example
///
/// ```rust
/// use timetabler::catalog::CatalogBuilder;
///
/// let mut builder = CatalogBuilder::new();
/// let maths = builder.add_subject("Mathematics", "MA101", 3, false);
/// builder.add_faculty("Dr. Iyer", [maths], []);
/// builder.add_room("R-101", 60, false);
/// builder.weekly_grid(5, 6, 3, 1);
/// let section = builder.add_section("CSE-A", 55);
/// builder.require(section, maths);
///
/// let catalog = builder.build().unwrap();
/// assert_eq!(catalog.session_count(), 3);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    subjects: Vec<Subject>,
    faculty: Vec<Faculty>,
    rooms: Vec<Room>,
    slots: Vec<TimeSlot>,
    sections: Vec<Section>,
    requirements: Vec<RequirementEntry>,
    weights: ConstraintWeights,
    options: EvolutionOptions,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_subject(
        &mut self,
        name: impl Into<String>,
        code: impl Into<String>,
        weekly_sessions: u32,
        is_lab: bool,
    ) -> SubjectId {
        let id = SubjectId(self.subjects.len());
        self.subjects.push(Subject {
            id,
            name: name.into(),
            code: code.into(),
            weekly_sessions,
            is_lab,
        });
        id
    }

    pub fn add_faculty(
        &mut self,
        name: impl Into<String>,
        qualified: impl IntoIterator<Item = SubjectId>,
        unavailable: impl IntoIterator<Item = SlotId>,
    ) -> FacultyId {
        let id = FacultyId(self.faculty.len());
        self.faculty.push(Faculty {
            id,
            name: name.into(),
            qualified: qualified.into_iter().collect(),
            unavailable: unavailable.into_iter().collect(),
        });
        id
    }

    pub fn add_room(&mut self, name: impl Into<String>, capacity: u32, lab_capable: bool) -> RoomId {
        let id = RoomId(self.rooms.len());
        self.rooms.push(Room {
            id,
            name: name.into(),
            capacity,
            lab_capable,
        });
        id
    }

    pub fn add_slot(&mut self, day: usize, period: usize, lunch: bool) -> SlotId {
        let id = SlotId(self.slots.len());
        self.slots.push(TimeSlot {
            id,
            day,
            period,
            lunch,
        });
        id
    }

    /// Adds `days × periods_per_day` slots, marking the periods in
    /// `lunch_start..lunch_start + lunch_duration` as lunch, and returns them day by day.
    pub fn weekly_grid(
        &mut self,
        days: usize,
        periods_per_day: usize,
        lunch_start: usize,
        lunch_duration: usize,
    ) -> Vec<SlotId> {
        let lunch = lunch_start..lunch_start + lunch_duration;
        let mut ids = Vec::with_capacity(days * periods_per_day);
        for day in 0..days {
            for period in 0..periods_per_day {
                ids.push(self.add_slot(day, period, lunch.contains(&period)));
            }
        }
        ids
    }

    pub fn add_section(&mut self, name: impl Into<String>, strength: u32) -> SectionId {
        let id = SectionId(self.sections.len());
        self.sections.push(Section {
            id,
            name: name.into(),
            strength,
            requirements: Vec::new(),
        });
        id
    }

    /// Requires `subject` for `section` with the subject's weekly session count.
    pub fn require(&mut self, section: SectionId, subject: SubjectId) -> &mut Self {
        self.requirements.push(RequirementEntry {
            section,
            subject,
            sessions: None,
        });
        self
    }

    /// Requires `sessions` weekly sessions of `subject` for `section`.
    pub fn require_sessions(
        &mut self,
        section: SectionId,
        subject: SubjectId,
        sessions: u32,
    ) -> &mut Self {
        self.requirements.push(RequirementEntry {
            section,
            subject,
            sessions: Some(sessions),
        });
        self
    }

    pub fn weights(&mut self, weights: ConstraintWeights) -> &mut Self {
        self.weights = weights;
        self
    }

    pub fn options(&mut self, options: EvolutionOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// Validates references and parameters and builds the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::Configuration`] if an id does not belong to this
    /// builder or does not match its entity's position, two slots share a day and
    /// period, or the weights or evolution options are invalid. Whether the sessions can be placed at all is checked
    /// separately by [`Catalog::check_feasibility`].
    pub fn build(&self) -> Result<Catalog> {
        self.weights.validate()?;
        self.options.validate()?;
        self.validate_references()?;

        let mut sections = self.sections.clone();
        for section in &mut sections {
            section.requirements.clear();
        }
        for entry in self.requirement_entries() {
            let subject = &self.subjects[entry.subject.0];
            sections[entry.section.0].requirements.push(Requirement {
                subject: entry.subject,
                sessions: entry.sessions.unwrap_or(subject.weekly_sessions),
            });
        }

        Ok(Catalog::assemble(
            self.subjects.clone(),
            self.faculty.clone(),
            self.rooms.clone(),
            self.slots.clone(),
            sections,
            self.weights.clone(),
            self.options.clone(),
        ))
    }

    /// Requirements listed inline on sections, followed by the ones added with
    /// `require`.
    fn requirement_entries(&self) -> Vec<RequirementEntry> {
        self.sections
            .iter()
            .flat_map(|section| {
                section.requirements.iter().map(move |requirement| RequirementEntry {
                    section: section.id,
                    subject: requirement.subject,
                    sessions: Some(requirement.sessions),
                })
            })
            .chain(self.requirements.iter().cloned())
            .collect()
    }

    fn validate_references(&self) -> Result<()> {
        let config_error = |msg: String| Err(TimetableError::Configuration(msg));

        check_positions("Subject", self.subjects.iter().map(|s| s.id.0))?;
        check_positions("Faculty", self.faculty.iter().map(|f| f.id.0))?;
        check_positions("Room", self.rooms.iter().map(|r| r.id.0))?;
        check_positions("Slot", self.slots.iter().map(|s| s.id.0))?;
        check_positions("Section", self.sections.iter().map(|s| s.id.0))?;

        for member in &self.faculty {
            if let Some(subject) = member.qualified.iter().find(|s| s.0 >= self.subjects.len()) {
                return config_error(format!(
                    "Faculty '{}' is qualified for unknown subject {}",
                    member.name, subject.0
                ));
            }
            if let Some(slot) = member.unavailable.iter().find(|s| s.0 >= self.slots.len()) {
                return config_error(format!(
                    "Faculty '{}' is unavailable in unknown slot {}",
                    member.name, slot.0
                ));
            }
        }

        let mut seen = HashSet::new();
        for slot in &self.slots {
            if !seen.insert((slot.day, slot.period)) {
                return config_error(format!(
                    "Duplicate time slot for day {} period {}",
                    slot.day, slot.period
                ));
            }
        }

        let mut required = BTreeSet::new();
        for entry in self.requirement_entries() {
            if entry.section.0 >= self.sections.len() {
                return config_error(format!("Requirement names unknown section {}", entry.section.0));
            }
            if entry.subject.0 >= self.subjects.len() {
                return config_error(format!("Requirement names unknown subject {}", entry.subject.0));
            }
            if !required.insert((entry.section, entry.subject)) {
                return config_error(format!(
                    "Section '{}' requires subject '{}' more than once",
                    self.sections[entry.section.0].name, self.subjects[entry.subject.0].name
                ));
            }
        }

        Ok(())
    }
}

/// Ids index the catalog tables, so each must equal its entity's position.
fn check_positions(kind: &str, ids: impl Iterator<Item = usize>) -> Result<()> {
    for (position, id) in ids.enumerate() {
        if id != position {
            return Err(TimetableError::Configuration(format!(
                "{} id {} does not match its position {}",
                kind, id, position
            )));
        }
    }
    Ok(())
}
