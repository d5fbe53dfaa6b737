use std::collections::BTreeSet;

macro_rules! index_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub usize);

        impl $name {
            /// Position of the entity inside its catalog vector.
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

index_id!(
    /// Identifies a [`Subject`] inside a catalog.
    SubjectId
);
index_id!(
    /// Identifies a [`Faculty`] member inside a catalog.
    FacultyId
);
index_id!(
    /// Identifies a [`Room`] inside a catalog.
    RoomId
);
index_id!(
    /// Identifies a [`TimeSlot`] inside a catalog.
    SlotId
);
index_id!(
    /// Identifies a [`Section`] inside a catalog.
    SectionId
);

/// A subject taught to sections.
///
/// Lab subjects are taught in double periods: every lab session occupies two
/// contiguous slots of the same day in the same room with the same faculty.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub code: String,
    /// Default number of sessions per week for a section taking this subject.
    pub weekly_sessions: u32,
    pub is_lab: bool,
}

/// A teacher together with the subjects they may teach and the slots they cannot.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faculty {
    pub id: FacultyId,
    pub name: String,
    pub qualified: BTreeSet<SubjectId>,
    pub unavailable: BTreeSet<SlotId>,
}

impl Faculty {
    pub fn can_teach(&self, subject: SubjectId) -> bool {
        self.qualified.contains(&subject)
    }

    pub fn is_available(&self, slot: SlotId) -> bool {
        !self.unavailable.contains(&slot)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    pub lab_capable: bool,
}

/// One teaching period of the week.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: SlotId,
    pub day: usize,
    /// Ordinal period within the day.
    pub period: usize,
    /// Whether the slot belongs to the lunch break.
    pub lunch: bool,
}

impl TimeSlot {
    /// Returns `true` when `next` is the period directly after `self` on the same day.
    pub fn is_followed_by(&self, next: &TimeSlot) -> bool {
        self.day == next.day && self.period.checked_add(1) == Some(next.period)
    }
}

/// How many sessions of a subject a section receives per week.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub subject: SubjectId,
    pub sessions: u32,
}

/// A group of students that attends its sessions together.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    /// Head count; rooms smaller than this are not eligible for the section.
    pub strength: u32,
    pub requirements: Vec<Requirement>,
}
