use crate::constraints::ConstraintKind;
use crate::error::{Result, TimetableError};

/// Weight applied to each violation of a constraint kind, plus the daily load
/// threshold used by the load-imbalance check.
///
/// # Example
///
/// ```rust
/// use timetabler::constraints::ConstraintKind;
/// use timetabler::fitness::ConstraintWeights;
///
/// let weights = ConstraintWeights::builder()
///     .lunch_intrusion(25)
///     .max_daily_sessions(3)
///     .build();
///
/// assert_eq!(weights.weight(ConstraintKind::LunchIntrusion), 25);
/// assert_eq!(weights.weight(ConstraintKind::FacultyClash), 1000);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintWeights {
    pub faculty_clash: u64,
    pub room_clash: u64,
    pub section_clash: u64,
    pub faculty_unavailable: u64,
    pub lab_continuity: u64,
    pub lunch_intrusion: u64,
    pub load_imbalance: u64,
    /// Sessions a faculty member may teach per day before load imbalance is counted.
    pub max_daily_sessions: u32,
}

impl ConstraintWeights {
    pub fn builder() -> ConstraintWeightsBuilder {
        ConstraintWeightsBuilder::default()
    }

    pub fn weight(&self, kind: ConstraintKind) -> u64 {
        match kind {
            ConstraintKind::FacultyClash => self.faculty_clash,
            ConstraintKind::RoomClash => self.room_clash,
            ConstraintKind::SectionClash => self.section_clash,
            ConstraintKind::FacultyUnavailable => self.faculty_unavailable,
            ConstraintKind::LabContinuity => self.lab_continuity,
            ConstraintKind::LunchIntrusion => self.lunch_intrusion,
            ConstraintKind::LoadImbalance => self.load_imbalance,
        }
    }

    /// # Errors
    ///
    /// Returns [`TimetableError::Configuration`] if a hard constraint has weight 0.
    pub fn validate(&self) -> Result<()> {
        match ConstraintKind::ALL
            .iter()
            .find(|kind| kind.is_hard() && self.weight(**kind) == 0)
        {
            Some(kind) => Err(TimetableError::Configuration(format!(
                "Hard constraint '{}' must have a positive weight",
                kind.name()
            ))),
            None => Ok(()),
        }
    }
}

impl Default for ConstraintWeights {
    fn default() -> Self {
        Self {
            faculty_clash: 1000,
            room_clash: 1000,
            section_clash: 1000,
            faculty_unavailable: 1000,
            lab_continuity: 1000,
            lunch_intrusion: 10,
            load_imbalance: 5,
            max_daily_sessions: 4,
        }
    }
}

/// Builder for `ConstraintWeights`. Unset fields keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct ConstraintWeightsBuilder {
    faculty_clash: Option<u64>,
    room_clash: Option<u64>,
    section_clash: Option<u64>,
    faculty_unavailable: Option<u64>,
    lab_continuity: Option<u64>,
    lunch_intrusion: Option<u64>,
    load_imbalance: Option<u64>,
    max_daily_sessions: Option<u32>,
}

impl ConstraintWeightsBuilder {
    pub fn faculty_clash(mut self, value: u64) -> Self {
        self.faculty_clash = Some(value);
        self
    }

    pub fn room_clash(mut self, value: u64) -> Self {
        self.room_clash = Some(value);
        self
    }

    pub fn section_clash(mut self, value: u64) -> Self {
        self.section_clash = Some(value);
        self
    }

    pub fn faculty_unavailable(mut self, value: u64) -> Self {
        self.faculty_unavailable = Some(value);
        self
    }

    pub fn lab_continuity(mut self, value: u64) -> Self {
        self.lab_continuity = Some(value);
        self
    }

    pub fn lunch_intrusion(mut self, value: u64) -> Self {
        self.lunch_intrusion = Some(value);
        self
    }

    pub fn load_imbalance(mut self, value: u64) -> Self {
        self.load_imbalance = Some(value);
        self
    }

    pub fn max_daily_sessions(mut self, value: u32) -> Self {
        self.max_daily_sessions = Some(value);
        self
    }

    pub fn build(self) -> ConstraintWeights {
        let default = ConstraintWeights::default();
        ConstraintWeights {
            faculty_clash: self.faculty_clash.unwrap_or(default.faculty_clash),
            room_clash: self.room_clash.unwrap_or(default.room_clash),
            section_clash: self.section_clash.unwrap_or(default.section_clash),
            faculty_unavailable: self
                .faculty_unavailable
                .unwrap_or(default.faculty_unavailable),
            lab_continuity: self.lab_continuity.unwrap_or(default.lab_continuity),
            lunch_intrusion: self.lunch_intrusion.unwrap_or(default.lunch_intrusion),
            load_imbalance: self.load_imbalance.unwrap_or(default.load_imbalance),
            max_daily_sessions: self
                .max_daily_sessions
                .unwrap_or(default.max_daily_sessions),
        }
    }
}
