//! Attendance drafts and submit payloads

use super::schedule::{AttendanceStatus, ScheduleEntry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Key addressing one attendance mark.
///
/// Single-teacher entries are addressed by the bare schedule id
/// (`"501"`); multi-teacher entries by the composite
/// `scheduleId-teacherId` form (`"77-3"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DraftKey {
    Schedule(i64),
    ScheduleTeacher { jadwal_id: i64, guru_id: i64 },
}

impl DraftKey {
    /// The schedule id addressed by this key
    pub fn jadwal_id(&self) -> i64 {
        match self {
            Self::Schedule(id) => *id,
            Self::ScheduleTeacher { jadwal_id, .. } => *jadwal_id,
        }
    }

    /// The explicit teacher id, when the key is composite
    pub fn guru_id(&self) -> Option<i64> {
        match self {
            Self::Schedule(_) => None,
            Self::ScheduleTeacher { guru_id, .. } => Some(*guru_id),
        }
    }
}

impl fmt::Display for DraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schedule(id) => write!(f, "{}", id),
            Self::ScheduleTeacher { jadwal_id, guru_id } => {
                write!(f, "{}-{}", jadwal_id, guru_id)
            }
        }
    }
}

/// Error parsing a draft key string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid draft key: {0}")]
pub struct InvalidDraftKey(pub String);

impl FromStr for DraftKey {
    type Err = InvalidDraftKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('-') {
            Some((jadwal, guru)) => {
                let jadwal_id = jadwal
                    .parse()
                    .map_err(|_| InvalidDraftKey(s.to_string()))?;
                let guru_id = guru.parse().map_err(|_| InvalidDraftKey(s.to_string()))?;
                Ok(Self::ScheduleTeacher { jadwal_id, guru_id })
            }
            None => s
                .parse()
                .map(Self::Schedule)
                .map_err(|_| InvalidDraftKey(s.to_string())),
        }
    }
}

/// Client-local, not-yet-confirmed attendance state for one key
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttendanceDraft {
    pub status: AttendanceStatus,
    pub note: String,
    pub guru_id: Option<i64>,
    pub has_assignment: bool,
}

impl AttendanceDraft {
    /// Set the status; presence implies no note is needed, so the note is
    /// cleared in the same transition.
    pub fn set_status(&mut self, status: AttendanceStatus) {
        self.status = status;
        if status == AttendanceStatus::Present {
            self.note.clear();
        }
    }
}

/// Derive the draft map from a freshly loaded schedule list.
///
/// Entries not yet recorded default to `Present`. Non-attendable entries
/// produce no draft at all.
pub fn derive_drafts(entries: &[ScheduleEntry]) -> HashMap<DraftKey, AttendanceDraft> {
    let mut drafts = HashMap::new();
    for entry in entries {
        if !entry.is_attendable {
            continue;
        }
        if entry.is_multi_teacher() {
            for teacher in &entry.teachers {
                drafts.insert(
                    DraftKey::ScheduleTeacher {
                        jadwal_id: entry.id,
                        guru_id: teacher.guru_id,
                    },
                    AttendanceDraft {
                        status: recorded_or_present(teacher.status),
                        note: teacher.note.clone(),
                        guru_id: Some(teacher.guru_id),
                        has_assignment: teacher.has_assignment,
                    },
                );
            }
        } else {
            let teacher = entry.teachers.first();
            drafts.insert(
                DraftKey::Schedule(entry.id),
                AttendanceDraft {
                    status: recorded_or_present(
                        teacher.map(|t| t.status).unwrap_or_default(),
                    ),
                    note: teacher.map(|t| t.note.clone()).unwrap_or_default(),
                    guru_id: teacher.map(|t| t.guru_id),
                    has_assignment: teacher.map(|t| t.has_assignment).unwrap_or(false),
                },
            );
        }
    }
    drafts
}

fn recorded_or_present(status: AttendanceStatus) -> AttendanceStatus {
    if status.is_recorded() {
        status
    } else {
        AttendanceStatus::Present
    }
}

/// One status+note update for one (schedule, teacher, date) tuple
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceUpdate {
    pub jadwal_id: i64,
    pub guru_id: i64,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub note: String,
    pub tanggal: NaiveDate,
}

/// One student row in the teacher "take attendance" flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub siswa_id: i64,
    pub name: String,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub note: String,
}

/// Full-roster submission for one class period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassAttendanceBatch {
    pub kelas_id: i64,
    pub jadwal_id: i64,
    pub tanggal: NaiveDate,
    pub entries: Vec<RosterEntry>,
}
