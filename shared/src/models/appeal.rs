//! Attendance appeal (banding absen) models

use super::schedule::AttendanceStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Review state of an appeal. `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppealStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl AppealStatus {
    /// Whether further transitions are permitted
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A request to change a previously recorded attendance status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppealRecord {
    pub id: i64,
    pub siswa_id: i64,
    pub siswa_name: String,
    pub jadwal_id: i64,
    pub subject: String,
    pub tanggal: NaiveDate,
    pub original_status: AttendanceStatus,
    pub proposed_status: AttendanceStatus,
    pub justification: String,
    pub status: AppealStatus,
    pub reviewer_note: Option<String>,
    pub submitted_at: String,
    pub decided_at: Option<String>,
}

/// Appeal submission from the student flow
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppealSubmit {
    pub siswa_id: i64,
    pub jadwal_id: i64,
    pub tanggal: NaiveDate,
    pub proposed_status: AttendanceStatus,
    #[validate(length(min = 1, message = "justification must not be empty"))]
    pub justification: String,
}

/// Teacher decision on a pending appeal
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppealDecision {
    pub approve: bool,
    #[validate(length(min = 1, message = "a decision note is required"))]
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_the_only_open_state() {
        assert!(!AppealStatus::Pending.is_decided());
        assert!(AppealStatus::Approved.is_decided());
        assert!(AppealStatus::Rejected.is_decided());
    }

    #[test]
    fn decision_requires_note() {
        let decision = AppealDecision { approve: false, note: String::new() };
        assert!(decision.validate().is_err());
        let decision = AppealDecision { approve: false, note: "bukti tidak cukup".into() };
        assert!(decision.validate().is_ok());
    }

    #[test]
    fn submission_requires_justification() {
        let submit = AppealSubmit {
            siswa_id: 12,
            jadwal_id: 501,
            tanggal: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            proposed_status: AttendanceStatus::Excused,
            justification: String::new(),
        };
        assert!(submit.validate().is_err());
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&AppealStatus::Pending).unwrap(), "\"pending\"");
        let s: AppealStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(s, AppealStatus::Rejected);
    }
}
