//! In-memory state for the mock ABSENTA backend

use chrono::NaiveDate;
use dashmap::DashMap;
use shared::models::schedule::{
    ActivityKind, AttendanceStatus, ScheduleEntry, TeacherAssignment,
};
use shared::models::{AppealRecord, AppealStatus, LetterheadConfig, LetterheadImage, Role};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Seeded user account
#[derive(Debug, Clone)]
pub struct MockUser {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

/// One stored attendance mark, keyed by (jadwal, guru, tanggal)
#[derive(Debug, Clone)]
pub struct StoredMark {
    pub status: AttendanceStatus,
    pub note: String,
    pub recorded_at: String,
}

/// Stored letterhead image (bytes plus metadata)
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub meta: LetterheadImage,
    pub bytes: Vec<u8>,
}

/// Letterhead configuration and uploaded images
#[derive(Debug, Default)]
pub struct LetterheadStore {
    /// Configs keyed by scope wire string ("global" or report type)
    pub configs: HashMap<String, LetterheadConfig>,
    pub images: HashMap<i64, StoredImage>,
}

/// Shared state for the mock server
pub struct MockState {
    pub jwt_secret: String,
    pub users: Vec<MockUser>,
    /// Template schedule, identical for every served date
    pub entries: Vec<ScheduleEntry>,
    /// Teacher marks keyed by (jadwal_id, guru_id, tanggal)
    pub attendance: DashMap<(i64, i64, NaiveDate), StoredMark>,
    /// Student roster marks keyed by (jadwal_id, siswa_id, tanggal)
    pub roster: DashMap<(i64, i64, NaiveDate), StoredMark>,
    pub appeals: RwLock<Vec<AppealRecord>>,
    pub letterhead: RwLock<LetterheadStore>,
    /// Server-side retroactive edit bound in days
    pub edit_window_days: i64,
}

impl MockState {
    /// Build the canonical seeded state used by tests and local dev
    pub fn seeded() -> Self {
        let users = vec![
            MockUser {
                id: 101,
                username: "sari".into(),
                password: "rahasia".into(),
                name: "Sari Dewi".into(),
                role: Role::StudentRep,
            },
            MockUser {
                id: 14,
                username: "bu.ratna".into(),
                password: "rahasia".into(),
                name: "Ratna Wulandari".into(),
                role: Role::Teacher,
            },
            MockUser {
                id: 1,
                username: "admin".into(),
                password: "rahasia".into(),
                name: "Administrator".into(),
                role: Role::Admin,
            },
        ];

        let teacher = |guru_id: i64, name: &str, badge: &str, primary: bool| TeacherAssignment {
            guru_id,
            name: name.into(),
            badge: badge.into(),
            is_primary: primary,
            status: AttendanceStatus::Unset,
            note: String::new(),
            recorded_at: None,
            has_assignment: false,
        };

        let entry = |id: i64,
                     period: u32,
                     start: &str,
                     end: &str,
                     subject: &str,
                     kind: ActivityKind,
                     teachers: Vec<TeacherAssignment>| ScheduleEntry {
            id,
            period,
            start_time: start.into(),
            end_time: end.into(),
            subject: subject.into(),
            class_name: "XI IPA 2".into(),
            room: Some("R-204".into()),
            kind,
            is_attendable: kind.default_attendable(),
            special_note: None,
            teachers,
        };

        let entries = vec![
            entry(
                900,
                1,
                "07:00",
                "07:45",
                "Upacara Bendera",
                ActivityKind::Ceremony,
                vec![],
            ),
            entry(
                501,
                2,
                "07:45",
                "08:30",
                "Matematika",
                ActivityKind::Lesson,
                vec![teacher(14, "Ratna Wulandari", "198704122010012005", true)],
            ),
            entry(
                502,
                3,
                "08:30",
                "09:15",
                "Bahasa Indonesia",
                ActivityKind::Lesson,
                vec![teacher(21, "Joko Prasetyo", "197911052005011003", true)],
            ),
            entry(
                77,
                4,
                "09:30",
                "10:15",
                "IPA Terpadu",
                ActivityKind::Lesson,
                vec![
                    teacher(3, "Budi Santoso", "198801122011011002", true),
                    teacher(9, "Siti Aminah", "199103072015032001", false),
                ],
            ),
        ];

        let appeals = vec![AppealRecord {
            id: 42,
            siswa_id: 230,
            siswa_name: "Agus Hermawan".into(),
            jadwal_id: 501,
            subject: "Matematika".into(),
            tanggal: chrono::Local::now().date_naive(),
            original_status: AttendanceStatus::Absent,
            proposed_status: AttendanceStatus::Excused,
            justification: "Surat izin orang tua menyusul".into(),
            status: AppealStatus::Pending,
            reviewer_note: None,
            submitted_at: now_stamp(),
            decided_at: None,
        }];

        let mut letterhead = LetterheadStore::default();
        letterhead
            .configs
            .insert("global".into(), LetterheadConfig::global_default());

        Self {
            jwt_secret: "absenta-mock-secret".into(),
            users,
            entries,
            attendance: DashMap::new(),
            roster: DashMap::new(),
            appeals: RwLock::new(appeals),
            letterhead: RwLock::new(letterhead),
            edit_window_days: 30,
        }
    }

    pub fn find_user(&self, username: &str) -> Option<&MockUser> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn entry(&self, jadwal_id: i64) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.id == jadwal_id)
    }
}

/// Wall-clock stamp in the backend's wire format
pub fn now_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
