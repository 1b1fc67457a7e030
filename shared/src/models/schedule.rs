//! Schedule and teacher-assignment models
//!
//! The backend sends schedule rows in a loose shape: optional
//! single-teacher columns, a delimited `guru_list` column for
//! multi-teacher entries, and field names that vary between endpoints.
//! Everything is normalized into [`ScheduleEntry`] immediately after
//! fetch; the rest of the system never sees the raw shape.

use serde::{Deserialize, Serialize};

/// Kind of activity occupying a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    #[default]
    Lesson,
    Ceremony,
    Break,
    SpecialEvent,
    Holiday,
    Exam,
    Other,
}

impl ActivityKind {
    /// Whether entries of this kind take attendance by default
    pub fn default_attendable(&self) -> bool {
        matches!(self, Self::Lesson | Self::Exam)
    }
}

/// Per-teacher attendance status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[default]
    Unset,
    Present,
    Absent,
    Excused,
    Sick,
}

impl AttendanceStatus {
    /// Parse a wire value; accepts both the canonical spellings and the
    /// Indonesian ones still emitted by older report endpoints.
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "present" | "hadir" => Self::Present,
            "absent" | "alpa" | "alfa" => Self::Absent,
            "excused" | "izin" => Self::Excused,
            "sick" | "sakit" => Self::Sick,
            _ => Self::Unset,
        }
    }

    /// Canonical wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Excused => "excused",
            Self::Sick => "sick",
        }
    }

    /// Whether a status has been recorded at all
    pub fn is_recorded(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}

/// A teacher's attendance obligation for one schedule entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TeacherAssignment {
    pub guru_id: i64,
    pub name: String,
    /// Badge number (NIP)
    pub badge: String,
    pub is_primary: bool,
    pub status: AttendanceStatus,
    pub note: String,
    pub recorded_at: Option<String>,
    /// Teacher left an assignment for the class despite being absent
    pub has_assignment: bool,
}

/// One timetabled class period on a specific day (canonical shape)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    pub id: i64,
    pub period: u32,
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
    pub class_name: String,
    pub room: Option<String>,
    pub kind: ActivityKind,
    pub is_attendable: bool,
    pub special_note: Option<String>,
    pub teachers: Vec<TeacherAssignment>,
}

impl ScheduleEntry {
    /// Entry taught jointly by more than one teacher
    pub fn is_multi_teacher(&self) -> bool {
        self.teachers.len() > 1
    }

    /// The single teacher of a non-joint entry, if any
    pub fn single_teacher(&self) -> Option<&TeacherAssignment> {
        if self.teachers.len() == 1 {
            self.teachers.first()
        } else {
            None
        }
    }
}

/// Raw wire shape of a schedule row, before normalization.
///
/// Field names vary between backend endpoints; serde aliases fold them
/// into one set. Single-teacher columns and the delimited `guru_list`
/// column are both optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawScheduleEntry {
    #[serde(alias = "jadwal_id")]
    pub id: i64,
    #[serde(alias = "jam_ke")]
    pub period: u32,
    #[serde(alias = "jam_mulai")]
    pub start_time: String,
    #[serde(alias = "jam_selesai")]
    pub end_time: String,
    #[serde(alias = "mapel")]
    pub subject: String,
    #[serde(alias = "kelas")]
    pub class_name: String,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub kind: ActivityKind,
    #[serde(default)]
    pub is_attendable: Option<bool>,
    #[serde(default, alias = "keterangan")]
    pub special_note: Option<String>,

    // Single-teacher columns
    #[serde(default, alias = "id_guru", alias = "teacher_id")]
    pub guru_id: Option<i64>,
    #[serde(default, alias = "nama_guru")]
    pub guru_name: Option<String>,
    #[serde(default, alias = "nip")]
    pub guru_badge: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "catatan")]
    pub note: Option<String>,
    #[serde(default)]
    pub recorded_at: Option<String>,

    // Multi-teacher column: "id:name:badge:status:note:ts:primary:assign"
    // records joined by "||"
    #[serde(default, alias = "daftar_guru")]
    pub guru_list: Option<String>,
}

impl RawScheduleEntry {
    /// Normalize into the canonical [`ScheduleEntry`] shape
    pub fn normalize(self) -> ScheduleEntry {
        let teachers = match self.guru_list.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_guru_list(raw),
            _ => match self.guru_id {
                Some(guru_id) => vec![TeacherAssignment {
                    guru_id,
                    name: self.guru_name.unwrap_or_default(),
                    badge: self.guru_badge.unwrap_or_default(),
                    is_primary: true,
                    status: self
                        .status
                        .as_deref()
                        .map(AttendanceStatus::from_wire)
                        .unwrap_or_default(),
                    note: self.note.unwrap_or_default(),
                    recorded_at: self.recorded_at,
                    has_assignment: false,
                }],
                None => Vec::new(),
            },
        };

        let is_attendable = self
            .is_attendable
            .unwrap_or_else(|| self.kind.default_attendable());

        ScheduleEntry {
            id: self.id,
            period: self.period,
            start_time: self.start_time,
            end_time: self.end_time,
            subject: self.subject,
            class_name: self.class_name,
            room: self.room,
            kind: self.kind,
            is_attendable,
            special_note: self.special_note,
            teachers,
        }
    }
}

/// Delimiter between teacher records in the flat multi-teacher column
pub const GURU_LIST_RECORD_SEP: &str = "||";
/// Delimiter between fields within one teacher record
pub const GURU_LIST_FIELD_SEP: char = ':';

/// Parse the delimited multi-teacher column into structured assignments.
///
/// Each record carries eight positional fields: teacher id, name, badge,
/// status, note, recorded timestamp, primary flag (0/1), has-assignment
/// flag (0/1). Empty or malformed input yields an empty vector. Numeric
/// fields default to 0/false when unparseable; string fields default to
/// empty. Record order is preserved.
pub fn parse_guru_list(raw: &str) -> Vec<TeacherAssignment> {
    raw.split(GURU_LIST_RECORD_SEP)
        .filter_map(parse_guru_record)
        .collect()
}

fn parse_guru_record(record: &str) -> Option<TeacherAssignment> {
    let record = record.trim();
    // A record must at least carry "id:name"; anything else is noise.
    if record.is_empty() || !record.contains(GURU_LIST_FIELD_SEP) {
        return None;
    }

    let parts: Vec<&str> = record.split(GURU_LIST_FIELD_SEP).collect();
    let field = |i: usize| parts.get(i).copied().unwrap_or("");

    // The recorded timestamp is the only field that may itself contain the
    // field separator ("2024-05-01 07:30:00"). With more than eight parts,
    // the first five and last two stay positional and the surplus folds
    // back into the timestamp.
    let (recorded_at, primary_raw, assign_raw) = if parts.len() > 8 {
        (
            parts[5..parts.len() - 2].join(":"),
            field(parts.len() - 2),
            field(parts.len() - 1),
        )
    } else {
        (field(5).to_string(), field(6), field(7))
    };

    let flag = |s: &str| s.trim().parse::<u8>().unwrap_or(0) != 0;

    Some(TeacherAssignment {
        guru_id: field(0).trim().parse().unwrap_or(0),
        name: field(1).trim().to_string(),
        badge: field(2).trim().to_string(),
        status: AttendanceStatus::from_wire(field(3)),
        note: field(4).trim().to_string(),
        recorded_at: {
            let ts = recorded_at.trim().to_string();
            if ts.is_empty() { None } else { Some(ts) }
        },
        is_primary: flag(primary_raw),
        has_assignment: flag(assign_raw),
    })
}

/// Render assignments back into the flat column (used by the mock backend)
pub fn format_guru_list(teachers: &[TeacherAssignment]) -> String {
    teachers
        .iter()
        .map(|t| {
            format!(
                "{}:{}:{}:{}:{}:{}:{}:{}",
                t.guru_id,
                t.name,
                t.badge,
                t.status.as_str(),
                t.note,
                t.recorded_at.as_deref().unwrap_or(""),
                u8::from(t.is_primary),
                u8::from(t.has_assignment),
            )
        })
        .collect::<Vec<_>>()
        .join(GURU_LIST_RECORD_SEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_spellings() {
        assert_eq!(AttendanceStatus::from_wire("present"), AttendanceStatus::Present);
        assert_eq!(AttendanceStatus::from_wire("HADIR"), AttendanceStatus::Present);
        assert_eq!(AttendanceStatus::from_wire("izin"), AttendanceStatus::Excused);
        assert_eq!(AttendanceStatus::from_wire("sakit"), AttendanceStatus::Sick);
        assert_eq!(AttendanceStatus::from_wire("alpa"), AttendanceStatus::Absent);
        assert_eq!(AttendanceStatus::from_wire(""), AttendanceStatus::Unset);
        assert_eq!(AttendanceStatus::from_wire("???"), AttendanceStatus::Unset);
    }

    #[test]
    fn empty_and_malformed_input_yield_empty() {
        assert!(parse_guru_list("").is_empty());
        assert!(parse_guru_list("   ").is_empty());
        assert!(parse_guru_list("||").is_empty());
        assert!(parse_guru_list("garbage").is_empty());
        assert!(parse_guru_list("||garbage||").is_empty());
    }

    #[test]
    fn well_formed_records_preserve_count_and_order() {
        let raw = "3:Budi Santoso:19880112:present:::1:0||9:Siti Aminah:19910307:sick:demam::0:1";
        let parsed = parse_guru_list(raw);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].guru_id, 3);
        assert_eq!(parsed[0].name, "Budi Santoso");
        assert_eq!(parsed[0].status, AttendanceStatus::Present);
        assert!(parsed[0].is_primary);
        assert!(!parsed[0].has_assignment);
        assert_eq!(parsed[1].guru_id, 9);
        assert_eq!(parsed[1].status, AttendanceStatus::Sick);
        assert_eq!(parsed[1].note, "demam");
        assert!(parsed[1].has_assignment);
    }

    #[test]
    fn missing_fields_fill_with_defaults() {
        let parsed = parse_guru_list("7:Pak Joko");
        assert_eq!(parsed.len(), 1);
        let t = &parsed[0];
        assert_eq!(t.guru_id, 7);
        assert_eq!(t.name, "Pak Joko");
        assert_eq!(t.badge, "");
        assert_eq!(t.status, AttendanceStatus::Unset);
        assert_eq!(t.note, "");
        assert_eq!(t.recorded_at, None);
        assert!(!t.is_primary);
        assert!(!t.has_assignment);
    }

    #[test]
    fn unparseable_numerics_default_to_zero() {
        let parsed = parse_guru_list("abc:Nama:x:present:::yes:no");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].guru_id, 0);
        assert!(!parsed[0].is_primary);
        assert!(!parsed[0].has_assignment);
    }

    #[test]
    fn timestamp_with_colons_folds_back() {
        let raw = "3:Budi:19880112:present:ok:2024-05-01 07:30:00:1:0";
        let parsed = parse_guru_list(raw);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].recorded_at.as_deref(), Some("2024-05-01 07:30:00"));
        assert!(parsed[0].is_primary);
    }

    #[test]
    fn format_then_parse_is_stable() {
        let teachers = vec![
            TeacherAssignment {
                guru_id: 3,
                name: "Budi".into(),
                badge: "19880112".into(),
                status: AttendanceStatus::Present,
                note: String::new(),
                recorded_at: Some("2024-05-01 07:30:00".into()),
                is_primary: true,
                has_assignment: false,
            },
            TeacherAssignment {
                guru_id: 9,
                name: "Siti".into(),
                badge: "19910307".into(),
                status: AttendanceStatus::Unset,
                note: String::new(),
                recorded_at: None,
                is_primary: false,
                has_assignment: true,
            },
        ];
        let parsed = parse_guru_list(&format_guru_list(&teachers));
        assert_eq!(parsed, teachers);
    }

    #[test]
    fn raw_entry_normalizes_aliases() {
        let json = r#"{
            "jadwal_id": 501,
            "jam_ke": 2,
            "jam_mulai": "07:45",
            "jam_selesai": "08:30",
            "mapel": "Matematika",
            "kelas": "XI IPA 2",
            "id_guru": 14,
            "nama_guru": "Bu Ratna",
            "status": "hadir"
        }"#;
        let raw: RawScheduleEntry = serde_json::from_str(json).unwrap();
        let entry = raw.normalize();
        assert_eq!(entry.id, 501);
        assert_eq!(entry.subject, "Matematika");
        assert_eq!(entry.kind, ActivityKind::Lesson);
        assert!(entry.is_attendable);
        let teacher = entry.single_teacher().unwrap();
        assert_eq!(teacher.guru_id, 14);
        assert_eq!(teacher.status, AttendanceStatus::Present);
    }

    #[test]
    fn guru_list_wins_over_single_columns() {
        let json = r#"{
            "id": 77,
            "period": 4,
            "start_time": "10:15",
            "end_time": "11:00",
            "subject": "IPA Terpadu",
            "class_name": "VIII B",
            "guru_list": "3:Budi:19880112:unset:::1:0||9:Siti:19910307:unset:::0:0"
        }"#;
        let entry: ScheduleEntry = serde_json::from_str::<RawScheduleEntry>(json)
            .unwrap()
            .normalize();
        assert!(entry.is_multi_teacher());
        assert_eq!(entry.teachers.len(), 2);
        assert!(entry.single_teacher().is_none());
    }

    #[test]
    fn non_lesson_kinds_are_not_attendable_by_default() {
        let json = r#"{
            "id": 1,
            "period": 1,
            "start_time": "07:00",
            "end_time": "07:45",
            "subject": "Upacara Bendera",
            "class_name": "XI IPA 2",
            "kind": "ceremony"
        }"#;
        let entry = serde_json::from_str::<RawScheduleEntry>(json)
            .unwrap()
            .normalize();
        assert!(!entry.is_attendable);
    }
}
