//! Domain models

pub mod appeal;
pub mod attendance;
pub mod letterhead;
pub mod schedule;
pub mod user;

pub use appeal::{AppealDecision, AppealRecord, AppealStatus, AppealSubmit};
pub use attendance::{
    AttendanceDraft, AttendanceUpdate, ClassAttendanceBatch, DraftKey, RosterEntry,
};
pub use letterhead::{LetterheadAlignment, LetterheadConfig, LetterheadImage, LetterheadScope};
pub use schedule::{
    ActivityKind, AttendanceStatus, RawScheduleEntry, ScheduleEntry, TeacherAssignment,
    parse_guru_list,
};
pub use user::{CurrentUserResponse, LoginRequest, LoginResponse, Role, UserInfo};
