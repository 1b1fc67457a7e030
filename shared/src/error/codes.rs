//! Unified error codes for ABSENTA
//!
//! Error codes are shared between the backend contract and the client so
//! that failures can be classified without string matching. Codes are
//! organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Schedule errors
//! - 4xxx: Attendance errors
//! - 5xxx: Appeal errors
//! - 6xxx: Report/letterhead errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes are represented as u16 values; the wire envelope carries the
/// `E{NNNN}` string form (see [`ErrorCode::code_str`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,

    // ==================== 3xxx: Schedule ====================
    /// Schedule entry not found
    ScheduleNotFound = 3001,
    /// Teacher is not assigned to this schedule entry
    TeacherNotAssigned = 3002,
    /// Class not found
    ClassNotFound = 3003,

    // ==================== 4xxx: Attendance ====================
    /// Attendance record not found
    AttendanceNotFound = 4001,
    /// Entry is not attendable (ceremony, break, holiday, ...)
    NotAttendable = 4002,
    /// Target date outside the editable window
    DateOutsideWindow = 4003,
    /// A teacher must be specified for a multi-teacher entry
    TeacherAmbiguous = 4004,

    // ==================== 5xxx: Appeal ====================
    /// Appeal not found
    AppealNotFound = 5001,
    /// Appeal is already decided and immutable
    AppealAlreadyDecided = 5002,
    /// Decision note is required
    DecisionNoteRequired = 5003,

    // ==================== 6xxx: Report/letterhead ====================
    /// Letterhead image not found
    LetterheadImageNotFound = 6001,
    /// Uploaded file is not a valid image
    LetterheadImageInvalid = 6002,
    /// Uploaded file exceeds the size limit
    LetterheadImageTooLarge = 6003,
    /// Letterhead config scope not found
    LetterheadScopeNotFound = 6004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the `E{NNNN}` string form used in the response envelope
    pub fn code_str(&self) -> String {
        format!("E{:04}", self.code())
    }

    /// Whether this code represents success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Get the default message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",
            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid username or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Token invalid",
            Self::PermissionDenied => "Permission denied",
            Self::RoleRequired => "Role required",
            Self::ScheduleNotFound => "Schedule entry not found",
            Self::TeacherNotAssigned => "Teacher is not assigned to this schedule entry",
            Self::ClassNotFound => "Class not found",
            Self::AttendanceNotFound => "Attendance record not found",
            Self::NotAttendable => "Entry is not attendable",
            Self::DateOutsideWindow => "Date is outside the editable window",
            Self::TeacherAmbiguous => "A specific teacher must be chosen for this entry",
            Self::AppealNotFound => "Appeal not found",
            Self::AppealAlreadyDecided => "Appeal is already decided",
            Self::DecisionNoteRequired => "A decision note is required",
            Self::LetterheadImageNotFound => "Letterhead image not found",
            Self::LetterheadImageInvalid => "Uploaded file is not a valid image",
            Self::LetterheadImageTooLarge => "Uploaded file exceeds the size limit",
            Self::LetterheadScopeNotFound => "Letterhead scope not found",
            Self::InternalError => "Internal server error",
            Self::NetworkError => "Network error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            7 => Ok(Self::RequiredField),
            1001 => Ok(Self::NotAuthenticated),
            1002 => Ok(Self::InvalidCredentials),
            1003 => Ok(Self::TokenExpired),
            1004 => Ok(Self::TokenInvalid),
            2001 => Ok(Self::PermissionDenied),
            2002 => Ok(Self::RoleRequired),
            3001 => Ok(Self::ScheduleNotFound),
            3002 => Ok(Self::TeacherNotAssigned),
            3003 => Ok(Self::ClassNotFound),
            4001 => Ok(Self::AttendanceNotFound),
            4002 => Ok(Self::NotAttendable),
            4003 => Ok(Self::DateOutsideWindow),
            4004 => Ok(Self::TeacherAmbiguous),
            5001 => Ok(Self::AppealNotFound),
            5002 => Ok(Self::AppealAlreadyDecided),
            5003 => Ok(Self::DecisionNoteRequired),
            6001 => Ok(Self::LetterheadImageNotFound),
            6002 => Ok(Self::LetterheadImageInvalid),
            6003 => Ok(Self::LetterheadImageTooLarge),
            6004 => Ok(Self::LetterheadScopeNotFound),
            9001 => Ok(Self::InternalError),
            9003 => Ok(Self::NetworkError),
            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    // Prints the numeric value, matching the serde representation
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
