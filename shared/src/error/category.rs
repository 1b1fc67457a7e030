//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Schedule errors
/// - 4xxx: Attendance errors
/// - 5xxx: Appeal errors
/// - 6xxx: Report/letterhead errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Schedule errors (3xxx)
    Schedule,
    /// Attendance errors (4xxx)
    Attendance,
    /// Appeal errors (5xxx)
    Appeal,
    /// Report/letterhead errors (6xxx)
    Report,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Schedule,
            4000..5000 => Self::Attendance,
            5000..6000 => Self::Appeal,
            6000..7000 => Self::Report,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Schedule => "schedule",
            Self::Attendance => "attendance",
            Self::Appeal => "appeal",
            Self::Report => "report",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_from_ranges() {
        assert_eq!(ErrorCategory::from_code(2), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Schedule);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::Attendance);
        assert_eq!(ErrorCategory::from_code(5002), ErrorCategory::Appeal);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Report);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }

    #[test]
    fn code_category() {
        assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::NotAttendable.category(), ErrorCategory::Attendance);
        assert_eq!(ErrorCode::AppealAlreadyDecided.category(), ErrorCategory::Appeal);
    }
}
