//! User and auth DTOs shared between server and client

use serde::{Deserialize, Serialize};

/// Dashboard role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Class representative recording teacher attendance
    StudentRep,
    Teacher,
    Admin,
}

impl Role {
    /// Lookback window in days for retroactive attendance edits
    pub fn edit_lookback_days(&self) -> u32 {
        match self {
            Self::StudentRep => 7,
            Self::Teacher | Self::Admin => 30,
        }
    }
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub role: Role,
}

/// Current user response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookback_per_role() {
        assert_eq!(Role::StudentRep.edit_lookback_days(), 7);
        assert_eq!(Role::Teacher.edit_lookback_days(), 30);
        assert_eq!(Role::Admin.edit_lookback_days(), 30);
    }

    #[test]
    fn role_wire_spelling() {
        assert_eq!(serde_json::to_string(&Role::StudentRep).unwrap(), "\"student_rep\"");
        let role: Role = serde_json::from_str("\"teacher\"").unwrap();
        assert_eq!(role, Role::Teacher);
    }
}
