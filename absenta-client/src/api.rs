//! Typed API operations on [`HttpClient`]
//!
//! Raw schedule rows are normalized into the canonical shape here, right
//! after the fetch; nothing downstream sees the backend's loose field
//! naming.

use crate::{ClientError, ClientResult, HttpClient};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::{
    AppealDecision, AppealRecord, AppealSubmit, AttendanceUpdate, ClassAttendanceBatch,
    CurrentUserResponse, LetterheadConfig, LetterheadImage, LetterheadScope, LoginRequest,
    LoginResponse, RawScheduleEntry, ScheduleEntry,
};
use shared::request::ListQuery;
use shared::response::{ApiResponse, PaginatedResponse};
use shared::types::DATE_FORMAT;

/// Schedule and attendance operations the coordinator depends on.
///
/// Implemented by [`HttpClient`]; tests substitute a scripted fake.
#[async_trait]
pub trait AttendanceApi: Send + Sync {
    /// Fetch today's schedule with attendance state
    async fn today_schedule(&self) -> ClientResult<Vec<ScheduleEntry>>;

    /// Fetch the schedule for an arbitrary date within the edit window
    async fn schedule_for(&self, date: NaiveDate) -> ClientResult<Vec<ScheduleEntry>>;

    /// Submit one status+note update for one (schedule, teacher, date)
    async fn submit_attendance(&self, update: &AttendanceUpdate) -> ClientResult<()>;
}

/// Appeal operations the reviewer depends on
#[async_trait]
pub trait AppealApi: Send + Sync {
    async fn list_appeals(&self, query: &ListQuery)
    -> ClientResult<PaginatedResponse<AppealRecord>>;

    async fn decide_appeal(
        &self,
        id: i64,
        decision: &AppealDecision,
    ) -> ClientResult<AppealRecord>;
}

impl HttpClient {
    // ========== Auth API ==========

    /// Login with username and password
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        self.post::<ApiResponse<LoginResponse>, _>("/api/auth/login", &request)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing login data".to_string()))
    }

    /// Get current user information
    pub async fn me(&self) -> ClientResult<CurrentUserResponse> {
        self.get::<ApiResponse<CurrentUserResponse>>("/api/auth/me")
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing user data".to_string()))
    }

    /// Logout
    pub async fn logout(&mut self) -> ClientResult<()> {
        self.post_empty::<ApiResponse<()>>("/api/auth/logout").await?;
        Ok(())
    }

    // ========== Schedule API ==========

    async fn fetch_schedule(&self, path: &str) -> ClientResult<Vec<ScheduleEntry>> {
        let raw = self
            .get::<ApiResponse<Vec<RawScheduleEntry>>>(path)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing schedule data".to_string()))?;
        Ok(raw.into_iter().map(RawScheduleEntry::normalize).collect())
    }

    /// Fetch today's schedule with attendance state
    pub async fn today_schedule(&self) -> ClientResult<Vec<ScheduleEntry>> {
        self.fetch_schedule("/api/schedule/today").await
    }

    /// Fetch the schedule for an arbitrary date within the edit window
    pub async fn schedule_for(&self, date: NaiveDate) -> ClientResult<Vec<ScheduleEntry>> {
        self.fetch_schedule(&format!("/api/schedule?tanggal={}", date.format(DATE_FORMAT)))
            .await
    }

    // ========== Attendance API ==========

    /// Submit one status+note update
    pub async fn submit_attendance(&self, update: &AttendanceUpdate) -> ClientResult<()> {
        self.post::<ApiResponse<serde_json::Value>, _>("/api/attendance", update)
            .await?;
        Ok(())
    }

    /// Submit a full roster of statuses for one class period
    pub async fn submit_class_attendance(
        &self,
        batch: &ClassAttendanceBatch,
    ) -> ClientResult<()> {
        self.post::<ApiResponse<serde_json::Value>, _>("/api/attendance/batch", batch)
            .await?;
        Ok(())
    }

    // ========== Appeal API ==========

    /// Submit a new appeal (student flow)
    pub async fn submit_appeal(&self, appeal: &AppealSubmit) -> ClientResult<AppealRecord> {
        self.post::<ApiResponse<AppealRecord>, _>("/api/appeals", appeal)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing appeal data".to_string()))
    }

    /// List appeals, newest first
    pub async fn list_appeals(
        &self,
        query: &ListQuery,
    ) -> ClientResult<PaginatedResponse<AppealRecord>> {
        let mut path = format!(
            "/api/appeals?page={}&per_page={}",
            query.pagination.page, query.pagination.per_page
        );
        if let Some(status) = &query.status {
            path.push_str(&format!("&status={}", status));
        }
        if let Some(search) = &query.search {
            path.push_str(&format!("&search={}", search));
        }
        self.get::<ApiResponse<PaginatedResponse<AppealRecord>>>(&path)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing appeal list".to_string()))
    }

    /// Decide a pending appeal (teacher flow)
    pub async fn decide_appeal(
        &self,
        id: i64,
        decision: &AppealDecision,
    ) -> ClientResult<AppealRecord> {
        self.post::<ApiResponse<AppealRecord>, _>(&format!("/api/appeals/{}/decision", id), decision)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing appeal data".to_string()))
    }

    // ========== Letterhead API ==========

    /// Upload a letterhead logo image
    pub async fn upload_letterhead(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<LetterheadImage> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        self.post_multipart::<ApiResponse<LetterheadImage>>("/api/letterhead/image", form)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing image data".to_string()))
    }

    /// Fetch a letterhead image's bytes
    pub async fn fetch_letterhead_image(&self, id: i64) -> ClientResult<Vec<u8>> {
        self.get_bytes(&format!("/api/letterhead/image/{}", id)).await
    }

    /// Delete a letterhead image
    pub async fn delete_letterhead_image(&self, id: i64) -> ClientResult<()> {
        self.delete::<ApiResponse<serde_json::Value>>(&format!("/api/letterhead/image/{}", id))
            .await?;
        Ok(())
    }

    /// Fetch the letterhead config for a scope
    pub async fn letterhead_config(
        &self,
        scope: &LetterheadScope,
    ) -> ClientResult<LetterheadConfig> {
        self.get::<ApiResponse<LetterheadConfig>>(&format!(
            "/api/letterhead/config?scope={}",
            scope.as_str()
        ))
        .await?
        .data
        .ok_or_else(|| ClientError::InvalidResponse("Missing letterhead config".to_string()))
    }

    /// Replace the letterhead config for the scope it names
    pub async fn update_letterhead_config(
        &self,
        config: &LetterheadConfig,
    ) -> ClientResult<LetterheadConfig> {
        self.put::<ApiResponse<LetterheadConfig>, _>("/api/letterhead/config", config)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing letterhead config".to_string()))
    }
}

#[async_trait]
impl AttendanceApi for HttpClient {
    async fn today_schedule(&self) -> ClientResult<Vec<ScheduleEntry>> {
        HttpClient::today_schedule(self).await
    }

    async fn schedule_for(&self, date: NaiveDate) -> ClientResult<Vec<ScheduleEntry>> {
        HttpClient::schedule_for(self, date).await
    }

    async fn submit_attendance(&self, update: &AttendanceUpdate) -> ClientResult<()> {
        HttpClient::submit_attendance(self, update).await
    }
}

#[async_trait]
impl AppealApi for HttpClient {
    async fn list_appeals(
        &self,
        query: &ListQuery,
    ) -> ClientResult<PaginatedResponse<AppealRecord>> {
        HttpClient::list_appeals(self, query).await
    }

    async fn decide_appeal(
        &self,
        id: i64,
        decision: &AppealDecision,
    ) -> ClientResult<AppealRecord> {
        HttpClient::decide_appeal(self, id, decision).await
    }
}
