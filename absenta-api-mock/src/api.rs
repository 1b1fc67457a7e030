//! Mock API handlers
//!
//! Implements the ABSENTA backend contract against the in-memory state.
//! Responses use the same `ApiResponse` envelope as the real backend so
//! the client exercises its full decode path.

use crate::state::{MockState, MockUser, StoredMark, now_stamp};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{Duration, Local, NaiveDate, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::schedule::{format_guru_list, RawScheduleEntry, TeacherAssignment};
use shared::models::{
    AppealDecision, AppealRecord, AppealStatus, AppealSubmit, AttendanceUpdate,
    ClassAttendanceBatch, CurrentUserResponse, LoginRequest, LoginResponse, Role, UserInfo,
};
use shared::response::{ApiResponse, PaginatedResponse};
use shared::util::snowflake_id;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    uid: i64,
    role: Role,
    exp: usize,
}

fn trace_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn ok<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok(data).with_trace_id(trace_id()))
}

// ========== Auth ==========

pub async fn login(
    State(state): State<Arc<MockState>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let user = state
        .find_user(&req.username)
        .filter(|u| u.password == req.password)
        .ok_or_else(AppError::invalid_credentials)?;

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(8))
        .map(|t| t.timestamp())
        .unwrap_or_default();

    let claims = Claims {
        sub: user.username.clone(),
        uid: user.id,
        role: user.role,
        exp: expiration as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("token issue failed: {}", e)))?;

    tracing::info!(username = %user.username, "login ok");

    Ok(ok(LoginResponse {
        token,
        user: UserInfo {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role,
        },
    }))
}

/// Verify the bearer token and resolve the calling user
pub fn authenticate(state: &MockState, headers: &HeaderMap) -> AppResult<MockUser> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return Err(AppError::unauthorized());
    };

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| AppError::invalid_token(format!("invalid token: {}", e)))?;

    state
        .find_user(&token_data.claims.sub)
        .cloned()
        .ok_or_else(AppError::unauthorized)
}

pub async fn me(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<CurrentUserResponse>>> {
    let user = authenticate(&state, &headers)?;
    Ok(ok(CurrentUserResponse {
        id: user.id,
        username: user.username,
        name: user.name,
        role: user.role,
    }))
}

pub async fn logout(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    authenticate(&state, &headers)?;
    // Stateless tokens; nothing to revoke in the mock.
    Ok(ok(serde_json::json!({ "logged_out": true })))
}

// ========== Schedule ==========

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub tanggal: NaiveDate,
}

/// Render one seeded entry as the raw wire row for a date, overlaying
/// any stored marks.
fn serve_entry(
    state: &MockState,
    entry: &shared::models::ScheduleEntry,
    date: NaiveDate,
) -> RawScheduleEntry {
    let overlay = |t: &TeacherAssignment| -> TeacherAssignment {
        match state.attendance.get(&(entry.id, t.guru_id, date)) {
            Some(mark) => TeacherAssignment {
                status: mark.status,
                note: mark.note.clone(),
                recorded_at: Some(mark.recorded_at.clone()),
                ..t.clone()
            },
            None => t.clone(),
        }
    };

    let mut row = RawScheduleEntry {
        id: entry.id,
        period: entry.period,
        start_time: entry.start_time.clone(),
        end_time: entry.end_time.clone(),
        subject: entry.subject.clone(),
        class_name: entry.class_name.clone(),
        room: entry.room.clone(),
        kind: entry.kind,
        is_attendable: Some(entry.is_attendable),
        special_note: entry.special_note.clone(),
        guru_id: None,
        guru_name: None,
        guru_badge: None,
        status: None,
        note: None,
        recorded_at: None,
        guru_list: None,
    };

    if entry.teachers.len() > 1 {
        let teachers: Vec<TeacherAssignment> = entry.teachers.iter().map(overlay).collect();
        row.guru_list = Some(format_guru_list(&teachers));
    } else if let Some(teacher) = entry.teachers.first() {
        let merged = overlay(teacher);
        row.guru_id = Some(merged.guru_id);
        row.guru_name = Some(merged.name);
        row.guru_badge = Some(merged.badge);
        row.status = Some(merged.status.as_str().to_string());
        row.note = Some(merged.note);
        row.recorded_at = merged.recorded_at;
    }

    row
}

fn schedule_rows(state: &MockState, date: NaiveDate) -> Vec<RawScheduleEntry> {
    state
        .entries
        .iter()
        .map(|entry| serve_entry(state, entry, date))
        .collect()
}

pub async fn today_schedule(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<Vec<RawScheduleEntry>>>> {
    authenticate(&state, &headers)?;
    Ok(ok(schedule_rows(&state, Local::now().date_naive())))
}

pub async fn schedule_by_date(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<ScheduleQuery>,
) -> AppResult<Json<ApiResponse<Vec<RawScheduleEntry>>>> {
    authenticate(&state, &headers)?;
    Ok(ok(schedule_rows(&state, query.tanggal)))
}

// ========== Attendance ==========

fn check_window(state: &MockState, tanggal: NaiveDate) -> AppResult<()> {
    let today = Local::now().date_naive();
    let age = (today - tanggal).num_days();
    if tanggal > today || age > state.edit_window_days {
        return Err(AppError::new(ErrorCode::DateOutsideWindow)
            .with_detail("tanggal", tanggal.to_string()));
    }
    Ok(())
}

pub async fn submit_attendance(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(update): Json<AttendanceUpdate>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    authenticate(&state, &headers)?;

    let entry = state
        .entry(update.jadwal_id)
        .ok_or_else(|| AppError::new(ErrorCode::ScheduleNotFound))?;
    if !entry.is_attendable {
        return Err(AppError::new(ErrorCode::NotAttendable));
    }
    if !entry.teachers.iter().any(|t| t.guru_id == update.guru_id) {
        return Err(AppError::new(ErrorCode::TeacherNotAssigned)
            .with_detail("guru_id", update.guru_id));
    }
    check_window(&state, update.tanggal)?;

    state.attendance.insert(
        (update.jadwal_id, update.guru_id, update.tanggal),
        StoredMark {
            status: update.status,
            note: update.note.clone(),
            recorded_at: now_stamp(),
        },
    );

    tracing::info!(
        jadwal_id = update.jadwal_id,
        guru_id = update.guru_id,
        status = update.status.as_str(),
        "attendance stored"
    );

    Ok(ok(serde_json::json!({ "saved": true })))
}

pub async fn submit_batch(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(batch): Json<ClassAttendanceBatch>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let user = authenticate(&state, &headers)?;
    if user.role == Role::StudentRep {
        return Err(AppError::forbidden("Only teachers may submit a class roster"));
    }

    let entry = state
        .entry(batch.jadwal_id)
        .ok_or_else(|| AppError::new(ErrorCode::ScheduleNotFound))?;
    if !entry.is_attendable {
        return Err(AppError::new(ErrorCode::NotAttendable));
    }
    check_window(&state, batch.tanggal)?;

    for row in &batch.entries {
        state.roster.insert(
            (batch.jadwal_id, row.siswa_id, batch.tanggal),
            StoredMark {
                status: row.status,
                note: row.note.clone(),
                recorded_at: now_stamp(),
            },
        );
    }

    Ok(ok(serde_json::json!({ "saved": batch.entries.len() })))
}

// ========== Appeals ==========

#[derive(Debug, Deserialize)]
pub struct AppealListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    pub status: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

pub async fn submit_appeal(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(submit): Json<AppealSubmit>,
) -> AppResult<Json<ApiResponse<AppealRecord>>> {
    let user = authenticate(&state, &headers)?;
    submit.validate()?;

    let entry = state
        .entry(submit.jadwal_id)
        .ok_or_else(|| AppError::new(ErrorCode::ScheduleNotFound))?;

    // The recorded roster mark is the status being appealed; absent is
    // the usual case when no mark was stored at all.
    let original_status = state
        .roster
        .get(&(submit.jadwal_id, submit.siswa_id, submit.tanggal))
        .map(|m| m.status)
        .unwrap_or(shared::models::AttendanceStatus::Absent);

    let record = AppealRecord {
        id: snowflake_id(),
        siswa_id: submit.siswa_id,
        siswa_name: user.name.clone(),
        jadwal_id: submit.jadwal_id,
        subject: entry.subject.clone(),
        tanggal: submit.tanggal,
        original_status,
        proposed_status: submit.proposed_status,
        justification: submit.justification,
        status: AppealStatus::Pending,
        reviewer_note: None,
        submitted_at: now_stamp(),
        decided_at: None,
    };

    state.appeals.write().await.push(record.clone());
    Ok(ok(record))
}

pub async fn list_appeals(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<AppealListQuery>,
) -> AppResult<Json<ApiResponse<PaginatedResponse<AppealRecord>>>> {
    authenticate(&state, &headers)?;

    let appeals = state.appeals.read().await;
    let filtered: Vec<AppealRecord> = appeals
        .iter()
        .filter(|a| match query.status.as_deref() {
            Some("pending") => a.status == AppealStatus::Pending,
            Some("approved") => a.status == AppealStatus::Approved,
            Some("rejected") => a.status == AppealStatus::Rejected,
            _ => true,
        })
        .cloned()
        .collect();

    let total = filtered.len() as u64;
    let per_page = query.per_page.clamp(1, 100);
    let offset = ((query.page.max(1) - 1) * per_page) as usize;
    let items: Vec<AppealRecord> = filtered
        .into_iter()
        .rev() // newest first
        .skip(offset)
        .take(per_page as usize)
        .collect();

    Ok(ok(PaginatedResponse::new(items, query.page, per_page, total)))
}

pub async fn decide_appeal(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(decision): Json<AppealDecision>,
) -> AppResult<Json<ApiResponse<AppealRecord>>> {
    let user = authenticate(&state, &headers)?;
    if user.role == Role::StudentRep {
        return Err(AppError::forbidden("Only teachers may decide appeals"));
    }
    // Reject requires a note; approvals may omit it.
    if !decision.approve && decision.note.trim().is_empty() {
        return Err(AppError::new(ErrorCode::DecisionNoteRequired));
    }

    let mut appeals = state.appeals.write().await;
    let record = appeals
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::AppealNotFound).with_detail("id", id))?;

    if record.status.is_decided() {
        return Err(AppError::new(ErrorCode::AppealAlreadyDecided).with_detail("id", id));
    }

    record.status = if decision.approve {
        AppealStatus::Approved
    } else {
        AppealStatus::Rejected
    };
    record.reviewer_note = Some(decision.note.clone());
    record.decided_at = Some(now_stamp());

    tracing::info!(id, approve = decision.approve, "appeal decided");

    Ok(ok(record.clone()))
}

// ========== Health ==========

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
