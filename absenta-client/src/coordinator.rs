//! Attendance Status Update Coordinator
//!
//! Mediates between optimistic UI updates and server-confirmed state for
//! per-schedule, per-teacher attendance marking. A status change is
//! written into the local draft map immediately, submitted, and then
//! either confirmed by a full schedule reload or rolled back to the
//! pre-update snapshot.

use crate::api::AttendanceApi;
use crate::policy::{EditWindow, ViewEvent, ViewWindow};
use crate::{ClientError, ClientResult};
use chrono::NaiveDate;
use shared::models::attendance::derive_drafts;
use shared::models::{
    AttendanceDraft, AttendanceStatus, AttendanceUpdate, DraftKey, Role, ScheduleEntry,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
}

/// Toast-equivalent notification, queued for the embedding UI to drain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Result of an [`AttendanceCoordinator::update_status`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Submitted and confirmed by a refresh
    Committed,
    /// An update for the same key is still in flight; call ignored
    InFlight,
    /// Blocked client-side before any network call; any optimistic
    /// write was restored
    Rejected,
    /// Server or network failure; snapshot restored
    RolledBack,
}

/// Client-side coordinator for one dashboard's attendance view
pub struct AttendanceCoordinator<A: AttendanceApi> {
    api: A,
    window: EditWindow,
    view: ViewWindow,
    today: NaiveDate,
    refresh_delay: Duration,
    entries: Vec<ScheduleEntry>,
    drafts: HashMap<DraftKey, AttendanceDraft>,
    pending: HashSet<DraftKey>,
    notices: VecDeque<Notice>,
}

impl<A: AttendanceApi> AttendanceCoordinator<A> {
    /// Create a coordinator for the given role. `today` is injected so
    /// the edit-window arithmetic is deterministic under test.
    pub fn new(api: A, role: Role, today: NaiveDate) -> Self {
        Self {
            api,
            window: EditWindow::for_role(role),
            view: ViewWindow::Live,
            today,
            refresh_delay: Duration::from_millis(600),
            entries: Vec::new(),
            drafts: HashMap::new(),
            pending: HashSet::new(),
            notices: VecDeque::new(),
        }
    }

    /// Override the post-success refresh delay (zero in tests)
    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    // ========== Read access for the embedding view ==========

    pub fn view(&self) -> ViewWindow {
        self.view
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn draft(&self, key: &DraftKey) -> Option<&AttendanceDraft> {
        self.drafts.get(key)
    }

    pub fn is_pending(&self, key: &DraftKey) -> bool {
        self.pending.contains(key)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drain queued notices (success/error toasts)
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    // ========== Loading ==========

    /// Load (or reload) the schedule list for the active date. All
    /// drafts are re-derived from the fresh server state; local edits
    /// not yet submitted do not survive a reload.
    pub async fn load(&mut self) -> ClientResult<()> {
        let entries = match self.view {
            ViewWindow::Live => self.api.today_schedule().await?,
            ViewWindow::Editing { date } => self.api.schedule_for(date).await?,
        };
        self.drafts = derive_drafts(&entries);
        self.entries = entries;
        Ok(())
    }

    // ========== View transitions ==========

    /// Toggle edit mode. Switching on opens today for editing; switching
    /// off returns to the live view and reloads it.
    pub async fn set_edit_mode(&mut self, on: bool) -> ClientResult<()> {
        let event = if on {
            ViewEvent::EditModeOn
        } else {
            ViewEvent::EditModeOff
        };
        let Some(transition) = self.view.apply(event, &self.window, self.today) else {
            return Ok(());
        };
        self.view = transition.next;
        if transition.reload {
            self.load().await?;
        }
        Ok(())
    }

    /// Change the edited date. Reloads are suppressed while any update
    /// is still in flight so an in-progress optimistic write is not
    /// clobbered by a list swap.
    pub async fn select_date(&mut self, date: NaiveDate) -> ClientResult<()> {
        let event = ViewEvent::DateSelected(date);
        let Some(transition) = self.view.apply(event, &self.window, self.today) else {
            self.notify(NoticeKind::Warning, "Tanggal di luar rentang edit");
            return Ok(());
        };
        self.view = transition.next;
        if transition.reload {
            if self.pending.is_empty() {
                self.load().await?;
            } else {
                tracing::warn!(date = %date, "reload suppressed while updates are pending");
            }
        }
        Ok(())
    }

    // ========== Draft editing ==========

    /// Set the free-text note for a key (not submitted until the next
    /// status update)
    pub fn set_note(&mut self, key: &DraftKey, note: impl Into<String>) {
        if let Some(draft) = self.drafts.get_mut(key) {
            draft.note = note.into();
        }
    }

    /// Change one attendance status: optimistic write, submit, then
    /// confirm by refresh or roll back to the snapshot.
    pub async fn update_status(
        &mut self,
        key: DraftKey,
        status: AttendanceStatus,
    ) -> UpdateOutcome {
        if self.pending.contains(&key) {
            tracing::debug!(key = %key, "update already in flight, ignoring");
            return UpdateOutcome::InFlight;
        }

        // Validate the target before any optimistic write.
        let attendable = self
            .entries
            .iter()
            .find(|e| e.id == key.jadwal_id())
            .map(|e| e.is_attendable);
        match attendable {
            None => {
                self.notify(NoticeKind::Error, "Jadwal tidak ditemukan");
                return UpdateOutcome::Rejected;
            }
            Some(false) => {
                self.notify(NoticeKind::Error, "Kegiatan ini tidak memerlukan absensi");
                return UpdateOutcome::Rejected;
            }
            Some(true) => {}
        }

        let snapshot = self.drafts.get(&key).cloned();
        self.pending.insert(key.clone());
        let outcome = self.perform_update(&key, status, snapshot).await;
        // Always runs, whatever path perform_update took.
        self.pending.remove(&key);
        outcome
    }

    async fn perform_update(
        &mut self,
        key: &DraftKey,
        status: AttendanceStatus,
        snapshot: Option<AttendanceDraft>,
    ) -> UpdateOutcome {
        // Optimistic write, visible to the UI immediately.
        self.drafts.entry(key.clone()).or_default().set_status(status);

        let (jadwal_id, guru_id) = match self.resolve_target(key) {
            Ok(target) => target,
            Err(message) => {
                self.restore(key, snapshot);
                self.notify(NoticeKind::Error, message);
                return UpdateOutcome::Rejected;
            }
        };

        let update = AttendanceUpdate {
            jadwal_id,
            guru_id,
            status,
            note: self
                .drafts
                .get(key)
                .map(|d| d.note.clone())
                .unwrap_or_default(),
            tanggal: self.view.active_date(self.today),
        };

        match self.api.submit_attendance(&update).await {
            Ok(()) => {
                // Tolerate server-side eventual visibility before rereading.
                tokio::time::sleep(self.refresh_delay).await;
                match self.load().await {
                    Ok(()) => {
                        self.notify(NoticeKind::Success, "Absensi tersimpan");
                    }
                    Err(err) => {
                        tracing::warn!(key = %key, error = %err, "refresh after update failed");
                        self.notify(NoticeKind::Warning, err.user_message());
                    }
                }
                tracing::info!(key = %key, status = status.as_str(), "attendance committed");
                UpdateOutcome::Committed
            }
            Err(err) => {
                self.restore(key, snapshot);
                tracing::warn!(key = %key, error = %err, "attendance update rolled back");
                self.notify(NoticeKind::Error, err.user_message());
                UpdateOutcome::RolledBack
            }
        }
    }

    /// Resolve the effective (jadwal_id, guru_id) pair for a key.
    ///
    /// Composite keys carry both ids. Bare keys are valid only for
    /// genuinely single-teacher entries; the teacher id comes from the
    /// entry, falling back to one already held by the draft. When
    /// neither source has one, the update is refused rather than
    /// submitted with a zero id.
    fn resolve_target(&self, key: &DraftKey) -> Result<(i64, i64), String> {
        match key {
            DraftKey::ScheduleTeacher { jadwal_id, guru_id } => Ok((*jadwal_id, *guru_id)),
            DraftKey::Schedule(jadwal_id) => {
                if let Some(entry) = self.entries.iter().find(|e| e.id == *jadwal_id) {
                    if entry.is_multi_teacher() {
                        return Err("Pilih guru yang dimaksud untuk jadwal ini".to_string());
                    }
                    if let Some(teacher) = entry.teachers.first() {
                        return Ok((*jadwal_id, teacher.guru_id));
                    }
                }
                match self.drafts.get(key).and_then(|d| d.guru_id) {
                    Some(guru_id) => Ok((*jadwal_id, guru_id)),
                    None => Err("Data guru untuk jadwal ini tidak tersedia".to_string()),
                }
            }
        }
    }

    fn restore(&mut self, key: &DraftKey, snapshot: Option<AttendanceDraft>) {
        match snapshot {
            Some(draft) => {
                self.drafts.insert(key.clone(), draft);
            }
            None => {
                self.drafts.remove(key);
            }
        }
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notices.push_back(Notice {
            kind,
            message: message.into(),
        });
    }
}

// Load failures bubble to the embedding view as full-page error states;
// everything inside update_status is consumed locally.
impl From<ClientError> for Notice {
    fn from(err: ClientError) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: err.user_message(),
        }
    }
}
