//! Appeal review workflow (teacher side)
//!
//! A pending appeal can be approved or rejected once; decided records
//! are immutable. The list is always refetched after a decision rather
//! than patched locally.

use crate::api::AppealApi;
use crate::coordinator::{Notice, NoticeKind};
use crate::ClientResult;
use shared::models::{AppealDecision, AppealRecord};
use shared::request::ListQuery;
use std::collections::VecDeque;
use validator::Validate;

/// Result of an [`AppealReviewer::decide`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// Decision stored and list refreshed
    Committed,
    /// Another decision is still in flight; call ignored
    InFlight,
    /// Blocked client-side (record not pending, empty note); no network
    /// call was made
    Rejected,
    /// Server or network failure; record unchanged
    Failed,
}

/// Client-side appeal review state for the teacher dashboard
pub struct AppealReviewer<A: AppealApi> {
    api: A,
    query: ListQuery,
    appeals: Vec<AppealRecord>,
    /// Single processing-id lock against double submission
    processing: Option<i64>,
    notices: VecDeque<Notice>,
}

impl<A: AppealApi> AppealReviewer<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            query: ListQuery::default(),
            appeals: Vec::new(),
            processing: None,
            notices: VecDeque::new(),
        }
    }

    pub fn with_query(mut self, query: ListQuery) -> Self {
        self.query = query;
        self
    }

    pub fn appeals(&self) -> &[AppealRecord] {
        &self.appeals
    }

    pub fn processing(&self) -> Option<i64> {
        self.processing
    }

    /// Drain queued notices
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Refetch the appeal list from the server
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let page = self.api.list_appeals(&self.query).await?;
        self.appeals = page.items;
        Ok(())
    }

    /// Whether the decision actions should be offered for a record
    pub fn can_decide(&self, id: i64) -> bool {
        self.processing.is_none()
            && self
                .appeals
                .iter()
                .any(|a| a.id == id && !a.status.is_decided())
    }

    /// Decide a pending appeal. The note is required and validated
    /// before any network call; the processing lock is released on
    /// every exit path.
    pub async fn decide(
        &mut self,
        id: i64,
        approve: bool,
        note: impl Into<String>,
    ) -> DecisionOutcome {
        if self.processing.is_some() {
            tracing::debug!(id, "decision already in flight, ignoring");
            return DecisionOutcome::InFlight;
        }

        let status = match self.appeals.iter().find(|a| a.id == id) {
            Some(record) => record.status,
            None => {
                self.notify(NoticeKind::Error, "Banding tidak ditemukan");
                return DecisionOutcome::Rejected;
            }
        };
        if status.is_decided() {
            self.notify(NoticeKind::Error, "Banding sudah diputuskan");
            return DecisionOutcome::Rejected;
        }

        let decision = AppealDecision {
            approve,
            note: note.into(),
        };
        if decision.validate().is_err() {
            self.notify(NoticeKind::Error, "Catatan keputusan wajib diisi");
            return DecisionOutcome::Rejected;
        }

        self.processing = Some(id);
        let outcome = match self.api.decide_appeal(id, &decision).await {
            Ok(_) => {
                if let Err(err) = self.refresh().await {
                    tracing::warn!(id, error = %err, "refresh after decision failed");
                    self.notify(NoticeKind::Warning, err.user_message());
                } else {
                    let message = if approve {
                        "Banding disetujui"
                    } else {
                        "Banding ditolak"
                    };
                    self.notify(NoticeKind::Success, message);
                }
                DecisionOutcome::Committed
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "appeal decision failed");
                let message = err.user_message();
                self.notify(NoticeKind::Error, message);
                DecisionOutcome::Failed
            }
        };
        self.processing = None;
        outcome
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notices.push_back(Notice {
            kind,
            message: message.into(),
        });
    }
}
