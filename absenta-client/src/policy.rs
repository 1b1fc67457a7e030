//! Edit-window policy
//!
//! The dashboards show either today's live schedule or a past date's
//! editable schedule. The state is an explicit tagged union with one
//! transition function, so "editing with no date" is unrepresentable.

use chrono::{Days, NaiveDate};
use shared::models::Role;

/// Bounded lookback for retroactive attendance edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditWindow {
    lookback_days: u32,
}

impl EditWindow {
    /// Window for a role (7 days for student representatives, 30 for
    /// teachers and admins)
    pub fn for_role(role: Role) -> Self {
        Self {
            lookback_days: role.edit_lookback_days(),
        }
    }

    /// Earliest selectable date
    pub fn min_date(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(self.lookback_days as u64))
            .unwrap_or(today)
    }

    /// Latest selectable date (today; future dates are never editable)
    pub fn max_date(&self, today: NaiveDate) -> NaiveDate {
        today
    }

    /// Whether a date falls inside the window
    pub fn is_selectable(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= self.min_date(today) && date <= self.max_date(today)
    }
}

/// Which schedule the view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewWindow {
    /// Today's live schedule
    Live,
    /// A past (or today's) date opened for retroactive editing
    Editing { date: NaiveDate },
}

impl ViewWindow {
    /// The date attendance submissions target in this state
    pub fn active_date(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Live => today,
            Self::Editing { date } => *date,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }
}

/// View-state events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    EditModeOn,
    EditModeOff,
    DateSelected(NaiveDate),
}

/// Result of a view transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: ViewWindow,
    /// Whether the schedule list must be reloaded for the new state
    pub reload: bool,
}

impl ViewWindow {
    /// Apply an event. Returns `None` when the event is not legal in the
    /// current state (selecting a date while live, or a date outside the
    /// window); the state is then left unchanged by the caller.
    pub fn apply(
        &self,
        event: ViewEvent,
        window: &EditWindow,
        today: NaiveDate,
    ) -> Option<Transition> {
        match (self, event) {
            (Self::Live, ViewEvent::EditModeOn) => Some(Transition {
                next: Self::Editing { date: today },
                reload: true,
            }),
            (Self::Editing { .. }, ViewEvent::EditModeOff) => Some(Transition {
                next: Self::Live,
                reload: true,
            }),
            (Self::Editing { date }, ViewEvent::DateSelected(selected)) => {
                if !window.is_selectable(selected, today) {
                    return None;
                }
                Some(Transition {
                    next: Self::Editing { date: selected },
                    // Re-selecting the already shown date is a no-op
                    reload: selected != *date,
                })
            }
            _ => None,
        }
    }
}
