use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::AppError;

/// Lifecycle of an event: authored as a draft, approved in review, then published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventState {
    Draft,
    Review,
    Published,
}

/// A single stepwise move along the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Forward,
    Backward,
}

#[derive(Debug, Error)]
#[error("Unknown event state: {0}")]
pub struct UnknownEventState(pub String);

impl EventState {
    pub const ALL: [EventState; 3] = [EventState::Draft, EventState::Review, EventState::Published];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventState::Draft => "DRAFT",
            EventState::Review => "REVIEW",
            EventState::Published => "PUBLISHED",
        }
    }

    /// Transition table. Only adjacent states are reachable.
    pub fn next(self, transition: Transition) -> Option<EventState> {
        match (self, transition) {
            (EventState::Draft, Transition::Forward) => Some(EventState::Review),
            (EventState::Review, Transition::Forward) => Some(EventState::Published),
            (EventState::Published, Transition::Forward) => None,
            (EventState::Published, Transition::Backward) => Some(EventState::Review),
            (EventState::Review, Transition::Backward) => Some(EventState::Draft),
            (EventState::Draft, Transition::Backward) => None,
        }
    }

    pub fn apply(self, transition: Transition) -> Result<EventState, AppError> {
        self.next(transition)
            .ok_or(AppError::InvalidStateTransition { from: self, transition })
    }

    pub fn can_edit(&self) -> bool {
        *self == EventState::Draft
    }

    pub fn ensure_editable(&self) -> Result<(), AppError> {
        if self.can_edit() {
            Ok(())
        } else {
            Err(AppError::EditNotAllowed(*self))
        }
    }

    /// Events awaiting approval are closed to consumers; drafts and published events take bookings.
    pub fn is_bookable(&self) -> bool {
        *self != EventState::Review
    }
}

impl fmt::Display for EventState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Forward => f.write_str("move forward"),
            Transition::Backward => f.write_str("move backwards"),
        }
    }
}

impl FromStr for EventState {
    type Err = UnknownEventState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(EventState::Draft),
            "REVIEW" => Ok(EventState::Review),
            "PUBLISHED" => Ok(EventState::Published),
            _ => Err(UnknownEventState(s.to_string())),
        }
    }
}

impl TryFrom<String> for EventState {
    type Error = UnknownEventState;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
