//! Event record types.
//!
//! The REST resource speaks camelCase JSON (`eventName`, `startDate`,
//! `endDate`). Dates are kept in the textual form the server stores them
//! in; nothing here validates them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EventListError;

/// Server-assigned event identifier.
///
/// Only ever produced by the server (through deserialization) or by
/// parsing external text with [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(u64);

impl EventId {
    pub fn get(self) -> u64 {
        self.0
    }

    /// The id following this one, or `None` past `u64::MAX`. Used by the
    /// server when assigning ids.
    pub fn next(self) -> Option<EventId> {
        self.0.checked_add(1).map(EventId)
    }

    /// First id handed out by an empty collection.
    pub fn first() -> EventId {
        EventId(1)
    }
}

impl FromStr for EventId {
    type Err = EventListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(EventId)
            .map_err(|_| EventListError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An event record as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

impl Event {
    /// Attach a server-assigned id to a new record.
    pub fn from_new(id: EventId, new: NewEvent) -> Self {
        Event {
            id,
            event_name: new.event_name,
            start_date: new.start_date,
            end_date: new.end_date,
        }
    }

    /// The record's fields without its id.
    pub fn to_new(&self) -> NewEvent {
        NewEvent {
            event_name: self.event_name.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} to {})",
            self.event_name, self.start_date, self.end_date
        )
    }
}

/// An event record that has not been created server-side yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

impl NewEvent {
    pub fn new(
        event_name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        NewEvent {
            event_name: event_name.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }
}

/// Fields sent with an update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.event_name.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }

    pub fn apply_to(self, event: &mut Event) {
        if let Some(name) = self.event_name {
            event.event_name = name;
        }
        if let Some(start) = self.start_date {
            event.start_date = start;
        }
        if let Some(end) = self.end_date {
            event.end_date = end;
        }
    }
}

impl From<NewEvent> for EventPatch {
    fn from(new: NewEvent) -> Self {
        EventPatch {
            event_name: Some(new.event_name),
            start_date: Some(new.start_date),
            end_date: Some(new.end_date),
        }
    }
}
