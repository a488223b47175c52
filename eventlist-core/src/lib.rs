//! Core types for eventlist.
//!
//! This crate provides the types shared by the eventlist client and the
//! development server:
//! - `Event`, `NewEvent`, `EventPatch` and the `EventId` newtype
//! - `config` for client and server settings
//! - `error` for the common error type

pub mod config;
pub mod error;
pub mod event;

pub use error::{EventListError, EventListResult};
pub use event::*;
