//! Event list manager.
//!
//! Layers, from the network up:
//! - [`api`]: HTTP client for the `/events` REST resource
//! - [`store`]: in-memory cache of the last-fetched events
//! - [`view`]: pure mapping from events to a view tree
//! - [`render`]: renderers applying a view tree to HTML or a terminal
//! - [`controller`]: user actions in, store calls and renders out

pub mod api;
pub mod controller;
pub mod render;
pub mod store;
pub mod view;

pub use eventlist_core as core;
