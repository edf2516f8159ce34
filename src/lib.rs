//! Meeting controls and activity streams of Medea widgets.
//!
//! Widgets talk to a backend through [`adapter`] traits, and turn the
//! backend state into display records: [`control`]s of a meeting and the
//! [`activity`] stream of a room.

#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod activity;
pub mod adapter;
pub mod conf;
pub mod control;
pub mod log;
