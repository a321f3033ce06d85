//! Core domain types
//!
//! This module contains the entities exchanged with the BPM backend. Records
//! are deliberately loose (the backend owns their schema); only the fields the
//! list pipeline depends on are typed.

pub mod install;
pub mod log;
pub mod record;
pub mod resource;
