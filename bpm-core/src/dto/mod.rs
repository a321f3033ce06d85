//! Data Transfer Objects
//!
//! Request bodies sent to the BPM backend.

pub mod log;
