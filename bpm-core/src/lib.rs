//! BPM Core
//!
//! Core types and list-processing engines for the BPM resource client.
//!
//! This crate contains:
//! - Domain types: records, resource kinds, audit log entries, install stages
//! - DTOs: request bodies sent to the BPM backend
//! - Query engines: free-text/view narrowing, filters, sorting, pagination

pub mod domain;
pub mod dto;
pub mod error;
pub mod query;

pub use error::QueryError;
