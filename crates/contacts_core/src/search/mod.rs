//! Contact search entry points.
//!
//! # Responsibility
//! - Derive the visible list from store contents and a search term.
//! - Keep filter and ordering rules inside core.

pub mod query;
