//! User-facing notifications tied to mutations.

pub mod coordinator;
