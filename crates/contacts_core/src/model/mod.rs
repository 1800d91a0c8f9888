//! Contact domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own the field validation rules shared by add and snapshot paths.
//!
//! # Invariants
//! - Every contact is identified by a session-unique `ContactId`.

pub mod contact;
