//! Contact store abstractions and in-memory implementation.
//!
//! # Responsibility
//! - Define the data access contract the controller writes through.
//! - Keep id assignment and insertion order inside the store.
//!
//! # Invariants
//! - Only the mutation controller writes to a store it owns.

pub mod contact_repo;
