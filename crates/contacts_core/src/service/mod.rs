//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, query and notification state into contact-list
//!   use cases.
//! - Keep presentation layers decoupled from state-machine details.

pub mod controller;
pub mod insights;
