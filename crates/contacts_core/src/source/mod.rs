//! Startup data sources.
//!
//! # Responsibility
//! - Provide the read-only snapshot the controller loads after its delay.

pub mod snapshot;
