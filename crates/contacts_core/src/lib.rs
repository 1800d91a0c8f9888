//! Core state management for the contact list.
//! This crate is the single source of truth for contact-list invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod search;
pub mod service;
pub mod source;
pub mod timer;

pub use config::{ConfigError, ControllerConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{
    Contact, ContactDraft, ContactField, ContactId, ContactValidationError, FieldError,
    FieldErrorReason, NewContact,
};
pub use notify::coordinator::{Notification, NotificationCoordinator, NotificationKind};
pub use repo::contact_repo::{ContactRepository, MemoryContactRepository, StoreError, StoreResult};
pub use search::query::{compare_names, visible, SearchQuery};
pub use service::controller::{ContactController, ControllerError, LoadState, TickOutcome};
pub use service::insights::{compute_insights, ContactInsights, EmptyState, ListSummary};
pub use source::snapshot::{
    ContactSource, JsonSnapshotSource, SourceError, SourceResult, StaticSource,
};
pub use timer::{Clock, DeadlineTimer, ManualClock, SystemClock, TimerToken};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
