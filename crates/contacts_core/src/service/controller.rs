//! Contact mutation controller.
//!
//! # Responsibility
//! - Be the only writer to the contact store.
//! - Apply add / favorite / delete / undo and emit one notification per
//!   successful mutation.
//! - Drive the load delay and notification expiry from a `Clock`.
//!
//! # Invariants
//! - At most one pending deletion; a new delete discards the older one.
//! - Pending deletion is non-empty only while a `Deletable` notification
//!   is showing. Anything that ends that notification closes the window.
//! - After `teardown`, the startup snapshot never reaches the store.
//! - Due timers are applied before every mutation, so an elapsed undo
//!   window can't be used late.

use crate::config::{ConfigError, ControllerConfig};
use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use crate::notify::coordinator::{Notification, NotificationCoordinator, NotificationKind};
use crate::repo::contact_repo::{ContactRepository, MemoryContactRepository, StoreError};
use crate::search::query::{visible_for, SearchQuery};
use crate::service::insights::{compute_insights, ContactInsights, EmptyState, ListSummary};
use crate::source::snapshot::{ContactSource, SourceError};
use crate::timer::{Clock, DeadlineTimer, SystemClock};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Controller-level error.
#[derive(Debug)]
pub enum ControllerError {
    /// Add input failed per-field validation.
    Validation(ContactValidationError),
    /// Store rejected an insert.
    Store(StoreError),
    /// Startup snapshot could not be fetched.
    Source(SourceError),
    /// Invalid timing configuration.
    Config(ConfigError),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Source(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Source(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ContactValidationError> for ControllerError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ControllerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<SourceError> for ControllerError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<ConfigError> for ControllerError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

/// Startup load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Cancelled,
}

/// Effects applied by one [`ContactController::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Number of snapshot contacts inserted, when the load fired.
    pub loaded: Option<usize>,
    /// Notification that expired during this tick.
    pub expired: Option<Notification>,
}

/// Owned contact-list state: store, query, pending deletion, notifications.
pub struct ContactController<R: ContactRepository = MemoryContactRepository, C: Clock = SystemClock>
{
    repo: R,
    clock: C,
    query: SearchQuery,
    pending_deletion: Option<Contact>,
    notifications: NotificationCoordinator,
    load_state: LoadState,
    load_timer: DeadlineTimer,
    pending_snapshot: Option<Vec<Contact>>,
}

impl ContactController {
    /// Creates a controller over an empty in-memory store and the system clock.
    pub fn new(
        config: ControllerConfig,
        source: &impl ContactSource,
    ) -> Result<Self, ControllerError> {
        Self::with_parts(MemoryContactRepository::new(), SystemClock, config, source)
    }
}

impl<R: ContactRepository, C: Clock> ContactController<R, C> {
    /// Creates a controller and schedules the startup snapshot.
    ///
    /// The snapshot is fetched now and lands in the store on the first
    /// `tick` at or after `config.load_delay()`. A zero delay loads
    /// before returning.
    ///
    /// # Errors
    /// - Returns `Config` when `config` is invalid.
    /// - Returns `Source` when the snapshot cannot be fetched.
    pub fn with_parts(
        mut repo: R,
        clock: C,
        config: ControllerConfig,
        source: &impl ContactSource,
    ) -> Result<Self, ControllerError> {
        config.validate()?;
        let snapshot = source.fetch()?;
        if let Some(max_id) = snapshot.iter().map(|contact| contact.id).max() {
            repo.reserve_ids_through(max_id);
        }

        info!(
            "event=controller_init module=controller status=ok snapshot={} load_delay_ms={} ttl_ms={}",
            snapshot.len(),
            config.load_delay_ms,
            config.notification_ttl_ms
        );

        let mut controller = Self {
            repo,
            notifications: NotificationCoordinator::new(config.notification_ttl()),
            query: SearchQuery::default(),
            pending_deletion: None,
            load_state: LoadState::Pending,
            load_timer: DeadlineTimer::new(),
            pending_snapshot: Some(snapshot),
            clock,
        };

        if config.load_delay_ms == 0 {
            controller.finish_load();
        } else {
            let deadline = controller.clock.now() + config.load_delay();
            controller.load_timer.arm(deadline);
        }

        Ok(controller)
    }

    /// Applies due timers: the startup load, then notification expiry.
    pub fn tick(&mut self) -> TickOutcome {
        let now = self.clock.now();
        let mut outcome = TickOutcome::default();

        if self.load_timer.fire_due(now).is_some() {
            outcome.loaded = Some(self.finish_load());
        }

        if let Some(expired) = self.notifications.poll_expired(now) {
            debug!(
                "event=notification_expired module=controller seq={} undo={}",
                expired.seq,
                expired.offers_undo()
            );
            if expired.offers_undo() {
                self.close_undo_window("expired");
            }
            outcome.expired = Some(expired);
        }

        outcome
    }

    /// Cancels the pending load and any live notification.
    ///
    /// Safe to call more than once.
    pub fn teardown(&mut self) {
        let cancelled_load = self.load_timer.cancel();
        self.pending_snapshot = None;
        if self.load_state == LoadState::Pending {
            self.load_state = LoadState::Cancelled;
        }
        self.notifications.dismiss();
        self.close_undo_window("teardown");
        info!(
            "event=controller_teardown module=controller status=ok cancelled_load={}",
            cancelled_load
        );
    }

    /// Validates and adds a new contact.
    ///
    /// # Errors
    /// - Returns `Validation` keyed per field; the store is untouched.
    /// - Returns `Store` if the store rejects the insert.
    pub fn add(&mut self, draft: &ContactDraft) -> Result<ContactId, ControllerError> {
        self.tick();
        let new_contact = draft.validate().map_err(|err| {
            debug!(
                "event=contact_add module=controller status=rejected fields={:?}",
                err.fields()
            );
            err
        })?;

        let name = new_contact.name.clone();
        let id = self.repo.add(new_contact)?;
        info!("event=contact_add module=controller status=ok id={id}");
        self.notify(format!("{name} added successfully!"), NotificationKind::Info);
        Ok(id)
    }

    /// Flips the favorite flag and returns the new value.
    ///
    /// Absent ids are a silent no-op.
    pub fn toggle_favorite(&mut self, id: ContactId) -> Option<bool> {
        self.tick();
        let Some(current) = self.repo.get(id).map(|contact| contact.is_favorite) else {
            debug!("event=contact_favorite module=controller status=not_found id={id}");
            return None;
        };

        let (name, favorite) = {
            let updated = self.repo.set_favorite(id, !current)?;
            (updated.name.clone(), updated.is_favorite)
        };
        info!("event=contact_favorite module=controller status=ok id={id} favorite={favorite}");

        let action = if favorite { "added to" } else { "removed from" };
        self.notify(format!("{name} {action} favorites"), NotificationKind::Info);
        Some(favorite)
    }

    /// Deletes a contact and holds it for undo.
    ///
    /// Returns `false` (no notification) when the id is absent.
    pub fn delete(&mut self, id: ContactId) -> bool {
        self.tick();
        let Some(contact) = self.repo.remove(id) else {
            debug!("event=contact_delete module=controller status=not_found id={id}");
            return false;
        };

        info!("event=contact_delete module=controller status=ok id={id}");
        // Showing first closes the previous undo window, if any.
        self.notify(format!("{} deleted", contact.name), NotificationKind::Deletable);
        self.pending_deletion = Some(contact);
        true
    }

    /// Restores the pending deletion exactly as it was deleted.
    ///
    /// Returns the restored id, or `None` when nothing is pending.
    pub fn undo_delete(&mut self) -> Option<ContactId> {
        self.tick();
        let contact = self.pending_deletion.clone()?;
        let id = contact.id;
        let name = contact.name.clone();

        // A failed restore leaves the pending deletion and its notification live.
        if let Err(err) = self.repo.restore(contact) {
            error!("event=contact_undo module=controller status=error id={id} error={err}");
            return None;
        }
        self.pending_deletion = None;
        self.notifications.dismiss();

        info!("event=contact_undo module=controller status=ok id={id}");
        self.notify(format!("{name} restored!"), NotificationKind::Info);
        Some(id)
    }

    /// Closes the active notification early.
    pub fn dismiss_notification(&mut self) -> Option<Notification> {
        let dismissed = self.notifications.dismiss()?;
        if dismissed.offers_undo() {
            self.close_undo_window("dismissed");
        }
        Some(dismissed)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query = SearchQuery::new(term);
    }

    pub fn search_term(&self) -> &str {
        self.query.term()
    }

    /// Filtered, favorites-first, name-ordered projection of the store.
    pub fn visible(&self) -> Vec<&Contact> {
        visible_for(self.repo.all(), &self.query)
    }

    /// All stored contacts in insertion order.
    pub fn contacts(&self) -> &[Contact] {
        self.repo.all()
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.repo.get(id)
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Pending
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn favorite_count(&self) -> usize {
        self.repo.favorite_count()
    }

    pub fn summary(&self) -> ListSummary {
        ListSummary {
            showing: self.visible().len(),
            total: self.repo.len(),
            favorites: self.repo.favorite_count(),
        }
    }

    pub fn insights(&self) -> ContactInsights {
        compute_insights(self.repo.all())
    }

    /// Why nothing is visible; `None` while loading or when the list has rows.
    ///
    /// Any non-empty term, even whitespace, reports `NoMatches`.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.is_loading() || !self.visible().is_empty() {
            return None;
        }
        if self.query.term().is_empty() {
            Some(EmptyState::NoContacts)
        } else {
            Some(EmptyState::NoMatches(self.query.term().to_string()))
        }
    }

    /// Active notification as of the last applied tick.
    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.active()
    }

    pub fn pending_deletion(&self) -> Option<&Contact> {
        self.pending_deletion.as_ref()
    }

    /// Whether the undo affordance should be offered right now.
    pub fn can_undo(&self) -> bool {
        self.pending_deletion.is_some()
            && self
                .notifications
                .active()
                .is_some_and(Notification::offers_undo)
    }

    fn finish_load(&mut self) -> usize {
        let snapshot = self.pending_snapshot.take().unwrap_or_default();
        let inserted = self.repo.extend_snapshot(snapshot);
        self.load_state = LoadState::Loaded;
        info!("event=contacts_loaded module=controller status=ok count={inserted}");
        inserted
    }

    fn notify(&mut self, message: String, kind: NotificationKind) {
        let now = self.clock.now();
        if let Some(preempted) = self.notifications.show(message, kind, now) {
            if preempted.offers_undo() {
                self.close_undo_window("preempted");
            }
        }
    }

    fn close_undo_window(&mut self, reason: &str) {
        if let Some(contact) = self.pending_deletion.take() {
            info!(
                "event=undo_window_closed module=controller reason={} id={}",
                reason, contact.id
            );
        }
    }
}
