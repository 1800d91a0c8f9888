//! Transient notification state machine.
//!
//! # Responsibility
//! - Hold at most one active notification with an expiry deadline.
//! - Replace, expire and dismiss notifications.
//!
//! # Invariants
//! - State is `Idle` or `Showing(notification)`, never both.
//! - Showing a new notification cancels the previous deadline.
//! - A replaced notification can never expire the one that replaced it.

use crate::timer::DeadlineTimer;
use std::time::{Duration, Instant};

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Plain status message.
    Info,
    /// Deletion message that offers undo while showing.
    Deletable,
}

/// One transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Increases for every shown notification.
    pub seq: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub expires_at: Instant,
}

impl Notification {
    pub fn offers_undo(&self) -> bool {
        self.kind == NotificationKind::Deletable
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NotificationState {
    Idle,
    Showing(Notification),
}

/// Owns the active notification and its expiry timer.
#[derive(Debug)]
pub struct NotificationCoordinator {
    state: NotificationState,
    timer: DeadlineTimer,
    ttl: Duration,
    next_seq: u64,
}

impl NotificationCoordinator {
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: NotificationState::Idle,
            timer: DeadlineTimer::new(),
            ttl,
            next_seq: 1,
        }
    }

    pub fn active(&self) -> Option<&Notification> {
        match &self.state {
            NotificationState::Idle => None,
            NotificationState::Showing(notification) => Some(notification),
        }
    }

    /// Shows a new notification expiring at `now + ttl`.
    ///
    /// Returns the notification it preempted, if one was showing.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: Instant,
    ) -> Option<Notification> {
        let expires_at = now + self.ttl;
        self.timer.arm(expires_at);

        let notification = Notification {
            seq: self.next_seq,
            message: message.into(),
            kind,
            expires_at,
        };
        self.next_seq += 1;

        match std::mem::replace(&mut self.state, NotificationState::Showing(notification)) {
            NotificationState::Idle => None,
            NotificationState::Showing(previous) => Some(previous),
        }
    }

    /// Moves to `Idle` if the live deadline elapsed at `now`.
    ///
    /// Returns the expired notification. The timer only ever holds the
    /// deadline of the showing notification, so a fired deadline always
    /// belongs to it.
    pub fn poll_expired(&mut self, now: Instant) -> Option<Notification> {
        self.timer.fire_due(now)?;
        match std::mem::replace(&mut self.state, NotificationState::Idle) {
            NotificationState::Idle => None,
            NotificationState::Showing(expired) => Some(expired),
        }
    }

    /// Moves to `Idle` immediately and cancels the deadline.
    pub fn dismiss(&mut self) -> Option<Notification> {
        self.timer.cancel();
        match std::mem::replace(&mut self.state, NotificationState::Idle) {
            NotificationState::Idle => None,
            NotificationState::Showing(previous) => Some(previous),
        }
    }
}
