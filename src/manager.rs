// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The [`Manager`] owns two queues: the bounded active list (backed by an
//! observable [`Store`], so the rendering layer can subscribe to it) and a
//! FIFO pending queue for notifications that arrive while every slot is
//! taken. Each active notification with a finite expiry has a
//! [`PausableTimer`]; expiry is delivered by the host pumping
//! [`Manager::tick`] periodically (every 100-500ms is plenty), or
//! [`Manager::tick_at`] with synthetic instants for deterministic tests.
//!
//! Lifecycle per notification id:
//!
//! ```text
//! add ── slot free ──> Active ── expiry/close ──┬─ static ──> Inactive ── unmount ──> gone
//!   │                                           └─ else ────> gone (head of pending promoted)
//!   └── at limit ───> pending ── slot freed ──> Active
//!                           └──── remove ─────> gone
//! ```
//!
//! All operations are total: unknown ids are benign no-ops, never errors.
//! A stale expiry cannot fire - evicting a notification drops its timer,
//! and `tick` only acts on ids that are still tracked.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use crate::config::{ConfigPatch, ManagerConfig};
use crate::id::IdGenerator;
use crate::notification::{ActiveNotification, Expiry, Notification, NotificationId, Severity, Status};
use crate::store::{Store, SubscriptionId};
use crate::timer::PausableTimer;

/// Prefix for generated notification ids (`toast-1`, `toast-2`, ...).
const ID_PREFIX: &str = "toast";

/// A notification waiting for an active slot. Expiry and static-mode
/// behavior are resolved at `add` time, so later reconfiguration does not
/// affect records already in flight. Pending notifications have no timer.
#[derive(Debug, Clone)]
struct PendingNotification<M> {
    id: NotificationId,
    severity: Severity,
    message: M,
    expiry: Expiry,
    static_mode: bool,
}

/// Tracks a bounded set of active notifications plus a FIFO overflow
/// queue, and notifies subscribers on every state transition.
pub struct Manager<M> {
    /// Active notifications, observable by the rendering layer. Every
    /// mutation builds a fresh `Vec` so subscribers see immutable
    /// snapshots.
    active: Store<Vec<ActiveNotification<M>>>,
    /// Overflow queue, oldest first.
    pending: VecDeque<PendingNotification<M>>,
    /// Expiry timers, keyed by id. An entry exists iff the id is active
    /// and its expiry is finite.
    timers: HashMap<NotificationId, PausableTimer>,
    config: ManagerConfig,
    ids: IdGenerator,
}

impl<M: Clone> Manager<M> {
    /// Creates a manager with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ManagerConfig::default())
    }

    /// Creates a manager with the given configuration.
    #[must_use]
    pub fn with_config(config: ManagerConfig) -> Self {
        Self {
            active: Store::new(Vec::new()),
            pending: VecDeque::new(),
            timers: HashMap::new(),
            config,
            ids: IdGenerator::new(),
        }
    }

    /// Returns the current active-notification snapshot.
    pub fn notifications(&self) -> &[ActiveNotification<M>] {
        self.active.value()
    }

    /// Returns the number of active notifications (including `Inactive`
    /// records retained in static mode - they still hold a slot).
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.value().len()
    }

    /// Returns the number of pending notifications.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns whether any notification is tracked, active or pending.
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.active.value().is_empty() || !self.pending.is_empty()
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Subscribes to active-list changes. The listener runs synchronously
    /// on every activation, deactivation, eviction, promotion, and
    /// pause/resume flip - and never for no-op calls.
    pub fn subscribe(
        &mut self,
        mut listener: impl FnMut(&[ActiveNotification<M>]) + 'static,
    ) -> SubscriptionId
    where
        M: 'static,
    {
        self.active
            .subscribe(move |notifications: &Vec<ActiveNotification<M>>| {
                listener(notifications.as_slice());
            })
    }

    /// Removes a subscriber. Unknown ids are a safe no-op.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.active.unsubscribe(id);
    }

    /// Adds a notification, activating it immediately if a slot is free
    /// and queueing it otherwise. Returns the generated id.
    pub fn add(&mut self, notification: Notification<M>) -> NotificationId {
        self.add_at(notification, Instant::now())
    }

    /// [`Manager::add`] with an explicit admission instant.
    pub fn add_at(&mut self, notification: Notification<M>, now: Instant) -> NotificationId {
        let id = NotificationId::new(self.ids.generate(ID_PREFIX));
        let (severity, message, expiry_override) = notification.into_parts();
        let expiry = expiry_override.unwrap_or(self.config.duration);

        if expiry == Expiry::Finite(Duration::ZERO) && cfg!(debug_assertions) {
            log::warn!("notification {id} has a zero expiry and will expire on the next tick");
        }

        let record = PendingNotification {
            id: id.clone(),
            severity,
            message,
            expiry,
            static_mode: self.config.static_mode,
        };

        if self.active.value().len() < self.config.limit {
            self.activate(record, now);
        } else {
            log::debug!(
                "notification {id} queued behind {} others (limit {})",
                self.pending.len(),
                self.config.limit
            );
            self.pending.push_back(record);
        }

        id
    }

    /// Polls expiry timers and winds down every notification whose
    /// countdown has elapsed by `now`.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// [`Manager::tick`] at an explicit instant.
    pub fn tick_at(&mut self, now: Instant) {
        let expired: Vec<NotificationId> = self
            .active
            .value()
            .iter()
            .filter(|n| {
                self.timers
                    .get(n.id())
                    .is_some_and(|timer| timer.is_expired(now))
            })
            .map(|n| n.id().clone())
            .collect();

        for id in expired {
            // An earlier wind-down in this loop may already have dropped
            // this id (e.g. via clear semantics); expired timers without
            // a tracked notification are stale and must not act.
            if self.timers.contains_key(&id) {
                self.deactivate(&id, now);
            }
        }
    }

    /// Caller-initiated termination. Active ids go through the same
    /// wind-down as natural expiry; pending ids are deleted from the
    /// queue outright; unknown ids are a silent no-op.
    pub fn remove(&mut self, id: &NotificationId) {
        self.remove_at(id, Instant::now());
    }

    /// [`Manager::remove`] at an explicit instant.
    pub fn remove_at(&mut self, id: &NotificationId, now: Instant) {
        if self.is_active(id) {
            self.deactivate(id, now);
        } else {
            // Pending removal is pure deletion: no promotion and no
            // subscriber notification, since the active list is untouched.
            self.pending.retain(|record| record.id != *id);
        }
    }

    /// Closes a notification early, behaving exactly like natural expiry.
    /// This is the record-level `close` surfaced as a manager method.
    pub fn close(&mut self, id: &NotificationId) {
        self.remove(id);
    }

    /// [`Manager::close`] at an explicit instant.
    pub fn close_at(&mut self, id: &NotificationId, now: Instant) {
        self.remove_at(id, now);
    }

    /// Evicts an active id unconditionally, ignoring its static-mode
    /// behavior, then promotes the head of the pending queue. Pending and
    /// unknown ids are ignored. This is the only way to free the slot of
    /// a static-mode `Inactive` record.
    pub fn unmount(&mut self, id: &NotificationId) {
        self.unmount_at(id, Instant::now());
    }

    /// [`Manager::unmount`] at an explicit instant.
    pub fn unmount_at(&mut self, id: &NotificationId, now: Instant) {
        if self.is_active(id) {
            self.evict_and_promote(id, now);
        }
    }

    /// Pauses the id's expiry timer and returns the time remaining.
    ///
    /// Idempotent: pausing an already-paused notification returns the
    /// same remaining value without notifying subscribers again. Unknown,
    /// pending, and unbounded ids have no timer; those return zero.
    pub fn pause(&mut self, id: &NotificationId) -> Duration {
        self.pause_at(id, Instant::now())
    }

    /// [`Manager::pause`] at an explicit instant.
    pub fn pause_at(&mut self, id: &NotificationId, now: Instant) -> Duration {
        let Some(timer) = self.timers.get_mut(id) else {
            return Duration::ZERO;
        };

        let already_paused = timer.is_paused();
        let remaining = timer.pause(now);

        if !already_paused {
            let snapshot = Self::with_paused_flag(self.active.value(), id, true);
            self.active.set_value(snapshot);
        }

        remaining
    }

    /// Resumes a paused expiry timer from its frozen remaining time.
    /// No-op for running timers and for ids without one.
    pub fn resume(&mut self, id: &NotificationId) {
        self.resume_at(id, Instant::now());
    }

    /// [`Manager::resume`] at an explicit instant.
    pub fn resume_at(&mut self, id: &NotificationId, now: Instant) {
        let Some(timer) = self.timers.get_mut(id) else {
            return;
        };
        if !timer.is_paused() {
            return;
        }

        timer.resume(now);
        let snapshot = Self::with_paused_flag(self.active.value(), id, false);
        self.active.set_value(snapshot);
    }

    /// Empties the pending queue. Active notifications are untouched.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Empties both queues and drops every timer, so no stale expiry can
    /// fire afterwards.
    pub fn clear_all(&mut self) {
        self.pending.clear();
        self.timers.clear();
        if !self.active.value().is_empty() {
            self.active.set_value(Vec::new());
        }
    }

    /// Merges `patch` into the configuration. Applies to notifications
    /// added afterwards; in-flight records keep the expiry and
    /// static-mode behavior resolved at their admission.
    pub fn configure(&mut self, patch: ConfigPatch) {
        self.config.apply(&patch);
    }

    fn is_active(&self, id: &NotificationId) -> bool {
        self.active.value().iter().any(|n| n.id() == id)
    }

    /// Activation step shared by `add` and promotion: start the expiry
    /// timer (finite expiry only) and append to the active snapshot.
    fn activate(&mut self, record: PendingNotification<M>, now: Instant) {
        match record.expiry {
            Expiry::Finite(duration) => {
                self.timers
                    .insert(record.id.clone(), PausableTimer::start(duration, now));
            }
            Expiry::Unbounded => {
                log::debug!(
                    "notification {} is unbounded and will stay active until closed",
                    record.id
                );
            }
        }

        let mut snapshot = self.active.value().clone();
        snapshot.push(ActiveNotification::new(
            record.id,
            record.severity,
            record.message,
            record.expiry,
            record.static_mode,
        ));
        self.active.set_value(snapshot);
    }

    /// Wind-down for an active id, from expiry or an explicit remove.
    /// Static records flip to `Inactive` and keep their slot; everything
    /// else is evicted, freeing the slot for the next pending record.
    fn deactivate(&mut self, id: &NotificationId, now: Instant) {
        self.timers.remove(id);

        let Some(is_static) = self
            .active
            .value()
            .iter()
            .find(|n| n.id() == id)
            .map(ActiveNotification::is_static)
        else {
            return;
        };

        if is_static {
            let snapshot = self
                .active
                .value()
                .iter()
                .cloned()
                .map(|mut n| {
                    if n.id() == id {
                        n.set_status(Status::Inactive);
                        n.set_paused(false);
                    }
                    n
                })
                .collect();
            self.active.set_value(snapshot);
        } else {
            self.evict_and_promote(id, now);
        }
    }

    /// Drops `id` from the active list, then admits the oldest pending
    /// record if the (current) limit allows. Eviction and promotion are
    /// separate snapshots, so subscribers observe both transitions.
    fn evict_and_promote(&mut self, id: &NotificationId, now: Instant) {
        self.timers.remove(id);

        let mut snapshot = self.active.value().clone();
        let before = snapshot.len();
        snapshot.retain(|n| n.id() != id);
        if snapshot.len() == before {
            return;
        }

        let has_room = snapshot.len() < self.config.limit;
        self.active.set_value(snapshot);
        log::debug!("notification {id} evicted");

        if has_room {
            if let Some(next) = self.pending.pop_front() {
                log::debug!("notification {} promoted from pending", next.id);
                self.activate(next, now);
            }
        }
    }

    fn with_paused_flag(
        current: &[ActiveNotification<M>],
        id: &NotificationId,
        paused: bool,
    ) -> Vec<ActiveNotification<M>> {
        current
            .iter()
            .cloned()
            .map(|mut n| {
                if n.id() == id {
                    n.set_paused(paused);
                }
                n
            })
            .collect()
    }
}

impl<M: Clone> Default for Manager<M> {
    fn default() -> Self {
        Self::new()
    }
}
