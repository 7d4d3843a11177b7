//! Tracking feed registry
//!
//! Owns every live tracking session, keyed by order id. Sessions are
//! created lazily on the first request while an order is out for
//! delivery, advanced by a per-session tick loop, and published to
//! subscribers over a broadcast channel. Sessions end when the order
//! reaches a terminal status and are swept after an idle timeout.
//!
//! # Concurrency
//!
//! Advances for the same order are serialized through the session mutex
//! (an advance is not commutative: two concurrent advances would
//! double-step). Different orders are fully independent. Fan-out is
//! best-effort: a send to a channel with no or slow receivers is
//! ignored, never awaited.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use shared::models::{DriverLocation, Order, OrderStatus, TrackingSnapshot};
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::movement::{MovementSource, SimulatedMovement};
use super::session::TrackingSession;
use super::{TrackingError, TrackingQuery};
use crate::utils::now_millis;


/// Per-order buffer of pending position updates; laggards are dropped
const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Configuration for the tracking feed
#[derive(Debug, Clone)]
pub struct TrackingConfig {
    /// Interval between automatic advance steps
    pub tick_interval: Duration,
    /// Sessions idle longer than this are evicted by the sweep
    pub idle_timeout: Duration,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(30 * 60),
        }
    }
}

type MovementFactory = Box<dyn Fn() -> Box<dyn MovementSource> + Send + Sync>;

/// Session plus movement source, guarded by one mutex so an advance is a
/// single critical section per order
struct SessionState {
    session: TrackingSession,
    movement: Box<dyn MovementSource>,
}

struct SessionEntry {
    state: Mutex<SessionState>,
    publisher: broadcast::Sender<DriverLocation>,
    cancel: CancellationToken,
}

/// Live tracking session registry
///
/// Owned by [`crate::core::ServerState`] and injected into handlers;
/// never ambient global state.
pub struct TrackingFeed {
    config: TrackingConfig,
    sessions: DashMap<String, Arc<SessionEntry>>,
    new_movement: MovementFactory,
    shutdown: CancellationToken,
}

impl std::fmt::Debug for TrackingFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingFeed")
            .field("config", &self.config)
            .field("sessions", &self.sessions.len())
            .finish()
    }
}

impl TrackingFeed {
    pub fn new(config: TrackingConfig) -> Self {
        Self::with_movement(config, || Box::new(SimulatedMovement::new()))
    }

    /// Custom movement source factory (deterministic sources in tests,
    /// a real GPS ingest in production)
    pub fn with_movement(
        config: TrackingConfig,
        factory: impl Fn() -> Box<dyn MovementSource> + Send + Sync + 'static,
    ) -> Self {
        Self {
            config,
            sessions: DashMap::new(),
            new_movement: Box::new(factory),
            shutdown: CancellationToken::new(),
        }
    }

    /// Snapshot for an order, lazily starting a session when the order is
    /// out for delivery
    pub fn snapshot_for(&self, order: &Order) -> TrackingQuery {
        if let Some(entry) = self.sessions.get(&order.id) {
            let mut state = entry.state.lock();
            state.session.touch();
            return TrackingQuery::Active(state.session.snapshot());
        }

        if order.status != OrderStatus::OutForDelivery {
            return TrackingQuery::NotTracking;
        }

        let entry = self.start_session(order);
        let state = entry.state.lock();
        TrackingQuery::Active(state.session.snapshot())
    }

    /// One manual advance step
    ///
    /// Completed sessions are a no-op and return the final recorded state.
    pub fn advance(&self, order_id: &str) -> Result<TrackingSnapshot, TrackingError> {
        let entry = self
            .sessions
            .get(order_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| TrackingError::UnknownOrder(order_id.to_string()))?;

        let snapshot = advance_entry(&entry);
        Ok(snapshot)
    }

    /// Subscribe to an order's position updates
    ///
    /// Late joiners receive only future updates; history is available via
    /// the `path` in the snapshot. Unsubscribe by dropping the handle.
    pub fn subscribe(&self, order_id: &str) -> Result<TrackingSubscription, TrackingError> {
        let entry = self
            .sessions
            .get(order_id)
            .ok_or_else(|| TrackingError::UnknownOrder(order_id.to_string()))?;

        Ok(TrackingSubscription {
            order_id: order_id.to_string(),
            receiver: entry.publisher.subscribe(),
        })
    }

    /// React to an external order-status transition
    ///
    /// Terminal statuses complete the session (its final snapshot stays
    /// readable until the idle sweep); any other move away from
    /// OUT_FOR_DELIVERY discards the session.
    pub fn on_status_change(&self, order_id: &str, status: OrderStatus) {
        if status == OrderStatus::OutForDelivery {
            return;
        }
        let Some(entry) = self.sessions.get(order_id).map(|e| e.value().clone()) else {
            return;
        };

        entry.cancel.cancel();
        if status.is_terminal() {
            entry.state.lock().session.complete();
            tracing::info!(order_id = %order_id, ?status, "Tracking session completed");
        } else {
            self.sessions.remove(order_id);
            tracing::info!(order_id = %order_id, ?status, "Tracking session discarded");
        }
    }

    /// Remove sessions idle longer than the configured timeout
    ///
    /// Returns the number of evicted sessions.
    pub fn evict_idle(&self) -> usize {
        let now = now_millis();
        let timeout_ms = self.config.idle_timeout.as_millis() as i64;

        let expired: Vec<String> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().state.lock().session.idle_for_ms(now) > timeout_ms)
            .map(|entry| entry.key().clone())
            .collect();

        for order_id in &expired {
            if let Some((_, entry)) = self.sessions.remove(order_id) {
                entry.cancel.cancel();
                tracing::info!(order_id = %order_id, "Evicted idle tracking session");
            }
        }
        expired.len()
    }

    /// Stop every tick loop; used on server shutdown
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    fn start_session(&self, order: &Order) -> Arc<SessionEntry> {
        match self.sessions.entry(order.id.clone()) {
            Entry::Occupied(occupied) => occupied.get().clone(),
            Entry::Vacant(vacant) => {
                let session = TrackingSession::start(
                    order.id.clone(),
                    order.restaurant_location,
                    order.delivery_address.location,
                );
                let (publisher, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
                let entry = Arc::new(SessionEntry {
                    state: Mutex::new(SessionState {
                        session,
                        movement: (self.new_movement)(),
                    }),
                    publisher,
                    cancel: self.shutdown.child_token(),
                });
                vacant.insert(entry.clone());
                tracing::info!(order_id = %order.id, "Tracking session started");
                spawn_tick_loop(order.id.clone(), entry.clone(), self.config.tick_interval);
                entry
            }
        }
    }
}

/// Advance the session and publish the update; returns the snapshot after
/// the step (unchanged for completed sessions)
fn advance_entry(entry: &SessionEntry) -> TrackingSnapshot {
    let (update, snapshot) = {
        let mut state = entry.state.lock();
        let SessionState { session, movement } = &mut *state;
        let update = session.advance(movement.as_mut());
        (update, session.snapshot())
    };

    if let Some(update) = update {
        // Best-effort fan-out: no receivers, or only lagged ones, is fine
        let _ = entry.publisher.send(update);
    }
    snapshot
}

/// Drive a session at a fixed interval until it completes or is cancelled
fn spawn_tick_loop(order_id: String, entry: Arc<SessionEntry>, tick: Duration) {
    let cancel = entry.cancel.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; skip it so the session's
        // seeded position survives one full interval
        interval.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let completed = entry.state.lock().session.is_completed();
                    if completed {
                        break;
                    }
                    advance_entry(&entry);
                }
            }
        }
        tracing::debug!(order_id = %order_id, "Tracking tick loop stopped");
    });
}

/// Handle to one order's position stream
///
/// Dropping the handle unsubscribes.
pub struct TrackingSubscription {
    order_id: String,
    receiver: broadcast::Receiver<DriverLocation>,
}

impl TrackingSubscription {
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Next pushed update; `None` once the session is gone
    pub async fn recv(&mut self) -> Option<DriverLocation> {
        loop {
            match self.receiver.recv().await {
                Ok(update) => return Some(update),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Fell behind: skip to the live edge rather than failing
                    tracing::warn!(
                        order_id = %self.order_id,
                        skipped,
                        "Tracking subscriber lagged"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking poll used by tests and polling transports
    pub fn try_recv(&mut self) -> Option<DriverLocation> {
        loop {
            match self.receiver.try_recv() {
                Ok(update) => return Some(update),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}
