//! Transaction list controller.
//!
//! Owns the dashboard state and mediates every call to the transactions API.
//! State lives in a `watch` channel as an `Arc<DashboardSnapshot>`; each
//! update publishes a whole new snapshot, so a renderer never sees a new
//! list next to an old balance.
//!
//! Operations are serialized by an async mutex. After [`deactivate`], a
//! response that is still in flight is dropped instead of applied. The
//! active flag is only flipped and checked while holding the channel's
//! write lock, so no snapshot lands after `deactivate` returns.
//!
//! [`deactivate`]: TransactionListController::deactivate

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono_tz::Tz;
use gofinances_core::{is_consistent, DashboardSnapshot};
use tokio::sync::{watch, Mutex};

use crate::api::TransactionsApi;
use crate::error::ControllerError;

/// Result of a successful delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// False when the id was not in the local list
    pub removed: bool,
}

struct Inner<A> {
    api: A,
    timezone: Tz,
    state: watch::Sender<Arc<DashboardSnapshot>>,
    active: AtomicBool,
    ops: Mutex<()>,
}

/// Cheap to clone; clones share the same state.
pub struct TransactionListController<A> {
    inner: Arc<Inner<A>>,
}

impl<A> Clone for TransactionListController<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: TransactionsApi> TransactionListController<A> {
    pub fn new(api: A, timezone: Tz) -> Self {
        let (state, _) = watch::channel(Arc::new(DashboardSnapshot::unloaded()));
        Self {
            inner: Arc::new(Inner {
                api,
                timezone,
                state,
                active: AtomicBool::new(true),
                ops: Mutex::new(()),
            }),
        }
    }

    /// Current state
    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        Arc::clone(&self.inner.state.borrow())
    }

    /// Receiver notified on every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardSnapshot>> {
        self.inner.state.subscribe()
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Tear down: responses arriving from now on are discarded.
    pub fn deactivate(&self) {
        self.inner.state.send_if_modified(|_| {
            if self.inner.active.swap(false, Ordering::SeqCst) {
                log::debug!("controller deactivated");
            }
            false
        });
    }

    /// Fetch the list and balance from the server and replace the snapshot.
    ///
    /// On failure the previous data stays in place, the error is recorded in
    /// the snapshot and returned. Nothing is retried.
    pub async fn load(&self) -> Result<Arc<DashboardSnapshot>, ControllerError> {
        let _guard = self.inner.ops.lock().await;
        self.ensure_active()?;

        let result = self.inner.api.list().await;
        self.ensure_active()?;

        match result {
            Ok(payload) => {
                if !is_consistent(&payload.balance, &payload.transactions) {
                    log::warn!(
                        "server balance {:?} does not match {} loaded transactions",
                        payload.balance,
                        payload.transactions.len()
                    );
                }
                let next = Arc::new(DashboardSnapshot::loaded(payload, self.inner.timezone));
                self.publish(Arc::clone(&next))?;
                log::info!("loaded {} transactions", next.transactions.len());
                Ok(next)
            }
            Err(e) => {
                log::error!("failed to load transactions: {e}");
                let next = self.snapshot().with_load_error(e.to_string());
                self.publish(Arc::new(next))?;
                Err(e.into())
            }
        }
    }

    /// Delete `id` on the server, then drop it locally and recompute the balance.
    ///
    /// Local state changes only when the server answered 204.
    pub async fn delete(&self, id: &str) -> Result<DeleteOutcome, ControllerError> {
        let _guard = self.inner.ops.lock().await;
        self.ensure_active()?;

        let result = self.inner.api.delete(id).await;
        self.ensure_active()?;

        if let Err(e) = result {
            log::error!("failed to delete transaction {id}: {e}");
            return Err(e.into());
        }

        let (next, removed) = self.snapshot().without_transaction(id);
        if !removed {
            log::warn!("deleted transaction {id} was not in the local list");
        }
        self.publish(Arc::new(next))?;
        log::info!("deleted transaction {id}");
        Ok(DeleteOutcome { removed })
    }

    fn ensure_active(&self) -> Result<(), ControllerError> {
        if self.is_active() {
            Ok(())
        } else {
            log::debug!("dropping response for deactivated controller");
            Err(ControllerError::Deactivated)
        }
    }

    /// Replace the snapshot unless the controller was deactivated meanwhile.
    fn publish(&self, snapshot: Arc<DashboardSnapshot>) -> Result<(), ControllerError> {
        let applied = self.inner.state.send_if_modified(|current| {
            if self.inner.active.load(Ordering::SeqCst) {
                *current = snapshot;
                true
            } else {
                false
            }
        });
        if applied {
            Ok(())
        } else {
            log::debug!("dropping response for deactivated controller");
            Err(ControllerError::Deactivated)
        }
    }
}
