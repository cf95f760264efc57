//! Session shared between tasks
//!
//! Refreshes run on the blocking pool while the session is locked. The new
//! snapshot is published only once the scan has finished, and before the
//! session lock is released, so readers see either the previous snapshot or
//! the complete new one and never an older generation after a newer one.

use super::{RosterSession, RosterSnapshot};
use crate::core::types::{MemoryError, MemoryResult};
use crate::memory::ForeignMemory;
use std::sync::{Arc, Mutex, RwLock};
use tracing::debug;

/// Cloneable handle to a session and its latest published snapshot
pub struct SharedRoster<M: ForeignMemory + 'static> {
    session: Arc<Mutex<RosterSession<M>>>,
    published: Arc<RwLock<Arc<RosterSnapshot>>>,
}

impl<M: ForeignMemory + 'static> Clone for SharedRoster<M> {
    fn clone(&self) -> Self {
        SharedRoster {
            session: Arc::clone(&self.session),
            published: Arc::clone(&self.published),
        }
    }
}

impl<M: ForeignMemory + 'static> SharedRoster<M> {
    pub fn new(session: RosterSession<M>) -> Self {
        let published = Arc::new(RwLock::new(session.snapshot()));
        SharedRoster {
            session: Arc::new(Mutex::new(session)),
            published,
        }
    }

    /// Latest complete snapshot; never blocks on a running refresh
    pub fn snapshot(&self) -> MemoryResult<Arc<RosterSnapshot>> {
        let published = self
            .published
            .read()
            .map_err(|_| MemoryError::SessionUnavailable("snapshot lock poisoned".to_string()))?;
        Ok(Arc::clone(&published))
    }

    /// Refreshes on the blocking pool and publishes the result
    pub async fn refresh(&self) -> MemoryResult<Arc<RosterSnapshot>> {
        let session = Arc::clone(&self.session);
        let published = Arc::clone(&self.published);

        tokio::task::spawn_blocking(move || -> MemoryResult<Arc<RosterSnapshot>> {
            let mut session = session.lock().map_err(|_| {
                MemoryError::SessionUnavailable("session lock poisoned".to_string())
            })?;
            let snapshot = session.refresh();
            publish(&published, Arc::clone(&snapshot))?;
            Ok(snapshot)
        })
        .await
        .map_err(|e| MemoryError::SessionUnavailable(format!("refresh task failed: {}", e)))?
    }

    /// Runs `f` with exclusive access to the session.
    ///
    /// A snapshot produced inside `f` (a refresh or rescan) is published
    /// before the session is released.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut RosterSession<M>) -> R) -> MemoryResult<R> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| MemoryError::SessionUnavailable("session lock poisoned".to_string()))?;
        let result = f(&mut session);
        publish(&self.published, session.snapshot())?;
        Ok(result)
    }
}

/// Replaces the published snapshot unless it is already as new
fn publish(
    published: &RwLock<Arc<RosterSnapshot>>,
    snapshot: Arc<RosterSnapshot>,
) -> MemoryResult<()> {
    let mut slot = published
        .write()
        .map_err(|_| MemoryError::SessionUnavailable("snapshot lock poisoned".to_string()))?;
    if snapshot.generation > slot.generation {
        debug!("Published snapshot {}", snapshot.generation);
        *slot = snapshot;
    }
    Ok(())
}
