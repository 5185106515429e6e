//! Per-request transition serialization.
//!
//! Lifecycle transitions are read-modify-write sequences against the
//! repository. Two concurrent accepts must not both transition, and two
//! concurrent joins must not allocate distinct room tokens, so every
//! transition holds the lock of its request id for the whole sequence.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::RequestId;

/// Application-level mutex map keyed by request id.
///
/// One entry per request id ever locked; entries are never evicted.
#[derive(Debug, Default)]
pub struct RequestLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl RequestLocks {
    /// Create an empty lock map.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Acquire the lock for the given request id, waiting if another
    /// transition currently holds it.
    pub async fn acquire(&self, id: &RequestId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(id.as_str().to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
