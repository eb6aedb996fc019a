//! Per-phone mutual exclusion

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<String, Arc<AsyncMutex<()>>>;

/// Registry of async mutexes keyed by phone number
///
/// Operations on different phones never contend. An entry lives only while
/// some task holds or waits for it.
#[derive(Clone, Default)]
pub struct PhoneLocks {
    registry: Arc<Mutex<LockMap>>,
}

impl PhoneLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `phone`
    pub async fn acquire(&self, phone: &str) -> PhoneGuard {
        let lock = {
            let mut registry = lock_registry(&self.registry);
            registry
                .entry(phone.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        let guard = lock.clone().lock_owned().await;

        PhoneGuard {
            phone: phone.to_string(),
            lock,
            guard: Some(guard),
            registry: Arc::clone(&self.registry),
        }
    }

    /// Number of phones currently locked or awaited
    pub fn active(&self) -> usize {
        lock_registry(&self.registry).len()
    }
}

/// Exclusive access to one phone; released on drop
pub struct PhoneGuard {
    phone: String,
    lock: Arc<AsyncMutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
    registry: Arc<Mutex<LockMap>>,
}

impl PhoneGuard {
    pub fn phone(&self) -> &str {
        &self.phone
    }
}

impl Drop for PhoneGuard {
    fn drop(&mut self) {
        // Release the mutex before inspecting reference counts
        self.guard.take();

        let mut registry = lock_registry(&self.registry);
        if let Some(entry) = registry.get(&self.phone) {
            // Registry + this guard are the only holders: nobody is waiting
            if Arc::ptr_eq(entry, &self.lock) && Arc::strong_count(&self.lock) == 2 {
                registry.remove(&self.phone);
            }
        }
    }
}

// A panic while holding the registry cannot leave the map inconsistent
fn lock_registry(registry: &Mutex<LockMap>) -> MutexGuard<'_, LockMap> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
