//! Shared handles — one mutual-exclusion boundary per domain entity.
//!
//! The facade and its callers hold clones of the same handle, so a room
//! switched through one is seen switched through the other.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use smarthome_domain::action_log::{ActionLogger, LogEntry};

/// Reference-counted, lock-protected entity.
pub type Shared<T> = Arc<Mutex<T>>;

/// Wrap `value` in a fresh [`Shared`] handle.
pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(Mutex::new(value))
}

/// Lock a handle, recovering the data if a previous holder panicked.
///
/// Every mutation in the domain keeps its invariants before returning, so a
/// poisoned value is still consistent.
pub fn lock<T>(handle: &Shared<T>) -> MutexGuard<'_, T> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Append to the action log and mirror the entry to `tracing`.
pub fn record(logger: &Shared<ActionLogger>, source: &str, message: &str) -> LogEntry {
    tracing::info!(source, action = message, "action recorded");
    lock(logger).log(source, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_share_state_between_clones() {
        let handle = shared(ActionLogger::new());
        let other = Arc::clone(&handle);

        record(&handle, "Kitchen", "light turned on");

        assert_eq!(
            lock(&other).lines(),
            vec!["Kitchen: light turned on".to_string()]
        );
    }

    #[test]
    fn should_recover_from_poisoned_lock() {
        let handle = shared(ActionLogger::new());
        let cloned = Arc::clone(&handle);

        let _ = std::thread::spawn(move || {
            let _guard = cloned.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(handle.is_poisoned());
        record(&handle, "Hall", "still works");
        assert_eq!(lock(&handle).len(), 1);
    }
}
