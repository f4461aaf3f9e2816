//! Scoped resource collector.
//!
//! Deterministic teardown around each top-level entry point: an `analyze`
//! call, or one RowsAndColumns lifetime. Release actions run in reverse
//! registration order, each exactly once, whether the owner closes
//! explicitly or the collector is dropped mid-flight (early abort included).

use std::sync::Mutex;

/// A resource the collector knows how to release.
///
/// `close` is called at most once per registration; implementations do not
/// need their own idempotence guard for that path, but resources that can
/// also be released directly by callers must tolerate both happening.
pub trait Close: Send {
    fn close(&mut self);
}

struct FnClose(Option<Box<dyn FnOnce() + Send>>);

impl Close for FnClose {
    fn close(&mut self) {
        if let Some(f) = self.0.take() {
            f();
        }
    }
}

/// Stack of release actions. Registration is serialized; `close` drains the
/// stack in reverse order and is idempotent.
pub struct Closer {
    resources: Mutex<Vec<Box<dyn Close>>>,
}

impl Closer {
    pub fn new() -> Self {
        Self {
            resources: Mutex::new(Vec::new()),
        }
    }

    /// Register a resource for release on close.
    pub fn register<C: Close + 'static>(&self, resource: C) {
        self.lock().push(Box::new(resource));
    }

    /// Register a one-shot release action.
    pub fn register_fn(&self, f: impl FnOnce() + Send + 'static) {
        self.lock().push(Box::new(FnClose(Some(Box::new(f)))));
    }

    /// Number of registered, not-yet-released resources.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Release everything in reverse registration order. Safe to call more
    /// than once; later calls release whatever was registered in between.
    pub fn close(&self) {
        let mut drained = {
            let mut guard = self.lock();
            std::mem::take(&mut *guard)
        };
        while let Some(mut resource) = drained.pop() {
            resource.close();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Box<dyn Close>>> {
        // A panic while holding the lock leaves nothing half-mutated worth
        // protecting; keep the resources so Drop can still release them.
        self.resources
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl Default for Closer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Closer {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn releases_in_reverse_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let closer = Closer::new();
        for i in 0..3 {
            let order = order.clone();
            closer.register_fn(move || order.lock().unwrap().push(i));
        }
        closer.close();
        assert_eq!(*order.lock().unwrap(), vec![2, 1, 0]);
    }

    #[test]
    fn close_is_idempotent() {
        let count = Arc::new(AtomicUsize::new(0));
        let closer = Closer::new();
        let c = count.clone();
        closer.register_fn(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        closer.close();
        closer.close();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_releases_outstanding() {
        let count = Arc::new(AtomicUsize::new(0));
        {
            let closer = Closer::new();
            let c = count.clone();
            closer.register_fn(move || {
                c.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
