//! Compute-once values owned by a provider instance.
//!
//! A [`LazyCache`] is filled by the first successful `get_or_try_init` call and
//! is never invalidated afterwards. Concurrent first callers wait on a single
//! in-flight initializer. A failed initializer leaves the cache empty, so the
//! next caller runs it again.

use std::future::Future;
use tokio::sync::OnceCell;

#[derive(Debug)]
pub struct LazyCache<T> {
    cell: OnceCell<T>,
}

impl<T> Default for LazyCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LazyCache<T> {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Returns the cached value, running `init` if nothing is stored yet.
    pub async fn get_or_try_init<E, F, Fut>(&self, init: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.cell.get_or_try_init(init).await
    }

    /// The cached value, if initialization already succeeded.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn initializes_once_under_concurrent_access() {
        let cache: LazyCache<Vec<u32>> = LazyCache::new();
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let init = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok::<_, ()>(vec![1, 2, 3])
        };

        let (a, b, c) = tokio::join!(
            cache.get_or_try_init(init),
            cache.get_or_try_init(init),
            cache.get_or_try_init(init)
        );

        assert_eq!(a.unwrap(), &vec![1, 2, 3]);
        assert_eq!(b.unwrap(), &vec![1, 2, 3]);
        assert_eq!(c.unwrap(), &vec![1, 2, 3]);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(cache.is_initialized());
    }

    #[tokio::test]
    async fn failed_init_is_not_stored() {
        let cache: LazyCache<u32> = LazyCache::new();

        let first = cache
            .get_or_try_init(|| async { Err::<u32, &str>("offline") })
            .await;
        assert_eq!(first, Err("offline"));
        assert!(cache.get().is_none());

        let second = cache
            .get_or_try_init(|| async { Ok::<u32, &str>(7) })
            .await;
        assert_eq!(second, Ok(&7));

        let third = cache
            .get_or_try_init(|| async { Ok::<u32, &str>(99) })
            .await;
        assert_eq!(third, Ok(&7));
    }
}
