//! Icon resolution seam and its publish-once cache.
//!
//! Icon extraction itself is out of scope; resolvers may always answer with
//! a placeholder, and must never panic across this boundary. The cache is
//! keyed by (path, size class). Each slot is published at most once and is
//! immutable afterwards; the map lock covers only slot lookup, so
//! result-rendering passes on different threads can read concurrently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconHandle {
    Placeholder,
    SystemIndex(i32),
}

pub trait IconResolver: Send + Sync {
    fn icon_for(&self, path: &str, small: bool) -> IconHandle;
}

/// Default resolver: every path maps to the placeholder glyph.
#[derive(Debug, Default)]
pub struct PlaceholderIconResolver;

impl IconResolver for PlaceholderIconResolver {
    fn icon_for(&self, _path: &str, _small: bool) -> IconHandle {
        IconHandle::Placeholder
    }
}

type IconKey = (String, bool);
type IconSlot = Arc<OnceLock<IconHandle>>;

pub struct IconCache {
    resolver: Box<dyn IconResolver>,
    slots: Mutex<HashMap<IconKey, IconSlot>>,
}

impl IconCache {
    pub fn new(resolver: Box<dyn IconResolver>) -> Self {
        Self {
            resolver,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, path: &str, small: bool) -> IconHandle {
        let slot = {
            let mut slots = match self.slots.lock() {
                Ok(guard) => guard,
                // A poisoned map only means another lookup panicked; fall
                // back to resolving without caching.
                Err(_) => return self.resolver.icon_for(path, small),
            };
            Arc::clone(
                slots
                    .entry((path.to_string(), small))
                    .or_insert_with(IconSlot::default),
            )
        };

        slot.get_or_init(|| self.resolver.icon_for(path, small))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().map(|slots| slots.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{IconCache, IconHandle, IconResolver};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingResolver {
        calls: Arc<AtomicUsize>,
    }

    impl IconResolver for CountingResolver {
        fn icon_for(&self, _path: &str, small: bool) -> IconHandle {
            self.calls.fetch_add(1, Ordering::SeqCst);
            IconHandle::SystemIndex(if small { 1 } else { 2 })
        }
    }

    #[test]
    fn each_key_resolves_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = IconCache::new(Box::new(CountingResolver {
            calls: Arc::clone(&calls),
        }));

        assert_eq!(cache.get("C:\\a.exe", true), IconHandle::SystemIndex(1));
        assert_eq!(cache.get("C:\\a.exe", true), IconHandle::SystemIndex(1));
        assert_eq!(cache.get("C:\\a.exe", false), IconHandle::SystemIndex(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn concurrent_lookups_agree_on_the_published_value() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = Arc::new(IconCache::new(Box::new(CountingResolver {
            calls: Arc::clone(&calls),
        })));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get("C:\\shared.exe", true))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), IconHandle::SystemIndex(1));
        }
    }
}
