//! Pool of transient binary resources held by viewer windows.
//!
//! A viewer that shows non-text content owns one resource; the registry
//! releases it when the viewer changes kind or its window is removed.

use std::collections::BTreeMap;

/// Handle to a pooled resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(u64);

/// Bytes fetched for a non-text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryResource {
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Size of the file on disk, which may exceed `bytes.len()`.
    pub total_size: u64,
    /// Page count for paginated documents.
    pub page_count: Option<usize>,
}

#[derive(Debug, Default)]
pub struct ResourcePool {
    next: u64,
    live: BTreeMap<ResourceId, BinaryResource>,
}

impl ResourcePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self, resource: BinaryResource) -> ResourceId {
        self.next += 1;
        let id = ResourceId(self.next);
        tracing::debug!(resource = self.next, bytes = resource.bytes.len(), "resource acquired");
        self.live.insert(id, resource);
        id
    }

    /// Releases a resource. Returns `false` if it was already released.
    pub fn release(&mut self, id: ResourceId) -> bool {
        let released = self.live.remove(&id).is_some();
        if released {
            tracing::debug!(resource = id.0, "resource released");
        } else {
            tracing::warn!(resource = id.0, "resource released twice");
        }
        released
    }

    #[must_use]
    pub fn get(&self, id: ResourceId) -> Option<&BinaryResource> {
        self.live.get(&id)
    }

    /// Number of resources not yet released.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource() -> BinaryResource {
        BinaryResource {
            content_type: "application/octet-stream".to_string(),
            bytes: vec![0, 1, 2],
            total_size: 3,
            page_count: None,
        }
    }

    #[test]
    fn release_happens_once() {
        let mut pool = ResourcePool::new();
        let id = pool.acquire(resource());
        assert_eq!(pool.live_count(), 1);
        assert!(pool.get(id).is_some());

        assert!(pool.release(id));
        assert!(!pool.release(id));
        assert_eq!(pool.live_count(), 0);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut pool = ResourcePool::new();
        let first = pool.acquire(resource());
        pool.release(first);
        let second = pool.acquire(resource());
        assert_ne!(first, second);
    }
}
