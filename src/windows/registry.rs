//! Ownership of all windows and their transient resources.

use super::resources::{BinaryResource, ResourceId, ResourcePool};
use super::window::{Buffer, Window, WindowId};
use std::collections::BTreeMap;

/// Owns every window keyed by id, plus the resource pool their viewers draw
/// from.
///
/// Ids start at 1 and increase monotonically; a removed id is never handed
/// out again.
#[derive(Debug)]
pub struct WindowRegistry {
    next_id: WindowId,
    windows: BTreeMap<WindowId, Window>,
    resources: ResourcePool,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self {
            next_id: 1,
            windows: BTreeMap::new(),
            resources: ResourcePool::new(),
        }
    }
}

impl WindowRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new empty window and returns its id.
    pub fn create(&mut self) -> WindowId {
        let id = self.next_id;
        self.next_id += 1;
        self.windows.insert(id, Window::new(id));
        tracing::debug!(window = id, "window created");
        id
    }

    #[must_use]
    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.windows.keys().copied()
    }

    /// Removes a window, releasing any resource its buffer held.
    pub fn remove(&mut self, id: WindowId) -> Option<Window> {
        let window = self.windows.remove(&id)?;
        if let Some(resource) = window.buffer.resource() {
            self.resources.release(resource);
        }
        tracing::debug!(window = id, "window removed");
        Some(window)
    }

    /// Replaces a window's buffer, releasing the previous buffer's resource
    /// and bumping the generation so in-flight responses become stale.
    ///
    /// Returns `false` if the window does not exist.
    pub fn replace_buffer(&mut self, id: WindowId, buffer: Buffer) -> bool {
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        let previous = std::mem::replace(&mut window.buffer, buffer);
        window.generation += 1;
        tracing::debug!(
            window = id,
            from = ?previous.kind(),
            to = ?window.buffer.kind(),
            "buffer replaced"
        );
        if let Some(resource) = previous.resource() {
            self.resources.release(resource);
        }
        true
    }

    /// Increments and returns the window's request generation.
    pub fn bump_generation(&mut self, id: WindowId) -> Option<u64> {
        let window = self.windows.get_mut(&id)?;
        window.generation += 1;
        Some(window.generation)
    }

    /// Stores a resource on a viewer window, releasing the one it replaces.
    ///
    /// The resource is dropped without being pooled if the window is not a
    /// viewer.
    pub fn attach_resource(&mut self, id: WindowId, resource: BinaryResource) -> Option<ResourceId> {
        let viewer = self.windows.get_mut(&id)?.viewer_mut()?;
        let handle = self.resources.acquire(resource);
        if let Some(old) = viewer.resource.replace(handle) {
            self.resources.release(old);
        }
        Some(handle)
    }

    #[must_use]
    pub fn resource(&self, id: ResourceId) -> Option<&BinaryResource> {
        self.resources.get(id)
    }

    #[must_use]
    pub const fn resources(&self) -> &ResourcePool {
        &self.resources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windows::window::{ExplorerBuffer, ViewerBuffer};

    fn blob() -> BinaryResource {
        BinaryResource {
            content_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.7".to_vec(),
            total_size: 8,
            page_count: Some(1),
        }
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut registry = WindowRegistry::new();
        let first = registry.create();
        let second = registry.create();
        assert_eq!((first, second), (1, 2));

        registry.remove(second);
        assert_eq!(registry.create(), 3);
    }

    #[test]
    fn converting_a_viewer_releases_its_resource() {
        let mut registry = WindowRegistry::new();
        let id = registry.create();
        registry.replace_buffer(id, Buffer::Viewer(ViewerBuffer::new("/a.pdf")));
        registry.attach_resource(id, blob()).expect("attached");
        assert_eq!(registry.resources().live_count(), 1);

        registry.replace_buffer(id, Buffer::Explorer(ExplorerBuffer::new("/")));
        assert_eq!(registry.resources().live_count(), 0);
    }

    #[test]
    fn removing_a_viewer_releases_its_resource() {
        let mut registry = WindowRegistry::new();
        let id = registry.create();
        registry.replace_buffer(id, Buffer::Viewer(ViewerBuffer::new("/a.pdf")));
        registry.attach_resource(id, blob()).expect("attached");

        registry.remove(id);
        assert_eq!(registry.resources().live_count(), 0);
        assert!(!registry.contains(id));
    }

    #[test]
    fn reattaching_releases_the_previous_resource() {
        let mut registry = WindowRegistry::new();
        let id = registry.create();
        registry.replace_buffer(id, Buffer::Viewer(ViewerBuffer::new("/a.pdf")));
        let first = registry.attach_resource(id, blob()).expect("attached");
        let second = registry.attach_resource(id, blob()).expect("attached");

        assert_ne!(first, second);
        assert_eq!(registry.resources().live_count(), 1);
        assert!(registry.resource(first).is_none());
    }

    #[test]
    fn resources_are_not_attached_to_non_viewers() {
        let mut registry = WindowRegistry::new();
        let id = registry.create();
        assert!(registry.attach_resource(id, blob()).is_none());
        assert_eq!(registry.resources().live_count(), 0);
    }

    #[test]
    fn replace_buffer_bumps_generation() {
        let mut registry = WindowRegistry::new();
        let id = registry.create();
        let before = registry.get(id).map(|w| w.generation);
        registry.replace_buffer(id, Buffer::Explorer(ExplorerBuffer::new("/")));
        let after = registry.get(id).map(|w| w.generation);
        assert_eq!(before.map(|g| g + 1), after);
        assert!(!registry.replace_buffer(99, Buffer::Empty));
    }
}
