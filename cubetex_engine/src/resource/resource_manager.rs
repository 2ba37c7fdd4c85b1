/// Resource tracker for bulk teardown.
///
/// The manager keeps non-owning back-references to every registered resource
/// so that all live resources can be enumerated and disposed together (e.g.
/// when the device context is lost or the application shuts down). Owners keep
/// the resources alive; the manager only ever releases GPU objects through each
/// resource's own `dispose`.

use std::sync::{Arc, Mutex, PoisonError, Weak};
use slotmap::{new_key_type, SlotMap};
use crate::engine_debug;

new_key_type! {
    /// Key of a registered resource
    pub struct ResourceKey;
}

/// GPU resource that can be released on demand
pub trait Resource: Send {
    /// Short type name used in logs ("CubeTexture", ...)
    fn kind(&self) -> &'static str;

    /// Release the GPU objects. Must be a no-op when already disposed.
    fn dispose(&mut self);

    /// Returns true once the resource has been disposed
    fn is_disposed(&self) -> bool;
}

/// Registration capability injected into resource constructors
pub trait ResourceTracker {
    /// Register a resource for enumeration and bulk teardown
    fn add_resource(&mut self, resource: Weak<Mutex<dyn Resource>>) -> ResourceKey;
}

/// Central resource manager for the engine.
#[derive(Default)]
pub struct ResourceManager {
    resources: SlotMap<ResourceKey, Weak<Mutex<dyn Resource>>>,
}

impl ResourceManager {
    /// Create a new empty resource manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a registered resource, None if unknown or already dropped by its owner
    pub fn get(&self, key: ResourceKey) -> Option<Arc<Mutex<dyn Resource>>> {
        self.resources.get(key).and_then(Weak::upgrade)
    }

    /// Forget a resource without disposing it
    ///
    /// Returns true if the key was registered.
    pub fn remove(&mut self, key: ResourceKey) -> bool {
        self.resources.remove(key).is_some()
    }

    /// Number of registered entries (including dropped or disposed ones not yet pruned)
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Number of registered resources still alive and not disposed
    pub fn live_count(&self) -> usize {
        self.resources
            .values()
            .filter_map(Weak::upgrade)
            .filter(|resource| {
                let guard = resource.lock().unwrap_or_else(PoisonError::into_inner);
                !guard.is_disposed()
            })
            .count()
    }

    /// Drop entries whose resource was dropped or disposed
    ///
    /// Returns the number of removed entries.
    pub fn prune(&mut self) -> usize {
        let before = self.resources.len();
        self.resources.retain(|_, weak| match weak.upgrade() {
            Some(resource) => {
                let guard = resource.lock().unwrap_or_else(PoisonError::into_inner);
                !guard.is_disposed()
            }
            None => false,
        });
        before - self.resources.len()
    }

    /// Dispose every live resource and clear the registry
    ///
    /// Returns the number of resources that were actually disposed. Resources
    /// release through their own `dispose`, which may lock the graphics
    /// device, so this must not run while the caller holds the device lock.
    pub fn dispose_all(&mut self) -> usize {
        let mut disposed = 0;
        for (_, weak) in self.resources.drain() {
            let Some(resource) = weak.upgrade() else {
                continue;
            };
            let mut guard = resource.lock().unwrap_or_else(PoisonError::into_inner);
            if !guard.is_disposed() {
                guard.dispose();
                disposed += 1;
            }
        }
        engine_debug!("cubetex::ResourceManager", "Bulk teardown disposed {} resources", disposed);
        disposed
    }
}

impl ResourceTracker for ResourceManager {
    fn add_resource(&mut self, resource: Weak<Mutex<dyn Resource>>) -> ResourceKey {
        let key = self.resources.insert(resource);
        engine_debug!("cubetex::ResourceManager", "Registered resource {:?}", key);
        key
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
