use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    digest::{Md5Digest, PositionDigest},
    hash_ring::{HashRing, Node},
};

/// A [`HashRing`] that can be shared between threads.
///
/// Resolves run concurrently under a read lock; adds and removes take the
/// write lock and are serialized against everything else.
#[derive(Debug)]
pub struct SharedHashRing<S: Node, D = Md5Digest> {
    inner: Arc<RwLock<HashRing<S, D>>>,
}

impl<S: Node, D> Clone for SharedHashRing<S, D> {
    fn clone(&self) -> Self {
        SharedHashRing {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Node> Default for SharedHashRing<S> {
    fn default() -> Self {
        SharedHashRing::from(HashRing::new())
    }
}

impl<S: Node> SharedHashRing<S> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Node, D> From<HashRing<S, D>> for SharedHashRing<S, D> {
    fn from(ring: HashRing<S, D>) -> Self {
        SharedHashRing {
            inner: Arc::new(RwLock::new(ring)),
        }
    }
}

impl<S: Node, D: PositionDigest + Clone> SharedHashRing<S, D> {
    pub fn add_server(&self, server: S) {
        self.write().add_server(server);
    }

    pub fn add_server_with_replicas(&self, server: S, replicas: usize) {
        self.write().add_server_with_replicas(server, replicas);
    }

    pub fn remove_server(&self, server: &S) {
        self.write().remove_server(server);
    }

    pub fn remove_server_with_replicas(&self, server: &S, replicas: usize) {
        self.write().remove_server_with_replicas(server, replicas);
    }

    pub fn resolve(&self, client: &str) -> Option<S> {
        self.read().resolve(client).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn position_count(&self) -> usize {
        self.read().position_count()
    }

    /// A point-in-time copy of the ring.
    pub fn snapshot(&self) -> HashRing<S, D> {
        self.read().clone()
    }

    // ring methods never panic mid-update, a poisoned lock still holds a consistent ring
    fn read(&self) -> RwLockReadGuard<'_, HashRing<S, D>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashRing<S, D>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
